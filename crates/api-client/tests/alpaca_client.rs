use api_client::error::ApiError;
use api_client::{AlpacaClient, ApiClient};
use configuration::{BrokerConfig, Credentials};
use core_types::{OrderRequest, OrderSide, TimeInForce};
use rust_decimal_macros::dec;
use serde_json::json;
use wiremock::matchers::{body_partial_json, header, method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn client_for(server: &MockServer) -> AlpacaClient {
    let broker = BrokerConfig {
        trading_url: server.uri(),
        data_url: server.uri(),
        crypto_feed: "us".to_string(),
    };
    AlpacaClient::new(&broker, &Credentials::new("PKTEST", "SECRET")).expect("client builds")
}

#[tokio::test]
async fn test_positions_are_fetched_with_auth_headers() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/v2/positions"))
        .and(header("APCA-API-KEY-ID", "PKTEST"))
        .and(header("APCA-API-SECRET-KEY", "SECRET"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([
            {"symbol": "AAPL", "qty": "12", "asset_class": "us_equity", "side": "long"},
            {"symbol": "BTCUSD", "qty": "0.5", "asset_class": "crypto", "side": "long"}
        ])))
        .expect(1)
        .mount(&server)
        .await;

    let positions = client_for(&server).list_positions().await.unwrap();
    assert_eq!(positions.len(), 2);
    assert_eq!(positions[0].qty, dec!(12));
    assert_eq!(positions[1].symbol, "BTCUSD");
}

#[tokio::test]
async fn test_latest_trade_price() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/v2/stocks/MSFT/trades/latest"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "symbol": "MSFT",
            "trade": {"t": "2024-05-01T15:59:59.5Z", "x": "V", "p": 402.17, "s": 100, "c": ["@"], "i": 1, "z": "C"}
        })))
        .mount(&server)
        .await;

    let trade = client_for(&server).get_latest_trade("MSFT").await.unwrap();
    assert_eq!(trade.price, dec!(402.17));
}

#[tokio::test]
async fn test_crypto_bar_lookup_and_missing_pair() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/v1beta3/crypto/us/latest/bars"))
        .and(query_param("symbols", "ETH/USD"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "bars": {"ETH/USD": {"t": "2024-05-01T12:00:00Z", "o": 3000.1, "h": 3005, "l": 2999, "c": 3001.25, "v": 4.2}}
        })))
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/v1beta3/crypto/us/latest/bars"))
        .and(query_param("symbols", "DOGE/USD"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"bars": {}})))
        .mount(&server)
        .await;

    let client = client_for(&server);
    let bar = client.get_latest_crypto_bar("ETH/USD").await.unwrap();
    assert_eq!(bar.close, dec!(3001.25));

    let err = client.get_latest_crypto_bar("DOGE/USD").await.unwrap_err();
    assert!(matches!(err, ApiError::NoMarketData(symbol) if symbol == "DOGE/USD"));
}

#[tokio::test]
async fn test_submit_order_posts_market_gtc_body() {
    let server = MockServer::start().await;
    let order = OrderRequest::market("AAPL", OrderSide::Buy, dec!(3), TimeInForce::Gtc);

    Mock::given(method("POST"))
        .and(path("/v2/orders"))
        .and(body_partial_json(json!({
            "symbol": "AAPL",
            "qty": "3",
            "side": "buy",
            "type": "market",
            "time_in_force": "gtc",
            "client_order_id": order.client_order_id.to_string()
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "id": "904837e3-3b76-47ec-b432-046db621571b",
            "client_order_id": order.client_order_id.to_string(),
            "symbol": "AAPL",
            "qty": "3",
            "side": "buy",
            "type": "market",
            "time_in_force": "gtc",
            "status": "accepted"
        })))
        .expect(1)
        .mount(&server)
        .await;

    let response = client_for(&server).submit_order(&order).await.unwrap();
    assert_eq!(response.status, "accepted");
    assert_eq!(response.client_order_id, order.client_order_id.to_string());
}

#[tokio::test]
async fn test_error_body_message_is_surfaced() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/v2/orders"))
        .respond_with(ResponseTemplate::new(403).set_body_json(json!({
            "code": 40310000,
            "message": "insufficient buying power"
        })))
        .mount(&server)
        .await;

    let order = OrderRequest::market("TSLA", OrderSide::Buy, dec!(1), TimeInForce::Gtc);
    let err = client_for(&server).submit_order(&order).await.unwrap_err();
    match err {
        ApiError::ApiError { status, message } => {
            assert_eq!(status, 403);
            assert_eq!(message, "insufficient buying power");
        }
        other => panic!("unexpected error: {other:?}"),
    }
}

#[test]
fn test_missing_credentials_rejected_before_any_request() {
    let result = AlpacaClient::new(&BrokerConfig::default(), &Credentials::default());
    assert!(matches!(result, Err(ApiError::Credentials(_))));
}
