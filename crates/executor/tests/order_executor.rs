use api_client::MockApiClient;
use configuration::ExecutionConfig;
use core_types::{Allocation, InstrumentClass, OrderSide, OrderType, SymbolNormalizer, TimeInForce};
use events::{OutcomeKind, SkipReason, TradeOutcome};
use executor::{OrderExecutor, Venues};
use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use std::sync::Arc;

fn allocation(rank: usize, ticker: Option<&str>, amount: Decimal) -> Allocation {
    Allocation {
        rank,
        weight: 1,
        company_name: format!("Company {}", rank),
        ticker: ticker.map(str::to_string),
        dollar_amount: amount,
    }
}

fn executor_for(api: Arc<MockApiClient>) -> OrderExecutor {
    executor_with(api, ExecutionConfig::default())
}

fn executor_with(api: Arc<MockApiClient>, config: ExecutionConfig) -> OrderExecutor {
    OrderExecutor::new(Venues::live(api, &config), SymbolNormalizer::default())
}

#[tokio::test]
async fn test_equity_buy_uses_whole_shares() {
    let api = Arc::new(MockApiClient::new().with_trade_price("AAPL", dec!(189.99)));
    let log = executor_for(api.clone())
        .execute(&[allocation(0, Some("AAPL"), dec!(500))])
        .await;

    assert_eq!(
        log.outcomes(),
        &[TradeOutcome::Bought {
            symbol: "AAPL".to_string(),
            quantity: dec!(2),
            price: dec!(189.99),
            class: InstrumentClass::Equity,
        }]
    );
    let orders = api.submitted_orders();
    assert_eq!(orders.len(), 1);
    assert_eq!(orders[0].side, OrderSide::Buy);
    assert_eq!(orders[0].quantity, dec!(2));
    assert_eq!(orders[0].order_type, OrderType::Market);
    assert_eq!(orders[0].time_in_force, TimeInForce::Gtc);
}

#[tokio::test]
async fn test_crypto_buy_prices_from_bar_and_submits_broker_symbol() {
    let api = Arc::new(MockApiClient::new().with_bar_close("BTC/USD", dec!(64000)));
    let log = executor_for(api.clone())
        .execute(&[allocation(0, Some("btc/usd"), dec!(100))])
        .await;

    match &log.outcomes()[0] {
        TradeOutcome::Bought {
            symbol,
            quantity,
            class,
            ..
        } => {
            assert_eq!(symbol, "BTC/USD");
            assert_eq!(*quantity, dec!(0.0015625));
            assert_eq!(*class, InstrumentClass::Crypto);
        }
        other => panic!("expected Bought, got {:?}", other),
    }
    assert_eq!(api.calls(), vec!["latest_bar:BTC/USD", "order:buy:BTCUSD"]);
    assert_eq!(api.submitted_orders()[0].symbol, "BTCUSD");
}

#[tokio::test]
async fn test_allocation_below_one_share_is_skipped_without_order() {
    let api = Arc::new(MockApiClient::new().with_trade_price("NVDA", dec!(900)));
    let log = executor_for(api.clone())
        .execute(&[allocation(2, Some("NVDA"), dec!(166.67))])
        .await;

    assert_eq!(
        log.outcomes(),
        &[TradeOutcome::Skipped {
            symbol: Some("NVDA".to_string()),
            reason: SkipReason::InsufficientAllocation {
                amount: dec!(166.67),
                price: dec!(900),
                class: InstrumentClass::Equity,
            },
        }]
    );
    assert!(api.submitted_orders().is_empty());
}

#[tokio::test]
async fn test_crypto_dust_truncates_to_zero_and_is_skipped() {
    let api = Arc::new(MockApiClient::new().with_bar_close("BTC/USD", dec!(64000)));
    let log = executor_for(api.clone())
        .execute(&[allocation(0, Some("BTC/USD"), dec!(0.000001))])
        .await;

    assert_eq!(
        log.outcomes(),
        &[TradeOutcome::Skipped {
            symbol: Some("BTC/USD".to_string()),
            reason: SkipReason::InsufficientAllocation {
                amount: dec!(0.000001),
                price: dec!(64000),
                class: InstrumentClass::Crypto,
            },
        }]
    );
    assert_eq!(api.calls(), vec!["latest_bar:BTC/USD"]);
    assert!(api.submitted_orders().is_empty());
}

#[tokio::test]
async fn test_crypto_below_configured_minimum_is_skipped() {
    let api = Arc::new(MockApiClient::new().with_bar_close("BTC/USD", dec!(64000)));
    let config = ExecutionConfig {
        min_crypto_quantity: dec!(0.0001),
        ..ExecutionConfig::default()
    };
    // $1 buys 0.000015625 BTC, under the 0.0001 floor.
    let log = executor_with(api.clone(), config)
        .execute(&[allocation(0, Some("BTC/USD"), dec!(1))])
        .await;

    assert_eq!(log.len(), 1);
    assert!(matches!(
        &log.outcomes()[0],
        TradeOutcome::Skipped {
            reason: SkipReason::InsufficientAllocation {
                class: InstrumentClass::Crypto,
                ..
            },
            ..
        }
    ));
    assert!(api.submitted_orders().is_empty());
}

#[tokio::test]
async fn test_price_failure_does_not_stop_later_allocations() {
    let api = Arc::new(
        MockApiClient::new()
            .with_trade_price("AAPL", dec!(100))
            .with_trade_price("MSFT", dec!(50)),
    );
    let allocations = [
        allocation(0, Some("AAPL"), dec!(300)),
        allocation(1, Some("ZZZZ"), dec!(200)),
        allocation(2, Some("MSFT"), dec!(100)),
    ];
    let log = executor_for(api.clone()).execute(&allocations).await;

    let kinds: Vec<OutcomeKind> = log.outcomes().iter().map(TradeOutcome::kind).collect();
    assert_eq!(
        kinds,
        vec![OutcomeKind::Bought, OutcomeKind::Failed, OutcomeKind::Bought]
    );
    assert_eq!(log.outcomes()[1].symbol(), Some("ZZZZ"));
    let submitted: Vec<String> = api.submitted_orders().into_iter().map(|o| o.symbol).collect();
    assert_eq!(submitted, vec!["AAPL", "MSFT"]);
}

#[tokio::test]
async fn test_rejected_order_is_failed_with_broker_message() {
    let api = Arc::new(
        MockApiClient::new()
            .with_trade_price("TSLA", dec!(200))
            .rejecting_orders_for("TSLA", "insufficient buying power"),
    );
    let log = executor_for(api)
        .execute(&[allocation(0, Some("TSLA"), dec!(1000))])
        .await;

    assert_eq!(log.len(), 1);
    match &log.outcomes()[0] {
        TradeOutcome::Failed {
            symbol,
            side,
            error,
        } => {
            assert_eq!(symbol, "TSLA");
            assert_eq!(*side, OrderSide::Buy);
            assert!(error.contains("insufficient buying power"), "{}", error);
        }
        other => panic!("expected Failed, got {:?}", other),
    }
}

#[tokio::test]
async fn test_missing_ticker_is_skipped_without_broker_calls() {
    let api = Arc::new(MockApiClient::new());
    let log = executor_for(api.clone())
        .execute(&[allocation(0, None, dec!(1000))])
        .await;

    assert_eq!(log.len(), 1);
    assert_eq!(log.outcomes()[0], TradeOutcome::missing_ticker("Company 0"));
    assert!(api.calls().is_empty());
}

#[tokio::test]
async fn test_outcomes_keep_allocation_order() {
    let api = Arc::new(
        MockApiClient::new()
            .with_trade_price("AAPL", dec!(10))
            .with_bar_close("ETH/USD", dec!(2500)),
    );
    let allocations = [
        allocation(0, Some("ETH/USD"), dec!(50)),
        allocation(1, None, dec!(30)),
        allocation(2, Some("AAPL"), dec!(20)),
    ];
    let log = executor_for(api).execute(&allocations).await;

    let symbols: Vec<Option<&str>> = log.outcomes().iter().map(TradeOutcome::symbol).collect();
    assert_eq!(symbols, vec![Some("ETH/USD"), None, Some("AAPL")]);
}
