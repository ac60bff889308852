use api_client::error::ApiError;
use rust_decimal::Decimal;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ExecutorError {
    #[error("{0}")]
    Api(#[from] ApiError),

    #[error("Reference price for {symbol} is not usable: {price}")]
    InvalidPrice { symbol: String, price: Decimal },
}
