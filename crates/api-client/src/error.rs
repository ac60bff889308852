use thiserror::Error;

#[derive(Error, Debug)]
pub enum ApiError {
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("The API request returned an error (status {status}): {message}")]
    ApiError { status: u16, message: String },

    #[error("Failed to deserialize the API response: {0}")]
    Deserialization(String),

    #[error("Invalid data format from API: {0}")]
    InvalidData(String),

    #[error("No market data available for {0}")]
    NoMarketData(String),

    #[error("Invalid credentials: {0}")]
    Credentials(String),
}
