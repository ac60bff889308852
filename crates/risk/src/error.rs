use rust_decimal::Decimal;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum AllocationError {
    #[error("The investment amount ({0}) must be greater than zero.")]
    InvalidAmount(Decimal),

    #[error("A calculation error occurred: {0}")]
    Calculation(String),
}
