use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum ValidationError {
    #[error("Private key cannot be empty")]
    EmptyCredential,

    #[error("Token address cannot be empty")]
    EmptyTokenAddress,

    #[error("Slippage must be a number, got {0:?}")]
    InvalidSlippage(String),
}
