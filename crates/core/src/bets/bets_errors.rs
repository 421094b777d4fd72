use thiserror::Error;

/// Custom error type for bet-ledger operations
#[derive(Debug, Error)]
pub enum BetError {
    #[error("Not found: {0}")]
    NotFound(String),
    #[error("Invalid data: {0}")]
    InvalidData(String),
}

impl From<BetError> for String {
    fn from(error: BetError) -> Self {
        error.to_string()
    }
}
