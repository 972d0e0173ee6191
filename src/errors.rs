use std::fmt;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ApiError {
    #[error(transparent)]
    Diesel(#[from] diesel::result::Error),

    #[error(transparent)]
    DbPool(#[from] diesel::r2d2::PoolError),

    #[error(transparent)]
    RedisError(#[from] redis::RedisError),

    #[error("Blocking task failed: {0}")]
    Join(#[from] tokio::task::JoinError),

    #[error("Invalid date {value:?} in {column}")]
    InvalidDate { column: &'static str, value: String },

    #[error("Cache is disabled")]
    CacheDisabled,

    #[error("Cache record not found: {0}")]
    NotFound(String),

    #[error("Unexpected Error: {0}")]
    Custom(String),
}

/// Error messages for the API Responses
pub enum ErrorMessages {
    Unexpected,
    DB,
    Data,
}

// Use the ErrorMessages enum to display error messages for the API Responses
impl fmt::Display for ErrorMessages {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let message = match self {
            ErrorMessages::Unexpected => "We encountered an unexpected error while building the dashboard.",
            ErrorMessages::DB => "The analytics database could not be read. Kindly try again after some time.",
            ErrorMessages::Data => "The analytics database contains records that could not be interpreted.",
        };
        write!(f, "{message}")
    }
}

impl ApiError {
    /// User facing message for this error; internal details stay in the logs
    pub fn public_message(&self) -> ErrorMessages {
        match self {
            ApiError::Diesel(_) | ApiError::DbPool(_) => ErrorMessages::DB,
            ApiError::InvalidDate { .. } => ErrorMessages::Data,
            _ => ErrorMessages::Unexpected,
        }
    }
}
