use thiserror::Error;

/// Error type shared by the calendar engine and the ledger store.
#[derive(Debug, Error)]
pub enum LedgerError {
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),
    #[error("Not found: {0}")]
    NotFound(String),
    #[error("No user is logged in")]
    NotLoggedIn,
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Serialization error: {0}")]
    Serde(#[from] serde_json::Error),
}

impl LedgerError {
    pub(crate) fn invalid(message: impl Into<String>) -> Self {
        LedgerError::InvalidArgument(message.into())
    }
}

pub type Result<T> = std::result::Result<T, LedgerError>;
