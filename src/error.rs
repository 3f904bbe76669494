use thiserror::Error;

/// Why a submitted entry was rejected. Nothing is persisted when this is returned.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub(crate) enum ValidationError {
    #[error("date is required")]
    MissingDate,

    #[error("invalid date '{0}' (expected YYYY-MM-DD)")]
    InvalidDate(String),

    #[error("description is required")]
    MissingDescription,

    #[error("category is required")]
    MissingCategory,

    #[error("amount '{0}' is not a number")]
    InvalidAmount(String),

    #[error("amount must be greater than zero")]
    NonPositiveAmount,

    #[error("amount must not exceed 1000000000000000")]
    AmountTooLarge,
}

#[derive(Error, Debug)]
pub(crate) enum LedgerError {
    #[error("Invalid transaction: {0}")]
    Validation(#[from] ValidationError),

    #[error("Please select both start and end dates")]
    MissingFilterRange,

    #[error("{0} not found")]
    MissingUiElement(&'static str),

    #[error("Stored ledger is empty or corrupt: {0}")]
    StorageEmptyOrCorrupt(String),

    #[error("Storage error: {0}")]
    Storage(#[from] rusqlite::Error),

    #[error("Could not serialize ledger: {0}")]
    Serialize(#[from] serde_json::Error),
}

pub(crate) type Result<T> = std::result::Result<T, LedgerError>;
