use thiserror::Error;
use uuid::Uuid;

use crate::ledger::TransactionId;

/// Error type that captures common ledger failures.
#[derive(Debug, Error)]
pub enum LedgerError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Serialization error: {0}")]
    Serde(#[from] serde_json::Error),
    #[error("Duplicate transaction id: {0}")]
    DuplicateTransaction(TransactionId),
    #[error("Duplicate recurring rule id: {0}")]
    DuplicateRule(Uuid),
    #[error("Validation error: {0}")]
    Validation(String),
    #[error("Storage error: {0}")]
    Storage(String),
}
