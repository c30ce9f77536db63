//! Error types for TxKV core.

use crate::command::ParseError;
use thiserror::Error;

/// Result type for core operations.
pub type CoreResult<T> = Result<T, CoreError>;

/// Errors that can occur in TxKV core operations.
///
/// None of these are fatal: the read loop reports them and keeps going.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CoreError {
    /// ROLLBACK or COMMIT with no open transaction.
    #[error("NO TRANSACTION")]
    NoTransaction,

    /// The input line is not a valid command.
    #[error(transparent)]
    InvalidInput(#[from] ParseError),

    /// BEGIN would exceed the configured nesting limit.
    #[error("transaction depth limit of {limit} exceeded")]
    TransactionDepthExceeded {
        /// The configured limit.
        limit: usize,
    },

    /// The reverse mapping disagrees with the forward mapping.
    #[error("index corruption: {message}")]
    IndexCorruption {
        /// Description of the mismatch.
        message: String,
    },
}

impl CoreError {
    /// Creates an index corruption error.
    pub fn index_corruption(message: impl Into<String>) -> Self {
        Self::IndexCorruption {
            message: message.into(),
        }
    }

    /// Returns true if this error only reports a missing transaction.
    #[must_use]
    pub fn is_no_transaction(&self) -> bool {
        matches!(self, Self::NoTransaction)
    }
}
