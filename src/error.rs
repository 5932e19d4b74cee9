use std::io;
use std::path::PathBuf;
use thiserror::Error;

/// Rejection of a single piece of user input. The message is shown back to the
/// user before re-prompting.
#[derive(Debug, Error, PartialEq)]
pub enum ValidationError {
    #[error("Invalid date format. Please use YYYY-MM-DD.")]
    InvalidDate,

    #[error("Invalid category '{0}'. Please choose from: Food, Travel, Utilities.")]
    UnknownCategory(String),

    #[error("Amount cannot be negative. Please enter a valid amount.")]
    NegativeAmount,

    #[error("Invalid amount '{0}'. Please enter a number.")]
    NotANumber(String),

    #[error("Budget amount cannot be empty. Please enter a number.")]
    EmptyBudget,

    #[error("Budget must be a positive amount. Please enter a valid number.")]
    NonPositiveBudget,
}

/// File-level failure while saving or loading expenses.
#[derive(Debug, Error)]
pub enum PersistenceError {
    #[error("failed to access '{}': {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("'{}' is empty or corrupted (no header row found)", .path.display())]
    MissingHeader { path: PathBuf },

    #[error("failed to process '{}': {source}", .path.display())]
    Csv {
        path: PathBuf,
        #[source]
        source: csv::Error,
    },
}
