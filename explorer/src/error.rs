//! Error types for the explorer session.

use thiserror::Error;
use wordvec_model::ModelError;

/// Errors that end an explorer session.
///
/// Query failures (unknown terms, too few terms) are not listed here: the
/// session reports those and keeps going.
#[derive(Debug, Error)]
pub enum ExplorerError {
    #[error("Console error: {0}")]
    Io(#[from] std::io::Error),

    #[error(transparent)]
    Model(#[from] ModelError),
}

/// Result type alias for session operations.
pub type ExplorerResult<T> = Result<T, ExplorerError>;
