//! Error types for wordvec-model

use thiserror::Error;

/// Errors raised while locating or loading an embedding model
#[derive(Debug, Error)]
pub enum ModelError {
    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON error (tokenizer.json)
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// safetensors parsing error
    #[error("SafeTensors error: {0}")]
    SafeTensors(String),

    /// Malformed model file
    #[error("Format error at line {line}: {message}")]
    Format { line: usize, message: String },

    /// Model loading error
    #[error("Model error: {0}")]
    Model(String),

    /// Invalid path
    #[error("Invalid path: {0}")]
    InvalidPath(String),

    /// The model held no usable vectors
    #[error("Model contains no vectors")]
    EmptyVocabulary,
}

impl ModelError {
    /// Create a model error
    pub fn model(msg: impl Into<String>) -> Self {
        Self::Model(msg.into())
    }

    /// Create a format error for the given 1-based line or entry
    pub fn format(line: usize, msg: impl Into<String>) -> Self {
        Self::Format {
            line,
            message: msg.into(),
        }
    }

    /// Create an invalid path error
    pub fn invalid_path(path: impl Into<String>) -> Self {
        Self::InvalidPath(path.into())
    }
}

impl From<safetensors::SafeTensorError> for ModelError {
    fn from(err: safetensors::SafeTensorError) -> Self {
        Self::SafeTensors(err.to_string())
    }
}

/// Errors returned by the query operations of a loaded model.
///
/// These are recoverable: the caller reports them and carries on.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum QueryError {
    /// One or more terms are absent from the vocabulary
    #[error("Not in vocabulary: {}", .terms.join(", "))]
    TermNotFound { terms: Vec<String> },

    /// Too few terms supplied for the operation
    #[error("Need at least {required} terms, got {given}")]
    InsufficientInput { required: usize, given: usize },
}

impl QueryError {
    /// Create a not-found error for a single term
    pub fn not_found(term: impl Into<String>) -> Self {
        Self::TermNotFound {
            terms: vec![term.into()],
        }
    }
}

/// Result type for model loading
pub type Result<T> = std::result::Result<T, ModelError>;

/// Result type for model queries
pub type QueryResult<T> = std::result::Result<T, QueryError>;
