use thiserror::Error;

/// Result type for vocabulary loading
pub type Result<T> = std::result::Result<T, VocabError>;

/// Errors raised while reading or writing a vocabulary collection
#[derive(Error, Debug)]
pub enum VocabError {
    /// IO error occurred
    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    /// Input is not valid JSON
    #[error("JSON error: {0}")]
    JsonError(#[from] serde_json::Error),

    /// Top-level document has the wrong shape
    #[error("Invalid vocabulary document: {0}")]
    InvalidDocument(String),

    /// A record lacks a required field
    #[error("Record #{index}: missing required field '{field}'")]
    MissingField { index: usize, field: &'static str },

    /// A record field is present but unusable
    #[error("Record #{index}: invalid field '{field}': {message}")]
    InvalidField {
        index: usize,
        field: String,
        message: String,
    },

    /// Level string is not one of the six CEFR tiers
    #[error("Record #{index} ('{term}'): unknown CEFR level '{level}'")]
    UnknownLevel {
        index: usize,
        term: String,
        level: String,
    },
}

impl VocabError {
    /// Create an invalid document error
    pub fn invalid_document(msg: impl Into<String>) -> Self {
        Self::InvalidDocument(msg.into())
    }

    /// Create an invalid field error
    pub fn invalid_field(index: usize, field: impl Into<String>, msg: impl Into<String>) -> Self {
        Self::InvalidField {
            index,
            field: field.into(),
            message: msg.into(),
        }
    }
}
