//! Error types for the creativity scorer.
//!
//! Only configuration and I/O problems surface here. Lookup failures are
//! absorbed inside `lookup` and degrade to "unknown".

use thiserror::Error;

#[derive(Error, Debug)]
pub enum CreativityError {
    /// A weight entry names a dimension that does not exist
    #[error("Unknown creativity score: {0}")]
    UnknownScore(String),

    /// A weight is not a number in [0, 1]
    #[error("Invalid weight for {score}: {value}")]
    InvalidWeight { score: String, value: String },

    #[error("Unsupported language: {0}")]
    UnsupportedLanguage(String),

    /// Any other malformed configuration
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Lookup client error: {0}")]
    LookupClient(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, CreativityError>;

impl CreativityError {
    pub fn config(msg: impl Into<String>) -> Self {
        Self::Config(msg.into())
    }
}
