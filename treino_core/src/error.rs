//! Error types for the treino_core library.

use std::io;

/// Result type alias using our Error type
pub type Result<T> = std::result::Result<T, Error>;

/// Core error type for treino_core operations
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// IO error occurred
    #[error("IO error: {0}")]
    Io(#[from] io::Error),

    /// CSV error
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    /// TOML parsing error
    #[error("TOML error: {0}")]
    Toml(#[from] toml::de::Error),

    /// Malformed persisted data (fatal to load)
    #[error("Malformed log data: {0}")]
    Parse(String),

    /// Configuration validation error
    #[error("Configuration error: {0}")]
    Config(String),

    /// Generic error
    #[error("{0}")]
    Other(String),
}

/// Rejection of a candidate entry.
///
/// Recoverable by design: the caller surfaces the message, the entry is
/// not committed, and the session continues. Field names are the
/// user-facing column names of the form.
#[derive(Clone, Debug, thiserror::Error, PartialEq, Eq)]
pub enum ValidationError {
    /// A mandatory text field is empty or whitespace-only
    #[error("Campo obrigatório vazio: {0}")]
    EmptyRequiredField(&'static str),

    /// A numeric field is outside its accepted range
    #[error("Valor de {field} fora do intervalo {min}..={max}")]
    InvalidRange {
        field: &'static str,
        min: i64,
        max: i64,
    },
}
