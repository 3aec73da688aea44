//! Error types for the relay core.

use thiserror::Error;

/// Top-level error for the relay (config, bot transport, IO).
///
/// Backend failures are classified separately as [`crate::backend::GenerateError`]
/// because the turn processor handles them rather than propagating them.
#[derive(Error, Debug)]
pub enum RelayError {
    #[error("Config error: {0}")]
    Config(String),

    #[error("Bot error: {0}")]
    Bot(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Result type for core operations; uses [`RelayError`].
pub type Result<T> = std::result::Result<T, RelayError>;
