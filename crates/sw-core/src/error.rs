//! Framework error type for configuration loading and validation.

use thiserror::Error;

/// The top-level error type for `sw-core`.
#[derive(Debug, Error)]
pub enum CoreError {
    #[error("configuration error: {0}")]
    Config(String),

    #[error("parse error: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Shorthand result type for `sw-core`.
pub type CoreResult<T> = Result<T, CoreError>;
