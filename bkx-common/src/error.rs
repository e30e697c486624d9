//! Common error types for Book Explorer

use thiserror::Error;

/// Common result type for Book Explorer operations
pub type Result<T> = std::result::Result<T, Error>;

/// Common error types shared by the Book Explorer crates
#[derive(Error, Debug)]
pub enum Error {
    /// I/O operation error (wraps std::io::Error)
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Malformed TOML configuration file
    #[error("TOML parse error: {0}")]
    TomlParse(#[from] toml::de::Error),

    /// Configuration loading or validation error
    #[error("Configuration error: {0}")]
    Config(String),
}
