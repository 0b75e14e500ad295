//! Error types for sb-core
//!
//! Provides a unified error type that can be converted to an HTTP status code.

use thiserror::Error;

/// Result type alias for sb-core operations
pub type Result<T> = std::result::Result<T, Error>;

/// Error types for sb-core operations
#[derive(Error, Debug)]
pub enum Error {
    /// A required request parameter was absent or empty
    #[error("{0} parameter is required")]
    MissingParameter(&'static str),

    /// Configuration file error
    #[error("Configuration error: {0}")]
    Config(String),

    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// TOML parsing error
    #[error("TOML parse error: {0}")]
    TomlParse(#[from] toml::de::Error),

    /// URL parsing error
    #[error("Invalid URL: {0}")]
    InvalidUrl(#[from] url::ParseError),

    /// Authentication error
    #[error("Authentication failed: {0}")]
    Auth(String),

    /// Resource not found
    #[error("Not found: {0}")]
    NotFound(String),

    /// Network or store error
    #[error("{0}")]
    Network(String),

    /// General error
    #[error("{0}")]
    General(String),
}

impl Error {
    /// Get the HTTP status code reported to the browser for this error
    ///
    /// Store failures are deliberately indistinguishable to the caller.
    pub const fn status_code(&self) -> u16 {
        match self {
            Error::MissingParameter(_) => 400,
            _ => 500,
        }
    }

    /// Whether this error originated from the object store
    pub const fn is_store_error(&self) -> bool {
        matches!(
            self,
            Error::Auth(_) | Error::NotFound(_) | Error::Network(_) | Error::General(_)
        )
    }
}
