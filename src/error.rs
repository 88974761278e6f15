//! Error types for keyset-pager
//!
//! This module defines the error hierarchy for the whole crate.
//! All public APIs return `Result<T, Error>` where Error is defined here.

use thiserror::Error;

/// Message returned to callers when the record store fails.
///
/// Storage detail is logged, never handed back over the wire.
pub const GENERIC_SERVICE_ERROR: &str = "An error occurred while processing your request.";

/// The main error type for keyset-pager
#[derive(Error, Debug)]
pub enum Error {
    // ============================================================================
    // Request Errors
    // ============================================================================
    #[error("Invalid request: {message}")]
    InvalidRequest { message: String },

    // ============================================================================
    // Storage Errors
    // ============================================================================
    #[error("Storage failure: {message}")]
    Storage { message: String },

    // ============================================================================
    // Configuration Errors
    // ============================================================================
    #[error("Configuration error: {message}")]
    Config { message: String },

    #[error("Failed to parse YAML: {0}")]
    YamlParse(#[from] serde_yaml::Error),

    #[error("Failed to parse JSON: {0}")]
    JsonParse(#[from] serde_json::Error),

    // ============================================================================
    // I/O Errors
    // ============================================================================
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("File not found: {path}")]
    FileNotFound { path: String },

    // ============================================================================
    // Generic Errors
    // ============================================================================
    #[error("{0}")]
    Other(String),
}

impl Error {
    /// Create an invalid request error
    pub fn invalid_request(message: impl Into<String>) -> Self {
        Self::InvalidRequest {
            message: message.into(),
        }
    }

    /// Create a storage error
    pub fn storage(message: impl Into<String>) -> Self {
        Self::Storage {
            message: message.into(),
        }
    }

    /// Create a config error
    pub fn config(message: impl Into<String>) -> Self {
        Self::Config {
            message: message.into(),
        }
    }

    /// True when the caller sent something we refuse to serve
    pub fn is_client_error(&self) -> bool {
        matches!(self, Error::InvalidRequest { .. })
    }

    /// Message safe to return to a remote caller
    pub fn public_message(&self) -> String {
        match self {
            Error::InvalidRequest { message } => message.clone(),
            _ => GENERIC_SERVICE_ERROR.to_string(),
        }
    }
}

impl From<duckdb::Error> for Error {
    fn from(e: duckdb::Error) -> Self {
        Error::storage(e.to_string())
    }
}

/// Result type alias for keyset-pager
pub type Result<T> = std::result::Result<T, Error>;

/// Extension trait for adding context to errors
pub trait ResultExt<T> {
    /// Add context to an error
    fn context(self, message: impl Into<String>) -> Result<T>;

    /// Add context with a closure (lazy evaluation)
    fn with_context<F: FnOnce() -> String>(self, f: F) -> Result<T>;
}

impl<T, E: Into<Error>> ResultExt<T> for std::result::Result<T, E> {
    fn context(self, message: impl Into<String>) -> Result<T> {
        self.map_err(|e| {
            let inner = e.into();
            Error::Other(format!("{}: {}", message.into(), inner))
        })
    }

    fn with_context<F: FnOnce() -> String>(self, f: F) -> Result<T> {
        self.map_err(|e| {
            let inner = e.into();
            Error::Other(format!("{}: {}", f(), inner))
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = Error::invalid_request("page must be >= 1");
        assert_eq!(err.to_string(), "Invalid request: page must be >= 1");

        let err = Error::storage("connection refused");
        assert_eq!(err.to_string(), "Storage failure: connection refused");

        let err = Error::config("bad port");
        assert_eq!(err.to_string(), "Configuration error: bad port");
    }

    #[test]
    fn test_is_client_error() {
        assert!(Error::invalid_request("x").is_client_error());
        assert!(!Error::storage("x").is_client_error());
        assert!(!Error::config("x").is_client_error());
    }

    #[test]
    fn test_public_message_hides_storage_detail() {
        let err = Error::storage("table users does not exist");
        assert_eq!(err.public_message(), GENERIC_SERVICE_ERROR);

        let err = Error::invalid_request("cursor must be non-negative");
        assert_eq!(err.public_message(), "cursor must be non-negative");
    }

    #[test]
    fn test_result_context() {
        let result: Result<()> = Err(Error::config("inner"));
        let with_context = result.context("outer");
        assert!(with_context
            .unwrap_err()
            .to_string()
            .contains("outer: Configuration error: inner"));
    }
}
