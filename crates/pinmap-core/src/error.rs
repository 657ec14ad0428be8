use core::result::Result as CoreResult;
use std::io::Error as IoError;

use reqwest::Error as ReqwestError;
use serde_json::Error as SerdeJsonError;
use thiserror::Error;
use toml::de::Error as TomlError;

/// Result type for pinmap operations.
pub type Result<T> = CoreResult<T, Error>;

/// Errors that can occur while talking to the pin server or loading local state.
#[derive(Debug, Error)]
pub enum Error {
    /// An I/O operation failed.
    #[error("IO error: {0}")]
    Io(#[from] IoError),

    /// An HTTP request failed before a response was received.
    #[error("HTTP request failed: {0}")]
    Request(#[from] ReqwestError),

    /// JSON serialization or deserialization failed.
    #[error("JSON serialization error: {0}")]
    Json(#[from] SerdeJsonError),

    /// TOML deserialization failed.
    #[error("TOML deserialization error: {0}")]
    Toml(#[from] TomlError),

    /// Configuration is invalid or missing.
    #[error("Configuration error: {0}")]
    Config(String),

    /// The server answered with a non-success status.
    #[error("Server rejected request with status {status}")]
    Rejected {
        /// HTTP status code returned by the server
        status: u16,
    },

    /// The selected attachment is not a usable image.
    #[error("Invalid image: {0}")]
    InvalidImage(String),

    /// A general error not covered by other variants.
    #[error("{0}")]
    Other(String),
}

impl Error {
    /// Whether the failure happened on the network rather than in the server's answer.
    pub fn is_network(&self) -> bool {
        matches!(self, Self::Request(_))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::{Value as JsonValue, from_str};
    use std::io;

    #[test]
    fn test_error_display() {
        let error1 = Error::Config("invalid config".to_owned());
        assert_eq!(error1.to_string(), "Configuration error: invalid config");

        let error2 = Error::Rejected { status: 400 };
        assert_eq!(
            error2.to_string(),
            "Server rejected request with status 400"
        );

        let error3 = Error::InvalidImage("notes.txt".to_owned());
        assert_eq!(error3.to_string(), "Invalid image: notes.txt");
    }

    #[test]
    fn test_rejected_is_not_network() {
        assert!(!Error::Rejected { status: 500 }.is_network());
        assert!(!Error::Other("boom".to_owned()).is_network());
    }

    #[test]
    fn test_error_from_io() {
        let io_error = io::Error::new(io::ErrorKind::NotFound, "file not found");
        let error: Error = io_error.into();
        assert!(matches!(error, Error::Io(_)));
    }

    #[test]
    fn test_error_from_json() {
        let json_error = from_str::<JsonValue>("invalid json").unwrap_err();
        let error: Error = json_error.into();
        assert!(matches!(error, Error::Json(_)));
    }
}
