//! Error types for folio.
//!
//! Network access is the only fallible path in the crate: the cursor field
//! animator treats missing targets as empty collections and never fails.

use std::fmt;

/// Errors that can occur while talking to the publications API.
#[derive(Debug, Clone, PartialEq)]
pub enum FetchError {
    /// The request was rejected before any response arrived.
    Network(String),
    /// The server answered with a non-2xx status.
    ///
    /// `message` is taken from the JSON body's `message` field when present,
    /// otherwise from the HTTP status line.
    HttpStatus { status: u16, message: String },
    /// A successful response whose body is not a JSON object.
    MalformedBody(String),
}

impl FetchError {
    /// The user-facing text of this error.
    ///
    /// For HTTP failures this is exactly the server-provided message, with no
    /// decoration, so the error view can show it verbatim.
    pub fn message(&self) -> &str {
        match self {
            FetchError::Network(msg) => msg,
            FetchError::HttpStatus { message, .. } => message,
            FetchError::MalformedBody(msg) => msg,
        }
    }

    /// HTTP status code, if the failure came from a response.
    pub fn status(&self) -> Option<u16> {
        match self {
            FetchError::HttpStatus { status, .. } => Some(*status),
            _ => None,
        }
    }
}

impl fmt::Display for FetchError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FetchError::Network(msg) => write!(f, "Network request failed: {}", msg),
            FetchError::HttpStatus { status, message } => {
                write!(f, "Server responded with {}: {}", status, message)
            }
            FetchError::MalformedBody(msg) => write!(f, "Unexpected response body: {}", msg),
        }
    }
}

impl std::error::Error for FetchError {}

/// Errors that can occur while reading a configuration document.
#[derive(Debug)]
pub enum ConfigError {
    /// The document is not valid JSON for [`FolioConfig`](crate::config::FolioConfig).
    Parse(serde_json::Error),
    /// A value is out of its usable range.
    Invalid(String),
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::Parse(e) => write!(f, "Failed to parse configuration: {}", e),
            ConfigError::Invalid(msg) => write!(f, "Invalid configuration: {}", msg),
        }
    }
}

impl std::error::Error for ConfigError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            ConfigError::Parse(e) => Some(e),
            ConfigError::Invalid(_) => None,
        }
    }
}

impl From<serde_json::Error> for ConfigError {
    fn from(e: serde_json::Error) -> Self {
        ConfigError::Parse(e)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_http_message_is_verbatim() {
        let err = FetchError::HttpStatus {
            status: 500,
            message: "rate limited".to_string(),
        };
        assert_eq!(err.message(), "rate limited");
        assert_eq!(err.status(), Some(500));
        assert_eq!(err.to_string(), "Server responded with 500: rate limited");
    }

    #[test]
    fn test_config_error_source() {
        let parse = serde_json::from_str::<serde_json::Value>("{").unwrap_err();
        let err = ConfigError::from(parse);
        assert!(std::error::Error::source(&err).is_some());
        assert!(std::error::Error::source(&ConfigError::Invalid("x".into())).is_none());
    }
}
