//! Finstat Error Types
//!
//! Error handling for the Finstat API client. HTTP failures keep the status,
//! the request URL and the text of the HTML error page the service returned.

use thiserror::Error;

/// Main error type for Finstat operations
#[derive(Debug, Error)]
pub enum FinstatError {
    /// HTTP 404: unknown URL or the requested parameter is not in the database
    #[error("{}", not_found_message(.url, .parameter.as_deref()))]
    NotFound {
        url: String,
        parameter: Option<String>,
        body: String,
    },

    /// HTTP 402: daily or monthly quota used up
    #[error("Limit reached!")]
    QuotaExceeded { url: String, body: String },

    /// HTTP 403: key not allowed to call this endpoint
    #[error("Access Forbidden!")]
    Forbidden { url: String, body: String },

    /// Any other non-success status
    #[error("Unknown exception while communication with Finstat api! (HTTP {status})")]
    Api {
        status: u16,
        url: String,
        body: String,
    },

    /// Response body could not be parsed
    #[error("Error while parsing XML data: {0}")]
    Parse(String),

    /// Rate limits queried before any request completed
    #[error("Limits are available after API call")]
    LimitsUnavailable,

    /// Connection, timeout or protocol failure from the HTTP layer
    #[error(transparent)]
    Transport(#[from] reqwest::Error),

    /// Writing a downloaded file failed
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Configuration errors (missing keys, invalid config file, etc.)
    #[error("Configuration error: {0}")]
    Config(String),
}

fn not_found_message(url: &str, parameter: Option<&str>) -> String {
    match parameter {
        Some(p) if !p.is_empty() => format!(
            "Invalid URL: '{}' or specified parameter: '{}' not found in database!",
            url, p
        ),
        _ => format!("Invalid URL: '{}'!", url),
    }
}

impl FinstatError {
    /// HTTP status code behind this error, if it came from a response
    pub fn status(&self) -> Option<u16> {
        match self {
            FinstatError::NotFound { .. } => Some(404),
            FinstatError::QuotaExceeded { .. } => Some(402),
            FinstatError::Forbidden { .. } => Some(403),
            FinstatError::Api { status, .. } => Some(*status),
            FinstatError::Transport(e) => e.status().map(|s| s.as_u16()),
            _ => None,
        }
    }

    /// Text content of the error page returned by the service
    pub fn body(&self) -> Option<&str> {
        match self {
            FinstatError::NotFound { body, .. }
            | FinstatError::QuotaExceeded { body, .. }
            | FinstatError::Forbidden { body, .. }
            | FinstatError::Api { body, .. } => Some(body),
            _ => None,
        }
    }
}

impl From<quick_xml::DeError> for FinstatError {
    fn from(err: quick_xml::DeError) -> Self {
        FinstatError::Parse(err.to_string())
    }
}

/// Result type alias for Finstat operations
pub type Result<T> = std::result::Result<T, FinstatError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_not_found_message_with_parameter() {
        let err = FinstatError::NotFound {
            url: "https://www.finstat.sk/api".to_string(),
            parameter: Some("35757442".to_string()),
            body: String::new(),
        };
        assert_eq!(
            err.to_string(),
            "Invalid URL: 'https://www.finstat.sk/api' or specified parameter: '35757442' not found in database!"
        );
        assert_eq!(err.status(), Some(404));
    }

    #[test]
    fn test_not_found_message_without_parameter() {
        let err = FinstatError::NotFound {
            url: "https://www.finstat.sk/api/GetListOfDiffs".to_string(),
            parameter: None,
            body: String::new(),
        };
        assert_eq!(
            err.to_string(),
            "Invalid URL: 'https://www.finstat.sk/api/GetListOfDiffs'!"
        );
    }

    #[test]
    fn test_status_and_body() {
        let err = FinstatError::Api {
            status: 500,
            url: "u".to_string(),
            body: "Server Error".to_string(),
        };
        assert_eq!(err.status(), Some(500));
        assert_eq!(err.body(), Some("Server Error"));
        assert_eq!(
            err.to_string(),
            "Unknown exception while communication with Finstat api! (HTTP 500)"
        );

        assert_eq!(FinstatError::LimitsUnavailable.status(), None);
        assert_eq!(FinstatError::Parse("x".into()).body(), None);
    }
}
