//! HTTP client error types.

use thiserror::Error;

/// Errors that can occur when talking to the backend.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum FetchError {
    /// The request never got a response (connection refused, DNS, TLS).
    #[error("Request failed: {0}")]
    Request(String),

    /// Invalid URL.
    #[error("Invalid URL: {0}")]
    InvalidUrl(String),

    /// Non-2xx response.
    #[error("HTTP {status}: {message}")]
    Http { status: u16, message: String },

    /// Failed to parse response body.
    #[error("Failed to parse response: {0}")]
    Parse(String),

    /// Failed to encode a request body.
    #[error("JSON error: {0}")]
    Json(String),
}

impl FetchError {
    /// HTTP status, if the backend answered.
    pub fn status(&self) -> Option<u16> {
        match self {
            FetchError::Http { status, .. } => Some(*status),
            _ => None,
        }
    }

    /// The backend rejected the request (4xx). Everything else is a
    /// network or server failure.
    pub fn is_validation(&self) -> bool {
        self.status().is_some_and(|s| (400..500).contains(&s))
    }

    pub fn is_not_found(&self) -> bool {
        self.status() == Some(404)
    }
}

impl From<serde_json::Error> for FetchError {
    fn from(e: serde_json::Error) -> Self {
        FetchError::Json(e.to_string())
    }
}

impl From<reqwest::Error> for FetchError {
    fn from(e: reqwest::Error) -> Self {
        FetchError::Request(e.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validation_is_4xx_only() {
        let bad = FetchError::Http {
            status: 422,
            message: "quantity".into(),
        };
        let down = FetchError::Http {
            status: 503,
            message: String::new(),
        };
        assert!(bad.is_validation());
        assert!(!down.is_validation());
        assert!(!FetchError::Request("refused".into()).is_validation());
    }

    #[test]
    fn test_display() {
        let err = FetchError::Http {
            status: 404,
            message: "Not Found".into(),
        };
        assert!(err.is_not_found());
        assert_eq!(err.to_string(), "HTTP 404: Not Found");
    }
}
