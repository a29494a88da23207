//! Backend replies.

use crate::FetchError;
use serde::de::DeserializeOwned;
use serde::Deserialize;

/// Status and body of a backend reply, fully read.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Response {
    pub status: u16,
    pub body: Vec<u8>,
}

/// Error body the backend sends with most 4xx/5xx replies.
#[derive(Deserialize)]
struct ErrorBody {
    message: String,
}

impl Response {
    pub fn new(status: u16, body: impl Into<Vec<u8>>) -> Self {
        Self {
            status,
            body: body.into(),
        }
    }

    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }

    /// Body as text; some endpoints (the payment URL) answer with plain text.
    pub fn text(&self) -> Result<String, FetchError> {
        String::from_utf8(self.body.clone())
            .map_err(|e| FetchError::Parse(format!("Invalid UTF-8: {}", e)))
    }

    pub fn json<T: DeserializeOwned>(&self) -> Result<T, FetchError> {
        serde_json::from_slice(&self.body).map_err(|e| FetchError::Parse(e.to_string()))
    }

    /// Message to show for a failed reply: the `message` field of a JSON
    /// error body, else the raw text, else a generic line with the status.
    fn error_message(&self) -> String {
        if let Ok(ErrorBody { message }) = serde_json::from_slice(&self.body) {
            return message;
        }
        match String::from_utf8_lossy(&self.body).trim() {
            "" => format!("Request failed with status {}", self.status),
            text => text.to_string(),
        }
    }

    /// Turn a non-2xx reply into [`FetchError::Http`].
    pub fn error_for_status(self) -> Result<Self, FetchError> {
        if self.is_success() {
            return Ok(self);
        }
        Err(FetchError::Http {
            status: self.status,
            message: self.error_message(),
        })
    }
}
