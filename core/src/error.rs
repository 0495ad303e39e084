//! Error types for dispatching requests.
//!
//! # Design
//! Only failures to build or carry a request are errors. A response with a
//! 4xx or 5xx status is a successful round-trip and comes back as an
//! [`crate::HttpResponse`], so callers never confuse "the server said no"
//! with "the server could not be reached."

use thiserror::Error;

/// Result type alias used throughout the crate.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors returned by [`crate::Session`] and [`crate::HttpResponse`].
#[derive(Debug, Error)]
pub enum Error {
    /// The method, URL, or a header name/value could not form a request.
    #[error("invalid request: {0}")]
    InvalidRequest(#[from] ureq::http::Error),

    /// DNS, connect, TLS or I/O failure while talking to the server.
    #[error("transport failure: {0}")]
    Transport(#[from] ureq::Error),

    /// The response body was not the expected JSON.
    #[error("failed to decode response body: {0}")]
    Decode(#[from] serde_json::Error),
}

impl Error {
    /// True for failures to reach the server or read its response.
    pub fn is_transport(&self) -> bool {
        matches!(self, Error::Transport(_))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn invalid_request_from_http_error() {
        let http_err = ureq::http::Request::builder()
            .uri("not a uri")
            .body(())
            .unwrap_err();
        let err: Error = http_err.into();
        assert!(matches!(err, Error::InvalidRequest(_)));
        assert!(!err.is_transport());
        assert!(err.to_string().starts_with("invalid request: "));
    }

    #[test]
    fn decode_error_display() {
        let json_err = serde_json::from_str::<serde_json::Value>("{").unwrap_err();
        let err: Error = json_err.into();
        assert!(err.to_string().starts_with("failed to decode response body: "));
    }
}
