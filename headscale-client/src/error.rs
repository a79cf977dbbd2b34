use bytes::Bytes;
use http::StatusCode;
use thiserror::Error;

/// Errors surfaced by the client.
///
/// Every failure is returned to the immediate caller; nothing is retried or
/// swallowed internally. The variants fall into five groups: configuration
/// (client construction), build (before any I/O), transport, protocol
/// (non-2xx status) and decode.
#[derive(Debug, Error)]
pub enum ClientError {
    /// The base URL did not parse at client construction.
    #[error("invalid base URL: {0}")]
    InvalidBaseUrl(#[from] url::ParseError),

    /// The API key was empty at client construction.
    #[error("API key is required")]
    ApiKeyRequired,

    /// A target URL unusable for an API call was handed to the request
    /// builder (non-http(s) scheme or a URL that cannot carry a path).
    #[error("invalid target URL: {0}")]
    InvalidTarget(String),

    /// A header name or value was not valid HTTP.
    #[error("invalid header: {0}")]
    InvalidHeader(String),

    /// The request body could not be serialized to JSON.
    #[error("failed to serialize request body: {0}")]
    Serialize(#[source] serde_json::Error),

    /// Connection, DNS, timeout or any other transport-level failure.
    #[error("transport error: {0}")]
    Transport(#[from] reqwest::Error),

    /// The server answered with a status outside [200, 300).
    ///
    /// The drained response body rides along for diagnostics but stays out
    /// of the display; callers match on the status.
    #[error("unexpected status code: {}", status.as_u16())]
    UnexpectedStatus { status: StatusCode, body: Bytes },

    /// A 2xx response body was not the JSON document the caller expected.
    #[error("failed to decode response body: {0}")]
    Decode(#[source] serde_json::Error),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unexpected_status_display_names_the_numeric_code() {
        let err = ClientError::UnexpectedStatus {
            status: StatusCode::INTERNAL_SERVER_ERROR,
            body: Bytes::from_static(b"boom"),
        };
        assert_eq!(err.to_string(), "unexpected status code: 500");
    }

    #[test]
    fn api_key_required_display() {
        assert_eq!(ClientError::ApiKeyRequired.to_string(), "API key is required");
    }
}
