use bytes::Bytes;
use serde::Serialize;

use crate::error::ClientError;

/// Outbound request body.
///
/// The variants encode the serialization precedence of the wire contract:
/// raw bytes go out verbatim, pre-encoded text goes out as its UTF-8 bytes,
/// and a structured value is rendered to a JSON document when the request is
/// assembled.
pub enum Body {
    /// Raw bytes, used as-is.
    Raw(Bytes),
    /// Pre-encoded text, used as-is.
    Text(String),
    /// Structured value, serialized to JSON at request build time.
    Json(serde_json::Value),
}

impl std::fmt::Debug for Body {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Body::Raw(bytes) => f.debug_tuple("Body::Raw").field(&bytes.len()).finish(),
            Body::Text(text) => f.debug_tuple("Body::Text").field(&text.len()).finish(),
            Body::Json(_) => write!(f, "Body::Json(..)"),
        }
    }
}

impl Body {
    /// Create a body from a JSON-serializable value.
    ///
    /// This is the fallible step of body handling: values that have no JSON
    /// representation (a map with non-string keys, a custom `Serialize` that
    /// errors) are rejected here, before any request is assembled.
    ///
    /// # Errors
    ///
    /// Returns [`ClientError::Serialize`] when the value cannot be
    /// represented as JSON.
    pub fn json<T: Serialize>(value: &T) -> Result<Self, ClientError> {
        let value = serde_json::to_value(value).map_err(ClientError::Serialize)?;
        Ok(Body::Json(value))
    }

    /// Render the body to the bytes that go on the wire.
    pub(crate) fn into_bytes(self) -> Result<Bytes, ClientError> {
        match self {
            Body::Raw(bytes) => Ok(bytes),
            Body::Text(text) => Ok(Bytes::from(text)),
            Body::Json(value) => {
                let encoded = serde_json::to_vec(&value).map_err(ClientError::Serialize)?;
                Ok(Bytes::from(encoded))
            }
        }
    }
}

impl From<Bytes> for Body {
    fn from(bytes: Bytes) -> Self {
        Body::Raw(bytes)
    }
}

impl From<Vec<u8>> for Body {
    fn from(bytes: Vec<u8>) -> Self {
        Body::Raw(Bytes::from(bytes))
    }
}

impl From<String> for Body {
    fn from(text: String) -> Self {
        Body::Text(text)
    }
}

impl From<&str> for Body {
    fn from(text: &str) -> Self {
        Body::Text(text.to_owned())
    }
}

impl From<serde_json::Value> for Body {
    fn from(value: serde_json::Value) -> Self {
        Body::Json(value)
    }
}
