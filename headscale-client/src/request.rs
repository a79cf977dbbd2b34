use std::time::Duration;

use http::header::{self, HeaderMap, HeaderName, HeaderValue};
use http::Method;
use secrecy::{ExposeSecret, SecretString};
use serde::de::DeserializeOwned;
use serde::Serialize;
use tracing::{debug, error};
use url::Url;

use crate::body::Body;
use crate::error::ClientError;
use crate::version::ApiVersion;

/// User agent sent when the caller does not configure one.
pub const DEFAULT_USER_AGENT: &str = "headscale-client-rs";

/// Transport timeout applied when the caller does not supply an HTTP client.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(60);

/// One element of an API path.
///
/// A closed value type instead of free-form strings keeps URL building total:
/// every segment has a canonical string form and is percent-escaped
/// independently, so a segment containing `/` can never introduce an extra
/// path level.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PathSegment {
    Str(String),
    Int(u64),
}

impl std::fmt::Display for PathSegment {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            PathSegment::Str(s) => f.write_str(s),
            PathSegment::Int(n) => write!(f, "{n}"),
        }
    }
}

impl From<&str> for PathSegment {
    fn from(s: &str) -> Self {
        PathSegment::Str(s.to_owned())
    }
}

impl From<String> for PathSegment {
    fn from(s: String) -> Self {
        PathSegment::Str(s)
    }
}

impl From<u64> for PathSegment {
    fn from(n: u64) -> Self {
        PathSegment::Int(n)
    }
}

impl From<u32> for PathSegment {
    fn from(n: u32) -> Self {
        PathSegment::Int(u64::from(n))
    }
}

/// Per-call request options: body, headers, content type and query
/// parameters.
///
/// Header entries are last-write-wins per key and are applied after the
/// generated `User-Agent` / `Authorization` / `Content-Type` headers, so an
/// explicit entry can override any of them. Query parameters keep insertion
/// order and are appended to whatever query string the target URL already
/// carries.
#[derive(Debug, Default)]
pub struct RequestOptions {
    body: Option<Body>,
    headers: HeaderMap,
    content_type: Option<String>,
    query: Vec<(String, String)>,
}

impl RequestOptions {
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the request body.
    pub fn body(mut self, body: impl Into<Body>) -> Self {
        self.body = Some(body.into());
        self
    }

    /// Set the body to the JSON serialization of `value`.
    ///
    /// # Errors
    ///
    /// Returns [`ClientError::Serialize`] when the value has no JSON
    /// representation; the request is never assembled in that case.
    pub fn json<T: Serialize>(mut self, value: &T) -> Result<Self, ClientError> {
        self.body = Some(Body::json(value)?);
        Ok(self)
    }

    /// Set the `Content-Type` header value.
    pub fn content_type(mut self, content_type: impl Into<String>) -> Self {
        self.content_type = Some(content_type.into());
        self
    }

    /// Add an explicit header. Later writes to the same key win.
    ///
    /// # Errors
    ///
    /// Returns [`ClientError::InvalidHeader`] when the name or value is not
    /// valid HTTP.
    pub fn header<K, V>(mut self, name: K, value: V) -> Result<Self, ClientError>
    where
        K: TryInto<HeaderName>,
        V: TryInto<HeaderValue>,
        K::Error: std::fmt::Display,
        V::Error: std::fmt::Display,
    {
        let name = name
            .try_into()
            .map_err(|e| ClientError::InvalidHeader(format!("invalid header name: {e}")))?;
        let value = value
            .try_into()
            .map_err(|e| ClientError::InvalidHeader(format!("invalid header value: {e}")))?;
        self.headers.insert(name, value);
        Ok(self)
    }

    /// Append a query parameter, rendered with its default string form.
    /// Parameters already present on the target URL survive.
    pub fn query(mut self, key: impl Into<String>, value: impl ToString) -> Self {
        self.query.push((key.into(), value.to_string()));
        self
    }
}

/// Builds and executes authenticated requests against one server.
///
/// This is the whole capability surface the resource wrappers use:
/// [`build_url`](Self::build_url), [`build_request`](Self::build_request) and
/// the two dispatch methods. It holds no mutable state after construction
/// and is shared behind an `Arc` by every wrapper, so concurrent calls need
/// no locking; each request/response pair is owned by the call that made it.
#[derive(Debug)]
pub struct RequestClient {
    base_url: Url,
    api_version: ApiVersion,
    user_agent: HeaderValue,
    auth_header: HeaderValue,
    http: reqwest::Client,
}

impl RequestClient {
    /// Build the engine. The base URL must already be validated as an
    /// http(s) URL that can carry a path.
    pub(crate) fn new(
        base_url: Url,
        api_key: &SecretString,
        api_version: ApiVersion,
        user_agent: &str,
        http: reqwest::Client,
    ) -> Result<Self, ClientError> {
        let user_agent = HeaderValue::from_str(user_agent)
            .map_err(|e| ClientError::InvalidHeader(format!("invalid user agent: {e}")))?;
        let mut auth_header =
            HeaderValue::from_str(&format!("Bearer {}", api_key.expose_secret()))
                .map_err(|e| ClientError::InvalidHeader(format!("invalid API key: {e}")))?;
        auth_header.set_sensitive(true);

        Ok(Self {
            base_url,
            api_version,
            user_agent,
            auth_header,
            http,
        })
    }

    /// Compose the base URL, the version prefix and `segments` into one
    /// escaped URL.
    ///
    /// Each segment is percent-escaped on its own; zero segments yield the
    /// base URL plus the version prefix. Pure: no I/O, deterministic for
    /// identical inputs.
    pub fn build_url(&self, segments: &[PathSegment]) -> Url {
        let mut url = self.base_url.clone();
        // Construction guarantees the base URL can carry path segments.
        if let Ok(mut path) = url.path_segments_mut() {
            path.pop_if_empty();
            for part in self.api_version.path_segments() {
                path.push(part);
            }
            for segment in segments {
                path.push(&segment.to_string());
            }
        }
        url
    }

    /// Assemble an outbound request for `method` and `url`.
    ///
    /// Query parameters from `options` are appended to the URL's existing
    /// query string. Headers are applied in fixed order (`User-Agent`,
    /// `Authorization`, content type, then the explicit header map), so the
    /// explicit map wins on key collisions. No I/O happens here.
    ///
    /// # Errors
    ///
    /// [`ClientError::InvalidTarget`] for a URL no API call can target,
    /// [`ClientError::Serialize`] when the body cannot be rendered to JSON,
    /// [`ClientError::InvalidHeader`] for an unusable content type.
    pub fn build_request(
        &self,
        method: Method,
        mut url: Url,
        options: RequestOptions,
    ) -> Result<reqwest::Request, ClientError> {
        if url.cannot_be_a_base() || !matches!(url.scheme(), "http" | "https") {
            return Err(ClientError::InvalidTarget(url.to_string()));
        }

        if !options.query.is_empty() {
            let mut pairs = url.query_pairs_mut();
            for (key, value) in &options.query {
                pairs.append_pair(key, value);
            }
        }

        let mut request = reqwest::Request::new(method, url);
        let headers = request.headers_mut();
        headers.insert(header::USER_AGENT, self.user_agent.clone());
        headers.insert(header::AUTHORIZATION, self.auth_header.clone());
        if let Some(content_type) = &options.content_type {
            let value = HeaderValue::from_str(content_type)
                .map_err(|e| ClientError::InvalidHeader(format!("invalid content type: {e}")))?;
            headers.insert(header::CONTENT_TYPE, value);
        }
        for (name, value) in &options.headers {
            headers.insert(name.clone(), value.clone());
        }

        if let Some(body) = options.body {
            *request.body_mut() = Some(body.into_bytes()?.into());
        }

        Ok(request)
    }

    /// Execute `request` and decode the 2xx response body into `T`.
    ///
    /// # Errors
    ///
    /// Transport failures surface verbatim; a status outside [200, 300)
    /// becomes [`ClientError::UnexpectedStatus`]; a malformed 2xx body
    /// becomes [`ClientError::Decode`].
    pub async fn execute<T: DeserializeOwned>(
        &self,
        request: reqwest::Request,
    ) -> Result<T, ClientError> {
        let response = self.send(request).await?;
        let bytes = response.bytes().await?;
        serde_json::from_slice(&bytes).map_err(ClientError::Decode)
    }

    /// Execute `request` for its side effect only.
    ///
    /// The response body is never read or decoded; dropping the response
    /// releases the connection. For delete/enable/disable style endpoints.
    ///
    /// # Errors
    ///
    /// Same as [`execute`](Self::execute) minus the decode failure.
    pub async fn execute_empty(&self, request: reqwest::Request) -> Result<(), ClientError> {
        let _response = self.send(request).await?;
        Ok(())
    }

    async fn send(&self, request: reqwest::Request) -> Result<reqwest::Response, ClientError> {
        debug!(method = %request.method(), url = %request.url(), "sending request");

        let response = self.http.execute(request).await?;
        let status = response.status();
        if !status.is_success() {
            // Drain the body for diagnostics; it rides on the error value
            // but stays out of the error display.
            let body = response.bytes().await.unwrap_or_default();
            error!(
                status = status.as_u16(),
                body = %String::from_utf8_lossy(&body),
                "unexpected status code"
            );
            return Err(ClientError::UnexpectedStatus { status, body });
        }

        Ok(response)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn request_client(base: &str) -> RequestClient {
        RequestClient::new(
            Url::parse(base).unwrap(),
            &SecretString::from("test-api-key"),
            ApiVersion::V1,
            DEFAULT_USER_AGENT,
            reqwest::Client::new(),
        )
        .unwrap()
    }

    #[test]
    fn build_url_joins_version_prefix_and_segments() {
        let client = request_client("http://example.com/");
        let url = client.build_url(&["foo".into(), "bar baz".into(), 123u64.into()]);
        assert_eq!(url.as_str(), "http://example.com/api/v1/foo/bar%20baz/123");
    }

    #[test]
    fn build_url_with_no_segments_is_base_plus_prefix() {
        let client = request_client("http://example.com/");
        assert_eq!(client.build_url(&[]).as_str(), "http://example.com/api/v1");
    }

    #[test]
    fn build_url_escapes_slashes_inside_a_segment() {
        let client = request_client("http://example.com/");
        let url = client.build_url(&["a/b".into()]);
        assert_eq!(url.path(), "/api/v1/a%2Fb");
    }

    #[test]
    fn build_url_preserves_a_base_path() {
        let client = request_client("http://example.com/prefix");
        let url = client.build_url(&["node".into()]);
        assert_eq!(url.path(), "/prefix/api/v1/node");
    }

    #[test]
    fn build_request_seeds_identification_headers() {
        let client = request_client("http://example.com/");
        let url = client.build_url(&["test".into()]);
        let request = client
            .build_request(Method::GET, url, RequestOptions::new())
            .unwrap();

        assert_eq!(
            request.headers().get(header::USER_AGENT).unwrap(),
            DEFAULT_USER_AGENT
        );
        assert_eq!(
            request.headers().get(header::AUTHORIZATION).unwrap(),
            "Bearer test-api-key"
        );
    }

    #[test]
    fn build_request_applies_content_type_and_explicit_headers() {
        let client = request_client("http://example.com/");
        let url = client.build_url(&["test".into()]);
        let options = RequestOptions::new()
            .content_type("application/json")
            .header("X-Test", "yes")
            .unwrap();
        let request = client.build_request(Method::POST, url, options).unwrap();

        assert_eq!(
            request.headers().get(header::CONTENT_TYPE).unwrap(),
            "application/json"
        );
        assert_eq!(request.headers().get("X-Test").unwrap(), "yes");
    }

    #[test]
    fn explicit_headers_override_generated_ones() {
        let client = request_client("http://example.com/");
        let url = client.build_url(&["test".into()]);
        let options = RequestOptions::new()
            .content_type("application/json")
            .header(header::AUTHORIZATION, "Bearer someone-else")
            .unwrap()
            .header(header::CONTENT_TYPE, "text/plain")
            .unwrap();
        let request = client.build_request(Method::POST, url, options).unwrap();

        assert_eq!(
            request.headers().get(header::AUTHORIZATION).unwrap(),
            "Bearer someone-else"
        );
        assert_eq!(
            request.headers().get(header::CONTENT_TYPE).unwrap(),
            "text/plain"
        );
    }

    #[test]
    fn query_params_append_to_an_existing_query() {
        let client = request_client("http://example.com/");
        let url = Url::parse("http://example.com/api/v1/node?x=1").unwrap();
        let options = RequestOptions::new().query("user", "alice");
        let request = client.build_request(Method::GET, url, options).unwrap();
        assert_eq!(request.url().query(), Some("x=1&user=alice"));
    }

    #[test]
    fn query_params_render_non_string_values() {
        let client = request_client("http://example.com/");
        let url = client.build_url(&["node".into(), "backfillips".into()]);
        let options = RequestOptions::new().query("confirmed", true);
        let request = client.build_request(Method::POST, url, options).unwrap();
        assert_eq!(request.url().query(), Some("confirmed=true"));
    }

    #[test]
    fn json_body_is_encoded_on_the_request() {
        let client = request_client("http://example.com/");
        let url = client.build_url(&["test".into()]);
        let options = RequestOptions::new()
            .json(&std::collections::HashMap::from([("hello", "world")]))
            .unwrap();
        let request = client.build_request(Method::POST, url, options).unwrap();

        let body = request.body().unwrap().as_bytes().unwrap();
        let decoded: std::collections::HashMap<String, String> =
            serde_json::from_slice(body).unwrap();
        assert_eq!(decoded["hello"], "world");
    }

    #[test]
    fn string_body_is_sent_verbatim() {
        let client = request_client("http://example.com/");
        let url = client.build_url(&["test".into()]);
        let options = RequestOptions::new().body("plain text, no JSON");
        let request = client.build_request(Method::POST, url, options).unwrap();
        assert_eq!(
            request.body().unwrap().as_bytes().unwrap(),
            b"plain text, no JSON"
        );
    }

    #[test]
    fn degenerate_target_is_rejected_before_any_io() {
        let client = request_client("http://example.com/");
        let url = Url::parse("mailto:admin@example.com").unwrap();
        let err = client
            .build_request(Method::GET, url, RequestOptions::new())
            .unwrap_err();
        assert!(matches!(err, ClientError::InvalidTarget(_)));
    }

    #[test]
    fn unserializable_body_aborts_request_construction() {
        let unserializable = std::collections::HashMap::from([(vec![1u8], "x")]);
        let err = RequestOptions::new().json(&unserializable).unwrap_err();
        assert!(matches!(err, ClientError::Serialize(_)));
    }

    #[test]
    fn invalid_header_name_is_rejected() {
        let err = RequestOptions::new().header("bad header\n", "v").unwrap_err();
        assert!(matches!(err, ClientError::InvalidHeader(_)));
    }
}
