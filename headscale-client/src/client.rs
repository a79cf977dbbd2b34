use std::sync::Arc;

use secrecy::{ExposeSecret, SecretString};
use url::Url;

use crate::api_keys::ApiKeyResource;
use crate::error::ClientError;
use crate::nodes::NodeResource;
use crate::policy::PolicyResource;
use crate::preauth_keys::PreAuthKeyResource;
use crate::request::{RequestClient, DEFAULT_TIMEOUT, DEFAULT_USER_AGENT};
use crate::routes::RouteResource;
use crate::users::UserResource;
use crate::version::ApiVersion;

/// Optional knobs for [`HeadscaleClient::new`].
///
/// Anything left unset falls back to a default: the crate user agent, a
/// transport with a 60-second timeout, the v1 API.
#[derive(Debug, Default, Clone)]
pub struct ClientOptions {
    /// `User-Agent` header sent on every request.
    pub user_agent: Option<String>,
    /// Pre-built transport. Supply one to tune timeouts, proxies or TLS;
    /// it is used as-is.
    pub http_client: Option<reqwest::Client>,
    /// Admin API version to target.
    pub api_version: Option<ApiVersion>,
}

/// Client facade for the Headscale admin REST API.
///
/// Construction validates the configuration once; afterwards the client is
/// immutable and cheap to clone. All resource accessors share one request
/// engine (base URL, bearer key, transport), so every wrapper observes the
/// same configuration for the lifetime of the client. Independent clients
/// with different configurations may coexist.
///
/// ```no_run
/// use headscale_client::{ClientOptions, HeadscaleClient};
///
/// # async fn example() -> Result<(), headscale_client::ClientError> {
/// let client = HeadscaleClient::new(
///     "https://headscale.example.com",
///     "hskey-api-...".into(),
///     ClientOptions::default(),
/// )?;
///
/// for node in client.nodes().list(Default::default()).await?.nodes {
///     println!("{} online={}", node.name, node.online);
/// }
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Clone)]
pub struct HeadscaleClient {
    requester: Arc<RequestClient>,
}

impl HeadscaleClient {
    /// Build a client for the server at `base_url`, authenticating every
    /// request with `api_key` as a bearer token.
    ///
    /// # Errors
    ///
    /// [`ClientError::InvalidBaseUrl`] / [`ClientError::InvalidTarget`] when
    /// the base URL does not parse or cannot address an HTTP API;
    /// [`ClientError::ApiKeyRequired`] when the key is empty;
    /// [`ClientError::Transport`] when the default transport cannot be
    /// built. No partial client is ever returned.
    pub fn new(
        base_url: &str,
        api_key: SecretString,
        options: ClientOptions,
    ) -> Result<Self, ClientError> {
        let base_url = Url::parse(base_url)?;
        if base_url.cannot_be_a_base() || !matches!(base_url.scheme(), "http" | "https") {
            return Err(ClientError::InvalidTarget(base_url.to_string()));
        }

        if api_key.expose_secret().is_empty() {
            return Err(ClientError::ApiKeyRequired);
        }

        let http = match options.http_client {
            Some(http) => http,
            None => reqwest::Client::builder().timeout(DEFAULT_TIMEOUT).build()?,
        };
        let user_agent = options.user_agent.as_deref().unwrap_or(DEFAULT_USER_AGENT);
        let api_version = options.api_version.unwrap_or_default();

        let requester = RequestClient::new(base_url, &api_key, api_version, user_agent, http)?;
        Ok(Self {
            requester: Arc::new(requester),
        })
    }

    /// Users API.
    pub fn users(&self) -> UserResource {
        UserResource::new(Arc::clone(&self.requester))
    }

    /// Nodes API.
    pub fn nodes(&self) -> NodeResource {
        NodeResource::new(Arc::clone(&self.requester))
    }

    /// Routes API.
    pub fn routes(&self) -> RouteResource {
        RouteResource::new(Arc::clone(&self.requester))
    }

    /// ACL policy API.
    pub fn policy(&self) -> PolicyResource {
        PolicyResource::new(Arc::clone(&self.requester))
    }

    /// Pre-auth keys API.
    pub fn preauth_keys(&self) -> PreAuthKeyResource {
        PreAuthKeyResource::new(Arc::clone(&self.requester))
    }

    /// API keys API.
    pub fn api_keys(&self) -> ApiKeyResource {
        ApiKeyResource::new(Arc::clone(&self.requester))
    }
}
