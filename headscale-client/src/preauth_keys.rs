//! Pre-auth keys API: non-interactive node enrollment keys.

use std::sync::Arc;

use chrono::{DateTime, Utc};
use http::Method;
use serde::{Deserialize, Serialize};

use crate::error::ClientError;
use crate::request::{RequestClient, RequestOptions};
use crate::users::User;

/// A pre-authentication key, used to enroll nodes without interactive login.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct PreAuthKey {
    pub user: User,
    pub id: String,
    pub key: String,
    pub reusable: bool,
    pub ephemeral: bool,
    pub used: bool,
    pub expiration: Option<DateTime<Utc>>,
    pub created_at: Option<DateTime<Utc>>,
    pub acl_tags: Vec<String>,
}

/// Response envelope for the pre-auth key list endpoint.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct PreAuthKeysResponse {
    pub pre_auth_keys: Vec<PreAuthKey>,
}

/// Response envelope for pre-auth key creation.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct PreAuthKeyResponse {
    pub pre_auth_key: PreAuthKey,
}

/// Fields accepted when creating a pre-auth key.
#[derive(Debug, Clone, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CreatePreAuthKeyRequest {
    pub user: String,
    pub reusable: bool,
    pub ephemeral: bool,
    pub expiration: Option<DateTime<Utc>>,
    pub acl_tags: Vec<String>,
}

#[derive(Debug, Serialize)]
struct ExpirePreAuthKeyRequest<'a> {
    user: &'a str,
    key: &'a str,
}

/// Typed access to the `/preauthkey` endpoints.
#[derive(Debug, Clone)]
pub struct PreAuthKeyResource {
    requester: Arc<RequestClient>,
}

impl PreAuthKeyResource {
    pub(crate) fn new(requester: Arc<RequestClient>) -> Self {
        Self { requester }
    }

    /// List the pre-auth keys belonging to the user with numeric id `user`.
    ///
    /// The server requires the user filter, so it is a plain parameter
    /// rather than an optional one.
    ///
    /// # Errors
    ///
    /// Any [`ClientError`] from the underlying call.
    pub async fn list(&self, user: u64) -> Result<PreAuthKeysResponse, ClientError> {
        let url = self.requester.build_url(&["preauthkey".into()]);
        let options = RequestOptions::new().query("user", user);
        let request = self.requester.build_request(Method::GET, url, options)?;
        self.requester.execute(request).await
    }

    /// Create a pre-auth key.
    ///
    /// # Errors
    ///
    /// Any [`ClientError`] from the underlying call.
    pub async fn create(
        &self,
        key: CreatePreAuthKeyRequest,
    ) -> Result<PreAuthKeyResponse, ClientError> {
        let url = self.requester.build_url(&["preauthkey".into()]);
        let options = RequestOptions::new().json(&key)?;
        let request = self.requester.build_request(Method::POST, url, options)?;
        self.requester.execute(request).await
    }

    /// Expire the pre-auth key `key` belonging to `user`. The server
    /// returns no body.
    ///
    /// # Errors
    ///
    /// Any [`ClientError`] from the underlying call.
    pub async fn expire(&self, user: &str, key: &str) -> Result<(), ClientError> {
        let url = self
            .requester
            .build_url(&["preauthkey".into(), "expire".into()]);
        let options = RequestOptions::new().json(&ExpirePreAuthKeyRequest { user, key })?;
        let request = self.requester.build_request(Method::POST, url, options)?;
        self.requester.execute_empty(request).await
    }
}
