//! API keys API: the bearer tokens this client itself authenticates with.

use std::sync::Arc;

use chrono::{DateTime, Utc};
use http::Method;
use serde::{Deserialize, Serialize};

use crate::error::ClientError;
use crate::request::{RequestClient, RequestOptions};

/// Metadata for an admin API key. The secret itself is only returned once,
/// by [`ApiKeyResource::create`].
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ApiKey {
    pub id: String,
    pub prefix: String,
    pub expiration: Option<DateTime<Utc>>,
    pub created_at: Option<DateTime<Utc>>,
    pub last_seen: Option<DateTime<Utc>>,
}

/// Response envelope for the API key list endpoint.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ApiKeysResponse {
    pub api_keys: Vec<ApiKey>,
}

/// Response for API key creation: the full secret, shown exactly once.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct CreateApiKeyResponse {
    pub api_key: String,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct CreateApiKeyRequest {
    expiration: Option<DateTime<Utc>>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct ExpireApiKeyRequest<'a> {
    #[serde(skip_serializing_if = "Option::is_none")]
    prefix: Option<&'a str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    id: Option<&'a str>,
}

/// Typed access to the `/apikey` endpoints.
#[derive(Debug, Clone)]
pub struct ApiKeyResource {
    requester: Arc<RequestClient>,
}

impl ApiKeyResource {
    pub(crate) fn new(requester: Arc<RequestClient>) -> Self {
        Self { requester }
    }

    /// List all API keys.
    ///
    /// # Errors
    ///
    /// Any [`ClientError`] from the underlying call.
    pub async fn list(&self) -> Result<ApiKeysResponse, ClientError> {
        let url = self.requester.build_url(&["apikey".into()]);
        let request = self
            .requester
            .build_request(Method::GET, url, RequestOptions::new())?;
        self.requester.execute(request).await
    }

    /// Create an API key; the returned secret is not retrievable again.
    ///
    /// # Errors
    ///
    /// Any [`ClientError`] from the underlying call.
    pub async fn create(
        &self,
        expiration: Option<DateTime<Utc>>,
    ) -> Result<CreateApiKeyResponse, ClientError> {
        let url = self.requester.build_url(&["apikey".into()]);
        let options = RequestOptions::new().json(&CreateApiKeyRequest { expiration })?;
        let request = self.requester.build_request(Method::POST, url, options)?;
        self.requester.execute(request).await
    }

    /// Expire the API key with the given prefix. The server returns no body.
    ///
    /// # Errors
    ///
    /// Any [`ClientError`] from the underlying call.
    pub async fn expire(&self, prefix: &str) -> Result<(), ClientError> {
        self.expire_request(ExpireApiKeyRequest {
            prefix: Some(prefix),
            id: None,
        })
        .await
    }

    /// Expire the API key with the given id. The server returns no body.
    ///
    /// # Errors
    ///
    /// Any [`ClientError`] from the underlying call.
    pub async fn expire_by_id(&self, id: &str) -> Result<(), ClientError> {
        self.expire_request(ExpireApiKeyRequest {
            prefix: None,
            id: Some(id),
        })
        .await
    }

    /// Delete the API key with the given prefix. The server returns no body.
    ///
    /// # Errors
    ///
    /// Any [`ClientError`] from the underlying call.
    pub async fn delete(&self, prefix: &str) -> Result<(), ClientError> {
        let url = self.requester.build_url(&["apikey".into(), prefix.into()]);
        let request = self
            .requester
            .build_request(Method::DELETE, url, RequestOptions::new())?;
        self.requester.execute_empty(request).await
    }

    /// Delete the API key with the given id. The prefix position in the
    /// path is a dash placeholder; the id travels as a query parameter.
    ///
    /// # Errors
    ///
    /// Any [`ClientError`] from the underlying call.
    pub async fn delete_by_id(&self, id: &str) -> Result<(), ClientError> {
        let url = self.requester.build_url(&["apikey".into(), "-".into()]);
        let options = RequestOptions::new().query("id", id);
        let request = self.requester.build_request(Method::DELETE, url, options)?;
        self.requester.execute_empty(request).await
    }

    async fn expire_request(&self, body: ExpireApiKeyRequest<'_>) -> Result<(), ClientError> {
        let url = self.requester.build_url(&["apikey".into(), "expire".into()]);
        let options = RequestOptions::new().json(&body)?;
        let request = self.requester.build_request(Method::POST, url, options)?;
        self.requester.execute_empty(request).await
    }
}
