//! ACL policy API: fetch and replace the server policy document.

use std::sync::Arc;

use http::Method;
use serde::{Deserialize, Serialize};

use crate::error::ClientError;
use crate::request::{RequestClient, RequestOptions};

/// The server's ACL policy: the raw HuJSON document plus its last update
/// time, both as the server reports them.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Policy {
    pub policy: String,
    pub updated_at: String,
}

#[derive(Debug, Serialize)]
struct UpdatePolicyRequest<'a> {
    policy: &'a str,
}

/// Typed access to the `/policy` endpoints.
#[derive(Debug, Clone)]
pub struct PolicyResource {
    requester: Arc<RequestClient>,
}

impl PolicyResource {
    pub(crate) fn new(requester: Arc<RequestClient>) -> Self {
        Self { requester }
    }

    /// Fetch the current policy.
    ///
    /// # Errors
    ///
    /// Any [`ClientError`] from the underlying call.
    pub async fn get(&self) -> Result<Policy, ClientError> {
        let url = self.requester.build_url(&["policy".into()]);
        let request = self
            .requester
            .build_request(Method::GET, url, RequestOptions::new())?;
        self.requester.execute(request).await
    }

    /// Replace the policy with `policy` and return the stored result.
    ///
    /// # Errors
    ///
    /// Any [`ClientError`] from the underlying call.
    pub async fn update(&self, policy: &str) -> Result<Policy, ClientError> {
        let url = self.requester.build_url(&["policy".into()]);
        let options = RequestOptions::new().json(&UpdatePolicyRequest { policy })?;
        let request = self.requester.build_request(Method::PUT, url, options)?;
        self.requester.execute(request).await
    }
}
