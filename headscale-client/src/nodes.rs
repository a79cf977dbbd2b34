//! Nodes API: registration, lifecycle, tagging and route approval.

use std::sync::Arc;

use chrono::{DateTime, Utc};
use http::Method;
use serde::{Deserialize, Serialize};

use crate::error::ClientError;
use crate::preauth_keys::PreAuthKey;
use crate::request::{RequestClient, RequestOptions};
use crate::users::User;

/// Route covering all IPv4 traffic; approving it makes a node an exit node.
pub const EXIT_ROUTE_V4: &str = "0.0.0.0/0";

/// Route covering all IPv6 traffic; approving it makes a node an exit node.
pub const EXIT_ROUTE_V6: &str = "::/0";

/// A machine registered with the server.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Node {
    pub id: String,
    pub machine_key: String,
    pub node_key: String,
    pub disco_key: String,
    pub ip_addresses: Vec<String>,
    pub name: String,
    pub user: User,
    pub last_seen: Option<DateTime<Utc>>,
    pub expiry: Option<DateTime<Utc>>,
    pub pre_auth_key: Option<PreAuthKey>,
    pub created_at: Option<DateTime<Utc>>,
    pub register_method: String,
    pub tags: Vec<String>,
    pub given_name: String,
    pub online: bool,
    pub approved_routes: Vec<String>,
    pub available_routes: Vec<String>,
    pub subnet_routes: Vec<String>,
}

impl Node {
    /// Whether this node has an approved exit route (IPv4 or IPv6).
    pub fn is_exit_node(&self) -> bool {
        self.approved_routes
            .iter()
            .any(|route| route == EXIT_ROUTE_V4 || route == EXIT_ROUTE_V6)
    }
}

/// Response envelope for single-node endpoints.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct NodeResponse {
    pub node: Node,
}

/// Response envelope for the node list endpoint.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct NodesResponse {
    pub nodes: Vec<Node>,
}

/// Optional filter for [`NodeResource::list`].
#[derive(Debug, Clone, Default)]
pub struct NodeListFilter {
    /// Only nodes owned by this user.
    pub user: Option<String>,
}

/// Result of an IP backfill run: one human-readable entry per change.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct BackfillIpsResponse {
    pub changes: Vec<String>,
}

#[derive(Debug, Serialize)]
struct AddTagsRequest<'a> {
    tags: &'a [String],
}

#[derive(Debug, Serialize)]
struct ApproveRoutesRequest<'a> {
    routes: &'a [String],
}

/// Typed access to the `/node` endpoints.
#[derive(Debug, Clone)]
pub struct NodeResource {
    requester: Arc<RequestClient>,
}

impl NodeResource {
    pub(crate) fn new(requester: Arc<RequestClient>) -> Self {
        Self { requester }
    }

    /// List nodes, optionally restricted to one user.
    ///
    /// # Errors
    ///
    /// Any [`ClientError`] from the underlying call.
    pub async fn list(&self, filter: NodeListFilter) -> Result<NodesResponse, ClientError> {
        let mut options = RequestOptions::new();
        if let Some(user) = filter.user {
            options = options.query("user", user);
        }

        let url = self.requester.build_url(&["node".into()]);
        let request = self.requester.build_request(Method::GET, url, options)?;
        self.requester.execute(request).await
    }

    /// Fetch one node by id.
    ///
    /// # Errors
    ///
    /// Any [`ClientError`] from the underlying call.
    pub async fn get(&self, id: &str) -> Result<NodeResponse, ClientError> {
        let url = self.requester.build_url(&["node".into(), id.into()]);
        let request = self
            .requester
            .build_request(Method::GET, url, RequestOptions::new())?;
        self.requester.execute(request).await
    }

    /// Register a node for `user` with its registration key.
    ///
    /// # Errors
    ///
    /// Any [`ClientError`] from the underlying call.
    pub async fn register(&self, user: &str, key: &str) -> Result<NodeResponse, ClientError> {
        let url = self.requester.build_url(&["node".into(), "register".into()]);
        let options = RequestOptions::new().query("user", user).query("key", key);
        let request = self.requester.build_request(Method::POST, url, options)?;
        self.requester.execute(request).await
    }

    /// Delete a node. The server returns no body.
    ///
    /// # Errors
    ///
    /// Any [`ClientError`] from the underlying call.
    pub async fn delete(&self, id: &str) -> Result<(), ClientError> {
        let url = self.requester.build_url(&["node".into(), id.into()]);
        let request = self
            .requester
            .build_request(Method::DELETE, url, RequestOptions::new())?;
        self.requester.execute_empty(request).await
    }

    /// Mark a node's key as expired, forcing re-authentication.
    ///
    /// # Errors
    ///
    /// Any [`ClientError`] from the underlying call.
    pub async fn expire(&self, id: &str) -> Result<(), ClientError> {
        let url = self
            .requester
            .build_url(&["node".into(), id.into(), "expire".into()]);
        let request = self
            .requester
            .build_request(Method::POST, url, RequestOptions::new())?;
        self.requester.execute_empty(request).await
    }

    /// Rename a node.
    ///
    /// # Errors
    ///
    /// Any [`ClientError`] from the underlying call.
    pub async fn rename(&self, id: &str, name: &str) -> Result<NodeResponse, ClientError> {
        let url = self
            .requester
            .build_url(&["node".into(), id.into(), "rename".into(), name.into()]);
        let request = self
            .requester
            .build_request(Method::POST, url, RequestOptions::new())?;
        self.requester.execute(request).await
    }

    /// Replace the forced tags on a node.
    ///
    /// # Errors
    ///
    /// Any [`ClientError`] from the underlying call.
    pub async fn add_tags(&self, id: &str, tags: &[String]) -> Result<NodeResponse, ClientError> {
        let url = self
            .requester
            .build_url(&["node".into(), id.into(), "tags".into()]);
        let options = RequestOptions::new().json(&AddTagsRequest { tags })?;
        let request = self.requester.build_request(Method::POST, url, options)?;
        self.requester.execute(request).await
    }

    /// Approve the given routes for a node.
    ///
    /// # Errors
    ///
    /// Any [`ClientError`] from the underlying call.
    pub async fn approve_routes(
        &self,
        id: &str,
        routes: &[String],
    ) -> Result<NodeResponse, ClientError> {
        let url = self
            .requester
            .build_url(&["node".into(), id.into(), "approve_routes".into()]);
        let options = RequestOptions::new().json(&ApproveRoutesRequest { routes })?;
        let request = self.requester.build_request(Method::POST, url, options)?;
        self.requester.execute(request).await
    }

    /// Backfill missing node IP addresses. With `confirmed == false` the
    /// server only reports what it would change.
    ///
    /// # Errors
    ///
    /// Any [`ClientError`] from the underlying call.
    pub async fn backfill_ips(&self, confirmed: bool) -> Result<BackfillIpsResponse, ClientError> {
        let url = self
            .requester
            .build_url(&["node".into(), "backfillips".into()]);
        let options = RequestOptions::new().query("confirmed", confirmed);
        let request = self.requester.build_request(Method::POST, url, options)?;
        self.requester.execute(request).await
    }
}
