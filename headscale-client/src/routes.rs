//! Routes API: list, enable, disable and delete advertised routes.

use std::sync::Arc;

use chrono::{DateTime, Utc};
use http::Method;
use serde::Deserialize;

use crate::error::ClientError;
use crate::nodes::Node;
use crate::request::{RequestClient, RequestOptions};

/// A route advertised by a node.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Route {
    pub id: String,
    pub node: Option<Node>,
    pub prefix: String,
    pub advertised: bool,
    pub enabled: bool,
    pub is_primary: bool,
    pub created_at: Option<DateTime<Utc>>,
    pub updated_at: Option<DateTime<Utc>>,
    pub deleted_at: Option<DateTime<Utc>>,
}

/// Response envelope for the route list endpoint.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct RoutesResponse {
    pub routes: Vec<Route>,
}

/// Typed access to the `/routes` endpoints.
#[derive(Debug, Clone)]
pub struct RouteResource {
    requester: Arc<RequestClient>,
}

impl RouteResource {
    pub(crate) fn new(requester: Arc<RequestClient>) -> Self {
        Self { requester }
    }

    /// List all advertised routes.
    ///
    /// # Errors
    ///
    /// Any [`ClientError`] from the underlying call.
    pub async fn list(&self) -> Result<RoutesResponse, ClientError> {
        let url = self.requester.build_url(&["routes".into()]);
        let request = self
            .requester
            .build_request(Method::GET, url, RequestOptions::new())?;
        self.requester.execute(request).await
    }

    /// Delete a route. The server returns no body.
    ///
    /// # Errors
    ///
    /// Any [`ClientError`] from the underlying call.
    pub async fn delete(&self, id: &str) -> Result<(), ClientError> {
        let url = self.requester.build_url(&["routes".into(), id.into()]);
        let request = self
            .requester
            .build_request(Method::DELETE, url, RequestOptions::new())?;
        self.requester.execute_empty(request).await
    }

    /// Enable a route. The server returns no body.
    ///
    /// # Errors
    ///
    /// Any [`ClientError`] from the underlying call.
    pub async fn enable(&self, id: &str) -> Result<(), ClientError> {
        let url = self
            .requester
            .build_url(&["routes".into(), id.into(), "enable".into()]);
        let request = self
            .requester
            .build_request(Method::POST, url, RequestOptions::new())?;
        self.requester.execute_empty(request).await
    }

    /// Disable a route. The server returns no body.
    ///
    /// # Errors
    ///
    /// Any [`ClientError`] from the underlying call.
    pub async fn disable(&self, id: &str) -> Result<(), ClientError> {
        let url = self
            .requester
            .build_url(&["routes".into(), id.into(), "disable".into()]);
        let request = self
            .requester
            .build_request(Method::POST, url, RequestOptions::new())?;
        self.requester.execute_empty(request).await
    }
}
