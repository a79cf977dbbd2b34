//! Users API: list, create, delete and rename users.

use std::sync::Arc;

use chrono::{DateTime, Utc};
use http::Method;
use serde::{Deserialize, Serialize};

use crate::error::ClientError;
use crate::request::{RequestClient, RequestOptions};

/// A user known to the server.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct User {
    pub id: String,
    pub name: String,
    pub created_at: Option<DateTime<Utc>>,
    pub display_name: String,
    pub email: String,
    pub provider_id: String,
    pub provider: String,
    pub profile_pic_url: String,
}

/// Response envelope for the user list endpoint.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct UsersResponse {
    pub users: Vec<User>,
}

/// Response envelope for single-user endpoints.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct UserResponse {
    pub user: User,
}

/// Optional filters for [`UserResource::list`]; unset fields are omitted
/// from the query string.
#[derive(Debug, Clone, Default)]
pub struct UserListFilter {
    pub id: Option<String>,
    pub name: Option<String>,
    pub email: Option<String>,
}

/// Fields accepted when creating a user.
#[derive(Debug, Clone, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateUserRequest {
    pub name: String,
    pub display_name: String,
    pub email: String,
    pub picture_url: String,
}

/// Typed access to the `/user` endpoints.
#[derive(Debug, Clone)]
pub struct UserResource {
    requester: Arc<RequestClient>,
}

impl UserResource {
    pub(crate) fn new(requester: Arc<RequestClient>) -> Self {
        Self { requester }
    }

    /// List users, optionally filtered by id, name or email.
    ///
    /// # Errors
    ///
    /// Any [`ClientError`] from the underlying call.
    pub async fn list(&self, filter: UserListFilter) -> Result<UsersResponse, ClientError> {
        let mut options = RequestOptions::new();
        if let Some(id) = filter.id {
            options = options.query("id", id);
        }
        if let Some(name) = filter.name {
            options = options.query("name", name);
        }
        if let Some(email) = filter.email {
            options = options.query("email", email);
        }

        let url = self.requester.build_url(&["user".into()]);
        let request = self.requester.build_request(Method::GET, url, options)?;
        self.requester.execute(request).await
    }

    /// Create a user.
    ///
    /// # Errors
    ///
    /// Any [`ClientError`] from the underlying call.
    pub async fn create(&self, user: CreateUserRequest) -> Result<UserResponse, ClientError> {
        let url = self.requester.build_url(&["user".into()]);
        let options = RequestOptions::new().json(&user)?;
        let request = self.requester.build_request(Method::POST, url, options)?;
        self.requester.execute(request).await
    }

    /// Delete a user by id. The server returns no body.
    ///
    /// # Errors
    ///
    /// Any [`ClientError`] from the underlying call.
    pub async fn delete(&self, id: &str) -> Result<(), ClientError> {
        let url = self.requester.build_url(&["user".into(), id.into()]);
        let request = self
            .requester
            .build_request(Method::DELETE, url, RequestOptions::new())?;
        self.requester.execute_empty(request).await
    }

    /// Rename a user.
    ///
    /// # Errors
    ///
    /// Any [`ClientError`] from the underlying call.
    pub async fn rename(&self, id: &str, new_name: &str) -> Result<UserResponse, ClientError> {
        let url = self
            .requester
            .build_url(&["user".into(), id.into(), "rename".into(), new_name.into()]);
        let request = self
            .requester
            .build_request(Method::POST, url, RequestOptions::new())?;
        self.requester.execute(request).await
    }
}
