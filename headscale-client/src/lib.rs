//! Typed async client for the Headscale admin REST API.
//!
//! The crate is split into a small request-construction and execution engine
//! ([`RequestClient`]) and thin resource wrappers over it (users, nodes,
//! routes, policy, pre-auth keys, API keys). Every wrapper call builds a
//! versioned URL, assembles an authenticated request and performs exactly
//! one network round trip; errors are classified as configuration, build,
//! transport, protocol or decode failures and always returned to the caller.
//!
//! # Examples
//!
//! ```no_run
//! use headscale_client::{ClientOptions, HeadscaleClient};
//!
//! # async fn example() -> Result<(), headscale_client::ClientError> {
//! let client = HeadscaleClient::new(
//!     "https://headscale.example.com",
//!     std::env::var("HEADSCALE_API_KEY").unwrap_or_default().into(),
//!     ClientOptions::default(),
//! )?;
//!
//! // List users and rename one.
//! let users = client.users().list(Default::default()).await?;
//! if let Some(user) = users.users.first() {
//!     client.users().rename(&user.id, "renamed").await?;
//! }
//!
//! // Expire a node key.
//! client.nodes().expire("1").await?;
//! # Ok(())
//! # }
//! ```
//!
//! Concurrency is the caller's choice: the client is `Clone` and every
//! resource call is an independent future. Dropping a call's future cancels
//! it; the transport timeout (60 seconds by default) bounds each round trip.

pub mod api_keys;
mod body;
mod client;
mod error;
pub mod nodes;
pub mod policy;
pub mod preauth_keys;
mod request;
pub mod routes;
pub mod users;
mod version;

pub use body::Body;
pub use client::{ClientOptions, HeadscaleClient};
pub use error::ClientError;
pub use request::{
    PathSegment, RequestClient, RequestOptions, DEFAULT_TIMEOUT, DEFAULT_USER_AGENT,
};
pub use version::ApiVersion;

// Re-export commonly used types from dependencies
pub use http::{Method, StatusCode};
pub use secrecy::SecretString;
