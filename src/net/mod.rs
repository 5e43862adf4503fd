//! Network layer: wire types and the authorization-info client.

pub mod api;
pub mod types;

pub use api::{ApiError, AuthorizationInfoClient, AuthorizationInfoSource};
pub use types::AuthorizationInfo;
