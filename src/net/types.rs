//! Wire types shared with the authorization server.

use serde::{Deserialize, Serialize};

/// Authorization metadata for the pending OAuth2 request.
///
/// The backend owns this contract. Commonly present fields are typed; any
/// other field is kept verbatim in `extra`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AuthorizationInfo {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub client_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub client_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub redirect_uri: Option<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub scopes: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub state: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub principal_name: Option<String>,
    #[serde(flatten)]
    pub extra: serde_json::Map<String, serde_json::Value>,
}

impl AuthorizationInfo {
    /// Human-facing name of the requesting client.
    #[must_use]
    pub fn display_name(&self) -> &str {
        self.client_name
            .as_deref()
            .or(self.client_id.as_deref())
            .unwrap_or("unknown client")
    }
}

#[cfg(test)]
#[path = "types_test.rs"]
mod types_test;
