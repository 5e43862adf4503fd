//! HTTP client for the authorization server's metadata endpoint.
//!
//! DESIGN
//! ======
//! `fetch` is an `async fn`: nothing happens until the future is polled and
//! dropping it aborts the request, so each call is a lazy, single-shot,
//! cancellable request. There is no retry and no caching.
//!
//! The client is shared by every request the server handles, so it keeps
//! no cookie store. Session credentials are whatever `for_session` was
//! given: the browser's own `Cookie` header, or nothing at all.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::header::{ACCEPT, COOKIE, HeaderValue};
use tracing::{debug, warn};

use super::types::AuthorizationInfo;
use crate::config::FrontendConfig;

// =============================================================================
// ERROR
// =============================================================================

/// Errors produced by authorization-info requests.
#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    /// The request never produced a response (DNS, connect, timeout).
    #[error("request failed: {0}")]
    Transport(String),

    /// The backend answered with a non-success status.
    #[error("unexpected response: status {status}")]
    Status { status: u16, body: String },

    /// The response body was not a valid authorization-info document.
    #[error("response decode failed: {0}")]
    Decode(String),

    /// The HTTP client could not be constructed.
    #[error("HTTP client build failed: {0}")]
    HttpClientBuild(String),
}

impl ApiError {
    #[must_use]
    pub fn error_code(&self) -> &'static str {
        match self {
            Self::Transport(_) => "E_TRANSPORT",
            Self::Status { .. } => "E_STATUS",
            Self::Decode(_) => "E_DECODE",
            Self::HttpClientBuild(_) => "E_HTTP_CLIENT_BUILD",
        }
    }

    #[must_use]
    pub fn retryable(&self) -> bool {
        matches!(self, Self::Transport(_) | Self::Status { status: 429 | 500..=599, .. })
    }
}

// =============================================================================
// SOURCE SEAM
// =============================================================================

/// Anything that can produce authorization info for a view.
#[async_trait]
pub trait AuthorizationInfoSource: Send + Sync {
    async fn fetch(&self) -> Result<AuthorizationInfo, ApiError>;
}

// =============================================================================
// CLIENT
// =============================================================================

#[derive(Clone)]
pub struct AuthorizationInfoClient {
    http: reqwest::Client,
    url: String,
    session_cookie: Option<HeaderValue>,
}

impl AuthorizationInfoClient {
    /// Build a client for the backend named in `config`.
    ///
    /// # Errors
    ///
    /// Returns an error if the HTTP client cannot be constructed.
    pub fn new(config: &FrontendConfig) -> Result<Self, ApiError> {
        let http = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.timeouts.request_secs))
            .connect_timeout(Duration::from_secs(config.timeouts.connect_secs))
            .build()
            .map_err(|e| ApiError::HttpClientBuild(e.to_string()))?;
        Ok(Self { http, url: config.authorization_info_url(), session_cookie: None })
    }

    /// A clone of this client that sends `cookie` as the request's `Cookie`
    /// header. Passing `None` sends the request without credentials.
    #[must_use]
    pub fn for_session(&self, cookie: Option<HeaderValue>) -> Self {
        Self { http: self.http.clone(), url: self.url.clone(), session_cookie: cookie }
    }

    #[must_use]
    pub fn url(&self) -> &str {
        &self.url
    }

    /// Fetch authorization info with the current session's credentials.
    ///
    /// # Errors
    ///
    /// Returns an error on transport failure, a non-2xx status, or a body
    /// that does not decode as [`AuthorizationInfo`].
    pub async fn fetch(&self) -> Result<AuthorizationInfo, ApiError> {
        let mut req = self.http.get(&self.url).header(ACCEPT, "application/json");
        if let Some(cookie) = &self.session_cookie {
            req = req.header(COOKIE, cookie.clone());
        }

        let resp = req.send().await.map_err(|e| {
            warn!(url = %self.url, error = %e, "authorization-info request failed");
            ApiError::Transport(e.to_string())
        })?;

        let status = resp.status();
        if !status.is_success() {
            let body = resp.text().await.unwrap_or_default();
            warn!(url = %self.url, status = status.as_u16(), "authorization-info returned error status");
            return Err(ApiError::Status { status: status.as_u16(), body });
        }

        let info = resp
            .json::<AuthorizationInfo>()
            .await
            .map_err(|e| ApiError::Decode(e.to_string()))?;
        debug!(client_id = ?info.client_id, "authorization-info fetched");
        Ok(info)
    }
}

#[async_trait]
impl AuthorizationInfoSource for AuthorizationInfoClient {
    async fn fetch(&self) -> Result<AuthorizationInfo, ApiError> {
        AuthorizationInfoClient::fetch(self).await
    }
}

#[cfg(test)]
#[path = "api_test.rs"]
mod api_test;
