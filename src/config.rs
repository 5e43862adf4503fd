//! Front-end configuration parsed from environment variables.

pub const DEFAULT_PORT: u16 = 4200;
pub const DEFAULT_REQUEST_TIMEOUT_SECS: u64 = 30;
pub const DEFAULT_CONNECT_TIMEOUT_SECS: u64 = 5;

/// Errors produced while reading configuration.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// A required variable is unset or blank.
    #[error("missing config: env var {var} not set")]
    Missing { var: String },

    /// A variable is set but could not be parsed.
    #[error("config parse failed: {var}={value:?}")]
    Parse { var: String, value: String },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HttpTimeouts {
    pub request_secs: u64,
    pub connect_secs: u64,
}

impl Default for HttpTimeouts {
    fn default() -> Self {
        Self { request_secs: DEFAULT_REQUEST_TIMEOUT_SECS, connect_secs: DEFAULT_CONNECT_TIMEOUT_SECS }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FrontendConfig {
    /// Backend base URL, without a trailing slash.
    pub host: String,
    pub port: u16,
    pub timeouts: HttpTimeouts,
}

impl FrontendConfig {
    /// Config pointing at `host` with every other value defaulted.
    #[must_use]
    pub fn with_host(host: &str) -> Self {
        Self { host: normalize_host(host), port: DEFAULT_PORT, timeouts: HttpTimeouts::default() }
    }

    /// Build typed config from environment variables.
    ///
    /// Required:
    /// - `AUTH_HOST`: backend base URL
    ///
    /// Optional:
    /// - `PORT`: default 4200
    /// - `AUTH_REQUEST_TIMEOUT_SECS`: default 30
    /// - `AUTH_CONNECT_TIMEOUT_SECS`: default 5
    ///
    /// # Errors
    ///
    /// Returns an error if `AUTH_HOST` is missing or `PORT` is not a port number.
    pub fn from_env() -> Result<Self, ConfigError> {
        let host = std::env::var("AUTH_HOST")
            .ok()
            .filter(|v| !v.trim().is_empty())
            .ok_or_else(|| ConfigError::Missing { var: "AUTH_HOST".into() })?;

        let port = match std::env::var("PORT") {
            Ok(raw) => raw
                .trim()
                .parse::<u16>()
                .map_err(|_| ConfigError::Parse { var: "PORT".into(), value: raw.clone() })?,
            Err(_) => DEFAULT_PORT,
        };

        let timeouts = HttpTimeouts {
            request_secs: env_parse_u64("AUTH_REQUEST_TIMEOUT_SECS", DEFAULT_REQUEST_TIMEOUT_SECS),
            connect_secs: env_parse_u64("AUTH_CONNECT_TIMEOUT_SECS", DEFAULT_CONNECT_TIMEOUT_SECS),
        };

        Ok(Self { host: normalize_host(&host), port, timeouts })
    }

    /// URL of the authorization-info endpoint on the backend.
    #[must_use]
    pub fn authorization_info_url(&self) -> String {
        format!("{}/oauth2/authorization-info", self.host)
    }

    /// URL the consent form posts to.
    #[must_use]
    pub fn authorize_url(&self) -> String {
        authorize_url(&self.host)
    }
}

/// `{host}/oauth2/authorize`.
#[must_use]
pub fn authorize_url(host: &str) -> String {
    format!("{}/oauth2/authorize", normalize_host(host))
}

fn normalize_host(host: &str) -> String {
    host.trim().trim_end_matches('/').to_string()
}

fn env_parse_u64(key: &str, default: u64) -> u64 {
    std::env::var(key)
        .ok()
        .and_then(|v| v.trim().parse::<u64>().ok())
        .unwrap_or(default)
}

#[cfg(test)]
#[path = "config_test.rs"]
mod tests;
