use std::time::Duration;

use crate::foundation::error::{ReelError, ReelResult};

/// Backend base URL.
pub const ENV_API_URL: &str = "REELFRAME_API_URL";
/// Bearer token; empty means none.
pub const ENV_API_TOKEN: &str = "REELFRAME_API_TOKEN";
/// Request timeout in whole seconds.
pub const ENV_TIMEOUT_SECS: &str = "REELFRAME_TIMEOUT_SECS";

/// Base URL when [`ENV_API_URL`] is unset.
pub const DEFAULT_API_URL: &str = "http://localhost:8000";
/// Request timeout when [`ENV_TIMEOUT_SECS`] is unset.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

/// Everything the backend client needs, passed in explicitly by the owner of the editor.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ClientConfig {
    /// http(s) origin without a trailing slash.
    pub base_url: String,
    /// Sent as `Authorization: Bearer`.
    pub token: Option<String>,
    /// Per-request timeout.
    pub timeout: Duration,
}

impl ClientConfig {
    /// Validates `base_url` and applies the defaults.
    pub fn new(base_url: impl Into<String>) -> ReelResult<Self> {
        let base_url = base_url.into().trim_end_matches('/').to_string();
        let parsed = reqwest::Url::parse(&base_url)
            .map_err(|e| ReelError::validation(format!("invalid base url '{base_url}': {e}")))?;
        if !matches!(parsed.scheme(), "http" | "https") {
            return Err(ReelError::validation(format!(
                "base url '{base_url}' must use http or https"
            )));
        }
        Ok(Self {
            base_url,
            token: None,
            timeout: DEFAULT_TIMEOUT,
        })
    }

    /// Sets the bearer token. An empty token clears it.
    pub fn with_token(mut self, token: impl Into<String>) -> Self {
        let token = token.into();
        self.token = (!token.is_empty()).then_some(token);
        self
    }

    /// Sets the per-request timeout.
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Reads [`ENV_API_URL`], [`ENV_API_TOKEN`] and [`ENV_TIMEOUT_SECS`] from the process
    /// environment.
    pub fn from_env() -> ReelResult<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Same as [`Self::from_env`] over an arbitrary key lookup.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> ReelResult<Self> {
        let base_url = lookup(ENV_API_URL).unwrap_or_else(|| DEFAULT_API_URL.to_string());
        let mut config = Self::new(base_url)?;

        if let Some(token) = lookup(ENV_API_TOKEN) {
            config = config.with_token(token);
        }

        if let Some(raw) = lookup(ENV_TIMEOUT_SECS) {
            let secs: u64 = raw.trim().parse().map_err(|_| {
                ReelError::validation(format!("{ENV_TIMEOUT_SECS} must be whole seconds, got '{raw}'"))
            })?;
            if secs == 0 {
                return Err(ReelError::validation(format!("{ENV_TIMEOUT_SECS} must be > 0")));
            }
            config = config.with_timeout(Duration::from_secs(secs));
        }

        Ok(config)
    }

    pub(crate) fn reels_url(&self, path: &str) -> String {
        format!("{}/api/reels/{path}", self.base_url)
    }
}

#[cfg(test)]
#[path = "../../tests/unit/api/config.rs"]
mod tests;
