//! Backend credentials.
//!
//! The URL and key are opaque: only their presence is checked. Without them
//! nothing in the application can work, so callers treat [`ConfigError`] as
//! fatal at startup.

use thiserror::Error;

/// Environment variable holding the backend base URL.
pub const URL_VAR: &str = "SUPABASE_URL";
/// Environment variable holding the anonymous API key.
pub const KEY_VAR: &str = "SUPABASE_ANON_KEY";

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConfigError {
    #[error("configure SUPABASE_URL and SUPABASE_ANON_KEY (missing {0})")]
    Missing(&'static str),
}

/// Connection settings for the hosted backend.
#[derive(Clone, PartialEq, Eq)]
pub struct BackendConfig {
    pub url: String,
    pub anon_key: String,
}

impl std::fmt::Debug for BackendConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("BackendConfig")
            .field("url", &self.url)
            .field("anon_key", &"<redacted>")
            .finish()
    }
}

fn present(value: Option<String>, name: &'static str) -> Result<String, ConfigError> {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
        .ok_or(ConfigError::Missing(name))
}

impl BackendConfig {
    /// Build from optional values, e.g. clap arguments or `option_env!`.
    pub fn new(url: Option<String>, anon_key: Option<String>) -> Result<Self, ConfigError> {
        Ok(Self {
            url: present(url, URL_VAR)?.trim_end_matches('/').to_string(),
            anon_key: present(anon_key, KEY_VAR)?,
        })
    }

    /// Read `SUPABASE_URL` and `SUPABASE_ANON_KEY` from the process environment.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::new(std::env::var(URL_VAR).ok(), std::env::var(KEY_VAR).ok())
    }

    /// REST endpoint of `table`.
    pub fn table_url(&self, table: &str) -> String {
        format!("{}/rest/v1/{}", self.url, table)
    }
}
