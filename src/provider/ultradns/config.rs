use serde::Deserialize;

use crate::error::{Error, Result};

pub const DEFAULT_BASE_URL: &str = "https://restapi.ultradns.com/";

pub const ENV_USERNAME: &str = "ULTRADNS_USERNAME";
pub const ENV_PASSWORD: &str = "ULTRADNS_PASSWORD";
pub const ENV_BASE_URL: &str = "ULTRADNS_BASEURL";

/// Credentials and endpoint of the UltraDNS REST API.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct ProviderConfig {
    #[serde(default)]
    pub username: String,

    #[serde(default)]
    pub password: String,

    #[serde(default)]
    pub base_url: Option<String>,
}

impl ProviderConfig {
    pub fn new(username: &str, password: &str) -> Self {
        Self {
            username: username.to_string(),
            password: password.to_string(),
            base_url: None,
        }
    }

    pub fn with_base_url(mut self, base_url: &str) -> Self {
        self.base_url = Some(base_url.to_string());
        self
    }

    /// Fills unset fields from the `ULTRADNS_*` environment variables.
    pub fn with_env(self) -> Self {
        self.fill_from(|key| std::env::var(key).ok())
    }

    pub(crate) fn fill_from<F>(mut self, lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        if self.username.is_empty() {
            self.username = lookup(ENV_USERNAME).unwrap_or_default();
        }
        if self.password.is_empty() {
            self.password = lookup(ENV_PASSWORD).unwrap_or_default();
        }
        if self.base_url.is_none() {
            self.base_url = lookup(ENV_BASE_URL);
        }
        self
    }

    pub fn base_url(&self) -> &str {
        self.base_url
            .as_deref()
            .filter(|url| !url.is_empty())
            .unwrap_or(DEFAULT_BASE_URL)
    }

    pub fn validate(&self) -> Result<()> {
        if self.username.is_empty() {
            return Err(Error::Provider(format!(
                "ultradns username is required, set it in the config or {}",
                ENV_USERNAME
            )));
        }
        if self.password.is_empty() {
            return Err(Error::Provider(format!(
                "ultradns password is required, set it in the config or {}",
                ENV_PASSWORD
            )));
        }
        Ok(())
    }
}
