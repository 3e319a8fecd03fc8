use async_trait::async_trait;
use log::debug;
use serde::Deserialize;
use tokio::sync::Mutex;

use crate::error::{Error, Result};
use crate::provider::{ApiError, ApiErrors, RRSetApi};
use crate::record::{RRSet, RRSetKey, RRSetList};
use crate::wrapper::http::{Client, Header, HeaderKey, Response};

use super::config::ProviderConfig;

#[derive(Debug, Clone, Deserialize)]
struct TokenResponse {
    #[serde(rename = "accessToken")]
    access_token: String,
}

/// HTTP client of the UltraDNS v2 REST API.
pub struct UdnsClient {
    base_url: String,
    username: String,
    password: String,
    token: Mutex<Option<String>>,
    cli: Client,
}

impl UdnsClient {
    pub fn new(cfg: &ProviderConfig) -> Result<Self> {
        cfg.validate()?;

        Ok(Self {
            base_url: cfg.base_url().trim_end_matches('/').to_string(),
            username: cfg.username.clone(),
            password: cfg.password.clone(),
            token: Mutex::new(None),
            cli: Client::new(),
        })
    }

    fn url(&self, path: &str) -> String {
        format!("{}/v2/{}", self.base_url, path)
    }

    async fn access_token(&self) -> Result<String> {
        let mut guard = self.token.lock().await;
        if let Some(token) = guard.as_ref() {
            return Ok(token.clone());
        }

        let token = self.login().await?;
        *guard = Some(token.clone());
        Ok(token)
    }

    async fn login(&self) -> Result<String> {
        let url = self.url("authorization/token");
        debug!("ultradns login as {}", self.username);

        let params = [
            ("grant_type", "password"),
            ("username", self.username.as_str()),
            ("password", self.password.as_str()),
        ];
        let body = Self::check(self.cli.post_form(&url, &params).await?)?;
        let token: TokenResponse = serde_json::from_str(&body)?;
        Ok(token.access_token)
    }

    async fn headers(&self) -> Result<Vec<Header>> {
        let token = self.access_token().await?;
        Ok(vec![
            Header::new(HeaderKey::Authorization, format!("Bearer {}", token)),
            Header::new(HeaderKey::ContentType, "application/json".to_string()),
        ])
    }

    /// Returns the body of a successful response, or the decoded API error.
    fn check(resp: Response) -> Result<String> {
        if resp.is_success() {
            return Ok(resp.body);
        }

        if let Ok(errors) = serde_json::from_str::<ApiErrors>(&resp.body) {
            if !errors.0.is_empty() {
                return Err(Error::Api(errors));
            }
        }
        if let Ok(error) = serde_json::from_str::<ApiError>(&resp.body) {
            return Err(Error::Api(ApiErrors(vec![error])));
        }

        Err(Error::HttpError(format!(
            "status: {}, body: {}",
            resp.status, resp.body
        )))
    }
}

#[async_trait]
impl RRSetApi for UdnsClient {
    async fn select(&self, key: &RRSetKey) -> Result<Vec<RRSet>> {
        let url = self.url(&key.uri());
        debug!("ultradns select {}", url);

        let headers = self.headers().await?;
        let body = Self::check(self.cli.get(&url, headers).await?)?;
        let list: RRSetList = serde_json::from_str(&body)?;
        Ok(list.rrsets)
    }

    async fn create(&self, key: &RRSetKey, rrset: &RRSet) -> Result<()> {
        let url = self.url(&key.uri());
        debug!("ultradns create {}", url);

        let headers = self.headers().await?;
        let body = serde_json::to_string(rrset)?;
        Self::check(self.cli.post(&url, headers, body).await?)?;
        Ok(())
    }

    async fn update(&self, key: &RRSetKey, rrset: &RRSet) -> Result<()> {
        let url = self.url(&key.uri());
        debug!("ultradns update {}", url);

        let headers = self.headers().await?;
        let body = serde_json::to_string(rrset)?;
        Self::check(self.cli.put(&url, headers, body).await?)?;
        Ok(())
    }

    async fn delete(&self, key: &RRSetKey) -> Result<()> {
        let url = self.url(&key.uri());
        debug!("ultradns delete {}", url);

        let headers = self.headers().await?;
        Self::check(self.cli.delete(&url, headers).await?)?;
        Ok(())
    }
}
