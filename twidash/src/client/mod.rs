//! HTTP client and configuration.

mod auth;
mod http;

pub use auth::{oauth_encode, signature_base_string, Credentials};
pub use http::{HttpConfig, DEFAULT_BASE_URL, DEFAULT_USER_AGENT};

use crate::api::{AccountApi, MessageApi, StatusApi, UserApi};
use crate::error::{Error, Result};
use http::{build_client, HttpExecutor};
use std::sync::Arc;
use std::time::Duration;

/// Builder for creating TwitterClient.
pub struct TwitterClientBuilder {
    credentials: Option<Credentials>,
    http_config: HttpConfig,
}

impl std::fmt::Debug for TwitterClientBuilder {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TwitterClientBuilder")
            .field("credentials", &self.credentials)
            .field("http_config", &self.http_config)
            .finish()
    }
}

impl Default for TwitterClientBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl TwitterClientBuilder {
    /// Create a new builder.
    pub fn new() -> Self {
        Self {
            credentials: None,
            http_config: HttpConfig::default(),
        }
    }

    /// Set credentials from their four parts.
    pub fn auth(
        mut self,
        consumer_key: impl Into<String>,
        consumer_secret: impl Into<String>,
        access_token: impl Into<String>,
        access_token_secret: impl Into<String>,
    ) -> Self {
        self.credentials = Some(Credentials::new(
            consumer_key,
            consumer_secret,
            access_token,
            access_token_secret,
        ));
        self
    }

    /// Set credentials.
    pub fn with_credentials(mut self, credentials: Credentials) -> Self {
        self.credentials = Some(credentials);
        self
    }

    /// Set base URL.
    pub fn base_url(mut self, url: impl Into<String>) -> Self {
        self.http_config.base_url = url.into();
        self
    }

    /// Set custom user agent.
    pub fn user_agent(mut self, ua: impl Into<String>) -> Self {
        self.http_config.user_agent = ua.into();
        self
    }

    /// Set connection timeout.
    pub fn connect_timeout(mut self, timeout: Duration) -> Self {
        self.http_config.connect_timeout = timeout;
        self
    }

    /// Set read timeout.
    pub fn read_timeout(mut self, timeout: Duration) -> Self {
        self.http_config.read_timeout = timeout;
        self
    }

    /// Build TwitterClient.
    pub fn build(self) -> Result<TwitterClient> {
        if let Some(ref creds) = self.credentials {
            if !creds.is_valid() {
                return Err(Error::InvalidArgument(
                    "Credentials must have all four parts".into(),
                ));
            }
        }

        let http_client = build_client(&self.http_config)?;

        Ok(TwitterClient {
            inner: Arc::new(TwitterClientInner {
                http: http_client,
                config: self.http_config,
                credentials: self.credentials,
            }),
        })
    }
}

/// Internal client state.
pub(crate) struct TwitterClientInner {
    pub http: reqwest::Client,
    pub config: HttpConfig,
    pub credentials: Option<Credentials>,
}

impl TwitterClientInner {
    /// Get credentials or error.
    pub fn require_auth(&self) -> Result<&Credentials> {
        self.credentials.as_ref().ok_or(Error::AuthRequired)
    }

    /// Create an HTTP executor signing with the configured credentials.
    pub fn executor(&self) -> Result<HttpExecutor<'_>> {
        let credentials = self.require_auth()?;
        Ok(HttpExecutor::new(&self.http, &self.config, credentials))
    }

    /// Execute an authenticated GET request.
    pub async fn get<T: serde::de::DeserializeOwned>(
        &self,
        api: &str,
        query: &[(&str, &str)],
    ) -> Result<T> {
        self.executor()?.get_json(api, query).await
    }

    /// Execute an authenticated POST request.
    pub async fn post<T: serde::de::DeserializeOwned>(
        &self,
        api: &str,
        form: &[(&str, &str)],
    ) -> Result<T> {
        self.executor()?.post_form_json(api, form).await
    }
}

/// Client for the social platform's REST API.
#[derive(Clone)]
pub struct TwitterClient {
    pub(crate) inner: Arc<TwitterClientInner>,
}

impl TwitterClient {
    /// Create a new client builder.
    pub fn builder() -> TwitterClientBuilder {
        TwitterClientBuilder::new()
    }

    /// Get the account API.
    pub fn account(&self) -> AccountApi {
        AccountApi::new(self.inner.clone())
    }

    /// Get the user API.
    pub fn users(&self) -> UserApi {
        UserApi::new(self.inner.clone())
    }

    /// Get the status API.
    pub fn statuses(&self) -> StatusApi {
        StatusApi::new(self.inner.clone())
    }

    /// Get the direct message API.
    pub fn messages(&self) -> MessageApi {
        MessageApi::new(self.inner.clone())
    }

    /// Check if the client has credentials.
    pub fn is_authenticated(&self) -> bool {
        self.inner.credentials.is_some()
    }

    /// Get the configured credentials.
    pub fn credentials(&self) -> Option<&Credentials> {
        self.inner.credentials.as_ref()
    }

    /// Get the HTTP configuration.
    pub fn config(&self) -> &HttpConfig {
        &self.inner.config
    }
}

impl std::fmt::Debug for TwitterClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TwitterClient")
            .field("authenticated", &self.is_authenticated())
            .field("base_url", &self.inner.config.base_url)
            .finish()
    }
}
