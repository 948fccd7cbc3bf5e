//! HTTP client configuration and request execution.

use reqwest::{Client, Method, RequestBuilder, Response};
use serde::de::DeserializeOwned;
use serde::Deserialize;
use std::time::Duration;
use url::Url;

use super::Credentials;
use crate::error::{Error, Result};

/// Default platform API base URL.
pub const DEFAULT_BASE_URL: &str = "https://api.twitter.com/1.1/";

/// Default User-Agent header.
pub const DEFAULT_USER_AGENT: &str = concat!("twidash/", env!("CARGO_PKG_VERSION"));

/// HTTP client configuration.
#[derive(Debug, Clone)]
pub struct HttpConfig {
    /// Base URL for API requests.
    pub base_url: String,
    /// Connection timeout.
    pub connect_timeout: Duration,
    /// Read timeout.
    pub read_timeout: Duration,
    /// User-Agent header.
    pub user_agent: String,
}

impl Default for HttpConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_owned(),
            connect_timeout: Duration::from_secs(5),
            read_timeout: Duration::from_secs(20),
            user_agent: DEFAULT_USER_AGENT.to_owned(),
        }
    }
}

impl HttpConfig {
    /// Resolve a relative API path to a full URL.
    pub fn resolve_url(&self, api: &str) -> Result<Url> {
        if api.starts_with("http://") || api.starts_with("https://") {
            return Url::parse(api).map_err(Error::Url);
        }

        Url::parse(&self.base_url)
            .and_then(|b| b.join(api))
            .map_err(Error::Url)
    }
}

/// Build a reqwest client with the given configuration.
pub fn build_client(config: &HttpConfig) -> Result<Client> {
    Client::builder()
        .connect_timeout(config.connect_timeout)
        .read_timeout(config.read_timeout)
        .user_agent(config.user_agent.clone())
        .gzip(true)
        .build()
        .map_err(Error::Network)
}

/// HTTP request executor.
pub struct HttpExecutor<'a> {
    client: &'a Client,
    config: &'a HttpConfig,
    credentials: &'a Credentials,
}

impl<'a> HttpExecutor<'a> {
    /// Create a new executor.
    pub fn new(client: &'a Client, config: &'a HttpConfig, credentials: &'a Credentials) -> Self {
        Self {
            client,
            config,
            credentials,
        }
    }

    /// Build a signed request.
    fn build_request(
        &self,
        method: Method,
        url: Url,
        params: &[(&str, &str)],
    ) -> Result<RequestBuilder> {
        let auth = self
            .credentials
            .authorization_header(method.as_str(), &url, params)?;

        Ok(self
            .client
            .request(method, url)
            .header(reqwest::header::AUTHORIZATION, auth))
    }

    /// Execute a GET request and decode the JSON body.
    pub async fn get_json<T: DeserializeOwned>(
        &self,
        api: &str,
        query: &[(&str, &str)],
    ) -> Result<T> {
        let url = self.config.resolve_url(api)?;
        log::debug!("GET {}", url);

        let response = self
            .build_request(Method::GET, url, query)?
            .query(query)
            .send()
            .await
            .map_err(Error::Network)?;

        let text = self.handle_response(response).await?;
        serde_json::from_str(&text).map_err(Error::Json)
    }

    /// Execute a POST request with form data and decode the JSON body.
    pub async fn post_form_json<T: DeserializeOwned>(
        &self,
        api: &str,
        form: &[(&str, &str)],
    ) -> Result<T> {
        let url = self.config.resolve_url(api)?;
        log::debug!("POST {}", url);

        let response = self
            .build_request(Method::POST, url, form)?
            .form(form)
            .send()
            .await
            .map_err(Error::Network)?;

        let text = self.handle_response(response).await?;
        serde_json::from_str(&text).map_err(Error::Json)
    }

    /// Turn a response into its body text, mapping error statuses.
    async fn handle_response(&self, response: Response) -> Result<String> {
        let status = response.status();
        let text = response.text().await.map_err(Error::Network)?;

        if status.is_success() {
            return Ok(text);
        }

        Err(parse_error_body(&text).unwrap_or_else(|| {
            Error::api(
                status.as_u16().to_string(),
                status.canonical_reason().unwrap_or("Unknown error"),
            )
        }))
    }
}

#[derive(Deserialize)]
struct ErrorBody {
    errors: Vec<ErrorItem>,
}

#[derive(Deserialize)]
struct ErrorItem {
    code: i64,
    message: String,
}

/// Extract the first entry of the platform's error envelope.
fn parse_error_body(text: &str) -> Option<Error> {
    let body: ErrorBody = serde_json::from_str(text).ok()?;
    body.errors
        .into_iter()
        .next()
        .map(|e| Error::api(e.code.to_string(), e.message))
}
