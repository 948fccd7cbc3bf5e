//! Credentials and OAuth 1.0a request signing.

use base64::{engine::general_purpose::STANDARD, Engine as _};
use hmac::{Hmac, Mac};
use percent_encoding::{utf8_percent_encode, AsciiSet, NON_ALPHANUMERIC};
use rand::{distr::Alphanumeric, Rng};
use sha1::Sha1;
use url::Url;

use crate::error::{Error, Result};

type HmacSha1 = Hmac<Sha1>;

/// RFC 3986 unreserved characters stay literal, everything else is encoded.
const OAUTH_ENCODE_SET: &AsciiSet = &NON_ALPHANUMERIC
    .remove(b'-')
    .remove(b'.')
    .remove(b'_')
    .remove(b'~');

/// Percent-encode a string the way OAuth 1.0a requires.
pub fn oauth_encode(s: &str) -> String {
    utf8_percent_encode(s, OAUTH_ENCODE_SET).to_string()
}

/// Platform credentials: consumer (app) key pair and user access token pair.
#[derive(Clone)]
pub struct Credentials {
    /// Consumer (API) key.
    pub consumer_key: String,
    /// Consumer (API) secret.
    pub consumer_secret: String,
    /// User access token.
    pub access_token: String,
    /// User access token secret.
    pub access_token_secret: String,
}

impl std::fmt::Debug for Credentials {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Credentials")
            .field("consumer_key", &self.consumer_key)
            .field("access_token", &self.access_token)
            .finish_non_exhaustive()
    }
}

impl Credentials {
    /// Create new credentials.
    pub fn new(
        consumer_key: impl Into<String>,
        consumer_secret: impl Into<String>,
        access_token: impl Into<String>,
        access_token_secret: impl Into<String>,
    ) -> Self {
        Self {
            consumer_key: consumer_key.into(),
            consumer_secret: consumer_secret.into(),
            access_token: access_token.into(),
            access_token_secret: access_token_secret.into(),
        }
    }

    /// Check if all four parts are present.
    pub fn is_valid(&self) -> bool {
        [
            &self.consumer_key,
            &self.consumer_secret,
            &self.access_token,
            &self.access_token_secret,
        ]
        .iter()
        .all(|s| !s.trim().is_empty())
    }

    /// The user ID prefix of the access token, if it has one.
    ///
    /// User access tokens are issued as `<user id>-<random>`.
    pub fn token_user_id(&self) -> Option<&str> {
        let (uid, rest) = self.access_token.split_once('-')?;
        if uid.is_empty() || rest.is_empty() || !uid.bytes().all(|b| b.is_ascii_digit()) {
            return None;
        }
        Some(uid)
    }

    /// Build the `Authorization` header for a request with a fresh nonce.
    ///
    /// `params` must contain every query and form parameter the request
    /// carries.
    pub fn authorization_header(
        &self,
        method: &str,
        url: &Url,
        params: &[(&str, &str)],
    ) -> Result<String> {
        let nonce: String = rand::rng()
            .sample_iter(&Alphanumeric)
            .take(32)
            .map(char::from)
            .collect();
        let timestamp = chrono::Utc::now().timestamp();
        self.sign(method, url, params, &nonce, timestamp)
    }

    /// Build the `Authorization` header with a fixed nonce and timestamp.
    pub fn sign(
        &self,
        method: &str,
        url: &Url,
        params: &[(&str, &str)],
        nonce: &str,
        timestamp: i64,
    ) -> Result<String> {
        let timestamp = timestamp.to_string();
        let mut oauth: Vec<(&str, &str)> = vec![
            ("oauth_consumer_key", self.consumer_key.as_str()),
            ("oauth_nonce", nonce),
            ("oauth_signature_method", "HMAC-SHA1"),
            ("oauth_timestamp", timestamp.as_str()),
            ("oauth_token", self.access_token.as_str()),
            ("oauth_version", "1.0"),
        ];

        let base = signature_base_string(method, url, params.iter().chain(oauth.iter()));
        let signature = self.signature(&base)?;

        oauth.push(("oauth_signature", signature.as_str()));
        oauth.sort();

        let fields: Vec<String> = oauth
            .iter()
            .map(|(k, v)| format!("{}=\"{}\"", oauth_encode(k), oauth_encode(v)))
            .collect();

        Ok(format!("OAuth {}", fields.join(", ")))
    }

    fn signature(&self, base: &str) -> Result<String> {
        let key = format!(
            "{}&{}",
            oauth_encode(&self.consumer_secret),
            oauth_encode(&self.access_token_secret)
        );
        let mut mac = HmacSha1::new_from_slice(key.as_bytes())
            .map_err(|e| Error::Internal(format!("HMAC key: {}", e)))?;
        mac.update(base.as_bytes());
        Ok(STANDARD.encode(mac.finalize().into_bytes()))
    }
}

/// Build the OAuth signature base string.
///
/// Parameters are encoded first and then sorted by key, ties broken by value.
pub fn signature_base_string<'a>(
    method: &str,
    url: &Url,
    params: impl Iterator<Item = &'a (&'a str, &'a str)>,
) -> String {
    let mut base_url = url.clone();
    base_url.set_query(None);
    base_url.set_fragment(None);

    let mut encoded: Vec<(String, String)> = params
        .map(|(k, v)| (oauth_encode(k), oauth_encode(v)))
        .collect();
    encoded.sort();

    let param_string = encoded
        .iter()
        .map(|(k, v)| format!("{}={}", k, v))
        .collect::<Vec<_>>()
        .join("&");

    format!(
        "{}&{}&{}",
        method.to_ascii_uppercase(),
        oauth_encode(base_url.as_str()),
        oauth_encode(&param_string)
    )
}
