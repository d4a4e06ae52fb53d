//! Request authentication
//!
//! The dashboard accepts three ways of authenticating a request. The default
//! signs every request with a per-path token derived from the API key, so the
//! key itself never travels over the wire.

use clap::ValueEnum;
use md5::{Digest, Md5};
use reqwest::header::{HeaderValue, CONTENT_TYPE};
use reqwest::Request;
use std::str::FromStr;

use crate::config::headers;
use crate::error::{OgoError, Result};

/// How requests are authenticated
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum AuthScheme {
    /// `X-Ogo-Auth: <email>;<md5(path-apikey)>` (default)
    #[default]
    Signed,
    /// `X-Ogo-Api-Key: <apikey>`
    ApiKey,
    /// `?token=<md5(path-apikey)>` query parameter
    Query,
}

impl std::fmt::Display for AuthScheme {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            AuthScheme::Signed => write!(f, "signed"),
            AuthScheme::ApiKey => write!(f, "api-key"),
            AuthScheme::Query => write!(f, "query"),
        }
    }
}

impl FromStr for AuthScheme {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "signed" | "auth" => Ok(AuthScheme::Signed),
            "api-key" | "apikey" | "api_key" => Ok(AuthScheme::ApiKey),
            "query" | "token" => Ok(AuthScheme::Query),
            other => Err(format!(
                "unknown auth scheme '{}' (expected signed, api-key or query)",
                other
            )),
        }
    }
}

/// Derive the per-path token: hex MD5 of `<path>-<apikey>`
pub fn path_token(path: &str, apikey: &str) -> String {
    let mut hasher = Md5::new();
    hasher.update(path.as_bytes());
    hasher.update(b"-");
    hasher.update(apikey.as_bytes());
    format!("{:x}", hasher.finalize())
}

impl AuthScheme {
    /// Attach content type and credentials to a built request
    pub(crate) fn apply(&self, request: &mut Request, email: &str, apikey: &str) -> Result<()> {
        request
            .headers_mut()
            .entry(CONTENT_TYPE)
            .or_insert(HeaderValue::from_static(headers::CONTENT_TYPE));

        match self {
            AuthScheme::Signed => {
                let token = path_token(request.url().path(), apikey);
                let value = header_value(&format!("{};{}", email, token))?;
                request.headers_mut().insert(headers::AUTH, value);
            }
            AuthScheme::ApiKey => {
                let value = header_value(apikey)?;
                request.headers_mut().insert(headers::API_KEY, value);
            }
            AuthScheme::Query => {
                let token = path_token(request.url().path(), apikey);
                request
                    .url_mut()
                    .query_pairs_mut()
                    .append_pair(headers::TOKEN_QUERY, &token);
            }
        }
        Ok(())
    }
}

fn header_value(value: &str) -> Result<HeaderValue> {
    let mut value = HeaderValue::from_str(value).map_err(|_| {
        OgoError::Config("credentials contain characters not allowed in HTTP headers".to_string())
    })?;
    value.set_sensitive(true);
    Ok(value)
}
