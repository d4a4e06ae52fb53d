//! TLS options data models

use serde::{Deserialize, Serialize};

use crate::ogo::models::null_as_default;
use crate::ogo::traits::OgoResource;

/// Reusable TLS settings bundle that sites can reference by `uid`
///
/// Every field is omitted from the wire when empty, so a bare `{uid}` works
/// as a reference from a site.
#[derive(Serialize, Deserialize, Debug, Clone, Default, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct TlsOptions {
    #[serde(
        default,
        deserialize_with = "null_as_default",
        skip_serializing_if = "String::is_empty"
    )]
    pub uid: String,
    #[serde(
        default,
        deserialize_with = "null_as_default",
        skip_serializing_if = "String::is_empty"
    )]
    pub name: String,
    #[serde(
        default,
        deserialize_with = "null_as_default",
        skip_serializing_if = "String::is_empty"
    )]
    pub client_auth_type: String,
    #[serde(
        default,
        deserialize_with = "null_as_default",
        skip_serializing_if = "Vec::is_empty"
    )]
    pub client_auth_ca_certs: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub min_tls_version: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max_tls_version: Option<String>,
}

impl TlsOptions {
    /// Reference to a TLS options bundle by uid only
    pub fn reference(uid: impl Into<String>) -> Self {
        Self {
            uid: uid.into(),
            ..Default::default()
        }
    }
}

impl OgoResource for TlsOptions {
    fn id(&self) -> &str {
        &self.uid
    }

    fn name(&self) -> &str {
        &self.name
    }
}
