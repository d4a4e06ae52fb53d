//! Site data models

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use crate::ogo::clusters::Cluster;
use crate::ogo::contracts::Contract;
use crate::ogo::models::null_as_default;
use crate::ogo::tls_options::TlsOptions;
use crate::ogo::traits::OgoResource;

/// Site protected by the dashboard, addressed by its domain name
#[derive(Serialize, Deserialize, Debug, Clone, Default, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Site {
    #[serde(default, deserialize_with = "null_as_default")]
    pub domain_name: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub cluster: Cluster,
    #[serde(default)]
    pub contract: Option<Contract>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub origin_server: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub origin_scheme: String,
    #[serde(default)]
    pub origin_port: Option<i32>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub origin_skip_cert_verify: bool,
    #[serde(default, deserialize_with = "null_as_default")]
    pub origin_mtls_enabled: bool,
    #[serde(default, deserialize_with = "null_as_default")]
    pub remove_x_forwarded: bool,
    #[serde(default, deserialize_with = "null_as_default")]
    pub log_export_enabled: bool,
    #[serde(default, deserialize_with = "null_as_default")]
    pub cache_enabled: bool,
    #[serde(default, deserialize_with = "null_as_default")]
    pub status: String,
    #[serde(default)]
    pub active_customer_certificate: Option<ActiveCustomerCertificate>,
    #[serde(default)]
    pub cdn: Option<String>,
    #[serde(default)]
    pub cdn_status: Option<String>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub force_https: bool,
    #[serde(default, deserialize_with = "null_as_default")]
    pub audit_mode: bool,
    #[serde(default, deserialize_with = "null_as_default")]
    pub passthrough_mode: bool,
    #[serde(
        default,
        deserialize_with = "null_as_default",
        skip_serializing_if = "String::is_empty"
    )]
    pub hsts: String,
    #[serde(
        default,
        deserialize_with = "null_as_default",
        skip_serializing_if = "String::is_empty"
    )]
    pub pass_tls_client_cert: String,
    #[serde(default)]
    pub tls_options: Option<TlsOptions>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub blacklisted_countries: Vec<String>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub brain_overrides: BTreeMap<String, f64>,
    #[serde(
        default,
        deserialize_with = "null_as_default",
        skip_serializing_if = "Vec::is_empty"
    )]
    pub ip_exceptions: Vec<IpException>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub url_exceptions: Vec<UrlException>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub rewrite_rules: Vec<RewriteRule>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub rules: Vec<Rule>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub tags: Vec<String>,
}

impl OgoResource for Site {
    fn id(&self) -> &str {
        &self.domain_name
    }

    fn name(&self) -> &str {
        &self.domain_name
    }
}

/// Path excluded from protection
#[derive(Serialize, Deserialize, Debug, Clone, Default, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct UrlException {
    #[serde(default, deserialize_with = "null_as_default")]
    pub path: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub comment: String,
}

/// Source address excluded from protection
#[derive(Serialize, Deserialize, Debug, Clone, Default, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct IpException {
    #[serde(default, deserialize_with = "null_as_default")]
    pub ip: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub comment: String,
}

/// URL rewrite applied before forwarding to the origin
#[derive(Serialize, Deserialize, Debug, Clone, Default, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct RewriteRule {
    #[serde(default, deserialize_with = "null_as_default")]
    pub active: bool,
    #[serde(default, deserialize_with = "null_as_default")]
    pub comment: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub rewrite_source: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub rewrite_destination: String,
}

/// Per-path protection rule
#[derive(Serialize, Deserialize, Debug, Clone, Default, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct Rule {
    #[serde(default, deserialize_with = "null_as_default")]
    pub active: bool,
    /// `brain` or `bypass`
    #[serde(default, deserialize_with = "null_as_default")]
    pub action: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub cache: bool,
    #[serde(default, deserialize_with = "null_as_default")]
    pub comment: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub paths: Vec<String>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub whitelisted_ips: Vec<String>,
}

/// PKCS#12 bundle, base64-encoded
#[derive(Serialize, Deserialize, Debug, Clone, Default, PartialEq, Eq)]
pub struct CertificateP12 {
    #[serde(default, deserialize_with = "null_as_default")]
    pub data: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub password: String,
}

/// Customer-supplied certificate currently served by a site
#[derive(Serialize, Deserialize, Debug, Clone, Default, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct ActiveCustomerCertificate {
    #[serde(default, deserialize_with = "null_as_default")]
    pub p12: CertificateP12,
    #[serde(default, deserialize_with = "null_as_default")]
    pub cn: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub expired_at: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub hash: String,
}

/// Certificate known for a site
#[derive(Serialize, Deserialize, Debug, Clone, Default, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct Certificate {
    #[serde(rename = "pid", default, deserialize_with = "null_as_default")]
    pub id: i32,
    #[serde(default, deserialize_with = "null_as_default")]
    pub active: bool,
    #[serde(default, deserialize_with = "null_as_default")]
    pub cn: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub csr: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub full_chain_cert: String,
    #[serde(rename = "type", default, deserialize_with = "null_as_default")]
    pub cert_type: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub created_at: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub expired_at: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub updated_at: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub error: String,
}
