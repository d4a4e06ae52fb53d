//! `ogo_shield_site` managed resource

use base64::{engine::general_purpose::STANDARD as BASE64, Engine};
use log::debug;
use serde::{Deserialize, Serialize};
use serde_json::json;
use std::collections::BTreeMap;
use std::sync::Arc;

use super::diagnostics::Diagnostics;
use super::schema::{Attribute, Schema};
use super::timestamp;
use super::traits::ManagedResource;
use crate::config::provider as names;
use crate::ogo::{
    ActiveCustomerCertificate, CertificateP12, Cluster, Contract, IpException, OgoClient,
    RewriteRule, Rule, Site, TlsOptions, UrlException,
};

const SITE_STATUSES: &[&str] = &[
    "CREATED",
    "DNS_ERROR",
    "ONLINE",
    "LE_CERT",
    "CUST_CERT",
    "LE_EXP",
    "CUST_EXP",
    "OFFLINE",
];

/// Site plan and state
#[derive(Serialize, Deserialize, Debug, Clone, Default, PartialEq)]
#[serde(default)]
pub struct SiteResourceModel {
    pub domain_name: String,
    pub cluster_uid: String,
    pub cluster_entrypoint_4: Option<String>,
    pub cluster_entrypoint_6: Option<String>,
    pub cluster_entrypoint_cdn: Option<String>,
    pub contract_number: Option<String>,
    pub origin_server: String,
    pub origin_scheme: String,
    pub origin_port: Option<i32>,
    pub origin_mtls_enabled: bool,
    pub origin_skip_cert_verify: bool,
    pub remove_xforwarded: bool,
    pub force_https: bool,
    pub audit_mode: bool,
    pub passthrough_mode: bool,
    pub hsts: String,
    pub log_export_enabled: bool,
    pub cache_enabled: bool,
    pub status: Option<String>,
    pub cdn: Option<String>,
    pub cdn_status: Option<String>,
    pub tlsoptions_uid: Option<String>,
    pub pass_tls_client_cert: String,
    pub active_customer_certificate: Option<CertificateModel>,
    pub blacklisted_countries: Vec<String>,
    pub brain_overrides: Option<BTreeMap<String, f64>>,
    pub ip_exceptions: Vec<IpExceptionModel>,
    pub rewrite_rules: Vec<RewriteRuleModel>,
    pub rules: Vec<RuleModel>,
    pub url_exceptions: Vec<UrlExceptionModel>,
    pub tags: Vec<String>,
    pub last_updated: Option<String>,
}

/// Customer certificate, uploaded as a P12/PFX bundle
#[derive(Serialize, Deserialize, Debug, Clone, Default, PartialEq, Eq)]
#[serde(default)]
pub struct CertificateModel {
    pub cn: Option<String>,
    pub expired_at: Option<String>,
    pub hash: Option<String>,
    pub p12_file: Option<String>,
    pub p12_content64: Option<String>,
    pub p12_password: String,
}

#[derive(Serialize, Deserialize, Debug, Clone, Default, PartialEq, Eq)]
#[serde(default)]
pub struct IpExceptionModel {
    pub ip: String,
    pub comment: String,
}

#[derive(Serialize, Deserialize, Debug, Clone, Default, PartialEq, Eq)]
#[serde(default)]
pub struct RewriteRuleModel {
    pub active: bool,
    pub comment: String,
    pub rewrite_source: String,
    pub rewrite_destination: String,
}

#[derive(Serialize, Deserialize, Debug, Clone, Default, PartialEq, Eq)]
#[serde(default)]
pub struct RuleModel {
    pub active: bool,
    pub action: String,
    pub cache: bool,
    pub comment: String,
    pub paths: Vec<String>,
    pub whitelisted_ips: Vec<String>,
}

#[derive(Serialize, Deserialize, Debug, Clone, Default, PartialEq, Eq)]
#[serde(default)]
pub struct UrlExceptionModel {
    pub path: String,
    pub comment: String,
}

/// Managed `ogo_shield_site` resource, imported by domain name
pub struct SiteResource {
    client: Arc<OgoClient>,
}

impl ManagedResource for SiteResource {
    type Model = SiteResourceModel;

    const TYPE_NAME: &'static str = names::SITE;

    fn new(client: Arc<OgoClient>) -> Self {
        Self { client }
    }

    fn schema() -> Schema {
        site_schema()
    }

    fn import_model(id: &str) -> SiteResourceModel {
        SiteResourceModel {
            domain_name: id.to_string(),
            ..Default::default()
        }
    }

    async fn create(&self, mut plan: SiteResourceModel) -> Result<SiteResourceModel, Diagnostics> {
        debug!("Creating site '{}'", plan.domain_name);
        let site = site_from_plan(&plan)?;

        let created = self.client.create_site(&site).await.map_err(|e| {
            Diagnostics::from_error(
                "Error creating site",
                "Could not create site, unexpected error: ",
                &e,
            )
        })?;

        apply_computed(&mut plan, &created);
        debug!("Created site '{}' ({})", plan.domain_name, created.status);
        Ok(plan)
    }

    async fn read(&self, mut state: SiteResourceModel) -> Result<SiteResourceModel, Diagnostics> {
        debug!("Reading site '{}'", state.domain_name);
        let site = self.client.get_site(&state.domain_name).await.map_err(|e| {
            Diagnostics::error(
                "Error reading Ogo site",
                format!(
                    "Could not read Ogo site domain name {}: {}",
                    state.domain_name, e
                ),
            )
        })?;

        refresh_state(&mut state, &site);
        Ok(state)
    }

    async fn update(&self, mut plan: SiteResourceModel) -> Result<SiteResourceModel, Diagnostics> {
        debug!("Updating site '{}'", plan.domain_name);
        let site = site_from_plan(&plan)?;

        let updated = self.client.update_site(&site).await.map_err(|e| {
            Diagnostics::from_error(
                "Error updating site",
                "Could not update site, unexpected error: ",
                &e,
            )
        })?;

        apply_computed(&mut plan, &updated);
        Ok(plan)
    }

    async fn delete(&self, state: SiteResourceModel) -> Result<(), Diagnostics> {
        debug!("Deleting site '{}'", state.domain_name);
        self.client
            .delete_site(&state.domain_name)
            .await
            .map_err(|e| {
                Diagnostics::from_error(
                    "Error deleting Ogo Site",
                    "Could not delete site, unexpected error: ",
                    &e,
                )
            })
    }
}

fn site_schema() -> Schema {
    Schema::new(
        "Create, update and delete sites protected by Ogo Shield.",
        vec![
            Attribute::string("domain_name")
                .required()
                .requires_replace()
                .describe("DNS domain name of the site."),
            Attribute::string("cluster_uid")
                .required()
                .requires_replace()
                .describe("UID of the cluster serving the site, see the ogo_shield_clusters data source."),
            Attribute::string("cluster_entrypoint_4")
                .computed()
                .describe("IPv4 entrypoint for the site DNS record."),
            Attribute::string("cluster_entrypoint_6")
                .computed()
                .describe("IPv6 entrypoint for the site DNS record."),
            Attribute::string("cluster_entrypoint_cdn")
                .computed()
                .describe("CDN entrypoint for the site DNS record."),
            Attribute::string("contract_number")
                .optional()
                .requires_replace()
                .describe("Contract the site is attached to, needed only when several contracts exist."),
            Attribute::string("origin_server")
                .required()
                .describe("Origin server address (IP address or domain name)."),
            Attribute::string("origin_scheme")
                .default("https")
                .one_of(&["http", "https"])
                .describe("Scheme used to reach the origin server."),
            Attribute::int32("origin_port")
                .optional()
                .between(1, 65535)
                .describe("Origin port, only when it differs from the scheme's standard port."),
            Attribute::bool("origin_mtls_enabled")
                .default(false)
                .describe("Use mTLS between Ogo and the origin server."),
            Attribute::bool("origin_skip_cert_verify")
                .default(false)
                .describe("Skip origin certificate verification."),
            Attribute::bool("remove_xforwarded")
                .default(false)
                .describe("Remove X-Forwarded-* headers."),
            Attribute::bool("force_https")
                .default(false)
                .describe("Redirect HTTP requests to HTTPS."),
            Attribute::bool("audit_mode")
                .default(false)
                .describe("Analyze requests without ever blocking them."),
            Attribute::bool("passthrough_mode")
                .default(false)
                .describe("Neither analyze nor block requests."),
            Attribute::string("hsts")
                .default("hsts")
                .one_of(&["hsts", "hstss", "hstssp", "none"])
                .describe("HSTS policy."),
            Attribute::bool("log_export_enabled")
                .default(false)
                .describe("Export the site's logs."),
            Attribute::bool("cache_enabled")
                .default(false)
                .describe("Enable caching when the cluster supports it."),
            Attribute::string("status")
                .computed()
                .one_of(SITE_STATUSES)
                .describe("Site status."),
            Attribute::string("cdn")
                .optional()
                .one_of(&["ORANGE"])
                .describe("CDN serving the site, when the cluster supports one."),
            Attribute::string("cdn_status")
                .computed()
                .one_of(&["ACTIVE", "ACTIVATION_IN_PROGRESS", "SYNC_IN_PROGRESS"])
                .describe("CDN status."),
            Attribute::string("tlsoptions_uid")
                .optional()
                .describe("UID of the TLS options applied to the site."),
            Attribute::string("pass_tls_client_cert")
                .default("info")
                .one_of(&["all", "cert", "info", "none"])
                .describe("Client certificate information forwarded to the origin."),
            Attribute::single_nested(
                "active_customer_certificate",
                vec![
                    Attribute::string("cn").computed(),
                    Attribute::string("expired_at").computed(),
                    Attribute::string("hash").optional().computed(),
                    Attribute::string("p12_file")
                        .optional()
                        .describe("Path of a P12/PFX file, conflicts with p12_content64."),
                    Attribute::string("p12_content64")
                        .optional()
                        .describe("Base64 P12/PFX content, conflicts with p12_file."),
                    Attribute::string("p12_password").required().sensitive(),
                ],
            )
            .optional()
            .describe("P12/PFX certificate served by the site."),
            Attribute::string_set("blacklisted_countries").default(json!([])),
            Attribute::float64_map("brain_overrides")
                .optional()
                .computed()
                .describe("Brain parameter overrides."),
            Attribute::set_nested(
                "ip_exceptions",
                vec![
                    Attribute::string("ip").required(),
                    Attribute::string("comment").optional(),
                ],
            )
            .default(json!([]))
            .describe("Addresses whose requests are never blocked."),
            Attribute::list_nested(
                "rewrite_rules",
                vec![
                    Attribute::bool("active").default(true),
                    Attribute::string("comment").optional(),
                    Attribute::string("rewrite_source").required(),
                    Attribute::string("rewrite_destination").required(),
                ],
            )
            .default(json!([]))
            .describe("Path rewrites, applied in order."),
            Attribute::list_nested(
                "rules",
                vec![
                    Attribute::bool("active").default(true),
                    Attribute::string("action")
                        .default("brain")
                        .one_of(&["brain", "bypass"]),
                    Attribute::bool("cache").default(false),
                    Attribute::string("comment").optional(),
                    Attribute::string_set("paths").required(),
                    Attribute::string_set("whitelisted_ips").required(),
                ],
            )
            .default(json!([]))
            .describe("URL access rules; the first matching rule wins."),
            Attribute::set_nested(
                "url_exceptions",
                vec![
                    Attribute::string("path").required(),
                    Attribute::string("comment").optional(),
                ],
            )
            .default(json!([]))
            .describe("URL patterns whose requests are never blocked."),
            Attribute::string_set("tags").default(json!([])),
            Attribute::string("last_updated").computed(),
        ],
    )
}

fn non_empty(value: &Option<String>) -> Option<&str> {
    value.as_deref().filter(|v| !v.is_empty())
}

/// Wire representation of a plan
fn site_from_plan(plan: &SiteResourceModel) -> Result<Site, Diagnostics> {
    let mut site = Site {
        domain_name: plan.domain_name.clone(),
        cluster: Cluster::reference(plan.cluster_uid.as_str()),
        origin_server: plan.origin_server.clone(),
        origin_scheme: plan.origin_scheme.clone(),
        origin_port: plan.origin_port,
        origin_skip_cert_verify: plan.origin_skip_cert_verify,
        origin_mtls_enabled: plan.origin_mtls_enabled,
        remove_x_forwarded: plan.remove_xforwarded,
        log_export_enabled: plan.log_export_enabled,
        cache_enabled: plan.cache_enabled,
        cdn: non_empty(&plan.cdn).map(str::to_string),
        force_https: plan.force_https,
        audit_mode: plan.audit_mode,
        passthrough_mode: plan.passthrough_mode,
        hsts: plan.hsts.clone(),
        pass_tls_client_cert: plan.pass_tls_client_cert.clone(),
        blacklisted_countries: plan.blacklisted_countries.clone(),
        brain_overrides: plan.brain_overrides.clone().unwrap_or_default(),
        ip_exceptions: plan
            .ip_exceptions
            .iter()
            .map(|e| IpException {
                ip: e.ip.clone(),
                comment: e.comment.clone(),
            })
            .collect(),
        url_exceptions: plan
            .url_exceptions
            .iter()
            .map(|e| UrlException {
                path: e.path.clone(),
                comment: e.comment.clone(),
            })
            .collect(),
        rewrite_rules: plan
            .rewrite_rules
            .iter()
            .map(|r| RewriteRule {
                active: r.active,
                comment: r.comment.clone(),
                rewrite_source: r.rewrite_source.clone(),
                rewrite_destination: r.rewrite_destination.clone(),
            })
            .collect(),
        rules: plan
            .rules
            .iter()
            .map(|r| Rule {
                active: r.active,
                action: r.action.clone(),
                cache: r.cache,
                comment: r.comment.clone(),
                paths: r.paths.clone(),
                whitelisted_ips: r.whitelisted_ips.clone(),
            })
            .collect(),
        tags: plan.tags.clone(),
        ..Default::default()
    };

    if let Some(number) = non_empty(&plan.contract_number) {
        site.contract = Some(Contract::reference(number));
    }
    if let Some(uid) = non_empty(&plan.tlsoptions_uid) {
        site.tls_options = Some(TlsOptions::reference(uid));
    }
    if let Some(certificate) = &plan.active_customer_certificate {
        site.active_customer_certificate = Some(certificate_upload(certificate)?);
    }

    Ok(site)
}

fn certificate_upload(certificate: &CertificateModel) -> Result<ActiveCustomerCertificate, Diagnostics> {
    let data = match (
        non_empty(&certificate.p12_file),
        non_empty(&certificate.p12_content64),
    ) {
        (Some(_), Some(_)) => {
            let mut diags = Diagnostics::new();
            diags.add_attribute_error(
                "active_customer_certificate",
                "attribute conflicts in active_customer_certificate",
                "p12_file and p12_content64 attribute can't be used at same time",
            );
            return Err(diags);
        }
        (Some(path), None) => {
            debug!("Reading P12/PFX file {}", path);
            let content = std::fs::read(path).map_err(|e| {
                Diagnostics::error(
                    "failed to read P12/PFX file",
                    format!("Could not read P12/PFX file, unexpected error: {}", e),
                )
            })?;
            BASE64.encode(content)
        }
        (None, Some(content)) => content.to_string(),
        (None, None) => String::new(),
    };

    Ok(ActiveCustomerCertificate {
        p12: CertificateP12 {
            data,
            password: certificate.p12_password.clone(),
        },
        ..Default::default()
    })
}

/// Fill computed attributes from a create or update answer
fn apply_computed(plan: &mut SiteResourceModel, site: &Site) {
    plan.cluster_entrypoint_4 = Some(site.cluster.entrypoint4.clone());
    plan.cluster_entrypoint_6 = Some(site.cluster.entrypoint6.clone());

    if let Some(certificate) = plan.active_customer_certificate.as_mut() {
        let remote = site
            .active_customer_certificate
            .clone()
            .unwrap_or_default();
        certificate.cn = Some(remote.cn);
        certificate.expired_at = Some(remote.expired_at);
        certificate.hash = Some(remote.hash);
    }

    if plan.cdn.is_some() {
        plan.cluster_entrypoint_cdn = Some(site.cluster.entrypoint_cdn.clone());
        plan.cdn_status = site.cdn_status.clone();
    }
    if plan.brain_overrides.is_none() {
        plan.brain_overrides = Some(site.brain_overrides.clone());
    }

    plan.status = Some(site.status.clone());
    plan.last_updated = Some(timestamp());
}

/// Overwrite every remote-backed attribute of `state`
fn refresh_state(state: &mut SiteResourceModel, site: &Site) {
    state.cluster_uid = site.cluster.cluster_id.clone();
    state.cluster_entrypoint_4 = Some(site.cluster.entrypoint4.clone());
    state.cluster_entrypoint_6 = Some(site.cluster.entrypoint6.clone());
    state.cluster_entrypoint_cdn = Some(site.cluster.entrypoint_cdn.clone());
    state.origin_server = site.origin_server.clone();
    state.origin_scheme = site.origin_scheme.clone();
    state.origin_port = site.origin_port;
    state.origin_mtls_enabled = site.origin_mtls_enabled;
    state.origin_skip_cert_verify = site.origin_skip_cert_verify;
    state.remove_xforwarded = site.remove_x_forwarded;
    state.force_https = site.force_https;
    state.audit_mode = site.audit_mode;
    state.passthrough_mode = site.passthrough_mode;
    state.hsts = site.hsts.clone();
    state.log_export_enabled = site.log_export_enabled;
    state.cache_enabled = site.cache_enabled;
    state.status = Some(site.status.clone());
    state.pass_tls_client_cert = site.pass_tls_client_cert.clone();

    // Certificate replaced remotely: blank the source that was set.
    if let Some(certificate) = state.active_customer_certificate.as_mut() {
        let remote_hash = site
            .active_customer_certificate
            .as_ref()
            .map(|c| c.hash.as_str())
            .unwrap_or_default();
        if certificate.hash.as_deref().unwrap_or_default() != remote_hash {
            debug!("Certificate hash of '{}' changed remotely", state.domain_name);
            if non_empty(&certificate.p12_file).is_some() {
                certificate.p12_file = Some(String::new());
            } else if non_empty(&certificate.p12_content64).is_some() {
                certificate.p12_content64 = Some(String::new());
            }
        }
    }

    state.brain_overrides = Some(site.brain_overrides.clone());

    if let Some(cdn) = &site.cdn {
        state.cdn = Some(cdn.clone());
        state.cdn_status = site.cdn_status.clone();
        state.cluster_entrypoint_cdn = Some(site.cluster.entrypoint_cdn.clone());
    }
    if let Some(contract) = site.contract.as_ref().filter(|c| !c.number.is_empty()) {
        state.contract_number = Some(contract.number.clone());
    }
    if let Some(tls_options) = &site.tls_options {
        state.tlsoptions_uid = Some(tls_options.uid.clone());
    }

    state.blacklisted_countries = site.blacklisted_countries.clone();
    state.ip_exceptions = site
        .ip_exceptions
        .iter()
        .map(|e| IpExceptionModel {
            ip: e.ip.clone(),
            comment: e.comment.clone(),
        })
        .collect();
    state.url_exceptions = site
        .url_exceptions
        .iter()
        .map(|e| UrlExceptionModel {
            path: e.path.clone(),
            comment: e.comment.clone(),
        })
        .collect();
    state.rewrite_rules = site
        .rewrite_rules
        .iter()
        .map(|r| RewriteRuleModel {
            active: r.active,
            comment: r.comment.clone(),
            rewrite_source: r.rewrite_source.clone(),
            rewrite_destination: r.rewrite_destination.clone(),
        })
        .collect();
    state.rules = site
        .rules
        .iter()
        .map(|r| RuleModel {
            active: r.active,
            action: r.action.clone(),
            cache: r.cache,
            comment: r.comment.clone(),
            paths: r.paths.clone(),
            whitelisted_ips: r.whitelisted_ips.clone(),
        })
        .collect();
    state.tags = site.tags.clone();
}
