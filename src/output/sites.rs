//! Site and certificate output formatters

use super::common::{escape_csv, join_list, print_json, print_yaml};
use crate::cli::OutputFormat;
use crate::ogo::{Certificate, Site};
use comfy_table::{presets::NOTHING, Table};
use serde::Serialize;

/// Serializable site summary for structured output (JSON/YAML)
#[derive(Serialize)]
struct SerializableSite {
    domain_name: String,
    cluster_uid: String,
    cluster_name: String,
    origin: String,
    status: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    cdn: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    contract_number: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    tlsoptions_uid: Option<String>,
    tags: Vec<String>,
}

impl From<&Site> for SerializableSite {
    fn from(site: &Site) -> Self {
        Self {
            domain_name: site.domain_name.clone(),
            cluster_uid: site.cluster.cluster_id.clone(),
            cluster_name: site.cluster.name.clone(),
            origin: origin(site),
            status: site.status.clone(),
            cdn: site.cdn.clone(),
            contract_number: site.contract.as_ref().map(|c| c.number.clone()),
            tlsoptions_uid: site.tls_options.as_ref().map(|t| t.uid.clone()),
            tags: site.tags.clone(),
        }
    }
}

/// `scheme://server[:port]`
fn origin(site: &Site) -> String {
    match site.origin_port {
        Some(port) => format!("{}://{}:{}", site.origin_scheme, site.origin_server, port),
        None => format!("{}://{}", site.origin_scheme, site.origin_server),
    }
}

/// Output sites in the specified format
pub fn output_sites(sites: &[Site], format: &OutputFormat, no_header: bool) {
    match format {
        OutputFormat::Table => output_sites_table(sites, no_header),
        OutputFormat::Csv => output_sites_csv(sites, no_header),
        OutputFormat::Json | OutputFormat::Yaml => {
            let data: Vec<SerializableSite> = sites.iter().map(SerializableSite::from).collect();
            if *format == OutputFormat::Json {
                print_json(&data);
            } else {
                print_yaml(&data);
            }
        }
    }
}

fn output_sites_table(sites: &[Site], no_header: bool) {
    let mut table = Table::new();
    table.load_preset(NOTHING);
    if !no_header {
        table.set_header(vec!["Domain", "Cluster", "Origin", "Status", "CDN", "Tags"]);
    }

    for site in sites {
        table.add_row(vec![
            site.domain_name.clone(),
            site.cluster.name.clone(),
            origin(site),
            site.status.clone(),
            site.cdn.clone().unwrap_or_default(),
            join_list(&site.tags, ", "),
        ]);
    }

    println!();
    println!("{table}");
    if !no_header {
        println!("\nTotal: {} site(s)", sites.len());
    }
}

fn output_sites_csv(sites: &[Site], no_header: bool) {
    if !no_header {
        println!("domain_name,cluster_uid,origin,status,cdn,contract_number,tlsoptions_uid,tags");
    }
    for site in sites {
        let row = SerializableSite::from(site);
        println!(
            "{},{},{},{},{},{},{},{}",
            escape_csv(&row.domain_name),
            escape_csv(&row.cluster_uid),
            escape_csv(&row.origin),
            escape_csv(&row.status),
            escape_csv(row.cdn.as_deref().unwrap_or("")),
            escape_csv(row.contract_number.as_deref().unwrap_or("")),
            escape_csv(row.tlsoptions_uid.as_deref().unwrap_or("")),
            escape_csv(&join_list(&row.tags, ";"))
        );
    }
}

/// Serializable certificate (CSR and chain omitted from table/CSV only)
#[derive(Serialize)]
struct SerializableCertificate {
    id: i32,
    active: bool,
    cn: String,
    #[serde(rename = "type")]
    cert_type: String,
    created_at: String,
    expired_at: String,
    updated_at: String,
    #[serde(skip_serializing_if = "String::is_empty")]
    error: String,
    #[serde(skip_serializing_if = "String::is_empty")]
    full_chain_cert: String,
}

impl From<&Certificate> for SerializableCertificate {
    fn from(cert: &Certificate) -> Self {
        Self {
            id: cert.id,
            active: cert.active,
            cn: cert.cn.clone(),
            cert_type: cert.cert_type.clone(),
            created_at: cert.created_at.clone(),
            expired_at: cert.expired_at.clone(),
            updated_at: cert.updated_at.clone(),
            error: cert.error.clone(),
            full_chain_cert: cert.full_chain_cert.clone(),
        }
    }
}

/// Output site certificates in the specified format
pub fn output_certificates(certs: &[Certificate], format: &OutputFormat, no_header: bool) {
    match format {
        OutputFormat::Table => {
            let mut table = Table::new();
            table.load_preset(NOTHING);
            if !no_header {
                table.set_header(vec!["ID", "Active", "CN", "Type", "Expires", "Error"]);
            }
            for cert in certs {
                table.add_row(vec![
                    cert.id.to_string(),
                    if cert.active { "*" } else { "" }.to_string(),
                    cert.cn.clone(),
                    cert.cert_type.clone(),
                    cert.expired_at.clone(),
                    cert.error.clone(),
                ]);
            }
            println!();
            println!("{table}");
            if !no_header {
                println!("\nTotal: {} certificate(s)", certs.len());
            }
        }
        OutputFormat::Csv => {
            if !no_header {
                println!("id,active,cn,type,created_at,expired_at,updated_at,error");
            }
            for cert in certs {
                println!(
                    "{},{},{},{},{},{},{},{}",
                    cert.id,
                    cert.active,
                    escape_csv(&cert.cn),
                    escape_csv(&cert.cert_type),
                    escape_csv(&cert.created_at),
                    escape_csv(&cert.expired_at),
                    escape_csv(&cert.updated_at),
                    escape_csv(&cert.error)
                );
            }
        }
        OutputFormat::Json => {
            let data: Vec<SerializableCertificate> = certs.iter().map(|c| c.into()).collect();
            print_json(&data);
        }
        OutputFormat::Yaml => {
            let data: Vec<SerializableCertificate> = certs.iter().map(|c| c.into()).collect();
            print_yaml(&data);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ogo::{Cluster, Contract};

    fn site() -> Site {
        Site {
            domain_name: "www.example.com".to_string(),
            cluster: Cluster {
                name: "eu-west".to_string(),
                ..Cluster::reference("c-1")
            },
            contract: Some(Contract::reference("CT-42")),
            origin_server: "origin.example.com".to_string(),
            origin_scheme: "https".to_string(),
            origin_port: Some(8443),
            status: "ONLINE".to_string(),
            tags: vec!["prod".to_string(), "eu".to_string()],
            ..Default::default()
        }
    }

    #[test]
    fn test_origin() {
        let mut s = site();
        assert_eq!(origin(&s), "https://origin.example.com:8443");
        s.origin_port = None;
        assert_eq!(origin(&s), "https://origin.example.com");
    }

    #[test]
    fn test_serializable_site() {
        let row = SerializableSite::from(&site());
        assert_eq!(row.cluster_uid, "c-1");
        assert_eq!(row.contract_number.as_deref(), Some("CT-42"));
        assert!(row.tlsoptions_uid.is_none());

        let json = serde_json::to_value(&row).unwrap();
        assert!(json.get("cdn").is_none());
        assert_eq!(json["tags"], serde_json::json!(["prod", "eu"]));
    }

    #[test]
    fn test_output_sites_all_formats() {
        let sites = vec![site()];
        for format in [
            OutputFormat::Table,
            OutputFormat::Csv,
            OutputFormat::Json,
            OutputFormat::Yaml,
        ] {
            output_sites(&sites, &format, false);
        }
        output_sites(&[], &OutputFormat::Table, true);
    }

    #[test]
    fn test_output_certificates_all_formats() {
        let certs = vec![Certificate {
            id: 7,
            active: true,
            cn: "www.example.com".to_string(),
            cert_type: "LE".to_string(),
            ..Default::default()
        }];
        for format in [
            OutputFormat::Table,
            OutputFormat::Csv,
            OutputFormat::Json,
            OutputFormat::Yaml,
        ] {
            output_certificates(&certs, &format, false);
        }
    }
}
