//! TLS options output formatter

use super::common::{escape_csv, print_json, print_yaml};
use crate::cli::OutputFormat;
use crate::provider::tls_options::TlsOptionsItem;
use comfy_table::{presets::NOTHING, Table};

/// Output TLS options in the specified format
///
/// CA certificates are counted in table and CSV output; JSON and YAML carry
/// the full PEM blocks.
pub fn output_tls_options(options: &[TlsOptionsItem], format: &OutputFormat, no_header: bool) {
    match format {
        OutputFormat::Table => output_table(options, no_header),
        OutputFormat::Csv => output_csv(options, no_header),
        OutputFormat::Json => print_json(options),
        OutputFormat::Yaml => print_yaml(options),
    }
}

fn output_table(options: &[TlsOptionsItem], no_header: bool) {
    let mut table = Table::new();
    table.load_preset(NOTHING);
    if !no_header {
        table.set_header(vec![
            "Name",
            "UID",
            "Client Auth",
            "CA Certs",
            "Min TLS",
            "Max TLS",
        ]);
    }

    for item in options {
        table.add_row(vec![
            item.name.clone(),
            item.uid.clone(),
            item.client_auth_type.clone(),
            item.client_auth_ca_certs.len().to_string(),
            item.min_tls_version.clone().unwrap_or_default(),
            item.max_tls_version.clone().unwrap_or_default(),
        ]);
    }

    println!();
    println!("{table}");
    if !no_header {
        println!("\nTotal: {} TLS options", options.len());
    }
}

fn output_csv(options: &[TlsOptionsItem], no_header: bool) {
    if !no_header {
        println!("name,uid,client_auth_type,client_auth_ca_certs,min_tls_version,max_tls_version");
    }
    for item in options {
        println!(
            "{},{},{},{},{},{}",
            escape_csv(&item.name),
            escape_csv(&item.uid),
            escape_csv(&item.client_auth_type),
            item.client_auth_ca_certs.len(),
            escape_csv(item.min_tls_version.as_deref().unwrap_or("")),
            escape_csv(item.max_tls_version.as_deref().unwrap_or(""))
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_output_all_formats() {
        let options = vec![TlsOptionsItem {
            uid: "t-1".to_string(),
            name: "strict".to_string(),
            client_auth_type: "RequireAndVerifyClientCert".to_string(),
            client_auth_ca_certs: vec!["-----BEGIN CERTIFICATE-----".to_string()],
            min_tls_version: Some("TLS_1.3".to_string()),
            max_tls_version: None,
        }];
        for format in [
            OutputFormat::Table,
            OutputFormat::Csv,
            OutputFormat::Json,
            OutputFormat::Yaml,
        ] {
            output_tls_options(&options, &format, false);
        }
        output_tls_options(&[], &OutputFormat::Table, true);
    }
}
