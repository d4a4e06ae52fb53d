//! Cluster output formatter

use super::common::{escape_csv, join_list, print_json, print_yaml, yes_no};
use crate::cli::OutputFormat;
use crate::provider::clusters::ClusterItem;
use comfy_table::{presets::NOTHING, Table};

/// Output clusters in the specified format
pub fn output_clusters(clusters: &[ClusterItem], format: &OutputFormat, no_header: bool) {
    match format {
        OutputFormat::Table => output_table(clusters, no_header),
        OutputFormat::Csv => output_csv(clusters, no_header),
        OutputFormat::Json => print_json(clusters),
        OutputFormat::Yaml => print_yaml(clusters),
    }
}

fn output_table(clusters: &[ClusterItem], no_header: bool) {
    let mut table = Table::new();
    table.load_preset(NOTHING);
    if !no_header {
        table.set_header(vec![
            "Name", "UID", "IPv4", "IPv6", "CDN", "Cache", "IPv6 Origins", "mTLS",
        ]);
    }

    for cluster in clusters {
        table.add_row(vec![
            cluster.name.as_str(),
            cluster.uid.as_str(),
            cluster.entrypoint4.as_str(),
            cluster.entrypoint6.as_str(),
            cluster.entrypointcdn.as_str(),
            yes_no(cluster.supports_cache),
            yes_no(cluster.supports_ipv6_origins),
            yes_no(cluster.supports_mtls),
        ]);
    }

    println!();
    println!("{table}");
    if !no_header {
        println!("\nTotal: {} cluster(s)", clusters.len());
    }
}

fn output_csv(clusters: &[ClusterItem], no_header: bool) {
    if !no_header {
        println!(
            "name,uid,entrypoint4,entrypoint6,entrypointcdn,supports_cache,supports_ipv6_origins,supports_mtls,ips_to_whitelist,supported_cdns"
        );
    }
    for cluster in clusters {
        println!(
            "{},{},{},{},{},{},{},{},{},{}",
            escape_csv(&cluster.name),
            escape_csv(&cluster.uid),
            escape_csv(&cluster.entrypoint4),
            escape_csv(&cluster.entrypoint6),
            escape_csv(&cluster.entrypointcdn),
            cluster.supports_cache,
            cluster.supports_ipv6_origins,
            cluster.supports_mtls,
            escape_csv(&join_list(&cluster.ips_to_whitelist, ";")),
            escape_csv(&join_list(&cluster.supported_cdns, ";"))
        );
    }
}
