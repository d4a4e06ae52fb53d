//! Contract output formatter

use super::common::{escape_csv, print_json, print_yaml, yes_no};
use crate::cli::OutputFormat;
use crate::provider::contracts::ContractItem;
use comfy_table::{presets::NOTHING, Table};

/// Output contracts in the specified format
pub fn output_contracts(contracts: &[ContractItem], format: &OutputFormat, no_header: bool) {
    match format {
        OutputFormat::Table => output_table(contracts, no_header),
        OutputFormat::Csv => output_csv(contracts, no_header),
        OutputFormat::Json => print_json(contracts),
        OutputFormat::Yaml => print_yaml(contracts),
    }
}

fn output_table(contracts: &[ContractItem], no_header: bool) {
    let mut table = Table::new();
    table.load_preset(NOTHING);
    if !no_header {
        table.set_header(vec![
            "Number",
            "Name",
            "Type",
            "Advanced Sites",
            "Expert Sites",
            "CDN",
            "Start",
            "End",
        ]);
    }

    for contract in contracts {
        table.add_row(vec![
            contract.number.clone(),
            contract.name.clone(),
            contract.contract_type.clone(),
            contract.nb_sites_advanced.to_string(),
            contract.nb_sites_expert.to_string(),
            yes_no(contract.cdn_enabled).to_string(),
            contract.start_date.clone(),
            contract.end_date.clone(),
        ]);
    }

    println!();
    println!("{table}");
    if !no_header {
        println!("\nTotal: {} contract(s)", contracts.len());
    }
}

fn output_csv(contracts: &[ContractItem], no_header: bool) {
    if !no_header {
        println!(
            "number,name,type,bandwidth_per_month,million_requests_per_month,nb_sites_advanced,nb_sites_expert,cdn_enabled,start_date,end_date,renewal_date"
        );
    }
    for contract in contracts {
        println!(
            "{},{},{},{},{},{},{},{},{},{},{}",
            escape_csv(&contract.number),
            escape_csv(&contract.name),
            escape_csv(&contract.contract_type),
            contract.bandwidth_per_month,
            contract.million_requests_per_month,
            contract.nb_sites_advanced,
            contract.nb_sites_expert,
            contract.cdn_enabled,
            escape_csv(&contract.start_date),
            escape_csv(&contract.end_date),
            escape_csv(&contract.renewal_date)
        );
    }
}
