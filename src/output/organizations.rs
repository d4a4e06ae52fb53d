//! Organization output formatter

use super::common::{escape_csv, print_json, print_yaml};
use crate::cli::OutputFormat;
use crate::provider::organizations::OrganizationItem;
use comfy_table::{presets::NOTHING, Table};

/// Output organizations in the specified format
pub fn output_organizations(orgs: &[OrganizationItem], format: &OutputFormat, no_header: bool) {
    match format {
        OutputFormat::Table => output_table(orgs, no_header),
        OutputFormat::Csv => output_csv(orgs, no_header),
        OutputFormat::Json => print_json(orgs),
        OutputFormat::Yaml => print_yaml(orgs),
    }
}

fn output_table(orgs: &[OrganizationItem], no_header: bool) {
    let mut table = Table::new();
    table.load_preset(NOTHING);
    if !no_header {
        table.set_header(vec!["Code", "Company Name"]);
    }

    for org in orgs {
        table.add_row(vec![org.code.as_str(), org.company_name.as_str()]);
    }

    println!();
    println!("{table}");
    if !no_header {
        println!("\nTotal: {} organizations", orgs.len());
    }
}

fn output_csv(orgs: &[OrganizationItem], no_header: bool) {
    if !no_header {
        println!("code,company_name");
    }
    for org in orgs {
        println!("{},{}", escape_csv(&org.code), escape_csv(&org.company_name));
    }
}
