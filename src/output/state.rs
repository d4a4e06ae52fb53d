//! Resource state output formatter

use serde::Serialize;
use serde_json::Value;

use super::common::{escape_csv, print_json, print_yaml};
use crate::cli::OutputFormat;
use comfy_table::{presets::NOTHING, Table};

/// Output a resource state in the specified format
///
/// Table and CSV render one row per top-level attribute; nested values are
/// shown as compact JSON.
pub fn output_state<T: Serialize>(state: &T, format: &OutputFormat, no_header: bool) {
    match format {
        OutputFormat::Json => print_json(state),
        OutputFormat::Yaml => print_yaml(state),
        OutputFormat::Table | OutputFormat::Csv => {
            let rows = match serde_json::to_value(state) {
                Ok(value) => attribute_rows(&value),
                Err(e) => {
                    eprintln!("Failed to serialize state: {}", e);
                    return;
                }
            };
            if *format == OutputFormat::Table {
                output_table(&rows, no_header);
            } else {
                output_csv(&rows, no_header);
            }
        }
    }
}

fn attribute_rows(value: &Value) -> Vec<(String, String)> {
    match value {
        Value::Object(map) => map
            .iter()
            .map(|(key, value)| (key.clone(), render(value)))
            .collect(),
        other => vec![(String::new(), render(other))],
    }
}

fn render(value: &Value) -> String {
    match value {
        Value::Null => String::new(),
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}

fn output_table(rows: &[(String, String)], no_header: bool) {
    let mut table = Table::new();
    table.load_preset(NOTHING);
    if !no_header {
        table.set_header(vec!["Attribute", "Value"]);
    }
    for (key, value) in rows {
        table.add_row(vec![key.as_str(), value.as_str()]);
    }
    println!();
    println!("{table}");
}

fn output_csv(rows: &[(String, String)], no_header: bool) {
    if !no_header {
        println!("attribute,value");
    }
    for (key, value) in rows {
        println!("{},{}", escape_csv(key), escape_csv(value));
    }
}
