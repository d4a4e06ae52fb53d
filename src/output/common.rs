//! Common utilities for output formatters

use serde::Serialize;

/// Escape a value for CSV output
/// Handles commas, quotes, and newlines according to RFC 4180
pub fn escape_csv(value: &str) -> String {
    if value.contains(',') || value.contains('"') || value.contains('\n') {
        format!("\"{}\"", value.replace('"', "\"\""))
    } else {
        value.to_string()
    }
}

/// Print any serializable value as pretty JSON
pub fn print_json<T: Serialize + ?Sized>(data: &T) {
    match serde_json::to_string_pretty(data) {
        Ok(json) => println!("{}", json),
        Err(e) => eprintln!("Failed to serialize JSON: {}", e),
    }
}

/// Print any serializable value as YAML
pub fn print_yaml<T: Serialize + ?Sized>(data: &T) {
    match serde_yml::to_string(data) {
        Ok(yaml) => print!("{}", yaml),
        Err(e) => eprintln!("Failed to serialize YAML: {}", e),
    }
}

/// Render a list cell, joining items with `sep`
pub fn join_list(items: &[String], sep: &str) -> String {
    items.join(sep)
}

/// Render a boolean for table output
pub fn yes_no(value: bool) -> &'static str {
    if value {
        "Yes"
    } else {
        "No"
    }
}
