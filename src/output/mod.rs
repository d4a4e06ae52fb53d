//! Output formatting module
//!
//! Handles the output formats: table, CSV, JSON and YAML

mod clusters;
mod common;
mod contracts;
mod organizations;
mod sites;
mod state;
mod tls_options;

pub use clusters::output_clusters;
pub use common::{escape_csv, print_json, print_yaml};
pub use contracts::output_contracts;
pub use organizations::output_organizations;
pub use sites::{output_certificates, output_sites};
pub use state::output_state;
pub use tls_options::output_tls_options;
