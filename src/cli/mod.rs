//! CLI argument parsing

mod apply;
mod common;
mod get;

use clap::{Parser, Subcommand};

use crate::config::{defaults, env};
use crate::ogo::{ApiLayout, AuthScheme, CredentialInputs};

pub use apply::{ApplyResource, DeleteArgs, DeleteResource, FileArgs, ImportArgs, ImportResource};
pub use common::{DocumentFormat, OutputFormat};
pub use get::{ClustersArgs, GetResource, ListArgs, SiteArgs, TlsOptionsArgs};

/// Ogo Shield command line client
#[derive(Parser, Debug)]
#[command(name = "ogoctl")]
#[command(version)]
#[command(about = "Manage Ogo Shield sites and TLS options", long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,

    /// Ogo API endpoint
    #[arg(long, global = true, env = env::ENDPOINT)]
    pub endpoint: Option<String>,

    /// User email address
    #[arg(long, visible_alias = "username", global = true, env = env::EMAIL)]
    pub email: Option<String>,

    /// API key
    #[arg(long, global = true, env = env::APIKEY, hide_env_values = true)]
    pub apikey: Option<String>,

    /// Organization code
    #[arg(long, global = true, env = env::ORGANIZATION)]
    pub organization: Option<String>,

    /// Authentication scheme
    #[arg(long, global = true, value_enum, env = env::AUTH)]
    pub auth: Option<AuthScheme>,

    /// API path layout
    #[arg(long, global = true, value_enum, env = env::API_LAYOUT)]
    pub api_layout: Option<ApiLayout>,

    /// Log level (error, warn, info, debug, trace)
    #[arg(short, long, global = true, default_value = defaults::LOG_LEVEL)]
    pub log_level: String,

    /// Batch mode: no spinners, no prompts
    #[arg(long, global = true, default_value_t = false)]
    pub batch: bool,

    /// Omit headers and totals from table and CSV output
    #[arg(long, global = true, default_value_t = false)]
    pub no_header: bool,
}

impl Cli {
    /// Connection settings given on the command line or through clap's env fallback
    pub fn credential_inputs(&self) -> CredentialInputs {
        CredentialInputs {
            endpoint: self.endpoint.clone(),
            email: self.email.clone(),
            apikey: self.apikey.clone(),
            organization: self.organization.clone(),
            auth: self.auth,
            layout: self.api_layout,
        }
    }
}

/// Available commands
#[derive(Subcommand, Debug)]
pub enum Command {
    /// Get resources
    Get {
        #[command(subcommand)]
        resource: GetResource,
    },

    /// Create a resource from a configuration file
    Create {
        #[command(subcommand)]
        resource: ApplyResource,
    },

    /// Update a resource from a state file
    Update {
        #[command(subcommand)]
        resource: ApplyResource,
    },

    /// Delete resources
    Delete {
        #[command(subcommand)]
        resource: DeleteResource,
    },

    /// Import an existing resource and print its state
    Import {
        #[command(subcommand)]
        resource: ImportResource,
    },

    /// Print provider, resource and data source schemas
    Schema(SchemaArgs),
}

/// Arguments for 'schema' command
#[derive(Parser, Debug)]
pub struct SchemaArgs {
    /// Resource or data source type name (e.g. ogo_shield_site)
    pub type_name: Option<String>,

    /// Output format
    #[arg(short = 'o', long, value_enum, default_value_t = DocumentFormat::Json)]
    pub output: DocumentFormat,
}
