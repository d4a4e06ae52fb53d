//! Get command resource definitions and arguments

use clap::{Parser, Subcommand};

use super::common::OutputFormat;

/// Resource types for the 'get' command
#[derive(Subcommand, Debug)]
pub enum GetResource {
    /// Get clusters available to the organization
    #[command(visible_alias = "cluster")]
    Clusters(ClustersArgs),

    /// Get contracts sites can be attached to
    #[command(visible_alias = "contract")]
    Contracts(ListArgs),

    /// Get organizations of the configured user
    #[command(
        visible_alias = "org",
        visible_alias = "organization",
        visible_alias = "organizations"
    )]
    Orgs(ListArgs),

    /// Get TLS options
    #[command(visible_alias = "tls-options", visible_alias = "tlsoption")]
    Tlsoptions(TlsOptionsArgs),

    /// List sites of the organization
    Sites(ListArgs),

    /// Show the full state of a single site
    Site(SiteArgs),

    /// Get certificates known for a site
    #[command(visible_alias = "certs")]
    Certificates(SiteArgs),
}

/// Arguments for listing commands without a selector
#[derive(Parser, Debug)]
pub struct ListArgs {
    /// Output format
    #[arg(short = 'o', long, value_enum, default_value_t = OutputFormat::Table)]
    pub output: OutputFormat,
}

/// Arguments for 'get clusters' subcommand
#[derive(Parser, Debug)]
pub struct ClustersArgs {
    /// Cluster name (if specified, shows only that cluster)
    pub name: Option<String>,

    /// Output format
    #[arg(short = 'o', long, value_enum, default_value_t = OutputFormat::Table)]
    pub output: OutputFormat,
}

/// Arguments for 'get tlsoptions' subcommand
#[derive(Parser, Debug)]
pub struct TlsOptionsArgs {
    /// TLS options UID or name (if specified, shows only that bundle)
    pub uid: Option<String>,

    /// Output format
    #[arg(short = 'o', long, value_enum, default_value_t = OutputFormat::Table)]
    pub output: OutputFormat,
}

/// Arguments for subcommands addressing one site
#[derive(Parser, Debug)]
pub struct SiteArgs {
    /// Site domain name
    pub domain: String,

    /// Output format
    #[arg(short = 'o', long, value_enum, default_value_t = OutputFormat::Table)]
    pub output: OutputFormat,
}
