//! Create, update, delete and import command definitions

use clap::{Parser, Subcommand};

use super::common::OutputFormat;

/// Resource types for the 'create' and 'update' commands
#[derive(Subcommand, Debug)]
pub enum ApplyResource {
    /// Site described by a configuration file
    Site(FileArgs),

    /// TLS options described by a configuration file
    #[command(visible_alias = "tls-options")]
    Tlsoptions(FileArgs),
}

/// Arguments for commands reading a configuration file
#[derive(Parser, Debug)]
pub struct FileArgs {
    /// JSON or YAML file with the resource attributes ("-" reads JSON from stdin)
    #[arg(short = 'f', long)]
    pub file: String,

    /// Output format of the resulting state
    #[arg(short = 'o', long, value_enum, default_value_t = OutputFormat::Json)]
    pub output: OutputFormat,
}

/// Resource types for the 'delete' command
#[derive(Subcommand, Debug)]
pub enum DeleteResource {
    /// Delete sites by domain name
    #[command(visible_alias = "sites")]
    Site(DeleteArgs),

    /// Delete TLS options by UID
    #[command(visible_alias = "tls-options")]
    Tlsoptions(DeleteArgs),
}

/// Arguments for 'delete' subcommands
#[derive(Parser, Debug)]
pub struct DeleteArgs {
    /// Identifiers to delete
    #[arg(required = true, num_args = 1..)]
    pub ids: Vec<String>,

    /// Skip confirmation prompt
    #[arg(short = 'y', long, default_value_t = false)]
    pub yes: bool,
}

/// Resource types for the 'import' command
#[derive(Subcommand, Debug)]
pub enum ImportResource {
    /// Import a site by domain name
    Site(ImportArgs),

    /// Import TLS options by UID
    #[command(visible_alias = "tls-options")]
    Tlsoptions(ImportArgs),
}

/// Arguments for 'import' subcommands
#[derive(Parser, Debug)]
pub struct ImportArgs {
    /// Identifier of the existing object
    pub id: String,

    /// Output format of the imported state
    #[arg(short = 'o', long, value_enum, default_value_t = OutputFormat::Json)]
    pub output: OutputFormat,
}
