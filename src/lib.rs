//! ogoctl - Ogo Shield dashboard API client
//!
//! A client library for the Ogo Shield API, resource and data source
//! adapters with plan/state semantics, and a CLI driving them.
//!
//! # Features
//!
//! - Sites, TLS options, clusters, contracts and organizations
//! - Three authentication schemes (signed path token, API key header, query token)
//! - Attribute schemas with defaults and validators
//! - Multiple output formats (table, CSV, JSON, YAML)
//!
//! # Example
//!
//! ```bash
//! # List clusters
//! ogoctl get clusters
//!
//! # Create a site from a configuration file
//! ogoctl create site -f site.yaml
//!
//! # Import an existing TLS options bundle
//! ogoctl import tlsoptions 3f2a -o yaml
//! ```

pub mod cli;
pub mod config;
pub mod error;
pub mod ogo;
pub mod output;
pub mod provider;
pub mod ui;

pub use cli::{Cli, Command, GetResource, OutputFormat};
pub use error::{OgoError, Result};
pub use ogo::{
    ApiLayout, AuthScheme, Cluster, Contract, CredentialInputs, Credentials, CredentialsResolver,
    OgoClient, Organization, Site, TlsOptions,
};
pub use provider::{
    DataSource, Diagnostic, Diagnostics, ManagedResource, OgoProvider, Schema, SiteResource,
    TlsOptionsResource,
};
