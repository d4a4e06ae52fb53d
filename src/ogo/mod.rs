//! Ogo API client module
//!
//! This module provides functionality to interact with the Ogo Shield
//! dashboard API: sites, TLS options, clusters, contracts and organizations.

pub mod auth;
mod client;
pub mod clusters;
pub mod contracts;
pub mod credentials;
pub mod models;
pub mod organizations;
pub mod sites;
pub mod tls_options;
pub mod traits;

pub use auth::AuthScheme;
pub use client::{ApiLayout, OgoClient};
pub use clusters::{Cluster, ClusterMembership};
pub use contracts::{Contract, ContractHolder};
pub use credentials::{
    CredentialField, CredentialInputs, CredentialProblem, Credentials, CredentialsResolver,
};
pub use models::Page;
pub use organizations::{Organization, OrganizationMembership};
pub use sites::{
    ActiveCustomerCertificate, Certificate, CertificateP12, IpException, RewriteRule, Rule, Site,
    UrlException,
};
pub use tls_options::TlsOptions;
pub use traits::{OgoResource, PagedResponse};
