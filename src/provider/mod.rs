//! Provider layer
//!
//! Wraps the API client in the provider / resource / data source roles:
//! configuration with environment fallback, attribute schemas, plan and
//! state models, and diagnostics instead of raw errors.

pub mod clusters;
pub mod commands;
pub mod contracts;
pub mod diagnostics;
pub mod organizations;
pub mod schema;
pub mod site;
pub mod tls_options;
pub mod traits;

use log::{debug, info};
use std::sync::Arc;

use crate::config::provider as names;
use crate::ogo::credentials::mask_secret;
use crate::ogo::{
    CredentialField, CredentialInputs, CredentialProblem, CredentialsResolver, OgoClient,
};

pub use clusters::ClustersDataSource;
pub use contracts::ContractsDataSource;
pub use diagnostics::{Diagnostic, Diagnostics, Severity};
pub use organizations::OrganizationsDataSource;
pub use schema::{Attribute, AttributeType, Schema, Validator};
pub use site::{SiteResource, SiteResourceModel};
pub use tls_options::{TlsOptionsDataSource, TlsOptionsResource, TlsOptionsResourceModel};
pub use traits::{DataSource, ManagedResource};

/// Provider configuration: explicit values, each falling back to the environment
pub type ProviderModel = CredentialInputs;

/// The `ogo` provider
pub struct OgoProvider {
    version: String,
    resolver: CredentialsResolver,
    client: Option<Arc<OgoClient>>,
}

impl OgoProvider {
    /// Provider reading its fallback values from the process environment
    pub fn new(version: impl Into<String>) -> Self {
        Self::with_resolver(version, CredentialsResolver::new())
    }

    pub fn with_resolver(version: impl Into<String>, resolver: CredentialsResolver) -> Self {
        Self {
            version: version.into(),
            resolver,
            client: None,
        }
    }

    pub fn type_name(&self) -> &'static str {
        names::TYPE_NAME
    }

    pub fn version(&self) -> &str {
        &self.version
    }

    pub fn schema() -> Schema {
        Schema::new(
            "Interact with the Ogo Shield dashboard API.",
            vec![
                Attribute::string("endpoint")
                    .optional()
                    .describe("URI of the Ogo API. May also be provided via OGO_ENDPOINT."),
                Attribute::string("email")
                    .optional()
                    .describe("User email address. May also be provided via OGO_EMAIL."),
                Attribute::string("apikey")
                    .optional()
                    .sensitive()
                    .describe("API key. May also be provided via OGO_APIKEY."),
                Attribute::string("organization")
                    .optional()
                    .describe("Organization code. May also be provided via OGO_ORGANIZATION."),
                Attribute::string("auth")
                    .optional()
                    .one_of(&["signed", "api-key", "query"])
                    .describe("Authentication scheme. May also be provided via OGO_AUTH."),
                Attribute::string("api_layout")
                    .optional()
                    .one_of(&["v2", "legacy"])
                    .describe("API path layout. May also be provided via OGO_API_LAYOUT."),
            ],
        )
    }

    /// Resolve the configuration and create the shared API client
    ///
    /// Every missing or invalid value is reported, not only the first one.
    pub fn configure(&mut self, config: &ProviderModel) -> Result<Arc<OgoClient>, Diagnostics> {
        debug!("Configuring Ogo client");

        let credentials = self
            .resolver
            .resolve(config)
            .map_err(credential_diagnostics)?;

        let (endpoint, email, organization) = (
            credentials.endpoint.clone(),
            credentials.email.clone(),
            credentials.organization.clone(),
        );
        let masked = mask_secret(&credentials.apikey);

        let client = OgoClient::new(credentials).map_err(|e| {
            Diagnostics::error(
                "Unable to Create OGO Security Dashboard API Client",
                format!(
                    "An unexpected error occurred when creating the Ogo API client. \
                     If the error is not clear, please contact the provider developers.\n\n\
                     Ogo Client Error: {}",
                    e
                ),
            )
        })?;

        info!(
            "Configured Ogo client (endpoint: {}, email: {}, organization: {}, apikey: {})",
            endpoint, email, organization, masked
        );

        let client = Arc::new(client);
        self.client = Some(Arc::clone(&client));
        Ok(client)
    }

    /// Shared client, once configured
    pub fn client(&self) -> Result<Arc<OgoClient>, Diagnostics> {
        self.client.clone().ok_or_else(|| {
            Diagnostics::error(
                "Unconfigured Ogo provider",
                "Expected a configured Ogo client. Configure the provider before using resources or data sources.",
            )
        })
    }

    pub fn resource<R: ManagedResource>(&self) -> Result<R, Diagnostics> {
        Ok(R::new(self.client()?))
    }

    pub fn data_source<D: DataSource>(&self) -> Result<D, Diagnostics> {
        Ok(D::new(self.client()?))
    }

    /// Managed resource type names
    pub fn resources() -> Vec<&'static str> {
        vec![SiteResource::TYPE_NAME, TlsOptionsResource::TYPE_NAME]
    }

    /// Data source type names
    pub fn data_sources() -> Vec<&'static str> {
        vec![
            ClustersDataSource::TYPE_NAME,
            ContractsDataSource::TYPE_NAME,
            OrganizationsDataSource::TYPE_NAME,
            TlsOptionsDataSource::TYPE_NAME,
        ]
    }

    pub fn resource_schema(type_name: &str) -> Option<Schema> {
        match type_name {
            names::SITE => Some(SiteResource::schema()),
            names::TLS_OPTIONS => Some(TlsOptionsResource::schema()),
            _ => None,
        }
    }

    pub fn data_source_schema(type_name: &str) -> Option<Schema> {
        match type_name {
            names::CLUSTERS => Some(ClustersDataSource::schema()),
            names::CONTRACTS => Some(ContractsDataSource::schema()),
            names::ORGANIZATIONS => Some(OrganizationsDataSource::schema()),
            names::TLS_OPTIONS => Some(TlsOptionsDataSource::schema()),
            _ => None,
        }
    }
}

fn credential_diagnostics(problems: Vec<CredentialProblem>) -> Diagnostics {
    let mut diags = Diagnostics::new();
    for problem in problems {
        match problem {
            CredentialProblem::Missing(field) => {
                let label = match field {
                    CredentialField::Endpoint => "Ogo API endpoint",
                    CredentialField::Email => "User email address",
                    CredentialField::ApiKey => "Ogo API apikey",
                    CredentialField::Organization => "Ogo API organization",
                };
                diags.add_attribute_error(
                    field.attribute(),
                    format!("Missing {}", label),
                    format!(
                        "The provider cannot create the Ogo API client as there is a missing or empty value for the {}. \
                         Set the {} value in the configuration or use the {} environment variable. \
                         If either is already set, ensure the value is not empty.",
                        label,
                        field.attribute(),
                        field.env_var()
                    ),
                );
            }
            CredentialProblem::Invalid { attribute, message } => {
                diags.add_attribute_error(attribute, "Invalid Ogo provider configuration", message);
            }
        }
    }
    diags
}

/// Wall-clock `last_updated` value, RFC 850 style
pub(crate) fn timestamp() -> String {
    chrono::Utc::now()
        .format("%A, %d-%b-%y %H:%M:%S UTC")
        .to_string()
}
