//! Credential resolution
//!
//! Explicit configuration wins over environment variables. The endpoint falls
//! back to the public Ogo API when neither source provides one; every other
//! value must be supplied.

use log::debug;
use std::fmt;

use crate::config::{defaults, env};
use crate::ogo::auth::AuthScheme;
use crate::ogo::client::ApiLayout;

/// Fully resolved connection settings
#[derive(Clone, PartialEq, Eq)]
pub struct Credentials {
    pub endpoint: String,
    pub email: String,
    pub apikey: String,
    pub organization: String,
    pub auth: AuthScheme,
    pub layout: ApiLayout,
}

impl Credentials {
    /// Build credentials with the default auth scheme and API layout
    pub fn new(
        endpoint: impl Into<String>,
        email: impl Into<String>,
        apikey: impl Into<String>,
        organization: impl Into<String>,
    ) -> Self {
        Self {
            endpoint: endpoint.into(),
            email: email.into(),
            apikey: apikey.into(),
            organization: organization.into(),
            auth: AuthScheme::default(),
            layout: ApiLayout::default(),
        }
    }
}

impl fmt::Debug for Credentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Credentials")
            .field("endpoint", &self.endpoint)
            .field("email", &self.email)
            .field("apikey", &mask_secret(&self.apikey))
            .field("organization", &self.organization)
            .field("auth", &self.auth)
            .field("layout", &self.layout)
            .finish()
    }
}

/// Replace a secret with a fixed mask, keeping only whether it was set
pub fn mask_secret(secret: &str) -> &'static str {
    if secret.is_empty() {
        ""
    } else {
        "***"
    }
}

/// A connection setting that must be supplied
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CredentialField {
    Endpoint,
    Email,
    ApiKey,
    Organization,
}

impl CredentialField {
    /// Provider configuration attribute name
    pub fn attribute(&self) -> &'static str {
        match self {
            CredentialField::Endpoint => "endpoint",
            CredentialField::Email => "email",
            CredentialField::ApiKey => "apikey",
            CredentialField::Organization => "organization",
        }
    }

    /// Environment variable consulted when the attribute is unset
    pub fn env_var(&self) -> &'static str {
        match self {
            CredentialField::Endpoint => env::ENDPOINT,
            CredentialField::Email => env::EMAIL,
            CredentialField::ApiKey => env::APIKEY,
            CredentialField::Organization => env::ORGANIZATION,
        }
    }
}

/// Why credentials could not be resolved
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CredentialProblem {
    /// Value absent from configuration and environment, or empty
    Missing(CredentialField),
    /// Value present but not understood
    Invalid {
        attribute: &'static str,
        message: String,
    },
}

/// Explicitly configured values (provider block or CLI flags)
#[derive(Debug, Default, Clone)]
pub struct CredentialInputs {
    pub endpoint: Option<String>,
    pub email: Option<String>,
    pub apikey: Option<String>,
    pub organization: Option<String>,
    pub auth: Option<AuthScheme>,
    pub layout: Option<ApiLayout>,
}

type EnvLookup = Box<dyn Fn(&str) -> Option<String> + Send + Sync>;

/// Resolves credentials from explicit inputs and the environment
pub struct CredentialsResolver {
    env: EnvLookup,
}

impl Default for CredentialsResolver {
    fn default() -> Self {
        Self::new()
    }
}

impl CredentialsResolver {
    /// Resolver reading the process environment
    pub fn new() -> Self {
        Self {
            env: Box::new(|name| std::env::var(name).ok()),
        }
    }

    /// Resolver with a custom environment lookup
    pub fn with_env<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String> + Send + Sync + 'static,
    {
        Self {
            env: Box::new(lookup),
        }
    }

    fn env_value(&self, name: &str) -> Option<String> {
        (self.env)(name).filter(|v| !v.is_empty())
    }

    /// Resolve credentials, reporting every problem at once
    pub fn resolve(
        &self,
        inputs: &CredentialInputs,
    ) -> std::result::Result<Credentials, Vec<CredentialProblem>> {
        let mut problems = Vec::new();

        let endpoint = match &inputs.endpoint {
            Some(value) => value.clone(),
            None => self
                .env_value(env::ENDPOINT)
                .unwrap_or_else(|| defaults::ENDPOINT.to_string()),
        };

        let email = inputs
            .email
            .clone()
            .or_else(|| self.env_value(env::EMAIL))
            .or_else(|| self.env_value(env::USERNAME))
            .unwrap_or_default();

        let apikey = inputs
            .apikey
            .clone()
            .or_else(|| self.env_value(env::APIKEY))
            .unwrap_or_default();

        let organization = inputs
            .organization
            .clone()
            .or_else(|| self.env_value(env::ORGANIZATION))
            .unwrap_or_default();

        for (field, value) in [
            (CredentialField::Endpoint, &endpoint),
            (CredentialField::Email, &email),
            (CredentialField::ApiKey, &apikey),
            (CredentialField::Organization, &organization),
        ] {
            if value.is_empty() {
                problems.push(CredentialProblem::Missing(field));
            }
        }

        let auth = match inputs.auth {
            Some(auth) => auth,
            None => match self.env_value(env::AUTH) {
                Some(raw) => raw.parse().unwrap_or_else(|message| {
                    problems.push(CredentialProblem::Invalid {
                        attribute: "auth",
                        message,
                    });
                    AuthScheme::default()
                }),
                None => AuthScheme::default(),
            },
        };

        let layout = match inputs.layout {
            Some(layout) => layout,
            None => match self.env_value(env::API_LAYOUT) {
                Some(raw) => raw.parse().unwrap_or_else(|message| {
                    problems.push(CredentialProblem::Invalid {
                        attribute: "api_layout",
                        message,
                    });
                    ApiLayout::default()
                }),
                None => ApiLayout::default(),
            },
        };

        if !problems.is_empty() {
            debug!("Credential resolution failed: {:?}", problems);
            return Err(problems);
        }

        let credentials = Credentials {
            endpoint,
            email,
            apikey,
            organization,
            auth,
            layout,
        };
        debug!("Resolved credentials: {:?}", credentials);
        Ok(credentials)
    }
}
