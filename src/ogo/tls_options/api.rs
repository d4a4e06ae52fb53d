//! TLS options API operations

use log::debug;
use reqwest::Method;
use std::collections::HashSet;

use crate::config::api;
use crate::error::{OgoError, Result};
use crate::ogo::models::{parse_mutation, MutationOutcome, Page};
use crate::ogo::traits::{OgoResource, PagedResponse};
use crate::ogo::OgoClient;

use super::models::TlsOptions;

impl OgoClient {
    fn tls_options_url(&self, uid: &str) -> String {
        format!(
            "{}/{}/{}",
            self.base_url(),
            api::TLS_OPTIONS,
            urlencoding::encode(uid)
        )
    }

    /// Get all TLS options bundles of the organization
    pub async fn get_all_tls_options(&self) -> Result<Vec<TlsOptions>> {
        let url = format!("{}/{}", self.base_url(), api::TLS_OPTIONS);
        debug!("Fetching TLS options from: {}", url);

        let page: Page<TlsOptions> = self.get_json(&url).await?;
        Ok(page.into_items())
    }

    /// Get a TLS options bundle by uid
    pub async fn get_tls_options(&self, uid: &str) -> Result<TlsOptions> {
        let url = self.tls_options_url(uid);
        debug!("Fetching TLS options '{}' from: {}", uid, url);
        self.get_json(&url).await
    }

    /// Find a TLS options bundle by uid or name in the organization's list
    pub async fn find_tls_options(&self, input: &str) -> Result<Option<TlsOptions>> {
        Ok(self
            .get_all_tls_options()
            .await?
            .into_iter()
            .find(|t| t.matches(input)))
    }

    /// Create a TLS options bundle
    ///
    /// When the response does not carry the generated uid, the bundle is
    /// looked up by name among those that did not exist before the call,
    /// then read back.
    pub async fn create_tls_options(&self, options: &TlsOptions) -> Result<TlsOptions> {
        let url = format!("{}/{}", self.base_url(), api::TLS_OPTIONS);

        let existing: HashSet<String> = self
            .get_all_tls_options()
            .await?
            .into_iter()
            .map(|t| t.uid)
            .collect();

        debug!("Creating TLS options '{}' at: {}", options.name, url);
        let body = self.send_json(Method::POST, &url, options).await?;

        if let MutationOutcome::Resource(created) =
            parse_mutation::<TlsOptions>(&body, "TLS options")?
        {
            if !created.uid.is_empty() {
                return Ok(created);
            }
        }

        debug!(
            "Create response lacks a uid, looking up new TLS options '{}' by name",
            options.name
        );
        let mut candidates: Vec<String> = self
            .get_all_tls_options()
            .await?
            .into_iter()
            .filter(|t| t.name == options.name && !existing.contains(&t.uid))
            .map(|t| t.uid)
            .collect();

        let uid = match candidates.len() {
            0 => {
                return Err(OgoError::NotFound(format!(
                    "TLS options '{}' not found after creation",
                    options.name
                )))
            }
            1 => candidates.remove(0),
            n => {
                return Err(OgoError::Ambiguous(format!(
                    "{} new TLS options named '{}' appeared after creation: {}",
                    n,
                    options.name,
                    candidates.join(", ")
                )))
            }
        };

        self.get_tls_options(&uid).await
    }

    /// Replace a TLS options bundle
    ///
    /// The uid addresses the bundle and is stripped from the body.
    pub async fn update_tls_options(&self, options: &TlsOptions) -> Result<TlsOptions> {
        if options.uid.is_empty() {
            return Err(OgoError::Config(
                "TLS options UID is required for update".to_string(),
            ));
        }
        let uid = options.uid.clone();
        let payload = TlsOptions {
            uid: String::new(),
            ..options.clone()
        };

        let url = self.tls_options_url(&uid);
        debug!("Updating TLS options '{}' at: {}", uid, url);

        let body = self.send_json(Method::PUT, &url, &payload).await?;

        match parse_mutation::<TlsOptions>(&body, "TLS options")? {
            MutationOutcome::Resource(mut updated) => {
                if updated.uid.is_empty() {
                    updated.uid = uid;
                }
                Ok(updated)
            }
            MutationOutcome::Acknowledged => self.get_tls_options(&uid).await,
        }
    }

    /// Delete a TLS options bundle
    pub async fn delete_tls_options(&self, uid: &str) -> Result<()> {
        let url = self.tls_options_url(uid);
        debug!("Deleting TLS options '{}' at: {}", uid, url);
        self.delete(&url).await
    }
}
