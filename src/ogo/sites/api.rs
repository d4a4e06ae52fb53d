//! Site API operations

use log::debug;
use reqwest::Method;

use crate::config::api;
use crate::error::{OgoError, Result};
use crate::ogo::models::{parse_mutation, MutationOutcome, Page};
use crate::ogo::traits::PagedResponse;
use crate::ogo::OgoClient;

use super::models::{Certificate, Site};

impl OgoClient {
    fn site_url(&self, domain_name: &str) -> String {
        format!(
            "{}/{}/{}",
            self.base_url(),
            api::SITES,
            urlencoding::encode(domain_name)
        )
    }

    /// Get a site by domain name
    pub async fn get_site(&self, domain_name: &str) -> Result<Site> {
        let url = self.site_url(domain_name);
        debug!("Fetching site '{}' from: {}", domain_name, url);
        self.get_json(&url).await
    }

    /// Get all sites of the organization
    pub async fn get_all_sites(&self) -> Result<Vec<Site>> {
        let url = format!("{}/{}", self.base_url(), api::SITES);
        debug!("Fetching sites from: {}", url);

        let page: Page<Site> = self.get_json(&url).await?;
        Ok(page.into_items())
    }

    /// Get the certificates known for a site
    pub async fn get_site_certificates(&self, domain_name: &str) -> Result<Vec<Certificate>> {
        let url = format!("{}/{}", self.site_url(domain_name), api::CERTIFICATES);
        debug!("Fetching certificates of '{}' from: {}", domain_name, url);

        let page: Page<Certificate> = self.get_json(&url).await?;
        Ok(page.into_items())
    }

    /// Create a site
    ///
    /// Responses that only acknowledge the creation are followed by a read
    /// of the site under its domain name.
    pub async fn create_site(&self, site: &Site) -> Result<Site> {
        require_domain(site)?;
        let url = format!("{}/{}", self.base_url(), api::SITES);
        debug!("Creating site '{}' at: {}", site.domain_name, url);

        let body = self.send_json(Method::POST, &url, site).await?;
        self.settle_site_mutation(&body, &site.domain_name).await
    }

    /// Replace a site's configuration
    pub async fn update_site(&self, site: &Site) -> Result<Site> {
        require_domain(site)?;
        let url = self.site_url(&site.domain_name);
        debug!("Updating site '{}' at: {}", site.domain_name, url);

        let body = self.send_json(Method::PATCH, &url, site).await?;
        self.settle_site_mutation(&body, &site.domain_name).await
    }

    /// Delete a site
    pub async fn delete_site(&self, domain_name: &str) -> Result<()> {
        let url = self.site_url(domain_name);
        debug!("Deleting site '{}' at: {}", domain_name, url);
        self.delete(&url).await
    }

    async fn settle_site_mutation(&self, body: &str, domain_name: &str) -> Result<Site> {
        match parse_mutation::<Site>(body, "site")? {
            MutationOutcome::Resource(site) if !site.domain_name.is_empty() => Ok(site),
            _ => {
                debug!("Reading back site '{}'", domain_name);
                self.get_site(domain_name).await
            }
        }
    }
}

fn require_domain(site: &Site) -> Result<()> {
    if site.domain_name.is_empty() {
        return Err(OgoError::Config("site domain name is required".to_string()));
    }
    Ok(())
}
