//! Organization API operations

use log::debug;

use crate::error::Result;
use crate::ogo::models::Page;
use crate::ogo::traits::PagedResponse;
use crate::ogo::OgoClient;

use super::models::{Organization, OrganizationMembership};

impl OgoClient {
    /// Get organization memberships of the account
    ///
    /// Unlike other resources this endpoint is not scoped to the configured
    /// organization.
    pub async fn get_organization_memberships(&self) -> Result<Vec<OrganizationMembership>> {
        let url = self.organizations_url();
        debug!("Fetching organizations from: {}", url);

        let page: Page<OrganizationMembership> = self.get_json(&url).await?;
        Ok(page.into_items())
    }

    /// Get all organizations the account belongs to
    pub async fn get_all_organizations(&self) -> Result<Vec<Organization>> {
        let organizations: Vec<Organization> = self
            .get_organization_memberships()
            .await?
            .into_iter()
            .map(|m| m.organization)
            .collect();

        debug!("Found {} organizations", organizations.len());
        Ok(organizations)
    }
}
