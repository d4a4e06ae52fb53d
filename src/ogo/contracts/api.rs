//! Contract API operations

use log::debug;

use crate::config::api;
use crate::error::Result;
use crate::ogo::models::Page;
use crate::ogo::traits::PagedResponse;
use crate::ogo::OgoClient;

use super::models::Contract;

impl OgoClient {
    /// Get contracts sites can currently be attached to
    pub async fn get_all_contracts(&self) -> Result<Vec<Contract>> {
        let url = format!("{}/{}", self.base_url(), api::CONTRACTS_AVAILABLE);
        debug!("Fetching contracts from: {}", url);

        let page: Page<Contract> = self.get_json(&url).await?;
        debug!(
            "Found {} contracts (server total: {:?})",
            page.content.len(),
            page.total()
        );
        Ok(page.into_items())
    }
}
