//! Cluster API operations

use log::debug;
use std::collections::HashMap;

use crate::config::api;
use crate::error::{OgoError, Result};
use crate::ogo::models::Page;
use crate::ogo::traits::PagedResponse;
use crate::ogo::OgoClient;

use super::models::{Cluster, ClusterMembership};

impl OgoClient {
    /// Get all clusters available to the organization
    pub async fn get_all_clusters(&self) -> Result<Vec<Cluster>> {
        let url = format!("{}/{}", self.base_url(), api::CLUSTERS);
        debug!("Fetching clusters from: {}", url);

        let page: Page<ClusterMembership> = self.get_json(&url).await?;
        let clusters: Vec<Cluster> = page.into_items().into_iter().map(|m| m.cluster).collect();

        debug!("Found {} clusters", clusters.len());
        Ok(clusters)
    }

    /// Get a single cluster by name
    ///
    /// The name is translated to an identifier through the cluster cache.
    pub async fn get_cluster(&self, name: &str) -> Result<Cluster> {
        let cluster_id = self.cluster_id(name).await?;
        let url = format!(
            "{}/{}/{}",
            self.base_url(),
            api::CLUSTERS,
            urlencoding::encode(&cluster_id)
        );
        debug!("Fetching cluster '{}' from: {}", name, url);

        let membership: ClusterMembership = self.get_json(&url).await?;
        Ok(membership.cluster)
    }

    /// Resolve a cluster name to its identifier
    pub async fn cluster_id(&self, name: &str) -> Result<String> {
        let ids = self.cluster_ids().await?;
        ids.get(name)
            .cloned()
            .ok_or_else(|| OgoError::NotFound(format!("Unknown cluster {}", name)))
    }

    /// Populate the cluster cache, returning the number of known clusters
    pub async fn warm_cluster_cache(&self) -> Result<usize> {
        Ok(self.cluster_ids().await?.len())
    }

    async fn cluster_ids(&self) -> Result<&HashMap<String, String>> {
        self.cluster_cache()
            .get_or_try_init(|| async {
                let clusters = self.get_all_clusters().await?;
                debug!("Caching {} cluster identifiers", clusters.len());
                Ok::<_, OgoError>(
                    clusters
                        .into_iter()
                        .map(|c| (c.name, c.cluster_id))
                        .collect(),
                )
            })
            .await
    }
}
