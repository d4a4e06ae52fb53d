//! `ogo_shield_clusters` data source

use serde::Serialize;
use std::sync::Arc;

use super::diagnostics::Diagnostics;
use super::schema::{Attribute, Schema};
use super::traits::DataSource;
use crate::config::provider as names;
use crate::ogo::{Cluster, OgoClient};

/// One cluster available to the organization
#[derive(Serialize, Debug, Clone, PartialEq, Eq)]
pub struct ClusterItem {
    pub uid: String,
    pub name: String,
    pub entrypoint4: String,
    pub entrypoint6: String,
    pub entrypointcdn: String,
    pub ips_to_whitelist: Vec<String>,
    pub supports_cache: bool,
    pub supports_ipv6_origins: bool,
    pub supports_mtls: bool,
    pub supported_cdns: Vec<String>,
}

impl From<&Cluster> for ClusterItem {
    fn from(cluster: &Cluster) -> Self {
        Self {
            uid: cluster.cluster_id.clone(),
            name: cluster.name.clone(),
            entrypoint4: cluster.entrypoint4.clone(),
            entrypoint6: cluster.entrypoint6.clone(),
            entrypointcdn: cluster.entrypoint_cdn.clone(),
            ips_to_whitelist: cluster.ips_to_whitelist.clone(),
            supports_cache: cluster.supports_cache,
            supports_ipv6_origins: cluster.supports_ipv6_origins,
            supports_mtls: cluster.supports_mtls,
            supported_cdns: cluster.supported_cdns.clone(),
        }
    }
}

#[derive(Serialize, Debug, Clone, Default, PartialEq, Eq)]
pub struct ClustersDataSourceModel {
    pub clusters: Vec<ClusterItem>,
}

pub struct ClustersDataSource {
    client: Arc<OgoClient>,
}

impl DataSource for ClustersDataSource {
    type Model = ClustersDataSourceModel;

    const TYPE_NAME: &'static str = names::CLUSTERS;

    fn new(client: Arc<OgoClient>) -> Self {
        Self { client }
    }

    fn schema() -> Schema {
        Schema::new(
            "List the clusters a site can be deployed on.",
            vec![Attribute::list_nested(
                "clusters",
                vec![
                    Attribute::string("uid").computed(),
                    Attribute::string("name").computed(),
                    Attribute::string("entrypoint4").computed(),
                    Attribute::string("entrypoint6").computed(),
                    Attribute::string("entrypointcdn").computed(),
                    Attribute::string_list("ips_to_whitelist").computed(),
                    Attribute::bool("supports_cache").computed(),
                    Attribute::bool("supports_ipv6_origins").computed(),
                    Attribute::bool("supports_mtls").computed(),
                    Attribute::string_list("supported_cdns").computed(),
                ],
            )
            .computed()],
        )
    }

    async fn read(&self) -> Result<ClustersDataSourceModel, Diagnostics> {
        let clusters = self
            .client
            .get_all_clusters()
            .await
            .map_err(|e| Diagnostics::error("Unable to read Ogo Clusters", e.to_string()))?;

        Ok(ClustersDataSourceModel {
            clusters: clusters.iter().map(ClusterItem::from).collect(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use wiremock::matchers::{method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    #[tokio::test]
    async fn test_read_clusters() {
        let mock_server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/v2/organizations/test-org/clusters"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "content": [
                    {"cluster": {
                        "clusterId": "c-1",
                        "name": "eu-west",
                        "ip": "192.0.2.10",
                        "ipv6": "2001:db8::10",
                        "supportsCache": true,
                        "ipsToWhitelist": ["198.51.100.1", "198.51.100.2"],
                        "supportedCdns": ["ORANGE"]
                    }, "role": "USER"},
                    {"cluster": {"clusterId": "c-2", "name": "us-east"}}
                ],
                "totalElements": 2
            })))
            .expect(1)
            .mount(&mock_server)
            .await;

        let source = ClustersDataSource::new(Arc::new(OgoClient::test_client(&mock_server.uri())));
        let model = source.read().await.unwrap();
        assert_eq!(model.clusters.len(), 2);

        let first = &model.clusters[0];
        assert_eq!(first.uid, "c-1");
        assert_eq!(first.entrypoint4, "192.0.2.10");
        assert!(first.supports_cache);
        assert!(!first.supports_mtls);
        assert_eq!(first.ips_to_whitelist.len(), 2);
        assert_eq!(first.supported_cdns, vec!["ORANGE"]);
        assert_eq!(model.clusters[1].entrypointcdn, "");

        let json = serde_json::to_value(&model).unwrap();
        assert_eq!(json["clusters"][1]["name"], "us-east");
    }

    #[tokio::test]
    async fn test_read_clusters_error() {
        let mock_server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/v2/organizations/test-org/clusters"))
            .respond_with(ResponseTemplate::new(401).set_body_string("bad token"))
            .mount(&mock_server)
            .await;

        let source = ClustersDataSource::new(Arc::new(OgoClient::test_client(&mock_server.uri())));
        let diags = source.read().await.unwrap_err();
        let diag = diags.iter().next().unwrap();
        assert_eq!(diag.summary, "Unable to read Ogo Clusters");
        assert_eq!(diag.detail, "status: 401, body: bad token");
    }
}
