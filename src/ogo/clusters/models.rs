//! Cluster data models

use serde::{Deserialize, Serialize};

use crate::ogo::models::null_as_default;
use crate::ogo::traits::OgoResource;

/// Cluster a site is deployed on
///
/// When embedded in a site only `clusterId` matters on write.
#[derive(Serialize, Deserialize, Debug, Clone, Default, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct Cluster {
    #[serde(default, deserialize_with = "null_as_default")]
    pub cluster_id: String,
    #[serde(
        default,
        deserialize_with = "null_as_default",
        skip_serializing_if = "String::is_empty"
    )]
    pub name: String,
    /// IPv4 entrypoint
    #[serde(
        rename = "ip",
        default,
        deserialize_with = "null_as_default",
        skip_serializing_if = "String::is_empty"
    )]
    pub entrypoint4: String,
    /// IPv6 entrypoint
    #[serde(
        rename = "ipv6",
        default,
        deserialize_with = "null_as_default",
        skip_serializing_if = "String::is_empty"
    )]
    pub entrypoint6: String,
    /// CNAME used when a CDN fronts the cluster
    #[serde(
        rename = "cdnCname",
        default,
        deserialize_with = "null_as_default",
        skip_serializing_if = "String::is_empty"
    )]
    pub entrypoint_cdn: String,
    #[serde(
        default,
        deserialize_with = "null_as_default",
        skip_serializing_if = "std::ops::Not::not"
    )]
    pub supports_cache: bool,
    #[serde(
        default,
        deserialize_with = "null_as_default",
        skip_serializing_if = "std::ops::Not::not"
    )]
    pub supports_ipv6_origins: bool,
    #[serde(
        default,
        deserialize_with = "null_as_default",
        skip_serializing_if = "std::ops::Not::not"
    )]
    pub supports_mtls: bool,
    #[serde(
        default,
        deserialize_with = "null_as_default",
        skip_serializing_if = "Vec::is_empty"
    )]
    pub ips_to_whitelist: Vec<String>,
    #[serde(
        default,
        deserialize_with = "null_as_default",
        skip_serializing_if = "Vec::is_empty"
    )]
    pub supported_cdns: Vec<String>,
}

impl Cluster {
    /// Reference to a cluster by identifier only
    pub fn reference(cluster_id: impl Into<String>) -> Self {
        Self {
            cluster_id: cluster_id.into(),
            ..Default::default()
        }
    }
}

impl OgoResource for Cluster {
    fn id(&self) -> &str {
        &self.cluster_id
    }

    fn name(&self) -> &str {
        &self.name
    }
}

/// Cluster as listed for the organization, with the caller's access
#[derive(Deserialize, Debug, Clone, Default)]
#[serde(rename_all = "camelCase")]
pub struct ClusterMembership {
    pub cluster: Cluster,
    #[serde(default, deserialize_with = "null_as_default")]
    pub role: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub access_rights: Vec<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cluster_deserialize() {
        let json = r#"{
            "clusterId": "c-1",
            "name": "eu-west",
            "ip": "192.0.2.10",
            "ipv6": "2001:db8::10",
            "cdnCname": "eu-west.cdn.example.net",
            "supportsCache": true,
            "supportsIpv6Origins": false,
            "supportsMtls": true,
            "ipsToWhitelist": ["192.0.2.0/24"],
            "supportedCdns": null
        }"#;

        let cluster: Cluster = serde_json::from_str(json).unwrap();
        assert_eq!(cluster.id(), "c-1");
        assert_eq!(cluster.name(), "eu-west");
        assert_eq!(cluster.entrypoint4, "192.0.2.10");
        assert_eq!(cluster.entrypoint6, "2001:db8::10");
        assert_eq!(cluster.entrypoint_cdn, "eu-west.cdn.example.net");
        assert!(cluster.supports_cache);
        assert!(cluster.supports_mtls);
        assert_eq!(cluster.ips_to_whitelist, vec!["192.0.2.0/24"]);
        assert!(cluster.supported_cdns.is_empty());
    }

    #[test]
    fn test_reference_serializes_id_only() {
        let json = serde_json::to_value(Cluster::reference("c-9")).unwrap();
        assert_eq!(json, serde_json::json!({"clusterId": "c-9"}));
    }

    #[test]
    fn test_membership_deserialize() {
        let json = r#"{"cluster":{"clusterId":"c-1","name":"eu-west"},"role":"ADMIN","accessRights":["READ"]}"#;
        let membership: ClusterMembership = serde_json::from_str(json).unwrap();
        assert_eq!(membership.cluster.cluster_id, "c-1");
        assert_eq!(membership.role, "ADMIN");
        assert_eq!(membership.access_rights, vec!["READ"]);
    }
}
