//! Organization data models

use serde::{Deserialize, Serialize};

use crate::ogo::models::null_as_default;
use crate::ogo::traits::OgoResource;

/// Organization the account has access to
///
/// The display name arrives as `companyName`, `name` or both; a non-empty
/// `companyName` wins.
#[derive(Serialize, Deserialize, Debug, Clone, Default, PartialEq, Eq)]
#[serde(rename_all = "camelCase", from = "OrganizationWire")]
pub struct Organization {
    pub code: String,
    pub company_name: String,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct OrganizationWire {
    #[serde(default, deserialize_with = "null_as_default")]
    code: String,
    #[serde(default, deserialize_with = "null_as_default")]
    company_name: String,
    #[serde(default, deserialize_with = "null_as_default")]
    name: String,
}

impl From<OrganizationWire> for Organization {
    fn from(wire: OrganizationWire) -> Self {
        let company_name = if wire.company_name.is_empty() {
            wire.name
        } else {
            wire.company_name
        };
        Self {
            code: wire.code,
            company_name,
        }
    }
}

impl OgoResource for Organization {
    fn id(&self) -> &str {
        &self.code
    }

    fn name(&self) -> &str {
        &self.company_name
    }
}

/// Organization as listed for the account, with the account's role in it
#[derive(Deserialize, Debug, Clone, Default)]
#[serde(rename_all = "camelCase")]
pub struct OrganizationMembership {
    pub organization: Organization,
    #[serde(default, deserialize_with = "null_as_default")]
    pub role: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub privileges: Vec<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_company_name_field() {
        let org: Organization =
            serde_json::from_str(r#"{"code":"ACME","companyName":"Acme Corp"}"#).unwrap();
        assert_eq!(org.id(), "ACME");
        assert_eq!(org.name(), "Acme Corp");
    }

    #[test]
    fn test_name_alias() {
        let org: Organization = serde_json::from_str(r#"{"code":"ACME","name":"Acme"}"#).unwrap();
        assert_eq!(org.company_name, "Acme");
    }

    #[test]
    fn test_name_and_company_name_together() {
        let org: Organization = serde_json::from_str(
            r#"{"code":"ACME","name":"acme","companyName":"Acme Corp"}"#,
        )
        .unwrap();
        assert_eq!(org.company_name, "Acme Corp");

        let org: Organization =
            serde_json::from_str(r#"{"code":"ACME","name":"acme","companyName":""}"#).unwrap();
        assert_eq!(org.company_name, "acme");
    }

    #[test]
    fn test_membership_deserialize() {
        let json = r#"{"organization":{"code":"ACME","companyName":"Acme"},"role":"OWNER","privileges":["SITE_WRITE"]}"#;
        let membership: OrganizationMembership = serde_json::from_str(json).unwrap();
        assert_eq!(membership.organization.code, "ACME");
        assert_eq!(membership.role, "OWNER");
        assert_eq!(membership.privileges, vec!["SITE_WRITE"]);
    }
}
