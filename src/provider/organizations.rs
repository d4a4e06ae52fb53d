//! `ogo_shield_organizations` data source

use serde::Serialize;
use std::sync::Arc;

use super::diagnostics::Diagnostics;
use super::schema::{Attribute, Schema};
use super::traits::DataSource;
use crate::config::provider as names;
use crate::ogo::{OgoClient, Organization};

#[derive(Serialize, Debug, Clone, PartialEq, Eq)]
pub struct OrganizationItem {
    pub code: String,
    pub company_name: String,
}

impl From<&Organization> for OrganizationItem {
    fn from(organization: &Organization) -> Self {
        Self {
            code: organization.code.clone(),
            company_name: organization.company_name.clone(),
        }
    }
}

#[derive(Serialize, Debug, Clone, Default, PartialEq, Eq)]
pub struct OrganizationsDataSourceModel {
    pub organizations: Vec<OrganizationItem>,
}

/// Organizations the configured user belongs to
pub struct OrganizationsDataSource {
    client: Arc<OgoClient>,
}

impl DataSource for OrganizationsDataSource {
    type Model = OrganizationsDataSourceModel;

    const TYPE_NAME: &'static str = names::ORGANIZATIONS;

    fn new(client: Arc<OgoClient>) -> Self {
        Self { client }
    }

    fn schema() -> Schema {
        Schema::new(
            "List the organizations of the configured user.",
            vec![Attribute::list_nested(
                "organizations",
                vec![
                    Attribute::string("code").computed(),
                    Attribute::string("company_name").computed(),
                ],
            )
            .computed()],
        )
    }

    async fn read(&self) -> Result<OrganizationsDataSourceModel, Diagnostics> {
        let organizations = self.client.get_all_organizations().await.map_err(|e| {
            Diagnostics::error("Unable to read Ogo Organizations", e.to_string())
        })?;

        Ok(OrganizationsDataSourceModel {
            organizations: organizations.iter().map(OrganizationItem::from).collect(),
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
    async fn test_read_organizations() {
        let mock_server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/v2/organizations"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "content": [
                    {"organization": {"code": "acme", "companyName": "Acme Corp"}, "role": "ADMIN"},
                    {"organization": {"code": "globex", "companyName": "Globex"}, "role": "USER"}
                ],
                "totalElements": 2
            })))
            .expect(1)
            .mount(&mock_server)
            .await;

        let source =
            OrganizationsDataSource::new(Arc::new(OgoClient::test_client(&mock_server.uri())));
        let model = source.read().await.unwrap();
        assert_eq!(
            model.organizations,
            vec![
                OrganizationItem {
                    code: "acme".to_string(),
                    company_name: "Acme Corp".to_string()
                },
                OrganizationItem {
                    code: "globex".to_string(),
                    company_name: "Globex".to_string()
                },
            ]
        );
    }

    #[tokio::test]
    async fn test_read_organizations_error() {
        let mock_server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/v2/organizations"))
            .respond_with(ResponseTemplate::new(403).set_body_string("denied"))
            .mount(&mock_server)
            .await;

        let source =
            OrganizationsDataSource::new(Arc::new(OgoClient::test_client(&mock_server.uri())));
        let diags = source.read().await.unwrap_err();
        assert_eq!(
            diags.iter().next().unwrap().summary,
            "Unable to read Ogo Organizations"
        );
    }
}
