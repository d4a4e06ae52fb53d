//! `ogo_shield_tlsoptions` managed resource and data source

use log::debug;
use serde::{Deserialize, Serialize};
use std::sync::Arc;

use super::diagnostics::Diagnostics;
use super::schema::{Attribute, Schema};
use super::timestamp;
use super::traits::{DataSource, ManagedResource};
use crate::config::provider as names;
use crate::ogo::{OgoClient, TlsOptions};

const TLS_VERSIONS: &[&str] = &["TLS_1.0", "TLS_1.1", "TLS_1.2", "TLS_1.3"];
const CLIENT_AUTH_TYPES: &[&str] = &["VerifyClientCertIfGiven", "RequireAndVerifyClientCert"];

/// TLS options plan and state
#[derive(Serialize, Deserialize, Debug, Clone, Default, PartialEq, Eq)]
#[serde(default)]
pub struct TlsOptionsResourceModel {
    pub uid: Option<String>,
    pub name: String,
    pub client_auth_type: String,
    pub client_auth_ca_certs: Vec<String>,
    pub min_tls_version: String,
    pub max_tls_version: Option<String>,
    pub last_updated: Option<String>,
}

impl TlsOptionsResourceModel {
    fn to_wire(&self) -> TlsOptions {
        TlsOptions {
            uid: self.uid.clone().unwrap_or_default(),
            name: self.name.clone(),
            client_auth_type: self.client_auth_type.clone(),
            client_auth_ca_certs: self.client_auth_ca_certs.clone(),
            min_tls_version: Some(self.min_tls_version.clone()).filter(|v| !v.is_empty()),
            max_tls_version: self.max_tls_version.clone().filter(|v| !v.is_empty()),
        }
    }

    fn refresh(&mut self, remote: &TlsOptions) {
        self.uid = Some(remote.uid.clone());
        self.name = remote.name.clone();
        self.client_auth_type = remote.client_auth_type.clone();
        self.client_auth_ca_certs = remote.client_auth_ca_certs.clone();
        self.min_tls_version = remote.min_tls_version.clone().unwrap_or_default();
        self.max_tls_version = remote.max_tls_version.clone();
    }
}

/// Managed `ogo_shield_tlsoptions` resource, imported by uid
pub struct TlsOptionsResource {
    client: Arc<OgoClient>,
}

impl ManagedResource for TlsOptionsResource {
    type Model = TlsOptionsResourceModel;

    const TYPE_NAME: &'static str = names::TLS_OPTIONS;

    fn new(client: Arc<OgoClient>) -> Self {
        Self { client }
    }

    fn schema() -> Schema {
        Schema::new(
            "Create, update and delete TLS options that sites can reference.",
            vec![
                Attribute::string("uid").computed().describe("UID of the TLS options."),
                Attribute::string("name").required().describe("Name of the TLS options."),
                Attribute::string("client_auth_type")
                    .default("VerifyClientCertIfGiven")
                    .one_of(CLIENT_AUTH_TYPES)
                    .describe("Client certificate authentication policy."),
                Attribute::string_set("client_auth_ca_certs")
                    .required()
                    .describe("PEM CA certificates used to verify client certificates."),
                Attribute::string("min_tls_version")
                    .default("TLS_1.2")
                    .one_of(TLS_VERSIONS)
                    .describe("Minimum accepted TLS version."),
                Attribute::string("max_tls_version")
                    .optional()
                    .one_of(TLS_VERSIONS)
                    .describe("Maximum accepted TLS version."),
                Attribute::string("last_updated").computed(),
            ],
        )
    }

    fn import_model(id: &str) -> TlsOptionsResourceModel {
        TlsOptionsResourceModel {
            uid: Some(id.to_string()),
            ..Default::default()
        }
    }

    async fn create(
        &self,
        mut plan: TlsOptionsResourceModel,
    ) -> Result<TlsOptionsResourceModel, Diagnostics> {
        debug!("Creating TLS options '{}'", plan.name);
        let created = self
            .client
            .create_tls_options(&plan.to_wire())
            .await
            .map_err(|e| {
                Diagnostics::from_error(
                    "Error creating TLS options",
                    "Could not create TLS options, unexpected error: ",
                    &e,
                )
            })?;

        plan.uid = Some(created.uid);
        plan.last_updated = Some(timestamp());
        Ok(plan)
    }

    async fn read(
        &self,
        mut state: TlsOptionsResourceModel,
    ) -> Result<TlsOptionsResourceModel, Diagnostics> {
        let uid = state.uid.clone().unwrap_or_default();
        debug!("Reading TLS options '{}'", uid);

        let remote = self.client.get_tls_options(&uid).await.map_err(|e| {
            Diagnostics::error(
                "Error Reading Ogo TLS options",
                format!("Could not read Ogo TLS options {}: {}", uid, e),
            )
        })?;

        state.refresh(&remote);
        Ok(state)
    }

    async fn update(
        &self,
        mut plan: TlsOptionsResourceModel,
    ) -> Result<TlsOptionsResourceModel, Diagnostics> {
        debug!("Updating TLS options '{}'", plan.name);
        let updated = self
            .client
            .update_tls_options(&plan.to_wire())
            .await
            .map_err(|e| {
                Diagnostics::from_error(
                    "Error Updating TLS options",
                    "Could not update TLS options, unexpected error: ",
                    &e,
                )
            })?;

        plan.uid = Some(updated.uid);
        plan.last_updated = Some(timestamp());
        Ok(plan)
    }

    async fn delete(&self, state: TlsOptionsResourceModel) -> Result<(), Diagnostics> {
        let uid = state.uid.unwrap_or_default();
        debug!("Deleting TLS options '{}'", uid);
        self.client.delete_tls_options(&uid).await.map_err(|e| {
            Diagnostics::from_error(
                "Error deleting TLS options",
                "Could not delete TLS options, unexpected error: ",
                &e,
            )
        })
    }
}

/// One entry of the TLS options data source
#[derive(Serialize, Debug, Clone, PartialEq, Eq)]
pub struct TlsOptionsItem {
    pub uid: String,
    pub name: String,
    pub client_auth_type: String,
    pub client_auth_ca_certs: Vec<String>,
    pub min_tls_version: Option<String>,
    pub max_tls_version: Option<String>,
}

impl From<&TlsOptions> for TlsOptionsItem {
    fn from(options: &TlsOptions) -> Self {
        Self {
            uid: options.uid.clone(),
            name: options.name.clone(),
            client_auth_type: options.client_auth_type.clone(),
            client_auth_ca_certs: options.client_auth_ca_certs.clone(),
            min_tls_version: options.min_tls_version.clone(),
            max_tls_version: options.max_tls_version.clone(),
        }
    }
}

#[derive(Serialize, Debug, Clone, Default, PartialEq, Eq)]
pub struct TlsOptionsDataSourceModel {
    pub tlsoptions: Vec<TlsOptionsItem>,
}

/// `ogo_shield_tlsoptions` data source
pub struct TlsOptionsDataSource {
    client: Arc<OgoClient>,
}

impl DataSource for TlsOptionsDataSource {
    type Model = TlsOptionsDataSourceModel;

    const TYPE_NAME: &'static str = names::TLS_OPTIONS;

    fn new(client: Arc<OgoClient>) -> Self {
        Self { client }
    }

    fn schema() -> Schema {
        Schema::new(
            "List the TLS options of the organization.",
            vec![Attribute::list_nested(
                "tlsoptions",
                vec![
                    Attribute::string("uid").computed(),
                    Attribute::string("name").computed(),
                    Attribute::string("client_auth_type").computed(),
                    Attribute::string_set("client_auth_ca_certs").computed(),
                    Attribute::string("min_tls_version").computed(),
                    Attribute::string("max_tls_version").computed(),
                ],
            )
            .computed()],
        )
    }

    async fn read(&self) -> Result<TlsOptionsDataSourceModel, Diagnostics> {
        let options = self
            .client
            .get_all_tls_options()
            .await
            .map_err(|e| Diagnostics::error("Unable to read Ogo TLS Options", e.to_string()))?;

        Ok(TlsOptionsDataSourceModel {
            tlsoptions: options.iter().map(TlsOptionsItem::from).collect(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use wiremock::matchers::{body_json, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    const LIST_PATH: &str = "/v2/organizations/test-org/tls-options";
    const ITEM_PATH: &str = "/v2/organizations/test-org/tls-options/t-1";

    fn client(server: &MockServer) -> Arc<OgoClient> {
        Arc::new(OgoClient::test_client(&server.uri()))
    }

    fn remote() -> serde_json::Value {
        json!({
            "uid": "t-1",
            "name": "strict",
            "clientAuthType": "RequireAndVerifyClientCert",
            "clientAuthCaCerts": ["-----BEGIN CERTIFICATE-----"],
            "minTlsVersion": "TLS_1.3",
            "maxTlsVersion": null
        })
    }

    async fn mount_empty_list(server: &MockServer) {
        Mock::given(method("GET"))
            .and(path(LIST_PATH))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({"content": []})))
            .mount(server)
            .await;
    }

    fn config() -> serde_json::Value {
        json!({
            "name": "strict",
            "client_auth_type": "RequireAndVerifyClientCert",
            "client_auth_ca_certs": ["-----BEGIN CERTIFICATE-----"],
            "min_tls_version": "TLS_1.3"
        })
    }

    #[test]
    fn test_plan_defaults_and_validation() {
        let plan = TlsOptionsResource::plan(json!({
            "name": "default",
            "client_auth_ca_certs": []
        }))
        .unwrap();
        assert_eq!(plan.client_auth_type, "VerifyClientCertIfGiven");
        assert_eq!(plan.min_tls_version, "TLS_1.2");
        assert!(plan.max_tls_version.is_none());

        let diags = TlsOptionsResource::plan(json!({
            "name": "bad",
            "client_auth_ca_certs": [],
            "max_tls_version": "SSL_3.0"
        }))
        .unwrap_err();
        assert_eq!(
            diags.iter().next().unwrap().attribute.as_deref(),
            Some("max_tls_version")
        );
    }

    #[tokio::test]
    async fn test_create_sets_uid() {
        let mock_server = MockServer::start().await;
        mount_empty_list(&mock_server).await;

        Mock::given(method("POST"))
            .and(path(LIST_PATH))
            .and(body_json(json!({
                "name": "strict",
                "clientAuthType": "RequireAndVerifyClientCert",
                "clientAuthCaCerts": ["-----BEGIN CERTIFICATE-----"],
                "minTlsVersion": "TLS_1.3"
            })))
            .respond_with(ResponseTemplate::new(201).set_body_json(remote()))
            .expect(1)
            .mount(&mock_server)
            .await;

        let resource = TlsOptionsResource::new(client(&mock_server));
        let plan = TlsOptionsResource::plan(config()).unwrap();
        let created = resource.create(plan).await.unwrap();
        assert_eq!(created.uid.as_deref(), Some("t-1"));
        assert_eq!(created.min_tls_version, "TLS_1.3");
        assert!(created.last_updated.is_some());
    }

    #[tokio::test]
    async fn test_create_error() {
        let mock_server = MockServer::start().await;
        mount_empty_list(&mock_server).await;

        Mock::given(method("POST"))
            .and(path(LIST_PATH))
            .respond_with(ResponseTemplate::new(400).set_body_string("invalid certificate"))
            .mount(&mock_server)
            .await;

        let resource = TlsOptionsResource::new(client(&mock_server));
        let plan = TlsOptionsResource::plan(config()).unwrap();
        let diags = resource.create(plan).await.unwrap_err();
        let diag = diags.iter().next().unwrap();
        assert_eq!(diag.summary, "Error creating TLS options");
        assert_eq!(
            diag.detail,
            "Could not create TLS options, unexpected error: status: 400, body: invalid certificate"
        );
    }

    #[tokio::test]
    async fn test_import_reads_by_uid() {
        let mock_server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path(ITEM_PATH))
            .respond_with(ResponseTemplate::new(200).set_body_json(remote()))
            .expect(1)
            .mount(&mock_server)
            .await;

        let resource = TlsOptionsResource::new(client(&mock_server));
        let imported = resource.import_state("t-1").await.unwrap();
        assert_eq!(imported.name, "strict");
        assert_eq!(imported.client_auth_type, "RequireAndVerifyClientCert");
        assert_eq!(imported.client_auth_ca_certs.len(), 1);
        assert_eq!(imported.min_tls_version, "TLS_1.3");
        assert!(imported.max_tls_version.is_none());
    }

    #[tokio::test]
    async fn test_read_picks_up_removed_min_version() {
        let mock_server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path(ITEM_PATH))
            .respond_with(
                ResponseTemplate::new(200).set_body_json(json!({"uid": "t-1", "name": "strict"})),
            )
            .mount(&mock_server)
            .await;

        let resource = TlsOptionsResource::new(client(&mock_server));
        let mut state = TlsOptionsResource::plan(config()).unwrap();
        state.uid = Some("t-1".to_string());
        assert_eq!(state.min_tls_version, "TLS_1.3");

        let refreshed = resource.read(state).await.unwrap();
        assert_eq!(refreshed.min_tls_version, "");
        assert!(refreshed.client_auth_ca_certs.is_empty());
    }

    #[tokio::test]
    async fn test_read_error() {
        let mock_server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path(ITEM_PATH))
            .respond_with(ResponseTemplate::new(404).set_body_string("gone"))
            .mount(&mock_server)
            .await;

        let resource = TlsOptionsResource::new(client(&mock_server));
        let diags = resource.import_state("t-1").await.unwrap_err();
        let diag = diags.iter().next().unwrap();
        assert_eq!(diag.summary, "Error Reading Ogo TLS options");
        assert_eq!(
            diag.detail,
            "Could not read Ogo TLS options t-1: status: 404, body: gone"
        );
    }

    #[tokio::test]
    async fn test_update_sends_uid_in_path() {
        let mock_server = MockServer::start().await;

        Mock::given(method("PUT"))
            .and(path(ITEM_PATH))
            .respond_with(ResponseTemplate::new(204))
            .expect(1)
            .mount(&mock_server)
            .await;

        Mock::given(method("GET"))
            .and(path(ITEM_PATH))
            .respond_with(ResponseTemplate::new(200).set_body_json(remote()))
            .expect(1)
            .mount(&mock_server)
            .await;

        let resource = TlsOptionsResource::new(client(&mock_server));
        let mut plan = TlsOptionsResource::plan(config()).unwrap();
        plan.uid = Some("t-1".to_string());
        let updated = resource.update(plan).await.unwrap();
        assert_eq!(updated.uid.as_deref(), Some("t-1"));
        assert!(updated.last_updated.is_some());
    }

    #[tokio::test]
    async fn test_update_without_uid() {
        let resource = TlsOptionsResource::new(Arc::new(OgoClient::test_client(
            "http://127.0.0.1:9",
        )));
        let plan = TlsOptionsResource::plan(config()).unwrap();
        let diags = resource.update(plan).await.unwrap_err();
        assert_eq!(diags.iter().next().unwrap().summary, "Error Updating TLS options");
    }

    #[tokio::test]
    async fn test_delete() {
        let mock_server = MockServer::start().await;

        Mock::given(method("DELETE"))
            .and(path(ITEM_PATH))
            .respond_with(ResponseTemplate::new(200))
            .expect(1)
            .mount(&mock_server)
            .await;

        let resource = TlsOptionsResource::new(client(&mock_server));
        resource
            .delete(TlsOptionsResource::import_model("t-1"))
            .await
            .unwrap();
    }

    #[tokio::test]
    async fn test_data_source_lists_all() {
        let mock_server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path(LIST_PATH))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "content": [remote(), {"uid": "t-2", "name": "legacy", "minTlsVersion": "TLS_1.0"}],
                "totalElements": 2
            })))
            .expect(1)
            .mount(&mock_server)
            .await;

        let model = TlsOptionsDataSource::new(client(&mock_server))
            .read()
            .await
            .unwrap();
        assert_eq!(model.tlsoptions.len(), 2);
        assert_eq!(model.tlsoptions[1].uid, "t-2");
        assert_eq!(model.tlsoptions[1].min_tls_version.as_deref(), Some("TLS_1.0"));
    }

    #[tokio::test]
    async fn test_data_source_error() {
        let mock_server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path(LIST_PATH))
            .respond_with(ResponseTemplate::new(403).set_body_string("forbidden"))
            .mount(&mock_server)
            .await;

        let diags = TlsOptionsDataSource::new(client(&mock_server))
            .read()
            .await
            .unwrap_err();
        assert_eq!(
            diags.iter().next().unwrap().summary,
            "Unable to read Ogo TLS Options"
        );
    }
}
