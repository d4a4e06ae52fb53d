//! Ogo HTTP client for API interactions

use clap::ValueEnum;
use log::debug;
use reqwest::{Client, Method, RequestBuilder};
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::collections::HashMap;
use std::str::FromStr;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::{OnceCell, Semaphore};

use crate::config::api;
use crate::error::{OgoError, Result};
use crate::ogo::credentials::Credentials;

/// Where organization-scoped resources live on the API
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum ApiLayout {
    /// `<endpoint>/v2/organizations/<organization>`
    #[default]
    V2,
    /// `<endpoint>/api/<email>`, used by older API revisions
    Legacy,
}

impl std::fmt::Display for ApiLayout {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ApiLayout::V2 => write!(f, "v2"),
            ApiLayout::Legacy => write!(f, "legacy"),
        }
    }
}

impl FromStr for ApiLayout {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "v2" => Ok(ApiLayout::V2),
            "legacy" | "v1" => Ok(ApiLayout::Legacy),
            other => Err(format!(
                "unknown API layout '{}' (expected v2 or legacy)",
                other
            )),
        }
    }
}

/// Ogo API client
///
/// Clones share the connection pool, the request limiter and the cluster
/// cache, so every HTTP exchange made through any clone is serialized.
#[derive(Clone)]
pub struct OgoClient {
    client: Client,
    credentials: Credentials,
    limiter: Arc<Semaphore>,
    cluster_ids: Arc<OnceCell<HashMap<String, String>>>,
}

impl std::fmt::Debug for OgoClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("OgoClient")
            .field("credentials", &self.credentials)
            .field("base_url", &self.base_url())
            .finish()
    }
}

impl OgoClient {
    /// Create a new client, validating that every credential is present
    pub fn new(mut credentials: Credentials) -> Result<Self> {
        if credentials.endpoint.is_empty() {
            return Err(OgoError::Config("endpoint must be provided".to_string()));
        }
        if credentials.email.is_empty() {
            return Err(OgoError::Config(
                "user email address must be provided".to_string(),
            ));
        }
        if credentials.apikey.is_empty() {
            return Err(OgoError::Config("API key must be provided".to_string()));
        }
        if credentials.organization.is_empty() {
            return Err(OgoError::Config(
                "organization must be provided".to_string(),
            ));
        }
        credentials.endpoint = credentials.endpoint.trim_end_matches('/').to_string();

        let client = Client::builder()
            .connect_timeout(Duration::from_secs(10))
            .timeout(api::TIMEOUT)
            .build()?;

        debug!(
            "Created Ogo client for {} (auth: {}, layout: {})",
            credentials.endpoint, credentials.auth, credentials.layout
        );

        Ok(Self {
            client,
            credentials,
            limiter: Arc::new(Semaphore::new(api::MAX_CONCURRENT_REQUESTS)),
            cluster_ids: Arc::new(OnceCell::new()),
        })
    }

    /// Create a client pointed at a mock server
    #[cfg(test)]
    pub(crate) fn test_client(endpoint: &str) -> Self {
        Self::new(Credentials::new(
            endpoint,
            "test@example.com",
            "test-apikey",
            "test-org",
        ))
        .unwrap()
    }

    /// Credentials this client authenticates with
    pub fn credentials(&self) -> &Credentials {
        &self.credentials
    }

    /// Base URL for organization-scoped resources
    pub fn base_url(&self) -> String {
        match self.credentials.layout {
            ApiLayout::V2 => format!(
                "{}{}/{}",
                self.credentials.endpoint,
                api::ORGANIZATIONS_PATH,
                self.credentials.organization
            ),
            ApiLayout::Legacy => format!(
                "{}{}/{}",
                self.credentials.endpoint,
                api::LEGACY_PATH,
                self.credentials.email
            ),
        }
    }

    /// URL listing the organizations the account belongs to
    pub(crate) fn organizations_url(&self) -> String {
        format!("{}{}", self.credentials.endpoint, api::ORGANIZATIONS_PATH)
    }

    pub(crate) fn cluster_cache(&self) -> &OnceCell<HashMap<String, String>> {
        &self.cluster_ids
    }

    /// Create a request builder
    pub(crate) fn request(&self, method: Method, url: &str) -> RequestBuilder {
        self.client.request(method, url)
    }

    /// Authenticate and send a request, returning the response body
    ///
    /// The limiter permit is held only while the exchange is in flight.
    pub(crate) async fn execute(&self, builder: RequestBuilder) -> Result<String> {
        let mut request = builder.build()?;
        self.credentials.auth.apply(
            &mut request,
            &self.credentials.email,
            &self.credentials.apikey,
        )?;

        debug!("{} {}", request.method(), request.url().path());

        let response = {
            let _permit = self
                .limiter
                .acquire()
                .await
                .map_err(|e| OgoError::Config(format!("request limiter closed: {}", e)))?;
            self.client.execute(request).await?
        };

        let status = response.status().as_u16();
        let body = response.text().await?;

        if !api::SUCCESS_STATUSES.contains(&status) {
            debug!("Request failed with status {}: {}", status, body);
            return Err(OgoError::Api {
                status,
                message: body,
            });
        }

        Ok(body)
    }

    /// GET a URL and decode the JSON body
    pub(crate) async fn get_json<T>(&self, url: &str) -> Result<T>
    where
        T: DeserializeOwned,
    {
        let body = self.execute(self.request(Method::GET, url)).await?;
        Ok(serde_json::from_str(&body)?)
    }

    /// Send a JSON body, returning the raw response body
    pub(crate) async fn send_json<B>(&self, method: Method, url: &str, body: &B) -> Result<String>
    where
        B: Serialize + ?Sized,
    {
        let payload = serde_json::to_vec(body)?;
        self.execute(self.request(method, url).body(payload)).await
    }

    /// DELETE a URL, discarding the response body
    pub(crate) async fn delete(&self, url: &str) -> Result<()> {
        self.execute(self.request(Method::DELETE, url)).await?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::headers;
    use crate::ogo::auth::{path_token, AuthScheme};
    use std::time::Instant;
    use wiremock::matchers::{header, method, path, query_param};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    #[test]
    fn test_new_rejects_missing_values() {
        let cases = [
            (Credentials::new("", "a@b.c", "k", "o"), "endpoint"),
            (Credentials::new("https://x", "", "k", "o"), "email"),
            (Credentials::new("https://x", "a@b.c", "", "o"), "API key"),
            (Credentials::new("https://x", "a@b.c", "k", ""), "organization"),
        ];
        for (creds, needle) in cases {
            match OgoClient::new(creds) {
                Err(OgoError::Config(msg)) => assert!(msg.contains(needle), "{}", msg),
                other => panic!("Expected config error, got {:?}", other),
            }
        }
    }

    #[test]
    fn test_base_url_v2() {
        let client = OgoClient::test_client("https://api.example.com/");
        assert_eq!(
            client.base_url(),
            "https://api.example.com/v2/organizations/test-org"
        );
        assert_eq!(
            client.organizations_url(),
            "https://api.example.com/v2/organizations"
        );
    }

    #[test]
    fn test_base_url_legacy() {
        let mut creds = Credentials::new("https://api.example.com", "ops@example.com", "k", "o");
        creds.layout = ApiLayout::Legacy;
        let client = OgoClient::new(creds).unwrap();
        assert_eq!(client.base_url(), "https://api.example.com/api/ops@example.com");
    }

    #[test]
    fn test_api_layout_from_str() {
        assert_eq!("v2".parse::<ApiLayout>().unwrap(), ApiLayout::V2);
        assert_eq!("Legacy".parse::<ApiLayout>().unwrap(), ApiLayout::Legacy);
        assert!("v3".parse::<ApiLayout>().is_err());
    }

    #[tokio::test]
    async fn test_signed_request_headers() {
        let mock_server = MockServer::start().await;
        let request_path = "/v2/organizations/test-org/clusters";
        let expected_auth = format!(
            "test@example.com;{}",
            path_token(request_path, "test-apikey")
        );

        Mock::given(method("GET"))
            .and(path(request_path))
            .and(header(headers::AUTH, expected_auth.as_str()))
            .and(header("Content-Type", headers::CONTENT_TYPE))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({})))
            .expect(1)
            .mount(&mock_server)
            .await;

        let client = OgoClient::test_client(&mock_server.uri());
        let url = format!("{}/clusters", client.base_url());
        let result: serde_json::Value = client.get_json(&url).await.unwrap();
        assert!(result.is_object());
    }

    #[tokio::test]
    async fn test_api_key_request_header() {
        let mock_server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/v2/organizations/test-org/sites"))
            .and(header(headers::API_KEY, "test-apikey"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!([])))
            .expect(1)
            .mount(&mock_server)
            .await;

        let mut creds = Credentials::new(mock_server.uri(), "test@example.com", "test-apikey", "test-org");
        creds.auth = AuthScheme::ApiKey;
        let client = OgoClient::new(creds).unwrap();
        let url = format!("{}/sites", client.base_url());
        let result: serde_json::Value = client.get_json(&url).await.unwrap();
        assert!(result.is_array());
    }

    #[tokio::test]
    async fn test_query_token_request() {
        let mock_server = MockServer::start().await;
        let request_path = "/v2/organizations/test-org/sites";

        Mock::given(method("GET"))
            .and(path(request_path))
            .and(query_param(
                "token",
                path_token(request_path, "test-apikey").as_str(),
            ))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({})))
            .expect(1)
            .mount(&mock_server)
            .await;

        let mut creds = Credentials::new(mock_server.uri(), "test@example.com", "test-apikey", "test-org");
        creds.auth = AuthScheme::Query;
        let client = OgoClient::new(creds).unwrap();
        let url = format!("{}/sites", client.base_url());
        let _: serde_json::Value = client.get_json(&url).await.unwrap();
    }

    #[tokio::test]
    async fn test_non_success_status_embeds_body() {
        let mock_server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/v2/organizations/test-org/sites/missing.example.com"))
            .respond_with(ResponseTemplate::new(404).set_body_string("site not found"))
            .mount(&mock_server)
            .await;

        let client = OgoClient::test_client(&mock_server.uri());
        let url = format!("{}/sites/missing.example.com", client.base_url());
        let result: Result<serde_json::Value> = client.get_json(&url).await;

        match result.unwrap_err() {
            OgoError::Api { status, message } => {
                assert_eq!(status, 404);
                assert_eq!(message, "site not found");
            }
            e => panic!("Expected Api error, got {:?}", e),
        }
    }

    #[tokio::test]
    async fn test_unexpected_success_status_is_error() {
        let mock_server = MockServer::start().await;

        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(202).set_body_string("accepted"))
            .mount(&mock_server)
            .await;

        let client = OgoClient::test_client(&mock_server.uri());
        let result = client.execute(client.request(Method::GET, &client.base_url())).await;
        assert!(matches!(result, Err(OgoError::Api { status: 202, .. })));
    }

    #[tokio::test]
    async fn test_no_content_is_success() {
        let mock_server = MockServer::start().await;

        Mock::given(method("DELETE"))
            .and(path("/v2/organizations/test-org/sites/a.example.com"))
            .respond_with(ResponseTemplate::new(204))
            .expect(1)
            .mount(&mock_server)
            .await;

        let client = OgoClient::test_client(&mock_server.uri());
        let url = format!("{}/sites/a.example.com", client.base_url());
        client.delete(&url).await.unwrap();
    }

    #[tokio::test]
    async fn test_invalid_json_is_json_error() {
        let mock_server = MockServer::start().await;

        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(200).set_body_string("not json"))
            .mount(&mock_server)
            .await;

        let client = OgoClient::test_client(&mock_server.uri());
        let result: Result<serde_json::Value> = client.get_json(&client.base_url()).await;
        assert!(matches!(result, Err(OgoError::Json(_))));
    }

    #[tokio::test]
    async fn test_send_json_posts_body() {
        let mock_server = MockServer::start().await;

        Mock::given(method("POST"))
            .and(path("/v2/organizations/test-org/tls-options"))
            .and(wiremock::matchers::body_json(serde_json::json!({"name": "strict"})))
            .respond_with(ResponseTemplate::new(201).set_body_string("{\"uid\":\"u-1\"}"))
            .expect(1)
            .mount(&mock_server)
            .await;

        let client = OgoClient::test_client(&mock_server.uri());
        let url = format!("{}/tls-options", client.base_url());
        let body = client
            .send_json(Method::POST, &url, &serde_json::json!({"name": "strict"}))
            .await
            .unwrap();
        assert_eq!(body, "{\"uid\":\"u-1\"}");
    }

    #[tokio::test]
    async fn test_concurrent_requests_are_serialized() {
        let mock_server = MockServer::start().await;
        let delay = Duration::from_millis(150);

        Mock::given(method("GET"))
            .respond_with(
                ResponseTemplate::new(200)
                    .set_body_json(serde_json::json!({}))
                    .set_delay(delay),
            )
            .expect(3)
            .mount(&mock_server)
            .await;

        let client = OgoClient::test_client(&mock_server.uri());
        let clone = client.clone();
        let url = client.base_url();

        let started = Instant::now();
        let (a, b, c) = tokio::join!(
            client.get_json::<serde_json::Value>(&url),
            clone.get_json::<serde_json::Value>(&url),
            client.get_json::<serde_json::Value>(&url),
        );
        let elapsed = started.elapsed();

        assert!(a.is_ok() && b.is_ok() && c.is_ok());
        assert!(
            elapsed >= delay * 3,
            "requests overlapped: finished in {:?}",
            elapsed
        );
    }
}
