/// Configuration constants for the Ogo API
pub mod api {
    use std::time::Duration;

    /// Path segment under which organization-scoped resources live
    pub const ORGANIZATIONS_PATH: &str = "/v2/organizations";

    /// Path segment used by older API revisions (followed by the account email)
    pub const LEGACY_PATH: &str = "/api";

    /// Sites endpoint
    pub const SITES: &str = "sites";

    /// Certificates sub-resource of a site
    pub const CERTIFICATES: &str = "certificates";

    /// TLS options endpoint
    pub const TLS_OPTIONS: &str = "tls-options";

    /// Clusters endpoint
    pub const CLUSTERS: &str = "clusters";

    /// Contracts available to the organization
    pub const CONTRACTS_AVAILABLE: &str = "contracts/available";

    /// Fixed timeout applied to every HTTP exchange
    pub const TIMEOUT: Duration = Duration::from_secs(30);

    /// Maximum number of HTTP exchanges in flight per client
    pub const MAX_CONCURRENT_REQUESTS: usize = 1;

    /// Status codes treated as success
    pub const SUCCESS_STATUSES: &[u16] = &[200, 201, 204];
}

/// Header and query parameter names used for authentication
pub mod headers {
    /// Content type sent with every request unless already set
    pub const CONTENT_TYPE: &str = "application/json; charset=UTF-8";

    /// Header carrying `<email>;<per-path token>`
    pub const AUTH: &str = "X-Ogo-Auth";

    /// Header carrying the raw API key
    pub const API_KEY: &str = "X-Ogo-Api-Key";

    /// Query parameter carrying the per-path token
    pub const TOKEN_QUERY: &str = "token";
}

/// Environment variables read during provider configuration
pub mod env {
    pub const ENDPOINT: &str = "OGO_ENDPOINT";
    pub const EMAIL: &str = "OGO_EMAIL";
    /// Older name for the account email
    pub const USERNAME: &str = "OGO_USERNAME";
    pub const APIKEY: &str = "OGO_APIKEY";
    pub const ORGANIZATION: &str = "OGO_ORGANIZATION";
    pub const AUTH: &str = "OGO_AUTH";
    pub const API_LAYOUT: &str = "OGO_API_LAYOUT";
}

/// Provider and resource type names
pub mod provider {
    /// Provider type name, prefix of every resource type
    pub const TYPE_NAME: &str = "ogo";

    pub const SITE: &str = "ogo_shield_site";
    pub const TLS_OPTIONS: &str = "ogo_shield_tlsoptions";
    pub const CLUSTERS: &str = "ogo_shield_clusters";
    pub const CONTRACTS: &str = "ogo_shield_contracts";
    pub const ORGANIZATIONS: &str = "ogo_shield_organizations";
}

/// Default values
pub mod defaults {
    /// Default Ogo API endpoint
    pub const ENDPOINT: &str = "https://api.ogosecurity.com";

    /// Default log level
    pub const LOG_LEVEL: &str = "warn";
}
