use std::fmt;

/// Error type for Ogo API operations
#[derive(Debug)]
pub enum OgoError {
    /// HTTP request failed or the response body could not be read
    Http(reqwest::Error),
    /// API answered with a status outside 200/201/204
    Api { status: u16, message: String },
    /// Mutation response envelope reported a failure
    Envelope(String),
    /// Resource could not be located
    NotFound(String),
    /// Lookup matched more than one resource
    Ambiguous(String),
    /// Missing or invalid client configuration
    Config(String),
    /// JSON encoding or decoding error
    Json(String),
    /// Local file could not be read
    Io(String),
}

impl fmt::Display for OgoError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            OgoError::Http(e) => write!(f, "HTTP request failed: {}", e),
            OgoError::Api { status, message } => {
                write!(f, "status: {}, body: {}", status, message)
            }
            OgoError::Envelope(msg) => write!(f, "API reported a failure: {}", msg),
            OgoError::NotFound(msg) => write!(f, "{}", msg),
            OgoError::Ambiguous(msg) => write!(f, "{}", msg),
            OgoError::Config(msg) => write!(f, "Configuration error: {}", msg),
            OgoError::Json(msg) => write!(f, "JSON error: {}", msg),
            OgoError::Io(msg) => write!(f, "I/O error: {}", msg),
        }
    }
}

impl std::error::Error for OgoError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            OgoError::Http(e) => Some(e),
            _ => None,
        }
    }
}

impl From<reqwest::Error> for OgoError {
    fn from(err: reqwest::Error) -> Self {
        OgoError::Http(err)
    }
}

impl From<serde_json::Error> for OgoError {
    fn from(err: serde_json::Error) -> Self {
        OgoError::Json(err.to_string())
    }
}

impl From<std::io::Error> for OgoError {
    fn from(err: std::io::Error) -> Self {
        OgoError::Io(err.to_string())
    }
}

/// Result type alias for Ogo operations
pub type Result<T> = std::result::Result<T, OgoError>;
