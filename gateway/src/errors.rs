use hyper::StatusCode;
use serde_json::json;
use thiserror::Error;

/// Result type alias for gateway operations
pub type Result<T, E = GatewayError> = std::result::Result<T, E>;

/// Everything a handler can fail with.
///
/// Each variant maps to one HTTP status and one JSON error body; the mapping
/// lives here so handlers only ever construct variants and the response shape
/// stays consistent across endpoints.
#[derive(Error, Debug)]
pub enum GatewayError {
    /// Submission failed JSON parsing or schema validation.
    #[error("Invalid request: {0}")]
    Validation(String),

    /// The proxy search endpoint was called without an `email` query param.
    #[error("email is required")]
    MissingEmailParam,

    #[error("Method Not Allowed")]
    MethodNotAllowed,

    /// A required credential was not configured. Carries the name of the
    /// environment variable the operator needs to set.
    #[error("Missing {0}")]
    Configuration(&'static str),

    /// The CRM answered with a non-2xx status. The raw response text is kept
    /// as-is; CRM error bodies are not guaranteed to be JSON.
    #[error("CRM error: status {status}")]
    Crm { status: StatusCode, body: String },

    /// No (method, path) branch matched inside the proxy handler.
    #[error("Not found")]
    NotFound,

    #[error("Failed to read request body: {0}")]
    RequestBody(String),

    /// The outbound CRM call failed at the transport level (connect, DNS).
    #[error("CRM request failed: {0}")]
    Upstream(#[from] crm::CrmClientError),

    #[error("Invalid configuration: {0}")]
    InvalidConfig(#[from] crate::config::ValidationError),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl GatewayError {
    pub fn status(&self) -> StatusCode {
        match self {
            GatewayError::Validation(_) | GatewayError::MissingEmailParam => {
                StatusCode::BAD_REQUEST
            }
            GatewayError::MethodNotAllowed => StatusCode::METHOD_NOT_ALLOWED,
            GatewayError::Configuration(_) => StatusCode::INTERNAL_SERVER_ERROR,
            GatewayError::Crm { status, .. } => *status,
            GatewayError::NotFound => StatusCode::NOT_FOUND,
            GatewayError::Upstream(_) => StatusCode::BAD_GATEWAY,
            GatewayError::RequestBody(_) | GatewayError::InvalidConfig(_) | GatewayError::Io(_) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        }
    }

    /// JSON error body for this variant. Always includes an `error` field.
    pub fn body_json(&self) -> serde_json::Value {
        match self {
            GatewayError::Validation(detail) => {
                json!({"error": "Invalid request", "detail": detail})
            }
            GatewayError::MissingEmailParam => json!({"error": "email is required"}),
            GatewayError::MethodNotAllowed => json!({"error": "Method Not Allowed"}),
            GatewayError::Configuration(var) => json!({"error": format!("Missing {var}")}),
            GatewayError::Crm { status, body } => {
                json!({"error": "CRM error", "status": status.as_u16(), "body": body})
            }
            GatewayError::NotFound => json!({"error": "Not found"}),
            GatewayError::Upstream(e) => {
                json!({"error": "CRM request failed", "detail": e.to_string()})
            }
            other => json!({"error": "Internal error", "detail": other.to_string()}),
        }
    }
}
