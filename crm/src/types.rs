use http::StatusCode;
use indexmap::IndexMap;
use serde::Serialize;
use serde_json::Value as JsonValue;

/// Contact properties as the CRM expects them: CRM field name to value.
///
/// Ordered map so serialized request bodies are deterministic.
pub type Properties = IndexMap<String, JsonValue>;

/// A CRM response captured for passthrough.
///
/// The body is kept as raw text: CRM error responses are not guaranteed to
/// be valid JSON and must survive relaying unmodified.
#[derive(Debug, Clone)]
pub struct CrmResponse {
    pub status: StatusCode,
    pub body: String,
}

impl CrmResponse {
    pub fn is_success(&self) -> bool {
        self.status.is_success()
    }
}

/// Body for the create-contact endpoint.
///
/// Generic over the properties payload: the ingest path sends an ordered
/// [`Properties`] map, the proxy relays whatever JSON the caller posted.
#[derive(Debug, Clone, Serialize)]
pub struct CreateContactRequest<P: Serialize> {
    pub properties: P,
}

/// Body for the contacts search endpoint.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SearchContactsRequest {
    pub filter_groups: Vec<FilterGroup>,
    pub properties: Vec<String>,
}

#[derive(Debug, Clone, Serialize)]
pub struct FilterGroup {
    pub filters: Vec<Filter>,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Filter {
    pub property_name: String,
    pub operator: FilterOperator,
    pub value: String,
}

#[derive(Debug, Clone, Copy, Serialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum FilterOperator {
    Eq,
}
