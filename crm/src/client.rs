use crate::types::{
    CreateContactRequest, CrmResponse, Filter, FilterGroup, FilterOperator, SearchContactsRequest,
};
use serde::Serialize;
use url::Url;

/// Properties requested from the CRM when searching contacts by email.
pub const CONTACT_SEARCH_PROPERTIES: [&str; 4] = ["email", "firstname", "lastname", "phone"];

const CONTACTS_PATH: &str = "/crm/v3/objects/contacts";
const CONTACTS_SEARCH_PATH: &str = "/crm/v3/objects/contacts/search";

#[derive(thiserror::Error, Debug)]
pub enum CrmClientError {
    #[error("HTTP client error: {0}")]
    Transport(#[from] reqwest::Error),
    #[error("invalid CRM endpoint URL: {0}")]
    EndpointUrl(#[from] url::ParseError),
}

/// Client for the CRM contacts API.
///
/// The bearer token is passed per call rather than held by the client:
/// different handlers are configured with independent credentials.
#[derive(Clone)]
pub struct CrmClient {
    client: reqwest::Client,
    base_url: Url,
}

impl CrmClient {
    pub fn new(base_url: Url) -> Self {
        Self {
            client: reqwest::Client::new(),
            base_url,
        }
    }

    /// Creates a contact record. Returns the raw CRM status and body;
    /// a non-2xx status is still `Ok` here.
    ///
    /// `properties` is any serializable payload; it lands under the
    /// `properties` key of the request body.
    pub async fn create_contact<P: Serialize>(
        &self,
        token: &str,
        properties: P,
    ) -> Result<CrmResponse, CrmClientError> {
        let url = self.endpoint(CONTACTS_PATH)?;
        let response = self
            .client
            .post(url)
            .bearer_auth(token)
            .json(&CreateContactRequest { properties })
            .send()
            .await?;

        Self::collect(response).await
    }

    /// Searches contacts by exact email match, requesting the fixed
    /// [`CONTACT_SEARCH_PROPERTIES`] set.
    pub async fn search_contacts_by_email(
        &self,
        token: &str,
        email: &str,
    ) -> Result<CrmResponse, CrmClientError> {
        let url = self.endpoint(CONTACTS_SEARCH_PATH)?;
        let request = SearchContactsRequest {
            filter_groups: vec![FilterGroup {
                filters: vec![Filter {
                    property_name: "email".to_string(),
                    operator: FilterOperator::Eq,
                    value: email.to_string(),
                }],
            }],
            properties: CONTACT_SEARCH_PROPERTIES
                .iter()
                .map(|p| p.to_string())
                .collect(),
        };

        let response = self
            .client
            .post(url)
            .bearer_auth(token)
            .json(&request)
            .send()
            .await?;

        Self::collect(response).await
    }

    fn endpoint(&self, path: &str) -> Result<Url, CrmClientError> {
        Ok(self.base_url.join(path)?)
    }

    async fn collect(response: reqwest::Response) -> Result<CrmResponse, CrmClientError> {
        let status = response.status();
        let body = response.text().await?;

        if !status.is_success() {
            tracing::warn!(status = status.as_u16(), "CRM returned non-success status");
        }

        Ok(CrmResponse { status, body })
    }
}
