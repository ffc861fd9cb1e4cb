//! Generic CRM contacts proxy.
//!
//! Routes on (method, path suffix): email search on GET, create on POST.
//! Unlike contact ingestion this handler never reinterprets CRM responses,
//! failures included; status and body are relayed byte-for-byte.

use crate::api::utils::{HandlerBody, empty_body, error_response, passthrough_response};
use crate::cors::{self, PROXY_CORS};
use crate::errors::{GatewayError, Result};
use crm::CrmClient;
use hyper::body::Bytes;
use hyper::{Method, Request, Response, StatusCode};

/// Environment variable holding the proxy handler's CRM credential.
pub const PROXY_TOKEN_VAR: &str = "CRM_PROXY_TOKEN";

const CONTACTS_SUFFIX: &str = "/contacts";

pub struct ContactsProxyHandler {
    crm: CrmClient,
    token: Option<String>,
}

impl ContactsProxyHandler {
    pub fn new(crm: CrmClient, token: Option<String>) -> Self {
        Self { crm, token }
    }

    /// Entry point; every response carries the proxy CORS headers.
    pub async fn handle(&self, req: Request<Bytes>) -> Response<HandlerBody> {
        let mut response = self
            .dispatch(req)
            .await
            .unwrap_or_else(|e| error_response(&e));
        cors::apply(response.headers_mut(), &PROXY_CORS);
        response
    }

    async fn dispatch(&self, req: Request<Bytes>) -> Result<Response<HandlerBody>> {
        if req.method() == Method::OPTIONS {
            let mut response = Response::new(empty_body());
            *response.status_mut() = StatusCode::NO_CONTENT;
            return Ok(response);
        }

        // Credential check short-circuits before any routing.
        let token = self
            .token
            .as_deref()
            .ok_or(GatewayError::Configuration(PROXY_TOKEN_VAR))?;

        let path = req.uri().path();

        if req.method() == Method::GET && path.ends_with(CONTACTS_SUFFIX) {
            let email = email_param(req.uri().query()).ok_or(GatewayError::MissingEmailParam)?;
            tracing::debug!("searching CRM contacts by email");
            let crm_response = self.crm.search_contacts_by_email(token, &email).await?;
            return Ok(passthrough_response(crm_response));
        }

        if req.method() == Method::POST && path.ends_with(CONTACTS_SUFFIX) {
            // The body is relayed as whatever JSON the caller posted; only
            // a body that fails to parse at all falls back to an empty object.
            let properties: serde_json::Value = serde_json::from_slice(req.body())
                .unwrap_or_else(|_| serde_json::json!({}));
            tracing::debug!("creating CRM contact via proxy");
            let crm_response = self.crm.create_contact(token, properties).await?;
            return Ok(passthrough_response(crm_response));
        }

        Err(GatewayError::NotFound)
    }
}

/// Extracts a non-empty `email` query parameter.
fn email_param(query: Option<&str>) -> Option<String> {
    let query = query?;
    url::form_urlencoded::parse(query.as_bytes())
        .find(|(key, _)| key == "email")
        .map(|(_, value)| value.into_owned())
        .filter(|value| !value.is_empty())
}
