//! Contact form ingestion.
//!
//! Validates a structured submission, translates its fields to CRM property
//! names and creates one CRM contact record. The CRM's success response is
//! relayed verbatim; a CRM failure is wrapped so the caller sees the upstream
//! status and raw body alongside a stable `error` marker.

use crate::api::utils::{HandlerBody, empty_body, error_response, passthrough_response};
use crate::cors::{self, INGEST_CORS};
use crate::errors::{GatewayError, Result};
use crm::{CrmClient, Properties};
use hyper::body::Bytes;
use hyper::{Method, Request, Response};
use serde::Deserialize;

/// Environment variable holding the ingest handler's CRM credential.
pub const INGEST_TOKEN_VAR: &str = "CRM_INGEST_TOKEN";

/// A contact form submission as received from the web client.
///
/// `email`, `firstName` and `lastName` are required and must be non-empty;
/// the rest is optional. Unknown fields are ignored.
#[derive(Debug, Clone, Deserialize)]
pub struct ContactSubmission {
    pub email: String,
    #[serde(rename = "firstName")]
    pub first_name: String,
    #[serde(rename = "lastName")]
    pub last_name: String,
    #[serde(default)]
    pub phone: Option<String>,
    #[serde(default)]
    pub car_make: Option<String>,
    #[serde(default)]
    pub car_model: Option<String>,
    #[serde(default)]
    pub preferred_time_window: Option<String>,
}

impl ContactSubmission {
    /// Parses and validates a submission from a raw JSON body.
    pub fn parse(body: &[u8]) -> Result<Self> {
        let submission: Self =
            serde_json::from_slice(body).map_err(|e| GatewayError::Validation(e.to_string()))?;
        submission.validate()?;
        Ok(submission)
    }

    fn validate(&self) -> Result<()> {
        if !is_valid_email(&self.email) {
            return Err(GatewayError::Validation(format!(
                "invalid email address: {:?}",
                self.email
            )));
        }
        if self.first_name.trim().is_empty() {
            return Err(GatewayError::Validation(
                "firstName must not be empty".to_string(),
            ));
        }
        if self.last_name.trim().is_empty() {
            return Err(GatewayError::Validation(
                "lastName must not be empty".to_string(),
            ));
        }
        Ok(())
    }

    /// Maps the submission to CRM property names.
    ///
    /// Fixed translation table; optional fields only contribute a key when
    /// present and non-empty, absent fields never appear at all.
    pub fn crm_properties(&self) -> Properties {
        let mut properties = Properties::new();
        properties.insert("email".into(), self.email.clone().into());
        properties.insert("firstname".into(), self.first_name.clone().into());
        properties.insert("lastname".into(), self.last_name.clone().into());

        let optional: [(&str, &Option<String>); 4] = [
            ("phone", &self.phone),
            ("car_make", &self.car_make),
            ("car_model", &self.car_model),
            ("preferred_time_window", &self.preferred_time_window),
        ];
        for (key, value) in optional {
            if let Some(value) = value
                && !value.is_empty()
            {
                properties.insert(key.into(), value.clone().into());
            }
        }

        properties
    }
}

/// Syntactic email check, RFC 5322 style without the exotica: one `@`,
/// non-empty local part, dotted domain, no whitespace.
fn is_valid_email(s: &str) -> bool {
    if s.chars().any(char::is_whitespace) {
        return false;
    }
    let Some((local, domain)) = s.rsplit_once('@') else {
        return false;
    };
    if local.is_empty() || local.contains('@') {
        return false;
    }
    if domain.is_empty() || !domain.contains('.') {
        return false;
    }
    !domain.split('.').any(str::is_empty)
}

/// Handler for contact form submissions.
pub struct ContactIngestHandler {
    crm: CrmClient,
    token: Option<String>,
}

impl ContactIngestHandler {
    pub fn new(crm: CrmClient, token: Option<String>) -> Self {
        Self { crm, token }
    }

    /// Entry point; every response, errors included, carries the ingest
    /// CORS headers.
    pub async fn handle(&self, req: Request<Bytes>) -> Response<HandlerBody> {
        let mut response = if req.method() == Method::OPTIONS {
            // Preflight: success with no body.
            Response::new(empty_body())
        } else if req.method() == Method::POST {
            self.handle_post(req.into_body())
                .await
                .unwrap_or_else(|e| error_response(&e))
        } else {
            error_response(&GatewayError::MethodNotAllowed)
        };

        cors::apply(response.headers_mut(), &INGEST_CORS);
        response
    }

    async fn handle_post(&self, body: Bytes) -> Result<Response<HandlerBody>> {
        let submission = ContactSubmission::parse(&body)?;

        // Credential check happens after validation but before any outbound
        // call; a misconfigured deployment must never reach the CRM.
        let token = self
            .token
            .as_deref()
            .ok_or(GatewayError::Configuration(INGEST_TOKEN_VAR))?;

        tracing::debug!("creating CRM contact");
        let crm_response = self
            .crm
            .create_contact(token, submission.crm_properties())
            .await?;

        if crm_response.is_success() {
            Ok(passthrough_response(crm_response))
        } else {
            Err(GatewayError::Crm {
                status: crm_response.status,
                body: crm_response.body,
            })
        }
    }
}
