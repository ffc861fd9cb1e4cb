use crate::errors::GatewayError;
use crate::metrics_defs::CRM_FAILURES;
use http_body_util::combinators::BoxBody;
use http_body_util::{BodyExt, Empty, Full};
use hyper::body::Bytes;
use hyper::header::{CONTENT_TYPE, HeaderValue};
use hyper::{Response, StatusCode};

pub type HandlerBody = BoxBody<Bytes, GatewayError>;

pub fn empty_body() -> HandlerBody {
    Empty::new().map_err(|never| match never {}).boxed()
}

pub fn full_body(bytes: impl Into<Bytes>) -> HandlerBody {
    Full::new(bytes.into()).map_err(|never| match never {}).boxed()
}

/// Builds a JSON response from an already-serialized value.
pub fn json_response(status: StatusCode, value: &serde_json::Value) -> Response<HandlerBody> {
    let mut response = Response::new(full_body(value.to_string()));
    *response.status_mut() = status;
    response
        .headers_mut()
        .insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));
    response
}

/// Relays a CRM response to the caller: same status, body byte-for-byte.
pub fn passthrough_response(crm_response: crm::CrmResponse) -> Response<HandlerBody> {
    let mut response = Response::new(full_body(crm_response.body));
    *response.status_mut() = crm_response.status;
    response
        .headers_mut()
        .insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));
    response
}

/// Converts a handler error into its JSON response.
///
/// This is the only place application errors become HTTP; nothing bubbles
/// out of the service as an unhandled fault.
pub fn error_response(err: &GatewayError) -> Response<HandlerBody> {
    match err {
        GatewayError::Crm { status, .. } => {
            tracing::warn!(status = status.as_u16(), "relaying CRM error to caller");
            shared::counter!(CRM_FAILURES).increment(1);
        }
        GatewayError::Upstream(e) => {
            tracing::error!(error = %e, "CRM request failed");
            shared::counter!(CRM_FAILURES).increment(1);
        }
        _ => {}
    }

    json_response(err.status(), &err.body_json())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn json_response_sets_content_type() {
        let response = json_response(StatusCode::OK, &serde_json::json!({"ok": true}));
        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(
            response.headers().get(CONTENT_TYPE).unwrap(),
            "application/json"
        );
    }

    #[test]
    fn error_response_uses_variant_mapping() {
        let response = error_response(&GatewayError::NotFound);
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }
}
