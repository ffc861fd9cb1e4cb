use crate::api::utils::{HandlerBody, json_response};
use hyper::{Response, StatusCode};
use serde::Serialize;
use std::time::{SystemTime, UNIX_EPOCH};

#[derive(Serialize)]
struct HealthResponse<'a> {
    ok: bool,
    service: &'a str,
    ts: u64,
}

/// Fixed liveness payload. Answers any method and never calls the CRM.
pub struct HealthHandler {
    service_name: String,
}

impl HealthHandler {
    pub fn new(service_name: String) -> Self {
        Self { service_name }
    }

    pub fn handle(&self) -> Response<HandlerBody> {
        let ts = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .map(|d| d.as_millis() as u64)
            .unwrap_or(0);

        let payload = HealthResponse {
            ok: true,
            service: &self.service_name,
            ts,
        };

        json_response(
            StatusCode::OK,
            &serde_json::to_value(&payload).unwrap_or_else(|_| serde_json::json!({"ok": true})),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use http_body_util::BodyExt;

    #[tokio::test]
    async fn health_reports_service_name_and_timestamp() {
        let handler = HealthHandler::new("formgate-bff".into());
        let response = handler.handle();
        assert_eq!(response.status(), StatusCode::OK);

        let body = response.into_body().collect().await.unwrap().to_bytes();
        let parsed: serde_json::Value = serde_json::from_slice(&body).unwrap();
        assert_eq!(parsed["ok"], true);
        assert_eq!(parsed["service"], "formgate-bff");
        assert!(parsed["ts"].as_u64().unwrap() > 1_600_000_000_000);
    }
}
