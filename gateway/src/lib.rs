//! HTTP gateway between web contact forms and the upstream CRM.
//!
//! Stateless request-in/response-out service: the route table picks one of
//! three handlers (health, contact ingest, contacts proxy) and each handler
//! makes at most one outbound CRM call. Application failures are converted
//! to JSON error responses at the handler boundary; the hyper service only
//! errors on transport-level faults.

pub mod api;
pub mod config;
pub mod cors;
pub mod errors;
pub mod metrics_defs;
pub mod router;
#[cfg(test)]
mod testutils;

pub use config::Config;
pub use errors::GatewayError;

use crate::api::contact::ContactIngestHandler;
use crate::api::contacts_proxy::ContactsProxyHandler;
use crate::api::health::HealthHandler;
use crate::api::utils::{HandlerBody, json_response};
use crate::config::RouteAction;
use crate::metrics_defs::{REQUESTS_ROUTED, REQUESTS_UNROUTED};
use crate::router::Router;
use crm::CrmClient;
use http_body_util::BodyExt;
use hyper::body::{Bytes, Incoming};
use hyper::service::Service;
use hyper::{Request, Response, StatusCode};
use shared::http::run_http_service;
use std::pin::Pin;
use std::sync::Arc;

/// Validates the config and serves the gateway until the listener fails.
pub async fn run(config: Config) -> Result<(), GatewayError> {
    config.validate()?;
    let service = GatewayService::new(config.clone());
    run_http_service(&config.listener.host, config.listener.port, service).await
}

/// The hyper service: buffers the request body, routes, dispatches.
#[derive(Clone)]
pub struct GatewayService {
    inner: Arc<Inner>,
}

struct Inner {
    router: Router,
    health: HealthHandler,
    contact_ingest: ContactIngestHandler,
    contacts_proxy: ContactsProxyHandler,
}

impl GatewayService {
    pub fn new(config: Config) -> Self {
        let crm = CrmClient::new(config.crm.base_url.clone());

        Self {
            inner: Arc::new(Inner {
                router: Router::new(config.routes),
                health: HealthHandler::new(config.service_name),
                contact_ingest: ContactIngestHandler::new(crm.clone(), config.crm.ingest_token),
                contacts_proxy: ContactsProxyHandler::new(crm, config.crm.proxy_token),
            }),
        }
    }
}

impl Inner {
    /// Dispatches a fully-buffered request to its handler.
    async fn dispatch(&self, req: Request<Bytes>) -> Response<HandlerBody> {
        match self.router.find_match(&req) {
            Some(action) => {
                shared::counter!(REQUESTS_ROUTED, "action" => action.as_str()).increment(1);
                match action {
                    RouteAction::Health => self.health.handle(),
                    RouteAction::ContactIngest => self.contact_ingest.handle(req).await,
                    RouteAction::ContactsProxy => self.contacts_proxy.handle(req).await,
                }
            }
            None => {
                shared::counter!(REQUESTS_UNROUTED).increment(1);
                json_response(
                    StatusCode::NOT_FOUND,
                    &serde_json::json!({"error": "Not found"}),
                )
            }
        }
    }
}

impl Service<Request<Incoming>> for GatewayService {
    type Response = Response<HandlerBody>;
    type Error = GatewayError;
    type Future =
        Pin<Box<dyn Future<Output = Result<Self::Response, Self::Error>> + Send + 'static>>;

    fn call(&self, req: Request<Incoming>) -> Self::Future {
        let inner = self.inner.clone();

        Box::pin(async move {
            // Buffer the whole body up front; handlers work on Bytes.
            let (parts, body) = req.into_parts();
            let body_bytes = match body.collect().await {
                Ok(collected) => collected.to_bytes(),
                Err(e) => {
                    let err = GatewayError::RequestBody(e.to_string());
                    return Ok(api::utils::error_response(&err));
                }
            };

            let req = Request::from_parts(parts, body_bytes);
            Ok(inner.dispatch(req).await)
        })
    }
}
