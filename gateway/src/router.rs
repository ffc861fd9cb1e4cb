use crate::config::{Route, RouteAction, RouteMatch};
use hyper::{Method, Request};
use std::sync::Arc;

/// Matches incoming requests against the configured route table.
///
/// Routes are evaluated in table order and the first match wins; an
/// unmatched request is the caller's 404. `OPTIONS` requests are matched on
/// path only, so CORS preflights reach the handler that owns the path and
/// are answered there.
#[derive(Clone)]
pub struct Router {
    routes: Arc<Vec<Route>>,
}

impl Router {
    pub fn new(routes: Vec<Route>) -> Self {
        Self {
            routes: Arc::new(routes),
        }
    }

    /// Finds the action for the first route matching the request, if any.
    pub fn find_match<B>(&self, req: &Request<B>) -> Option<RouteAction> {
        let action = self
            .routes
            .iter()
            .find(|route| matches_route(req, &route.r#match))
            .map(|route| route.action);

        match action {
            Some(action) => {
                tracing::debug!(action = action.as_str(), path = %req.uri().path(), "matched route");
            }
            None => {
                tracing::warn!(
                    method = %req.method(),
                    path = %req.uri().path(),
                    "no route matched"
                );
            }
        }

        action
    }
}

fn matches_route<B>(req: &Request<B>, m: &RouteMatch) -> bool {
    // Preflights carry the browser's intended method in a header, not the
    // request line; the path decides which handler answers them.
    if req.method() != Method::OPTIONS
        && let Some(expected_method) = m.method
        && expected_method != *req.method()
    {
        return false;
    }

    let path = req.uri().path();

    if let Some(expected_path) = &m.path
        && path != expected_path
    {
        return false;
    }

    if let Some(prefix) = &m.path_prefix
        && !path.starts_with(prefix.as_str())
    {
        return false;
    }

    if let Some(suffix) = &m.path_suffix
        && !path.ends_with(suffix.as_str())
    {
        return false;
    }

    true
}
