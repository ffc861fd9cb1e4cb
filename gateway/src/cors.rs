use hyper::header::{
    ACCESS_CONTROL_ALLOW_HEADERS, ACCESS_CONTROL_ALLOW_METHODS, ACCESS_CONTROL_ALLOW_ORIGIN,
    HeaderMap, HeaderValue,
};

/// CORS header set for one handler.
///
/// Every response from a handler, including errors, carries its policy's
/// headers so browser callers can always read the outcome.
#[derive(Debug, Clone, Copy)]
pub struct CorsPolicy {
    pub allow_methods: &'static str,
    pub allow_headers: &'static str,
}

/// Contact ingest accepts browser form posts and a custom app-key header.
pub const INGEST_CORS: CorsPolicy = CorsPolicy {
    allow_methods: "POST, OPTIONS",
    allow_headers: "Content-Type, Authorization, X-App-Key",
};

/// The contacts proxy serves both search (GET) and create (POST).
pub const PROXY_CORS: CorsPolicy = CorsPolicy {
    allow_methods: "GET,POST,OPTIONS",
    allow_headers: "Content-Type,Authorization",
};

pub fn apply(headers: &mut HeaderMap, policy: &CorsPolicy) {
    headers.insert(ACCESS_CONTROL_ALLOW_ORIGIN, HeaderValue::from_static("*"));
    headers.insert(
        ACCESS_CONTROL_ALLOW_METHODS,
        HeaderValue::from_static(policy.allow_methods),
    );
    headers.insert(
        ACCESS_CONTROL_ALLOW_HEADERS,
        HeaderValue::from_static(policy.allow_headers),
    );
}
