use serde::Deserialize;
use thiserror::Error;
use url::Url;

#[derive(Error, Debug)]
pub enum ValidationError {
    #[error("Port cannot be 0")]
    InvalidPort,

    #[error("Service name cannot be empty")]
    EmptyServiceName,

    #[error("Route match must constrain at least one of path, path_prefix, path_suffix")]
    UnconstrainedRoute,

    #[error("No routes configured")]
    NoRoutes,
}

/// HTTP methods supported for route matching
#[derive(Clone, Copy, Debug, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "UPPERCASE")]
pub enum HttpMethod {
    Get,
    Post,
    Put,
    Delete,
}

impl PartialEq<hyper::Method> for HttpMethod {
    fn eq(&self, other: &hyper::Method) -> bool {
        match self {
            HttpMethod::Get => other == hyper::Method::GET,
            HttpMethod::Post => other == hyper::Method::POST,
            HttpMethod::Put => other == hyper::Method::PUT,
            HttpMethod::Delete => other == hyper::Method::DELETE,
        }
    }
}

/// Gateway configuration.
///
/// Assembled by the hosting binary (file config plus credentials read from
/// the environment at startup) and injected here; handlers never consult
/// ambient process state themselves.
#[derive(Clone, Debug, Deserialize)]
pub struct Config {
    /// Listener for incoming requests
    pub listener: Listener,
    /// Name reported by the health endpoint
    pub service_name: String,
    /// Upstream CRM settings
    pub crm: CrmConfig,
    /// Request routing rules, evaluated in order; first match wins
    pub routes: Vec<Route>,
}

impl Config {
    pub fn validate(&self) -> Result<(), ValidationError> {
        self.listener.validate()?;

        if self.service_name.is_empty() {
            return Err(ValidationError::EmptyServiceName);
        }

        if self.routes.is_empty() {
            return Err(ValidationError::NoRoutes);
        }

        for route in &self.routes {
            route.r#match.validate()?;
        }

        Ok(())
    }
}

/// Network listener configuration
#[derive(Clone, Debug, Deserialize)]
pub struct Listener {
    /// Host address to bind to (e.g., "0.0.0.0" or "127.0.0.1")
    pub host: String,
    /// Port number to listen on
    pub port: u16,
}

impl Listener {
    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.port == 0 {
            return Err(ValidationError::InvalidPort);
        }
        Ok(())
    }
}

/// Upstream CRM configuration.
///
/// The two tokens are deliberately independent: the contact ingest endpoint
/// and the contacts proxy may be provisioned with different CRM app
/// credentials. Either may be absent; the owning handler then answers 500
/// at request time without contacting the CRM.
#[derive(Clone, Debug, Deserialize)]
pub struct CrmConfig {
    /// Base URL of the CRM API
    ///
    /// Note: Uses the `url::Url` type so invalid URLs are rejected during
    /// config deserialization.
    pub base_url: Url,
    /// Bearer token for the contact ingest handler (from the environment)
    #[serde(skip)]
    pub ingest_token: Option<String>,
    /// Bearer token for the contacts proxy handler (from the environment)
    #[serde(skip)]
    pub proxy_token: Option<String>,
}

/// A routing rule: match criteria plus the handler to dispatch to
#[derive(Clone, Debug, Deserialize)]
pub struct Route {
    pub r#match: RouteMatch,
    pub action: RouteAction,
}

/// Match criteria for a route. Unset fields match anything.
///
/// Routes for handlers that answer 405 themselves should match on path
/// only; a `method` constraint would divert other methods to the
/// router-level 404 before the handler can reject them.
#[derive(Clone, Debug, Default, Deserialize)]
pub struct RouteMatch {
    pub method: Option<HttpMethod>,
    pub path: Option<String>,
    pub path_prefix: Option<String>,
    pub path_suffix: Option<String>,
}

impl RouteMatch {
    fn validate(&self) -> Result<(), ValidationError> {
        if self.path.is_none() && self.path_prefix.is_none() && self.path_suffix.is_none() {
            return Err(ValidationError::UnconstrainedRoute);
        }
        Ok(())
    }
}

/// Handlers a route can dispatch to
#[derive(Clone, Copy, Debug, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum RouteAction {
    Health,
    ContactIngest,
    ContactsProxy,
}

impl RouteAction {
    pub const fn as_str(&self) -> &'static str {
        match self {
            RouteAction::Health => "health",
            RouteAction::ContactIngest => "contact_ingest",
            RouteAction::ContactsProxy => "contacts_proxy",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn test_config(routes: Vec<Route>) -> Config {
        Config {
            listener: Listener {
                host: "127.0.0.1".into(),
                port: 8080,
            },
            service_name: "formgate-bff".into(),
            crm: CrmConfig {
                base_url: Url::parse("https://api.hubapi.com").unwrap(),
                ingest_token: None,
                proxy_token: None,
            },
            routes,
        }
    }

    fn path_route(path: &str, action: RouteAction) -> Route {
        Route {
            r#match: RouteMatch {
                path: Some(path.into()),
                ..Default::default()
            },
            action,
        }
    }

    #[test]
    fn valid_config_passes() {
        let config = test_config(vec![path_route("/api/health", RouteAction::Health)]);
        config.validate().expect("config should validate");
    }

    #[test]
    fn zero_port_is_rejected() {
        let mut config = test_config(vec![path_route("/api/health", RouteAction::Health)]);
        config.listener.port = 0;
        assert!(matches!(
            config.validate(),
            Err(ValidationError::InvalidPort)
        ));
    }

    #[test]
    fn route_without_path_constraint_is_rejected() {
        let config = test_config(vec![Route {
            r#match: RouteMatch {
                method: Some(HttpMethod::Post),
                ..Default::default()
            },
            action: RouteAction::ContactIngest,
        }]);
        assert!(matches!(
            config.validate(),
            Err(ValidationError::UnconstrainedRoute)
        ));
    }

    #[test]
    fn empty_route_table_is_rejected() {
        let config = test_config(vec![]);
        assert!(matches!(config.validate(), Err(ValidationError::NoRoutes)));
    }
}
