use serde::Deserialize;
use std::fs::File;

#[derive(Debug, Deserialize)]
pub struct MetricsConfig {
    pub statsd_host: String,
    pub statsd_port: u16,
}

#[derive(Debug, Deserialize)]
pub struct LoggingConfig {
    pub sentry_dsn: String,
}

/// Top-level file configuration for the formgate binary.
///
/// The gateway section (listener, service name, CRM base URL, routes) is
/// deserialized straight into the gateway's own config type; CRM credentials
/// never live in the file and are injected from the environment via
/// [`Config::with_credentials`].
#[derive(Debug, Deserialize)]
pub struct Config {
    #[serde(flatten)]
    pub gateway: gateway::Config,
    pub metrics: Option<MetricsConfig>,
    pub logging: Option<LoggingConfig>,
}

impl Config {
    pub fn from_file(path: &std::path::Path) -> Result<Self, ConfigError> {
        let file = File::open(path)?;
        let data = serde_yaml::from_reader(file)?;

        Ok(data)
    }

    /// Injects the per-handler CRM credentials. Missing credentials are not
    /// an error here: the owning handler answers 500 at request time.
    pub fn with_credentials(
        mut self,
        ingest_token: Option<String>,
        proxy_token: Option<String>,
    ) -> Self {
        self.gateway.crm.ingest_token = ingest_token;
        self.gateway.crm.proxy_token = proxy_token;
        self
    }
}

#[derive(thiserror::Error, Debug)]
pub enum ConfigError {
    #[error("could not load config from file: {0}")]
    LoadError(#[from] std::io::Error),
    #[error("could not parse config: {0}")]
    ParseError(#[from] serde_yaml::Error),
}

#[cfg(test)]
mod tests {
    use super::*;
    use gateway::config::RouteAction;
    use std::io::Write;

    fn write_tmp_file(s: &str) -> tempfile::NamedTempFile {
        let mut tmp = tempfile::NamedTempFile::new().expect("create temp file");
        write!(tmp, "{}", s).expect("write yaml");

        tmp
    }

    const FULL_YAML: &str = r#"
        listener:
            host: 0.0.0.0
            port: 8080
        service_name: formgate-bff
        crm:
            base_url: https://api.hubapi.com
        routes:
            - match:
                path: /api/hubspot/contact
              action: contact_ingest
            - match:
                path_prefix: /api/hubspot-proxy
              action: contacts_proxy
            - match:
                path: /api/health
              action: health
        metrics:
            statsd_host: 127.0.0.1
            statsd_port: 8125
        "#;

    #[test]
    fn full_config_parses_and_validates() {
        let tmp = write_tmp_file(FULL_YAML);
        let config = Config::from_file(tmp.path()).expect("load config");

        assert_eq!(config.gateway.service_name, "formgate-bff");
        assert_eq!(config.gateway.listener.port, 8080);
        assert_eq!(config.gateway.crm.base_url.as_str(), "https://api.hubapi.com/");
        assert_eq!(config.gateway.routes.len(), 3);
        assert_eq!(config.gateway.routes[0].action, RouteAction::ContactIngest);
        assert_eq!(config.metrics.expect("metrics section").statsd_port, 8125);

        config.gateway.validate().expect("gateway config valid");
    }

    #[test]
    fn credentials_come_from_injection_not_the_file() {
        let tmp = write_tmp_file(FULL_YAML);
        let config = Config::from_file(tmp.path()).expect("load config");
        assert!(config.gateway.crm.ingest_token.is_none());
        assert!(config.gateway.crm.proxy_token.is_none());

        let config = config.with_credentials(Some("a".into()), None);
        assert_eq!(config.gateway.crm.ingest_token.as_deref(), Some("a"));
        assert!(config.gateway.crm.proxy_token.is_none());
    }

    #[test]
    fn malformed_yaml_is_a_parse_error() {
        let tmp = write_tmp_file("listener: [not, a, mapping");
        let err = Config::from_file(tmp.path()).unwrap_err();
        assert!(matches!(err, ConfigError::ParseError(_)));
    }

    #[test]
    fn invalid_crm_url_is_rejected_at_parse_time() {
        let yaml = FULL_YAML.replace("https://api.hubapi.com", "not a url");
        let tmp = write_tmp_file(&yaml);
        assert!(matches!(
            Config::from_file(tmp.path()),
            Err(ConfigError::ParseError(_))
        ));
    }
}
