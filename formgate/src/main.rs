mod config;

use clap::Parser;
use config::Config;
use gateway::api::contact::INGEST_TOKEN_VAR;
use gateway::api::contacts_proxy::PROXY_TOKEN_VAR;
use metrics_exporter_statsd::StatsdBuilder;
use std::path::PathBuf;
use std::process;

#[derive(Parser)]
#[command(name = "formgate", about = "Contact-form gateway in front of the CRM")]
struct Cli {
    /// Path to the YAML configuration file
    #[arg(long, short)]
    config: PathBuf,
}

fn main() {
    let cli = Cli::parse();

    let config = match Config::from_file(&cli.config) {
        Ok(config) => config,
        Err(e) => {
            eprintln!("formgate: {e}");
            process::exit(1);
        }
    };

    // Sentry wants to be initialized before the runtime spawns threads.
    let _sentry_guard = config.logging.as_ref().map(|logging| {
        sentry::init((
            logging.sentry_dsn.clone(),
            sentry::ClientOptions {
                release: sentry::release_name!(),
                ..Default::default()
            },
        ))
    });

    init_tracing();

    if let Some(metrics_config) = &config.metrics
        && let Err(e) = init_metrics(metrics_config)
    {
        tracing::warn!(error = %e, "statsd exporter disabled");
    }

    // Credentials are read from the environment exactly once, here; the
    // gateway only ever sees the assembled config.
    let gateway_config = config
        .with_credentials(
            std::env::var(INGEST_TOKEN_VAR).ok(),
            std::env::var(PROXY_TOKEN_VAR).ok(),
        )
        .gateway;

    let runtime = match tokio::runtime::Builder::new_multi_thread().enable_all().build() {
        Ok(runtime) => runtime,
        Err(e) => {
            eprintln!("formgate: could not start runtime: {e}");
            process::exit(1);
        }
    };

    if let Err(e) = runtime.block_on(gateway::run(gateway_config)) {
        tracing::error!(error = %e, "gateway exited with error");
        process::exit(1);
    }
}

fn init_tracing() {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();
}

fn init_metrics(config: &config::MetricsConfig) -> Result<(), String> {
    let recorder = StatsdBuilder::from(&config.statsd_host, config.statsd_port)
        .build(Some("formgate"))
        .map_err(|e| e.to_string())?;
    metrics::set_global_recorder(recorder).map_err(|e| e.to_string())?;
    Ok(())
}
