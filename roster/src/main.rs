mod api;
mod config;

use clap::Parser;
use metrics_exporter_statsd::StatsdBuilder;
use std::path::PathBuf;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;

/// Serves supporter rosters aggregated from an OSDI upstream.
#[derive(Parser)]
struct Cli {
    /// Path to the YAML configuration file
    #[arg(long, default_value = "config.yaml")]
    config: PathBuf,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();
    let config = config::Config::from_file(&cli.config)?;
    config.validate()?;

    init_tracing();

    // The guard flushes pending events on drop, so it lives for the whole
    // process.
    let _sentry = config.logging.as_ref().map(|logging| {
        sentry::init((
            logging.sentry_dsn.clone(),
            sentry::ClientOptions {
                release: sentry::release_name!(),
                ..Default::default()
            },
        ))
    });

    if let Some(metrics_config) = &config.metrics {
        init_metrics(metrics_config)?;
    }

    let state = api::AppState::from_config(&config)?;

    tracing::info!(
        host = %config.listener.host,
        port = config.listener.port,
        sources = config.sources.len(),
        "starting roster service"
    );
    api::serve(&config.listener, state).await?;
    Ok(())
}

fn init_tracing() {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .with(tracing_subscriber::fmt::layer())
        .with(sentry::integrations::tracing::layer())
        .init();
}

fn init_metrics(config: &config::MetricsConfig) -> Result<(), Box<dyn std::error::Error>> {
    let recorder = StatsdBuilder::from(config.statsd_host.as_str(), config.statsd_port)
        .build(Some("roster"))?;
    metrics::set_global_recorder(recorder)
        .map_err(|_| "global metrics recorder already installed")?;

    for def in osdi::metrics_defs::ALL_METRICS {
        match def.metric_type {
            osdi::metrics_defs::MetricType::Counter => {
                metrics::describe_counter!(def.name, def.description);
            }
            osdi::metrics_defs::MetricType::Histogram => {
                metrics::describe_histogram!(def.name, def.description);
            }
        }
    }
    Ok(())
}
