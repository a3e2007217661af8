use osdi::config::{FetchLimits, Source, Upstream};
use serde::Deserialize;
use std::collections::HashSet;
use std::fs::File;
use thiserror::Error;

/// Network listener configuration
#[derive(Clone, Debug, Deserialize, PartialEq)]
pub struct Listener {
    pub host: String,
    pub port: u16,
}

impl Default for Listener {
    fn default() -> Self {
        Listener {
            host: "127.0.0.1".into(),
            port: 3000,
        }
    }
}

#[derive(Clone, Debug, Deserialize, PartialEq)]
pub struct MetricsConfig {
    pub statsd_host: String,
    pub statsd_port: u16,
}

#[derive(Clone, Debug, Deserialize, PartialEq)]
pub struct LoggingConfig {
    pub sentry_dsn: String,
}

/// A source exposed by the service, addressed as `/supporters/{name}`.
#[derive(Clone, Debug, Deserialize, PartialEq)]
pub struct NamedSource {
    pub name: String,
    #[serde(flatten)]
    pub source: Source,
}

fn default_cache_ttl_secs() -> u64 {
    // 15 minutes
    900
}

#[derive(Debug, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub listener: Listener,
    pub upstream: Upstream,
    pub sources: Vec<NamedSource>,
    #[serde(default)]
    pub fetch: FetchLimits,
    /// Seconds a cached roster is served before a fresh aggregation runs.
    #[serde(default = "default_cache_ttl_secs")]
    pub cache_ttl_secs: u64,
    pub metrics: Option<MetricsConfig>,
    pub logging: Option<LoggingConfig>,
}

impl Config {
    pub fn from_file(path: &std::path::Path) -> Result<Self, ConfigError> {
        let file = File::open(path)?;
        let config = serde_yaml::from_reader(file)?;

        Ok(config)
    }

    /// Validates the service configuration
    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.listener.port == 0 {
            return Err(ValidationError::InvalidPort);
        }

        if self.sources.is_empty() {
            return Err(ValidationError::NoSources);
        }

        let mut names = HashSet::new();
        for source in &self.sources {
            if source.name.is_empty() {
                return Err(ValidationError::EmptySourceName);
            }

            if !names.insert(&source.name) {
                return Err(ValidationError::DuplicateSource(source.name.clone()));
            }
        }

        if self.fetch.max_pages == 0 {
            return Err(ValidationError::InvalidPageLimit);
        }

        if self.fetch.lookup_concurrency == 0 {
            return Err(ValidationError::InvalidLookupConcurrency);
        }

        Ok(())
    }
}

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("could not load config from file: {0}")]
    LoadError(#[from] std::io::Error),
    #[error("could not parse config: {0}")]
    ParseError(#[from] serde_yaml::Error),
}

#[derive(Error, Debug)]
pub enum ValidationError {
    #[error("Port cannot be 0")]
    InvalidPort,

    #[error("No sources configured")]
    NoSources,

    #[error("Empty source name")]
    EmptySourceName,

    #[error("Duplicate source name: {0}")]
    DuplicateSource(String),

    #[error("max_pages cannot be 0")]
    InvalidPageLimit,

    #[error("lookup_concurrency cannot be 0")]
    InvalidLookupConcurrency,
}
