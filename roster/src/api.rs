use crate::config::{Config, Listener};
use axum::extract::{Path, State};
use axum::http::{StatusCode, header};
use axum::response::{IntoResponse, Response};
use axum::routing::get;
use axum::{Json, Router};
use osdi::{ApiClient, Roster, RosterCache, Source, SupporterAggregator, UpstreamError};
use serde::Serialize;
use std::collections::HashMap;
use std::sync::Arc;
use std::time::Duration;
use tokio::net::TcpListener;

#[derive(thiserror::Error, Debug)]
pub enum ApiServeError {
    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),
}

/// Everything a request handler needs, wired once at startup.
#[derive(Clone)]
pub struct AppState {
    inner: Arc<AppStateInner>,
}

struct AppStateInner {
    sources: HashMap<String, Source>,
    aggregator: SupporterAggregator,
    cache: RosterCache,
}

impl AppState {
    pub fn new(
        sources: HashMap<String, Source>,
        aggregator: SupporterAggregator,
        cache: RosterCache,
    ) -> Self {
        AppState {
            inner: Arc::new(AppStateInner {
                sources,
                aggregator,
                cache,
            }),
        }
    }

    pub fn from_config(config: &Config) -> Result<Self, UpstreamError> {
        let client = ApiClient::new(
            &config.upstream.base_url,
            config.upstream.resolved_token(),
            &config.fetch,
        )?;
        let aggregator = SupporterAggregator::new(client, &config.fetch);
        let cache = RosterCache::new(Duration::from_secs(config.cache_ttl_secs));
        let sources = config
            .sources
            .iter()
            .map(|entry| (entry.name.clone(), entry.source.clone()))
            .collect();

        Ok(AppState::new(sources, aggregator, cache))
    }
}

pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/supporters/{name}", get(supporters))
        .route("/health", get(health))
        .with_state(state)
}

pub async fn serve(listener: &Listener, state: AppState) -> Result<(), ApiServeError> {
    let addr = format!("{}:{}", listener.host, listener.port);

    let listener = TcpListener::bind(addr).await?;
    axum::serve(listener, router(state)).await?;
    Ok(())
}

async fn health() -> &'static str {
    "ok\n"
}

async fn supporters(
    State(state): State<AppState>,
    Path(name): Path<String>,
) -> Result<RosterResponse, ApiError> {
    let source = state
        .inner
        .sources
        .get(&name)
        .ok_or_else(|| ApiError::UnknownSource(name.clone()))?;
    let key = source.cache_key();

    if let Some(roster) = state.inner.cache.get(&key) {
        return Ok(RosterResponse(roster));
    }

    let roster = state
        .inner
        .aggregator
        .aggregate(source)
        .await
        .map_err(|err| {
            tracing::error!(source = %name, error = %err, "aggregation failed");
            ApiError::Upstream(err)
        })?;
    state.inner.cache.insert(&key, roster.clone());

    Ok(RosterResponse(roster))
}

struct RosterResponse(Roster);

impl IntoResponse for RosterResponse {
    fn into_response(self) -> Response {
        // The roster is embedded by static frontends on other origins.
        (
            StatusCode::OK,
            [(header::ACCESS_CONTROL_ALLOW_ORIGIN, "*")],
            Json(self.0),
        )
            .into_response()
    }
}

#[derive(thiserror::Error, Debug)]
pub enum ApiError {
    #[error("unknown source: {0}")]
    UnknownSource(String),

    // The underlying error is logged, not exposed to the caller.
    #[error("failed to fetch supporter data")]
    Upstream(#[from] UpstreamError),
}

#[derive(Serialize)]
struct ApiErrorResponse {
    error: String,
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = match &self {
            ApiError::UnknownSource(_) => StatusCode::NOT_FOUND,
            ApiError::Upstream(_) => StatusCode::INTERNAL_SERVER_ERROR,
        };

        let body = Json(ApiErrorResponse {
            error: self.to_string(),
        });

        (status, [(header::ACCESS_CONTROL_ALLOW_ORIGIN, "*")], body).into_response()
    }
}
