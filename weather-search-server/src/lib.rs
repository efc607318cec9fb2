//! Weather backend.
//!
//! Serves `POST /weather` by asking the configured upstream provider for
//! today's report, plus `GET /` and `GET /health` for liveness checks. Every
//! failure is answered with `{"detail": "..."}`.

use anyhow::Context;
use axum::{
    Json, Router,
    extract::{State, rejection::JsonRejection},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{get, post},
};
use serde_json::{Value, json};
use std::sync::Arc;
use tower_http::cors::CorsLayer;

use weather_search_core::{
    Config, ErrorBody, ProviderError, WeatherProvider, WeatherReport, WeatherRequest,
    provider::provider_from_config,
};

#[derive(Debug, Clone)]
pub struct AppState {
    provider: Arc<dyn WeatherProvider>,
}

/// Routes with CORS open to any origin.
pub fn router(provider: Arc<dyn WeatherProvider>) -> Router {
    Router::new()
        .route("/", get(root))
        .route("/health", get(health))
        .route("/weather", post(get_weather))
        .layer(CorsLayer::permissive())
        .with_state(AppState { provider })
}

/// Bind `config.server_addr()` and serve until Ctrl-C.
pub async fn serve(config: &Config) -> anyhow::Result<()> {
    let provider: Arc<dyn WeatherProvider> = Arc::from(provider_from_config(config)?);
    let addr = config.server_addr();

    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .with_context(|| format!("Failed to bind {addr}"))?;
    tracing::info!(%addr, "weather API listening");

    axum::serve(listener, router(provider))
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("Weather API server failed")?;

    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!(error = %e, "failed to listen for Ctrl-C");
        std::future::pending::<()>().await;
    }
    tracing::info!("shutting down");
}

async fn root() -> Json<Value> {
    Json(json!({ "message": "Weather API is running!" }))
}

async fn health() -> Json<Value> {
    Json(json!({ "status": "healthy", "service": "Weather API" }))
}

async fn get_weather(
    State(state): State<AppState>,
    payload: Result<Json<WeatherRequest>, JsonRejection>,
) -> Result<Json<WeatherReport>, ApiError> {
    let Json(request) = payload?;
    tracing::info!(location = %request.location, "weather lookup");

    let report = state.provider.get_weather(&request.location).await.inspect_err(|e| {
        tracing::warn!(location = %request.location, error = %e, "weather lookup failed");
    })?;

    Ok(Json(report))
}

/// Error half of the `/weather` handler.
#[derive(Debug)]
pub struct ApiError {
    status: StatusCode,
    detail: String,
}

impl From<ProviderError> for ApiError {
    fn from(err: ProviderError) -> Self {
        let status =
            StatusCode::from_u16(err.status_code()).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);
        Self { status, detail: err.to_string() }
    }
}

impl From<JsonRejection> for ApiError {
    fn from(rejection: JsonRejection) -> Self {
        Self { status: rejection.status(), detail: rejection.body_text() }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        (self.status, Json(ErrorBody::new(self.detail))).into_response()
    }
}
