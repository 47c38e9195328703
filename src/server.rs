//! Web server module for the exporter.
//!
//! Serves the Prometheus scrape endpoint, a static landing page and a
//! liveness probe.

use askama::Template;
use axum::{
    Json, Router,
    extract::State,
    http::{StatusCode, header},
    response::{Html, IntoResponse, Response},
    routing::get,
};
use prometheus::{Encoder, Registry, TextEncoder};
use serde::Serialize;
use std::sync::Arc;
use tower_http::trace::{DefaultMakeSpan, TraceLayer};

/// Shared application state.
#[derive(Clone)]
pub struct AppState {
    /// Registry holding the cluster collector.
    pub registry: Registry,
    /// Path the scrape endpoint is mounted on.
    pub telemetry_path: String,
}

/// Health check response.
#[derive(Serialize)]
struct HealthResponse {
    status: String,
}

/// Landing page template.
#[derive(Template)]
#[template(path = "index.html")]
struct LandingTemplate {
    telemetry_path: String,
}

/// Wrapper to render Askama templates as Axum responses.
struct HtmlTemplate<T>(T);

impl<T> IntoResponse for HtmlTemplate<T>
where
    T: Template,
{
    fn into_response(self) -> Response {
        match self.0.render() {
            Ok(rendered) => Html(rendered).into_response(),
            Err(err) => {
                tracing::error!(error = %err, "Template render failed");
                StatusCode::INTERNAL_SERVER_ERROR.into_response()
            }
        }
    }
}

/// Create the Axum router with all routes.
pub fn create_router(state: AppState) -> Router {
    let telemetry_path = state.telemetry_path.clone();
    let app_state = Arc::new(state);

    Router::new()
        .route("/", get(landing_handler))
        .route("/healthz", get(healthz_handler))
        .route(&telemetry_path, get(metrics_handler))
        .layer(
            TraceLayer::new_for_http()
                .make_span_with(DefaultMakeSpan::default().include_headers(true)),
        )
        .with_state(app_state)
}

/// Landing page handler.
async fn landing_handler(State(state): State<Arc<AppState>>) -> impl IntoResponse {
    HtmlTemplate(LandingTemplate {
        telemetry_path: state.telemetry_path.clone(),
    })
}

/// Liveness probe. Does not contact the upstream cluster.
async fn healthz_handler() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok".to_string(),
    })
}

/// Scrape endpoint.
///
/// Collectors block on upstream I/O, so gathering runs on the blocking pool.
/// A failed upstream fetch leaves its metrics out of the body but the
/// response is still `200 OK`.
async fn metrics_handler(State(state): State<Arc<AppState>>) -> Response {
    let registry = state.registry.clone();
    let families = match tokio::task::spawn_blocking(move || registry.gather()).await {
        Ok(families) => families,
        Err(e) => {
            tracing::error!(error = %e, "Metric gathering task failed");
            return (StatusCode::INTERNAL_SERVER_ERROR, format!("Error: {}", e)).into_response();
        }
    };

    let encoder = TextEncoder::new();
    let mut buffer = Vec::new();
    if let Err(e) = encoder.encode(&families, &mut buffer) {
        tracing::error!(error = %e, "Metric encoding failed");
        return (StatusCode::INTERNAL_SERVER_ERROR, format!("Error: {}", e)).into_response();
    }

    (
        [(header::CONTENT_TYPE, encoder.format_type().to_string())],
        buffer,
    )
        .into_response()
}
