//! HTTP API for the capture tools
//!
//! Thin JSON handlers over `ScreenshotService`. Validation failures answer
//! HTTP 200 with `success: false` and a message; anything unexpected is a
//! generic 500 with details kept in the server logs.

use crate::config::Config;
use crate::devices;
use crate::error::{CaptureError, ErrorSeverity};
use crate::metrics::Metrics;
use crate::schema::{
    parse_request, DimensionScreenshotsRequest, FullPageScreenshotRequest,
    ScrollingScreenshotsRequest,
};
use crate::screenshots::{Screenshot, ScreenshotService};
use axum::{
    extract::State,
    http::StatusCode,
    response::IntoResponse,
    routing::{get, post},
    Json, Router,
};
use metrics_exporter_prometheus::PrometheusHandle;
use serde_json::{json, Value};
use std::sync::Arc;
use std::time::Instant;
use tokio::sync::broadcast;
use tracing::{error, info, warn};
use uuid::Uuid;

/// Process-wide state shared by all handlers. Built once at startup and
/// never mutated afterwards.
pub struct AppState {
    pub screenshots: ScreenshotService,
    pub metrics: Metrics,
    pub metrics_handle: PrometheusHandle,
    pub started_at: Instant,
}

impl AppState {
    pub fn new(
        screenshots: ScreenshotService,
        metrics: Metrics,
        metrics_handle: PrometheusHandle,
    ) -> Self {
        Self {
            screenshots,
            metrics,
            metrics_handle,
            started_at: Instant::now(),
        }
    }
}

pub fn build_router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/tools/full-page-screenshot/api", post(full_page_screenshot))
        .route(
            "/tools/screenshots-for-dimensions/api",
            post(dimension_screenshots),
        )
        .route("/tools/scrolling-screenshots/api", post(scrolling_screenshots))
        .route("/healthz", get(healthz))
        .route("/metrics", get(metrics_exposition))
        .with_state(state)
}

/// Run the HTTP server until the shutdown signal fires.
pub async fn serve(
    config: &Config,
    state: Arc<AppState>,
    mut shutdown: broadcast::Receiver<()>,
) -> Result<(), Box<dyn std::error::Error>> {
    let router = build_router(state);
    let listener =
        tokio::net::TcpListener::bind((config.bind_address.as_str(), config.port)).await?;
    info!("HTTP server listening on {}", listener.local_addr()?);

    axum::serve(listener, router)
        .with_graceful_shutdown(async move {
            let _ = shutdown.recv().await;
        })
        .await?;

    Ok(())
}

async fn full_page_screenshot(
    State(state): State<Arc<AppState>>,
    body: String,
) -> (StatusCode, Json<Value>) {
    let started = Instant::now();
    let request_id = Uuid::new_v4();

    let request = match parse_request::<FullPageScreenshotRequest>(&body)
        .and_then(|r| r.validate().map(|_| r))
    {
        Ok(request) => request,
        Err(e) => return failure(&state, request_id, "full-page-screenshot", e),
    };

    // Any chosen device still renders the whole page on this endpoint;
    // unknown names fall back to the synthetic full-page preset.
    let preset = devices::find_or_full_page(request.device_name.as_deref());
    let screenshot = state.screenshots.capture_full_page(&request.website, preset);

    state.metrics.record_signed(1, started.elapsed());
    info!(
        %request_id,
        website = %request.website,
        device = %screenshot.device,
        "signed full-page capture URL"
    );

    (
        StatusCode::OK,
        Json(json!({ "success": true, "screenshot": screenshot })),
    )
}

async fn dimension_screenshots(
    State(state): State<Arc<AppState>>,
    body: String,
) -> (StatusCode, Json<Value>) {
    let started = Instant::now();
    let request_id = Uuid::new_v4();

    let request = match parse_request::<DimensionScreenshotsRequest>(&body)
        .and_then(|r| r.validate().map(|_| r))
    {
        Ok(request) => request,
        Err(e) => return failure(&state, request_id, "screenshots-for-dimensions", e),
    };

    let screenshots = state.screenshots.capture_all(&request.website);

    state.metrics.record_signed(screenshots.len(), started.elapsed());
    info!(
        %request_id,
        website = %request.website,
        count = screenshots.len(),
        "signed per-device capture URLs"
    );

    (
        StatusCode::OK,
        Json(json!({ "success": true, "screenshots": screenshots })),
    )
}

async fn scrolling_screenshots(
    State(state): State<Arc<AppState>>,
    body: String,
) -> (StatusCode, Json<Value>) {
    let started = Instant::now();
    let request_id = Uuid::new_v4();

    let request = match parse_request::<ScrollingScreenshotsRequest>(&body)
        .and_then(|r| r.validate().map(|_| r))
    {
        Ok(request) => request,
        Err(e) => return failure(&state, request_id, "scrolling-screenshots", e),
    };

    let screenshots: Vec<Screenshot> = match request.device.as_deref().and_then(devices::find) {
        Some(preset) => vec![state.screenshots.capture_scrolling(
            &request.website,
            &preset,
            request.format,
        )],
        None => state
            .screenshots
            .capture_scrolling_all(&request.website, request.format),
    };

    state.metrics.record_signed(screenshots.len(), started.elapsed());
    info!(
        %request_id,
        website = %request.website,
        format = %request.format,
        count = screenshots.len(),
        "signed scrolling capture URLs"
    );

    (
        StatusCode::OK,
        Json(json!({ "success": true, "screenshots": screenshots })),
    )
}

async fn healthz(State(state): State<Arc<AppState>>) -> Json<Value> {
    Json(json!({
        "status": "ok",
        "version": env!("CARGO_PKG_VERSION"),
        "uptime_seconds": state.started_at.elapsed().as_secs(),
    }))
}

async fn metrics_exposition(State(state): State<Arc<AppState>>) -> impl IntoResponse {
    state.metrics_handle.render()
}

fn failure(
    state: &AppState,
    request_id: Uuid,
    tool: &str,
    error: CaptureError,
) -> (StatusCode, Json<Value>) {
    match error.severity() {
        ErrorSeverity::Low => {
            warn!(%request_id, tool, error = %error, "rejected capture request")
        }
        ErrorSeverity::Medium | ErrorSeverity::High => {
            error!(%request_id, tool, error = %error, "capture request failed")
        }
    }

    if error.is_client_error() {
        state.metrics.record_rejected();
        (
            StatusCode::OK,
            Json(json!({ "success": false, "message": error.to_string() })),
        )
    } else {
        state.metrics.record_failed();
        (
            StatusCode::INTERNAL_SERVER_ERROR,
            Json(json!({ "success": false, "message": "Internal application error" })),
        )
    }
}
