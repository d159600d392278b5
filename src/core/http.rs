//! HTTP endpoint server using Axum

use axum::{
    extract::{Query, Request, State},
    http::StatusCode,
    middleware::Next,
    response::{IntoResponse, Json, Response},
    routing::get,
    Router,
};
use chrono::{NaiveDate, Utc};
use serde::Deserialize;
use serde_json::{json, Value};
use std::sync::Arc;
use std::time::Instant;
use tower::ServiceBuilder;
use tower_http::{
    cors::CorsLayer,
    trace::{DefaultMakeSpan, DefaultOnRequest, DefaultOnResponse, TraceLayer},
};
use tracing::{error, info, Level};

use crate::analysis::{AnalysisError, AnalysisPipeline};
use crate::config::{default_start_date, AnalysisSettings, DEFAULT_SYMBOL};
use crate::metrics::Metrics;
use crate::services::market_data::MarketDataProvider;

#[derive(Clone)]
pub struct AppState {
    pub metrics: Arc<Metrics>,
    pub start_time: Arc<Instant>,
    pub pipeline: Arc<AnalysisPipeline>,
}

impl AppState {
    pub fn new(
        provider: Arc<dyn MarketDataProvider>,
        settings: &AnalysisSettings,
    ) -> Result<Self, prometheus::Error> {
        Ok(Self {
            metrics: Arc::new(Metrics::new()?),
            start_time: Arc::new(Instant::now()),
            pipeline: Arc::new(AnalysisPipeline::new(provider, settings)),
        })
    }
}

/// Liveness only; analysis failures do not change it.
pub async fn health_check(State(state): State<AppState>) -> Result<Json<Value>, StatusCode> {
    let uptime_seconds = state.start_time.elapsed().as_secs();
    Ok(Json(json!({
        "status": "healthy",
        "uptime_seconds": uptime_seconds,
        "service": "stockscope"
    })))
}

pub async fn metrics_handler(State(state): State<AppState>) -> Result<String, StatusCode> {
    state
        .metrics
        .export()
        .map_err(|_| StatusCode::INTERNAL_SERVER_ERROR)
}

/// Middleware to track HTTP request metrics
async fn metrics_middleware(
    State(state): State<AppState>,
    request: Request,
    next: Next,
) -> Response {
    let start = Instant::now();
    let method = request.method().clone();
    let path = request.uri().path().to_string();

    state.metrics.http_requests_in_flight.inc();

    let response = next.run(request).await;
    let status = response.status();
    let duration = start.elapsed();

    state.metrics.http_requests_in_flight.dec();

    state.metrics.http_requests_total.inc();
    state
        .metrics
        .http_request_duration_seconds
        .observe(duration.as_secs_f64());

    if status.is_server_error() {
        tracing::error!(
            method = %method,
            path = %path,
            status = %status,
            duration_ms = duration.as_millis(),
            "HTTP request error"
        );
    }

    response
}

/// Missing fields fall back to the same defaults as the CLI.
#[derive(Debug, Deserialize)]
pub struct AnalysisQuery {
    symbol: Option<String>,
    start: Option<NaiveDate>,
    end: Option<NaiveDate>,
}

fn error_status(error: &AnalysisError) -> StatusCode {
    match error {
        AnalysisError::Validation(_) => StatusCode::BAD_REQUEST,
        AnalysisError::EmptyData { .. } => StatusCode::NOT_FOUND,
        AnalysisError::Fetch(_) => StatusCode::BAD_GATEWAY,
        AnalysisError::Indicator(_) | AnalysisError::Presentation(_) => {
            StatusCode::INTERNAL_SERVER_ERROR
        }
    }
}

/// Run one analysis and return the full report
async fn run_analysis(
    State(state): State<AppState>,
    Query(params): Query<AnalysisQuery>,
) -> Response {
    let symbol = params.symbol.unwrap_or_else(|| DEFAULT_SYMBOL.to_string());
    let start = params.start.unwrap_or_else(default_start_date);
    let end = params.end.unwrap_or_else(|| Utc::now().date_naive());

    let started = Instant::now();
    let result = state.pipeline.run(&symbol, start, end).await;
    let elapsed = started.elapsed().as_secs_f64();

    match result {
        Ok(report) => {
            let outcome = if report.forecast.is_ready() {
                "completed"
            } else {
                "forecast_failed"
            };
            state.metrics.record_analysis(outcome, elapsed);
            (StatusCode::OK, Json(report)).into_response()
        }
        Err(e) => {
            state.metrics.record_analysis(e.outcome(), elapsed);
            let status = error_status(&e);
            if status.is_server_error() {
                error!(symbol = %symbol, error = %e, "Analysis failed for {}", symbol);
            }
            let level = if e.is_warning() { "warning" } else { "error" };
            (
                status,
                Json(json!({
                    "level": level,
                    "error": e.to_string(),
                })),
            )
                .into_response()
        }
    }
}

pub fn create_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health_check))
        .route("/metrics", get(metrics_handler))
        .route("/api/analysis", get(run_analysis))
        .layer(
            ServiceBuilder::new()
                .layer(
                    TraceLayer::new_for_http()
                        .make_span_with(DefaultMakeSpan::new().level(Level::DEBUG))
                        .on_request(DefaultOnRequest::new().level(Level::DEBUG))
                        .on_response(DefaultOnResponse::new().level(Level::DEBUG)),
                )
                .layer(axum::middleware::from_fn_with_state(
                    state.clone(),
                    metrics_middleware,
                ))
                .layer(CorsLayer::permissive()),
        )
        .with_state(state)
}

pub async fn start_server(
    port: u16,
    provider: Arc<dyn MarketDataProvider>,
    settings: AnalysisSettings,
) -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
    let state = AppState::new(provider, &settings).map_err(|e| e.to_string())?;
    let app = create_router(state);
    let listener = tokio::net::TcpListener::bind(format!("0.0.0.0:{}", port)).await?;

    info!(port = port, "HTTP server listening on port {}", port);
    info!(
        "Metrics endpoint available at http://0.0.0.0:{}/metrics",
        port
    );
    axum::serve(listener, app).await?;

    Ok(())
}
