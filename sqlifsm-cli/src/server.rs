//! HTTP endpoint wrapping the request scanner.
//!
//! - `POST /check-sql-injection` takes `{"http_request": "<raw request>"}`
//!   and answers `{"is_malicious": bool, "status": "success" | "error", ...}`
//! - `GET /health`
//!
//! A payload without `http_request` is scanned as an empty request. A body
//! that is not JSON, or an `http_request` that is not a string, gets a 400
//! with `"status": "error"`.
//!
//! Every request gets its own [`Scanner`], so handlers share nothing but the
//! enabled [`SignatureSet`].

use std::panic::{catch_unwind, AssertUnwindSafe};

use anyhow::{Context, Result};
use axum::body::Bytes;
use axum::extract::State;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::routing::{get, post};
use axum::{Json, Router};
use serde::{Deserialize, Serialize};
use sqlifsm::{Scanner, SignatureSet};
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;
use tracing::{debug, error, info, warn};

/// Characters of the submitted request echoed to the debug log.
const LOG_PREVIEW_CHARS: usize = 100;

#[derive(Debug, Clone)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
    pub cors: bool,
    pub signatures: SignatureSet,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "127.0.0.1".to_string(),
            port: 5000,
            cors: true,
            signatures: SignatureSet::all(),
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct CheckRequest {
    #[serde(default)]
    pub http_request: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Status {
    Success,
    Error,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CheckResponse {
    pub is_malicious: bool,
    pub status: Status,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub signature: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub field: Option<String>,
}

impl CheckResponse {
    fn error(message: impl Into<String>) -> Self {
        CheckResponse {
            is_malicious: false,
            status: Status::Error,
            message: Some(message.into()),
            signature: None,
            field: None,
        }
    }
}

/// Failure while handling a request. Reported as a non-malicious result with
/// an error status, never as a dropped connection.
#[derive(Debug)]
enum ApiError {
    BadRequest(String),
    Internal(String),
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, message) = match self {
            ApiError::BadRequest(message) => (StatusCode::BAD_REQUEST, message),
            ApiError::Internal(message) => (StatusCode::INTERNAL_SERVER_ERROR, message),
        };
        (status, Json(CheckResponse::error(message))).into_response()
    }
}

/// Builds the application router.
pub fn router(config: &ServerConfig) -> Router {
    let app = Router::new()
        .route("/check-sql-injection", post(check_sql_injection))
        .route("/health", get(health_handler))
        .with_state(config.signatures)
        .layer(TraceLayer::new_for_http());
    if config.cors {
        app.layer(CorsLayer::permissive())
    } else {
        app
    }
}

/// Binds `host:port` and serves until Ctrl-C.
pub async fn serve(config: ServerConfig) -> Result<()> {
    let addr = format!("{}:{}", config.host, config.port);
    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .with_context(|| format!("Failed to bind {addr}"))?;

    info!("HTTP server listening on http://{}", addr);
    info!("Scan endpoint: http://{}/check-sql-injection", addr);
    info!("Health endpoint: http://{}/health", addr);
    info!(signatures = %config.signatures, cors = config.cors, "scanner configured");

    axum::serve(listener, router(&config))
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("HTTP server failed")?;

    info!("HTTP server stopped");
    Ok(())
}

async fn shutdown_signal() {
    match tokio::signal::ctrl_c().await {
        Ok(()) => info!("HTTP server received shutdown signal"),
        Err(err) => {
            warn!(error = %err, "cannot listen for Ctrl-C; serving until killed");
            std::future::pending::<()>().await;
        }
    }
}

async fn check_sql_injection(
    State(signatures): State<SignatureSet>,
    body: Bytes,
) -> Result<Json<CheckResponse>, ApiError> {
    let request: CheckRequest = serde_json::from_slice(&body).map_err(|err| {
        debug!(error = %err, "rejecting request payload");
        ApiError::BadRequest(format!("invalid request payload: {err}"))
    })?;

    let preview: String = request.http_request.chars().take(LOG_PREVIEW_CHARS).collect();
    debug!(request = %preview, "received request to scan");

    let response = catch_unwind(AssertUnwindSafe(|| scan(&request.http_request, signatures)))
        .map_err(|_| {
            error!("scan panicked");
            ApiError::Internal("internal error while scanning request".to_string())
        })?;

    debug!(is_malicious = response.is_malicious, "detection result");
    Ok(Json(response))
}

fn scan(raw: &str, signatures: SignatureSet) -> CheckResponse {
    let verdict = Scanner::new().with_signatures(signatures).scan(raw);
    CheckResponse {
        is_malicious: verdict.is_malicious(),
        status: Status::Success,
        message: None,
        signature: verdict.signature().map(|sig| sig.to_string()),
        field: verdict.field().map(|field| field.source.to_string()),
    }
}

async fn health_handler() -> impl IntoResponse {
    Json(serde_json::json!({
        "status": "healthy",
        "server": "sqlifsm",
        "version": sqlifsm::version(),
        "endpoints": {
            "scan": "/check-sql-injection",
            "health": "/health"
        }
    }))
}
