//! HTTP boundary: axum router, shared state, and the response envelope.
//!
//! The server is deliberately thin. One POST endpoint drives the pipeline;
//! everything else is a static informational response. State is a single
//! provider handle behind an `Arc` — requests share nothing else and never
//! interact.

pub mod handlers;

use crate::document::ExtractedData;
use crate::pipeline::validate::ValidationReport;
use crate::provider::VisionProvider;
use axum::http::HeaderValue;
use axum::routing::{get, post};
use axum::Router;
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tower_http::cors::{AllowOrigin, Any, CorsLayer};
use tower_http::trace::TraceLayer;

/// Shared state: the provider every request calls through.
#[derive(Clone)]
pub struct AppState {
    pub provider: Arc<dyn VisionProvider>,
}

impl AppState {
    pub fn new(provider: Arc<dyn VisionProvider>) -> Self {
        Self { provider }
    }
}

/// The wire envelope for every extraction response.
///
/// All-or-nothing: a success carries both `data` and `validation`; a failure
/// carries only `error`. Fields are always present so clients can rely on
/// `error: null` meaning success.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiResponse {
    pub success: bool,
    pub data: Option<ExtractedData>,
    pub validation: Option<ValidationReport>,
    pub error: Option<String>,
}

impl ApiResponse {
    pub fn success(data: ExtractedData, validation: ValidationReport) -> Self {
        Self {
            success: true,
            data: Some(data),
            validation: Some(validation),
            error: None,
        }
    }

    pub fn failure(error: impl Into<String>) -> Self {
        Self {
            success: false,
            data: None,
            validation: None,
            error: Some(error.into()),
        }
    }
}

/// Build the application router.
///
/// `allowed_origins` restricts CORS to the given origins; an empty list
/// allows any origin (the development default). Origins that fail to parse
/// as header values are skipped.
pub fn router(state: AppState, allowed_origins: &[String]) -> Router {
    let cors = if allowed_origins.is_empty() {
        CorsLayer::new()
            .allow_origin(Any)
            .allow_methods(Any)
            .allow_headers(Any)
    } else {
        let origins: Vec<HeaderValue> = allowed_origins
            .iter()
            .filter_map(|o| o.parse().ok())
            .collect();
        CorsLayer::new()
            .allow_origin(AllowOrigin::list(origins))
            .allow_methods(Any)
            .allow_headers(Any)
    };

    Router::new()
        .route("/", get(handlers::root))
        .route("/health", get(handlers::health))
        .route("/extract-license", get(handlers::usage_hint))
        .route("/extract-license-info", get(handlers::usage_hint))
        .route("/extract-info", post(handlers::extract_info))
        .layer(TraceLayer::new_for_http())
        .layer(cors)
        .with_state(state)
}
