//! Request handlers.
//!
//! `extract_info` is the only handler with behaviour; the rest are static
//! responses kept for operational convenience (health probes, a root banner,
//! and GET hints for callers who open the POST endpoints in a browser).

use super::{ApiResponse, AppState};
use crate::document::ExtractionRequest;
use crate::extract::extract;
use axum::extract::State;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde_json::json;
use tracing::warn;

/// `POST /extract-info` — run the extraction pipeline on one image.
///
/// Bad payloads are rejected with HTTP 400 before any provider call.
/// Pipeline failures (provider unreachable, unparseable model output) are
/// reported inside the envelope with HTTP 200, so clients distinguish them
/// by `success` and `error`, not by status code.
pub async fn extract_info(
    State(state): State<AppState>,
    Json(request): Json<ExtractionRequest>,
) -> Response {
    match extract(state.provider.as_ref(), &request).await {
        Ok(outcome) => Json(ApiResponse::success(outcome.data, outcome.validation)).into_response(),
        Err(e) if e.is_bad_request() => {
            (StatusCode::BAD_REQUEST, Json(ApiResponse::failure(e.to_string()))).into_response()
        }
        Err(e) => {
            warn!(error = %e, "extraction failed");
            Json(ApiResponse::failure(format!("Failed to process image: {e}"))).into_response()
        }
    }
}

/// `GET /` — liveness banner.
pub async fn root() -> Json<serde_json::Value> {
    Json(json!({
        "message": "cardscan API is running!",
        "status": "ok"
    }))
}

/// `GET /health` — health probe.
pub async fn health() -> Json<serde_json::Value> {
    Json(json!({
        "status": "healthy",
        "service": "cardscan"
    }))
}

/// `GET /extract-license`, `GET /extract-license-info` — usage hint for the
/// POST endpoint.
pub async fn usage_hint() -> Json<serde_json::Value> {
    Json(json!({
        "message": "This endpoint accepts POST requests only",
        "method": "POST",
        "endpoint": "/extract-info",
        "content_type": "application/json",
        "required_fields": ["image_data", "mime_type", "card_type"],
        "description": "Upload an identity-document image to extract information",
        "example": {
            "image_data": "base64_encoded_image_string",
            "mime_type": "image/jpeg",
            "card_type": "driving_license"
        }
    }))
}
