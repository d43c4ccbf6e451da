//! Extraction entry point: drive one request through the full pipeline.
//!
//! ```text
//! check request ─▶ provider call ─▶ normalize ─▶ coerce ─▶ typed parse
//!                                                              │
//!                                          validate ◀──────────┘
//! ```
//!
//! The request is rejected before the provider is contacted when the image
//! payload is unusable. After that, the pipeline is all-or-nothing: either
//! both the extracted record and its validation report are produced, or the
//! call fails with a single error and nothing is returned.

use crate::document::{DocumentType, ExtractedData, ExtractionRequest};
use crate::error::ExtractError;
use crate::pipeline::validate::ValidationReport;
use crate::pipeline::{coerce, normalize, validate};
use crate::prompts::prompt_for;
use crate::provider::{ImagePayload, VisionProvider};
use crate::schema::schema_for;
use base64::engine::general_purpose::STANDARD;
use base64::Engine as _;
use serde_json::Value;
use tracing::{debug, info};

/// The result of a successful extraction: the typed record and the
/// validation report computed from the same coerced value.
#[derive(Debug, Clone)]
pub struct ExtractionOutcome {
    pub data: ExtractedData,
    pub validation: ValidationReport,
}

/// Run one extraction request through the pipeline.
pub async fn extract(
    provider: &dyn VisionProvider,
    request: &ExtractionRequest,
) -> Result<ExtractionOutcome, ExtractError> {
    check_request(request)?;

    let doc_type = request.card_type;
    info!(provider = provider.name(), card_type = %doc_type, "starting extraction");

    // ── Step 1: invoke the vision model ─────────────────────────────────
    let image = ImagePayload::new(request.image_data.clone(), request.mime_type.clone());
    let raw = provider.extract_text(prompt_for(doc_type), &image).await?;
    debug!(chars = raw.len(), "model responded");

    // ── Step 2: strip fences and parse ──────────────────────────────────
    let parsed = normalize::normalize(&raw)?;

    // ── Step 3: repair type drift ───────────────────────────────────────
    let coerced = coerce::coerce(doc_type, parsed);

    // ── Step 4: typed record ────────────────────────────────────────────
    let data = into_typed(doc_type, &coerced)?;

    // ── Step 5: validation report from the same coerced value ───────────
    let validation = validate::validate(doc_type, &coerced);

    Ok(ExtractionOutcome { data, validation })
}

/// Pre-flight checks on the inbound payload. Runs before any provider call.
fn check_request(request: &ExtractionRequest) -> Result<(), ExtractError> {
    if request.image_data.is_empty() {
        return Err(ExtractError::bad_request("No image data provided"));
    }
    if !request.mime_type.starts_with("image/") {
        return Err(ExtractError::bad_request("Invalid image format"));
    }
    // The payload must at least be base64 before it is worth a model call.
    if STANDARD.decode(&request.image_data).is_err() {
        return Err(ExtractError::bad_request(
            "Image data is not valid base64",
        ));
    }
    Ok(())
}

/// Deserialise the coerced model output into the typed envelope branch for
/// the requested document. A missing root key yields an all-null record, the
/// same as a model that read nothing; drift the coercion pass cannot repair
/// (e.g. an object where a list of strings belongs) is a malformed response.
fn into_typed(doc_type: DocumentType, coerced: &Value) -> Result<ExtractedData, ExtractError> {
    let root = coerced
        .get(schema_for(doc_type).root_key)
        .cloned()
        .unwrap_or_else(|| Value::Object(Default::default()));

    let malformed = |e: serde_json::Error| ExtractError::MalformedResponse {
        detail: e.to_string(),
    };

    let mut data = ExtractedData::default();
    match doc_type {
        DocumentType::DrivingLicense => {
            data.driving_license = Some(serde_json::from_value(root).map_err(malformed)?);
        }
        DocumentType::PanCard => {
            data.pan_card = Some(serde_json::from_value(root).map_err(malformed)?);
        }
        DocumentType::AadhaarCard => {
            data.aadhaar_card = Some(serde_json::from_value(root).map_err(malformed)?);
        }
    }
    Ok(data)
}
