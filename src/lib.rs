//! # cardscan
//!
//! Extract structured fields from photographs of identity documents —
//! driving licences, PAN cards, Aadhaar cards — using Vision Language
//! Models, then re-check every field against deterministic format rules.
//!
//! ## Why this crate?
//!
//! Template-based OCR breaks on the layout variety of real identity
//! documents. A vision model reads a card the way a human would, but its
//! output cannot be trusted: it fences JSON it was told not to fence,
//! returns numbers where strings belong, and occasionally invents values.
//! cardscan treats the model as an unreliable narrator — the pipeline
//! repairs the shape of what comes back and independently validates every
//! field, reporting per-field validity instead of passing model output
//! through.
//!
//! ## Pipeline Overview
//!
//! ```text
//! image + card_type
//!  │
//!  ├─ 1. Prompt     fixed per-type instruction with the exact JSON shape
//!  ├─ 2. Provider   one VLM call (chat-completions or generate-content)
//!  ├─ 3. Normalize  strip ``` fences, parse as JSON
//!  ├─ 4. Coerce     repair type drift against the declared schema
//!  ├─ 5. Validate   regex / date / enum rules, per-field tri-state verdict
//!  └─ 6. Envelope   {success, data, validation, error}
//! ```
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use cardscan::{extract, provider_from_config, DocumentType, ExtractionConfig, ExtractionRequest};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let config = ExtractionConfig::builder()
//!         .api_key(std::env::var("OPENROUTER_API_KEY")?)
//!         .build()?;
//!     let provider = provider_from_config(&config)?;
//!
//!     let request = ExtractionRequest {
//!         image_data: std::fs::read_to_string("licence.b64")?,
//!         mime_type: "image/jpeg".into(),
//!         card_type: DocumentType::DrivingLicense,
//!     };
//!     let outcome = extract(provider.as_ref(), &request).await?;
//!     println!("{}", serde_json::to_string_pretty(&outcome.validation)?);
//!     Ok(())
//! }
//! ```
//!
//! ## Validity is a tri-state
//!
//! A field's verdict is `true` (its rule passed), `false` (its rule failed),
//! or `null` (no deterministic rule exists, or a rule-bearing field was
//! absent). Free-text fields are always `null`; a licence number is always
//! `true` or `false` once present.

// ── Modules ──────────────────────────────────────────────────────────────

pub mod config;
pub mod document;
pub mod error;
pub mod extract;
pub mod pipeline;
pub mod prompts;
pub mod provider;
pub mod schema;
pub mod server;

// ── Re-exports ───────────────────────────────────────────────────────────

pub use config::{ExtractionConfig, ExtractionConfigBuilder, ProviderKind};
pub use document::{
    AadhaarAddress, AadhaarCard, Address, DocumentType, DrivingLicense, ExtractedData,
    ExtractionRequest, Name, PanCard,
};
pub use error::ExtractError;
pub use extract::{extract, ExtractionOutcome};
pub use pipeline::validate::{ValidationReport, Validity};
pub use prompts::prompt_for;
pub use provider::{provider_from_config, ImagePayload, VisionProvider};
pub use server::{router, ApiResponse, AppState};
