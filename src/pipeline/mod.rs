//! Pipeline stages for identity-document field extraction.
//!
//! Each submodule implements exactly one transformation step, independently
//! testable without a live model.
//!
//! ## Data Flow
//!
//! ```text
//! request ──▶ provider ──▶ normalize ──▶ coerce ──▶ validate
//! (image)     (VLM call)   (fences+JSON) (repair)   (rules)
//! ```
//!
//! 1. provider — one outbound call to the vision model (see
//!    [`crate::provider`]); the only stage with network I/O
//! 2. [`normalize`] — strip code fences the model was told not to emit,
//!    parse the remainder as JSON
//! 3. [`coerce`] — repair type drift against the declared schema without
//!    ever dropping a field
//! 4. [`validate`] — re-check every leaf against its deterministic rule and
//!    report per-field validity

pub mod coerce;
pub mod normalize;
pub mod validate;
