//! Error types for the cardscan library.
//!
//! The taxonomy keeps three failure modes distinct so callers can tell them
//! apart programmatically:
//!
//! * [`ExtractError::BadRequest`] — the caller's payload was unusable and the
//!   pipeline never contacted the provider.
//! * [`ExtractError::Upstream`] — the provider could not be reached or
//!   answered with an error (network, auth, rate limit).
//! * [`ExtractError::MalformedResponse`] — the provider ran but returned text
//!   that does not parse as JSON.
//!
//! Field validation is never an error: a field that fails its format rule is
//! reported with `valid: false` in the validation report, not raised here.

use thiserror::Error;

/// All errors returned by the cardscan library.
#[derive(Debug, Error)]
pub enum ExtractError {
    // ── Request errors ────────────────────────────────────────────────────
    /// The inbound payload was rejected before any provider call.
    #[error("Bad request: {reason}")]
    BadRequest { reason: String },

    // ── Provider errors ───────────────────────────────────────────────────
    /// The configured provider is missing its API key or endpoint.
    #[error("Vision provider '{provider}' is not configured.\n{hint}")]
    ProviderNotConfigured { provider: String, hint: String },

    /// The outbound call to the vision model failed (network, auth, rate
    /// limit, or a non-success HTTP status). The provider's own message is
    /// carried verbatim. Not retried.
    #[error("{provider} API error: {message}")]
    Upstream { provider: String, message: String },

    /// The model answered, but its text could not be parsed as JSON even
    /// after fence stripping. Distinct from [`ExtractError::Upstream`] so
    /// callers can tell "unreachable" apart from "returned garbage".
    #[error("Failed to parse model response as JSON: {detail}")]
    MalformedResponse { detail: String },

    // ── Config errors ─────────────────────────────────────────────────────
    /// Builder validation failed.
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),
}

impl ExtractError {
    /// Pre-flight rejection for an empty or non-image payload.
    pub fn bad_request(reason: impl Into<String>) -> Self {
        ExtractError::BadRequest {
            reason: reason.into(),
        }
    }

    /// True when the request was rejected before any provider call.
    pub fn is_bad_request(&self) -> bool {
        matches!(self, ExtractError::BadRequest { .. })
    }
}
