//! Normalisation of raw model text into a JSON value.
//!
//! The instruction texts forbid markdown, but vision models still wrap their
//! answer in ``` fences often enough that stripping them here is cheaper than
//! fighting it in the prompt. Anything that fails to parse after stripping is
//! a [`ExtractError::MalformedResponse`] — deliberately distinct from the
//! upstream-call errors so callers can tell "the model returned garbage" from
//! "the model could not be reached".

use crate::error::ExtractError;
use serde_json::Value;
use tracing::debug;

/// Strip surrounding code fences, then parse the text as JSON.
///
/// Fence handling mirrors what models actually emit: a leading ````json`
/// marker (7 characters) with a trailing ```` fence, or a bare ```` fence on
/// both ends. Inputs shorter than the fence markers are left as-is rather
/// than sliced out of range.
pub fn normalize(raw: &str) -> Result<Value, ExtractError> {
    let stripped = strip_fences(raw);
    serde_json::from_str(stripped).map_err(|e| {
        debug!("model response failed to parse as JSON: {e}");
        ExtractError::MalformedResponse {
            detail: e.to_string(),
        }
    })
}

/// Remove a surrounding ```` ```json … ``` ```` or ```` ``` … ``` ```` fence.
///
/// Only a fence at the very start of the trimmed text is recognised; fences
/// inside the body are content. A missing closing fence still strips the
/// opener, matching the lenient slice the models' own tooling applies.
fn strip_fences(raw: &str) -> &str {
    let trimmed = raw.trim();
    let body = if let Some(rest) = trimmed.strip_prefix("```json") {
        rest.strip_suffix("```").unwrap_or(rest)
    } else if let Some(rest) = trimmed.strip_prefix("```") {
        rest.strip_suffix("```").unwrap_or(rest)
    } else {
        return trimmed;
    };
    body.trim()
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn parses_fenced_json() {
        let out = normalize("```json\n{\"a\":1}\n```").unwrap();
        assert_eq!(out, json!({"a": 1}));
    }

    #[test]
    fn parses_generic_fence() {
        let out = normalize("```\n{\"a\":1}\n```").unwrap();
        assert_eq!(out, json!({"a": 1}));
    }

    #[test]
    fn parses_unfenced_json() {
        let out = normalize("{\"a\":1}").unwrap();
        assert_eq!(out, json!({"a": 1}));
    }

    #[test]
    fn surrounding_whitespace_is_ignored() {
        let out = normalize("  \n```json\n{\"a\": true}\n```  \n").unwrap();
        assert_eq!(out, json!({"a": true}));
    }

    #[test]
    fn non_json_is_malformed_response() {
        let err = normalize("not json").unwrap_err();
        assert!(matches!(err, ExtractError::MalformedResponse { .. }));
    }

    #[test]
    fn malformed_error_carries_parser_detail() {
        let err = normalize("{\"a\":").unwrap_err();
        let ExtractError::MalformedResponse { detail } = err else {
            panic!("expected MalformedResponse");
        };
        assert!(!detail.is_empty());
    }

    /// Inputs shorter than the fence markers must not panic.
    #[test]
    fn short_inputs_do_not_slice_out_of_range() {
        for short in ["", "`", "``", "```", "````", "```json", "{}"] {
            let _ = normalize(short);
        }
        assert_eq!(normalize("{}").unwrap(), json!({}));
    }

    #[test]
    fn missing_closing_fence_still_strips_opener() {
        let out = normalize("```json\n{\"a\":1}").unwrap();
        assert_eq!(out, json!({"a": 1}));
    }

    #[test]
    fn fence_inside_body_is_content() {
        let out = normalize("{\"a\": \"```\"}").unwrap();
        assert_eq!(out, json!({"a": "```"}));
    }
}
