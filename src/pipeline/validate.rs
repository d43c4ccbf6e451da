//! Deterministic re-validation of extracted fields.
//!
//! The model's output is never trusted: every leaf is re-checked against the
//! rule its schema declares, independently of what the prompt asked for.
//! Validation annotates, it does not filter — the extracted value is always
//! echoed back alongside its verdict, so a failing field is visible rather
//! than silently dropped.
//!
//! ## Validity is a tri-state
//!
//! * `Valid` / `Invalid` — a deterministic rule exists and the value passed
//!   or failed it.
//! * `Unknown` — no deterministic rule exists for this field (free text,
//!   lists), or a rule-bearing field is absent from the document.
//!
//! Enum leaves are the one asymmetry: a null enum value is *vacuously valid*,
//! not unknown. The field has a checkable format; absence just cannot violate
//! it.

use crate::document::DocumentType;
use crate::schema::{schema_for, Field, FieldKind};
use chrono::NaiveDate;
use serde::de::Deserializer;
use serde::ser::Serializer;
use serde::{Deserialize, Serialize};
use serde_json::{json, Map, Value};

/// Accepted date input formats, tried in order; first match wins.
///
/// DD/MM/YYYY is deliberately tried before MM/DD/YYYY, so inputs where both
/// day and month are ≤ 12 resolve as day-first. Changing this order changes
/// how ambiguous dates are read.
pub const DATE_INPUT_FORMATS: &[&str] = &["%d/%m/%Y", "%d-%m-%Y", "%Y-%m-%d", "%m/%d/%Y", "%d.%m.%Y"];

/// Canonical output format for valid dates.
pub const DATE_OUTPUT_FORMAT: &str = "%d/%m/%Y";

/// Per-field verdict: rule passed, rule failed, or no rule applies.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Validity {
    Valid,
    Invalid,
    Unknown,
}

// On the wire Unknown is null, matching the tri-state the frontend renders.
impl Serialize for Validity {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            Validity::Valid => serializer.serialize_bool(true),
            Validity::Invalid => serializer.serialize_bool(false),
            Validity::Unknown => serializer.serialize_none(),
        }
    }
}

impl<'de> Deserialize<'de> for Validity {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        Ok(match Option::<bool>::deserialize(deserializer)? {
            Some(true) => Validity::Valid,
            Some(false) => Validity::Invalid,
            None => Validity::Unknown,
        })
    }
}

/// A validation report mirroring the extracted record's shape, with every
/// leaf replaced by a `{value, valid}` pair.
pub type ValidationReport = Value;

/// Validate a coerced model output against the document's schema.
///
/// The report always carries the document's *full* field tree: leaves the
/// model never produced appear as `{value: null, valid: <rule default>}`,
/// and a missing nested group still expands to all its leaves.
pub fn validate(doc_type: DocumentType, value: &Value) -> ValidationReport {
    let schema = schema_for(doc_type);
    let root = value.get(schema.root_key).unwrap_or(&Value::Null);
    let mut report = Map::with_capacity(1);
    report.insert(
        schema.root_key.to_string(),
        validate_fields(schema.fields, root),
    );
    Value::Object(report)
}

fn validate_fields(fields: &[Field], value: &Value) -> Value {
    let mut out = Map::with_capacity(fields.len());
    for f in fields {
        let v = value.get(f.name).unwrap_or(&Value::Null);
        let entry = match &f.kind {
            FieldKind::Group(children) => validate_fields(children, v),
            kind => validate_leaf(kind, v),
        };
        out.insert(f.name.to_string(), entry);
    }
    Value::Object(out)
}

fn validate_leaf(kind: &FieldKind, value: &Value) -> Value {
    match kind {
        // No deterministic rule: echo the value, verdict unknown.
        FieldKind::Text | FieldKind::List => pair(value.clone(), Validity::Unknown),

        FieldKind::Pattern(re) => match value {
            Value::Null => pair(Value::Null, Validity::Unknown),
            Value::String(s) => {
                let verdict = if re.is_match(s) {
                    Validity::Valid
                } else {
                    Validity::Invalid
                };
                pair(value.clone(), verdict)
            }
            other => pair(other.clone(), Validity::Invalid),
        },

        FieldKind::Enum(members) => match value {
            // A checkable format that absence cannot violate.
            Value::Null => pair(Value::Null, Validity::Valid),
            Value::String(s) => {
                let verdict = if members.contains(&s.as_str()) {
                    Validity::Valid
                } else {
                    Validity::Invalid
                };
                pair(value.clone(), verdict)
            }
            other => pair(other.clone(), Validity::Invalid),
        },

        FieldKind::Date => match value {
            Value::Null => pair(Value::Null, Validity::Unknown),
            Value::String(s) => match canonicalize_date(s) {
                Some(canonical) => pair(Value::String(canonical), Validity::Valid),
                None => pair(value.clone(), Validity::Invalid),
            },
            other => pair(other.clone(), Validity::Invalid),
        },

        FieldKind::Group(_) => unreachable!("groups are handled in validate_fields"),
    }
}

fn pair(value: Value, valid: Validity) -> Value {
    json!({ "value": value, "valid": valid })
}

/// Parse a date string against [`DATE_INPUT_FORMATS`] in order and render
/// the first hit as DD/MM/YYYY. Returns `None` when no format matches.
pub fn canonicalize_date(s: &str) -> Option<String> {
    DATE_INPUT_FORMATS.iter().find_map(|fmt| {
        NaiveDate::parse_from_str(s, fmt)
            .ok()
            .map(|d| d.format(DATE_OUTPUT_FORMAT).to_string())
    })
}

// Convenience checks used by callers that validate a single number outside a
// full document walk (e.g. spot checks in tooling and tests).

/// Full-match check for a driving-licence number.
pub fn is_valid_dl_number(s: &str) -> bool {
    crate::schema::DL_NUMBER.is_match(s)
}

/// Full-match check for a PAN number.
pub fn is_valid_pan_number(s: &str) -> bool {
    crate::schema::PAN_NUMBER.is_match(s)
}

/// Full-match check for an Aadhaar number.
pub fn is_valid_aadhaar_number(s: &str) -> bool {
    crate::schema::AADHAAR_NUMBER.is_match(s)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn dl_report(record: Value) -> Value {
        validate(DocumentType::DrivingLicense, &json!({"drivingLicense": record}))
    }

    // ── Number patterns ─────────────────────────────────────────────────

    #[test]
    fn dl_number_valid_and_invalid() {
        let report = dl_report(json!({"dlNumber": "KA01 20230001234"}));
        assert_eq!(report["drivingLicense"]["dlNumber"]["valid"], json!(true));

        let report = dl_report(json!({"dlNumber": "INVALID"}));
        assert_eq!(report["drivingLicense"]["dlNumber"]["valid"], json!(false));
        assert_eq!(
            report["drivingLicense"]["dlNumber"]["value"],
            json!("INVALID")
        );
    }

    #[test]
    fn absent_dl_number_is_unknown() {
        let report = dl_report(json!({}));
        assert_eq!(report["drivingLicense"]["dlNumber"]["valid"], Value::Null);
        assert_eq!(report["drivingLicense"]["dlNumber"]["value"], Value::Null);
    }

    #[test]
    fn pan_number_is_case_sensitive() {
        let valid = validate(
            DocumentType::PanCard,
            &json!({"panCard": {"panNumber": "ABCDE1234F"}}),
        );
        assert_eq!(valid["panCard"]["panNumber"]["valid"], json!(true));

        let lower = validate(
            DocumentType::PanCard,
            &json!({"panCard": {"panNumber": "abcde1234f"}}),
        );
        assert_eq!(lower["panCard"]["panNumber"]["valid"], json!(false));
    }

    #[test]
    fn aadhaar_leading_digit_rule() {
        let ok = validate(
            DocumentType::AadhaarCard,
            &json!({"aadhaarCard": {"aadhaarNumber": "234567890123"}}),
        );
        assert_eq!(ok["aadhaarCard"]["aadhaarNumber"]["valid"], json!(true));

        let bad = validate(
            DocumentType::AadhaarCard,
            &json!({"aadhaarCard": {"aadhaarNumber": "123456789012"}}),
        );
        assert_eq!(bad["aadhaarCard"]["aadhaarNumber"]["valid"], json!(false));
    }

    // ── Dates ───────────────────────────────────────────────────────────

    #[test]
    fn dashed_date_is_canonicalised() {
        let report = dl_report(json!({"dateOfBirth": "15-08-1990"}));
        let dob = &report["drivingLicense"]["dateOfBirth"];
        assert_eq!(dob["value"], json!("15/08/1990"));
        assert_eq!(dob["valid"], json!(true));
    }

    #[test]
    fn iso_date_is_canonicalised() {
        assert_eq!(canonicalize_date("1990-08-15").as_deref(), Some("15/08/1990"));
    }

    #[test]
    fn unsupported_order_keeps_value_and_fails() {
        let report = dl_report(json!({"issueDate": "1990/08/15"}));
        let d = &report["drivingLicense"]["issueDate"];
        assert_eq!(d["value"], json!("1990/08/15"));
        assert_eq!(d["valid"], json!(false));
    }

    #[test]
    fn null_date_is_unknown() {
        let report = dl_report(json!({"expiryDate": null}));
        let d = &report["drivingLicense"]["expiryDate"];
        assert_eq!(d["value"], Value::Null);
        assert_eq!(d["valid"], Value::Null);
    }

    /// Both readings fit when day and month are ≤ 12; day-first must win.
    #[test]
    fn ambiguous_date_resolves_day_first() {
        assert_eq!(canonicalize_date("01/02/2020").as_deref(), Some("01/02/2020"));
        // month-first would have rendered 03/04/2021 as 04/03/2021
        assert_eq!(canonicalize_date("03/04/2021").as_deref(), Some("03/04/2021"));
    }

    #[test]
    fn dotted_date_parses() {
        assert_eq!(canonicalize_date("15.08.1990").as_deref(), Some("15/08/1990"));
    }

    #[test]
    fn mm_dd_yyyy_is_reached_when_day_first_cannot_parse() {
        // 13 is not a month, so %d/%m/%Y fails and %m/%d/%Y applies.
        assert_eq!(canonicalize_date("12/25/2020").as_deref(), Some("25/12/2020"));
    }

    #[test]
    fn nonsense_date_fails_all_formats() {
        assert_eq!(canonicalize_date("soon"), None);
        assert_eq!(canonicalize_date("32/01/2020"), None);
    }

    // ── Enums ───────────────────────────────────────────────────────────

    #[test]
    fn sex_members_and_null_are_valid() {
        for (input, expected) in [
            (json!("M"), json!(true)),
            (json!("F"), json!(true)),
            (json!(null), json!(true)),
            (json!("X"), json!(false)),
        ] {
            let report = dl_report(json!({"sex": input}));
            assert_eq!(
                report["drivingLicense"]["sex"]["valid"], expected,
                "sex={input}"
            );
        }
    }

    #[test]
    fn gender_allows_other() {
        let report = validate(
            DocumentType::AadhaarCard,
            &json!({"aadhaarCard": {"gender": "Other"}}),
        );
        assert_eq!(report["aadhaarCard"]["gender"]["valid"], json!(true));
    }

    // ── Free text, lists, groups ────────────────────────────────────────

    #[test]
    fn free_text_is_echoed_with_unknown_validity() {
        let report = dl_report(json!({"hairColor": "BRN", "height": "5'11\""}));
        let hair = &report["drivingLicense"]["hairColor"];
        assert_eq!(hair["value"], json!("BRN"));
        assert_eq!(hair["valid"], Value::Null);
    }

    #[test]
    fn lists_are_echoed_with_unknown_validity() {
        let report = dl_report(json!({"restrictions": ["A", "B"]}));
        let r = &report["drivingLicense"]["restrictions"];
        assert_eq!(r["value"], json!(["A", "B"]));
        assert_eq!(r["valid"], Value::Null);
    }

    #[test]
    fn missing_group_expands_to_all_null_leaves() {
        let report = dl_report(json!({}));
        let name = &report["drivingLicense"]["name"];
        for leaf in ["firstName", "middleName", "lastName"] {
            assert_eq!(name[leaf]["value"], Value::Null);
            assert_eq!(name[leaf]["valid"], Value::Null);
        }
        let address = &report["drivingLicense"]["address"];
        assert_eq!(address["zipCode"]["value"], Value::Null);
    }

    #[test]
    fn missing_root_still_produces_full_shape() {
        let report = validate(DocumentType::PanCard, &json!({}));
        let pan = &report["panCard"];
        assert!(pan.get("panNumber").is_some());
        assert!(pan.get("name").is_some());
        assert_eq!(pan["panNumber"]["valid"], Value::Null);
    }

    #[test]
    fn nested_group_values_are_echoed() {
        let report = dl_report(json!({"name": {"firstName": "Asha"}}));
        let name = &report["drivingLicense"]["name"];
        assert_eq!(name["firstName"]["value"], json!("Asha"));
        assert_eq!(name["firstName"]["valid"], Value::Null);
        assert_eq!(name["lastName"]["value"], Value::Null);
    }

    // ── Tri-state serde ─────────────────────────────────────────────────

    #[test]
    fn validity_serialises_to_true_false_null() {
        assert_eq!(serde_json::to_value(Validity::Valid).unwrap(), json!(true));
        assert_eq!(
            serde_json::to_value(Validity::Invalid).unwrap(),
            json!(false)
        );
        assert_eq!(
            serde_json::to_value(Validity::Unknown).unwrap(),
            Value::Null
        );
    }

    #[test]
    fn validity_deserialises_from_wire_form() {
        assert_eq!(
            serde_json::from_value::<Validity>(json!(true)).unwrap(),
            Validity::Valid
        );
        assert_eq!(
            serde_json::from_value::<Validity>(json!(false)).unwrap(),
            Validity::Invalid
        );
        assert_eq!(
            serde_json::from_value::<Validity>(Value::Null).unwrap(),
            Validity::Unknown
        );
    }

    // ── Spot-check helpers ──────────────────────────────────────────────

    #[test]
    fn spot_check_helpers_agree_with_schema_patterns() {
        assert!(is_valid_dl_number("KA01 20230001234"));
        assert!(!is_valid_dl_number("INVALID"));
        assert!(is_valid_pan_number("ABCDE1234F"));
        assert!(!is_valid_pan_number("abcde1234f"));
        assert!(is_valid_aadhaar_number("2345 6789 0123"));
        assert!(!is_valid_aadhaar_number("1234 5678 9012"));
    }
}
