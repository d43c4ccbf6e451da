//! Schema-driven repair of type drift in the model's parsed output.
//!
//! Models occasionally return a number where the schema says string (zip
//! codes, weights), or a scalar where the schema says list. This pass walks
//! the document's field descriptor and repairs those drifts in place:
//! scalar-declared leaves are stringified, list-declared leaves that are not
//! lists become empty lists. It never raises and never drops a field —
//! whatever the model extracted survives into validation.

use crate::document::DocumentType;
use crate::schema::{schema_for, Field, FieldKind};
use serde_json::Value;

/// Repair the parsed model output against the document's declared schema.
///
/// Absent fields stay absent and null scalars stay null; only present,
/// wrongly-typed values are rewritten. A list-declared leaf holding anything
/// other than a list (including null) becomes `[]` — a safe empty collection
/// rather than a scalar masquerading as one. Non-object input is returned
/// untouched for the validator to annotate.
pub fn coerce(doc_type: DocumentType, mut value: Value) -> Value {
    let schema = schema_for(doc_type);
    if let Some(root) = value.get_mut(schema.root_key) {
        coerce_fields(schema.fields, root);
    }
    value
}

fn coerce_fields(fields: &[Field], value: &mut Value) {
    let Some(obj) = value.as_object_mut() else {
        return;
    };
    for f in fields {
        let Some(v) = obj.get_mut(f.name) else {
            continue;
        };
        match &f.kind {
            FieldKind::Group(children) => coerce_fields(children, v),
            FieldKind::List => {
                if !v.is_array() {
                    *v = Value::Array(Vec::new());
                }
            }
            // Scalar leaves: Text, Date, Pattern, Enum.
            _ => {
                if !v.is_null() && !v.is_string() {
                    *v = Value::String(stringify(v));
                }
            }
        }
    }
}

/// String form of a non-string scalar. Numbers and booleans print their
/// plain form; arrays and objects fall back to compact JSON.
fn stringify(v: &Value) -> String {
    match v {
        Value::Number(n) => n.to_string(),
        Value::Bool(b) => b.to_string(),
        other => other.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn numeric_scalar_becomes_string() {
        let out = coerce(
            DocumentType::DrivingLicense,
            json!({"drivingLicense": {"dlNumber": 12345}}),
        );
        assert_eq!(out["drivingLicense"]["dlNumber"], json!("12345"));
    }

    #[test]
    fn string_scalar_is_untouched() {
        let out = coerce(
            DocumentType::DrivingLicense,
            json!({"drivingLicense": {"dlNumber": "KA01 20230001234"}}),
        );
        assert_eq!(out["drivingLicense"]["dlNumber"], json!("KA01 20230001234"));
    }

    #[test]
    fn scalar_in_list_position_becomes_empty_list() {
        let out = coerce(
            DocumentType::DrivingLicense,
            json!({"drivingLicense": {"restrictions": "NONE"}}),
        );
        assert_eq!(out["drivingLicense"]["restrictions"], json!([]));
    }

    #[test]
    fn null_in_list_position_becomes_empty_list() {
        let out = coerce(
            DocumentType::DrivingLicense,
            json!({"drivingLicense": {"endorsements": null}}),
        );
        assert_eq!(out["drivingLicense"]["endorsements"], json!([]));
    }

    #[test]
    fn real_list_is_untouched() {
        let out = coerce(
            DocumentType::DrivingLicense,
            json!({"drivingLicense": {"restrictions": ["CORRECTIVE LENSES"]}}),
        );
        assert_eq!(
            out["drivingLicense"]["restrictions"],
            json!(["CORRECTIVE LENSES"])
        );
    }

    #[test]
    fn absent_field_stays_absent() {
        let out = coerce(
            DocumentType::DrivingLicense,
            json!({"drivingLicense": {"state": "Karnataka"}}),
        );
        assert!(out["drivingLicense"].get("dlNumber").is_none());
        assert!(out["drivingLicense"].get("restrictions").is_none());
    }

    #[test]
    fn null_scalar_stays_null() {
        let out = coerce(
            DocumentType::PanCard,
            json!({"panCard": {"panNumber": null}}),
        );
        assert_eq!(out["panCard"]["panNumber"], Value::Null);
    }

    #[test]
    fn nested_group_scalars_are_stringified() {
        let out = coerce(
            DocumentType::DrivingLicense,
            json!({"drivingLicense": {
                "name": {"firstName": 42},
                "address": {"zipCode": 560001}
            }}),
        );
        assert_eq!(out["drivingLicense"]["name"]["firstName"], json!("42"));
        assert_eq!(out["drivingLicense"]["address"]["zipCode"], json!("560001"));
    }

    #[test]
    fn boolean_scalar_becomes_string() {
        let out = coerce(
            DocumentType::AadhaarCard,
            json!({"aadhaarCard": {"gender": true}}),
        );
        assert_eq!(out["aadhaarCard"]["gender"], json!("true"));
    }

    #[test]
    fn unknown_root_key_passes_through() {
        let input = json!({"somethingElse": {"a": 1}});
        let out = coerce(DocumentType::PanCard, input.clone());
        assert_eq!(out, input);
    }

    #[test]
    fn non_object_root_passes_through() {
        let input = json!({"panCard": "not an object"});
        let out = coerce(DocumentType::PanCard, input.clone());
        assert_eq!(out, input);
    }
}
