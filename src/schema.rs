//! Declarative field descriptors for each supported document type.
//!
//! One static table per document type drives both the coercion pass and the
//! field validator: each leaf declares its kind (free text, date, pattern,
//! enum, list) and nested groups declare their children. Adding a document
//! type means adding a table here, a prompt in [`crate::prompts`], and a
//! record struct in [`crate::document`] — no new pipeline logic.

use crate::document::DocumentType;
use once_cell::sync::Lazy;
use regex::Regex;

// ── Format rules ─────────────────────────────────────────────────────────

/// Indian driving-licence number: two letters, two digits, optional space,
/// eleven digits (e.g. `KA01 20230001234`).
pub static DL_NUMBER: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[A-Z]{2}[0-9]{2} ?[0-9]{11}$").unwrap());

/// PAN number: five letters, four digits, one letter. Case-sensitive.
pub static PAN_NUMBER: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[A-Z]{5}[0-9]{4}[A-Z]$").unwrap());

/// Aadhaar number: twelve digits grouped 4-4-4 with optional spaces; the
/// first digit is 2–9 (0 and 1 are never issued).
pub static AADHAAR_NUMBER: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[2-9][0-9]{3} ?[0-9]{4} ?[0-9]{4}$").unwrap());

/// Sex marker on a driving licence.
pub const SEX_VALUES: &[&str] = &["M", "F"];

/// Gender marker on an Aadhaar card.
pub const GENDER_VALUES: &[&str] = &["M", "F", "Other"];

// ── Descriptor tree ──────────────────────────────────────────────────────

/// What kind of value a leaf holds, and which deterministic check (if any)
/// applies to it.
#[derive(Debug)]
pub enum FieldKind {
    /// Free text; no deterministic rule, validity is always unknown.
    Text,
    /// A date string; parsed against the accepted input formats and
    /// canonicalised to DD/MM/YYYY when valid.
    Date,
    /// Must fully match the given pattern.
    Pattern(&'static Lazy<Regex>),
    /// Must be one of the listed members; null counts as valid.
    Enum(&'static [&'static str]),
    /// A list of strings; no deterministic rule on the items.
    List,
    /// A nested object validated field-by-field.
    Group(&'static [Field]),
}

/// One named node in a document's field tree.
#[derive(Debug)]
pub struct Field {
    pub name: &'static str,
    pub kind: FieldKind,
}

const fn field(name: &'static str, kind: FieldKind) -> Field {
    Field { name, kind }
}

/// The full descriptor for one document type: the wire key the model nests
/// its object under, plus the field tree.
#[derive(Debug)]
pub struct DocumentSchema {
    pub doc_type: DocumentType,
    /// Root key of the model's response object, e.g. `drivingLicense`.
    pub root_key: &'static str,
    pub fields: &'static [Field],
}

static PERSON_NAME: &[Field] = &[
    field("firstName", FieldKind::Text),
    field("middleName", FieldKind::Text),
    field("lastName", FieldKind::Text),
];

static DL_ADDRESS: &[Field] = &[
    field("street", FieldKind::Text),
    field("city", FieldKind::Text),
    field("state", FieldKind::Text),
    field("zipCode", FieldKind::Text),
];

static AADHAAR_ADDRESS: &[Field] = &[
    field("house", FieldKind::Text),
    field("street", FieldKind::Text),
    field("landmark", FieldKind::Text),
    field("city", FieldKind::Text),
    field("state", FieldKind::Text),
    field("pinCode", FieldKind::Text),
];

static DRIVING_LICENSE: DocumentSchema = DocumentSchema {
    doc_type: DocumentType::DrivingLicense,
    root_key: "drivingLicense",
    fields: &[
        field("state", FieldKind::Text),
        field("dlNumber", FieldKind::Pattern(&DL_NUMBER)),
        field("issueDate", FieldKind::Date),
        field("expiryDate", FieldKind::Date),
        field("name", FieldKind::Group(PERSON_NAME)),
        field("address", FieldKind::Group(DL_ADDRESS)),
        field("sex", FieldKind::Enum(SEX_VALUES)),
        field("height", FieldKind::Text),
        field("weight", FieldKind::Text),
        field("dateOfBirth", FieldKind::Date),
        field("restrictions", FieldKind::List),
        field("hairColor", FieldKind::Text),
        field("eyeColor", FieldKind::Text),
        field("dd", FieldKind::Text),
        field("endorsements", FieldKind::List),
    ],
};

static PAN_CARD: DocumentSchema = DocumentSchema {
    doc_type: DocumentType::PanCard,
    root_key: "panCard",
    fields: &[
        field("panNumber", FieldKind::Pattern(&PAN_NUMBER)),
        field("name", FieldKind::Group(PERSON_NAME)),
        field("fatherName", FieldKind::Text),
        field("dateOfBirth", FieldKind::Date),
        field("issueDate", FieldKind::Date),
    ],
};

static AADHAAR_CARD: DocumentSchema = DocumentSchema {
    doc_type: DocumentType::AadhaarCard,
    root_key: "aadhaarCard",
    fields: &[
        field("aadhaarNumber", FieldKind::Pattern(&AADHAAR_NUMBER)),
        field("name", FieldKind::Text),
        field("dateOfBirth", FieldKind::Date),
        field("gender", FieldKind::Enum(GENDER_VALUES)),
        field("address", FieldKind::Group(AADHAAR_ADDRESS)),
    ],
};

/// Look up the descriptor for a document type. Total over the closed set.
pub fn schema_for(doc_type: DocumentType) -> &'static DocumentSchema {
    match doc_type {
        DocumentType::DrivingLicense => &DRIVING_LICENSE,
        DocumentType::PanCard => &PAN_CARD,
        DocumentType::AadhaarCard => &AADHAAR_CARD,
    }
}
