//! Document types and the typed records the pipeline produces.
//!
//! Wire names are camelCase to match the JSON the vision model is instructed
//! to emit, so the coerced model output deserialises straight into these
//! structs without a renaming pass. Every leaf is optional: a field the model
//! could not read arrives as `null` and stays `None`.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// The closed set of supported identity documents.
///
/// Selects which instruction text, target schema, and validation rules apply
/// to a request. Any other `card_type` string is rejected when the request is
/// deserialised.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DocumentType {
    DrivingLicense,
    PanCard,
    AadhaarCard,
}

impl DocumentType {
    /// All supported document types, in catalog order.
    pub const ALL: [DocumentType; 3] = [
        DocumentType::DrivingLicense,
        DocumentType::PanCard,
        DocumentType::AadhaarCard,
    ];

    /// The snake_case identifier used on the wire and on the CLI.
    pub fn as_str(&self) -> &'static str {
        match self {
            DocumentType::DrivingLicense => "driving_license",
            DocumentType::PanCard => "pan_card",
            DocumentType::AadhaarCard => "aadhaar_card",
        }
    }
}

impl fmt::Display for DocumentType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for DocumentType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "driving_license" => Ok(DocumentType::DrivingLicense),
            "pan_card" => Ok(DocumentType::PanCard),
            "aadhaar_card" => Ok(DocumentType::AadhaarCard),
            other => Err(format!(
                "unsupported document type '{other}' (expected driving_license, pan_card, or aadhaar_card)"
            )),
        }
    }
}

// ── Inbound request ──────────────────────────────────────────────────────

/// One extraction request: an image plus the document type it shows.
///
/// `image_data` is the base64-encoded image; `mime_type` must start with
/// `image/`. Both are checked before any provider call.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExtractionRequest {
    pub image_data: String,
    pub mime_type: String,
    pub card_type: DocumentType,
}

// ── Extracted records ────────────────────────────────────────────────────

/// A person's name split into its printed components.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Name {
    pub first_name: Option<String>,
    pub middle_name: Option<String>,
    pub last_name: Option<String>,
}

/// Postal address as printed on a driving licence.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Address {
    pub street: Option<String>,
    pub city: Option<String>,
    pub state: Option<String>,
    pub zip_code: Option<String>,
}

/// Fields extracted from a driving licence.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DrivingLicense {
    pub state: Option<String>,
    pub dl_number: Option<String>,
    pub issue_date: Option<String>,
    pub expiry_date: Option<String>,
    pub name: Option<Name>,
    pub address: Option<Address>,
    pub sex: Option<String>,
    pub height: Option<String>,
    pub weight: Option<String>,
    pub date_of_birth: Option<String>,
    pub restrictions: Option<Vec<String>>,
    pub hair_color: Option<String>,
    pub eye_color: Option<String>,
    pub dd: Option<String>,
    pub endorsements: Option<Vec<String>>,
}

/// Fields extracted from a PAN card.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PanCard {
    pub pan_number: Option<String>,
    pub name: Option<Name>,
    pub father_name: Option<String>,
    pub date_of_birth: Option<String>,
    pub issue_date: Option<String>,
}

/// Address block as printed on an Aadhaar card.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AadhaarAddress {
    pub house: Option<String>,
    pub street: Option<String>,
    pub landmark: Option<String>,
    pub city: Option<String>,
    pub state: Option<String>,
    pub pin_code: Option<String>,
}

/// Fields extracted from an Aadhaar card. The printed name is a single
/// string, not a first/middle/last split.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AadhaarCard {
    pub aadhaar_number: Option<String>,
    pub name: Option<String>,
    pub date_of_birth: Option<String>,
    pub gender: Option<String>,
    pub address: Option<AadhaarAddress>,
}

/// Envelope holding exactly one extracted record, keyed by document type.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExtractedData {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub driving_license: Option<DrivingLicense>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub pan_card: Option<PanCard>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub aadhaar_card: Option<AadhaarCard>,
}
