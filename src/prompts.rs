//! Instruction texts sent to the vision model, one per document type.
//!
//! Centralising every instruction here keeps a single source of truth and
//! lets unit tests inspect the texts without calling a real model. Each text
//! is a contract on the *model's* output: the exact JSON shape, null for
//! unreadable fields, DD/MM/YYYY dates, and no non-JSON content. The
//! pipeline still handles violations of that contract defensively — see
//! [`crate::pipeline::normalize`] and [`crate::pipeline::coerce`].

use crate::document::DocumentType;

/// Instruction for driving-licence extraction.
pub const DRIVING_LICENSE_PROMPT: &str = r#"You are an AI system specialized in document information extraction.
You will receive a driving license image as input. Your task is to detect and extract all visible fields and
return them as a clean, strictly valid JSON object following this exact schema:
{
    "drivingLicense": {
        "state": "string or null",
        "dlNumber": "string or null",
        "issueDate": "DD/MM/YYYY or null",
        "expiryDate": "DD/MM/YYYY or null",
        "name": {
            "firstName": "string or null",
            "middleName": "string or null",
            "lastName": "string or null"
        },
        "address": {
            "street": "string or null",
            "city": "string or null",
            "state": "string or null",
            "zipCode": "string or null"
        },
        "sex": "M/F or null",
        "height": "string or null",
        "weight": "string or null",
        "dateOfBirth": "DD/MM/YYYY or null",
        "restrictions": ["restriction1", "restriction2"] or [],
        "hairColor": "string or null",
        "eyeColor": "string or null",
        "dd": "string or null",
        "endorsements": ["endorsement1", "endorsement2"] or []
    }
}
Strict rules you must follow:
- Return ONLY a JSON object (no explanations, no markdown, no extra text).
- If a field is missing, unreadable, or not applicable, return null (not "Not detected").
- For restrictions and endorsements, return an empty list [] if none are visible.
- Dates must be formatted consistently as DD/MM/YYYY.
- Preserve leading zeros in license numbers, zip codes, and dates.
- Do not hallucinate values. If unsure, use null."#;

/// Instruction for PAN-card extraction.
pub const PAN_CARD_PROMPT: &str = r#"You are an AI system specialized in document information extraction.
You will receive a PAN card image as input. Your task is to detect and extract all visible fields and
return them as a clean, strictly valid JSON object following this exact schema:
{
    "panCard": {
        "panNumber": "string or null",
        "name": {
            "firstName": "string or null",
            "middleName": "string or null",
            "lastName": "string or null"
        },
        "fatherName": "string or null",
        "dateOfBirth": "DD/MM/YYYY or null",
        "issueDate": "DD/MM/YYYY or null"
    }
}
Strict rules you must follow:
- Return ONLY a JSON object (no explanations, no markdown, no extra text).
- If a field is missing, unreadable, or not applicable, return null (not "Not detected").
- Dates must be formatted consistently as DD/MM/YYYY.
- Preserve leading zeros in numbers and dates.
- Do not hallucinate values. If unsure, use null."#;

/// Instruction for Aadhaar-card extraction.
pub const AADHAAR_CARD_PROMPT: &str = r#"You are an AI system specialized in document information extraction.
You will receive an Aadhaar card image as input. Your task is to detect and extract all visible fields and
return them as a clean, strictly valid JSON object following this exact schema:
{
    "aadhaarCard": {
        "aadhaarNumber": "string or null",
        "name": "string or null",
        "dateOfBirth": "DD/MM/YYYY or null",
        "gender": "M/F/Other or null",
        "address": {
            "house": "string or null",
            "street": "string or null",
            "landmark": "string or null",
            "city": "string or null",
            "state": "string or null",
            "pinCode": "string or null"
        }
    }
}
Strict rules you must follow:
- Return ONLY a JSON object (no explanations, no markdown, no extra text).
- If a field is missing, unreadable, or not applicable, return null (not "Not detected").
- Dates must be formatted consistently as DD/MM/YYYY.
- Preserve leading zeros in numbers and dates.
- Do not hallucinate values. If unsure, use null."#;

/// Look up the instruction text for a document type.
///
/// Total over the closed [`DocumentType`] set; unknown document strings are
/// rejected earlier, when the request is deserialised.
pub fn prompt_for(doc_type: DocumentType) -> &'static str {
    match doc_type {
        DocumentType::DrivingLicense => DRIVING_LICENSE_PROMPT,
        DocumentType::PanCard => PAN_CARD_PROMPT,
        DocumentType::AadhaarCard => AADHAAR_CARD_PROMPT,
    }
}
