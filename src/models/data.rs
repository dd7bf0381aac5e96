use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Document types the classifier can decide between.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum DocumentType {
    Pan,
    Aadhaar,
    Passport,
    Other,
}

impl DocumentType {
    pub fn as_str(&self) -> &'static str {
        match self {
            DocumentType::Pan => "PAN",
            DocumentType::Aadhaar => "AADHAAR",
            DocumentType::Passport => "PASSPORT",
            DocumentType::Other => "OTHER",
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

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.to_ascii_uppercase().as_str() {
            "PAN" => Ok(DocumentType::Pan),
            "AADHAAR" => Ok(DocumentType::Aadhaar),
            "PASSPORT" => Ok(DocumentType::Passport),
            "OTHER" => Ok(DocumentType::Other),
            other => Err(format!(
                "unknown document type '{}' (expected PAN, AADHAAR, PASSPORT or OTHER)",
                other
            )),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    Info,
    Warning,
    Error,
}

/// Non-fatal quality problem attached to an extraction result.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Issue {
    pub code: String,
    pub message: String,
    pub severity: Severity,
}

impl Issue {
    pub fn warning(code: &str, message: String) -> Self {
        Issue {
            code: code.to_string(),
            message,
            severity: Severity::Warning,
        }
    }
}

/// An extracted value together with the text span that justifies it.
///
/// `evidence` is the verbatim substring of the OCR text at
/// `[start_pos, end_pos)` when the offsets were verified (grounded);
/// otherwise it is the extractor's reported text and the offsets are None.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FieldEvidence {
    pub value: Option<String>,
    pub evidence: Option<String>,
    pub start_pos: Option<usize>,
    pub end_pos: Option<usize>,
    pub source_extraction_class: Option<String>,
}

/// One loosely-typed span as produced by an external extractor.
///
/// Class names are free text and offsets are untrusted; both are verified at
/// the mapping boundary, never here.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ExtractionSpan {
    pub extraction_class: String,
    pub extraction_text: String,
    #[serde(default)]
    pub attributes: serde_json::Map<String, serde_json::Value>,
    pub start_pos: Option<i64>,
    pub end_pos: Option<i64>,
    pub group_index: Option<i64>,
    pub extraction_index: Option<i64>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PanFields {
    pub pan_number: Option<FieldEvidence>,
    pub full_name: Option<FieldEvidence>,
    pub father_name: Option<FieldEvidence>,
    pub date_of_birth: Option<FieldEvidence>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AadhaarFields {
    pub aadhaar_number: Option<FieldEvidence>,
    pub full_name: Option<FieldEvidence>,
    pub date_of_birth: Option<FieldEvidence>,
    pub year_of_birth: Option<FieldEvidence>,
    pub gender: Option<FieldEvidence>,
    pub address: Option<FieldEvidence>,
    pub care_of: Option<FieldEvidence>,
    pub pin_code: Option<FieldEvidence>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PassportFields {
    pub passport_number: Option<FieldEvidence>,
    pub surname: Option<FieldEvidence>,
    pub given_names: Option<FieldEvidence>,
    pub nationality: Option<FieldEvidence>,
    pub date_of_birth: Option<FieldEvidence>,
    pub sex: Option<FieldEvidence>,
    pub place_of_birth: Option<FieldEvidence>,
    pub place_of_issue: Option<FieldEvidence>,
    pub date_of_issue: Option<FieldEvidence>,
    pub date_of_expiry: Option<FieldEvidence>,
    pub file_number: Option<FieldEvidence>,
    pub mrz_line_1: Option<FieldEvidence>,
    pub mrz_line_2: Option<FieldEvidence>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct OtherFields {
    pub id_number: Option<FieldEvidence>,
    pub full_name: Option<FieldEvidence>,
    pub date_of_birth: Option<FieldEvidence>,
    pub address: Option<FieldEvidence>,
}

/// The typed field schema for one document type.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum DocumentFields {
    Pan(PanFields),
    Aadhaar(AadhaarFields),
    Passport(PassportFields),
    Other(OtherFields),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_document_type_round_trip() {
        for (text, expected) in [
            ("PAN", DocumentType::Pan),
            ("aadhaar", DocumentType::Aadhaar),
            ("Passport", DocumentType::Passport),
            ("OTHER", DocumentType::Other),
        ] {
            assert_eq!(text.parse::<DocumentType>().unwrap(), expected);
        }
        assert!("VOTER_ID".parse::<DocumentType>().is_err());
    }

    #[test]
    fn test_document_type_serializes_uppercase() {
        let json = serde_json::to_string(&DocumentType::Aadhaar).unwrap();
        assert_eq!(json, "\"AADHAAR\"");
    }

    #[test]
    fn test_extraction_span_accepts_negative_offsets() {
        let json = r#"{"extraction_class": "pan_number", "extraction_text": "ABCDE1234F", "start_pos": -3, "end_pos": 7}"#;
        let span: ExtractionSpan = serde_json::from_str(json).unwrap();
        assert_eq!(span.start_pos, Some(-3));
        assert!(span.attributes.is_empty());
    }
}
