use serde::{Deserialize, Serialize};

use super::data::{DocumentFields, DocumentType, ExtractionSpan, Issue};

/// A single extraction request against a file in the configured image root.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExtractionRequest {
    pub filename: String,
    pub document_type: Option<DocumentType>,
    #[serde(default = "default_true")]
    pub include_ocr_text: bool,
    #[serde(default = "default_true")]
    pub include_extractions: bool,
}

impl ExtractionRequest {
    pub fn new(filename: &str) -> Self {
        ExtractionRequest {
            filename: filename.to_string(),
            document_type: None,
            include_ocr_text: true,
            include_extractions: true,
        }
    }

    pub fn with_document_type(mut self, document_type: DocumentType) -> Self {
        self.document_type = Some(document_type);
        self
    }
}

fn default_true() -> bool {
    true
}

/// OCR text echo: optionally the full text, always a bounded preview.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OcrPayload {
    pub text: Option<String>,
    pub text_preview: String,
    pub char_count: usize,
}

/// Wall-clock milliseconds per pipeline stage.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct TimingsMs {
    pub validation: Option<u64>,
    pub download: Option<u64>,
    pub ocr: u64,
    pub detection: u64,
    pub extraction: u64,
    pub total: u64,
}

/// Output of the pure classification-and-grounding engine.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GroundedExtraction {
    pub document_type: DocumentType,
    pub fields: DocumentFields,
    pub issues: Vec<Issue>,
}

/// Full orchestration response for one document.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExtractionResponse {
    pub filename: String,
    pub document_type_requested: Option<DocumentType>,
    pub document_type_detected: DocumentType,
    pub ocr: OcrPayload,
    pub fields: DocumentFields,
    pub extractions: Option<Vec<ExtractionSpan>>,
    pub issues: Vec<Issue>,
    pub timings_ms: TimingsMs,
}
