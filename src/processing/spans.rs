use std::fs;
use std::path::Path;

use crate::models::{DocumentType, ExtractionSpan};
use crate::utils::ExtractError;

/// Boundary to the external grounded-span extractor: takes OCR text and the
/// target document type, returns free-form extraction spans. The extractor
/// is non-deterministic and its class names need not match schema fields;
/// the mapper resolves that. Failures surface as
/// `ExtractError::SpanExtractor`.
pub trait SpanProvider {
    fn extract(
        &self,
        ocr_text: &str,
        document_type: DocumentType,
    ) -> Result<Vec<ExtractionSpan>, ExtractError>;
}

/// Provider that always returns an empty span list. High-value identifier
/// fields still resolve through the regex and MRZ fallbacks.
pub struct NoSpans;

impl SpanProvider for NoSpans {
    fn extract(
        &self,
        _ocr_text: &str,
        _document_type: DocumentType,
    ) -> Result<Vec<ExtractionSpan>, ExtractError> {
        Ok(Vec::new())
    }
}

/// Provider backed by a fixed span list, e.g. loaded from a JSON file
/// produced by an out-of-process extractor run.
#[derive(Debug)]
pub struct StaticSpans {
    spans: Vec<ExtractionSpan>,
}

impl StaticSpans {
    pub fn new(spans: Vec<ExtractionSpan>) -> Self {
        StaticSpans { spans }
    }

    /// Load a JSON array of extraction spans.
    pub fn from_json_file(path: &Path) -> Result<Self, ExtractError> {
        let raw = fs::read_to_string(path)?;
        let spans: Vec<ExtractionSpan> = serde_json::from_str(&raw)
            .map_err(|e| ExtractError::SpanExtractor(format!("invalid span file: {}", e)))?;
        Ok(StaticSpans { spans })
    }
}

impl SpanProvider for StaticSpans {
    fn extract(
        &self,
        _ocr_text: &str,
        _document_type: DocumentType,
    ) -> Result<Vec<ExtractionSpan>, ExtractError> {
        Ok(self.spans.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_static_spans_from_json_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(
            file,
            r#"[{{"extraction_class": "pan_number", "extraction_text": "ABCDE1234F", "start_pos": 5, "end_pos": 15}}]"#
        )
        .unwrap();

        let provider = StaticSpans::from_json_file(file.path()).unwrap();
        let spans = provider.extract("irrelevant", DocumentType::Pan).unwrap();
        assert_eq!(spans.len(), 1);
        assert_eq!(spans[0].extraction_class, "pan_number");
        assert_eq!(spans[0].end_pos, Some(15));
    }

    #[test]
    fn test_invalid_span_file_is_a_provider_error() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, "not json").unwrap();

        let err = StaticSpans::from_json_file(file.path()).unwrap_err();
        assert_eq!(err.code(), "SPAN_EXTRACTOR_ERROR");
    }
}
