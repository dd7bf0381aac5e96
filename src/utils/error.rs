use thiserror::Error;

/// Orchestration-level failures. The classification-and-grounding core
/// itself is total and never returns these; they cover request validation
/// and the external OCR/extractor collaborators.
#[derive(Debug, Error)]
pub enum ExtractError {
    #[error("path traversal: {0}")]
    PathTraversal(String),

    #[error("invalid file extension: {0}")]
    InvalidFileExtension(String),

    #[error("source file not found: {0}")]
    SourceFileNotFound(String),

    #[error("empty OCR text: {0}")]
    EmptyOcrText(String),

    #[error("OCR provider error: {0}")]
    OcrProvider(String),

    #[error("span extractor error: {0}")]
    SpanExtractor(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl ExtractError {
    /// Stable machine-readable code for transport layers.
    pub fn code(&self) -> &'static str {
        match self {
            ExtractError::PathTraversal(_) => "PATH_TRAVERSAL",
            ExtractError::InvalidFileExtension(_) => "INVALID_FILE_EXTENSION",
            ExtractError::SourceFileNotFound(_) => "SOURCE_FILE_NOT_FOUND",
            ExtractError::EmptyOcrText(_) => "EMPTY_OCR_TEXT",
            ExtractError::OcrProvider(_) => "OCR_PROVIDER_ERROR",
            ExtractError::SpanExtractor(_) => "SPAN_EXTRACTOR_ERROR",
            ExtractError::Io(_) => "IO_ERROR",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_codes_are_stable() {
        assert_eq!(
            ExtractError::EmptyOcrText("x".to_string()).code(),
            "EMPTY_OCR_TEXT"
        );
        assert_eq!(
            ExtractError::OcrProvider("x".to_string()).code(),
            "OCR_PROVIDER_ERROR"
        );
    }

    #[test]
    fn test_display_includes_detail() {
        let err = ExtractError::InvalidFileExtension("'.pdf' not allowed".to_string());
        assert!(err.to_string().contains(".pdf"));
    }
}
