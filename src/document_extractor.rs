use std::path::Path;
use std::time::Instant;

use crate::config::Settings;
use crate::models::{
    DocumentType, ExtractionRequest, ExtractionResponse, ExtractionSpan, GroundedExtraction,
    OcrPayload, TimingsMs,
};
use crate::processing::{
    DocumentClassifier, FieldMapper, NoSpans, OcrProvider, SpanProvider, TesseractOcr,
};
use crate::utils::ExtractError;
use crate::validation::{RequestValidator, TypeReconciler};

/// Orchestrates file validation, OCR, type detection, span extraction and
/// field mapping for one document at a time.
pub struct DocumentExtractor {
    settings: Settings,
    ocr: Box<dyn OcrProvider>,
    spans: Box<dyn SpanProvider>,
}

impl DocumentExtractor {
    /// Extractor with the default providers: system tesseract for OCR and
    /// no span extractor (regex/MRZ fallbacks still apply).
    pub fn new(settings: Settings) -> Self {
        let ocr = Box::new(TesseractOcr::with_language(&settings.ocr_language));
        DocumentExtractor {
            settings,
            ocr,
            spans: Box::new(NoSpans),
        }
    }

    pub fn with_providers(
        settings: Settings,
        ocr: Box<dyn OcrProvider>,
        spans: Box<dyn SpanProvider>,
    ) -> Self {
        DocumentExtractor {
            settings,
            ocr,
            spans,
        }
    }

    /// Process a request against a filename inside the configured image
    /// root.
    pub fn process(&self, request: &ExtractionRequest) -> Result<ExtractionResponse, ExtractError> {
        let total_start = Instant::now();

        let stage = Instant::now();
        let image_path = RequestValidator::validate_and_resolve(&self.settings, &request.filename)?;
        let validation_ms = Some(to_ms(stage));

        self.run_pipeline(
            &image_path,
            &request.filename,
            request.document_type,
            request.include_ocr_text,
            request.include_extractions,
            validation_ms,
            total_start,
        )
    }

    /// Process an already-resolved local file, bypassing filename
    /// validation (used for files placed by an upstream retrieval step).
    pub fn process_path(
        &self,
        image_path: &Path,
        document_type: Option<DocumentType>,
        include_ocr_text: bool,
        include_extractions: bool,
    ) -> Result<ExtractionResponse, ExtractError> {
        let filename = image_path
            .file_name()
            .map(|name| name.to_string_lossy().to_string())
            .unwrap_or_else(|| image_path.display().to_string());

        self.run_pipeline(
            image_path,
            &filename,
            document_type,
            include_ocr_text,
            include_extractions,
            None,
            Instant::now(),
        )
    }

    /// The pure classification-and-grounding engine: total, deterministic,
    /// no I/O. Suitable for callers that already hold OCR text and spans.
    pub fn classify_and_ground(
        ocr_text: &str,
        requested_type: Option<DocumentType>,
        spans: &[ExtractionSpan],
    ) -> GroundedExtraction {
        let detected = DocumentClassifier::detect(ocr_text);
        let (effective, issues) = TypeReconciler::reconcile(requested_type, detected);
        let fields = FieldMapper::map_fields(effective, spans, ocr_text);

        GroundedExtraction {
            document_type: effective,
            fields,
            issues,
        }
    }

    #[allow(clippy::too_many_arguments)]
    fn run_pipeline(
        &self,
        image_path: &Path,
        filename: &str,
        requested_type: Option<DocumentType>,
        include_ocr_text: bool,
        include_extractions: bool,
        validation_ms: Option<u64>,
        total_start: Instant,
    ) -> Result<ExtractionResponse, ExtractError> {
        let stage = Instant::now();
        let ocr_text = self.ocr.extract_text(image_path)?.trim().to_string();
        if ocr_text.is_empty() {
            return Err(ExtractError::EmptyOcrText(
                "OCR output is empty for the provided image".to_string(),
            ));
        }
        let ocr_ms = to_ms(stage);

        let stage = Instant::now();
        let detected = DocumentClassifier::detect(&ocr_text);
        let (effective, issues) = TypeReconciler::reconcile(requested_type, detected);
        let detection_ms = to_ms(stage);
        log::info!(
            "{}: detected {} (requested {:?}), {} issue(s)",
            filename,
            effective,
            requested_type.map(|t| t.as_str()),
            issues.len()
        );

        let stage = Instant::now();
        let spans = self.spans.extract(&ocr_text, effective)?;
        let fields = FieldMapper::map_fields(effective, &spans, &ocr_text);
        let extraction_ms = to_ms(stage);

        Ok(ExtractionResponse {
            filename: filename.to_string(),
            document_type_requested: requested_type,
            document_type_detected: effective,
            ocr: OcrPayload {
                text: include_ocr_text.then(|| ocr_text.clone()),
                text_preview: self.text_preview(&ocr_text),
                char_count: ocr_text.len(),
            },
            fields,
            extractions: include_extractions.then_some(spans),
            issues,
            timings_ms: TimingsMs {
                validation: validation_ms,
                download: None,
                ocr: ocr_ms,
                detection: detection_ms,
                extraction: extraction_ms,
                total: to_ms(total_start),
            },
        })
    }

    // Truncates on char boundaries; the preview is display-only and carries
    // no offsets.
    fn text_preview(&self, text: &str) -> String {
        let limit = self.settings.ocr_preview_chars;
        if text.chars().count() <= limit {
            return text.to_string();
        }
        let preview: String = text.chars().take(limit).collect();
        format!("{}...", preview)
    }
}

fn to_ms(start: Instant) -> u64 {
    start.elapsed().as_millis() as u64
}
