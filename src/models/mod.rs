pub mod data;
pub mod report;

pub use data::{
    AadhaarFields, DocumentFields, DocumentType, ExtractionSpan, FieldEvidence, Issue, OtherFields,
    PanFields, PassportFields, Severity,
};
pub use report::{ExtractionRequest, ExtractionResponse, GroundedExtraction, OcrPayload, TimingsMs};
