use crate::models::{DocumentType, Issue};

pub const DETECTION_INCONCLUSIVE: &str = "DETECTION_INCONCLUSIVE";
pub const DOCUMENT_TYPE_MISMATCH: &str = "DOCUMENT_TYPE_MISMATCH";

/// Reconciles a caller-requested document type against the detected one.
pub struct TypeReconciler;

impl TypeReconciler {
    /// Returns the effective type plus warnings describing any divergence.
    /// A requested OTHER behaves as "no preference". Detection always wins
    /// over a conflicting request; the request only wins when detection was
    /// inconclusive.
    pub fn reconcile(
        requested: Option<DocumentType>,
        detected: DocumentType,
    ) -> (DocumentType, Vec<Issue>) {
        let mut issues = Vec::new();

        let requested = match requested {
            Some(requested) if requested != DocumentType::Other => requested,
            _ => return (detected, issues),
        };

        if detected == DocumentType::Other {
            issues.push(Issue::warning(
                DETECTION_INCONCLUSIVE,
                format!(
                    "Document type detection was inconclusive; using requested type {}.",
                    requested
                ),
            ));
            return (requested, issues);
        }

        if requested != detected {
            issues.push(Issue::warning(
                DOCUMENT_TYPE_MISMATCH,
                format!(
                    "Requested type {} does not match detected type {}; proceeding with detected type.",
                    requested, detected
                ),
            ));
        }

        (detected, issues)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Severity;

    #[test]
    fn test_mismatch_keeps_detected_type() {
        let (effective, issues) =
            TypeReconciler::reconcile(Some(DocumentType::Aadhaar), DocumentType::Pan);
        assert_eq!(effective, DocumentType::Pan);
        assert_eq!(issues.len(), 1);
        assert_eq!(issues[0].code, DOCUMENT_TYPE_MISMATCH);
        assert_eq!(issues[0].severity, Severity::Warning);
    }

    #[test]
    fn test_inconclusive_uses_requested_type() {
        let (effective, issues) =
            TypeReconciler::reconcile(Some(DocumentType::Passport), DocumentType::Other);
        assert_eq!(effective, DocumentType::Passport);
        assert_eq!(issues.len(), 1);
        assert_eq!(issues[0].code, DETECTION_INCONCLUSIVE);
    }

    #[test]
    fn test_agreement_is_silent() {
        let (effective, issues) =
            TypeReconciler::reconcile(Some(DocumentType::Pan), DocumentType::Pan);
        assert_eq!(effective, DocumentType::Pan);
        assert!(issues.is_empty());
    }

    #[test]
    fn test_no_request_is_silent() {
        let (effective, issues) = TypeReconciler::reconcile(None, DocumentType::Aadhaar);
        assert_eq!(effective, DocumentType::Aadhaar);
        assert!(issues.is_empty());
    }

    #[test]
    fn test_requested_other_behaves_as_unset() {
        let (effective, issues) =
            TypeReconciler::reconcile(Some(DocumentType::Other), DocumentType::Other);
        assert_eq!(effective, DocumentType::Other);
        assert!(issues.is_empty());
    }
}
