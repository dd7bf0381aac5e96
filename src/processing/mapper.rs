use lazy_static::lazy_static;
use regex::Regex;

use crate::models::{
    AadhaarFields, DocumentFields, DocumentType, ExtractionSpan, FieldEvidence, OtherFields,
    PanFields, PassportFields,
};
use crate::processing::detection::{
    AADHAAR_PATTERN, PAN_PATTERN, PASSPORT_PATTERN, PIN_CODE_PATTERN,
};
use crate::processing::mrz::MrzParser;

pub const REGEX_FALLBACK_SOURCE: &str = "regex_fallback";
pub const MRZ_FALLBACK_SOURCE: &str = "mrz_fallback";

lazy_static! {
    // Collapses separator runs when normalizing extraction-class names.
    static ref KEY_SEPARATORS: Regex = Regex::new(r"[^a-z0-9]+").unwrap();
}

/// Maps loosely-typed extraction spans onto the strict per-type field schema.
///
/// Resolution order per field: alias lookup over the span list (first match
/// wins), then a type-specific regex fallback for high-value identifiers,
/// then (passports only) MRZ-derived values. Unresolved fields stay None.
pub struct FieldMapper;

impl FieldMapper {
    pub fn map_fields(
        document_type: DocumentType,
        spans: &[ExtractionSpan],
        ocr_text: &str,
    ) -> DocumentFields {
        match document_type {
            DocumentType::Pan => DocumentFields::Pan(Self::map_pan(spans, ocr_text)),
            DocumentType::Aadhaar => DocumentFields::Aadhaar(Self::map_aadhaar(spans, ocr_text)),
            DocumentType::Passport => DocumentFields::Passport(Self::map_passport(spans, ocr_text)),
            DocumentType::Other => DocumentFields::Other(Self::map_other(spans, ocr_text)),
        }
    }

    fn map_pan(spans: &[ExtractionSpan], ocr_text: &str) -> PanFields {
        let pan_number = Self::pick_field(spans, ocr_text, &["pan_number", "pan", "id_number", "document_number"])
            .or_else(|| Self::regex_evidence(&PAN_PATTERN, ocr_text));

        PanFields {
            pan_number,
            full_name: Self::pick_field(spans, ocr_text, &["full_name", "name", "cardholder_name"]),
            father_name: Self::pick_field(spans, ocr_text, &["father_name", "parent_name"]),
            date_of_birth: Self::pick_field(spans, ocr_text, &["date_of_birth", "dob", "birth_date"]),
        }
    }

    fn map_aadhaar(spans: &[ExtractionSpan], ocr_text: &str) -> AadhaarFields {
        let aadhaar_number = Self::pick_field(spans, ocr_text, &["aadhaar_number", "aadhaar", "uid", "id_number"])
            .or_else(|| Self::regex_evidence(&AADHAAR_PATTERN, ocr_text));

        AadhaarFields {
            aadhaar_number,
            full_name: Self::pick_field(spans, ocr_text, &["full_name", "name"]),
            date_of_birth: Self::pick_field(spans, ocr_text, &["date_of_birth", "dob", "birth_date"]),
            year_of_birth: Self::pick_field(spans, ocr_text, &["year_of_birth", "yob"]),
            gender: Self::pick_field(spans, ocr_text, &["gender", "sex"]),
            address: Self::pick_field(spans, ocr_text, &["address", "residential_address"]),
            care_of: Self::pick_field(spans, ocr_text, &["care_of", "c_o", "co"]),
            pin_code: Self::pick_field(spans, ocr_text, &["pin_code", "postal_code"])
                .or_else(|| Self::regex_evidence(&PIN_CODE_PATTERN, ocr_text)),
        }
    }

    fn map_passport(spans: &[ExtractionSpan], ocr_text: &str) -> PassportFields {
        let passport_number = Self::pick_field(spans, ocr_text, &["passport_number", "passport_no", "id_number"])
            .or_else(|| Self::regex_evidence(&PASSPORT_PATTERN, ocr_text));

        let mut fields = PassportFields {
            passport_number,
            surname: Self::pick_field(spans, ocr_text, &["surname", "last_name", "family_name"]),
            given_names: Self::pick_field(spans, ocr_text, &["given_names", "first_name", "name"]),
            nationality: Self::pick_field(spans, ocr_text, &["nationality"]),
            date_of_birth: Self::pick_field(spans, ocr_text, &["date_of_birth", "dob", "birth_date"]),
            sex: Self::pick_field(spans, ocr_text, &["sex", "gender"]),
            place_of_birth: Self::pick_field(spans, ocr_text, &["place_of_birth"]),
            place_of_issue: Self::pick_field(spans, ocr_text, &["place_of_issue"]),
            date_of_issue: Self::pick_field(spans, ocr_text, &["date_of_issue", "issue_date"]),
            date_of_expiry: Self::pick_field(spans, ocr_text, &["date_of_expiry", "expiry_date"]),
            file_number: Self::pick_field(spans, ocr_text, &["file_number"]),
            mrz_line_1: Self::pick_field(spans, ocr_text, &["mrz_line_1"]),
            mrz_line_2: Self::pick_field(spans, ocr_text, &["mrz_line_2"]),
        };

        if fields.sex.is_none()
            || fields.nationality.is_none()
            || fields.mrz_line_1.is_none()
            || fields.mrz_line_2.is_none()
        {
            let (mrz_line_1, mrz_line_2) = MrzParser::extract_td3_lines(ocr_text);

            if let Some(line1) = mrz_line_1 {
                if fields.mrz_line_1.is_none() {
                    fields.mrz_line_1 = Some(Self::mrz_evidence(&line1));
                }
            }

            if let Some(line2) = mrz_line_2 {
                if fields.mrz_line_2.is_none() {
                    fields.mrz_line_2 = Some(Self::mrz_evidence(&line2));
                }

                if fields.nationality.is_none() {
                    if let Some(nationality) = MrzParser::nationality_from_line2(&line2) {
                        fields.nationality = Some(Self::mrz_evidence(&nationality));
                    }
                }

                if fields.sex.is_none() {
                    if let Some(sex) = MrzParser::sex_from_line2(&line2) {
                        fields.sex = Some(Self::mrz_evidence(&sex));
                    }
                }
            }
        }

        fields
    }

    fn map_other(spans: &[ExtractionSpan], ocr_text: &str) -> OtherFields {
        let id_number = Self::pick_field(spans, ocr_text, &["id_number", "document_number", "identifier"])
            .or_else(|| Self::regex_evidence(&PAN_PATTERN, ocr_text))
            .or_else(|| Self::regex_evidence(&AADHAAR_PATTERN, ocr_text))
            .or_else(|| Self::regex_evidence(&PASSPORT_PATTERN, ocr_text));

        OtherFields {
            id_number,
            full_name: Self::pick_field(spans, ocr_text, &["full_name", "name"]),
            date_of_birth: Self::pick_field(spans, ocr_text, &["date_of_birth", "dob", "birth_date"]),
            address: Self::pick_field(spans, ocr_text, &["address"]),
        }
    }

    /// First span (in input order) whose normalized class matches an alias.
    /// Alias lists are given in already-normalized form.
    fn pick_field(
        spans: &[ExtractionSpan],
        ocr_text: &str,
        aliases: &[&str],
    ) -> Option<FieldEvidence> {
        spans
            .iter()
            .find(|span| {
                let key = Self::normalize_key(&span.extraction_class);
                aliases.iter().any(|alias| *alias == key)
            })
            .map(|span| Self::build_evidence(span, ocr_text))
    }

    /// Evidence from a matched span. Offsets are untrusted: they must be
    /// non-negative, ordered, in range and on UTF-8 boundaries to ground the
    /// evidence; anything else degrades to the extractor's reported text
    /// with null offsets.
    fn build_evidence(span: &ExtractionSpan, ocr_text: &str) -> FieldEvidence {
        let mut evidence = span.extraction_text.clone();
        let mut start_pos = None;
        let mut end_pos = None;

        if let (Some(start), Some(end)) = (span.start_pos, span.end_pos) {
            if start >= 0 && start <= end {
                let (start, end) = (start as usize, end as usize);
                if let Some(grounded) = ocr_text.get(start..end) {
                    evidence = grounded.to_string();
                    start_pos = Some(start);
                    end_pos = Some(end);
                }
            }
        }

        FieldEvidence {
            value: Some(span.extraction_text.clone()),
            evidence: Some(evidence),
            start_pos,
            end_pos,
            source_extraction_class: Some(span.extraction_class.clone()),
        }
    }

    /// Deterministic fallback: first pattern match in the original text,
    /// always grounded at the match's own offsets.
    fn regex_evidence(pattern: &Regex, ocr_text: &str) -> Option<FieldEvidence> {
        pattern.find(ocr_text).map(|found| FieldEvidence {
            value: Some(found.as_str().to_string()),
            evidence: Some(found.as_str().to_string()),
            start_pos: Some(found.start()),
            end_pos: Some(found.end()),
            source_extraction_class: Some(REGEX_FALLBACK_SOURCE.to_string()),
        })
    }

    fn mrz_evidence(value: &str) -> FieldEvidence {
        // Derived from normalized text, so no offset into the original
        // exists; value doubles as evidence, ungrounded.
        FieldEvidence {
            value: Some(value.to_string()),
            evidence: Some(value.to_string()),
            start_pos: None,
            end_pos: None,
            source_extraction_class: Some(MRZ_FALLBACK_SOURCE.to_string()),
        }
    }

    /// Lower-case, collapse non-alphanumeric runs to `_`, trim `_`.
    fn normalize_key(value: &str) -> String {
        let lower = value.to_lowercase();
        KEY_SEPARATORS
            .replace_all(&lower, "_")
            .trim_matches('_')
            .to_string()
    }
}
