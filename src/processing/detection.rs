use lazy_static::lazy_static;
use regex::Regex;

use crate::models::DocumentType;
use crate::processing::mrz::MrzParser;

// Identifier patterns shared between detection and the field mapper's
// regex fallback. Identifier matches are near-unambiguous; keyword hits are
// weak evidence, so the score threshold is reached by either one structural
// signal or two keywords.
lazy_static! {
    /// PAN: 5 letters, 4 digits, 1 letter.
    pub static ref PAN_PATTERN: Regex = Regex::new(r"\b[A-Z]{5}[0-9]{4}[A-Z]\b").unwrap();
    /// Aadhaar: three groups of 4 digits, optionally space-separated.
    pub static ref AADHAAR_PATTERN: Regex = Regex::new(r"\b\d{4}\s?\d{4}\s?\d{4}\b").unwrap();
    /// Indian passport number: valid series letter, nonzero digit, 6 digits.
    pub static ref PASSPORT_PATTERN: Regex = Regex::new(r"\b[A-PR-WYa-pr-wy][1-9]\d{6}\b").unwrap();
    /// TD3 line 1 prefix for Indian passports at the start of a line.
    pub static ref MRZ_PASSPORT_PATTERN: Regex = Regex::new(r"(?m)^P<IND").unwrap();
    /// Aadhaar postal PIN code.
    pub static ref PIN_CODE_PATTERN: Regex = Regex::new(r"\b\d{6}\b").unwrap();
}

const PASSPORT_KEYWORDS: [&str; 6] = [
    "passport",
    "republic of india",
    "nationality",
    "date of issue",
    "date of expiry",
    "place of issue",
];

const PASSPORT_SCORE_THRESHOLD: u32 = 2;

/// Heuristic document-type detection over raw OCR text.
pub struct DocumentClassifier;

impl DocumentClassifier {
    /// Decide the document type. Total and deterministic: identifier
    /// patterns first (PAN wins over everything, then Aadhaar), then a
    /// scored passport check, else OTHER.
    pub fn detect(ocr_text: &str) -> DocumentType {
        if PAN_PATTERN.is_match(ocr_text) {
            return DocumentType::Pan;
        }

        if AADHAAR_PATTERN.is_match(ocr_text) {
            return DocumentType::Aadhaar;
        }

        if Self::passport_score(ocr_text) >= PASSPORT_SCORE_THRESHOLD {
            return DocumentType::Passport;
        }

        DocumentType::Other
    }

    fn passport_score(ocr_text: &str) -> u32 {
        let mut score = 0;

        if PASSPORT_PATTERN.is_match(ocr_text) {
            score += 2;
        }
        if MRZ_PASSPORT_PATTERN.is_match(ocr_text) {
            score += 2;
        }
        if MrzParser::extract_td3_lines(ocr_text).1.is_some() {
            score += 2;
        }

        let lower = ocr_text.to_lowercase();
        for keyword in PASSPORT_KEYWORDS {
            if lower.contains(keyword) {
                score += 1;
            }
        }

        score
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pan_pattern_wins_over_everything() {
        let text = "REPUBLIC OF INDIA\nPassport No: N1234567\nNationality: INDIAN\nPAN: ABCDE1234F";
        assert_eq!(DocumentClassifier::detect(text), DocumentType::Pan);
    }

    #[test]
    fn test_aadhaar_number_detected() {
        let text = "Government of India 1234 5678 9012";
        assert_eq!(DocumentClassifier::detect(text), DocumentType::Aadhaar);
        assert_eq!(
            DocumentClassifier::detect("UID 123456789012"),
            DocumentType::Aadhaar
        );
    }

    #[test]
    fn test_passport_number_plus_keyword() {
        let text = "REPUBLIC OF INDIA\nPassport No: N1234567\nNationality: INDIAN";
        assert_eq!(DocumentClassifier::detect(text), DocumentType::Passport);
    }

    #[test]
    fn test_two_keywords_reach_threshold() {
        let text = "Date of Issue: 01/01/2020\nDate of Expiry: 01/01/2030";
        assert_eq!(DocumentClassifier::detect(text), DocumentType::Passport);
    }

    #[test]
    fn test_single_keyword_is_not_enough() {
        assert_eq!(
            DocumentClassifier::detect("nationality unclear"),
            DocumentType::Other
        );
    }

    #[test]
    fn test_mrz_prefix_scores_alone() {
        assert_eq!(
            DocumentClassifier::detect("P<INDSHARMA<<AMIT"),
            DocumentType::Passport
        );
    }

    #[test]
    fn test_valid_td3_line_scores_alone() {
        let line2 = "L898902C36IND7408122M1204159ZE184226B<<<<<10";
        assert_eq!(DocumentClassifier::detect(line2), DocumentType::Passport);
    }

    #[test]
    fn test_plain_text_is_other() {
        assert_eq!(
            DocumentClassifier::detect("generic identity card"),
            DocumentType::Other
        );
    }
}
