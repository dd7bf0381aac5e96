use lazy_static::lazy_static;
use regex::Regex;

use crate::processing::normalize;

// TD3 (passport) machine readable zone: two adjacent 44-character lines.
// Line 2 carries the fixed-width fields validated by the strict grammar:
//
//   0-8   document number        9     doc-number check digit
//   10-12 nationality code       13-18 birth date YYMMDD
//   19    birth check digit      20    sex (M/F/</X)
//   21-26 expiry date YYMMDD     27    expiry check digit
//   28-41 optional data          42-43 final check digits
const TD3_LINE2_GRAMMAR: &str =
    r"[A-Z0-9<]{9}[0-9<][A-Z]{3}[0-9]{6}[0-9<][MF<X][0-9]{6}[0-9<][A-Z0-9<]{14}[0-9<]{2}";

lazy_static! {
    static ref TD3_BLOCK_PATTERN: Regex =
        Regex::new(r"([A-Z0-9<]{44})\s+([A-Z0-9<]{44})").unwrap();
    static ref TD3_LINE2_PATTERN: Regex = Regex::new(TD3_LINE2_GRAMMAR).unwrap();
    static ref TD3_LINE2_EXACT: Regex =
        Regex::new(&format!(r"\A{}\z", TD3_LINE2_GRAMMAR)).unwrap();
}

/// Locates and validates TD3 passport MRZ blocks in OCR text.
///
/// Has no failure mode beyond "not found": every operation returns options.
pub struct MrzParser;

impl MrzParser {
    /// Return `(line1, line2)` for the first TD3 block whose second line
    /// passes the strict grammar. Falls back to any standalone grammar
    /// match anywhere in the text, returned as line 2 only.
    ///
    /// Matching runs on normalized text (entities unescaped, upper-cased),
    /// so the returned lines carry no offsets into the original text.
    pub fn extract_td3_lines(ocr_text: &str) -> (Option<String>, Option<String>) {
        let normalized = normalize::normalize_structure(ocr_text);

        for captures in TD3_BLOCK_PATTERN.captures_iter(&normalized) {
            let line2 = &captures[2];
            if TD3_LINE2_EXACT.is_match(line2) {
                return (Some(captures[1].to_string()), Some(line2.to_string()));
            }
        }

        if let Some(found) = TD3_LINE2_PATTERN.find(&normalized) {
            return (None, Some(found.as_str().to_string()));
        }

        (None, None)
    }

    /// Nationality code at positions 10..13 with filler stripped; None when
    /// the field is all filler.
    pub fn nationality_from_line2(line2: &str) -> Option<String> {
        let code: String = line2.get(10..13)?.chars().filter(|c| *c != '<').collect();
        if code.is_empty() {
            None
        } else {
            Some(code)
        }
    }

    /// Sex at position 20; only `M`, `F` and `X` are surfaced, filler means
    /// unknown.
    pub fn sex_from_line2(line2: &str) -> Option<String> {
        let sex = line2.get(20..21)?;
        match sex {
            "M" | "F" | "X" => Some(sex.to_string()),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const LINE2: &str = "L898902C36IND7408122M1204159ZE184226B<<<<<10";

    fn line1() -> String {
        let padding = "<".repeat(27);
        format!("P<INDSHARMA<<AMIT{}", padding)
    }

    #[test]
    fn test_extracts_adjacent_pair() {
        let text = format!("REPUBLIC OF INDIA\n{}\n{}\n", line1(), LINE2);
        let (l1, l2) = MrzParser::extract_td3_lines(&text);
        assert_eq!(l1, Some(line1()));
        assert_eq!(l2, Some(LINE2.to_string()));
    }

    #[test]
    fn test_standalone_line2_without_line1() {
        let text = format!("scanner noise {} more noise", LINE2);
        let (l1, l2) = MrzParser::extract_td3_lines(&text);
        assert_eq!(l1, None);
        assert_eq!(l2, Some(LINE2.to_string()));
    }

    #[test]
    fn test_pair_with_invalid_line2_is_rejected() {
        // Second line is 44 filler chars: right alphabet, wrong structure.
        let filler = "<".repeat(44);
        let text = format!("{}\n{}", line1(), filler);
        assert_eq!(MrzParser::extract_td3_lines(&text), (None, None));
    }

    #[test]
    fn test_entity_escaped_filler_is_normalized() {
        let escaped = format!("{}\n{}", line1(), LINE2).replace('<', "&lt;");
        let (l1, l2) = MrzParser::extract_td3_lines(&escaped);
        assert_eq!(l1, Some(line1()));
        assert_eq!(l2, Some(LINE2.to_string()));
    }

    #[test]
    fn test_lowercase_input_is_normalized() {
        let text = format!("{}\n{}", line1(), LINE2).to_lowercase();
        let (_, l2) = MrzParser::extract_td3_lines(&text);
        assert_eq!(l2, Some(LINE2.to_string()));
    }

    #[test]
    fn test_nothing_found() {
        assert_eq!(
            MrzParser::extract_td3_lines("no machine readable zone here"),
            (None, None)
        );
    }

    #[test]
    fn test_nationality_derivation() {
        assert_eq!(
            MrzParser::nationality_from_line2(LINE2),
            Some("IND".to_string())
        );
        let blank_nationality = "L898902C36<<<7408122M1204159ZE184226B<<<<<10";
        assert_eq!(MrzParser::nationality_from_line2(blank_nationality), None);
        assert_eq!(MrzParser::nationality_from_line2("short"), None);
    }

    #[test]
    fn test_sex_derivation() {
        assert_eq!(MrzParser::sex_from_line2(LINE2), Some("M".to_string()));
        let unknown_sex = "L898902C36IND7408122<1204159ZE184226B<<<<<10";
        assert_eq!(MrzParser::sex_from_line2(unknown_sex), None);
        assert_eq!(MrzParser::sex_from_line2("short"), None);
    }
}
