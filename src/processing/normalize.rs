// Structural text normalization.
//
// OCR exporters emit Markdown-ish text and may HTML-escape `<` as `&lt;`,
// which breaks MRZ matching since `<` is the MRZ filler character. The
// normalized form is used for structural matching only; offset-based
// evidence grounding always runs against the original text, because
// unescaping changes string length and would invalidate stored offsets.

/// Decode HTML-style entities in OCR text.
///
/// Handles the named entities OCR exporters produce plus numeric decimal and
/// hex forms. Unknown or malformed entities are passed through unchanged.
/// Single pass, so `&amp;lt;` decodes to `&lt;` and no further.
pub fn unescape_entities(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    let mut rest = text;

    while let Some(amp) = rest.find('&') {
        out.push_str(&rest[..amp]);
        let candidate = &rest[amp..];

        match decode_entity(candidate) {
            Some((decoded, consumed)) => {
                out.push(decoded);
                rest = &candidate[consumed..];
            }
            None => {
                out.push('&');
                rest = &candidate[1..];
            }
        }
    }

    out.push_str(rest);
    out
}

/// Unescape entities and upper-case, for classification and MRZ location.
pub fn normalize_structure(text: &str) -> String {
    unescape_entities(text).to_uppercase()
}

// Decode one entity at the start of `s` (which begins with '&').
// Returns the decoded character and the number of bytes consumed.
fn decode_entity(s: &str) -> Option<(char, usize)> {
    let end = s[1..].find(';').map(|i| i + 1)?;
    let body = &s[1..end];

    let decoded = match body {
        "amp" => Some('&'),
        "lt" => Some('<'),
        "gt" => Some('>'),
        "quot" => Some('"'),
        "apos" => Some('\''),
        _ => {
            let code = if let Some(hex) = body.strip_prefix("#x").or_else(|| body.strip_prefix("#X")) {
                u32::from_str_radix(hex, 16).ok()
            } else if let Some(dec) = body.strip_prefix('#') {
                dec.parse::<u32>().ok()
            } else {
                None
            };
            code.and_then(char::from_u32)
        }
    };

    decoded.map(|c| (c, end + 1))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unescape_named_entities() {
        assert_eq!(unescape_entities("P&lt;INDSHARMA"), "P<INDSHARMA");
        assert_eq!(unescape_entities("a &amp; b &gt; c"), "a & b > c");
        assert_eq!(unescape_entities("&quot;x&quot; &apos;y&apos;"), "\"x\" 'y'");
    }

    #[test]
    fn test_unescape_numeric_entities() {
        assert_eq!(unescape_entities("&#60;&#62;"), "<>");
        assert_eq!(unescape_entities("&#x3C;&#X3c;"), "<<");
    }

    #[test]
    fn test_unknown_entities_pass_through() {
        assert_eq!(unescape_entities("&unknown; & &#zz;"), "&unknown; & &#zz;");
        assert_eq!(unescape_entities("trailing &"), "trailing &");
        assert_eq!(unescape_entities("no semicolon &lt"), "no semicolon &lt");
    }

    #[test]
    fn test_no_double_decode() {
        assert_eq!(unescape_entities("&amp;lt;"), "&lt;");
    }

    #[test]
    fn test_normalize_structure_uppercases() {
        assert_eq!(
            normalize_structure("p&lt;indsharma&lt;&lt;amit"),
            "P<INDSHARMA<<AMIT"
        );
    }
}
