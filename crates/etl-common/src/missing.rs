//! Missing-value predicates.

/// Textual spellings of "no value" found in exported spreadsheets.
pub const MISSING_MARKERS: [&str; 3] = ["", "nan", "null"];

/// Whether a cell counts as problematic for the quality report.
///
/// Null, or a string equal to `""`, `"nan"` or `"null"` ignoring case.
/// Whitespace is not trimmed, so `"  "` is a value.
pub fn is_problematic(value: Option<&str>) -> bool {
    match value {
        None => true,
        Some(text) => {
            let lowered = text.to_lowercase();
            MISSING_MARKERS.contains(&lowered.as_str())
        }
    }
}

/// Whether a text cell should receive the text sentinel.
///
/// Same as [`is_problematic`] but also treats `"none"` as missing.
pub fn is_missing_text(value: Option<&str>) -> bool {
    is_problematic(value) || value.is_some_and(|text| text.eq_ignore_ascii_case("none"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_is_problematic() {
        assert!(is_problematic(None));
        assert!(is_problematic(Some("")));
        assert!(is_problematic(Some("NaN")));
        assert!(is_problematic(Some("NULL")));
        assert!(!is_problematic(Some("  ")));
        assert!(!is_problematic(Some("none")));
        assert!(!is_problematic(Some("0")));
    }

    #[test]
    fn test_is_missing_text() {
        assert!(is_missing_text(Some("None")));
        assert!(is_missing_text(None));
        assert!(!is_missing_text(Some("ANA")));
    }
}
