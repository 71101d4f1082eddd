//! Accent folding.

use unicode_normalization::UnicodeNormalization;
use unicode_normalization::char::is_combining_mark;

/// Removes diacritics by NFKD decomposition, dropping combining marks.
///
/// ```
/// use etl_common::strip_accents;
///
/// assert_eq!(strip_accents("Código Ñandú"), "Codigo Nandu");
/// ```
pub fn strip_accents(value: &str) -> String {
    value.nfkd().filter(|c| !is_combining_mark(*c)).collect()
}

/// Accent-folded, trimmed, upper-cased form used for text columns.
pub fn fold_upper(value: &str) -> String {
    strip_accents(value).trim().to_uppercase()
}
