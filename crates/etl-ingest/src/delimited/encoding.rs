//! Text decoding with a Windows-1252 fallback.

use encoding_rs::WINDOWS_1252;

const UTF8_BOM: &[u8] = b"\xEF\xBB\xBF";

/// Decodes file bytes, returning the text and the name of the encoding used.
///
/// A UTF-8 BOM is stripped. Bytes that are not valid UTF-8 are decoded as
/// Windows-1252, which never fails.
pub fn decode_text(bytes: &[u8]) -> (String, &'static str) {
    let bytes = bytes.strip_prefix(UTF8_BOM).unwrap_or(bytes);
    match std::str::from_utf8(bytes) {
        Ok(text) => (text.to_string(), "UTF-8"),
        Err(_) => {
            let (text, _) = WINDOWS_1252.decode_without_bom_handling(bytes);
            (text.into_owned(), WINDOWS_1252.name())
        }
    }
}
