//! Text decodings tried, in order, before parsing.

use encoding_rs::{UTF_8, WINDOWS_1252};
use serde::{Deserialize, Serialize};
use std::borrow::Cow;

const UTF8_BOM: &[u8] = b"\xEF\xBB\xBF";

/// A way of turning raw file bytes into text.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TextDecoding {
    /// Strict UTF-8. Fails on any invalid byte sequence.
    Utf8,
    /// Single-byte Latin-1 (decoded as windows-1252, its WHATWG superset).
    /// Every byte maps to a character, so this never fails.
    Latin1,
}

impl TextDecoding {
    /// Decodings in the order the loader attempts them.
    pub const CHAIN: [TextDecoding; 2] = [TextDecoding::Utf8, TextDecoding::Latin1];

    pub fn label(&self) -> &'static str {
        match self {
            Self::Utf8 => "utf-8",
            Self::Latin1 => "latin-1",
        }
    }

    /// Decode `bytes`, or `None` if they are not valid in this encoding.
    pub fn decode<'a>(&self, bytes: &'a [u8]) -> Option<Cow<'a, str>> {
        match self {
            Self::Utf8 => {
                let body = bytes.strip_prefix(UTF8_BOM).unwrap_or(bytes);
                UTF_8.decode_without_bom_handling_and_without_replacement(body)
            }
            Self::Latin1 => {
                let (text, _had_errors) = WINDOWS_1252.decode_without_bom_handling(bytes);
                Some(text)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_utf8_accepts_valid_text() {
        let text = TextDecoding::Utf8.decode("Glucose,BMI\n148,33.6\n".as_bytes());
        assert_eq!(text.as_deref(), Some("Glucose,BMI\n148,33.6\n"));
    }

    #[test]
    fn test_utf8_strips_bom() {
        let text = TextDecoding::Utf8.decode(b"\xEF\xBB\xBFGlucose\n1\n");
        assert_eq!(text.as_deref(), Some("Glucose\n1\n"));
    }

    #[test]
    fn test_utf8_rejects_latin1_bytes() {
        // "Jos\xe9" is "José" in Latin-1 and not valid UTF-8.
        assert!(TextDecoding::Utf8.decode(b"Name\nJos\xe9\n").is_none());
    }

    #[test]
    fn test_latin1_never_fails() {
        let text = TextDecoding::Latin1.decode(b"Name\nJos\xe9\n");
        assert_eq!(text.as_deref(), Some("Name\nJosé\n"));
    }

    #[test]
    fn test_chain_order() {
        assert_eq!(TextDecoding::CHAIN[0], TextDecoding::Utf8);
        assert_eq!(TextDecoding::CHAIN[1].label(), "latin-1");
    }
}
