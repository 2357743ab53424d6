//! WinAnsi (Windows-1252) encoding for base-14 fonts and PDF string escaping.

use crate::error::{ReportError, ReportResult};

/// Code points 0x80..=0x9F of Windows-1252 that differ from Latin-1.
const CP1252_HIGH: [(char, u8); 27] = [
    ('€', 0x80),
    ('‚', 0x82),
    ('ƒ', 0x83),
    ('„', 0x84),
    ('…', 0x85),
    ('†', 0x86),
    ('‡', 0x87),
    ('ˆ', 0x88),
    ('‰', 0x89),
    ('Š', 0x8A),
    ('‹', 0x8B),
    ('Œ', 0x8C),
    ('Ž', 0x8E),
    ('‘', 0x91),
    ('’', 0x92),
    ('“', 0x93),
    ('”', 0x94),
    ('•', 0x95),
    ('–', 0x96),
    ('—', 0x97),
    ('˜', 0x98),
    ('™', 0x99),
    ('š', 0x9A),
    ('›', 0x9B),
    ('œ', 0x9C),
    ('ž', 0x9E),
    ('Ÿ', 0x9F),
];

/// Map one character to its WinAnsi byte.
pub(crate) fn win_ansi_byte(c: char) -> Option<u8> {
    match u32::from(c) {
        0x20..=0x7E | 0xA0..=0xFF => u8::try_from(u32::from(c)).ok(),
        _ => CP1252_HIGH
            .iter()
            .find_map(|&(ch, byte)| (ch == c).then_some(byte)),
    }
}

/// Encode a whole string, failing on the first character without a glyph.
pub(crate) fn encode(text: &str) -> ReportResult<Vec<u8>> {
    text.chars()
        .map(|c| {
            win_ansi_byte(c).ok_or_else(|| ReportError::UnsupportedCharacter {
                character: c,
                text: text.to_string(),
            })
        })
        .collect()
}

/// Render encoded bytes as a PDF literal string, `(` and `)` included.
///
/// The output is pure ASCII: bytes above 0x7E become octal escapes.
pub(crate) fn literal(bytes: &[u8]) -> String {
    let mut out = String::with_capacity(bytes.len() + 2);
    out.push('(');
    for &b in bytes {
        match b {
            b'(' | b')' | b'\\' => {
                out.push('\\');
                out.push(char::from(b));
            }
            0x20..=0x7E => out.push(char::from(b)),
            _ => out.push_str(&format!("\\{b:03o}")),
        }
    }
    out.push(')');
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_latin1_and_cp1252() {
        assert_eq!(encode("Âge").unwrap(), vec![0xC2, b'g', b'e']);
        assert_eq!(encode("€ – ’").unwrap(), vec![0x80, b' ', 0x96, b' ', 0x92]);
    }

    #[test]
    fn test_rejects_cjk_and_controls() {
        assert!(matches!(
            encode("年齢"),
            Err(ReportError::UnsupportedCharacter { character: '年', .. })
        ));
        assert!(encode("tab\there").is_err());
        assert!(encode("nul\0").is_err());
    }

    #[test]
    fn test_literal_escaping() {
        assert_eq!(literal(b"a(b)c\\"), "(a\\(b\\)c\\\\)");
        assert_eq!(literal(&[0xE9]), "(\\351)");
    }
}
