//! Helvetica glyph metrics and line wrapping.

use deunicode::deunicode_char;

/// Points per millimetre.
pub(crate) const PT_PER_MM: f64 = 72.0 / 25.4;

/// Advance used for glyphs with no ASCII counterpart.
const FALLBACK_WIDTH: u16 = 556;

/// Base-14 fonts used by the report.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Font {
    Regular,
    Bold,
    Oblique,
}

impl Font {
    /// Resource name in the page's font dictionary.
    pub(crate) const fn resource(self) -> &'static str {
        match self {
            Self::Regular => "F1",
            Self::Bold => "F2",
            Self::Oblique => "F3",
        }
    }

    pub(crate) const fn base_font(self) -> &'static str {
        match self {
            Self::Regular => "Helvetica",
            Self::Bold => "Helvetica-Bold",
            Self::Oblique => "Helvetica-Oblique",
        }
    }

    const fn widths(self) -> &'static [u16; 95] {
        match self {
            Self::Regular | Self::Oblique => &HELVETICA,
            Self::Bold => &HELVETICA_BOLD,
        }
    }
}

// Advance widths in 1/1000 em for WinAnsi 0x20..=0x7E.
#[rustfmt::skip]
const HELVETICA: [u16; 95] = [
    278, 278, 355, 556, 556, 889, 667, 191, 333, 333, 389, 584, 278, 333, 278, 278,
    556, 556, 556, 556, 556, 556, 556, 556, 556, 556, 278, 278, 584, 584, 584, 556,
    1015, 667, 667, 722, 722, 667, 611, 778, 722, 278, 500, 667, 556, 833, 722, 778,
    667, 778, 722, 667, 611, 722, 667, 944, 667, 667, 611, 278, 278, 278, 469, 556,
    333, 556, 556, 500, 556, 556, 278, 556, 556, 222, 222, 500, 222, 833, 556, 556,
    556, 556, 333, 500, 278, 556, 500, 722, 500, 500, 500, 334, 260, 334, 584,
];

#[rustfmt::skip]
const HELVETICA_BOLD: [u16; 95] = [
    278, 333, 474, 556, 556, 889, 722, 238, 333, 333, 389, 584, 278, 333, 278, 278,
    556, 556, 556, 556, 556, 556, 556, 556, 556, 556, 333, 333, 584, 584, 584, 611,
    975, 722, 722, 722, 722, 667, 611, 778, 722, 278, 556, 722, 611, 833, 722, 778,
    667, 778, 722, 667, 611, 722, 667, 944, 667, 667, 611, 333, 278, 333, 584, 556,
    333, 556, 611, 556, 611, 556, 333, 611, 611, 278, 278, 556, 278, 889, 611, 611,
    611, 611, 389, 556, 333, 611, 556, 778, 556, 556, 500, 389, 280, 389, 584,
];

fn ascii_width(font: Font, c: char) -> Option<u16> {
    let index = u32::from(c).checked_sub(0x20)?;
    font.widths().get(usize::try_from(index).ok()?).copied()
}

fn glyph_width(font: Font, c: char) -> u16 {
    if c == '\u{a0}' {
        return ascii_width(font, ' ').unwrap_or(FALLBACK_WIDTH);
    }
    ascii_width(font, c)
        .or_else(|| {
            // Accented Latin letters share the advance of their base letter.
            let mut base = deunicode_char(c)?.chars();
            match (base.next(), base.next()) {
                (Some(b), None) => ascii_width(font, b),
                _ => None,
            }
        })
        .unwrap_or(FALLBACK_WIDTH)
}

/// Width of `text` in millimetres at `size_pt`.
pub(crate) fn text_width_mm(text: &str, font: Font, size_pt: f64) -> f64 {
    let units: u32 = text.chars().map(|c| u32::from(glyph_width(font, c))).sum();
    f64::from(units) / 1000.0 * size_pt / PT_PER_MM
}

/// Greedy word wrap to `max_mm`; explicit newlines always break.
///
/// A single word wider than the line is split between characters.
pub(crate) fn wrap(text: &str, font: Font, size_pt: f64, max_mm: f64) -> Vec<String> {
    let fits = |s: &str| text_width_mm(s, font, size_pt) <= max_mm;
    let mut lines = Vec::new();

    for paragraph in text.split('\n') {
        let mut line = String::new();
        for word in paragraph.split_whitespace() {
            let candidate = if line.is_empty() {
                word.to_string()
            } else {
                format!("{line} {word}")
            };
            if fits(&candidate) {
                line = candidate;
                continue;
            }
            if !line.is_empty() {
                lines.push(std::mem::take(&mut line));
            }
            for c in word.chars() {
                line.push(c);
                if !fits(&line) && line.chars().count() > 1 {
                    line.pop();
                    lines.push(std::mem::take(&mut line));
                    line.push(c);
                }
            }
        }
        lines.push(line);
    }

    lines
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_known_widths() {
        // "Age" in Helvetica: 667 + 556 + 556 = 1779 units.
        let w = text_width_mm("Age", Font::Regular, 10.0);
        assert!((w - 1.779 * 10.0 / PT_PER_MM).abs() < 1e-9);
        assert!(text_width_mm("Age", Font::Bold, 10.0) > w);
    }

    #[test]
    fn test_accented_letters_use_base_width() {
        assert_eq!(
            text_width_mm("Âge", Font::Regular, 10.0),
            text_width_mm("Age", Font::Regular, 10.0)
        );
    }

    #[test]
    fn test_wrap_respects_width() {
        let text = "Disclaimer: This report is for educational and demonstrative purposes only. \
                    It is not a medical tool and should not be used for actual medical diagnosis.";
        let lines = wrap(text, Font::Oblique, 9.0, 170.0);
        assert!(lines.len() >= 2);
        for line in &lines {
            assert!(text_width_mm(line, Font::Oblique, 9.0) <= 170.0);
        }
        assert_eq!(lines.join(" "), text);
    }

    #[test]
    fn test_wrap_splits_long_words_and_keeps_newlines() {
        let lines = wrap("WWWWWWWWWW\nok", Font::Regular, 10.0, 10.0);
        assert!(lines.len() > 2);
        assert_eq!(lines.last().map(String::as_str), Some("ok"));
        assert_eq!(wrap("", Font::Regular, 10.0, 10.0), vec![String::new()]);
    }
}
