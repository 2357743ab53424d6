//! Report encoding errors.

use thiserror::Error;

/// Result alias for report operations.
pub type ReportResult<T> = Result<T, ReportError>;

/// Errors produced while encoding a report. No artifact exists when one is returned.
#[derive(Debug, Error)]
pub enum ReportError {
    /// The PDF encoder has no glyph for this character.
    #[error(
        "Character {character:?} (U+{code:04X}) in {text:?} cannot be written to a PDF report",
        code = u32::from(*character)
    )]
    UnsupportedCharacter { character: char, text: String },

    /// A table row does not fit on an empty page.
    #[error("Table row {label:?} is taller than a page")]
    RowTooTall { label: String },

    /// The CSV writer failed.
    #[error("CSV encoding failed: {0}")]
    Csv(#[from] csv::Error),
}
