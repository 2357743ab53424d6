//! Export artifact produced by the report encoders.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Prefix shared by every exported report filename.
pub const REPORT_FILENAME_PREFIX: &str = "cancer_prediction_report_";

/// Downloadable report encodings.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ReportFormat {
    /// Comma-separated tabular text.
    Csv,
    /// Paginated document.
    Pdf,
}

impl ReportFormat {
    pub const fn extension(self) -> &'static str {
        match self {
            Self::Csv => "csv",
            Self::Pdf => "pdf",
        }
    }

    /// `cancer_prediction_report_<epoch-ms>.<ext>`
    pub fn filename(self, epoch_ms: u64) -> String {
        format!("{REPORT_FILENAME_PREFIX}{epoch_ms}.{}", self.extension())
    }
}

impl fmt::Display for ReportFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.extension())
    }
}

impl FromStr for ReportFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "csv" => Ok(Self::Csv),
            "pdf" => Ok(Self::Pdf),
            other => Err(format!("unknown report format '{other}' (expected csv or pdf)")),
        }
    }
}

/// An encoded report ready for a single download.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExportArtifact {
    pub format: ReportFormat,
    pub filename: String,
    pub bytes: Vec<u8>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_filename_convention() {
        assert_eq!(
            ReportFormat::Csv.filename(1_700_000_000_123),
            "cancer_prediction_report_1700000000123.csv"
        );
        assert_eq!(
            ReportFormat::Pdf.filename(42),
            "cancer_prediction_report_42.pdf"
        );
    }

    #[test]
    fn test_from_str() {
        assert_eq!("CSV".parse::<ReportFormat>(), Ok(ReportFormat::Csv));
        assert_eq!("pdf".parse::<ReportFormat>(), Ok(ReportFormat::Pdf));
        assert!("docx".parse::<ReportFormat>().is_err());
    }
}
