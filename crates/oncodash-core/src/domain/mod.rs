//! Domain types.
//!
//! Pure data with no infrastructure dependencies. Everything here is
//! serializable so adapters can move it across the wire unchanged.

mod export;
mod history;
mod patient;
mod prediction;
mod theme;

pub use export::{ExportArtifact, REPORT_FILENAME_PREFIX, ReportFormat};
pub use history::HistoryEntry;
pub use patient::{PatientInput, PatientRecord, ValidationError};
pub use prediction::{CurrentPrediction, PatientSummary, PredictionResult, RiskLevel};
pub use theme::{ResolvedTheme, SystemColorSignal, ThemePreference};

/// Format a decimal the way the prediction service echoes it back:
/// whole numbers keep one trailing decimal (`165.0`), others print as-is.
pub(crate) fn format_decimal(value: f64) -> String {
    if value.fract() == 0.0 {
        format!("{value:.1}")
    } else {
        format!("{value}")
    }
}

/// Round to one decimal place, halves away from zero, as written in decimal.
///
/// Works on the shortest decimal representation of `value`, so `37.25`
/// becomes `37.3` even though its binary value is slightly below the tie.
pub(crate) fn format_one_decimal(value: f64) -> String {
    if !value.is_finite() {
        return format!("{value:.1}");
    }

    let repr = format!("{}", value.abs());
    let (whole, fraction) = repr.split_once('.').unwrap_or((repr.as_str(), ""));
    let mut digits: Vec<u8> = whole.bytes().collect();
    digits.push(fraction.bytes().next().unwrap_or(b'0'));

    if fraction.bytes().nth(1).is_some_and(|d| d >= b'5') {
        let mut carry = true;
        for digit in digits.iter_mut().rev() {
            if *digit == b'9' {
                *digit = b'0';
            } else {
                *digit += 1;
                carry = false;
                break;
            }
        }
        if carry {
            digits.insert(0, b'1');
        }
    }

    let tenth = digits.pop().map_or('0', char::from);
    let whole: String = digits.into_iter().map(char::from).collect();
    let sign = if value < 0.0 && (whole != "0" || tenth != '0') { "-" } else { "" };
    format!("{sign}{whole}.{tenth}")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_decimal() {
        assert_eq!(format_decimal(165.0), "165.0");
        assert_eq!(format_decimal(165.5), "165.5");
        assert_eq!(format_decimal(70.25), "70.25");
    }

    #[test]
    fn test_format_one_decimal_rounds_halves_up() {
        assert_eq!(format_one_decimal(37.25), "37.3");
        assert_eq!(format_one_decimal(160.25), "160.3");
        assert_eq!(format_one_decimal(0.05), "0.1");
        assert_eq!(format_one_decimal(9.95), "10.0");
        assert_eq!(format_one_decimal(99.96), "100.0");
        assert_eq!(format_one_decimal(37.24), "37.2");
        assert_eq!(format_one_decimal(72.4), "72.4");
        assert_eq!(format_one_decimal(65.0), "65.0");
        assert_eq!(format_one_decimal(0.0), "0.0");
    }

    #[test]
    fn test_format_one_decimal_negative() {
        assert_eq!(format_one_decimal(-2.25), "-2.3");
        assert_eq!(format_one_decimal(-0.04), "0.0");
    }
}
