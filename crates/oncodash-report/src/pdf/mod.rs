//! A4 PDF encoder using the base-14 Helvetica family.

mod encoding;
mod layout;
mod metrics;
mod writer;

use chrono::{DateTime, FixedOffset};
use tracing::debug;

use crate::content::ReportContent;
use crate::error::ReportResult;

/// Encode `content` as a PDF document.
///
/// Fails with [`ReportError::UnsupportedCharacter`] before producing any
/// bytes if a label cannot be represented in WinAnsi, and with
/// [`ReportError::RowTooTall`] if a table row cannot fit on any page.
///
/// [`ReportError::UnsupportedCharacter`]: crate::ReportError::UnsupportedCharacter
/// [`ReportError::RowTooTall`]: crate::ReportError::RowTooTall
pub(crate) fn encode(
    content: &ReportContent,
    created: &DateTime<FixedOffset>,
) -> ReportResult<Vec<u8>> {
    let laid_out = layout::layout(content)?;
    let title = encoding::encode(&content.title)?;
    debug!(
        pages = laid_out.pages.len(),
        ops = laid_out.pages.iter().map(Vec::len).sum::<usize>(),
        blocks = ?laid_out.blocks,
        "Report laid out"
    );

    let streams: Vec<String> = laid_out
        .pages
        .iter()
        .map(|ops| writer::content_stream(ops))
        .collect();
    Ok(writer::document(&streams, &title, created))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ReportError;
    use chrono::TimeZone;

    fn content() -> ReportContent {
        ReportContent {
            title: "Rapport de Prédiction du Cancer".into(),
            generated_on: "Généré le".into(),
            timestamp: "2024-05-01 10:00:00".into(),
            patient_heading: "Informations du Patient".into(),
            patient_rows: vec![("Âge".into(), "50".into())],
            results_heading: "Résultats de la Prédiction".into(),
            result_rows: vec![("Probabilité (%)".into(), "37.3%".into())],
            disclaimer: "Avertissement: Ce n'est pas un outil médical.".into(),
        }
    }

    fn created() -> DateTime<FixedOffset> {
        FixedOffset::east_opt(3600)
            .unwrap()
            .with_ymd_and_hms(2024, 5, 1, 10, 0, 0)
            .unwrap()
    }

    #[test]
    fn test_document_structure() {
        let bytes = encode(&content(), &created()).unwrap();
        assert!(bytes.starts_with(b"%PDF-"));
        assert!(bytes.ends_with(b"%%EOF\n"));

        let text = String::from_utf8_lossy(&bytes);
        assert!(text.contains("0.118 0.533 0.898 rg"));
        assert!(text.contains("/BaseFont /Helvetica-Bold"));
        assert!(text.contains("/Encoding /WinAnsiEncoding"));
        assert!(text.contains("(37.3%) Tj"));
        // "Â" is 0xC2 in WinAnsi.
        assert!(text.contains("(\\302ge) Tj"));
        assert!(text.contains("/CreationDate (D:20240501100000+01'00')"));
        assert!(text.contains("/Count 1 >>"));
    }

    #[test]
    fn test_long_disclaimer_adds_pages() {
        let mut content = content();
        content.disclaimer = "word ".repeat(3000);
        let bytes = encode(&content, &created()).unwrap();
        let text = String::from_utf8_lossy(&bytes);

        let count: usize = text
            .split("/Count ")
            .nth(1)
            .and_then(|tail| tail.split_whitespace().next())
            .and_then(|n| n.parse().ok())
            .unwrap();
        assert!(count > 1);
        assert_eq!(text.matches("/Type /Page /Parent").count(), count);
        // Every text baseline lies within the page's vertical extent.
        for line in text.lines().filter(|l| l.contains(" Td ")) {
            let y: f64 = line
                .split(" Td ")
                .next()
                .and_then(|head| head.split_whitespace().last())
                .and_then(|n| n.parse().ok())
                .unwrap();
            assert!(y > 0.0 && y < 841.89, "text at y={y}pt is off the page");
        }
    }

    #[test]
    fn test_cjk_label_fails_atomically() {
        let mut content = content();
        content.result_rows[0].0 = "概率".into();
        let err = encode(&content, &created()).unwrap_err();
        assert!(matches!(
            err,
            ReportError::UnsupportedCharacter { character: '概', .. }
        ));
    }
}
