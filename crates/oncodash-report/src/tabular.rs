//! CSV encoding of a report.

use csv::{Terminator, WriterBuilder};

use crate::content::ReportContent;
use crate::error::ReportResult;

/// UTF-8 byte order mark so spreadsheet apps detect the encoding.
pub const UTF8_BOM: [u8; 3] = [0xEF, 0xBB, 0xBF];

pub(crate) fn encode(content: &ReportContent) -> ReportResult<Vec<u8>> {
    let mut writer = WriterBuilder::new()
        .flexible(true)
        .terminator(Terminator::Any(b'\n'))
        .from_writer(UTF8_BOM.to_vec());

    writer.write_record([&content.title])?;
    writer.write_record([&content.generated_on, &content.timestamp])?;

    writer.write_record([&content.patient_heading])?;
    for (label, value) in &content.patient_rows {
        writer.write_record([label, value])?;
    }

    writer.write_record([&content.results_heading])?;
    for (label, value) in &content.result_rows {
        writer.write_record([label, value])?;
    }

    writer.write_record([&content.disclaimer])?;

    writer
        .into_inner()
        .map_err(|e| csv::Error::from(e.into_error()).into())
}
