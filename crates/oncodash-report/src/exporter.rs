//! Report exporter: one clock reading, one artifact.

use std::sync::Arc;

use oncodash_core::{
    CurrentPrediction, ExportArtifact, PatientRecord, PredictionResult, ReportEncodeError,
    ReportEncoder, ReportFormat,
};
use tracing::{debug, warn};

use crate::clock::{Clock, SystemClock};
use crate::content::{ReportContent, TIMESTAMP_FORMAT};
use crate::error::ReportResult;
use crate::filename::allocate_epoch_ms;
use crate::{pdf, tabular};

/// Builds CSV and PDF reports for a prediction.
#[derive(Clone)]
pub struct ReportExporter {
    clock: Arc<dyn Clock>,
}

impl Default for ReportExporter {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Debug for ReportExporter {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ReportExporter").finish_non_exhaustive()
    }
}

impl ReportExporter {
    /// Exporter stamped with local system time.
    pub fn new() -> Self {
        Self::with_clock(Arc::new(SystemClock))
    }

    pub fn with_clock(clock: Arc<dyn Clock>) -> Self {
        Self { clock }
    }

    /// CSV report with a UTF-8 byte order mark.
    pub fn to_tabular_text(
        &self,
        result: &PredictionResult,
        patient: &PatientRecord,
        localize: &dyn Fn(&str) -> String,
    ) -> ReportResult<ExportArtifact> {
        self.export(ReportFormat::Csv, result, patient, localize)
    }

    /// A4 PDF report, continued onto further pages when content overflows.
    pub fn to_paginated_document(
        &self,
        result: &PredictionResult,
        patient: &PatientRecord,
        localize: &dyn Fn(&str) -> String,
    ) -> ReportResult<ExportArtifact> {
        self.export(ReportFormat::Pdf, result, patient, localize)
    }

    /// Encode a report in `format`.
    pub fn export(
        &self,
        format: ReportFormat,
        result: &PredictionResult,
        patient: &PatientRecord,
        localize: &dyn Fn(&str) -> String,
    ) -> ReportResult<ExportArtifact> {
        let now = self.clock.now();
        let content = ReportContent::build(
            result,
            patient,
            localize,
            now.format(TIMESTAMP_FORMAT).to_string(),
        );

        let bytes = match format {
            ReportFormat::Csv => tabular::encode(&content)?,
            ReportFormat::Pdf => pdf::encode(&content, &now)?,
        };

        let epoch_ms = allocate_epoch_ms(u64::try_from(now.timestamp_millis()).unwrap_or(0));
        let filename = format.filename(epoch_ms);
        debug!(%filename, size = bytes.len(), "Report encoded");

        Ok(ExportArtifact {
            format,
            filename,
            bytes,
        })
    }
}

impl ReportEncoder for ReportExporter {
    fn encode(
        &self,
        format: ReportFormat,
        current: &CurrentPrediction,
        localize: &dyn Fn(&str) -> String,
    ) -> Result<ExportArtifact, ReportEncodeError> {
        self.export(format, &current.result, &current.patient, localize)
            .map_err(|e| {
                warn!(error = %e, %format, "Report export failed");
                ReportEncodeError(e.to_string())
            })
    }
}
