//! Report encoder port.
//!
//! Implemented by the report crate; the dashboard only needs to hand it the
//! current prediction and a localization function.

use thiserror::Error;

use crate::domain::{CurrentPrediction, ExportArtifact, ReportFormat};

/// Encoding failed; no artifact was produced.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("Report export failed: {0}")]
pub struct ReportEncodeError(pub String);

/// Turns a prediction into a downloadable artifact.
pub trait ReportEncoder: Send + Sync {
    fn encode(
        &self,
        format: ReportFormat,
        current: &CurrentPrediction,
        localize: &dyn Fn(&str) -> String,
    ) -> Result<ExportArtifact, ReportEncodeError>;
}
