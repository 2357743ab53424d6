//! Report exporters for oncodash predictions.
//!
//! [`ReportExporter`] turns the current prediction and the patient record
//! that produced it into a downloadable [`ExportArtifact`]: a CSV sheet via
//! [`ReportExporter::to_tabular_text`] or an A4 PDF via
//! [`ReportExporter::to_paginated_document`]. Labels come from a caller
//! supplied localization function so the same encoders serve every locale.
//!
//! [`ExportArtifact`]: oncodash_core::ExportArtifact

#![deny(unsafe_code)]

mod clock;
mod content;
mod error;
mod exporter;
mod filename;
mod pdf;
mod tabular;

pub use clock::{Clock, FixedClock, SystemClock};
pub use content::{ReportContent, TIMESTAMP_FORMAT};
pub use error::{ReportError, ReportResult};
pub use exporter::ReportExporter;
pub use filename::allocate_epoch_ms;
