//! Port definitions (trait abstractions) for external systems.
//!
//! Ports define the interfaces that the core domain expects from infrastructure.
//! They contain no implementation details and use only domain types.
//!
//! # Design Rules
//!
//! - No `reqwest` or filesystem types in any signature
//! - Host-environment signals arrive through subscriptions that return a
//!   detach handle
//! - In-memory implementations live next to the trait so tests and CLI
//!   contexts without a real backend can use them

pub mod color_scheme;
pub mod download_sink;
pub mod prediction;
pub mod preference_store;
pub mod report_encoder;
pub mod theme_observer;

pub use color_scheme::{ColorSchemeSource, ManualColorScheme, SignalCallback, Subscription};
pub use download_sink::{DownloadSink, SinkError};
pub use prediction::{
    GENERIC_PREDICTION_ERROR, PredictionPortError, PredictionPortResult, PredictionServicePort,
    ServiceHealth,
};
pub use preference_store::{MemoryPreferenceStore, PreferenceStore, PreferenceStoreError};
pub use report_encoder::{ReportEncodeError, ReportEncoder};
pub use theme_observer::ThemeObserver;

#[cfg(test)]
pub use prediction::MockPredictionServicePort;
