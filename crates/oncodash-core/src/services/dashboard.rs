//! Dashboard session state.
//!
//! Holds what the presentation layer shows around the prediction service:
//! the current prediction, the history table, the busy flag, the last error
//! and the sidebar/menu toggles. History is always re-read from the service
//! after a mutation; the session never merges rows itself.

use std::path::PathBuf;
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

use thiserror::Error;
use tracing::{debug, info, warn};

use crate::domain::{CurrentPrediction, HistoryEntry, PatientRecord, ReportFormat};
use crate::ports::{
    DownloadSink, PredictionPortError, PredictionServicePort, ReportEncodeError, ReportEncoder,
};

use super::dropdown::Dropdown;

/// Message shown when clearing history fails.
pub const CLEAR_HISTORY_ERROR: &str = "Failed to clear history";

/// Errors from dashboard actions.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DashboardError {
    /// A submission is already in flight.
    #[error("A prediction is already in progress")]
    Busy,

    /// The remote service failed; the user-facing text is in `Dashboard::error`.
    #[error(transparent)]
    Service(#[from] PredictionPortError),

    /// Export was requested before any prediction succeeded.
    #[error("No prediction to export")]
    NoPrediction,

    #[error(transparent)]
    Export(#[from] ReportEncodeError),

    /// The encoded artifact could not be delivered.
    #[error("{0}")]
    Delivery(String),
}

/// Clears the busy flag when the submission finishes or is cancelled.
struct BusyGuard {
    flag: Arc<AtomicBool>,
}

impl BusyGuard {
    fn acquire(flag: &Arc<AtomicBool>) -> Option<Self> {
        flag.compare_exchange(false, true, Ordering::AcqRel, Ordering::Acquire)
            .ok()
            .map(|_| Self {
                flag: Arc::clone(flag),
            })
    }
}

impl Drop for BusyGuard {
    fn drop(&mut self) {
        self.flag.store(false, Ordering::Release);
    }
}

/// One user's dashboard session.
pub struct Dashboard {
    service: Arc<dyn PredictionServicePort>,
    current: Option<CurrentPrediction>,
    history: Vec<HistoryEntry>,
    loading: Arc<AtomicBool>,
    error: Option<String>,
    sidebar_open: bool,
    export_menu: Dropdown,
    theme_menu: Dropdown,
}

impl Dashboard {
    pub fn new(service: Arc<dyn PredictionServicePort>) -> Self {
        Self {
            service,
            current: None,
            history: Vec::new(),
            loading: Arc::new(AtomicBool::new(false)),
            error: None,
            sidebar_open: true,
            export_menu: Dropdown::new(),
            theme_menu: Dropdown::new(),
        }
    }

    pub fn current(&self) -> Option<&CurrentPrediction> {
        self.current.as_ref()
    }

    pub fn history(&self) -> &[HistoryEntry] {
        &self.history
    }

    pub fn is_loading(&self) -> bool {
        self.loading.load(Ordering::Acquire)
    }

    /// The last user-visible error, if any.
    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    pub const fn sidebar_open(&self) -> bool {
        self.sidebar_open
    }

    pub fn toggle_sidebar(&mut self) -> bool {
        self.sidebar_open = !self.sidebar_open;
        self.sidebar_open
    }

    pub const fn export_menu(&self) -> Dropdown {
        self.export_menu
    }

    pub fn export_menu_mut(&mut self) -> &mut Dropdown {
        &mut self.export_menu
    }

    pub const fn theme_menu(&self) -> Dropdown {
        self.theme_menu
    }

    pub fn theme_menu_mut(&mut self) -> &mut Dropdown {
        &mut self.theme_menu
    }

    /// Submit a patient for prediction.
    ///
    /// On success the prediction becomes current and history is refetched.
    /// On failure the previous prediction stays on screen and the service's
    /// message is stored in [`Dashboard::error`].
    pub async fn submit(
        &mut self,
        patient: PatientRecord,
    ) -> Result<&CurrentPrediction, DashboardError> {
        let Some(_busy) = BusyGuard::acquire(&self.loading) else {
            return Err(DashboardError::Busy);
        };
        self.error = None;

        let service = Arc::clone(&self.service);
        match service.predict(&patient).await {
            Ok(result) => {
                info!(
                    risk = %result.risk_level,
                    chance = result.cancer_chance,
                    "Prediction received"
                );
                self.refresh_history().await;
                Ok(self.current.insert(CurrentPrediction { patient, result }))
            }
            Err(e) => {
                warn!(error = %e, "Prediction failed");
                self.error = Some(e.user_message());
                Err(DashboardError::Service(e))
            }
        }
    }

    /// Replace the local history with the service's.
    ///
    /// A failed fetch is logged and leaves the current list in place.
    pub async fn refresh_history(&mut self) {
        match self.service.history().await {
            Ok(entries) => {
                debug!(count = entries.len(), "History refreshed");
                self.history = entries;
            }
            Err(e) => warn!(error = %e, "Error fetching history"),
        }
    }

    /// Clear the service-side history after confirmation.
    ///
    /// Returns `Ok(false)` when `confirm` declines (nothing changes). When
    /// accepted, the delete is attempted once and the list is then re-read
    /// from the service whether or not the delete succeeded.
    pub async fn clear_history<F>(&mut self, confirm: F) -> Result<bool, DashboardError>
    where
        F: FnOnce() -> bool,
    {
        if !confirm() {
            debug!("Clear history declined");
            return Ok(false);
        }

        let outcome = self.service.clear_history().await;
        if let Err(ref e) = outcome {
            warn!(error = %e, "Error clearing history");
            self.error = Some(CLEAR_HISTORY_ERROR.to_string());
        }
        self.refresh_history().await;

        outcome.map(|()| true).map_err(DashboardError::from)
    }

    /// Export the current prediction and hand it to `sink`.
    ///
    /// Closes the export menu whether or not the export succeeds.
    pub fn export(
        &mut self,
        format: ReportFormat,
        encoder: &dyn ReportEncoder,
        localize: &dyn Fn(&str) -> String,
        sink: &dyn DownloadSink,
    ) -> Result<PathBuf, DashboardError> {
        let format = self.export_menu.select(format);
        let current = self.current.as_ref().ok_or(DashboardError::NoPrediction)?;

        let artifact = encoder.encode(format, current, localize)?;
        let path = sink
            .deliver(&artifact)
            .map_err(|e| DashboardError::Delivery(e.to_string()))?;

        info!(path = %path.display(), %format, "Report exported");
        Ok(path)
    }
}

impl std::fmt::Debug for Dashboard {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Dashboard")
            .field("current", &self.current)
            .field("history", &self.history.len())
            .field("loading", &self.is_loading())
            .field("error", &self.error)
            .field("sidebar_open", &self.sidebar_open)
            .finish_non_exhaustive()
    }
}
