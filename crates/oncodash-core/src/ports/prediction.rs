//! Remote prediction service port.
//!
//! The prediction model runs elsewhere; the core only knows it as this
//! trait. Every method is attempted exactly once per user action.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::domain::{HistoryEntry, PatientRecord, PredictionResult};

/// Message shown when the service fails without a usable detail string.
pub const GENERIC_PREDICTION_ERROR: &str = "An error occurred while making the prediction";

/// Result alias for prediction port operations.
pub type PredictionPortResult<T> = Result<T, PredictionPortError>;

/// Errors surfaced by a prediction service implementation.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PredictionPortError {
    /// The service answered with a non-success status.
    #[error("Prediction service rejected the request ({status}): {detail}")]
    Rejected {
        status: u16,
        /// Error detail from the response body, shown verbatim to the user.
        detail: String,
    },

    /// The service could not be reached.
    #[error("Prediction service unreachable: {message}")]
    Network { message: String },

    /// The service answered with something we could not decode.
    #[error("Invalid response from prediction service: {message}")]
    InvalidResponse { message: String },

    /// The client is misconfigured (bad base URL, etc.).
    #[error("Prediction client misconfigured: {message}")]
    Configuration { message: String },
}

impl PredictionPortError {
    /// Text to put in front of the user.
    pub fn user_message(&self) -> String {
        match self {
            Self::Rejected { detail, .. } if !detail.trim().is_empty() => detail.clone(),
            _ => GENERIC_PREDICTION_ERROR.to_string(),
        }
    }
}

/// Health report of the prediction service.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ServiceHealth {
    pub status: String,
    #[serde(default)]
    pub model_loaded: bool,
    #[serde(default)]
    pub scaler_loaded: bool,
}

impl ServiceHealth {
    pub fn is_healthy(&self) -> bool {
        self.status == "healthy" && self.model_loaded && self.scaler_loaded
    }
}

/// Port for the remote prediction service.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait PredictionServicePort: Send + Sync {
    /// Submit a patient record for risk prediction.
    async fn predict(&self, patient: &PatientRecord) -> PredictionPortResult<PredictionResult>;

    /// Fetch the server-side history, newest first.
    async fn history(&self) -> PredictionPortResult<Vec<HistoryEntry>>;

    /// Delete the server-side history.
    async fn clear_history(&self) -> PredictionPortResult<()>;

    /// Probe service health.
    async fn health(&self) -> PredictionPortResult<ServiceHealth>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_user_message_uses_detail_verbatim() {
        let err = PredictionPortError::Rejected {
            status: 422,
            detail: "age: Input should be greater than or equal to 20".to_string(),
        };
        assert_eq!(
            err.user_message(),
            "age: Input should be greater than or equal to 20"
        );
    }

    #[test]
    fn test_user_message_falls_back_for_blank_detail() {
        let err = PredictionPortError::Rejected {
            status: 500,
            detail: "  ".to_string(),
        };
        assert_eq!(err.user_message(), GENERIC_PREDICTION_ERROR);
    }

    #[test]
    fn test_user_message_falls_back_for_network() {
        let err = PredictionPortError::Network {
            message: "connection refused".to_string(),
        };
        assert_eq!(err.user_message(), GENERIC_PREDICTION_ERROR);
    }

    #[test]
    fn test_health_requires_model_and_scaler() {
        let health = ServiceHealth {
            status: "healthy".to_string(),
            model_loaded: true,
            scaler_loaded: false,
        };
        assert!(!health.is_healthy());
    }
}
