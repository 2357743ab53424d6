//! Port trait implementation for `PredictionClient`.

use async_trait::async_trait;
use oncodash_core::{
    HistoryEntry, PatientRecord, PredictionPortError, PredictionPortResult, PredictionResult,
    PredictionServicePort, ServiceHealth,
};
use tracing::warn;

use crate::client::PredictionClient;
use crate::error::ApiError;
use crate::http::HttpBackend;

// ============================================================================
// Error Mapping
// ============================================================================

/// Convert internal `ApiError` to core `PredictionPortError`.
fn map_error(err: ApiError) -> PredictionPortError {
    warn!(error = %err, "Prediction service call failed");
    match err {
        ApiError::Status { status, detail, .. } => PredictionPortError::Rejected {
            status,
            detail: detail.unwrap_or_default(),
        },
        ApiError::InvalidResponse { message } => PredictionPortError::InvalidResponse { message },
        ApiError::ClientBuild(message) => PredictionPortError::Configuration { message },
        ApiError::Network(e) if e.is_decode() => PredictionPortError::InvalidResponse {
            message: e.to_string(),
        },
        ApiError::Network(e) => PredictionPortError::Network {
            message: e.to_string(),
        },
        ApiError::InvalidUrl(e) => PredictionPortError::Configuration {
            message: e.to_string(),
        },
        ApiError::JsonParse(e) => PredictionPortError::InvalidResponse {
            message: e.to_string(),
        },
    }
}

// ============================================================================
// Port Implementation
// ============================================================================

#[async_trait]
impl<B: HttpBackend + Send + Sync> PredictionServicePort for PredictionClient<B> {
    async fn predict(&self, patient: &PatientRecord) -> PredictionPortResult<PredictionResult> {
        PredictionClient::predict(self, patient)
            .await
            .map_err(map_error)
    }

    async fn history(&self) -> PredictionPortResult<Vec<HistoryEntry>> {
        PredictionClient::history(self).await.map_err(map_error)
    }

    async fn clear_history(&self) -> PredictionPortResult<()> {
        PredictionClient::clear_history(self).await.map_err(map_error)
    }

    async fn health(&self) -> PredictionPortResult<ServiceHealth> {
        PredictionClient::health(self).await.map_err(map_error)
    }
}
