//! Prediction service client.

use oncodash_core::{HistoryEntry, PatientRecord, PredictionResult, ServiceHealth};
use serde::de::DeserializeOwned;
use serde_json::Value;
use tracing::info;
use url::Url;

use crate::config::ApiClientConfig;
use crate::error::{ApiError, ApiResult};
use crate::http::{HttpBackend, Method, ReqwestBackend};

// ============================================================================
// Type Aliases
// ============================================================================

/// Default prediction client using the reqwest HTTP backend.
pub type DefaultPredictionClient = PredictionClient<ReqwestBackend>;

// ============================================================================
// Client
// ============================================================================

/// Client for the prediction service REST API.
///
/// Generic over the HTTP backend for testing; production code uses
/// [`DefaultPredictionClient`].
pub struct PredictionClient<B: HttpBackend> {
    pub(crate) backend: B,
    pub(crate) base_url: Url,
}

impl DefaultPredictionClient {
    /// Create a client for the configured service.
    pub fn new(config: &ApiClientConfig) -> ApiResult<Self> {
        let base_url = parse_base_url(&config.base_url)?;
        let backend = ReqwestBackend::new(config)?;
        info!(base_url = %base_url, "Prediction client ready");
        Ok(Self { backend, base_url })
    }
}

/// Parse the service root, forcing a trailing slash so endpoint paths join
/// under it rather than replacing its last segment.
fn parse_base_url(raw: &str) -> ApiResult<Url> {
    let mut url = Url::parse(raw.trim())?;
    if !matches!(url.scheme(), "http" | "https") {
        return Err(ApiError::ClientBuild(format!(
            "unsupported URL scheme {:?}",
            url.scheme()
        )));
    }
    if !url.path().ends_with('/') {
        let path = format!("{}/", url.path());
        url.set_path(&path);
    }
    Ok(url)
}

impl<B: HttpBackend> PredictionClient<B> {
    /// Create a client with a custom backend.
    #[cfg(test)]
    pub(crate) fn with_backend(base_url: &str, backend: B) -> ApiResult<Self> {
        Ok(Self {
            backend,
            base_url: parse_base_url(base_url)?,
        })
    }

    fn endpoint(&self, path: &str) -> ApiResult<Url> {
        Ok(self.base_url.join(path)?)
    }

    async fn call<T: DeserializeOwned + Send>(
        &self,
        method: Method,
        path: &str,
        body: Option<Value>,
    ) -> ApiResult<T> {
        let url = self.endpoint(path)?;
        let value = self.backend.send_json(method, &url, body).await?;
        Ok(serde_json::from_value(value)?)
    }

    /// `POST /api/predict`
    pub async fn predict(&self, patient: &PatientRecord) -> ApiResult<PredictionResult> {
        let body = serde_json::to_value(patient)?;
        let result: PredictionResult = self.call(Method::Post, "api/predict", Some(body)).await?;

        if !(result.cancer_chance.is_finite() && (0.0..=100.0).contains(&result.cancer_chance)) {
            return Err(ApiError::InvalidResponse {
                message: format!("cancer_chance {} is outside 0-100", result.cancer_chance),
            });
        }
        Ok(result)
    }

    /// `GET /api/history`, newest first.
    pub async fn history(&self) -> ApiResult<Vec<HistoryEntry>> {
        self.call(Method::Get, "api/history", None).await
    }

    /// `DELETE /api/history`. The response body is ignored.
    pub async fn clear_history(&self) -> ApiResult<()> {
        let url = self.endpoint("api/history")?;
        self.backend.send_json(Method::Delete, &url, None).await?;
        Ok(())
    }

    /// `GET /api/health`
    pub async fn health(&self) -> ApiResult<ServiceHealth> {
        self.call(Method::Get, "api/health", None).await
    }
}
