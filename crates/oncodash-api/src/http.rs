//! HTTP backend abstraction for the prediction service.
//!
//! The client is generic over [`HttpBackend`] so tests can swap in canned
//! responses. The production backend is a thin reqwest wrapper that makes
//! exactly one attempt per call.

use async_trait::async_trait;
use serde_json::Value;
use tracing::debug;
use url::Url;

use crate::config::ApiClientConfig;
use crate::error::{ApiError, ApiResult};
use crate::parsing::parse_detail;

// ============================================================================
// HTTP Backend Trait
// ============================================================================

/// HTTP verbs used by the service.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Method {
    Get,
    Post,
    Delete,
}

impl Method {
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Get => "GET",
            Self::Post => "POST",
            Self::Delete => "DELETE",
        }
    }
}

/// Sends one JSON request and returns the decoded JSON response.
///
/// Non-2xx statuses become [`ApiError::Status`] with the parsed `detail`.
/// An empty success body decodes as `Value::Null`.
#[async_trait]
pub trait HttpBackend: Send + Sync {
    async fn send_json(&self, method: Method, url: &Url, body: Option<Value>) -> ApiResult<Value>;
}

// ============================================================================
// Reqwest Backend
// ============================================================================

/// Production HTTP backend using reqwest.
pub struct ReqwestBackend {
    client: reqwest::Client,
}

impl ReqwestBackend {
    pub fn new(config: &ApiClientConfig) -> ApiResult<Self> {
        let client = reqwest::Client::builder()
            .timeout(config.timeout)
            .user_agent(config.user_agent.clone())
            .build()
            .map_err(|e| ApiError::ClientBuild(e.to_string()))?;
        Ok(Self { client })
    }
}

#[async_trait]
impl HttpBackend for ReqwestBackend {
    async fn send_json(&self, method: Method, url: &Url, body: Option<Value>) -> ApiResult<Value> {
        let mut request = match method {
            Method::Get => self.client.get(url.as_str()),
            Method::Post => self.client.post(url.as_str()),
            Method::Delete => self.client.delete(url.as_str()),
        };
        if let Some(ref body) = body {
            request = request.json(body);
        }

        let response = request.send().await?;
        let status = response.status();
        let text = response.text().await?;
        debug!(
            method = method.as_str(),
            %url,
            status = status.as_u16(),
            "Prediction service call"
        );

        if !status.is_success() {
            return Err(ApiError::Status {
                status: status.as_u16(),
                url: url.to_string(),
                detail: parse_detail(&text),
            });
        }

        if text.trim().is_empty() {
            return Ok(Value::Null);
        }
        Ok(serde_json::from_str(&text)?)
    }
}

// ============================================================================
// Fake Backend for Testing
// ============================================================================
