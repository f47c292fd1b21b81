//! HTTP client for the external analysis service.

use anyhow::{Context, Result};
use async_trait::async_trait;
use reqwest::Client;
use std::time::Duration;
use thiserror::Error;
use tracing::{debug, warn};

use super::models::{AnalyzeEnvelope, AnalyzeRequest, ApiErrorBody, StrategyPayload};

const ANALYZE_PATH: &str = "/analyze-shorts";

/// Errors that can occur when requesting an analysis.
#[derive(Debug, Error)]
pub enum AnalysisError {
    #[error("Error connecting to API: {0}")]
    Connection(String),

    #[error("Analysis request timed out")]
    Timeout,

    #[error("Error: {message}")]
    Api { status: u16, message: String },

    #[error("Invalid response: {0}")]
    InvalidResponse(String),
}

/// Trait for the service that turns a prompt into a marketing strategy.
#[cfg_attr(feature = "mock", mockall::automock)]
#[async_trait]
pub trait AnalysisService: Send + Sync {
    /// Base URL requests are sent to.
    fn base_url(&self) -> &str;

    /// Runs one analysis. A single request/response exchange, never retried.
    async fn analyze(&self, request: &AnalyzeRequest) -> Result<StrategyPayload, AnalysisError>;
}

/// Analysis service reached over HTTP.
pub struct HttpAnalysisClient {
    client: Client,
    base_url: String,
    timeout: Duration,
}

impl HttpAnalysisClient {
    /// Create a new analysis client.
    ///
    /// # Arguments
    /// * `base_url` - Base URL of the analysis service (e.g., "https://trends.example.com")
    /// * `timeout_sec` - Upper bound on the wait for a single analysis
    pub fn new(base_url: impl Into<String>, timeout_sec: u64) -> Result<Self> {
        let timeout = Duration::from_secs(timeout_sec);
        let client = Client::builder()
            .timeout(timeout)
            .build()
            .context("Failed to create HTTP client")?;

        let base_url = base_url.into().trim_end_matches('/').to_string();

        Ok(Self {
            client,
            base_url,
            timeout,
        })
    }

    pub fn timeout(&self) -> Duration {
        self.timeout
    }
}

#[async_trait]
impl AnalysisService for HttpAnalysisClient {
    fn base_url(&self) -> &str {
        &self.base_url
    }

    async fn analyze(&self, request: &AnalyzeRequest) -> Result<StrategyPayload, AnalysisError> {
        let url = format!("{}{}", self.base_url, ANALYZE_PATH);

        debug!(
            content_type = ?request.content_type,
            region_code = %request.region_code,
            "Sending analysis request"
        );

        let response = self
            .client
            .post(&url)
            .json(request)
            .send()
            .await
            .map_err(|e| {
                if e.is_timeout() {
                    AnalysisError::Timeout
                } else {
                    AnalysisError::Connection(e.to_string())
                }
            })?;

        let status = response.status();
        if status != reqwest::StatusCode::OK {
            let body = response.text().await.unwrap_or_default();
            let message = parse_error_message(&body);
            warn!(status = status.as_u16(), %message, "Analysis service returned an error");
            return Err(AnalysisError::Api {
                status: status.as_u16(),
                message,
            });
        }

        let envelope: AnalyzeEnvelope = response.json().await.map_err(|e| {
            if e.is_timeout() {
                AnalysisError::Timeout
            } else {
                AnalysisError::InvalidResponse(format!("Failed to parse analysis response: {}", e))
            }
        })?;

        debug!(
            analyzed_videos = envelope.data.marketing_strategy.analyzed_videos().len(),
            "Received analysis response"
        );

        Ok(envelope.data.marketing_strategy)
    }
}

/// Pulls `message` out of an error body, falling back to "Unknown error".
fn parse_error_message(body: &str) -> String {
    serde_json::from_str::<ApiErrorBody>(body)
        .ok()
        .and_then(|b| b.message)
        .unwrap_or_else(|| "Unknown error".to_string())
}
