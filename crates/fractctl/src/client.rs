//! HTTP client for the analysis daemon.

use reqwest::multipart::{Form, Part};
use std::time::Duration;

use fracture_common::api::{AnalysisResponse, HealthResponse};
use fracture_common::chat::{ChatRequest, ChatResponse};
use fracture_common::error::FractureError;
use fracture_common::state::Session;
use fracture_common::types::AnalysisRecord;

/// Default daemon address.
pub const DEFAULT_API_URL: &str = "http://127.0.0.1:8000";

/// One analysis attempt is bounded by this; on expiry the caller falls
/// back to the local classifier. Single attempt, no retry. Only the
/// analysis request carries this bound; the other endpoints are quick
/// and stay unbounded.
pub const ANALYZE_TIMEOUT_SECS: u64 = 15;

/// An upload read into memory, ready to send.
#[derive(Debug, Clone)]
pub struct Upload {
    pub name: String,
    pub mime: &'static str,
    pub bytes: Vec<u8>,
}

pub struct DaemonClient {
    http: reqwest::Client,
    base: String,
    analyze_timeout: Duration,
}

impl DaemonClient {
    pub fn new(base: Option<String>) -> Result<Self, FractureError> {
        let http = reqwest::Client::builder()
            .build()
            .map_err(|e| FractureError::Internal(e.to_string()))?;
        Ok(Self {
            http,
            base: base.unwrap_or_else(|| DEFAULT_API_URL.to_string()),
            analyze_timeout: Duration::from_secs(ANALYZE_TIMEOUT_SECS),
        })
    }

    /// Override the analysis timeout.
    pub fn with_analyze_timeout(mut self, timeout: Duration) -> Self {
        self.analyze_timeout = timeout;
        self
    }

    fn map_send_error(&self, e: reqwest::Error) -> FractureError {
        if e.is_timeout() {
            FractureError::Timeout(self.analyze_timeout.as_secs())
        } else {
            FractureError::Remote(e.to_string())
        }
    }

    /// `POST /api/analysis` with the multipart upload form.
    pub async fn analyze(
        &self,
        upload: &Upload,
        session: &Session,
    ) -> Result<AnalysisResponse, FractureError> {
        let part = Part::bytes(upload.bytes.clone())
            .file_name(upload.name.clone())
            .mime_str(upload.mime)
            .map_err(|e| FractureError::Internal(e.to_string()))?;

        let form = Form::new()
            .part("image", part)
            .text("image_name", upload.name.clone())
            .text("user_name", session.name.clone())
            .text("user_type", session.user_type.to_string());

        let response = self
            .http
            .post(format!("{}/api/analysis", self.base))
            .multipart(form)
            .timeout(self.analyze_timeout)
            .send()
            .await
            .map_err(|e| self.map_send_error(e))?;

        if !response.status().is_success() {
            return Err(FractureError::Remote(format!(
                "Analysis request failed: {}",
                response.status()
            )));
        }

        response
            .json::<AnalysisResponse>()
            .await
            .map_err(|e| FractureError::Remote(e.to_string()))
    }

    /// `GET /api/analysis` without filters: the recent page.
    pub async fn history(&self) -> Result<Vec<AnalysisRecord>, FractureError> {
        let response = self
            .http
            .get(format!("{}/api/analysis", self.base))
            .send()
            .await
            .map_err(|e| self.map_send_error(e))?;

        if !response.status().is_success() {
            return Err(FractureError::Remote(format!(
                "History request failed: {}",
                response.status()
            )));
        }

        response
            .json::<Vec<AnalysisRecord>>()
            .await
            .map_err(|e| FractureError::Remote(e.to_string()))
    }

    /// `POST /api/chatbot/`.
    pub async fn chat(&self, message: &str) -> Result<String, FractureError> {
        let response = self
            .http
            .post(format!("{}/api/chatbot/", self.base))
            .json(&ChatRequest {
                message: message.to_string(),
            })
            .send()
            .await
            .map_err(|e| self.map_send_error(e))?;

        if !response.status().is_success() {
            return Err(FractureError::Remote(format!(
                "Chat request failed: {}",
                response.status()
            )));
        }

        let body = response
            .json::<ChatResponse>()
            .await
            .map_err(|e| FractureError::Remote(e.to_string()))?;
        Ok(body.response)
    }

    /// `GET /health`.
    pub async fn health(&self) -> Result<HealthResponse, FractureError> {
        let response = self
            .http
            .get(format!("{}/health", self.base))
            .send()
            .await
            .map_err(|e| self.map_send_error(e))?;

        if !response.status().is_success() {
            return Err(FractureError::Remote(format!(
                "Health request failed: {}",
                response.status()
            )));
        }

        response
            .json::<HealthResponse>()
            .await
            .map_err(|e| FractureError::Remote(e.to_string()))
    }
}
