//! HTTP implementation of the remote scoring API

use async_trait::async_trait;
use reqwest::multipart::{Form, Part};

use shared::{PitchInput, PredictResponse, ScoringEndpoint, ScreenshotResponse, ScreenshotScore};

use crate::error::{ResolverError, ResolverResult};
use crate::traits::ScoringClient;
use crate::types::{ScreenshotUpload, field_or_zero};

/// Real scoring client backed by reqwest.
///
/// No request timeout is set; requests rely on the transport defaults.
#[derive(Debug, Clone)]
pub struct RealScoringClient {
    client: reqwest::Client,
    endpoint: ScoringEndpoint,
}

impl RealScoringClient {
    pub fn new(endpoint: ScoringEndpoint) -> Self {
        Self::with_client(reqwest::Client::new(), endpoint)
    }

    pub fn with_client(client: reqwest::Client, endpoint: ScoringEndpoint) -> Self {
        Self { client, endpoint }
    }

    pub fn endpoint(&self) -> &ScoringEndpoint {
        &self.endpoint
    }
}

#[async_trait]
impl ScoringClient for RealScoringClient {
    async fn predict(&self, input: &PitchInput) -> ResolverResult<PredictResponse> {
        let url = self.endpoint.predict_url();

        let response = self
            .client
            .post(&url)
            .header("Content-Type", "application/json")
            .json(input)
            .send()
            .await
            .map_err(|e| ResolverError::NetworkError {
                endpoint: url.clone(),
                message: e.to_string(),
            })?;

        if !response.status().is_success() {
            return Err(ResolverError::HttpStatus {
                endpoint: url,
                status: response.status().as_u16(),
            });
        }

        let body: serde_json::Value = response.json().await.map_err(|e| ResolverError::InvalidResponse {
            endpoint: url.clone(),
            message: format!("Failed to parse response: {e}"),
        })?;

        if !body.is_object() {
            return Err(ResolverError::InvalidResponse {
                endpoint: url,
                message: "expected a JSON object".to_string(),
            });
        }

        serde_json::from_value(body).map_err(|e| ResolverError::InvalidResponse {
            endpoint: url,
            message: e.to_string(),
        })
    }

    async fn upload_screenshot(&self, upload: ScreenshotUpload) -> ResolverResult<ScreenshotScore> {
        let url = self.endpoint.upload_screenshot_url();

        let file = Part::bytes(upload.bytes)
            .file_name(upload.file_name)
            .mime_str(&upload.content_type)
            .map_err(|e| ResolverError::InvalidUpload { message: e.to_string() })?;

        let form = Form::new()
            .part("file", file)
            .text("pitchType", upload.pitch_type)
            .text("handedness", upload.handedness.to_string())
            .text("fb_velo", field_or_zero(&upload.fb_velo))
            .text("fb_ivb", field_or_zero(&upload.fb_ivb))
            .text("fb_hmov", field_or_zero(&upload.fb_hmov));

        let response = self
            .client
            .post(&url)
            .multipart(form)
            .send()
            .await
            .map_err(|e| ResolverError::NetworkError {
                endpoint: url.clone(),
                message: e.to_string(),
            })?;

        let text = response.text().await.map_err(|e| ResolverError::NetworkError {
            endpoint: url.clone(),
            message: e.to_string(),
        })?;

        let body: ScreenshotResponse = serde_json::from_str(&text).map_err(|_| ResolverError::InvalidResponse {
            endpoint: url.clone(),
            message: format!("not JSON: {text}"),
        })?;

        // The body decides, whatever the status: an empty error string is no error
        if let Some(message) = body.error.filter(|message| !message.is_empty()) {
            return Err(ResolverError::RemoteRejected { message });
        }

        Ok(ScreenshotScore {
            stuff_plus: body.stuff_plus,
            percentile: body.percentile,
        })
    }

    fn describe(&self) -> String {
        self.endpoint.to_string()
    }
}

/// Client used when remote scoring is switched off; every call fails so the
/// resolver always takes the local branch
#[derive(Debug, Clone, Copy, Default)]
pub struct OfflineScoringClient;

#[async_trait]
impl ScoringClient for OfflineScoringClient {
    async fn predict(&self, _input: &PitchInput) -> ResolverResult<PredictResponse> {
        Err(ResolverError::Offline)
    }

    async fn upload_screenshot(&self, _upload: ScreenshotUpload) -> ResolverResult<ScreenshotScore> {
        Err(ResolverError::Offline)
    }

    fn describe(&self) -> String {
        "local formula only".to_string()
    }
}
