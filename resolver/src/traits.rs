//! Service trait definitions for dependency injection
//!
//! The remote scoring API sits behind [`ScoringClient`] so the resolver can be
//! driven down either branch in tests.

use async_trait::async_trait;

use shared::{PitchInput, PredictResponse, ScreenshotScore};

use crate::error::ResolverResult;
use crate::types::ScreenshotUpload;

/// Remote Stuff+ API
#[mockall::automock]
#[async_trait]
pub trait ScoringClient: Send + Sync {
    /// `POST /predict` with the full pitch input
    async fn predict(&self, input: &PitchInput) -> ResolverResult<PredictResponse>;

    /// `POST /upload_screenshot` as multipart form data
    async fn upload_screenshot(&self, upload: ScreenshotUpload) -> ResolverResult<ScreenshotScore>;

    /// Human readable description of where scores come from
    fn describe(&self) -> String;
}
