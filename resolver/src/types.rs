//! Resolver-specific types

use std::path::Path;

use shared::{Handedness, StuffPlusResult};

use crate::error::ResolverResult;

/// Which branch produced a score.
///
/// Callers that only want the number use [`Resolution::into_result`]; the shape
/// is the same for both branches.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Resolution {
    /// Remote model answered, possibly completed with local values
    Remote(StuffPlusResult),
    /// Remote call failed; scored entirely by the local formula
    Fallback(StuffPlusResult),
}

impl Resolution {
    pub fn result(&self) -> &StuffPlusResult {
        match self {
            Resolution::Remote(result) | Resolution::Fallback(result) => result,
        }
    }

    pub fn into_result(self) -> StuffPlusResult {
        *self.result()
    }

    pub fn is_fallback(&self) -> bool {
        matches!(self, Resolution::Fallback(_))
    }

    pub fn source(&self) -> &'static str {
        match self {
            Resolution::Remote(_) => "remote",
            Resolution::Fallback(_) => "local",
        }
    }
}

/// A screenshot plus the fastball baseline the remote model needs alongside it
#[derive(Debug, Clone, PartialEq)]
pub struct ScreenshotUpload {
    pub file_name: String,
    pub content_type: String,
    pub bytes: Vec<u8>,
    pub pitch_type: String,
    pub handedness: Handedness,
    pub fb_velo: String,
    pub fb_ivb: String,
    pub fb_hmov: String,
}

impl ScreenshotUpload {
    /// Create an upload for a four-seamer from a right-hander, the form defaults
    pub fn new(file_name: impl Into<String>, bytes: Vec<u8>) -> Self {
        let file_name = file_name.into();
        Self {
            content_type: content_type_for(&file_name).to_string(),
            file_name,
            bytes,
            pitch_type: "FF".to_string(),
            handedness: Handedness::R,
            fb_velo: String::new(),
            fb_ivb: String::new(),
            fb_hmov: String::new(),
        }
    }

    /// Read an image from disk
    pub async fn from_path(path: impl AsRef<Path>) -> ResolverResult<Self> {
        let path = path.as_ref();
        let bytes = tokio::fs::read(path).await?;
        let file_name = path
            .file_name()
            .and_then(|name| name.to_str())
            .unwrap_or("screenshot.jpg")
            .to_string();
        Ok(Self::new(file_name, bytes))
    }

    pub fn with_pitch(mut self, pitch_type: impl Into<String>, handedness: Handedness) -> Self {
        self.pitch_type = pitch_type.into().trim().to_uppercase();
        self.handedness = handedness;
        self
    }

    pub fn with_fastball(
        mut self,
        fb_velo: impl Into<String>,
        fb_ivb: impl Into<String>,
        fb_hmov: impl Into<String>,
    ) -> Self {
        self.fb_velo = fb_velo.into();
        self.fb_ivb = fb_ivb.into();
        self.fb_hmov = fb_hmov.into();
        self
    }

    pub fn with_content_type(mut self, content_type: impl Into<String>) -> Self {
        self.content_type = content_type.into();
        self
    }
}

/// Form value as sent on the wire; empty fields go out as "0"
pub fn field_or_zero(value: &str) -> String {
    let value = value.trim();
    if value.is_empty() { "0".to_string() } else { value.to_string() }
}

fn content_type_for(file_name: &str) -> &'static str {
    let lower = file_name.to_ascii_lowercase();
    if lower.ends_with(".png") {
        "image/png"
    } else if lower.ends_with(".heic") {
        "image/heic"
    } else {
        "image/jpeg"
    }
}
