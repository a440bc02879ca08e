//! Remote scoring endpoint configuration

use url::Url;

use crate::errors::{SharedError, SharedResult};

/// Hosted Stuff+ model
pub const DEFAULT_SCORING_URL: &str = "https://stuff-plus-app.onrender.com";

/// Environment variable overriding the scoring base URL
pub const SCORING_URL_ENV: &str = "STUFF_PLUS_API_URL";

pub const PREDICT_PATH: &str = "predict";
pub const UPLOAD_SCREENSHOT_PATH: &str = "upload_screenshot";

/// Base URL of the remote scoring API plus the derived endpoint URLs
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScoringEndpoint {
    base: Url,
}

impl ScoringEndpoint {
    /// Parse a base URL. Only http and https are accepted.
    pub fn parse(base: &str) -> SharedResult<Self> {
        let invalid = || SharedError::InvalidConfig {
            field: "scoring_url".to_string(),
            value: base.to_string(),
        };

        let mut url = Url::parse(base.trim()).map_err(|_| invalid())?;
        if !matches!(url.scheme(), "http" | "https") || url.cannot_be_a_base() {
            return Err(invalid());
        }

        // Url::join replaces the last segment unless the path ends in '/'
        if !url.path().ends_with('/') {
            let path = format!("{}/", url.path());
            url.set_path(&path);
        }

        Ok(Self { base: url })
    }

    pub fn base(&self) -> &Url {
        &self.base
    }

    pub fn predict_url(&self) -> String {
        self.join(PREDICT_PATH)
    }

    pub fn upload_screenshot_url(&self) -> String {
        self.join(UPLOAD_SCREENSHOT_PATH)
    }

    fn join(&self, path: &str) -> String {
        format!("{}{}", self.base, path)
    }
}

impl Default for ScoringEndpoint {
    fn default() -> Self {
        Self::parse(DEFAULT_SCORING_URL).expect("default scoring URL is valid")
    }
}

impl std::fmt::Display for ScoringEndpoint {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.base)
    }
}
