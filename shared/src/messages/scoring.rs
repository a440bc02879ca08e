//! Remote scoring API response bodies

use serde::{Deserialize, Serialize};

/// Body of a successful `POST /predict`. Either score may be missing.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct PredictResponse {
    #[serde(rename = "stuffPlus", default)]
    pub stuff_plus: Option<f64>,
    #[serde(default)]
    pub percentile: Option<f64>,
}

/// Body of `POST /upload_screenshot`: a score, or an error message
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ScreenshotResponse {
    #[serde(rename = "stuffPlus", default)]
    pub stuff_plus: Option<f64>,
    #[serde(default)]
    pub percentile: Option<f64>,
    #[serde(default)]
    pub error: Option<String>,
}

/// Score read off a screenshot. Absent values are shown as "N/A".
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct ScreenshotScore {
    #[serde(rename = "stuffPlus")]
    pub stuff_plus: Option<f64>,
    pub percentile: Option<f64>,
}

impl std::fmt::Display for ScreenshotScore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self.stuff_plus {
            Some(stuff_plus) => writeln!(f, "Stuff+: {stuff_plus}")?,
            None => writeln!(f, "Stuff+: N/A")?,
        }
        match self.percentile {
            Some(percentile) => write!(f, "Percentile: {percentile}"),
            None => write!(f, "Percentile: N/A"),
        }
    }
}
