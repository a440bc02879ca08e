//! Core types used throughout the Stuff+ system

use chrono::Utc;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::sync::OnceLock;
use std::sync::atomic::{AtomicI64, Ordering};

/// Global service ID - set once at startup, only used to tag log lines
static SERVICE_ID: OnceLock<ServiceId> = OnceLock::new();

/// Identifier for the binary a log line came from
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ServiceId {
    /// HTTP/WebSocket server hosting the pitch store
    WebServer,
    /// Command line scorer
    Cli,
    /// Embedded use (tests, other hosts) where no binary initialized the id
    Library,
}

impl ServiceId {
    /// Initialize the global service ID for the webserver
    pub fn init_webserver() -> &'static ServiceId {
        SERVICE_ID.get_or_init(|| ServiceId::WebServer)
    }

    /// Initialize the global service ID for the CLI
    pub fn init_cli() -> &'static ServiceId {
        SERVICE_ID.get_or_init(|| ServiceId::Cli)
    }

    /// Get the global service ID, `Library` if no binary initialized it
    pub fn current() -> &'static ServiceId {
        SERVICE_ID.get().unwrap_or(&ServiceId::Library)
    }
}

impl fmt::Display for ServiceId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ServiceId::WebServer => write!(f, "webserver"),
            ServiceId::Cli => write!(f, "cli"),
            ServiceId::Library => write!(f, "library"),
        }
    }
}

/// Pitcher throwing hand
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum Handedness {
    L,
    #[default]
    R,
}

impl Handedness {
    /// Anything other than an explicit "L" is treated as a right-hander
    pub fn from_text(text: &str) -> Self {
        if text.trim().eq_ignore_ascii_case("L") {
            Handedness::L
        } else {
            Handedness::R
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Handedness::L => "L",
            Handedness::R => "R",
        }
    }
}

impl fmt::Display for Handedness {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Normalized pitch metrics, the body of a `/predict` request.
///
/// Field names follow the remote schema: `pitchType` in camel case, metrics in
/// snake case. Missing numbers deserialize as 0.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct PitchInput {
    #[serde(rename = "pitchType")]
    pub pitch_type: String,
    pub handedness: Handedness,
    #[serde(default)]
    pub release_speed: f64,
    #[serde(default)]
    pub pfx_x: f64,
    #[serde(default)]
    pub pfx_z: f64,
    #[serde(default)]
    pub release_extension: f64,
    #[serde(default)]
    pub release_spin_rate: f64,
    #[serde(default)]
    pub spin_axis: f64,
    #[serde(default)]
    pub release_pos_x: f64,
    #[serde(default)]
    pub release_pos_z: f64,
    #[serde(default)]
    pub fb_velo: f64,
    #[serde(default)]
    pub fb_ivb: f64,
    #[serde(default)]
    pub fb_hmov: f64,
}

/// Resolved score for one pitch
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct StuffPlusResult {
    #[serde(rename = "stuffPlus")]
    pub stuff_plus: f64,
    pub percentile: f64,
}

/// Caller-assigned pitch identifier
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PitchId(pub String);

impl PitchId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for PitchId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for PitchId {
    fn from(id: &str) -> Self {
        Self(id.to_string())
    }
}

/// Mints pitch ids from the creation time in milliseconds.
///
/// Ids are strictly increasing per generator: a second id in the same
/// millisecond is bumped past the previous one.
#[derive(Debug, Default)]
pub struct PitchIdGenerator {
    last: AtomicI64,
}

impl PitchIdGenerator {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn next_id(&self) -> PitchId {
        let now = Utc::now().timestamp_millis();
        let previous = match self
            .last
            .fetch_update(Ordering::SeqCst, Ordering::SeqCst, |last| Some(now.max(last + 1)))
        {
            Ok(previous) | Err(previous) => previous,
        };
        PitchId(now.max(previous + 1).to_string())
    }
}

/// A scored pitch as held by the pitch store
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Pitch {
    pub id: PitchId,
    pub name: String,
    #[serde(flatten)]
    pub input: PitchInput,
    #[serde(rename = "stuffPlus")]
    pub stuff_plus: f64,
    pub percentile: f64,
}

impl Pitch {
    /// Attach an id, label and resolved score to normalized metrics
    pub fn new(id: PitchId, name: impl Into<String>, input: PitchInput, result: StuffPlusResult) -> Self {
        Self {
            id,
            name: name.into(),
            input,
            stuff_plus: result.stuff_plus,
            percentile: result.percentile,
        }
    }

    pub fn result(&self) -> StuffPlusResult {
        StuffPlusResult {
            stuff_plus: self.stuff_plus,
            percentile: self.percentile,
        }
    }
}

impl fmt::Display for Pitch {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = if self.name.is_empty() { self.input.pitch_type.as_str() } else { self.name.as_str() };
        writeln!(f, "{} ({}, {}HP)", label, self.input.pitch_type, self.input.handedness)?;
        writeln!(f, "  Velo: {:.1} mph", self.input.release_speed)?;
        writeln!(f, "  IVB: {:.1} in", self.input.pfx_z)?;
        writeln!(f, "  HMOV: {:.1} in", self.input.pfx_x)?;
        writeln!(f, "  Spin: {:.0} rpm", self.input.release_spin_rate)?;
        writeln!(f, "  Extension: {:.2} ft", self.input.release_extension)?;
        writeln!(f, "  Stuff+: {:.1}", self.stuff_plus)?;
        write!(f, "  Percentile: {}", self.percentile)
    }
}

/// Reference pitches shipped with the app
pub fn sample_pitches() -> Vec<PitchInput> {
    vec![
        PitchInput {
            pitch_type: "FF".to_string(),
            handedness: Handedness::R,
            release_speed: 96.0,
            pfx_x: 8.0,
            pfx_z: 18.0,
            release_extension: 6.0,
            release_spin_rate: 2400.0,
            spin_axis: 180.0,
            release_pos_x: 1.5,
            release_pos_z: 5.5,
            fb_velo: 96.0,
            fb_ivb: 18.0,
            fb_hmov: -7.0,
        },
        PitchInput {
            pitch_type: "SL".to_string(),
            handedness: Handedness::R,
            release_speed: 85.0,
            pfx_x: -4.0,
            pfx_z: 5.0,
            release_extension: 5.8,
            release_spin_rate: 2600.0,
            spin_axis: 90.0,
            release_pos_x: 1.4,
            release_pos_z: 5.3,
            fb_velo: 85.0,
            fb_ivb: 5.0,
            fb_hmov: -14.0,
        },
        PitchInput {
            pitch_type: "CH".to_string(),
            handedness: Handedness::L,
            release_speed: 82.0,
            pfx_x: 10.0,
            pfx_z: 9.0,
            release_extension: 6.1,
            release_spin_rate: 1800.0,
            spin_axis: 210.0,
            release_pos_x: 1.6,
            release_pos_z: 5.7,
            fb_velo: 82.0,
            fb_ivb: 9.0,
            fb_hmov: 12.0,
        },
    ]
}
