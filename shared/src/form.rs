//! Raw pitch form and its normalization into [`PitchInput`]

use serde::{Deserialize, Serialize};

use crate::types::{Handedness, PitchInput};

/// Pitch type whose own metrics double as the fastball baseline
pub const FASTBALL_PITCH_TYPE: &str = "FF";

/// Text fields exactly as a user typed them. Every field is optional on the wire.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PitchForm {
    pub name: String,
    #[serde(rename = "pitchType")]
    pub pitch_type: String,
    pub handedness: String,
    pub release_speed: String,
    pub pfx_x: String,
    pub pfx_z: String,
    pub release_extension: String,
    pub release_spin_rate: String,
    pub spin_axis: String,
    pub release_pos_x: String,
    pub release_pos_z: String,
    pub fb_velo: String,
    pub fb_ivb: String,
    pub fb_hmov: String,
}

impl PitchForm {
    /// Prefill a form from stored metrics, used when editing an existing pitch
    pub fn from_input(name: impl Into<String>, input: &PitchInput) -> Self {
        Self {
            name: name.into(),
            pitch_type: input.pitch_type.clone(),
            handedness: input.handedness.to_string(),
            release_speed: input.release_speed.to_string(),
            pfx_x: input.pfx_x.to_string(),
            pfx_z: input.pfx_z.to_string(),
            release_extension: input.release_extension.to_string(),
            release_spin_rate: input.release_spin_rate.to_string(),
            spin_axis: input.spin_axis.to_string(),
            release_pos_x: input.release_pos_x.to_string(),
            release_pos_z: input.release_pos_z.to_string(),
            fb_velo: input.fb_velo.to_string(),
            fb_ivb: input.fb_ivb.to_string(),
            fb_hmov: input.fb_hmov.to_string(),
        }
    }

    /// Coerce every field into a scoring input. Never fails.
    pub fn normalize(&self) -> PitchInput {
        let pitch_type = self.pitch_type.trim().to_uppercase();
        let handedness = Handedness::from_text(&self.handedness);
        let is_fastball = pitch_type == FASTBALL_PITCH_TYPE;

        let release_speed = parse_metric(&self.release_speed);
        let pfx_x = parse_metric(&self.pfx_x);
        let pfx_z = parse_metric(&self.pfx_z);

        let fastball_default = |value: f64| if is_fastball { value } else { 0.0 };

        PitchInput {
            handedness,
            release_speed,
            pfx_x,
            pfx_z,
            release_extension: parse_metric(&self.release_extension),
            release_spin_rate: parse_metric(&self.release_spin_rate),
            spin_axis: parse_metric(&self.spin_axis),
            release_pos_x: parse_metric(&self.release_pos_x),
            release_pos_z: parse_metric(&self.release_pos_z),
            fb_velo: or_if_zero(parse_metric(&self.fb_velo), fastball_default(release_speed)),
            fb_ivb: or_if_zero(parse_metric(&self.fb_ivb), fastball_default(pfx_z)),
            fb_hmov: or_if_zero(parse_metric(&self.fb_hmov), fastball_default(pfx_x)),
            pitch_type,
        }
    }
}

// A typed 0 counts as empty for the fastball baseline fields
fn or_if_zero(value: f64, default: f64) -> f64 {
    if value == 0.0 { default } else { value }
}

/// Parse a metric typed by a user.
///
/// Takes the longest leading decimal number (`"95.5 mph"` is 95.5). Empty,
/// unparseable and non-finite text all become 0.
pub fn parse_metric(text: &str) -> f64 {
    let text = text.trim();
    let bytes = text.as_bytes();
    let mut end = 0;
    let mut seen_digit = false;
    let mut seen_dot = false;
    let mut seen_exp = false;

    if matches!(bytes.first(), Some(b'+' | b'-')) {
        end = 1;
    }

    while end < bytes.len() {
        match bytes[end] {
            b'0'..=b'9' => seen_digit = true,
            b'.' if !seen_dot && !seen_exp => seen_dot = true,
            b'e' | b'E' if seen_digit && !seen_exp => {
                // Only consume the exponent if digits follow it
                let mut look = end + 1;
                if matches!(bytes.get(look), Some(b'+' | b'-')) {
                    look += 1;
                }
                if !matches!(bytes.get(look), Some(b'0'..=b'9')) {
                    break;
                }
                seen_exp = true;
                end = look;
            }
            _ => break,
        }
        end += 1;
    }

    if !seen_digit {
        return 0.0;
    }

    text[..end]
        .parse::<f64>()
        .ok()
        .filter(|value| value.is_finite())
        .unwrap_or(0.0)
}
