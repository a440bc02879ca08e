//! Local Stuff+ model and percentile buckets
//!
//! The formula is a linear offset model centered at 100 (league average). It is
//! only a placeholder for the remote model, but its coefficients and centers are
//! fixed: scores already shown to users were produced with them.

use crate::types::{PitchInput, StuffPlusResult};

pub const LEAGUE_AVERAGE: f64 = 100.0;

pub const CENTER_RELEASE_SPEED: f64 = 90.0;
pub const CENTER_PFX_Z: f64 = 15.0;
pub const CENTER_PFX_X: f64 = 8.0;
pub const CENTER_SPIN_RATE: f64 = 2200.0;

const VELO_WEIGHT: f64 = 0.25;
const IVB_WEIGHT: f64 = 0.10;
const HMOV_WEIGHT: f64 = 0.05;
const SPIN_WEIGHT: f64 = 0.01;

/// Every percentile the local buckets can produce
pub const PERCENTILE_BUCKETS: [f64; 5] = [5.0, 25.0, 50.0, 75.0, 95.0];

/// The four metrics the local formula reads. `None` falls back to the center value.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct FormulaInputs {
    pub release_speed: Option<f64>,
    pub pfx_z: Option<f64>,
    pub pfx_x: Option<f64>,
    pub release_spin_rate: Option<f64>,
}

impl From<&PitchInput> for FormulaInputs {
    fn from(input: &PitchInput) -> Self {
        Self {
            release_speed: Some(input.release_speed),
            pfx_z: Some(input.pfx_z),
            pfx_x: Some(input.pfx_x),
            release_spin_rate: Some(input.release_spin_rate),
        }
    }
}

impl FormulaInputs {
    pub fn stuff_plus(&self) -> f64 {
        let release_speed = self.release_speed.unwrap_or(CENTER_RELEASE_SPEED);
        let pfx_z = self.pfx_z.unwrap_or(CENTER_PFX_Z);
        let pfx_x = self.pfx_x.unwrap_or(CENTER_PFX_X);
        let spin = self.release_spin_rate.unwrap_or(CENTER_SPIN_RATE);

        LEAGUE_AVERAGE
            + VELO_WEIGHT * (release_speed - CENTER_RELEASE_SPEED)
            + IVB_WEIGHT * (pfx_z - CENTER_PFX_Z)
            + HMOV_WEIGHT * (pfx_x - CENTER_PFX_X)
            + SPIN_WEIGHT * ((spin - CENTER_SPIN_RATE) / 100.0)
    }
}

/// Local Stuff+ for a normalized pitch
pub fn calculate_stuff_plus(input: &PitchInput) -> f64 {
    FormulaInputs::from(input).stuff_plus()
}

/// Map a Stuff+ value onto the five coarse percentile buckets.
///
/// Lower bounds are inclusive: exactly 90 lands in the 50 bucket.
pub fn stuff_plus_to_percentile(stuff_plus: f64) -> f64 {
    if stuff_plus < 80.0 {
        5.0
    } else if stuff_plus < 90.0 {
        25.0
    } else if stuff_plus < 100.0 {
        50.0
    } else if stuff_plus < 110.0 {
        75.0
    } else {
        95.0
    }
}

/// Score entirely locally: formula, then bucket
pub fn local_result(input: &PitchInput) -> StuffPlusResult {
    let stuff_plus = calculate_stuff_plus(input);
    StuffPlusResult {
        stuff_plus,
        percentile: stuff_plus_to_percentile(stuff_plus),
    }
}
