//! Experience gate: caps an externally computed fit score by how much of
//! the required experience the candidate actually has.
//!
//! | percentage  | cap |
//! |-------------|-----|
//! | < 0.50      | 45  |
//! | 0.50 – 0.69 | 55  |
//! | 0.70 – 0.89 | 70  |
//! | ≥ 0.90      | 100 (no cap) |

use serde::{Deserialize, Serialize};

use crate::errors::ScoringError;

pub const MAX_FIT_SCORE: u32 = 100;

/// `(upper percentage bound, exclusive; cap)`, lowest bracket first.
const CAP_BRACKETS: [(f64, u32); 3] = [(0.50, 45), (0.70, 55), (0.90, 70)];

/// Percentages are compared at this resolution so that weighted tenure such
/// as `3.0 * 0.7` lands on its bracket edge instead of just below it.
const PERCENTAGE_RESOLUTION: f64 = 1e9;

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GateOutcome {
    pub capped_fit_score: u32,
    pub percentage: f64,
    pub cap: u32,
}

/// Rejects requirements that state no (or nonsensical) years.
pub fn check_required_years(required_years: f64) -> Result<(), ScoringError> {
    if required_years > 0.0 && required_years.is_finite() {
        Ok(())
    } else {
        Err(ScoringError::InvalidRequirement { required_years })
    }
}

/// Cap for a percentage-of-requirement. First matching (lowest) bracket wins.
pub fn cap_for_percentage(percentage: f64) -> u32 {
    CAP_BRACKETS
        .iter()
        .find(|(upper, _)| percentage < *upper)
        .map(|(_, cap)| *cap)
        .unwrap_or(MAX_FIT_SCORE)
}

fn snap_percentage(percentage: f64) -> f64 {
    (percentage * PERCENTAGE_RESOLUTION).round() / PERCENTAGE_RESOLUTION
}

/// The cap only ever lowers the raw score.
pub fn apply_cap(
    relevant_years: f64,
    required_years: f64,
    raw_fit_score: u32,
) -> Result<GateOutcome, ScoringError> {
    check_required_years(required_years)?;

    let percentage = snap_percentage(relevant_years / required_years);
    let cap = cap_for_percentage(percentage);

    Ok(GateOutcome {
        capped_fit_score: raw_fit_score.min(cap),
        percentage,
        cap,
    })
}
