//! Conversion of raw predictor output into normalized binding scores

use serde::{Deserialize, Serialize};

/// Upper bound of the IC50 scale used by the NetMHC family (nM)
pub const IC50_CEILING: f64 = 50_000.0;

/// How a method's raw output value becomes the reported score
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ScoreTransform {
    /// `1 - log_50000(ic50)`, clamped to `[0, 1]`
    Ic50,
    /// Tool-native score reported unchanged
    PassThrough,
}

impl ScoreTransform {
    /// Apply the transform; `None` when the raw value is outside its domain
    pub fn apply(self, raw: f64) -> Option<f64> {
        match self {
            ScoreTransform::Ic50 => ic50_to_score(raw),
            ScoreTransform::PassThrough => raw.is_finite().then_some(raw),
        }
    }
}

/// Log-scaled IC50 in `[0, 1]`.
///
/// Anything at or above [`IC50_CEILING`] maps to exactly `0.0` and anything
/// at or below 1 nM to `1.0`. Non-positive and non-finite concentrations have
/// no logarithm and yield `None`.
pub fn ic50_to_score(ic50: f64) -> Option<f64> {
    if !ic50.is_finite() || ic50 <= 0.0 {
        return None;
    }
    if ic50 >= IC50_CEILING {
        return Some(0.0);
    }
    Some((1.0 - ic50.ln() / IC50_CEILING.ln()).clamp(0.0, 1.0))
}
