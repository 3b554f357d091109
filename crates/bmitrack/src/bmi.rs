//! The BMI computation engine.
//!
//! Pure functions only: the imperial BMI formula and the four-bucket
//! qualitative classification ladder. Nothing in this module touches the
//! store or the terminal.

use serde::{Deserialize, Serialize};

/// Scale factor converting `lb / in^2` to BMI units.
pub const IMPERIAL_SCALE: f64 = 703.0;

/// Compute the BMI for a weight in pounds and a height in inches.
///
/// The result is rounded to one decimal place (half away from zero), which
/// is the precision every other part of the crate works with: the store
/// persists the rounded value and the classification ladder reads it.
#[must_use]
pub fn bmi(weight_lb: f64, height_in: f64) -> f64 {
    round_tenths((weight_lb / (height_in * height_in)) * IMPERIAL_SCALE)
}

/// Round to one decimal place, half away from zero.
fn round_tenths(value: f64) -> f64 {
    (value * 10.0).round() / 10.0
}

/// Qualitative assessment of a BMI value.
///
/// The buckets partition the whole number line: every finite BMI maps to
/// exactly one classification.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Classification {
    /// BMI below 18.5.
    Underweight,
    /// BMI from 18.5 up to (but not including) 25.
    Healthy,
    /// BMI from 25 up to (but not including) 30.
    Overweight,
    /// BMI of 30 or above.
    Obese,
}

impl Classification {
    /// Classify a BMI value.
    ///
    /// Each boundary value belongs to the bucket it opens: 18.5 is
    /// `Healthy`, 25.0 is `Overweight`, 30.0 is `Obese`.
    #[must_use]
    pub fn from_bmi(bmi: f64) -> Self {
        if bmi < 18.5 {
            Self::Underweight
        } else if bmi < 25.0 {
            Self::Healthy
        } else if bmi < 30.0 {
            Self::Overweight
        } else {
            Self::Obese
        }
    }
}

impl std::fmt::Display for Classification {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Underweight => write!(f, "Underweight"),
            Self::Healthy => write!(f, "Healthy"),
            Self::Overweight => write!(f, "Overweight"),
            Self::Obese => write!(f, "Obese"),
        }
    }
}
