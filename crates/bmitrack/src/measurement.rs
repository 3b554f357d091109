//! Measurement record and input validation types.
//!
//! [`Measurement`] is what the store persists and hands back;
//! [`Reading`] is a weight/height pair that has already passed input
//! validation. `Reading::parse` is the only way to build one, so anything
//! downstream of it can rely on finite, positive values.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::bmi;
use crate::config::InputLimits;
use crate::error::{Error, Result};

/// A persisted BMI measurement.
///
/// Records are immutable once created: there is no update or delete
/// operation anywhere in the crate, and the id assigned by the store is
/// never reused.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Measurement {
    /// Unique identifier assigned by the store on insert.
    pub id: i64,

    /// Weight in pounds, as entered.
    pub weight_lb: f64,

    /// Height in inches, as entered.
    pub height_in: f64,

    /// The BMI value, rounded to one decimal place.
    ///
    /// Always derived from `weight_lb` and `height_in` by the store at
    /// insert time.
    pub bmi: f64,

    /// The date the measurement was recorded, from the store's clock.
    pub recorded_on: NaiveDate,
}

impl Measurement {
    /// Render this record as a single history line.
    #[must_use]
    pub fn history_line(&self) -> String {
        format!(
            "{}: {} (W:{}, H:{})",
            self.recorded_on, self.bmi, self.weight_lb, self.height_in
        )
    }
}

/// A validated weight/height input pair.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Reading {
    weight_lb: f64,
    height_in: f64,
}

impl Reading {
    /// Validate raw text-field input into a `Reading`.
    ///
    /// Both fields must be present (non-empty after trimming), parse as
    /// numbers, be strictly positive and finite, and fall within the
    /// configured plausibility limits.
    ///
    /// # Errors
    ///
    /// Returns a validation error naming the offending field. Validation
    /// failures never touch the store.
    pub fn parse(weight: &str, height: &str, limits: &InputLimits) -> Result<Self> {
        let weight_lb = parse_field("weight", weight, limits.max_weight_lb)?;
        let height_in = parse_field("height", height, limits.max_height_in)?;
        Ok(Self {
            weight_lb,
            height_in,
        })
    }

    /// Build a reading from already-numeric values, applying the same
    /// positivity and limit checks as [`Reading::parse`].
    ///
    /// # Errors
    ///
    /// Returns a validation error naming the offending field.
    pub fn new(weight_lb: f64, height_in: f64, limits: &InputLimits) -> Result<Self> {
        check_value("weight", weight_lb, limits.max_weight_lb)?;
        check_value("height", height_in, limits.max_height_in)?;
        Ok(Self {
            weight_lb,
            height_in,
        })
    }

    /// Weight in pounds.
    #[must_use]
    pub fn weight_lb(&self) -> f64 {
        self.weight_lb
    }

    /// Height in inches.
    #[must_use]
    pub fn height_in(&self) -> f64 {
        self.height_in
    }

    /// The BMI for this reading, rounded to one decimal place.
    #[must_use]
    pub fn bmi(&self) -> f64 {
        bmi::bmi(self.weight_lb, self.height_in)
    }
}

fn parse_field(field: &'static str, text: &str, max: f64) -> Result<f64> {
    let trimmed = text.trim();
    if trimmed.is_empty() {
        return Err(Error::MissingField { field });
    }
    let value: f64 = trimmed.parse().map_err(|_| Error::InvalidNumber {
        field,
        value: text.to_string(),
    })?;
    if !value.is_finite() {
        return Err(Error::InvalidNumber {
            field,
            value: text.to_string(),
        });
    }
    check_value(field, value, max)?;
    Ok(value)
}

fn check_value(field: &'static str, value: f64, max: f64) -> Result<()> {
    if !value.is_finite() || value <= 0.0 {
        return Err(Error::NonPositive { field, value });
    }
    if value > max {
        return Err(Error::LimitExceeded { field, value, max });
    }
    Ok(())
}
