//! Screen-state session for the BMI tracker.
//!
//! [`Session`] owns what the single screen owns: the two text inputs, the
//! most recent result, and the cached history list. It borrows the store
//! rather than holding a global handle, and it is the caller of the whole
//! compute flow: validate, compute, append, clear inputs, refresh history.

use serde::Serialize;

use crate::bmi::Classification;
use crate::config::InputLimits;
use crate::error::Result;
use crate::measurement::{Measurement, Reading};
use crate::storage::Store;

/// A computed BMI value with its classification.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct ComputedBmi {
    /// The BMI value, rounded to one decimal place.
    pub value: f64,
    /// The qualitative bucket the value falls in.
    pub classification: Classification,
}

/// The state behind the single screen.
#[derive(Debug)]
pub struct Session<'s> {
    store: &'s Store,
    limits: InputLimits,
    weight_input: String,
    height_input: String,
    last_result: Option<ComputedBmi>,
    history: Vec<Measurement>,
}

impl<'s> Session<'s> {
    /// Create a session over an opened store, loading the existing
    /// history for the first render.
    ///
    /// # Errors
    ///
    /// Returns an error if the initial history read fails.
    pub fn new(store: &'s Store, limits: InputLimits) -> Result<Self> {
        let history = store.history()?;
        Ok(Self {
            store,
            limits,
            weight_input: String::new(),
            height_input: String::new(),
            last_result: None,
            history,
        })
    }

    /// Set the weight input field.
    pub fn set_weight(&mut self, text: impl Into<String>) {
        self.weight_input = text.into();
    }

    /// Set the height input field.
    pub fn set_height(&mut self, text: impl Into<String>) {
        self.height_input = text.into();
    }

    /// Current weight input text.
    #[must_use]
    pub fn weight_input(&self) -> &str {
        &self.weight_input
    }

    /// Current height input text.
    #[must_use]
    pub fn height_input(&self) -> &str {
        &self.height_input
    }

    /// Run one compute cycle: the "Compute BMI" button.
    ///
    /// On success the record is appended, both input fields are cleared
    /// for the next entry, the last result is updated, and the history is
    /// re-read from the store. On a validation failure nothing is written
    /// and the inputs are left untouched so the user can correct them.
    ///
    /// # Errors
    ///
    /// Returns a validation error for bad input, or a storage error if
    /// the append or history refresh fails.
    pub fn compute(&mut self) -> Result<Measurement> {
        let reading = Reading::parse(&self.weight_input, &self.height_input, &self.limits)?;
        let measurement = self.store.append(&reading)?;

        self.last_result = Some(ComputedBmi {
            value: measurement.bmi,
            classification: Classification::from_bmi(measurement.bmi),
        });
        self.weight_input.clear();
        self.height_input.clear();
        self.history = self.store.history()?;

        Ok(measurement)
    }

    /// The most recent computed result, if any compute has succeeded.
    #[must_use]
    pub fn last_result(&self) -> Option<&ComputedBmi> {
        self.last_result.as_ref()
    }

    /// The cached history list, most recent first.
    #[must_use]
    pub fn history(&self) -> &[Measurement] {
        &self.history
    }
}
