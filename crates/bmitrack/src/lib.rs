//! `bmitrack` - Body Mass Index calculator with a persistent history
//!
//! This library computes BMI from weight and height, persists every
//! computation to a local `SQLite` store, and reads the history back most
//! recent first. The `bmit` binary is a thin terminal front-end over it.

#![warn(missing_docs)]
#![warn(missing_debug_implementations)]
#![deny(unsafe_code)]

pub mod bmi;
pub mod cli;
pub mod config;
pub mod error;
pub mod logging;
pub mod measurement;
pub mod session;
pub mod storage;

pub use bmi::Classification;
pub use config::Config;
pub use error::{Error, Result};
pub use logging::init_logging;
pub use measurement::{Measurement, Reading};
pub use session::Session;
pub use storage::Store;
