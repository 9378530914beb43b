//! Prelude module for the BMI library
//!
//! Re-exports the types and functions most callers need.
//!
//! # Usage
//!
//! ```rust
//! use bmi::prelude::*;
//!
//! let form = RawMeasurement::new().height(170).weight(65).age("25");
//! let result = calculate(&form).unwrap();
//! assert_eq!(result.category(), BmiCategory::Normal);
//! ```

pub use crate::calculator::{calculate, compute, compute_with};
pub use crate::color::{Color, ColorBand, color_band_for};
pub use crate::config::BmiConfig;
pub use crate::inputs::IntoBmiDecimal;
pub use crate::measurement::{Measurement, RawMeasurement, validate};
pub use crate::session::FormSession;
pub use crate::traits::CalculateBmi;
pub use crate::types::{
    BmiCategory, BmiResult, ConfigError, Gender, InvalidReason, MeasurementField, ValidationError,
};
