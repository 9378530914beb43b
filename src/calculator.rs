//! BMI computation and classification.
//!
//! ## Formula
//! `bmi = weight_kg / (height_cm / 100)^2`
//!
//! ## Rounding
//! The raw value is rounded to one decimal place with
//! [`RoundingStrategy::MidpointAwayFromZero`] (22.45 -> 22.5, 22.44 -> 22.4).
//! Arithmetic is done in `Decimal`, so a value that is mathematically on a
//! midpoint is treated as one.
//!
//! ## Classification
//! The category is derived from the **rounded** value, so the number shown to
//! the user and its category can never disagree. A raw 24.96 displays as 25.0
//! and is therefore Overweight, not Normal.

use rust_decimal::{Decimal, RoundingStrategy};
use rust_decimal_macros::dec;
use tracing::debug;

use crate::config::BmiConfig;
use crate::measurement::{Measurement, RawMeasurement, validate};
use crate::traits::CalculateBmi;
use crate::types::{BmiResult, CalculationStep, ValidationError};

/// Decimal places kept in [`BmiResult::value`].
pub const BMI_DECIMAL_PLACES: u32 = 1;

/// Computes BMI with the default thresholds.
pub fn compute(measurement: &Measurement) -> BmiResult {
    compute_with(measurement, &BmiConfig::default())
}

/// Computes BMI, classifying with the thresholds in `config`.
pub fn compute_with(measurement: &Measurement, config: &BmiConfig) -> BmiResult {
    let height_m = measurement.height_cm() / dec!(100);
    // Saturate instead of panicking on absurd inputs; such values classify as Obese.
    let height_sq = height_m.checked_mul(height_m).unwrap_or(Decimal::MAX);
    let raw = measurement
        .weight_kg()
        .checked_div(height_sq)
        .unwrap_or(Decimal::MAX);
    let value = raw.round_dp_with_strategy(BMI_DECIMAL_PLACES, RoundingStrategy::MidpointAwayFromZero);
    let category = config.classify(value);

    debug!(raw = %raw, value = %value, %category, "computed bmi");

    let trace = vec![
        CalculationStep::input("Height (cm)", measurement.height_cm()),
        CalculationStep::input("Weight (kg)", measurement.weight_kg()),
        CalculationStep::convert("Height (m)", height_m),
        CalculationStep::square("Height squared (m2)", height_sq),
        CalculationStep::divide("Raw BMI", raw.round_dp(4)),
        CalculationStep::round("BMI (1 decimal)", value),
        CalculationStep::classify(category),
    ];

    BmiResult::new(value, category).with_trace(trace)
}

/// Validates raw form input, then computes BMI with the default thresholds.
pub fn calculate(raw: &RawMeasurement) -> Result<BmiResult, ValidationError> {
    raw.calculate_bmi(&BmiConfig::default())
}

impl CalculateBmi for Measurement {
    fn calculate_bmi(&self, config: &BmiConfig) -> Result<BmiResult, ValidationError> {
        Ok(compute_with(self, config))
    }
}

impl CalculateBmi for RawMeasurement {
    fn calculate_bmi(&self, config: &BmiConfig) -> Result<BmiResult, ValidationError> {
        let measurement = validate(self)?;
        Ok(compute_with(&measurement, config))
    }
}
