//! Form input and its validated counterpart.
//!
//! [`RawMeasurement`] mirrors what the form holds while the user is still
//! editing: slider values and an unparsed age string. [`validate`] turns it
//! into a [`Measurement`], the only input [`crate::calculator::compute`]
//! accepts.

use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::inputs::IntoBmiDecimal;
use crate::types::{Gender, InvalidReason, MeasurementField, ValidationError};

/// Range and step of a form slider.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SliderRange {
    pub min: Decimal,
    pub max: Decimal,
    pub step: Decimal,
}

impl SliderRange {
    pub fn contains(&self, value: Decimal) -> bool {
        value >= self.min && value <= self.max
    }
}

/// Height slider in centimeters.
pub const HEIGHT_SLIDER: SliderRange = SliderRange {
    min: dec!(100),
    max: dec!(220),
    step: dec!(1),
};

/// Weight slider in kilograms.
pub const WEIGHT_SLIDER: SliderRange = SliderRange {
    min: dec!(30),
    max: dec!(200),
    step: dec!(1),
};

pub const DEFAULT_HEIGHT_CM: Decimal = dec!(170);
pub const DEFAULT_WEIGHT_KG: Decimal = dec!(65);

/// Unvalidated form state.
///
/// `None` in a numeric field means the last value supplied for it could not
/// be read as a number at all.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawMeasurement {
    pub gender: Gender,
    pub height_cm: Option<Decimal>,
    pub weight_kg: Option<Decimal>,
    pub age: String,
}

impl Default for RawMeasurement {
    fn default() -> Self {
        Self {
            gender: Gender::default(),
            height_cm: Some(DEFAULT_HEIGHT_CM),
            weight_kg: Some(DEFAULT_WEIGHT_KG),
            age: String::new(),
        }
    }
}

impl RawMeasurement {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn gender(mut self, gender: Gender) -> Self {
        self.gender = gender;
        self
    }

    pub fn height(mut self, height_cm: impl IntoBmiDecimal) -> Self {
        self.height_cm = height_cm.into_bmi_decimal().ok();
        self
    }

    pub fn weight(mut self, weight_kg: impl IntoBmiDecimal) -> Self {
        self.weight_kg = weight_kg.into_bmi_decimal().ok();
        self
    }

    pub fn age(mut self, age: impl Into<String>) -> Self {
        self.age = age.into();
        self
    }

    pub fn validate(&self) -> Result<Measurement, ValidationError> {
        validate(self)
    }
}

/// Validated height, weight and age.
///
/// Fields are private so every `Measurement` in existence has passed
/// [`validate`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Measurement {
    gender: Gender,
    height_cm: Decimal,
    weight_kg: Decimal,
    age_years: u32,
}

impl Measurement {
    /// Builds a measurement from already-typed values, applying the same
    /// positivity rules as [`validate`].
    pub fn try_new(
        height_cm: impl IntoBmiDecimal,
        weight_kg: impl IntoBmiDecimal,
        age_years: u32,
    ) -> Result<Self, ValidationError> {
        let height_cm = positive(MeasurementField::Height, height_cm.into_bmi_decimal().ok())?;
        let weight_kg = positive(MeasurementField::Weight, weight_kg.into_bmi_decimal().ok())?;
        if age_years == 0 {
            return Err(ValidationError::invalid(MeasurementField::Age, InvalidReason::NotPositive));
        }
        Ok(Self {
            gender: Gender::default(),
            height_cm,
            weight_kg,
            age_years,
        })
    }

    pub fn with_gender(mut self, gender: Gender) -> Self {
        self.gender = gender;
        self
    }

    pub fn gender(&self) -> Gender {
        self.gender
    }

    pub fn height_cm(&self) -> Decimal {
        self.height_cm
    }

    pub fn weight_kg(&self) -> Decimal {
        self.weight_kg
    }

    pub fn age_years(&self) -> u32 {
        self.age_years
    }

    /// True when both values lie inside the form's slider ranges.
    pub fn within_slider_ranges(&self) -> bool {
        HEIGHT_SLIDER.contains(self.height_cm) && WEIGHT_SLIDER.contains(self.weight_kg)
    }
}

/// Checks raw form input and produces a typed [`Measurement`].
///
/// An empty or whitespace-only age is reported as [`ValidationError::MissingAge`]
/// before anything else is looked at. Any other unusable field is
/// [`ValidationError::InvalidMeasurement`].
pub fn validate(raw: &RawMeasurement) -> Result<Measurement, ValidationError> {
    let age_text = raw.age.trim();
    if age_text.is_empty() {
        debug!("validation failed: age not entered");
        return Err(ValidationError::MissingAge);
    }

    let height_cm = positive(MeasurementField::Height, raw.height_cm)?;
    let weight_kg = positive(MeasurementField::Weight, raw.weight_kg)?;
    let age_years = parse_age(age_text)?;

    Ok(Measurement {
        gender: raw.gender,
        height_cm,
        weight_kg,
        age_years,
    })
}

fn positive(field: MeasurementField, value: Option<Decimal>) -> Result<Decimal, ValidationError> {
    match value {
        None => {
            debug!(%field, "validation failed: not numeric");
            Err(ValidationError::invalid(field, InvalidReason::NotNumeric))
        }
        Some(v) if v <= Decimal::ZERO => {
            debug!(%field, value = %v, "validation failed: not positive");
            Err(ValidationError::invalid(field, InvalidReason::NotPositive))
        }
        Some(v) => Ok(v),
    }
}

fn parse_age(text: &str) -> Result<u32, ValidationError> {
    let invalid = |reason| ValidationError::invalid(MeasurementField::Age, reason);
    match text.parse::<i64>() {
        Ok(age) if age <= 0 => Err(invalid(InvalidReason::NotPositive)),
        Ok(age) => u32::try_from(age).map_err(|_| invalid(InvalidReason::NotNumeric)),
        Err(_) => Err(invalid(InvalidReason::NotNumeric)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn raw(height: f64, weight: f64, age: &str) -> RawMeasurement {
        RawMeasurement::new().height(height).weight(weight).age(age)
    }

    #[test]
    fn test_defaults_match_form() {
        let form = RawMeasurement::default();
        assert_eq!(form.gender, Gender::Male);
        assert_eq!(form.height_cm, Some(dec!(170)));
        assert_eq!(form.weight_kg, Some(dec!(65)));
        assert!(form.age.is_empty());
    }

    #[test]
    fn test_missing_age_wins_over_bad_measurements() {
        assert_eq!(validate(&raw(170.0, 65.0, "")), Err(ValidationError::MissingAge));
        assert_eq!(validate(&raw(170.0, 65.0, "   ")), Err(ValidationError::MissingAge));
        assert_eq!(validate(&raw(0.0, f64::NAN, "\t")), Err(ValidationError::MissingAge));
    }

    #[test]
    fn test_zero_weight_is_invalid() {
        let err = validate(&raw(170.0, 0.0, "30")).unwrap_err();
        assert_eq!(
            err,
            ValidationError::invalid(MeasurementField::Weight, InvalidReason::NotPositive)
        );
    }

    #[test]
    fn test_nan_height_is_invalid() {
        let err = validate(&raw(f64::NAN, 65.0, "30")).unwrap_err();
        assert_eq!(
            err,
            ValidationError::invalid(MeasurementField::Height, InvalidReason::NotNumeric)
        );
    }

    #[test]
    fn test_non_numeric_text_is_invalid() {
        let form = RawMeasurement::new().weight("heavy").age("30");
        assert!(matches!(
            validate(&form),
            Err(ValidationError::InvalidMeasurement { field: MeasurementField::Weight, .. })
        ));
    }

    #[test]
    fn test_age_rules() {
        assert!(matches!(
            validate(&raw(170.0, 65.0, "abc")),
            Err(ValidationError::InvalidMeasurement { field: MeasurementField::Age, reason: InvalidReason::NotNumeric })
        ));
        assert!(matches!(
            validate(&raw(170.0, 65.0, "0")),
            Err(ValidationError::InvalidMeasurement { field: MeasurementField::Age, reason: InvalidReason::NotPositive })
        ));
        assert!(matches!(
            validate(&raw(170.0, 65.0, "-4")),
            Err(ValidationError::InvalidMeasurement { field: MeasurementField::Age, reason: InvalidReason::NotPositive })
        ));
        assert_eq!(validate(&raw(170.0, 65.0, " 42 ")).unwrap().age_years(), 42);
    }

    #[test]
    fn test_validate_carries_values_through() {
        let form = raw(182.0, 80.5, "29").gender(Gender::Female);
        let m = form.validate().unwrap();
        assert_eq!(m.gender(), Gender::Female);
        assert_eq!(m.height_cm(), dec!(182));
        assert_eq!(m.weight_kg(), dec!(80.5));
        assert!(m.within_slider_ranges());
    }

    #[test]
    fn test_out_of_slider_range_is_still_valid() {
        let m = validate(&raw(250.0, 20.0, "30")).unwrap();
        assert!(!m.within_slider_ranges());
    }

    #[test]
    fn test_try_new() {
        assert!(Measurement::try_new(170, 65, 30).is_ok());
        assert!(Measurement::try_new(170, 65, 0).is_err());
        assert!(Measurement::try_new(-1, 65, 30).is_err());
    }
}
