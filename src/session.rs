//! Form state for one interactive session.
//!
//! The session owns the raw measurement being edited and the last result.
//! Input setters never touch the result; only [`FormSession::calculate`]
//! replaces it, and only when validation succeeds.

use tracing::debug;

use crate::color::{ColorBand, color_band_for};
use crate::config::BmiConfig;
use crate::inputs::IntoBmiDecimal;
use crate::measurement::RawMeasurement;
use crate::traits::CalculateBmi;
use crate::types::{BmiResult, Gender, ValidationError};

#[derive(Debug, Clone, Default)]
pub struct FormSession {
    config: BmiConfig,
    input: RawMeasurement,
    result: Option<BmiResult>,
}

impl FormSession {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_config(config: BmiConfig) -> Self {
        Self {
            config,
            ..Default::default()
        }
    }

    pub fn set_gender(&mut self, gender: Gender) {
        self.input.gender = gender;
    }

    pub fn set_height(&mut self, height_cm: impl IntoBmiDecimal) {
        self.input.height_cm = height_cm.into_bmi_decimal().ok();
    }

    pub fn set_weight(&mut self, weight_kg: impl IntoBmiDecimal) {
        self.input.weight_kg = weight_kg.into_bmi_decimal().ok();
    }

    pub fn set_age(&mut self, age: impl Into<String>) {
        self.input.age = age.into();
    }

    pub fn input(&self) -> &RawMeasurement {
        &self.input
    }

    pub fn result(&self) -> Option<&BmiResult> {
        self.result.as_ref()
    }

    /// Validates the current input and installs a fresh result.
    ///
    /// On error the previous result stays on screen.
    pub fn calculate(&mut self) -> Result<&BmiResult, ValidationError> {
        match self.input.calculate_bmi(&self.config) {
            Ok(result) => {
                debug!(value = %result.value(), category = %result.category(), "installing new result");
                Ok(self.result.insert(result))
            }
            Err(e) => {
                debug!(error = %e, "calculation rejected");
                Err(e)
            }
        }
    }

    /// Gradient for the result card; the neutral band until a result exists.
    pub fn color_band(&self) -> ColorBand {
        color_band_for(self.result.as_ref().map(|r| r.category()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::BmiCategory;
    use rust_decimal_macros::dec;

    #[test]
    fn test_new_session_has_no_result() {
        let session = FormSession::new();
        assert!(session.result().is_none());
        assert_eq!(session.color_band(), ColorBand::UNSET);
        assert_eq!(session.input(), &RawMeasurement::default());
    }

    #[test]
    fn test_calculate_installs_result() {
        let mut session = FormSession::new();
        session.set_age("25");
        let value = session.calculate().unwrap().value();
        assert_eq!(value, dec!(22.5));
        assert_eq!(session.color_band(), ColorBand::NORMAL);
    }

    #[test]
    fn test_failed_calculation_keeps_previous_result() {
        let mut session = FormSession::new();
        session.set_age("25");
        session.calculate().unwrap();

        session.set_age("");
        session.set_weight(150);
        assert_eq!(session.calculate().unwrap_err(), ValidationError::MissingAge);
        assert_eq!(session.result().unwrap().category(), BmiCategory::Normal);
    }

    #[test]
    fn test_editing_inputs_does_not_touch_result() {
        let mut session = FormSession::new();
        session.set_age("40");
        session.calculate().unwrap();

        session.set_weight(120);
        session.set_gender(Gender::Female);
        assert_eq!(session.result().unwrap().value(), dec!(22.5));

        let recalculated = session.calculate().unwrap();
        assert_eq!(recalculated.category(), BmiCategory::Obese); // 41.5
        assert_eq!(session.color_band(), ColorBand::OBESE);
    }

    #[test]
    fn test_session_uses_its_config() {
        let config = BmiConfig::builder().normal_limit(22).build().unwrap();
        let mut session = FormSession::with_config(config);
        session.set_age("30");
        assert_eq!(session.calculate().unwrap().category(), BmiCategory::Overweight);
    }
}
