use crate::config::BmiConfig;
use crate::types::{BmiResult, ValidationError};

/// Implemented by anything that can be turned into a [`BmiResult`].
pub trait CalculateBmi {
    /// Validates (where needed) and computes BMI using the thresholds in `config`.
    fn calculate_bmi(&self, config: &BmiConfig) -> Result<BmiResult, ValidationError>;
}
