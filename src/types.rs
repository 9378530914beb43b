use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use strum::{AsRefStr, Display, EnumIter, EnumString};

/// Gender selected on the form.
///
/// Collected alongside the measurements but not used by the BMI formula.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize,
    Display, EnumString, EnumIter, AsRefStr,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase", ascii_case_insensitive)]
pub enum Gender {
    #[default]
    Male,
    Female,
}

/// BMI category derived from the rounded BMI value.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize,
    Display, EnumString, EnumIter, AsRefStr,
)]
#[strum(ascii_case_insensitive)]
pub enum BmiCategory {
    /// value < 18.5
    Underweight,
    /// 18.5 <= value < 25.0
    Normal,
    /// 25.0 <= value < 30.0
    Overweight,
    /// value >= 30.0
    Obese,
}

/// The kind of operation a [`CalculationStep`] records.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum Operation {
    Input,
    Convert,
    Square,
    Divide,
    Round,
    Classify,
}

impl Operation {
    fn symbol(&self) -> &'static str {
        match self {
            Operation::Input => " ",
            Operation::Convert => "~",
            Operation::Square => "^",
            Operation::Divide => "/",
            Operation::Round => "=",
            Operation::Classify => "?",
        }
    }
}

/// A single step in the BMI calculation, kept so a result can explain itself.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CalculationStep {
    pub description: String,
    pub amount: Option<Decimal>,
    pub operation: Operation,
}

impl CalculationStep {
    pub fn new(operation: Operation, description: impl Into<String>, amount: Option<Decimal>) -> Self {
        Self {
            description: description.into(),
            amount,
            operation,
        }
    }

    pub fn input(description: impl Into<String>, amount: Decimal) -> Self {
        Self::new(Operation::Input, description, Some(amount))
    }

    pub fn convert(description: impl Into<String>, amount: Decimal) -> Self {
        Self::new(Operation::Convert, description, Some(amount))
    }

    pub fn square(description: impl Into<String>, amount: Decimal) -> Self {
        Self::new(Operation::Square, description, Some(amount))
    }

    pub fn divide(description: impl Into<String>, amount: Decimal) -> Self {
        Self::new(Operation::Divide, description, Some(amount))
    }

    pub fn round(description: impl Into<String>, amount: Decimal) -> Self {
        Self::new(Operation::Round, description, Some(amount))
    }

    pub fn classify(category: BmiCategory) -> Self {
        Self::new(Operation::Classify, category.to_string(), None)
    }
}

/// Outcome of one BMI calculation.
///
/// Results are never mutated: recalculating produces a new `BmiResult` that
/// replaces the old one wholesale. Only the calculator builds them, so
/// `category` always matches the displayed `value`.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BmiResult {
    value: Decimal,
    category: BmiCategory,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    calculation_trace: Vec<CalculationStep>,
}

impl BmiResult {
    pub(crate) fn new(value: Decimal, category: BmiCategory) -> Self {
        Self {
            value,
            category,
            calculation_trace: Vec::new(),
        }
    }

    pub(crate) fn with_trace(mut self, trace: Vec<CalculationStep>) -> Self {
        self.calculation_trace = trace;
        self
    }

    /// BMI rounded to one decimal place.
    pub fn value(&self) -> Decimal {
        self.value
    }

    /// Category of the rounded `value`.
    pub fn category(&self) -> BmiCategory {
        self.category
    }

    /// Step-by-step trace of how `value` was derived.
    pub fn calculation_trace(&self) -> &[CalculationStep] {
        &self.calculation_trace
    }

    /// Color band used to render this result's card.
    pub fn color_band(&self) -> crate::color::ColorBand {
        self.category.color_band()
    }

    /// The value with exactly one decimal digit, e.g. `"22.5"` or `"25.0"`.
    pub fn format_value(&self) -> String {
        format!("{:.1}", self.value)
    }

    /// Card text: `"BMI: 22.5 (Normal)"`.
    pub fn summary(&self) -> String {
        format!("BMI: {} ({})", self.format_value(), self.category)
    }

    /// Generates a human-readable explanation of the calculation trace.
    pub fn explain(&self) -> String {
        use std::fmt::Write;
        let mut output = String::new();

        let _ = writeln!(output, "BMI calculation:");
        let _ = writeln!(output, "{:-<44}", "");

        let width = self
            .calculation_trace
            .iter()
            .map(|step| step.description.len())
            .max()
            .unwrap_or(20)
            .max(20);

        for step in &self.calculation_trace {
            match (step.operation, step.amount) {
                (Operation::Classify, _) => {
                    let _ = writeln!(output, "  {:<width$} : {}", "Category", step.description);
                }
                (op, Some(amount)) => {
                    let _ = writeln!(
                        output,
                        "  {:<width$} : {} {:>10}",
                        step.description,
                        op.symbol(),
                        amount.normalize(),
                    );
                }
                (_, None) => {
                    let _ = writeln!(output, "  {:<width$}", step.description);
                }
            }
        }

        let _ = writeln!(output, "{:-<44}", "");
        let _ = writeln!(output, "{}", self.summary());
        output
    }
}

impl std::fmt::Display for BmiResult {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.summary())
    }
}

/// Which input field a validation failure refers to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Display, AsRefStr)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum MeasurementField {
    Height,
    Weight,
    Age,
}

/// Why a field was rejected.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Display)]
#[serde(rename_all = "camelCase")]
pub enum InvalidReason {
    #[strum(to_string = "not a number")]
    NotNumeric,
    #[strum(to_string = "must be greater than zero")]
    NotPositive,
}

/// Validation failures surfaced to the user. Both require re-entry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, thiserror::Error)]
#[serde(tag = "kind", rename_all = "camelCase")]
pub enum ValidationError {
    /// The age field was empty (or whitespace) at calculation time.
    #[error("age is required")]
    MissingAge,
    /// A field did not coerce to a positive number.
    #[error("invalid {field}: {reason}")]
    InvalidMeasurement {
        field: MeasurementField,
        reason: InvalidReason,
    },
}

impl ValidationError {
    pub fn invalid(field: MeasurementField, reason: InvalidReason) -> Self {
        ValidationError::InvalidMeasurement { field, reason }
    }

    /// Title of the blocking alert shown for this error.
    pub fn alert_title(&self) -> &'static str {
        "Error"
    }

    /// Fixed alert message shown for this error.
    pub fn alert_message(&self) -> &'static str {
        match self {
            ValidationError::MissingAge => "Please enter your age!",
            ValidationError::InvalidMeasurement { .. } => "Please enter valid values!",
        }
    }
}

/// Errors raised while building or loading a [`crate::config::BmiConfig`].
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ConfigError {
    #[error("configuration error: {0}")]
    Invalid(String),
    #[error("failed to parse configuration: {0}")]
    Parse(String),
    #[error("failed to read configuration file: {0}")]
    Io(String),
    #[error("environment variable {name} is invalid: {reason}")]
    Env { name: String, reason: String },
}
