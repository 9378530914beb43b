use rust_decimal::Decimal;
use rust_decimal::prelude::FromPrimitive;
use std::str::FromStr;

use crate::types::InvalidReason;

/// Trait for converting slider values and text into `Decimal` for BMI calculations.
///
/// This lets callers pass `i32`, `f64`, `&str`, etc. straight into the form
/// setters without wrapping them in `dec!()` or `Decimal::from()`.
pub trait IntoBmiDecimal {
    fn into_bmi_decimal(self) -> Result<Decimal, InvalidReason>;
}

impl IntoBmiDecimal for Decimal {
    fn into_bmi_decimal(self) -> Result<Decimal, InvalidReason> {
        Ok(self)
    }
}

macro_rules! impl_into_bmi_decimal_int {
    ($($t:ty),*) => {
        $(
            impl IntoBmiDecimal for $t {
                fn into_bmi_decimal(self) -> Result<Decimal, InvalidReason> {
                    Ok(Decimal::from(self))
                }
            }
        )*
    };
}

impl_into_bmi_decimal_int!(i32, u32, i64, u64, isize, usize);

// NaN, infinities and magnitudes beyond Decimal's range are all "not a number" here.
// Each width converts at its own precision so 65.1_f32 stays 65.1.
impl IntoBmiDecimal for f32 {
    fn into_bmi_decimal(self) -> Result<Decimal, InvalidReason> {
        Decimal::from_f32(self).ok_or(InvalidReason::NotNumeric)
    }
}

impl IntoBmiDecimal for f64 {
    fn into_bmi_decimal(self) -> Result<Decimal, InvalidReason> {
        Decimal::from_f64(self).ok_or(InvalidReason::NotNumeric)
    }
}

impl IntoBmiDecimal for &str {
    fn into_bmi_decimal(self) -> Result<Decimal, InvalidReason> {
        Decimal::from_str(self.trim()).map_err(|_| InvalidReason::NotNumeric)
    }
}

impl IntoBmiDecimal for String {
    fn into_bmi_decimal(self) -> Result<Decimal, InvalidReason> {
        self.as_str().into_bmi_decimal()
    }
}
