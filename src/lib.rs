pub mod calculator;
pub mod color;
pub mod config;
pub mod inputs;
pub mod measurement;
pub mod prelude;
pub mod session;
pub mod traits;
pub mod types;

pub use calculator::{calculate, compute, compute_with};
pub use color::{Color, ColorBand, color_band_for};
pub use config::BmiConfig;
pub use measurement::{Measurement, RawMeasurement, validate};
pub use session::FormSession;
pub use traits::CalculateBmi;
pub use types::{BmiCategory, BmiResult, ConfigError, Gender, ValidationError};
