//! Terminal rendering of the result card.

use bmi::{BmiResult, Color, ColorBand, ValidationError};
use colored::Colorize;
use serde::Serialize;

const CARD_WIDTH: usize = 28;

/// JSON payload for `--json` output.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase", untagged)]
pub enum CardOutput<'a> {
    Result {
        result: &'a BmiResult,
        band: ColorBand,
        summary: String,
    },
    Error {
        error: &'a ValidationError,
        title: &'static str,
        message: &'static str,
    },
}

impl<'a> CardOutput<'a> {
    pub fn result(result: &'a BmiResult) -> Self {
        CardOutput::Result {
            result,
            band: result.color_band(),
            summary: result.summary(),
        }
    }

    pub fn error(error: &'a ValidationError) -> Self {
        CardOutput::Error {
            error,
            title: error.alert_title(),
            message: error.alert_message(),
        }
    }
}

/// Renders the card as two lines shaded from the band's start to end color.
pub fn render_card(result: &BmiResult) -> String {
    let band = result.color_band();
    let value_line = format!("{:^width$}", format!("BMI: {}", result.format_value()), width = CARD_WIDTH);
    let status_line = format!("{:^width$}", result.category().to_string(), width = CARD_WIDTH);

    format!(
        "{}\n{}",
        paint(&value_line, band.start).bold(),
        paint(&status_line, band.end),
    )
}

/// Renders a validation error the way the form's alert shows it.
pub fn render_alert(error: &ValidationError) -> String {
    format!("{}: {}", error.alert_title().red().bold(), error.alert_message())
}

fn paint(text: &str, background: Color) -> colored::ColoredString {
    text.white().on_truecolor(background.r, background.g, background.b)
}
