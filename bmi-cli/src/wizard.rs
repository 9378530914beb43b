use bmi::measurement::{HEIGHT_SLIDER, SliderRange, WEIGHT_SLIDER};
use bmi::prelude::*;
use colored::Colorize;
use inquire::validator::{ErrorMessage, Validation};
use inquire::{CustomType, Select, Text};
use rust_decimal::Decimal;
use std::io::Write;

/// Walks the user through the form fields and returns the filled-in session.
///
/// Prompts start from the session's current values, so config-file and flag
/// defaults carry over. The banner and the prompts go to stderr; stdout carries only the result.
pub fn run_wizard_mode(mut session: FormSession) -> Result<FormSession, Box<dyn std::error::Error>> {
    write_banner(&mut std::io::stderr())?;

    let current = session.input().clone();

    let genders = vec![Gender::Male, Gender::Female];
    let start = genders.iter().position(|g| *g == current.gender).unwrap_or(0);
    let gender = Select::new("Gender:", genders).with_starting_cursor(start).prompt()?;
    session.set_gender(gender);

    let age = Text::new("Age:")
        .with_initial_value(&current.age)
        .with_placeholder("e.g. 25")
        .prompt()?;
    session.set_age(age);

    let height = prompt_slider("Height (cm):", HEIGHT_SLIDER, current.height_cm)?;
    session.set_height(height);

    let weight = prompt_slider("Weight (kg):", WEIGHT_SLIDER, current.weight_kg)?;
    session.set_weight(weight);

    Ok(session)
}

fn write_banner<W: Write>(out: &mut W) -> std::io::Result<()> {
    writeln!(out, "\n{}", "BMI CALCULATOR".bright_cyan().bold())?;
    writeln!(out, "{}", "Press Ctrl+C at any time to exit.".dimmed())?;
    writeln!(out)
}

fn prompt_slider(
    message: &str,
    range: SliderRange,
    current: Option<Decimal>,
) -> Result<Decimal, inquire::InquireError> {
    let help = format!("Between {} and {}", range.min, range.max);
    let in_range = move |value: &Decimal| {
        if range.contains(*value) {
            Ok(Validation::Valid)
        } else {
            Ok(Validation::Invalid(ErrorMessage::Custom(format!(
                "Value must be between {} and {}",
                range.min, range.max
            ))))
        }
    };

    let mut prompt = CustomType::<Decimal>::new(message)
        .with_error_message("Please enter a valid number")
        .with_help_message(&help)
        .with_validator(in_range);
    if let Some(value) = current.filter(|v| range.contains(*v)) {
        prompt = prompt.with_default(value);
    }
    prompt.prompt()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_banner_is_written_to_the_given_stream() {
        colored::control::set_override(false);
        let mut out = Vec::new();
        write_banner(&mut out).unwrap();
        let text = String::from_utf8(out).unwrap();
        assert!(text.contains("BMI CALCULATOR"));
        assert!(text.contains("Ctrl+C"));
    }
}
