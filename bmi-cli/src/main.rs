//! # BMI CLI
//!
//! Terminal front-end for the BMI calculator: fill in the form via flags or
//! guided prompts, get a colored result card.
//!
//! ## Usage
//! ```bash
//! # Calculate directly
//! bmi-cli --age 25 --height 170 --weight 65
//!
//! # Guided prompts
//! bmi-cli --interactive
//!
//! # Machine-readable output
//! bmi-cli --age 25 --json
//!
//! # Write a sample ~/.config/bmi/config.toml
//! bmi-cli init-config
//! ```

use std::path::PathBuf;
use std::process::ExitCode;

use bmi::prelude::*;
use clap::{Parser, Subcommand};
use colored::Colorize;
use rust_decimal::Decimal;
use tracing::{debug, info};

mod card;
mod config_loader;
mod wizard;

use card::{CardOutput, render_alert, render_card};
use config_loader::CliConfig;

/// BMI calculator
#[derive(Parser, Debug)]
#[command(name = "bmi-cli")]
#[command(version)]
#[command(about = "Calculate Body Mass Index from height, weight and age", long_about = None)]
struct Args {
    /// Gender (male or female)
    #[arg(long)]
    gender: Option<Gender>,

    /// Age in years
    #[arg(long)]
    age: Option<String>,

    /// Height in centimeters
    #[arg(long)]
    height: Option<Decimal>,

    /// Weight in kilograms
    #[arg(long)]
    weight: Option<Decimal>,

    /// Prompt for each field
    #[arg(short, long, default_value = "false")]
    interactive: bool,

    /// Print the calculation steps under the card
    #[arg(long, default_value = "false")]
    explain: bool,

    /// Output results as JSON
    #[arg(long, default_value = "false")]
    json: bool,

    /// Enable file logging to logs/ directory
    #[arg(long, default_value = "false")]
    log: bool,

    /// JSON file with classification thresholds (otherwise BMI_* env vars)
    #[arg(long)]
    thresholds: Option<PathBuf>,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Write a sample config file with the form defaults
    InitConfig,
}

fn main() -> Result<ExitCode, Box<dyn std::error::Error>> {
    let args = Args::parse();
    let cli_config = CliConfig::load();

    let _file_guard = init_logging(args.log || cli_config.enable_logging.unwrap_or(false))?;

    if let Some(Commands::InitConfig) = args.command {
        let path = CliConfig::create_sample()?;
        println!("Wrote sample configuration to {}", path.display());
        return Ok(ExitCode::SUCCESS);
    }

    let thresholds = match &args.thresholds {
        Some(path) => BmiConfig::try_from_json(&path.to_string_lossy())?,
        None => BmiConfig::from_env()?,
    };
    debug!(?thresholds, "using classification thresholds");

    let mut session = build_session(&args, &cli_config, thresholds);
    if args.interactive {
        session = wizard::run_wizard_mode(session)?;
    }

    let outcome = session.calculate();
    match outcome {
        Ok(result) => {
            info!(value = %result.value(), category = %result.category(), "bmi calculated");
            if args.json {
                println!("{}", serde_json::to_string_pretty(&CardOutput::result(result))?);
            } else {
                println!("\n{}\n", render_card(result));
                if args.explain {
                    println!("{}", result.explain().dimmed());
                }
            }
            Ok(ExitCode::SUCCESS)
        }
        Err(e) => {
            if args.json {
                println!("{}", serde_json::to_string_pretty(&CardOutput::error(&e))?);
            } else {
                eprintln!("{}", render_alert(&e));
            }
            Ok(ExitCode::FAILURE)
        }
    }
}

/// Flags override the config file, which overrides the form defaults.
fn build_session(args: &Args, cli_config: &CliConfig, thresholds: BmiConfig) -> FormSession {
    let mut session = FormSession::with_config(thresholds);

    if let Some(gender) = args.gender.or(cli_config.gender) {
        session.set_gender(gender);
    }
    if let Some(height) = args.height.or(cli_config.height) {
        session.set_height(height);
    }
    if let Some(weight) = args.weight.or(cli_config.weight) {
        session.set_weight(weight);
    }
    if let Some(age) = &args.age {
        session.set_age(age.as_str());
    }

    session
}

fn init_logging(
    to_file: bool,
) -> Result<Option<tracing_appender::non_blocking::WorkerGuard>, Box<dyn std::error::Error>> {
    use tracing_subscriber::EnvFilter;

    if to_file {
        std::fs::create_dir_all("logs")?;

        let file_appender = tracing_appender::rolling::daily("logs", "bmi.log");
        let (non_blocking, guard) = tracing_appender::non_blocking(file_appender);

        tracing_subscriber::fmt()
            .with_env_filter(EnvFilter::from_default_env().add_directive("bmi=debug".parse()?))
            .with_writer(non_blocking)
            .with_ansi(false)
            .init();

        info!("--- BMI session started ---");
        Ok(Some(guard))
    } else {
        // Keep stdout clean for the card and --json; only warnings reach stderr.
        tracing_subscriber::fmt()
            .with_env_filter(EnvFilter::from_default_env().add_directive("bmi=warn".parse()?))
            .with_writer(std::io::stderr)
            .init();
        Ok(None)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_flags_override_config_file() {
        let args = Args::parse_from(["bmi-cli", "--age", "30", "--height", "180"]);
        let file = CliConfig {
            gender: Some(Gender::Female),
            height: Some(dec!(160)),
            weight: Some(dec!(70)),
            enable_logging: None,
        };

        let session = build_session(&args, &file, BmiConfig::default());
        let input = session.input();
        assert_eq!(input.gender, Gender::Female);
        assert_eq!(input.height_cm, Some(dec!(180)));
        assert_eq!(input.weight_kg, Some(dec!(70)));
        assert_eq!(input.age, "30");
    }

    #[test]
    fn test_defaults_without_flags_or_file() {
        let args = Args::parse_from(["bmi-cli"]);
        let session = build_session(&args, &CliConfig::default(), BmiConfig::default());
        assert_eq!(session.input(), &RawMeasurement::default());
    }

    #[test]
    fn test_gender_flag_parses() {
        let args = Args::parse_from(["bmi-cli", "--gender", "female"]);
        assert_eq!(args.gender, Some(Gender::Female));
    }
}
