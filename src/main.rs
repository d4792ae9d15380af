//! soil-advisor - fertilizer recommendation from soil test values
//!
//! # Usage
//!
//! ```bash
//! # Recommend for one soil record (JSON object or single-row array)
//! soil-advisor recommend --input record.json
//!
//! # Human-readable report with a custom threshold file
//! soil-advisor recommend --input record.json --config soil_advisor.toml --format text
//!
//! # Chemistry card for a fertilizer
//! soil-advisor explain DAP
//!
//! # Print the built-in configuration as TOML
//! soil-advisor default-config > soil_advisor.toml
//! ```
//!
//! # Environment Variables
//!
//! - `SOIL_ADVISOR_CONFIG`: Path to a TOML config (when `--config` is absent)
//! - `SOIL_ADVISOR_MODEL_PATH`: Override for the classifier artifact
//! - `SOIL_ADVISOR_TRANSFORM_PATH`: Override for the feature-transform artifact
//! - `RUST_LOG`: Logging level (default: info)
//!
//! Logs go to stderr so stdout carries only the result.

use anyhow::{Context, Result};
use clap::{Parser, Subcommand, ValueEnum};
use std::path::{Path, PathBuf};
use tracing::{debug, info};

use soil_advisor::advisor::{build_recommendation_report, render_text};
use soil_advisor::chemistry::fertilizer_chemistry;
use soil_advisor::config::{self, AdvisorConfig};
use soil_advisor::ml_engine::shared_predictor;
use soil_advisor::types::SoilRecord;

// ============================================================================
// CLI Arguments
// ============================================================================

#[derive(Parser, Debug)]
#[command(name = "soil-advisor")]
#[command(about = "Hybrid rule + model fertilizer recommendation from soil test values")]
#[command(version)]
struct CliArgs {
    /// Emit logs as JSON lines instead of human-readable text
    #[arg(long, global = true)]
    log_json: bool,

    #[command(subcommand)]
    command: SubCommand,
}

#[derive(Subcommand, Debug)]
enum SubCommand {
    /// Score a soil record and recommend a fertilizer
    Recommend {
        /// Path to a JSON soil record
        #[arg(long, short)]
        input: PathBuf,

        /// Threshold config (TOML); defaults to the standard search order
        #[arg(long, short, env = "SOIL_ADVISOR_CONFIG")]
        config: Option<PathBuf>,

        #[arg(long, value_enum, default_value_t = OutputFormat::Json)]
        format: OutputFormat,
    },

    /// Show the chemistry card for a fertilizer
    Explain {
        /// Fertilizer name, matched case-insensitively
        fertilizer: String,
    },

    /// Print the built-in configuration as TOML
    DefaultConfig,
}

#[derive(ValueEnum, Clone, Copy, Debug, PartialEq, Eq)]
enum OutputFormat {
    Json,
    Text,
}

// ============================================================================
// Subcommands
// ============================================================================

fn run_recommend(input: &Path, config_path: Option<&Path>, format: OutputFormat) -> Result<()> {
    let cfg = match config_path {
        Some(path) => AdvisorConfig::load_from_file(path)
            .with_context(|| format!("Failed to load config from {}", path.display()))?,
        None => AdvisorConfig::load(),
    };
    config::init(cfg);
    match shared_predictor().model_path() {
        Some(path) => debug!(model = %path.display(), "Predictor artifacts"),
        None => debug!("Predictor disabled"),
    }

    let raw = std::fs::read_to_string(input)
        .with_context(|| format!("Failed to read {}", input.display()))?;
    let value: serde_json::Value = serde_json::from_str(&raw)
        .with_context(|| format!("{} is not valid JSON", input.display()))?;
    let record = SoilRecord::from_json_value(&value)?;

    let report = build_recommendation_report(&record);
    info!(
        fertilizer = report.final_choice.name.as_deref().unwrap_or("none"),
        source = %report.final_choice.source,
        "Recommendation ready"
    );

    match format {
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&report)?),
        OutputFormat::Text => println!("{}", render_text(&report)),
    }
    Ok(())
}

fn run_explain(fertilizer: &str) -> Result<()> {
    let card = fertilizer_chemistry(fertilizer)
        .with_context(|| format!("No chemistry information for '{fertilizer}'"))?;

    println!("{} ({})", card.name, card.fertilizer_type);
    println!("Formula: {}", card.formula);
    println!("Nutrient form: {}", card.main_nutrient_form);
    for point in &card.key_points {
        println!("  - {point}");
    }
    Ok(())
}

// ============================================================================
// Main Entry Point
// ============================================================================

fn main() -> Result<()> {
    let args = CliArgs::parse();

    // Initialize logging
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info"));
    let builder = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr);
    if args.log_json {
        builder.json().init();
    } else {
        builder.init();
    }

    match &args.command {
        SubCommand::Recommend {
            input,
            config,
            format,
        } => run_recommend(input, config.as_deref(), *format),
        SubCommand::Explain { fertilizer } => run_explain(fertilizer),
        SubCommand::DefaultConfig => {
            print!("{}", AdvisorConfig::default().to_toml()?);
            Ok(())
        }
    }
}
