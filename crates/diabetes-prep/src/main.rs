//! CLI entry point for the data preparation step.

use anyhow::Result;
use clap::Parser;
use diabetes_prep::{PrepConfig, PrepPipeline};
use dotenv::dotenv;
use std::path::PathBuf;
use tracing::{debug, info};

#[derive(Parser, Debug)]
#[command(
    version,
    about = "Prepare diabetes data for training",
    long_about = "Loads a CSV (or the first CSV in a directory), drops incomplete rows, \
                  min-max scales the health-measurement columns to [0, 1] and writes \
                  diabetes.csv into the output directory.\n\n\
                  ENVIRONMENT VARIABLES:\n  \
                  RUST_LOG    Log filter (default: info)\n\n\
                  EXAMPLES:\n  \
                  diabetes-prep --input_data data/raw --output_data data/prepared"
)]
struct Args {
    /// CSV file, or directory containing the source CSV
    #[arg(long = "input_data", value_name = "PATH")]
    input_data: PathBuf,

    /// Directory the normalized diabetes.csv is written into
    #[arg(long = "output_data", value_name = "PATH")]
    output_data: PathBuf,
}

/// Initialize the tracing subscriber for logging.
fn init_logging() {
    use tracing_subscriber::EnvFilter;

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .init();
}

fn main() -> Result<()> {
    let args = Args::parse();

    // Load environment variables from .env file before reading RUST_LOG
    dotenv().ok();
    init_logging();

    info!("Input data: {}", args.input_data.display());
    info!("Output data: {}", args.output_data.display());

    let config = PrepConfig::builder()
        .input_data(args.input_data)
        .output_data(args.output_data)
        .build()?;

    let summary = PrepPipeline::builder()
        .config(config)
        .on_progress(|update| {
            debug!("[{}] {}", update.stage.display_name(), update.message);
        })
        .build()?
        .run()?;

    info!(
        "Scaled columns {:?}; {} rows written to {}",
        summary.scaled_columns,
        summary.rows_written,
        summary.output_path.display()
    );

    Ok(())
}
