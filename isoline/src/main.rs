//! isoline command-line interface.
//!
//! Replaces an image by its marching-squares contour overlay.

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use isoline::IsolineOptions;
use std::num::NonZeroUsize;
use std::path::PathBuf;
use tracing::{Level, info};
use tracing_subscriber::FmtSubscriber;

#[derive(Parser, Debug)]
#[command(name = "isoline")]
#[command(about = "Parallel marching-squares isoline filter", long_about = None)]
struct Cli {
    /// Log level (trace, debug, info, warn, error)
    #[arg(long, global = true, default_value = "info")]
    log_level: String,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Contour an image
    Run {
        /// Input image (PPM P3/P6 or PNG)
        input: PathBuf,

        /// Output image; `.png` writes PNG, anything else binary PPM
        output: PathBuf,

        /// Number of worker tasks
        tasks: NonZeroUsize,

        /// Directory holding the stencils 0.ppm .. 15.ppm
        #[arg(long, default_value = "./contours")]
        contours: PathBuf,
    },
}

fn init_tracing(log_level: &str) -> Result<()> {
    let level = match log_level.to_lowercase().as_str() {
        "trace" => Level::TRACE,
        "debug" => Level::DEBUG,
        "warn" => Level::WARN,
        "error" => Level::ERROR,
        _ => Level::INFO,
    };

    let subscriber = FmtSubscriber::builder()
        .with_max_level(level)
        .with_writer(std::io::stderr)
        .finish();

    tracing::subscriber::set_global_default(subscriber)?;
    Ok(())
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(&cli.log_level)?;

    match cli.command {
        Commands::Run {
            input,
            output,
            tasks,
            contours,
        } => {
            info!(
                input = %input.display(),
                output = %output.display(),
                tasks = tasks.get(),
                "Starting isoline run"
            );
            isoline::run(
                &input,
                &output,
                &contours,
                &IsolineOptions::default(),
                tasks.get(),
            )
            .with_context(|| format!("failed to contour {}", input.display()))?;
        }
    }

    Ok(())
}
