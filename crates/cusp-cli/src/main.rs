//! Cusp CLI - inspect pose tables and replay tooth edits headlessly

mod commands;
mod logging;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use commands::{check, inspect, replay};
use cusp_core::CuspConfig;

#[derive(Parser)]
#[command(name = "cusp")]
#[command(about = "Axis-relative tooth pose editing tools", long_about = None)]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// List the records of a pose table
    Inspect {
        /// Path or URL of the pose table (defaults to the configured one)
        table: Option<String>,

        /// Output format (text or json)
        #[arg(long, default_value = "text")]
        format: String,
    },

    /// Check a pose table for malformed lines and missing teeth
    Check {
        /// Path or URL of the pose table (defaults to the configured one)
        table: Option<String>,

        /// Teeth that must have a record (comma-separated, defaults to the configured set)
        #[arg(long, value_delimiter = ',')]
        teeth: Option<Vec<String>>,
    },

    /// Replay a select-and-drag gesture on one tooth and print the result
    Replay {
        /// Path or URL of the pose table (defaults to the configured one)
        table: Option<String>,

        /// Tooth to drag
        #[arg(long)]
        tooth: String,

        /// Horizontal pointer travel in normalized viewport units
        #[arg(long, default_value = "0.1", allow_hyphen_values = true)]
        dx: f64,

        /// Vertical pointer travel in normalized viewport units (down is positive)
        #[arg(long, default_value = "0.0", allow_hyphen_values = true)]
        dy: f64,

        /// Rotate about the tooth's Z axis instead of translating
        #[arg(long)]
        rotate: bool,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    let config = CuspConfig::load().context("Failed to load cusp config")?;
    logging::init(&config)?;

    match cli.command {
        Commands::Inspect { table, format } => {
            inspect::run(table.as_deref().unwrap_or(&config.pose_table), &format)
        }
        Commands::Check { table, teeth } => check::run(check::CheckArgs {
            table: table.unwrap_or_else(|| config.pose_table.clone()),
            teeth: teeth.unwrap_or_else(|| {
                config.teeth.iter().map(|id| id.to_string()).collect()
            }),
        }),
        Commands::Replay {
            table,
            tooth,
            dx,
            dy,
            rotate,
        } => replay::run(
            replay::ReplayArgs {
                table: table.unwrap_or_else(|| config.pose_table.clone()),
                tooth,
                dx,
                dy,
                rotate,
            },
            &config,
        ),
    }
}
