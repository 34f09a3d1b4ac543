//! CLI interface and argument parsing
//!
//! This module provides the command-line interface for Fairwatt using clap.

pub mod commands;

use clap::{Parser, Subcommand};

/// Fairwatt - Meter list console for field verification
#[derive(Parser, Debug)]
#[command(name = "fairwatt")]
#[command(version, about, long_about = None)]
#[command(author = "Fairwatt Contributors")]
pub struct Cli {
    /// Path to configuration file
    #[arg(short, long, default_value = "fairwatt.toml", env = "FAIRWATT_CONFIG")]
    pub config: String,

    /// Log level (trace, debug, info, warn, error)
    #[arg(short, long, env = "FAIRWATT_LOG_LEVEL")]
    pub log_level: Option<String>,

    /// Subcommand to execute
    #[command(subcommand)]
    pub command: Commands,
}

/// Available commands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// List one page of meters with filters and sorting applied
    List(commands::list::ListArgs),

    /// Show the full record of one meter
    Show(commands::show::ShowArgs),

    /// Show consumption averages and the monthly series
    Consumption(commands::consumption::ConsumptionArgs),

    /// Export the visible meters to XLSX or CSV
    Export(commands::export::ExportArgs),

    /// Build a field visit plan from selected meters
    Plan(commands::plan::PlanArgs),

    /// Save a free-text note on a meter
    Note(commands::note::NoteArgs),

    /// Validate configuration file
    ValidateConfig(commands::validate::ValidateArgs),

    /// Initialize a new configuration file
    Init(commands::init::InitArgs),
}
