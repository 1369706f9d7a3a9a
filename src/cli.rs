//! CLI definitions using clap derive API

use std::path::PathBuf;

use clap::builder::FalseyValueParser;
use clap::{Args, Parser, Subcommand};

use crate::age::CalendarDate;
use crate::analysis::DEFAULT_LATENCY;

/// Age calculator and simulated image analysis
#[derive(Parser, Debug)]
#[command(name = "agecalc", version, about)]
pub struct Cli {
    /// Date to treat as today (defaults to the current UTC date)
    #[arg(long, global = true, env = "AGECALC_TODAY", value_name = "YYYY-MM-DD")]
    pub today: Option<CalendarDate>,

    /// Disable colored output
    #[arg(
        long,
        global = true,
        env = "NO_COLOR",
        value_parser = FalseyValueParser::new()
    )]
    pub no_color: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Calculate an age from a date of birth
    Age(AgeArgs),

    /// Run the (simulated) image analysis on a png/jpg file
    Analyze(AnalyzeArgs),
}

#[derive(Args, Debug)]
pub struct AgeArgs {
    /// Your name
    #[arg(long, short)]
    pub name: Option<String>,

    /// Date of birth, DD/MM/YYYY or YYYY-MM-DD
    #[arg(long, short)]
    pub dob: Option<String>,

    /// Earliest date of birth the form accepts
    #[arg(
        long,
        env = "AGECALC_MIN_DOB",
        default_value = "2000-01-01",
        value_name = "YYYY-MM-DD"
    )]
    pub min_dob: CalendarDate,

    /// Prompt for the fields instead of reading flags
    #[arg(long, short)]
    pub interactive: bool,
}

#[derive(Args, Debug)]
pub struct AnalyzeArgs {
    /// Image to analyze
    pub path: Option<PathBuf>,

    /// Simulated model latency in milliseconds
    #[arg(long, env = "AGECALC_LATENCY_MS", default_value_t = DEFAULT_LATENCY.as_millis() as u64)]
    pub latency_ms: u64,

    /// Also print the raw JSON result
    #[arg(long)]
    pub json: bool,
}
