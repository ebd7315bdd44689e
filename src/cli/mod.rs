//! Command-line parsing for the freight index dashboard.
//!
//! The goal of this module is to keep **argument parsing** and **command dispatch**
//! separate from the dataset/aggregation code.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};

use crate::domain::{DEFAULT_WINDOW_MONTHS, IndexFamily, MAX_WINDOW_MONTHS, MissingValueDisplay};

/// Top-level CLI.
#[derive(Debug, Parser)]
#[command(name = "fdash", version, about = "Freight index dashboard for the terminal")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

/// CLI subcommands.
#[derive(Debug, Subcommand)]
pub enum Command {
    /// Print every family table with dataset summaries, exchange rate and weather.
    Show(CommonArgs),
    /// Plot one family's datasets (monthly table for stacked families).
    Chart(FamilyArgs),
    /// Print the monthly averages of every field of one family.
    Aggregate(FamilyArgs),
    /// List table routes that the route map cannot chart.
    Routes(CommonArgs),
    /// Write the whole dashboard view as JSON.
    Export(ExportArgs),
}

impl Command {
    pub fn common(&self) -> &CommonArgs {
        match self {
            Command::Show(args) | Command::Routes(args) => args,
            Command::Chart(args) | Command::Aggregate(args) => &args.common,
            Command::Export(args) => &args.common,
        }
    }
}

/// Options shared by every subcommand.
#[derive(Debug, Args, Clone)]
pub struct CommonArgs {
    /// Data source: http(s) URL or local JSON file. Falls back to
    /// `FREIGHT_DATA_URL`, then `data/crawling_data.json`.
    #[arg(long, value_name = "URL|PATH")]
    pub source: Option<String>,

    /// Versioned route-key table (JSON). The built-in table is used when absent.
    #[arg(long = "route-map", value_name = "JSON")]
    pub route_map: Option<PathBuf>,

    /// Trailing window (calendar months) for monthly aggregation, at most 1200.
    #[arg(
        long,
        default_value_t = DEFAULT_WINDOW_MONTHS,
        value_parser = clap::builder::RangedU64ValueParser::<usize>::new().range(0..=MAX_WINDOW_MONTHS)
    )]
    pub months: usize,

    /// How a missing previous index is displayed.
    #[arg(long = "missing-previous", value_enum, default_value_t = MissingValueDisplay::Dash)]
    pub missing_previous: MissingValueDisplay,

    /// Emit logs as JSON (stderr).
    #[arg(long = "log-json")]
    pub log_json: bool,
}

/// Options for single-family subcommands.
#[derive(Debug, Args, Clone)]
pub struct FamilyArgs {
    /// Index family (KCCI, SCFI, WCI, IACI, BLANK_SAILING, FBX, XSI, MBCI).
    #[arg(value_enum, ignore_case = true)]
    pub family: IndexFamily,

    /// Plot width (columns).
    #[arg(long, default_value_t = 100)]
    pub width: usize,

    /// Plot height (rows).
    #[arg(long, default_value_t = 25)]
    pub height: usize,

    #[command(flatten)]
    pub common: CommonArgs,
}

/// Options for exporting the view.
#[derive(Debug, Args, Clone)]
pub struct ExportArgs {
    /// Output JSON file.
    #[arg(long, value_name = "JSON")]
    pub out: PathBuf,

    #[command(flatten)]
    pub common: CommonArgs,
}
