//! Top-level application orchestration.
//!
//! `src/main.rs` is intentionally tiny; this module is the "real main" that:
//! - parses CLI arguments
//! - installs logging
//! - loads the dashboard document
//! - prints tables, plots and summaries
//! - writes optional exports

use clap::Parser;

use crate::cli::{Command, CommonArgs, ExportArgs, FamilyArgs};
use crate::data::DataSource;
use crate::domain::DashboardConfig;
use crate::error::AppError;
use crate::report::NO_CHART_DATA;

pub mod pipeline;

use pipeline::{FamilyChart, RunOutput};

/// Entry point for the `fdash` binary.
pub fn run() -> Result<(), AppError> {
    // `fdash` and `fdash --source x` behave like `fdash show ...`.
    let argv = rewrite_args(std::env::args().collect());
    let cli = crate::cli::Cli::parse_from(argv);

    crate::logging::init_logging(cli.command.common().log_json);

    match cli.command {
        Command::Show(args) => handle_show(args),
        Command::Chart(args) => handle_chart(args),
        Command::Aggregate(args) => handle_aggregate(args),
        Command::Routes(args) => handle_routes(args),
        Command::Export(args) => handle_export(args),
    }
}

fn handle_show(args: CommonArgs) -> Result<(), AppError> {
    let run = load(&args)?;
    println!("{}", crate::report::format_dashboard(&run.view));
    Ok(())
}

fn handle_chart(args: FamilyArgs) -> Result<(), AppError> {
    let run = load(&args.common)?;
    let Some(view) = run.view.family(args.family) else {
        return Err(AppError::new(2, format!("Unknown family '{}'.", args.family)));
    };

    println!("=== {} ===", view.title);
    match &view.chart {
        // The summary below reports the empty case.
        chart if chart.dataset_count() == 0 => {}
        FamilyChart::Line { datasets, .. } => {
            println!(
                "{}",
                crate::plot::render_series_plot(datasets, args.width, args.height)
            );
        }
        FamilyChart::StackedMonthly {
            aggregation,
            datasets,
        } => {
            println!(
                "{}",
                crate::report::format_monthly_datasets(aggregation, datasets)
            );
        }
    }
    print!("{}", crate::report::format_chart_summary(&view.chart));
    Ok(())
}

fn handle_aggregate(args: FamilyArgs) -> Result<(), AppError> {
    let run = load(&args.common)?;
    let series = &run.model.family(args.family).series;
    let aggregation = crate::aggregate::aggregate_by_month(series, args.common.months);

    println!(
        "{}",
        crate::report::format_aggregation(args.family, &aggregation)
    );
    Ok(())
}

fn handle_routes(args: CommonArgs) -> Result<(), AppError> {
    // Only table data is needed here, so a document without charts is fine.
    let run = pipeline::run_dashboard(&config_from_args(&args))?;
    let drift = crate::report::route_drift(&run.model, &run.routes);

    print!(
        "{}",
        crate::report::format_route_drift(&drift, &run.routes.version)
    );
    Ok(())
}

fn handle_export(args: ExportArgs) -> Result<(), AppError> {
    let run = load(&args.common)?;
    crate::io::export::write_view_json(&args.out, &run.view)?;
    println!("Wrote dashboard view to {}", args.out.display());
    Ok(())
}

/// Run the pipeline; a document without any chart data is an error.
fn load(args: &CommonArgs) -> Result<RunOutput, AppError> {
    let run = pipeline::run_dashboard(&config_from_args(args))?;
    if !run.view.has_chart_data {
        return Err(AppError::new(3, NO_CHART_DATA));
    }
    Ok(run)
}

pub fn config_from_args(args: &CommonArgs) -> DashboardConfig {
    DashboardConfig {
        source: DataSource::resolve(args.source.as_deref()).describe(),
        route_map: args.route_map.clone(),
        window_months: args.months,
        missing_previous: args.missing_previous,
    }
}

/// Rewrite argv so `fdash` defaults to `fdash show`.
///
/// Rules:
/// - `fdash`                        -> `fdash show`
/// - `fdash --source x ...`         -> `fdash show --source x ...`
/// - `fdash --help/--version/-h`    -> unchanged (show top-level help/version)
fn rewrite_args(mut argv: Vec<String>) -> Vec<String> {
    let Some(arg1) = argv.get(1).cloned() else {
        argv.push("show".to_string());
        return argv;
    };

    let is_top_level_help_or_version = matches!(
        arg1.as_str(),
        "-h" | "--help" | "-V" | "--version" | "help"
    );
    if is_top_level_help_or_version {
        return argv;
    }

    let is_subcommand = matches!(
        arg1.as_str(),
        "show" | "chart" | "aggregate" | "routes" | "export"
    );
    if is_subcommand {
        return argv;
    }

    // If the first token is a flag, treat it as "show flags".
    if arg1.starts_with('-') {
        argv.insert(1, "show".to_string());
        return argv;
    }

    argv
}
