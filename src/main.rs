//! CLI entry point for the bike-share dashboard.
//!
//! Loads the cleaned daily dataset from a file or URL, filters it to a date
//! range, and renders or exports the aggregate report.

use anyhow::{Context, Result};
use bikeshare_dashboard::analyzers::analyzer::build_report;
use bikeshare_dashboard::analyzers::types::DashboardReport;
use bikeshare_dashboard::filter::{DateRange, parse_date, select_range};
use bikeshare_dashboard::loader::load_source;
use bikeshare_dashboard::output::{export_report, print_json, print_pretty, render_report};
use bikeshare_dashboard::viz::generate_charts;
use chrono::NaiveDate;
use clap::{Parser, Subcommand};
use std::ffi::OsStr;
use std::path::Path;
use tracing::info;
use tracing_subscriber::{
    EnvFilter, Layer,
    fmt::{self, format::FmtSpan},
    layer::SubscriberExt,
    util::SubscriberInitExt,
};

#[derive(Parser)]
#[command(name = "bikeshare_dashboard")]
#[command(about = "Aggregate report over the bike-sharing daily dataset", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Render the dashboard report for a date range
    Report {
        /// Path or URL of the cleaned daily CSV (defaults to $DAY_CSV)
        #[arg(short, long, value_name = "FILE_OR_URL")]
        data: Option<String>,

        /// First date to include (YYYY-MM-DD); defaults to the earliest record
        #[arg(short, long, value_parser = parse_date)]
        start: Option<NaiveDate>,

        /// Last date to include (YYYY-MM-DD); defaults to the latest record
        #[arg(short, long, value_parser = parse_date)]
        end: Option<NaiveDate>,

        /// Log the report as JSON instead of rendering text
        #[arg(long, default_value_t = false)]
        json: bool,

        /// Directory to draw PNG charts into
        #[arg(long, value_name = "DIR")]
        charts: Option<String>,
    },
    /// Write every aggregate table as CSV
    Export {
        /// Path or URL of the cleaned daily CSV (defaults to $DAY_CSV)
        #[arg(short, long, value_name = "FILE_OR_URL")]
        data: Option<String>,

        #[arg(short, long, value_parser = parse_date)]
        start: Option<NaiveDate>,

        #[arg(short, long, value_parser = parse_date)]
        end: Option<NaiveDate>,

        /// Directory to write the CSV tables into
        #[arg(short, long, default_value = "report")]
        output_dir: String,

        /// Directory to draw PNG charts into
        #[arg(long, value_name = "DIR")]
        charts: Option<String>,
    },
    /// Print the date range covered by the dataset
    Range {
        /// Path or URL of the cleaned daily CSV (defaults to $DAY_CSV)
        #[arg(short, long, value_name = "FILE_OR_URL")]
        data: Option<String>,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok(); // Load .env file

    // Logging setup: colored stderr + JSON rolling log file
    let log_file_path = std::env::var("LOG_FILE_PATH")
        .unwrap_or_else(|_| "logs/bikeshare_dashboard.log".to_string());
    let log_dir = Path::new(&log_file_path)
        .parent()
        .unwrap_or(Path::new("logs"));
    let log_file_name = Path::new(&log_file_path)
        .file_name()
        .unwrap_or(OsStr::new("bikeshare_dashboard.log"));

    let file_appender = tracing_appender::rolling::daily(log_dir, log_file_name);
    let (non_blocking_file, _file_guard) = tracing_appender::non_blocking(file_appender);

    let stderr_layer = fmt::layer()
        .with_target(true)
        .with_span_events(FmtSpan::CLOSE)
        .with_ansi(true)
        .with_writer(std::io::stderr)
        .with_filter(EnvFilter::from_env("RUST_LOG").add_directive("info".parse()?));

    let json_layer = fmt::layer()
        .json()
        .with_current_span(true)
        .with_span_list(true)
        .with_writer(non_blocking_file)
        .with_filter(EnvFilter::from_env("RUST_LOG_JSON").add_directive("debug".parse()?));

    tracing_subscriber::registry()
        .with(stderr_layer)
        .with(json_layer)
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Report {
            data,
            start,
            end,
            json,
            charts,
        } => {
            let source = data_source(data);
            let records = load_source(&source).await?;
            let range = select_range(&records, start, end)?;
            let report = build_report(&records, range);

            print_pretty(&report);
            if json {
                print_json(&report)?;
            } else {
                println!("{}", render_report(&report));
            }
            if let Some(dir) = charts {
                draw_charts(&dir, &report)?;
            }
        }
        Commands::Export {
            data,
            start,
            end,
            output_dir,
            charts,
        } => {
            let source = data_source(data);
            let records = load_source(&source).await?;
            let range = select_range(&records, start, end)?;
            let report = build_report(&records, range);

            let written = export_report(Path::new(&output_dir), &report)
                .with_context(|| format!("Failed to export report to {}", output_dir))?;
            for path in &written {
                println!("{}", path);
            }
            if let Some(dir) = charts {
                draw_charts(&dir, &report)?;
            }
        }
        Commands::Range { data } => {
            let source = data_source(data);
            let records = load_source(&source).await?;
            match DateRange::of(&records) {
                Some(range) => {
                    info!(rows = records.len(), "Dataset loaded");
                    println!("{} {} ({} days)", range.start, range.end, range.days());
                }
                None => println!("No records in {}", source),
            }
        }
    }

    Ok(())
}

/// Draws the PNG charts for `report` into `dir` and prints each path.
fn draw_charts(dir: &str, report: &DashboardReport) -> Result<()> {
    let written = generate_charts(Path::new(dir), report)
        .with_context(|| format!("Failed to draw charts into {}", dir))?;
    for path in &written {
        println!("{}", path);
    }
    Ok(())
}

/// The `--data` argument, else `$DAY_CSV`, else the bundled default path.
fn data_source(arg: Option<String>) -> String {
    arg.or_else(|| std::env::var("DAY_CSV").ok())
        .unwrap_or_else(|| "data/day_clean.csv".to_string())
}
