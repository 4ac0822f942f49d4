//! Output formatting and persistence for dashboard results.
//!
//! Supports a plain-text summary, JSON logging, and CSV export of every
//! aggregate table. Charts are drawn by [`crate::viz`].

use anyhow::{Context, Result};
use csv::WriterBuilder;
use serde::Serialize;
use std::fs;
use std::path::Path;
use tracing::{debug, info};

use crate::analyzers::summary::{top_by_frequency, top_by_monetary, top_by_recency};
use crate::analyzers::types::{CategoryTotal, DailyTotal, DashboardReport, RfmRow};
use crate::analyzers::utility::format_thousands;

const TOP_N: usize = 5;

/// Logs the report using Rust's debug pretty-print format.
pub fn print_pretty(report: &DashboardReport) {
    debug!("{:#?}", report);
}

/// Logs the report as pretty-printed JSON.
pub fn print_json(report: &DashboardReport) -> Result<()> {
    info!("{}", serde_json::to_string_pretty(report)?);
    Ok(())
}

/// Writes `rows` to a fresh CSV file at `path`.
///
/// `headers` must match the serialized field names of `T`; they are written
/// explicitly when `rows` is empty so every file carries a header row.
pub fn write_table<T: Serialize>(path: &Path, headers: &[&str], rows: &[T]) -> Result<()> {
    let mut writer = WriterBuilder::new()
        .has_headers(true)
        .from_path(path)
        .with_context(|| format!("Failed to create {}", path.display()))?;

    if rows.is_empty() {
        writer.write_record(headers)?;
    }
    for row in rows {
        writer.serialize(row)?;
    }
    writer.flush()?;

    debug!(path = %path.display(), rows = rows.len(), "Table written");
    Ok(())
}

/// Writes each aggregate table of `report` as its own CSV under `dir`.
///
/// Returns the paths written, in a fixed order.
pub fn export_report(dir: &Path, report: &DashboardReport) -> Result<Vec<String>> {
    fs::create_dir_all(dir).with_context(|| format!("Failed to create {}", dir.display()))?;

    let mut written = Vec::new();
    write_into(dir, "daily_totals.csv", &DailyTotal::COLUMNS, &report.daily_totals, &mut written)?;
    write_into(dir, "casual_by_day.csv", &CategoryTotal::COLUMNS, &report.casual_by_day, &mut written)?;
    write_into(
        dir,
        "registered_by_day.csv",
        &CategoryTotal::COLUMNS,
        &report.registered_by_day,
        &mut written,
    )?;
    write_into(dir, "by_weather.csv", &CategoryTotal::COLUMNS, &report.by_weather, &mut written)?;
    write_into(dir, "by_season.csv", &CategoryTotal::COLUMNS, &report.by_season, &mut written)?;
    write_into(dir, "rfm.csv", &RfmRow::COLUMNS, &report.rfm, &mut written)?;

    info!(dir = %dir.display(), files = written.len(), "Report exported");
    Ok(written)
}

fn write_into<T: Serialize>(
    dir: &Path,
    name: &str,
    headers: &[&str],
    rows: &[T],
    written: &mut Vec<String>,
) -> Result<()> {
    let path = dir.join(name);
    write_table(&path, headers, rows)?;
    written.push(path.display().to_string());
    Ok(())
}

/// Renders the dashboard's metric cards and tables as terminal text.
pub fn render_report(report: &DashboardReport) -> String {
    let mut out = String::new();
    let days = (report.end - report.start).num_days() + 1;

    out.push_str("Bike Share Dashboard\n");
    out.push_str(&format!(
        "Date range: {} to {} ({} days)\n",
        report.start, report.end, days
    ));

    section(&mut out, "Daily Users");
    let m = &report.metrics;
    out.push_str(&format!(
        "Total Casual User: {}  |  Total Registered User: {}  |  Total Users: {}\n",
        format_thousands(m.total_casual),
        format_thousands(m.total_registered),
        format_thousands(m.total_users),
    ));
    if let (Some(first), Some(last)) = (report.daily_totals.first(), report.daily_totals.last()) {
        out.push_str(&format!(
            "{} daily buckets, first {} ({}), last {} ({})\n",
            report.daily_totals.len(),
            first.date,
            format_thousands(first.total_user),
            last.date,
            format_thousands(last.total_user),
        ));
    }

    section(&mut out, "Daily User Distribution by User Type");
    out.push_str(&format!(
        "Total Users: {}  |  Average Users: {:.2}\n\n",
        m.total_users, m.average_users
    ));
    out.push_str("Casual User\n");
    out.push_str(&category_table(&report.casual_by_day));
    out.push_str("\nRegistered User\n");
    out.push_str(&category_table(&report.registered_by_day));

    section(&mut out, "Impact of Weather and Seasons on Bike Sharing Usage");
    out.push_str("Number of User by Weather\n");
    out.push_str(&category_table(&report.by_weather));
    out.push_str("\nNumber of User by Season\n");
    out.push_str(&category_table(&report.by_season));

    section(&mut out, "Best Customer Based on RFM Parameters (day)");
    let s = &report.rfm_summary;
    out.push_str(&format!("Average Recency (days): {:.1}\n", s.average_recency));
    out.push_str("By Recency (days)\n");
    out.push_str(&rfm_table(&top_by_recency(&report.rfm, TOP_N), |r| {
        r.recency.to_string()
    }));
    out.push_str(&format!("\nAverage Frequency: {:.2}\n", s.average_frequency));
    out.push_str("By Frequency\n");
    out.push_str(&rfm_table(&top_by_frequency(&report.rfm, TOP_N), |r| {
        r.frequency.to_string()
    }));
    out.push_str(&format!("\nAverage Monetary: {:.2}\n", s.average_monetary));
    out.push_str("By Monetary\n");
    out.push_str(&rfm_table(&top_by_monetary(&report.rfm, TOP_N), |r| {
        format_thousands(r.monetary)
    }));

    out
}

fn section(out: &mut String, title: &str) {
    out.push_str(&format!("\n== {} ==\n", title));
}

fn category_table(rows: &[CategoryTotal]) -> String {
    let pairs: Vec<(&str, String)> = rows
        .iter()
        .map(|r| (r.label.as_str(), format_thousands(r.total)))
        .collect();
    table(&pairs)
}

fn rfm_table(rows: &[RfmRow], value: impl Fn(&RfmRow) -> String) -> String {
    let pairs: Vec<(&str, String)> = rows.iter().map(|r| (r.day.as_str(), value(r))).collect();
    table(&pairs)
}

/// Two aligned columns, label then value.
fn table(rows: &[(&str, String)]) -> String {
    if rows.is_empty() {
        return "  (no data)\n".to_string();
    }

    let label_width = rows.iter().map(|(l, _)| l.chars().count()).max().unwrap_or(0);
    let value_width = rows.iter().map(|(_, v)| v.len()).max().unwrap_or(0);

    rows.iter()
        .map(|(label, value)| {
            format!(
                "  {:<lw$}  {:>vw$}\n",
                label,
                value,
                lw = label_width,
                vw = value_width
            )
        })
        .collect()
}
