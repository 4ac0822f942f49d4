//! Chart rendering for the dashboard report using Plotters.
//!
//! Produces one PNG per dashboard panel: the daily-users line chart, the
//! per-category bar charts, and the three top-N RFM bar charts.

use anyhow::{Context, Result};
use plotters::prelude::*;
use std::fs;
use std::path::Path;
use tracing::{debug, info};

use crate::analyzers::summary::{top_by_frequency, top_by_monetary, top_by_recency};
use crate::analyzers::types::{CategoryTotal, DailyTotal, DashboardReport, RfmRow};

const CHART_COLOR: RGBColor = RGBColor(0x90, 0xCA, 0xF9);
const TOP_N: usize = 5;

/// Line chart of `total_user` per day, one point per daily bucket.
pub fn create_daily_chart(daily: &[DailyTotal], output_path: &Path) -> Result<()> {
    let max = daily.iter().map(|d| d.total_user).max().unwrap_or(0) as f64;
    let n = daily.len() as f64;

    let root = BitMapBackend::new(output_path, (1200, 600)).into_drawing_area();
    root.fill(&WHITE)?;

    let mut chart = ChartBuilder::on(&root)
        .caption("Daily Users", ("sans-serif", 30))
        .margin(10)
        .x_label_area_size(50)
        .y_label_area_size(70)
        .build_cartesian_2d(-0.5f64..(n - 0.5).max(0.5), 0f64..(max * 1.1).max(1.0))?;

    let date_at = |x: &f64| {
        let i = x.round();
        if i < 0.0 || (x - i).abs() > 1e-6 {
            return String::new();
        }
        daily
            .get(i as usize)
            .map(|d| d.date.format("%Y-%m-%d").to_string())
            .unwrap_or_default()
    };

    chart
        .configure_mesh()
        .x_labels(8)
        .x_label_formatter(&date_at)
        .y_desc("Total users")
        .axis_desc_style(("sans-serif", 15))
        .draw()?;

    let points: Vec<(f64, f64)> = daily
        .iter()
        .enumerate()
        .map(|(i, d)| (i as f64, d.total_user as f64))
        .collect();

    chart.draw_series(LineSeries::new(points.iter().copied(), CHART_COLOR.stroke_width(2)))?;
    chart.draw_series(
        points
            .iter()
            .map(|&p| Circle::new(p, 3, CHART_COLOR.filled())),
    )?;

    root.present()?;
    debug!(path = %output_path.display(), points = points.len(), "Daily chart saved");

    Ok(())
}

/// Vertical bar chart with one labelled bar per `(label, value)` pair.
pub fn create_bar_chart(
    title: &str,
    y_desc: &str,
    bars: &[(String, f64)],
    output_path: &Path,
) -> Result<()> {
    let max = bars.iter().map(|(_, v)| *v).fold(0.0, f64::max);
    let n = bars.len() as f64;

    let root = BitMapBackend::new(output_path, (800, 500)).into_drawing_area();
    root.fill(&WHITE)?;

    let mut chart = ChartBuilder::on(&root)
        .caption(title, ("sans-serif", 26))
        .margin(10)
        .x_label_area_size(50)
        .y_label_area_size(70)
        .build_cartesian_2d(-0.5f64..(n - 0.5).max(0.5), 0f64..(max * 1.1).max(1.0))?;

    let label_at = |x: &f64| {
        let i = x.round();
        if i < 0.0 || (x - i).abs() > 1e-6 {
            return String::new();
        }
        bars.get(i as usize)
            .map(|(label, _)| label.clone())
            .unwrap_or_default()
    };

    chart
        .configure_mesh()
        .disable_x_mesh()
        .x_labels(bars.len().max(1))
        .x_label_formatter(&label_at)
        .y_desc(y_desc)
        .axis_desc_style(("sans-serif", 15))
        .draw()?;

    chart.draw_series(bars.iter().enumerate().map(|(i, (_, value))| {
        let x = i as f64;
        Rectangle::new([(x - 0.4, 0.0), (x + 0.4, *value)], CHART_COLOR.filled())
    }))?;

    root.present()?;
    debug!(path = %output_path.display(), bars = bars.len(), "Bar chart saved");

    Ok(())
}

fn category_bars(rows: &[CategoryTotal]) -> Vec<(String, f64)> {
    rows.iter().map(|r| (r.label.clone(), r.total as f64)).collect()
}

fn rfm_bars(rows: &[RfmRow], value: impl Fn(&RfmRow) -> f64) -> Vec<(String, f64)> {
    rows.iter().map(|r| (r.day.clone(), value(r))).collect()
}

/// Draws every dashboard chart for `report` into `dir`.
///
/// Returns the paths written, in a fixed order.
pub fn generate_charts(dir: &Path, report: &DashboardReport) -> Result<Vec<String>> {
    fs::create_dir_all(dir).with_context(|| format!("Failed to create {}", dir.display()))?;

    let mut written = Vec::new();
    let mut record = |name: &str| {
        let path = dir.join(name);
        written.push(path.display().to_string());
        path
    };

    create_daily_chart(&report.daily_totals, &record("daily_users.png"))?;

    create_bar_chart(
        "Casual User",
        "Users",
        &category_bars(&report.casual_by_day),
        &record("casual_by_day.png"),
    )?;
    create_bar_chart(
        "Registered User",
        "Users",
        &category_bars(&report.registered_by_day),
        &record("registered_by_day.png"),
    )?;
    create_bar_chart(
        "Number of User by Weather",
        "Users",
        &category_bars(&report.by_weather),
        &record("by_weather.png"),
    )?;
    create_bar_chart(
        "Number of User by Season",
        "Users",
        &category_bars(&report.by_season),
        &record("by_season.png"),
    )?;

    create_bar_chart(
        "By Recency (days)",
        "Recency",
        &rfm_bars(&top_by_recency(&report.rfm, TOP_N), |r| r.recency as f64),
        &record("rfm_recency.png"),
    )?;
    create_bar_chart(
        "By Frequency",
        "Frequency",
        &rfm_bars(&top_by_frequency(&report.rfm, TOP_N), |r| r.frequency as f64),
        &record("rfm_frequency.png"),
    )?;
    create_bar_chart(
        "By Monetary",
        "Monetary",
        &rfm_bars(&top_by_monetary(&report.rfm, TOP_N), |r| r.monetary as f64),
        &record("rfm_monetary.png"),
    )?;

    info!(dir = %dir.display(), files = written.len(), "Charts generated");
    Ok(written)
}
