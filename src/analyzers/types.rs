//! Data types produced by the aggregation pipeline.

use chrono::NaiveDate;
use serde::Serialize;

/// Counts summed within one calendar-day bucket.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DailyTotal {
    pub date: NaiveDate,
    pub casual_user: u64,
    pub registered_user: u64,
    pub total_user: u64,
    /// Number of input rows folded into this bucket.
    pub records: usize,
}

impl DailyTotal {
    /// CSV header, in field order.
    pub const COLUMNS: [&'static str; 5] =
        ["date", "casual_user", "registered_user", "total_user", "records"];
}

/// A category label with its summed count.
///
/// Shared by the day-of-week, weather and season groupings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CategoryTotal {
    pub label: String,
    pub total: u64,
}

impl CategoryTotal {
    pub const COLUMNS: [&'static str; 2] = ["label", "total"];
}

/// Recency / frequency / monetary scores for one day-of-week group.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RfmRow {
    pub day: String,
    /// Whole days between the group's latest date and the latest date overall.
    pub recency: i64,
    /// Distinct row identifiers in the group.
    pub frequency: usize,
    /// Summed `total_user` in the group.
    pub monetary: u64,
}

impl RfmRow {
    pub const COLUMNS: [&'static str; 4] = ["day", "recency", "frequency", "monetary"];
}

/// Headline user counts for the selected window.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DailyUserMetrics {
    pub total_casual: u64,
    pub total_registered: u64,
    pub total_users: u64,
    pub average_users: f64,
}

/// Averages across the RFM table.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RfmSummary {
    pub average_recency: f64,
    pub average_frequency: f64,
    pub average_monetary: f64,
}

/// Everything the report renderer needs, in one serializable bundle.
#[derive(Debug, Clone, Serialize)]
pub struct DashboardReport {
    pub start: NaiveDate,
    pub end: NaiveDate,
    pub daily_totals: Vec<DailyTotal>,
    pub casual_by_day: Vec<CategoryTotal>,
    pub registered_by_day: Vec<CategoryTotal>,
    pub by_weather: Vec<CategoryTotal>,
    pub by_season: Vec<CategoryTotal>,
    pub rfm: Vec<RfmRow>,
    pub metrics: DailyUserMetrics,
    pub rfm_summary: RfmSummary,
}
