use crate::analyzers::aggregate::Aggregator;
use crate::analyzers::types::{DailyUserMetrics, DashboardReport, RfmSummary};
use crate::filter::{DateRange, filter_by_date};
use crate::records::DayRecord;
use tracing::{info, warn};

/// Filters `records` to `range`, runs every aggregation and bundles the results.
pub fn build_report(records: &[DayRecord], range: DateRange) -> DashboardReport {
    let selected = filter_by_date(records, range);
    if selected.is_empty() {
        warn!(start = %range.start, end = %range.end, "No records in selected range");
    }

    let agg = Aggregator::new(&selected);

    let daily_totals = agg.daily_totals();
    let rfm = agg.rfm();
    let metrics = DailyUserMetrics::from_daily(&daily_totals);
    let rfm_summary = RfmSummary::from_rows(&rfm);

    let report = DashboardReport {
        start: range.start,
        end: range.end,
        casual_by_day: agg.casual_by_day(),
        registered_by_day: agg.registered_by_day(),
        by_weather: agg.by_weather(),
        by_season: agg.by_season(),
        daily_totals,
        rfm,
        metrics,
        rfm_summary,
    };

    info!(
        start = %report.start,
        end = %report.end,
        rows = selected.len(),
        total_users = report.metrics.total_users,
        "Report built"
    );

    report
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn date(d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2011, 1, d).unwrap()
    }

    fn records() -> Vec<DayRecord> {
        vec![
            DayRecord::new(1, date(1), "Saturday", "Winter", "Clear", 100, 900),
            DayRecord::new(2, date(2), "Sunday", "Winter", "Clear", 50, 450),
            DayRecord::new(3, date(3), "Monday", "Winter", "Mist", 30, 270),
            DayRecord::new(4, date(4), "Tuesday", "Winter", "Light Rain", 10, 90),
        ]
    }

    #[test]
    fn test_build_report_respects_range() {
        let range = DateRange::new(date(1), date(3)).unwrap();
        let report = build_report(&records(), range);

        assert_eq!(report.daily_totals.len(), 3);
        assert_eq!(report.metrics.total_users, 1800);
        assert_eq!(report.metrics.average_users, 600.0);
        assert_eq!(report.by_weather.len(), 2);
        assert_eq!(report.rfm.len(), 3);

        let monday = report.rfm.iter().find(|r| r.day == "Monday").unwrap();
        assert_eq!(monday.recency, 0);
    }

    #[test]
    fn test_build_report_empty_range() {
        let range = DateRange::new(date(20), date(25)).unwrap();
        let report = build_report(&records(), range);

        assert!(report.daily_totals.is_empty());
        assert!(report.rfm.is_empty());
        assert_eq!(report.metrics.total_users, 0);
        assert_eq!(report.rfm_summary.average_recency, 0.0);
    }
}
