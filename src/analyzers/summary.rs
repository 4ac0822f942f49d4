//! Headline metrics and top-N slices derived from the aggregator tables.

use crate::analyzers::types::{DailyTotal, DailyUserMetrics, RfmRow, RfmSummary};
use crate::analyzers::utility::{mean, round_to};

impl DailyUserMetrics {
    /// Totals per user type plus the mean daily `total_user`.
    pub fn from_daily(daily: &[DailyTotal]) -> Self {
        let totals: Vec<f64> = daily.iter().map(|d| d.total_user as f64).collect();

        DailyUserMetrics {
            total_casual: daily.iter().map(|d| d.casual_user).sum(),
            total_registered: daily.iter().map(|d| d.registered_user).sum(),
            total_users: daily.iter().map(|d| d.total_user).sum(),
            average_users: mean(&totals),
        }
    }
}

impl RfmSummary {
    /// Recency is rounded to 1 decimal, frequency and monetary to 2.
    pub fn from_rows(rows: &[RfmRow]) -> Self {
        let recency: Vec<f64> = rows.iter().map(|r| r.recency as f64).collect();
        let frequency: Vec<f64> = rows.iter().map(|r| r.frequency as f64).collect();
        let monetary: Vec<f64> = rows.iter().map(|r| r.monetary as f64).collect();

        RfmSummary {
            average_recency: round_to(mean(&recency), 1),
            average_frequency: round_to(mean(&frequency), 2),
            average_monetary: round_to(mean(&monetary), 2),
        }
    }
}

/// The `n` most recently active groups, lowest recency first.
pub fn top_by_recency(rows: &[RfmRow], n: usize) -> Vec<RfmRow> {
    let mut sorted = rows.to_vec();
    sorted.sort_by_key(|r| r.recency);
    sorted.truncate(n);
    sorted
}

/// The `n` groups with the most distinct rows.
pub fn top_by_frequency(rows: &[RfmRow], n: usize) -> Vec<RfmRow> {
    let mut sorted = rows.to_vec();
    sorted.sort_by(|a, b| b.frequency.cmp(&a.frequency));
    sorted.truncate(n);
    sorted
}

/// The `n` groups with the largest summed volume.
pub fn top_by_monetary(rows: &[RfmRow], n: usize) -> Vec<RfmRow> {
    let mut sorted = rows.to_vec();
    sorted.sort_by(|a, b| b.monetary.cmp(&a.monetary));
    sorted.truncate(n);
    sorted
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn rfm(day: &str, recency: i64, frequency: usize, monetary: u64) -> RfmRow {
        RfmRow {
            day: day.to_string(),
            recency,
            frequency,
            monetary,
        }
    }

    fn rows() -> Vec<RfmRow> {
        vec![
            rfm("Friday", 2, 3, 9000),
            rfm("Monday", 6, 3, 7000),
            rfm("Saturday", 1, 4, 8000),
            rfm("Sunday", 0, 4, 6000),
            rfm("Thursday", 3, 3, 10000),
            rfm("Tuesday", 5, 3, 5000),
            rfm("Wednesday", 4, 3, 4000),
        ]
    }

    #[test]
    fn test_daily_metrics() {
        let day = |d: u32, c: u64, r: u64| DailyTotal {
            date: NaiveDate::from_ymd_opt(2011, 1, d).unwrap(),
            casual_user: c,
            registered_user: r,
            total_user: c + r,
            records: 1,
        };
        let daily = vec![day(1, 100, 900), day(2, 50, 450), day(3, 30, 270)];

        let m = DailyUserMetrics::from_daily(&daily);

        assert_eq!(m.total_casual, 180);
        assert_eq!(m.total_registered, 1620);
        assert_eq!(m.total_users, 1800);
        assert_eq!(m.average_users, 600.0);
    }

    #[test]
    fn test_daily_metrics_empty() {
        let m = DailyUserMetrics::from_daily(&[]);
        assert_eq!(m.total_users, 0);
        assert_eq!(m.average_users, 0.0);
    }

    #[test]
    fn test_rfm_summary_rounding() {
        let s = RfmSummary::from_rows(&rows());

        // recency mean 21/7 = 3.0, frequency 23/7 = 3.2857..., monetary 49000/7 = 7000
        assert_eq!(s.average_recency, 3.0);
        assert_eq!(s.average_frequency, 3.29);
        assert_eq!(s.average_monetary, 7000.0);
    }

    #[test]
    fn test_top_by_recency() {
        let top = top_by_recency(&rows(), 5);
        let days: Vec<_> = top.iter().map(|r| r.day.as_str()).collect();

        assert_eq!(days, vec!["Sunday", "Saturday", "Friday", "Thursday", "Wednesday"]);
    }

    #[test]
    fn test_top_by_monetary() {
        let top = top_by_monetary(&rows(), 3);
        let values: Vec<_> = top.iter().map(|r| r.monetary).collect();

        assert_eq!(values, vec![10000, 9000, 8000]);
    }

    #[test]
    fn test_top_by_frequency() {
        let top = top_by_frequency(&rows(), 5);

        assert_eq!(top.len(), 5);
        assert_eq!(top[0].frequency, 4);
        assert_eq!(top[1].frequency, 4);
        assert!(top.windows(2).all(|w| w[0].frequency >= w[1].frequency));
    }

    #[test]
    fn test_top_n_larger_than_rows() {
        assert_eq!(top_by_monetary(&rows(), 20).len(), 7);
        assert!(top_by_recency(&[], 5).is_empty());
    }
}
