//! Inclusive date-range selection over loaded records.

use anyhow::{Result, bail};
use chrono::NaiveDate;
use serde::Serialize;

use crate::records::DayRecord;

/// Inclusive `[start, end]` calendar range.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct DateRange {
    pub start: NaiveDate,
    pub end: NaiveDate,
}

impl DateRange {
    /// Returns an error if `start` is after `end`.
    pub fn new(start: NaiveDate, end: NaiveDate) -> Result<Self> {
        if start > end {
            bail!("start date {} is after end date {}", start, end);
        }
        Ok(Self { start, end })
    }

    /// The earliest and latest dates present, or `None` for no records.
    pub fn of(records: &[DayRecord]) -> Option<Self> {
        let start = records.iter().map(|r| r.date).min()?;
        let end = records.iter().map(|r| r.date).max()?;
        Some(Self { start, end })
    }

    /// True when the two ranges share at least one day.
    pub fn overlaps(&self, other: DateRange) -> bool {
        self.start <= other.end && other.start <= self.end
    }

    /// Restricts this range to `bounds`.
    ///
    /// Each endpoint is clamped into `bounds` on its own; callers check
    /// [`DateRange::overlaps`] first, or a disjoint range collapses onto one
    /// boundary date.
    pub fn clamp_to(self, bounds: DateRange) -> Self {
        let start = self.start.clamp(bounds.start, bounds.end);
        let end = self.end.clamp(bounds.start, bounds.end);
        Self { start, end }
    }

    pub fn contains(&self, date: NaiveDate) -> bool {
        self.start <= date && date <= self.end
    }

    /// Number of calendar days covered, endpoints included.
    pub fn days(&self) -> i64 {
        (self.end - self.start).num_days() + 1
    }
}

/// Resolves optional user bounds against the data.
///
/// Missing endpoints default to the data's own min/max and the result is
/// clamped into that range. A request that shares no day with the data is
/// an error.
pub fn select_range(
    records: &[DayRecord],
    start: Option<NaiveDate>,
    end: Option<NaiveDate>,
) -> Result<DateRange> {
    let Some(bounds) = DateRange::of(records) else {
        bail!("No records loaded; cannot select a date range");
    };
    let requested = DateRange::new(start.unwrap_or(bounds.start), end.unwrap_or(bounds.end))?;
    if !requested.overlaps(bounds) {
        bail!(
            "No data in range {} to {}; records cover {} to {}",
            requested.start,
            requested.end,
            bounds.start,
            bounds.end
        );
    }
    Ok(requested.clamp_to(bounds))
}

/// Parses a `YYYY-MM-DD` date argument.
pub fn parse_date(s: &str) -> Result<NaiveDate> {
    NaiveDate::parse_from_str(s.trim(), "%Y-%m-%d")
        .map_err(|e| anyhow::anyhow!("Invalid date '{}': {}", s, e))
}

/// Keeps the records whose date falls inside `range`, preserving order.
pub fn filter_by_date(records: &[DayRecord], range: DateRange) -> Vec<DayRecord> {
    records
        .iter()
        .filter(|r| range.contains(r.date))
        .cloned()
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn records() -> Vec<DayRecord> {
        (1..=10)
            .map(|d| DayRecord::new(d, date(2011, 1, d), "Monday", "Winter", "Clear", 1, 2))
            .collect()
    }

    #[test]
    fn test_filter_inclusive_bounds() {
        let range = DateRange::new(date(2011, 1, 3), date(2011, 1, 5)).unwrap();
        let filtered = filter_by_date(&records(), range);

        let instants: Vec<_> = filtered.iter().map(|r| r.instant).collect();
        assert_eq!(instants, vec![3, 4, 5]);
    }

    #[test]
    fn test_new_rejects_inverted_range() {
        assert!(DateRange::new(date(2011, 1, 5), date(2011, 1, 3)).is_err());
    }

    #[test]
    fn test_of_records() {
        let range = DateRange::of(&records()).unwrap();
        assert_eq!(range.start, date(2011, 1, 1));
        assert_eq!(range.end, date(2011, 1, 10));
        assert_eq!(range.days(), 10);
    }

    #[test]
    fn test_of_empty() {
        assert_eq!(DateRange::of(&[]), None);
    }

    #[test]
    fn test_clamp_to_bounds() {
        let bounds = DateRange::of(&records()).unwrap();
        let wide = DateRange::new(date(2010, 12, 1), date(2011, 2, 1)).unwrap();

        assert_eq!(wide.clamp_to(bounds), bounds);

        let inner = DateRange::new(date(2011, 1, 2), date(2011, 1, 4)).unwrap();
        assert_eq!(inner.clamp_to(bounds), inner);
    }

    #[test]
    fn test_select_range_defaults_and_clamps() {
        let data = records();

        let all = select_range(&data, None, None).unwrap();
        assert_eq!(all, DateRange::of(&data).unwrap());

        let tail = select_range(&data, Some(date(2011, 1, 8)), Some(date(2011, 3, 1))).unwrap();
        assert_eq!(tail.start, date(2011, 1, 8));
        assert_eq!(tail.end, date(2011, 1, 10));
    }

    #[test]
    fn test_select_range_errors() {
        assert!(select_range(&[], None, None).is_err());
        assert!(select_range(&records(), Some(date(2011, 1, 5)), Some(date(2011, 1, 2))).is_err());
    }

    #[test]
    fn test_select_range_outside_data_errors() {
        let data = records();

        let later = select_range(&data, Some(date(2013, 1, 1)), Some(date(2013, 2, 1)));
        let err = later.unwrap_err().to_string();
        assert!(err.contains("No data in range"), "{}", err);

        let earlier = select_range(&data, Some(date(2010, 1, 1)), Some(date(2010, 12, 31)));
        assert!(earlier.is_err());

        // only the end is given and it falls before the data
        assert!(select_range(&data, None, Some(date(2010, 6, 1))).is_err());
    }

    #[test]
    fn test_select_range_touching_boundary() {
        let data = records();

        let edge = select_range(&data, Some(date(2011, 1, 10)), Some(date(2011, 5, 1))).unwrap();
        assert_eq!(edge.start, date(2011, 1, 10));
        assert_eq!(edge.end, date(2011, 1, 10));
    }

    #[test]
    fn test_overlaps() {
        let a = DateRange::new(date(2011, 1, 1), date(2011, 1, 5)).unwrap();
        let b = DateRange::new(date(2011, 1, 5), date(2011, 1, 9)).unwrap();
        let c = DateRange::new(date(2011, 1, 6), date(2011, 1, 9)).unwrap();

        assert!(a.overlaps(b));
        assert!(b.overlaps(a));
        assert!(!a.overlaps(c));
    }

    #[test]
    fn test_parse_date() {
        assert_eq!(parse_date("2011-01-03").unwrap(), date(2011, 1, 3));
        assert!(parse_date("03/01/2011").is_err());
    }
}
