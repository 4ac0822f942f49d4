//! Typed daily record loaded from the cleaned bike-sharing CSV.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// One row of the daily dataset.
///
/// Columns not named here (year, month, holiday, temperature, ...) are
/// ignored when the CSV is deserialized.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct DayRecord {
    pub instant: u32,
    pub date: NaiveDate,
    pub day: String,
    pub season: String,
    pub weather: String,
    pub casual_user: u64,
    pub registered_user: u64,
    pub total_user: u64,
}

impl DayRecord {
    /// Builds a record whose `total_user` is the sum of both user types.
    pub fn new(
        instant: u32,
        date: NaiveDate,
        day: &str,
        season: &str,
        weather: &str,
        casual_user: u64,
        registered_user: u64,
    ) -> Self {
        DayRecord {
            instant,
            date,
            day: day.to_string(),
            season: season.to_string(),
            weather: weather.to_string(),
            casual_user,
            registered_user,
            total_user: casual_user + registered_user,
        }
    }

    /// Whether `total_user == casual_user + registered_user`.
    pub fn is_consistent(&self) -> bool {
        self.total_user == self.casual_user + self.registered_user
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_derives_total() {
        let date = NaiveDate::from_ymd_opt(2011, 1, 1).unwrap();
        let r = DayRecord::new(1, date, "Saturday", "Winter", "Clear", 100, 900);

        assert_eq!(r.total_user, 1000);
        assert!(r.is_consistent());
    }

    #[test]
    fn test_inconsistent_record() {
        let date = NaiveDate::from_ymd_opt(2011, 1, 1).unwrap();
        let mut r = DayRecord::new(1, date, "Saturday", "Winter", "Clear", 100, 900);
        r.total_user = 999;

        assert!(!r.is_consistent());
    }
}
