use crate::analyzers::types::{CategoryTotal, DailyTotal, RfmRow};
use crate::records::DayRecord;
use chrono::NaiveDate;
use std::collections::{BTreeMap, HashMap, HashSet};

/// Read-only view over a filtered slice of [`DayRecord`]s.
///
/// Every query recomputes from the borrowed rows, so repeated calls return
/// identical tables and the aggregator can be shared across threads.
#[derive(Debug, Clone, Copy)]
pub struct Aggregator<'a> {
    records: &'a [DayRecord],
}

impl<'a> Aggregator<'a> {
    pub fn new(records: &'a [DayRecord]) -> Self {
        Self { records }
    }

    /// Buckets rows by calendar date and sums the counts in each bucket.
    ///
    /// Rows come back in ascending date order; dates with no input rows are
    /// not filled in.
    pub fn daily_totals(&self) -> Vec<DailyTotal> {
        let mut buckets: BTreeMap<NaiveDate, DailyTotal> = BTreeMap::new();

        for r in self.records {
            let bucket = buckets.entry(r.date).or_insert_with(|| DailyTotal {
                date: r.date,
                casual_user: 0,
                registered_user: 0,
                total_user: 0,
                records: 0,
            });
            bucket.casual_user += r.casual_user;
            bucket.registered_user += r.registered_user;
            bucket.total_user += r.total_user;
            bucket.records += 1;
        }

        buckets.into_values().collect()
    }

    /// Casual users summed per day-of-week, largest first.
    pub fn casual_by_day(&self) -> Vec<CategoryTotal> {
        sum_by(self.records, |r| &r.day, |r| r.casual_user)
    }

    /// Registered users summed per day-of-week, largest first.
    pub fn registered_by_day(&self) -> Vec<CategoryTotal> {
        sum_by(self.records, |r| &r.day, |r| r.registered_user)
    }

    /// Total users summed per weather label, largest first.
    pub fn by_weather(&self) -> Vec<CategoryTotal> {
        sum_by(self.records, |r| &r.weather, |r| r.total_user)
    }

    /// Total users summed per season label, largest first.
    pub fn by_season(&self) -> Vec<CategoryTotal> {
        sum_by(self.records, |r| &r.season, |r| r.total_user)
    }

    /// Scores each day-of-week group by recency, frequency and monetary volume.
    ///
    /// Recency is measured against the latest date in the whole input, so the
    /// group holding that date scores 0. Rows are ordered by day label.
    pub fn rfm(&self) -> Vec<RfmRow> {
        let Some(latest) = self.records.iter().map(|r| r.date).max() else {
            return Vec::new();
        };

        struct Acc {
            last_seen: NaiveDate,
            instants: HashSet<u32>,
            monetary: u64,
        }

        let mut groups: BTreeMap<&str, Acc> = BTreeMap::new();

        for r in self.records {
            let acc = groups.entry(r.day.as_str()).or_insert_with(|| Acc {
                last_seen: r.date,
                instants: HashSet::new(),
                monetary: 0,
            });
            acc.last_seen = acc.last_seen.max(r.date);
            acc.instants.insert(r.instant);
            acc.monetary += r.total_user;
        }

        groups
            .into_iter()
            .map(|(day, acc)| RfmRow {
                day: day.to_string(),
                recency: (latest - acc.last_seen).num_days(),
                frequency: acc.instants.len(),
                monetary: acc.monetary,
            })
            .collect()
    }
}

/// Sums `value` per distinct `key` and sorts the groups by sum, descending.
///
/// Groups keep first-seen order before the stable sort, so equal sums stay in
/// the order their labels first appeared.
fn sum_by<K, V>(records: &[DayRecord], key: K, value: V) -> Vec<CategoryTotal>
where
    K: Fn(&DayRecord) -> &String,
    V: Fn(&DayRecord) -> u64,
{
    let mut slots: HashMap<&str, usize> = HashMap::new();
    let mut out: Vec<CategoryTotal> = Vec::new();

    for r in records {
        let label = key(r);
        let idx = *slots.entry(label.as_str()).or_insert_with(|| {
            out.push(CategoryTotal {
                label: label.clone(),
                total: 0,
            });
            out.len() - 1
        });
        out[idx].total += value(r);
    }

    out.sort_by(|a, b| b.total.cmp(&a.total));
    out
}
