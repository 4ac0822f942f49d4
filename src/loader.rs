//! CSV loader for the cleaned daily dataset.

use anyhow::{Context, Result};
use std::fs::File;
use std::io::Read;
use std::path::Path;
use tracing::{debug, info, warn};

use crate::fetch::{BasicClient, fetch_bytes};
use crate::records::DayRecord;

/// Deserializes daily records from CSV and sorts them by date.
///
/// # Errors
///
/// Returns an error if a row is missing a required column or a value fails to
/// parse (e.g. a date not in `YYYY-MM-DD` form).
pub fn load_day_records<R: Read>(reader: R) -> Result<Vec<DayRecord>> {
    let mut rdr = csv::Reader::from_reader(reader);
    let mut rows = Vec::new();

    for (i, result) in rdr.deserialize().enumerate() {
        let record: DayRecord = result.with_context(|| format!("Invalid record at row {}", i + 1))?;
        rows.push(record);
    }

    let inconsistent = rows.iter().filter(|r| !r.is_consistent()).count();
    if inconsistent > 0 {
        warn!(
            rows = inconsistent,
            "Records where total_user != casual_user + registered_user"
        );
    }

    rows.sort_by_key(|r| r.date);
    debug!(rows = rows.len(), inconsistent, "Day records loaded");

    Ok(rows)
}

pub fn load_day_records_from_bytes(bytes: &[u8]) -> Result<Vec<DayRecord>> {
    load_day_records(bytes)
}

#[tracing::instrument(skip(path), fields(path = %path.as_ref().display()))]
pub fn load_day_records_from_path<P: AsRef<Path>>(path: P) -> Result<Vec<DayRecord>> {
    let file = File::open(path.as_ref())
        .with_context(|| format!("Failed to open {}", path.as_ref().display()))?;
    load_day_records(file).with_context(|| format!("Failed to read {}", path.as_ref().display()))
}

/// Whether `source` names an HTTP(S) URL rather than a local path.
pub fn is_remote(source: &str) -> bool {
    let lower = source.trim_start().to_ascii_lowercase();
    lower.starts_with("http://") || lower.starts_with("https://")
}

/// Loads raw bytes from a local file path or fetches them over HTTP.
#[tracing::instrument]
pub async fn read_source(source: &str) -> Result<Vec<u8>> {
    let bytes = if is_remote(source) {
        let client = BasicClient::new()?;
        fetch_bytes(&client, source)
            .await
            .with_context(|| format!("Failed to fetch {}", source))?
    } else {
        std::fs::read(source).with_context(|| format!("Failed to read {}", source))?
    };
    info!(bytes = bytes.len(), "Source loaded");
    Ok(bytes)
}

/// Reads `source` and parses it into date-sorted records.
pub async fn load_source(source: &str) -> Result<Vec<DayRecord>> {
    let bytes = read_source(source).await?;
    load_day_records_from_bytes(&bytes).with_context(|| format!("Failed to parse {}", source))
}
