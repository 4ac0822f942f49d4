//! Daily usage aggregation.
//!
//! [`aggregate::Aggregator`] groups a filtered slice of daily records into
//! per-date, per-category and RFM tables; [`summary`] derives the headline
//! metrics and top-N slices shown in the report.

pub mod aggregate;
pub mod analyzer;
pub mod summary;
pub mod types;
pub mod utility;
