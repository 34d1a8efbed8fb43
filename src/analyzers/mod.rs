//! Reading aggregation and pollutant classification.
//!
//! This module computes overall pollutant averages, buckets readings by
//! local hour of day, picks the dominant pollutant for each bucket, and
//! assembles the results into a serializable report.

pub mod aggregate;
pub mod analyzer;
pub mod category;
pub mod types;
pub mod utility;
