use chrono::NaiveDate;
use std::collections::BTreeMap;
use tracing::debug;

use crate::analyzers::category::pm25_category;
use crate::analyzers::types::{HourlySummary, PollutantAverages};
use crate::analyzers::utility::{mean, stddev, values_of};
use crate::reading::{Pollutant, Reading};

/// Mean PM2.5 and CO2 across every reading.
///
/// An empty slice yields zero for both pollutants rather than NaN.
pub fn overall_average(readings: &[Reading]) -> PollutantAverages {
    PollutantAverages::new(
        mean(values_of(readings, Pollutant::Pm25)),
        mean(values_of(readings, Pollutant::Co2)),
    )
}

/// Partitions readings by `key`, preserving input order within each bucket.
///
/// Buckets only exist for keys that at least one reading maps to.
pub fn group_by<K, F>(readings: &[Reading], key: F) -> BTreeMap<K, Vec<&Reading>>
where
    K: Ord,
    F: Fn(&Reading) -> K,
{
    let mut buckets: BTreeMap<K, Vec<&Reading>> = BTreeMap::new();
    for reading in readings {
        buckets.entry(key(reading)).or_default().push(reading);
    }
    buckets
}

fn bucket_averages(bucket: &[&Reading]) -> PollutantAverages {
    PollutantAverages::new(
        mean(values_of(bucket.iter().copied(), Pollutant::Pm25)),
        mean(values_of(bucket.iter().copied(), Pollutant::Co2)),
    )
}

/// Dominant pollutant for each local hour of day (0-23).
///
/// Readings from different days that share an hour land in the same bucket.
/// A bucket is labelled `pm25` only when its mean PM2.5 is strictly greater
/// than its mean CO2; ties go to `co2`.
pub fn dominant_by_hour(readings: &[Reading]) -> BTreeMap<u32, Pollutant> {
    group_by(readings, Reading::hour)
        .into_iter()
        .map(|(hour, bucket)| {
            let averages = bucket_averages(&bucket);
            let dominant = averages.dominant();
            debug!(
                hour,
                count = bucket.len(),
                pm25 = averages.pm25,
                co2 = averages.co2,
                %dominant,
                "Hour bucket classified"
            );
            (hour, dominant)
        })
        .collect()
}

/// Dominant pollutant keyed by local calendar date and hour.
///
/// Same tie-break as [`dominant_by_hour`], but readings from different days
/// stay in separate buckets.
pub fn dominant_by_date_hour(readings: &[Reading]) -> BTreeMap<(NaiveDate, u32), Pollutant> {
    group_by(readings, Reading::date_hour)
        .into_iter()
        .map(|(key, bucket)| (key, bucket_averages(&bucket).dominant()))
        .collect()
}

/// Per hour-of-day statistics, ordered by hour.
pub fn hourly_summaries(readings: &[Reading]) -> Vec<HourlySummary> {
    group_by(readings, Reading::hour)
        .into_iter()
        .filter_map(|(hour, bucket)| {
            let first_seen = bucket.iter().map(|r| r.timestamp).min()?;
            let averages = bucket_averages(&bucket);
            let pm25 = values_of(bucket.iter().copied(), Pollutant::Pm25);
            let co2 = values_of(bucket.iter().copied(), Pollutant::Co2);

            Some(HourlySummary {
                hour,
                count: bucket.len(),
                first_seen,
                averages,
                pm25_stddev: stddev(pm25, averages.pm25),
                co2_stddev: stddev(co2, averages.co2),
                dominant: averages.dominant(),
                pm25_category: pm25_category(averages.pm25),
            })
        })
        .collect()
}
