//! Data types produced by the aggregation pipeline.

use chrono::{DateTime, FixedOffset};
use serde::Serialize;
use std::collections::BTreeMap;

use crate::reading::Pollutant;

/// Mean concentration of each pollutant over a set of readings.
///
/// Serializes as `{"pm25": .., "co2": ..}`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize)]
pub struct PollutantAverages {
    pub pm25: f64,
    pub co2: f64,
}

impl PollutantAverages {
    pub fn new(pm25: f64, co2: f64) -> Self {
        PollutantAverages { pm25, co2 }
    }

    pub fn get(&self, pollutant: Pollutant) -> f64 {
        match pollutant {
            Pollutant::Pm25 => self.pm25,
            Pollutant::Co2 => self.co2,
        }
    }

    /// `Pm25` only when its mean is strictly greater; equal means go to `Co2`.
    pub fn dominant(&self) -> Pollutant {
        if self.pm25 > self.co2 {
            Pollutant::Pm25
        } else {
            Pollutant::Co2
        }
    }

    /// The averages keyed by pollutant, in [`Pollutant::ALL`] order.
    pub fn as_map(&self) -> BTreeMap<Pollutant, f64> {
        Pollutant::ALL.iter().map(|p| (*p, self.get(*p))).collect()
    }
}

/// Statistics for one hour-of-day bucket.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct HourlySummary {
    pub hour: u32,
    pub count: usize,
    /// Earliest reading that fell into this bucket.
    pub first_seen: DateTime<FixedOffset>,
    pub averages: PollutantAverages,
    pub pm25_stddev: f64,
    pub co2_stddev: f64,
    pub dominant: Pollutant,
    pub pm25_category: &'static str,
}

/// Complete analysis of a batch of readings.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AnalysisReport {
    pub reading_count: usize,
    pub averages: PollutantAverages,
    pub overall_category: &'static str,
    pub dominant_by_hour: BTreeMap<u32, Pollutant>,
    pub hours: Vec<HourlySummary>,
}
