use chrono::{DateTime, FixedOffset, NaiveDate, Timelike};
use serde::{Deserialize, Deserializer, Serialize};
use std::fmt;

use crate::error::{AirQualityError, Result};

/// A single air-quality sample as reported by a sensor.
///
/// The timestamp keeps the offset it was recorded with, so [`Reading::hour`]
/// is the sensor's local hour rather than the UTC hour.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Reading {
    #[serde(default, deserialize_with = "null_as_empty")]
    pub sensor_id: String,
    pub timestamp: DateTime<FixedOffset>,
    pub pm25: f64,
    pub co2: f64,
}

impl Reading {
    pub fn new(
        sensor_id: impl Into<String>,
        timestamp: DateTime<FixedOffset>,
        pm25: f64,
        co2: f64,
    ) -> Self {
        Reading {
            sensor_id: sensor_id.into(),
            timestamp,
            pm25,
            co2,
        }
    }

    /// Hour of day (0-23) in the timestamp's own offset.
    pub fn hour(&self) -> u32 {
        self.timestamp.hour()
    }

    /// Local calendar date and hour of day.
    pub fn date_hour(&self) -> (NaiveDate, u32) {
        (self.timestamp.date_naive(), self.timestamp.hour())
    }

    pub fn value(&self, pollutant: Pollutant) -> f64 {
        match pollutant {
            Pollutant::Pm25 => self.pm25,
            Pollutant::Co2 => self.co2,
        }
    }

    /// Rejects concentrations that are negative, NaN or infinite.
    pub fn validate(&self, format: &'static str) -> Result<()> {
        for pollutant in Pollutant::ALL {
            let value = self.value(pollutant);
            if !value.is_finite() || value < 0.0 {
                return Err(AirQualityError::parse(
                    format,
                    format!(
                        "sensor '{}' at {}: {} must be a non-negative number, got {}",
                        self.sensor_id,
                        self.timestamp.to_rfc3339(),
                        pollutant,
                        value
                    ),
                ));
            }
        }
        Ok(())
    }
}

/// Accepts a missing or `null` sensor id as an empty one.
fn null_as_empty<'de, D>(deserializer: D) -> std::result::Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    Option::<String>::deserialize(deserializer)
        .map(Option::unwrap_or_default)
}

/// The pollutants tracked per reading.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Pollutant {
    Pm25,
    Co2,
}

impl Pollutant {
    pub const ALL: [Pollutant; 2] = [Pollutant::Pm25, Pollutant::Co2];

    pub fn as_str(&self) -> &'static str {
        match self {
            Pollutant::Pm25 => "pm25",
            Pollutant::Co2 => "co2",
        }
    }
}

impl fmt::Display for Pollutant {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
