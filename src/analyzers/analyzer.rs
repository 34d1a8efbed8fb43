use tracing::info;

use crate::analyzers::aggregate::{dominant_by_hour, hourly_summaries, overall_average};
use crate::analyzers::category::pm25_category;
use crate::analyzers::types::AnalysisReport;
use crate::reading::Reading;

/// Runs every aggregation over `readings` and collects the results.
pub fn analyze(readings: &[Reading]) -> AnalysisReport {
    let averages = overall_average(readings);
    let dominant_by_hour = dominant_by_hour(readings);
    let hours = hourly_summaries(readings);

    info!(
        readings = readings.len(),
        hours = hours.len(),
        pm25 = averages.pm25,
        co2 = averages.co2,
        "Aggregation complete"
    );

    AnalysisReport {
        reading_count: readings.len(),
        averages,
        overall_category: pm25_category(averages.pm25),
        dominant_by_hour,
        hours,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::reading::Pollutant;
    use chrono::DateTime;

    #[test]
    fn test_analyze_empty_batch() {
        let report = analyze(&[]);
        assert_eq!(report.reading_count, 0);
        assert_eq!(report.averages.pm25, 0.0);
        assert_eq!(report.averages.co2, 0.0);
        assert_eq!(report.overall_category, "Good");
        assert!(report.dominant_by_hour.is_empty());
        assert!(report.hours.is_empty());
    }

    #[test]
    fn test_analyze_report_matches_parts() {
        let ts = |s| DateTime::parse_from_rfc3339(s).unwrap();
        let readings = vec![
            Reading::new("s1", ts("2024-03-01T08:00:00Z"), 10.0, 5.0),
            Reading::new("s1", ts("2024-03-01T09:00:00Z"), 5.0, 5.0),
        ];
        let report = analyze(&readings);

        assert_eq!(report.reading_count, 2);
        assert_eq!(report.averages.pm25, 7.5);
        assert_eq!(report.dominant_by_hour[&8], Pollutant::Pm25);
        assert_eq!(report.dominant_by_hour[&9], Pollutant::Co2);
        assert_eq!(report.hours.len(), 2);

        let json = serde_json::to_value(&report).unwrap();
        assert_eq!(json["averages"]["pm25"], 7.5);
        assert_eq!(json["dominant_by_hour"]["9"], "co2");
    }
}
