use air_quality_rater::analyzers::aggregate::{dominant_by_hour, overall_average};
use air_quality_rater::analyzers::analyzer::analyze;
use air_quality_rater::output::{save_to_csv, write_readings};
use air_quality_rater::parser::{
    InputFormat, parse_csv, parse_export_csv, parse_json, parse_readings,
};
use air_quality_rater::reading::Pollutant;

#[test]
fn test_full_pipeline() {
    let bytes = include_bytes!("fixtures/readings.json");
    let readings = parse_readings(bytes, None).expect("parse failed");
    let report = analyze(&readings);

    assert_eq!(report.reading_count, 5);
    assert_eq!(report.dominant_by_hour.len(), 3);
    assert_eq!(report.dominant_by_hour[&8], Pollutant::Pm25);
    assert_eq!(report.dominant_by_hour[&9], Pollutant::Co2);
    assert_eq!(report.dominant_by_hour[&17], Pollutant::Pm25);

    let tmp = tempfile::tempdir().unwrap();
    let dir = tmp.path().join("LogFile");
    let path = save_to_csv(&readings, &dir).unwrap();
    assert!(path.exists());
}

#[test]
fn test_json_and_csv_sources_agree() {
    let json = include_bytes!("fixtures/readings.json");
    let csv = include_bytes!("fixtures/readings.csv");
    let from_json = parse_json(json).unwrap();
    let from_csv = parse_csv(csv).unwrap();

    assert_eq!(from_json.len(), from_csv.len());
    for (j, c) in from_json.iter().zip(&from_csv) {
        assert_eq!(j.sensor_id, c.sensor_id);
        assert_eq!(j.timestamp, c.timestamp);
        assert!((j.pm25 - c.pm25).abs() < 1e-9);
        assert!((j.co2 - c.co2).abs() < 1e-9);
    }
    assert_eq!(from_csv[4].sensor_id, "");
    assert_eq!(InputFormat::sniff(csv), InputFormat::Csv);
}

#[test]
fn test_overall_average_matches_arithmetic_mean() {
    let json = include_bytes!("fixtures/readings.json");
    let readings = parse_json(json).unwrap();
    let avg = overall_average(&readings);

    let pm25: f64 = readings.iter().map(|r| r.pm25).sum::<f64>() / readings.len() as f64;
    let co2: f64 = readings.iter().map(|r| r.co2).sum::<f64>() / readings.len() as f64;
    assert!((avg.pm25 - pm25).abs() < 1e-9);
    assert!((avg.co2 - co2).abs() < 1e-9);
}

#[test]
fn test_malformed_json_returns_no_readings() {
    let bytes = include_bytes!("fixtures/malformed.json");
    let err = parse_readings(bytes, Some(InputFormat::Json)).unwrap_err();
    assert!(err.is_parse());
}

#[test]
fn test_export_round_trip() {
    let json = include_bytes!("fixtures/readings.json");
    let originals = parse_json(json).unwrap();

    let tmp = tempfile::tempdir().unwrap();
    let path = save_to_csv(&originals, tmp.path()).unwrap();
    let bytes = std::fs::read(&path).unwrap();

    assert_eq!(InputFormat::sniff(&bytes), InputFormat::Export);
    let restored = parse_readings(&bytes, None).unwrap();

    assert_eq!(restored.len(), originals.len());
    for (before, after) in originals.iter().zip(&restored) {
        assert_eq!(
            before.timestamp.timestamp(),
            after.timestamp.timestamp()
        );
        assert_eq!(before.timestamp.offset(), after.timestamp.offset());
        assert!((before.pm25 - after.pm25).abs() <= 0.005 + 1e-9);
        assert!((before.co2 - after.co2).abs() <= 0.005 + 1e-9);
    }

    // Aggregation over the exported copy still classifies each hour the same way.
    assert_eq!(dominant_by_hour(&originals), dominant_by_hour(&restored));
}

#[test]
fn test_export_drops_subsecond_precision() {
    let json = br#"[{"sensor_id":"s1","timestamp":"2024-03-01T08:00:00.750Z","pm25":1,"co2":2}]"#;
    let readings = parse_json(json).unwrap();

    let mut buf = Vec::new();
    write_readings(&mut buf, &readings).unwrap();
    let restored = parse_export_csv(&buf).unwrap();

    assert_eq!(
        restored[0].timestamp.timestamp(),
        readings[0].timestamp.timestamp()
    );
    assert_eq!(restored[0].timestamp.timestamp_subsec_millis(), 0);
}
