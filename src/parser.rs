//! Decoders that turn raw JSON or CSV payloads into [`Reading`]s.
//!
//! Decoding is all-or-nothing: the first malformed record aborts the whole
//! payload and no readings are returned.

use chrono::{DateTime, FixedOffset};
use csv::{ReaderBuilder, StringRecord, Trim};
use flate2::read::GzDecoder;
use std::borrow::Cow;
use std::io::Read;
use std::path::Path;
use tracing::debug;

use crate::error::{AirQualityError, Result};
use crate::reading::Reading;

/// Header row written by the CSV sink.
pub const EXPORT_HEADER: [&str; 3] = ["Timestamp", "PM2.5", "CO2"];

const GZIP_MAGIC: [u8; 2] = [0x1f, 0x8b];
const UTF8_BOM: [u8; 3] = [0xef, 0xbb, 0xbf];

/// Supported input encodings.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputFormat {
    /// Array of `{sensor_id, timestamp, pm25, co2}` objects.
    Json,
    /// Header row, then `sensor_id,timestamp,pm25,co2` rows.
    Csv,
    /// The sink's own `Timestamp,PM2.5,CO2` layout.
    Export,
}

impl InputFormat {
    pub fn name(&self) -> &'static str {
        match self {
            InputFormat::Json => "json",
            InputFormat::Csv => "csv",
            InputFormat::Export => "export",
        }
    }

    /// Infers the format from a file extension, looking through a trailing `.gz`.
    pub fn from_path(path: &Path) -> Option<Self> {
        let name = path.file_name()?.to_str()?.to_ascii_lowercase();
        let name = name.strip_suffix(".gz").unwrap_or(&name);

        if name.ends_with(".json") {
            Some(InputFormat::Json)
        } else if name.ends_with(".csv") {
            Some(InputFormat::Csv)
        } else {
            None
        }
    }

    /// Guesses the format from the (already decompressed) payload.
    pub fn sniff(bytes: &[u8]) -> Self {
        let bytes = strip_bom(bytes);
        let first = bytes.iter().copied().find(|b| !b.is_ascii_whitespace());
        if first == Some(b'[') {
            return InputFormat::Json;
        }

        let first_line = bytes
            .split(|b| *b == b'\n')
            .next()
            .map(|line| String::from_utf8_lossy(line).trim().to_string())
            .unwrap_or_default();
        if first_line == EXPORT_HEADER.join(",") {
            InputFormat::Export
        } else {
            InputFormat::Csv
        }
    }
}

/// Returns the payload with gzip compression removed, if it was compressed.
pub fn decompress(bytes: &[u8]) -> Result<Cow<'_, [u8]>> {
    if !bytes.starts_with(&GZIP_MAGIC) {
        return Ok(Cow::Borrowed(bytes));
    }

    let mut decoded = Vec::new();
    GzDecoder::new(bytes)
        .read_to_end(&mut decoded)
        .map_err(|e| AirQualityError::parse("gzip", e.to_string()))?;
    debug!(
        compressed = bytes.len(),
        decompressed = decoded.len(),
        "Decompressed gzip payload"
    );
    Ok(Cow::Owned(decoded))
}

/// Drops a leading UTF-8 byte order mark.
pub fn strip_bom(bytes: &[u8]) -> &[u8] {
    bytes.strip_prefix(&UTF8_BOM[..]).unwrap_or(bytes)
}

/// Decodes `bytes` as `format`, or sniffs the format when `None` is given.
pub fn parse_readings(bytes: &[u8], format: Option<InputFormat>) -> Result<Vec<Reading>> {
    let decompressed = decompress(bytes)?;
    let bytes = strip_bom(&decompressed);
    let format = format.unwrap_or_else(|| InputFormat::sniff(bytes));
    debug!(
        format = format.name(),
        bytes = bytes.len(),
        "Decoding readings"
    );

    match format {
        InputFormat::Json => parse_json(bytes),
        InputFormat::Csv => parse_csv(bytes),
        InputFormat::Export => parse_export_csv(bytes),
    }
}

/// Decodes a JSON array of reading objects.
///
/// # Errors
///
/// Fails if the payload is not an array of readings, if a timestamp is not
/// RFC 3339, or if any concentration is negative or non-numeric.
pub fn parse_json(bytes: &[u8]) -> Result<Vec<Reading>> {
    let readings: Vec<Reading> = serde_json::from_slice(strip_bom(bytes)).map_err(|e| {
        AirQualityError::parse("json", format!("error parsing sensor data: {}", e))
    })?;

    for reading in &readings {
        reading.validate("json")?;
    }
    Ok(readings)
}

/// Decodes the four-column sensor CSV. The first row is a header and is skipped.
pub fn parse_csv(bytes: &[u8]) -> Result<Vec<Reading>> {
    parse_rows(bytes, "csv", 4, |record| {
        Ok(Reading::new(
            &record[0],
            parse_timestamp(&record[1])?,
            parse_number("pm25", &record[2])?,
            parse_number("co2", &record[3])?,
        ))
    })
}

/// Decodes the three-column layout produced by [`crate::output::write_readings`].
///
/// Sensor ids are not part of that layout, so every reading gets an empty one.
pub fn parse_export_csv(bytes: &[u8]) -> Result<Vec<Reading>> {
    parse_rows(bytes, "export", 3, |record| {
        Ok(Reading::new(
            "",
            parse_timestamp(&record[0])?,
            parse_number("pm25", &record[1])?,
            parse_number("co2", &record[2])?,
        ))
    })
}

fn parse_rows<F>(
    bytes: &[u8],
    format: &'static str,
    width: usize,
    build: F,
) -> Result<Vec<Reading>>
where
    F: Fn(&StringRecord) -> std::result::Result<Reading, String>,
{
    let mut rdr = ReaderBuilder::new()
        .has_headers(true)
        .flexible(true)
        .trim(Trim::All)
        .from_reader(strip_bom(bytes));

    let mut readings = Vec::new();
    for result in rdr.records() {
        let record = result.map_err(|e| csv_parse_error(format, e))?;
        let line = record.position().map(|p| p.line()).unwrap_or_default();

        if record.len() != width {
            let message = format!("expected {} fields, found {}", width, record.len());
            return Err(AirQualityError::parse(
                format,
                format!("line {}: {}", line, message),
            ));
        }

        let reading = build(&record).map_err(|message| {
            AirQualityError::parse(format, format!("line {}: {}", line, message))
        })?;
        reading.validate(format)?;
        readings.push(reading);
    }

    debug!(format, rows = readings.len(), "CSV rows decoded");
    Ok(readings)
}

fn csv_parse_error(format: &'static str, e: csv::Error) -> AirQualityError {
    AirQualityError::parse(format, e.to_string())
}

fn parse_timestamp(raw: &str) -> std::result::Result<DateTime<FixedOffset>, String> {
    DateTime::parse_from_rfc3339(raw)
        .map_err(|e| format!("invalid timestamp '{}': {}", raw, e))
}

fn parse_number(field: &str, raw: &str) -> std::result::Result<f64, String> {
    raw.parse::<f64>()
        .map_err(|_| format!("{} is not a number: '{}'", field, raw))
}
