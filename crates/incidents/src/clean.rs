//! Incident row cleaning.
//!
//! Rows are deserialized into [`RawIncident`], filtered by coordinate
//! validity, a bounding box and a parsable creation date, then enriched with
//! time features. Rows that fail any check are dropped without comment.
//! Output is written only after the whole input has been read.

use crate::error::{IncidentError, Result};
use crate::timestamp::{parse_timestamp, to_iso_millis};
use chrono::{Datelike, Timelike, Weekday};
use serde::{Deserialize, Serialize};
use std::fs::File;
use std::io::{Read, Write};
use std::path::Path;

/// Output column order.
pub const OUTPUT_HEADERS: [&str; 11] = [
    "Incident Type",
    "Location",
    "Borough",
    "Creation Date",
    "Closed Date",
    "Latitude",
    "Longitude",
    "Hour",
    "DayOfWeek",
    "Month",
    "IsWeekend",
];

/// Inclusive latitude/longitude box.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Bounds {
    /// Southern edge
    pub lat_min: f64,
    /// Northern edge
    pub lat_max: f64,
    /// Western edge
    pub lon_min: f64,
    /// Eastern edge
    pub lon_max: f64,
}

impl Bounds {
    /// Approximate New York City extent.
    pub const NYC: Bounds = Bounds {
        lat_min: 40.4774,
        lat_max: 40.9176,
        lon_min: -74.2591,
        lon_max: -73.7004,
    };

    /// True when the point lies inside or on the edge of the box.
    pub fn contains(&self, latitude: f64, longitude: f64) -> bool {
        (self.lat_min..=self.lat_max).contains(&latitude)
            && (self.lon_min..=self.lon_max).contains(&longitude)
    }
}

impl Default for Bounds {
    fn default() -> Self {
        Self::NYC
    }
}

/// An input row as read. Missing columns deserialize as `None`.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct RawIncident {
    /// Raw latitude text
    #[serde(rename = "Latitude", default)]
    pub latitude: Option<String>,
    /// Raw longitude text
    #[serde(rename = "Longitude", default)]
    pub longitude: Option<String>,
    /// Raw creation date
    #[serde(rename = "Creation Date", default)]
    pub creation_date: Option<String>,
    /// Incident category
    #[serde(rename = "Incident Type", default)]
    pub incident_type: Option<String>,
    /// Street location
    #[serde(rename = "Location", default)]
    pub location: Option<String>,
    /// Borough name
    #[serde(rename = "Borough", default)]
    pub borough: Option<String>,
    /// Closing date, never parsed
    #[serde(rename = "Closed Date", default)]
    pub closed_date: Option<String>,
}

/// A kept, enriched row. Field order is the output column order.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CleanIncident {
    /// Incident category
    #[serde(rename = "Incident Type")]
    pub incident_type: String,
    /// Street location
    #[serde(rename = "Location")]
    pub location: String,
    /// Borough name
    #[serde(rename = "Borough")]
    pub borough: String,
    /// Creation date as ISO-8601 UTC with milliseconds
    #[serde(rename = "Creation Date")]
    pub creation_date: String,
    /// Closing date as read
    #[serde(rename = "Closed Date")]
    pub closed_date: String,
    /// Latitude
    #[serde(rename = "Latitude", serialize_with = "plain_number")]
    pub latitude: f64,
    /// Longitude
    #[serde(rename = "Longitude", serialize_with = "plain_number")]
    pub longitude: f64,
    /// Hour of day, UTC
    #[serde(rename = "Hour")]
    pub hour: u32,
    /// English weekday name
    #[serde(rename = "DayOfWeek")]
    pub day_of_week: String,
    /// English month name
    #[serde(rename = "Month")]
    pub month: String,
    /// Saturday or Sunday
    #[serde(rename = "IsWeekend")]
    pub is_weekend: bool,
}

// Shortest decimal form without a trailing `.0`, so `-74.00` is written as `-74`.
fn plain_number<S: serde::Serializer>(value: &f64, serializer: S) -> std::result::Result<S::Ok, S::Error> {
    serializer.collect_str(value)
}

/// Counts from one cleaning run.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CleanReport {
    /// Data rows encountered, including malformed ones
    pub rows_read: usize,
    /// Rows written to the output
    pub rows_written: usize,
}

impl CleanReport {
    /// Rows that did not survive cleaning.
    pub fn rows_dropped(&self) -> usize {
        self.rows_read - self.rows_written
    }
}

fn parse_coordinate(raw: Option<&str>) -> Option<f64> {
    raw?.trim().parse::<f64>().ok().filter(|v| v.is_finite())
}

/// Cleans a single row, or returns `None` when it should be dropped.
pub fn clean_row(raw: RawIncident, bounds: &Bounds) -> Option<CleanIncident> {
    let latitude = parse_coordinate(raw.latitude.as_deref())?;
    let longitude = parse_coordinate(raw.longitude.as_deref())?;
    if !bounds.contains(latitude, longitude) {
        return None;
    }

    let created = parse_timestamp(raw.creation_date.as_deref()?)?;
    let weekday = created.weekday();

    Some(CleanIncident {
        incident_type: raw.incident_type.unwrap_or_default(),
        location: raw.location.unwrap_or_default(),
        borough: raw.borough.unwrap_or_default(),
        creation_date: to_iso_millis(&created),
        closed_date: raw.closed_date.unwrap_or_default(),
        latitude,
        longitude,
        hour: created.hour(),
        day_of_week: created.format("%A").to_string(),
        month: created.format("%B").to_string(),
        is_weekend: matches!(weekday, Weekday::Sat | Weekday::Sun),
    })
}

/// Reads every row from `input` and returns the kept ones in input order.
///
/// Rows that cannot be deserialized are skipped; only failures of the
/// underlying reader abort.
pub fn clean_records<R: Read>(input: R, bounds: &Bounds) -> Result<(Vec<CleanIncident>, usize)> {
    let mut reader = csv::Reader::from_reader(input);
    let mut kept = Vec::new();
    let mut rows_read = 0;

    for row in reader.deserialize::<RawIncident>() {
        rows_read += 1;
        let raw = match row {
            Ok(raw) => raw,
            Err(err) if matches!(err.kind(), csv::ErrorKind::Io(_)) => return Err(err.into()),
            Err(_) => continue,
        };
        if let Some(clean) = clean_row(raw, bounds) {
            kept.push(clean);
        }
    }

    Ok((kept, rows_read))
}

/// Writes the header line and every row.
pub fn write_incidents<W: Write>(output: W, incidents: &[CleanIncident]) -> Result<()> {
    let mut writer = csv::WriterBuilder::new()
        .has_headers(false)
        .from_writer(output);

    writer.write_record(OUTPUT_HEADERS)?;
    for incident in incidents {
        writer.serialize(incident)?;
    }
    writer.flush().map_err(csv::Error::from)?;
    Ok(())
}

/// Cleans `input` into `output`, replacing any existing output file.
pub fn clean_file(input: &Path, output: &Path, bounds: &Bounds) -> Result<CleanReport> {
    let file = File::open(input).map_err(|e| IncidentError::io(input, e))?;
    let (incidents, rows_read) = clean_records(file, bounds)?;

    if let Some(parent) = output.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent).map_err(|e| IncidentError::io(parent, e))?;
    }
    let out = File::create(output).map_err(|e| IncidentError::io(output, e))?;
    write_incidents(out, &incidents)?;

    let report = CleanReport {
        rows_read,
        rows_written: incidents.len(),
    };
    tracing::info!(
        input = %input.display(),
        output = %output.display(),
        rows_read = report.rows_read,
        rows_written = report.rows_written,
        "Incident cleaning complete"
    );
    Ok(report)
}

#[cfg(test)]
mod tests {
    use super::*;

    const SAMPLE: &str = "\
Incident Type,Location,Borough,Creation Date,Closed Date,Latitude,Longitude
Fire,Main St,Brooklyn,2021-01-02T10:00:00,01/02/2021 11:00:00 AM,40.70,-74.00
Medical,Broadway,Manhattan,2021-01-04T08:30:00,,abc,-74.00
Fire,Offshore,Queens,2021-01-04T08:30:00,,41.50,-74.00
Gas,Elm St,Bronx,yesterday,,40.80,-73.90
";

    fn raw(lat: &str, lng: &str, date: &str) -> RawIncident {
        RawIncident {
            latitude: Some(lat.to_string()),
            longitude: Some(lng.to_string()),
            creation_date: Some(date.to_string()),
            ..RawIncident::default()
        }
    }

    #[test]
    fn test_keeps_valid_row_with_features() {
        let (rows, read) = clean_records(SAMPLE.as_bytes(), &Bounds::NYC).unwrap();
        assert_eq!(read, 4);
        assert_eq!(rows.len(), 1);

        let row = &rows[0];
        assert_eq!(row.incident_type, "Fire");
        assert_eq!(row.creation_date, "2021-01-02T10:00:00.000Z");
        assert_eq!(row.closed_date, "01/02/2021 11:00:00 AM");
        assert_eq!(row.hour, 10);
        assert_eq!(row.day_of_week, "Saturday");
        assert_eq!(row.month, "January");
        assert!(row.is_weekend);
    }

    #[test]
    fn test_non_numeric_latitude_dropped() {
        assert!(clean_row(raw("abc", "-74.00", "2021-01-02T10:00:00"), &Bounds::NYC).is_none());
        assert!(clean_row(raw("", "-74.00", "2021-01-02T10:00:00"), &Bounds::NYC).is_none());
        assert!(clean_row(raw("NaN", "-74.00", "2021-01-02T10:00:00"), &Bounds::NYC).is_none());
    }

    #[test]
    fn test_bounds_are_inclusive() {
        let b = Bounds::NYC;
        assert!(b.contains(b.lat_min, b.lon_min));
        assert!(b.contains(b.lat_max, b.lon_max));
        assert!(!b.contains(b.lat_max + 0.0001, b.lon_max));
    }

    #[test]
    fn test_weekday_row_is_not_weekend() {
        let row = clean_row(raw("40.75", "-73.98", "2021-01-04T23:15:00"), &Bounds::NYC).unwrap();
        assert_eq!(row.day_of_week, "Monday");
        assert!(!row.is_weekend);
        assert_eq!(row.hour, 23);
    }

    #[test]
    fn test_ragged_rows_are_skipped() {
        let input = "\
Latitude,Longitude,Creation Date
40.70,-74.00
40.71,-74.01,2021-01-02T10:00:00
";
        let (rows, read) = clean_records(input.as_bytes(), &Bounds::NYC).unwrap();
        assert_eq!(read, 2);
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].incident_type, "");
    }

    #[test]
    fn test_output_column_order() {
        let (rows, _) = clean_records(SAMPLE.as_bytes(), &Bounds::NYC).unwrap();
        let mut out = Vec::new();
        write_incidents(&mut out, &rows).unwrap();

        let text = String::from_utf8(out).unwrap();
        let mut lines = text.lines();
        assert_eq!(lines.next().unwrap(), OUTPUT_HEADERS.join(","));
        assert_eq!(
            lines.next().unwrap(),
            "Fire,Main St,Brooklyn,2021-01-02T10:00:00.000Z,01/02/2021 11:00:00 AM,40.7,-74,10,Saturday,January,true"
        );
        assert!(lines.next().is_none());
    }

    #[test]
    fn test_empty_result_still_has_header() {
        let mut out = Vec::new();
        write_incidents(&mut out, &[]).unwrap();
        assert_eq!(String::from_utf8(out).unwrap().trim_end(), OUTPUT_HEADERS.join(","));
    }

    #[test]
    fn test_clean_file_overwrites_output() {
        let dir = tempfile::tempdir().unwrap();
        let input = dir.path().join("raw.csv");
        let output = dir.path().join("out").join("clean.csv");
        std::fs::write(&input, SAMPLE).unwrap();
        std::fs::create_dir_all(output.parent().unwrap()).unwrap();
        std::fs::write(&output, "stale\nstale\nstale\n").unwrap();

        let report = clean_file(&input, &output, &Bounds::NYC).unwrap();
        assert_eq!(report.rows_written, 1);
        assert_eq!(report.rows_dropped(), 3);

        let written = std::fs::read_to_string(&output).unwrap();
        assert!(!written.contains("stale"));
        assert_eq!(written.lines().count(), 2);
    }

    #[test]
    fn test_missing_input_is_io_error() {
        let dir = tempfile::tempdir().unwrap();
        let err = clean_file(
            &dir.path().join("missing.csv"),
            &dir.path().join("clean.csv"),
            &Bounds::NYC,
        )
        .unwrap_err();
        assert!(matches!(err, IncidentError::Io { .. }));
        assert!(!dir.path().join("clean.csv").exists());
    }
}
