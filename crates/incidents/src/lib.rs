//! Incident CSV cleaning.
//!
//! Reads raw incident rows, drops those with unusable coordinates or
//! creation dates, and writes a normalized CSV with derived time features
//! (`Hour`, `DayOfWeek`, `Month`, `IsWeekend`).
//!
//! # Example
//!
//! ```
//! use responder_incidents::{clean_records, Bounds};
//!
//! let input = "Latitude,Longitude,Creation Date\n40.70,-74.00,2021-01-02T10:00:00\n";
//! let (rows, _) = clean_records(input.as_bytes(), &Bounds::NYC).unwrap();
//! assert_eq!(rows[0].day_of_week, "Saturday");
//! ```

#![warn(missing_docs)]

mod clean;
mod error;
mod timestamp;

pub use clean::{
    clean_file, clean_records, clean_row, write_incidents, Bounds, CleanIncident, CleanReport,
    RawIncident, OUTPUT_HEADERS,
};
pub use error::{IncidentError, IncidentErrorCode, Result};
pub use timestamp::{parse_timestamp, to_iso_millis};
