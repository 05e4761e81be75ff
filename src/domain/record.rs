//! Raw API records and run identifiers

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::fmt;

/// Key under which the run identifier is stamped on every record
pub const FILE_ID_KEY: &str = "FILE_ID";

/// One item as returned by a search endpoint
pub type RawRecord = Map<String, Value>;

/// Run identifier stamped on every record fetched in one operation
///
/// Formatted from a UTC instant as `yyyyMMddHHmmssSSS`.
///
/// # Examples
///
/// ```
/// use alvys_etl::domain::FileId;
/// use chrono::{TimeZone, Utc};
///
/// let at = Utc.with_ymd_and_hms(2025, 6, 9, 14, 5, 7).unwrap();
/// assert_eq!(FileId::at(at).as_str(), "20250609140507000");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct FileId(String);

impl FileId {
    /// Identifier for the current instant
    pub fn now() -> Self {
        Self::at(Utc::now())
    }

    /// Identifier for a given instant
    pub fn at(instant: DateTime<Utc>) -> Self {
        Self(instant.format("%Y%m%d%H%M%S%3f").to_string())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for FileId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Stamps `FILE_ID` onto every record, replacing any previous value
pub fn tag_records(records: &mut [RawRecord], file_id: &FileId) {
    for record in records {
        record.insert(FILE_ID_KEY.to_string(), Value::String(file_id.0.clone()));
    }
}

/// Follows a dotted path through nested objects
///
/// Returns `None` as soon as a segment is missing, null, or not an
/// object. A null leaf is also `None`.
pub fn lookup<'a>(record: &'a RawRecord, path: &str) -> Option<&'a Value> {
    let mut segments = path.split('.');
    let mut current = record.get(segments.next()?)?;

    for segment in segments {
        current = current.as_object()?.get(segment)?;
    }

    if current.is_null() {
        None
    } else {
        Some(current)
    }
}
