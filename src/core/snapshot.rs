//! Dated JSON snapshot files
//!
//! One file per entity and window:
//! - `TRIPS_API_20250601-20250607.json` for date-partitioned entities
//! - `DRIVERS.json` for the others
//!
//! Each file holds a pretty-printed JSON array of raw records, including
//! their `FILE_ID`. Writes overwrite.

use crate::domain::{AlvysError, DateWindow, EntityKind, RawRecord, Result};
use serde_json::Value;
use std::path::{Path, PathBuf};

const PARTITION_MARKER: &str = "_API_";
const EXTENSION: &str = ".json";

/// Snapshot directory
#[derive(Debug, Clone)]
pub struct SnapshotStore {
    root: PathBuf,
}

impl SnapshotStore {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// File name for `entity`, using `window` for partitioned entities
    ///
    /// # Errors
    ///
    /// Partitioned entities require a window.
    pub fn file_name(entity: EntityKind, window: Option<&DateWindow>) -> Result<String> {
        if !entity.is_partitioned() {
            return Ok(format!("{}{EXTENSION}", entity.file_stem()));
        }

        let window = window.ok_or_else(|| {
            AlvysError::Snapshot(format!("{entity} snapshots are partitioned by date window"))
        })?;
        Ok(format!(
            "{}{PARTITION_MARKER}{}{EXTENSION}",
            entity.file_stem(),
            window.label()
        ))
    }

    pub fn path_for(&self, entity: EntityKind, window: Option<&DateWindow>) -> Result<PathBuf> {
        Ok(self.root.join(Self::file_name(entity, window)?))
    }

    /// Persists `records`, replacing any previous snapshot for the same key
    pub fn write(
        &self,
        entity: EntityKind,
        window: Option<&DateWindow>,
        records: &[RawRecord],
    ) -> Result<PathBuf> {
        let path = self.path_for(entity, window)?;

        std::fs::create_dir_all(&self.root).map_err(|e| {
            AlvysError::Io(format!(
                "Failed to create snapshot directory {}: {e}",
                self.root.display()
            ))
        })?;

        let json = serde_json::to_string_pretty(records)?;
        std::fs::write(&path, json).map_err(|e| {
            AlvysError::Io(format!("Failed to write snapshot {}: {e}", path.display()))
        })?;

        tracing::info!(
            entity = %entity,
            path = %path.display(),
            records = records.len(),
            "Snapshot written"
        );
        Ok(path)
    }

    /// Reads the snapshot of a non-partitioned entity
    pub fn read(&self, entity: EntityKind) -> Result<Vec<RawRecord>> {
        self.read_path(&self.path_for(entity, None)?)
    }

    /// Reads the snapshot of `entity` for `window`
    pub fn read_window(&self, entity: EntityKind, window: &DateWindow) -> Result<Vec<RawRecord>> {
        self.read_path(&self.path_for(entity, Some(window))?)
    }

    /// Windows with a stored snapshot for `entity`, oldest first
    ///
    /// A missing directory yields no windows. Files whose label does not
    /// parse are skipped.
    pub fn list_windows(&self, entity: EntityKind) -> Result<Vec<DateWindow>> {
        if !self.root.exists() {
            return Ok(Vec::new());
        }

        let prefix = format!("{}{PARTITION_MARKER}", entity.file_stem());
        let entries = std::fs::read_dir(&self.root).map_err(|e| {
            AlvysError::Io(format!(
                "Failed to list snapshot directory {}: {e}",
                self.root.display()
            ))
        })?;

        let mut windows = Vec::new();
        for entry in entries {
            let entry = entry.map_err(|e| AlvysError::Io(e.to_string()))?;
            let name = entry.file_name();
            let Some(label) = name
                .to_str()
                .and_then(|n| n.strip_prefix(prefix.as_str()))
                .and_then(|n| n.strip_suffix(EXTENSION))
            else {
                continue;
            };

            match DateWindow::from_label(label) {
                Ok(window) => windows.push(window),
                Err(e) => tracing::warn!(file = ?name, error = %e, "Skipping unrecognized snapshot"),
            }
        }

        windows.sort();
        windows.dedup();
        Ok(windows)
    }

    fn read_path(&self, path: &Path) -> Result<Vec<RawRecord>> {
        if !path.exists() {
            return Err(AlvysError::Snapshot(format!(
                "Snapshot file not found: {}",
                path.display()
            )));
        }

        let content = std::fs::read_to_string(path).map_err(|e| {
            AlvysError::Io(format!("Failed to read snapshot {}: {e}", path.display()))
        })?;
        let value: Value = serde_json::from_str(&content).map_err(|e| {
            AlvysError::Snapshot(format!("Invalid JSON in {}: {e}", path.display()))
        })?;

        let records = unwrap_envelope(value).ok_or_else(|| {
            AlvysError::Snapshot(format!(
                "{} does not contain a list of records",
                path.display()
            ))
        })?;

        tracing::debug!(path = %path.display(), records = records.len(), "Snapshot read");
        Ok(records)
    }
}

/// Accepts a bare array or an object with an `Items`/`items` array
fn unwrap_envelope(value: Value) -> Option<Vec<RawRecord>> {
    let items = match value {
        Value::Array(items) => items,
        Value::Object(mut map) => match map.remove("Items").or_else(|| map.remove("items")) {
            Some(Value::Array(items)) => items,
            _ => return None,
        },
        _ => return None,
    };

    items
        .into_iter()
        .map(|item| match item {
            Value::Object(record) => Some(record),
            _ => None,
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use serde_json::json;
    use tempfile::TempDir;

    fn window(first: (i32, u32, u32), last: (i32, u32, u32)) -> DateWindow {
        DateWindow::from_dates(
            NaiveDate::from_ymd_opt(first.0, first.1, first.2).unwrap(),
            NaiveDate::from_ymd_opt(last.0, last.1, last.2).unwrap(),
        )
        .unwrap()
    }

    fn records() -> Vec<RawRecord> {
        vec![
            json!({"Id": "T1", "Nested": {"A": [1, 2]}, "FILE_ID": "20250609140507123"}),
            json!({"Id": "T2", "FILE_ID": "20250609140507123"}),
        ]
        .into_iter()
        .map(|v| v.as_object().cloned().unwrap())
        .collect()
    }

    #[test]
    fn test_file_names() {
        let w = window((2025, 6, 1), (2025, 6, 7));
        assert_eq!(
            SnapshotStore::file_name(EntityKind::Trips, Some(&w)).unwrap(),
            "TRIPS_API_20250601-20250607.json"
        );
        assert_eq!(
            SnapshotStore::file_name(EntityKind::Carriers, Some(&w)).unwrap(),
            "CARRIERS.json"
        );
        assert!(SnapshotStore::file_name(EntityKind::Invoices, None).is_err());
    }

    #[test]
    fn test_roundtrip_partitioned() {
        let dir = TempDir::new().unwrap();
        let store = SnapshotStore::new(dir.path().join("data"));
        let w = window((2025, 6, 1), (2025, 6, 7));

        store.write(EntityKind::Trips, Some(&w), &records()).unwrap();
        let back = store.read_window(EntityKind::Trips, &w).unwrap();

        assert_eq!(back, records());
    }

    #[test]
    fn test_roundtrip_keeps_field_order() {
        let dir = TempDir::new().unwrap();
        let store = SnapshotStore::new(dir.path());
        let record: RawRecord =
            serde_json::from_str(r#"{"Zeta": 1, "Id": "C1", "Alpha": {"Y": 2, "B": 3}}"#).unwrap();

        let path = store.write(EntityKind::Carriers, None, &[record]).unwrap();

        let text = std::fs::read_to_string(path).unwrap();
        let zeta = text.find("\"Zeta\"").unwrap();
        let id = text.find("\"Id\"").unwrap();
        let alpha = text.find("\"Alpha\"").unwrap();
        assert!(zeta < id && id < alpha);
        assert!(text.find("\"Y\"").unwrap() < text.find("\"B\"").unwrap());

        let back = store.read(EntityKind::Carriers).unwrap();
        let keys: Vec<&str> = back[0].keys().map(String::as_str).collect();
        assert_eq!(keys, vec!["Zeta", "Id", "Alpha"]);
    }

    #[test]
    fn test_write_overwrites() {
        let dir = TempDir::new().unwrap();
        let store = SnapshotStore::new(dir.path());

        store.write(EntityKind::Drivers, None, &records()).unwrap();
        store.write(EntityKind::Drivers, None, &records()[..1]).unwrap();

        assert_eq!(store.read(EntityKind::Drivers).unwrap().len(), 1);
    }

    #[test]
    fn test_read_enveloped_snapshot() {
        let dir = TempDir::new().unwrap();
        std::fs::write(
            dir.path().join("CARRIERS.json"),
            r#"{"Items": [{"Id": "CA1"}], "Total": 1}"#,
        )
        .unwrap();

        let store = SnapshotStore::new(dir.path());
        let carriers = store.read(EntityKind::Carriers).unwrap();
        assert_eq!(carriers[0]["Id"], json!("CA1"));
    }

    #[test]
    fn test_missing_snapshot_is_error() {
        let dir = TempDir::new().unwrap();
        let store = SnapshotStore::new(dir.path());

        let err = store.read(EntityKind::Trucks).unwrap_err();
        assert!(matches!(err, AlvysError::Snapshot(ref m) if m.contains("TRUCKS.json")));
    }

    #[test]
    fn test_non_list_snapshot_is_error() {
        let dir = TempDir::new().unwrap();
        std::fs::write(dir.path().join("TRAILERS.json"), r#"{"Id": "x"}"#).unwrap();

        let store = SnapshotStore::new(dir.path());
        assert!(matches!(
            store.read(EntityKind::Trailers).unwrap_err(),
            AlvysError::Snapshot(_)
        ));
    }

    #[test]
    fn test_list_windows_sorted() {
        let dir = TempDir::new().unwrap();
        let store = SnapshotStore::new(dir.path());
        let later = window((2025, 6, 8), (2025, 6, 14));
        let earlier = window((2025, 6, 1), (2025, 6, 7));

        store.write(EntityKind::Trips, Some(&later), &[]).unwrap();
        store.write(EntityKind::Trips, Some(&earlier), &[]).unwrap();
        store.write(EntityKind::Loads, Some(&later), &[]).unwrap();
        std::fs::write(dir.path().join("TRIPS_API_garbage.json"), "[]").unwrap();

        assert_eq!(
            store.list_windows(EntityKind::Trips).unwrap(),
            vec![earlier, later]
        );
        assert_eq!(store.list_windows(EntityKind::Loads).unwrap(), vec![later]);
        assert!(store.list_windows(EntityKind::Invoices).unwrap().is_empty());
    }

    #[test]
    fn test_list_windows_missing_dir() {
        let store = SnapshotStore::new("/nonexistent/alvys/snapshots");
        assert!(store.list_windows(EntityKind::Trips).unwrap().is_empty());
    }
}
