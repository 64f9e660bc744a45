//! Loading network data from JSON.

use std::path::{Path, PathBuf};

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::domain::MalformedTopology;
use crate::topology::{LineRecord, SegmentRecord, StationRecord, TransferRecord};

/// Everything needed to build a [`Network`](super::Network).
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct NetworkFile {
    pub stations: Vec<StationRecord>,
    pub lines: Vec<LineRecord>,
    pub segments: Vec<SegmentRecord>,
    #[serde(default)]
    pub transfers: Vec<TransferRecord>,
    /// Service days run to the holiday timetable.
    #[serde(default)]
    pub holidays: Vec<NaiveDate>,
}

/// Errors from loading network data.
#[derive(Debug, thiserror::Error)]
pub enum SourceError {
    #[error("failed to read {}: {source}", path.display())]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("invalid network json: {0}")]
    Json(#[from] serde_json::Error),

    #[error("malformed topology: {0}")]
    Topology(#[from] MalformedTopology),
}

impl NetworkFile {
    pub fn from_json(json: &str) -> Result<Self, SourceError> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn to_json(&self) -> Result<String, SourceError> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Read a network file from disk.
    pub fn read(path: &Path) -> Result<Self, SourceError> {
        let json = std::fs::read_to_string(path).map_err(|source| SourceError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_json(&json)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    const SMALL: &str = r#"{
        "stations": [
            {"code": "A", "name": "Alpha"},
            {"code": "B", "name": "Beta"}
        ],
        "lines": [
            {"code": "L1", "name": "Line 1", "schedule": {"headways": {"peak": 5, "off_peak": 12}}}
        ],
        "segments": [
            {"from": "A", "to": "B", "line": "L1", "travel_minutes": 4}
        ],
        "holidays": ["2024-01-01"]
    }"#;

    #[test]
    fn parse_minimal_file() {
        let file = NetworkFile::from_json(SMALL).unwrap();
        assert_eq!(file.stations.len(), 2);
        assert_eq!(file.lines[0].schedule.headways.peak, 5);
        assert_eq!(file.lines[0].schedule.headways.off_peak, Some(12));
        assert!(file.transfers.is_empty());
        assert_eq!(file.holidays, vec![NaiveDate::from_ymd_opt(2024, 1, 1).unwrap()]);
    }

    #[test]
    fn missing_required_field_is_json_error() {
        let err = NetworkFile::from_json(r#"{"stations": []}"#).unwrap_err();
        assert!(matches!(err, SourceError::Json(_)));
        assert!(err.to_string().starts_with("invalid network json"));
    }

    #[test]
    fn json_roundtrip_preserves_records() {
        let file = NetworkFile::from_json(SMALL).unwrap();
        let again = NetworkFile::from_json(&file.to_json().unwrap()).unwrap();
        assert_eq!(file, again);
    }

    #[test]
    fn read_from_disk() {
        let mut tmp = tempfile::NamedTempFile::new().unwrap();
        tmp.write_all(SMALL.as_bytes()).unwrap();

        let file = NetworkFile::read(tmp.path()).unwrap();
        assert_eq!(file.segments[0].travel_minutes, 4);
    }

    #[test]
    fn read_missing_file_is_io_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("absent.json");

        let err = NetworkFile::read(&path).unwrap_err();
        assert!(matches!(err, SourceError::Io { .. }));
    }
}
