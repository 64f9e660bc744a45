//! Raw topology records as supplied by the data source.
//!
//! Records refer to each other by string code. They are validated and
//! turned into dense ids by [`Topology::load`](super::Topology::load).

use serde::{Deserialize, Serialize};

use crate::domain::Minutes;
use crate::timetable::LineSchedule;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StationRecord {
    pub code: String,
    pub name: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LineRecord {
    pub code: String,
    pub name: String,
    /// Service rules; station references are station codes.
    #[serde(default)]
    pub schedule: LineSchedule<String>,
}

/// A stretch of line between two adjacent stations, usable in both directions.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SegmentRecord {
    pub from: String,
    pub to: String,
    pub line: String,
    pub travel_minutes: Minutes,
}

/// Cost of changing between two lines at a station.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TransferRecord {
    pub station: String,
    pub from_line: String,
    pub to_line: String,
    pub peak_minutes: Minutes,
    pub off_peak_minutes: Minutes,
}

impl StationRecord {
    pub fn new(code: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            code: code.into(),
            name: name.into(),
        }
    }
}

impl LineRecord {
    /// A line with the default schedule.
    pub fn new(code: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            code: code.into(),
            name: name.into(),
            schedule: LineSchedule::default(),
        }
    }

    pub fn with_schedule(mut self, schedule: LineSchedule<String>) -> Self {
        self.schedule = schedule;
        self
    }
}

impl SegmentRecord {
    pub fn new(
        from: impl Into<String>,
        to: impl Into<String>,
        line: impl Into<String>,
        travel_minutes: Minutes,
    ) -> Self {
        Self {
            from: from.into(),
            to: to.into(),
            line: line.into(),
            travel_minutes,
        }
    }
}

impl TransferRecord {
    pub fn new(
        station: impl Into<String>,
        from_line: impl Into<String>,
        to_line: impl Into<String>,
        peak_minutes: Minutes,
        off_peak_minutes: Minutes,
    ) -> Self {
        Self {
            station: station.into(),
            from_line: from_line.into(),
            to_line: to_line.into(),
            peak_minutes,
            off_peak_minutes,
        }
    }
}
