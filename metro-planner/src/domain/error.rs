//! Domain error types.
//!
//! These errors represent invalid network data and failed name lookups.
//! They are distinct from API/IO errors.

/// Reasons a network description is rejected at load time.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum MalformedTopology {
    #[error("duplicate station code {0}")]
    DuplicateStation(String),

    #[error("duplicate line code {0}")]
    DuplicateLine(String),

    /// A record names a station code that was never declared
    #[error("{referenced_by} references unknown station {code}")]
    UnknownStation {
        referenced_by: &'static str,
        code: String,
    },

    /// A record names a line code that was never declared
    #[error("{referenced_by} references unknown line {code}")]
    UnknownLine {
        referenced_by: &'static str,
        code: String,
    },

    #[error("segment on line {line} connects station {station} to itself")]
    SelfLoop { line: String, station: String },

    #[error("segment {from}-{to} on line {line} has zero travel time")]
    ZeroTravelTime {
        from: String,
        to: String,
        line: String,
    },

    /// A transfer names a line that has no segment at the station
    #[error("line {line} does not serve station {station}")]
    LineNotAtStation { station: String, line: String },

    #[error("transfer at {station} must connect two different lines, got {line} twice")]
    SameLineTransfer { station: String, line: String },

    #[error("invalid schedule for line {line}: {reason}")]
    InvalidSchedule { line: String, reason: ScheduleError },
}

/// Service rules that cannot drive the timetable generator.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum ScheduleError {
    /// Names the window whose headway is zero
    #[error("{0} headway must be positive")]
    ZeroHeadway(&'static str),

    #[error("weekend-night close must differ from service close")]
    ExtensionCloseAtServiceClose,

    #[error("weekend-night extension overlaps next opening")]
    ExtensionOverlapsOpening,

    #[error("express service needs at least one station")]
    EmptyExpress,
}

/// A station or line name could not be resolved.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum LookupError {
    #[error("station not found: {0}")]
    StationNotFound(String),

    #[error("line not found: {0}")]
    LineNotFound(String),
}
