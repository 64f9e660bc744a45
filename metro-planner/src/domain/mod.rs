//! Domain types for the metro journey planner.
//!
//! This module contains the core value types shared by every layer:
//! dense station and line ids, validated clock times and service windows,
//! and the errors raised when network data or names fail validation.

mod error;
mod ids;
mod time;

pub use error::{LookupError, MalformedTopology, ScheduleError};
pub use ids::{LineId, StationId};
pub use time::{ClockTime, MINUTES_PER_DAY, TimeError, TimeWindow, parse_query_time};

/// Whole minutes, the unit of every travel and transfer cost.
pub type Minutes = u32;
