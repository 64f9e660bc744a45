//! Departure timetables.
//!
//! Each line carries a [`LineSchedule`]: a service window, peak intervals
//! and headways for the various window categories. The
//! [`TimetableGenerator`] turns those rules and a query instant into the
//! departures at one station for the rest of the active window.
//!
//! A timetable is one of three things, and callers must be able to tell
//! them apart:
//!
//! - [`Timetable::Closed`]: the line exists but is not running now
//! - [`Timetable::Empty`]: unknown line, or no departures to report
//! - [`Timetable::Entries`]: the departures, in order

mod generator;
mod schedule;

pub use generator::TimetableGenerator;
pub use schedule::{
    EarlyMorning, ExpressService, Headways, LateService, LineSchedule, WeekendNight,
};

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

use crate::domain::{LineId, StationId};
use crate::transfers::Period;

/// The single entry reported for a closed station.
pub const CLOSED_SENTINEL: &str = "Station closed!";

/// Calendar classification of a service day.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DayType {
    Weekday,
    Weekend,
    Holiday,
}

/// Which rule produced a departure.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum WindowCategory {
    Peak,
    OffPeak,
    Late,
    EarlyMorning,
    WeekendNight,
    Express,
}

impl WindowCategory {
    pub fn period(self) -> Period {
        match self {
            WindowCategory::Peak | WindowCategory::Express => Period::Peak,
            _ => Period::OffPeak,
        }
    }
}

/// One scheduled departure.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Departure {
    pub at: NaiveDateTime,
    pub day_type: DayType,
    pub window: WindowCategory,
}

impl Departure {
    /// "HH:MM", or "YYYY-MM-DD HH:MM" when the departure falls on a later
    /// date than the query.
    pub fn label(&self, query: NaiveDateTime) -> String {
        if self.at.date() > query.date() {
            self.at.format("%Y-%m-%d %H:%M").to_string()
        } else {
            self.at.format("%H:%M").to_string()
        }
    }
}

/// Departures at a station from some instant onwards.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Timetable {
    Closed,
    Empty,
    Entries(Vec<Departure>),
}

impl Timetable {
    pub fn is_closed(&self) -> bool {
        matches!(self, Timetable::Closed)
    }

    pub fn departures(&self) -> &[Departure] {
        match self {
            Timetable::Entries(entries) => entries,
            _ => &[],
        }
    }

    /// First departure at or after `at`; none when closed or empty.
    pub fn next_departure(&self, at: NaiveDateTime) -> Option<&Departure> {
        self.departures().iter().find(|d| d.at >= at)
    }

    /// Render for callers that expect a list of strings.
    ///
    /// A closed timetable renders as the single [`CLOSED_SENTINEL`] entry.
    pub fn labels(&self, query: NaiveDateTime) -> Vec<String> {
        match self {
            Timetable::Closed => vec![CLOSED_SENTINEL.to_string()],
            Timetable::Empty => Vec::new(),
            Timetable::Entries(entries) => entries.iter().map(|d| d.label(query)).collect(),
        }
    }
}

/// The timetable-lookup capability used by time-dependent search.
pub trait DepartureSource {
    /// First departure of `line` at `station` at or after `at`, following
    /// the service into later windows where it continues.
    fn next_departure(
        &self,
        line: LineId,
        station: StationId,
        at: NaiveDateTime,
    ) -> Option<NaiveDateTime>;

    /// Whether `line` is running at `station` at `at`.
    fn is_open(&self, line: LineId, station: StationId, at: NaiveDateTime) -> bool;

    /// Peak or off-peak for transfers made at `at` on `line`.
    fn period(&self, line: LineId, station: StationId, at: NaiveDateTime) -> Period;
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::parse_query_time;

    fn departure(s: &str) -> Departure {
        Departure {
            at: parse_query_time(s).unwrap(),
            day_type: DayType::Weekday,
            window: WindowCategory::OffPeak,
        }
    }

    #[test]
    fn closed_renders_sentinel() {
        let query = parse_query_time("2023-10-10 03:00:00").unwrap();
        assert_eq!(Timetable::Closed.labels(query), vec!["Station closed!"]);
        assert!(Timetable::Closed.next_departure(query).is_none());
        assert!(Timetable::Closed.is_closed());
    }

    #[test]
    fn empty_renders_nothing() {
        let query = parse_query_time("2023-10-10 10:00:00").unwrap();
        assert!(Timetable::Empty.labels(query).is_empty());
        assert!(Timetable::Empty.next_departure(query).is_none());
        assert!(!Timetable::Empty.is_closed());
    }

    #[test]
    fn labels_show_date_after_midnight() {
        let query = parse_query_time("2023-10-13 23:50:00").unwrap();
        let table = Timetable::Entries(vec![
            departure("2023-10-13 23:50:00"),
            departure("2023-10-14 00:10:00"),
        ]);
        assert_eq!(table.labels(query), vec!["23:50", "2023-10-14 00:10"]);
    }

    #[test]
    fn next_departure_finds_first_at_or_after() {
        let table = Timetable::Entries(vec![
            departure("2023-10-10 10:00:00"),
            departure("2023-10-10 10:15:00"),
        ]);

        let at = parse_query_time("2023-10-10 10:00:00").unwrap();
        assert_eq!(table.next_departure(at).unwrap().at, at);

        let at = parse_query_time("2023-10-10 10:01:00").unwrap();
        assert_eq!(
            table.next_departure(at).unwrap().at,
            parse_query_time("2023-10-10 10:15:00").unwrap()
        );

        let at = parse_query_time("2023-10-10 10:16:00").unwrap();
        assert!(table.next_departure(at).is_none());
    }

    #[test]
    fn window_periods() {
        assert_eq!(WindowCategory::Peak.period(), Period::Peak);
        assert_eq!(WindowCategory::Express.period(), Period::Peak);
        assert_eq!(WindowCategory::Late.period(), Period::OffPeak);
        assert_eq!(WindowCategory::WeekendNight.period(), Period::OffPeak);
    }
}
