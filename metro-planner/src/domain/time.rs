//! Clock-time handling for service rules.
//!
//! Line schedules are written as "HH:MM" times of day, and service windows
//! may cross midnight (a line opening at 23:00 and closing at 00:30). This
//! module provides a validated time-of-day type and a window type that
//! resolves such wraparound against concrete instants.

use chrono::{Duration, NaiveDate, NaiveDateTime, NaiveTime, Timelike};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Minutes in a day.
pub const MINUTES_PER_DAY: u16 = 24 * 60;

/// Error returned when parsing an invalid time string.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("invalid time: {reason}")]
pub struct TimeError {
    reason: &'static str,
}

impl TimeError {
    fn new(reason: &'static str) -> Self {
        Self { reason }
    }
}

/// A time of day at minute resolution.
///
/// Stored as minutes past midnight, always in `0..1440`.
///
/// # Examples
///
/// ```
/// use metro_planner::domain::ClockTime;
///
/// let t = ClockTime::parse_hhmm("07:30").unwrap();
/// assert_eq!(t.minutes(), 450);
/// assert_eq!(t.to_string(), "07:30");
///
/// assert!(ClockTime::parse_hhmm("24:00").is_err());
/// assert!(ClockTime::parse_hhmm("7:30").is_err());
/// ```
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct ClockTime(u16);

impl ClockTime {
    /// Midnight, 00:00.
    pub const MIDNIGHT: ClockTime = ClockTime(0);

    /// Build a clock time from constant hour and minute values.
    ///
    /// Panics if the values are out of range; use [`ClockTime::from_hm`] for
    /// untrusted input.
    pub const fn at(hour: u16, minute: u16) -> Self {
        assert!(hour < 24 && minute < 60, "clock time out of range");
        Self(hour * 60 + minute)
    }

    /// Build a clock time from hour and minute values.
    pub fn from_hm(hour: u32, minute: u32) -> Result<Self, TimeError> {
        if hour > 23 {
            return Err(TimeError::new("hour must be 0-23"));
        }
        if minute > 59 {
            return Err(TimeError::new("minute must be 0-59"));
        }
        Ok(Self((hour * 60 + minute) as u16))
    }

    /// Parse a time from "HH:MM" format.
    pub fn parse_hhmm(s: &str) -> Result<Self, TimeError> {
        if s.len() != 5 {
            return Err(TimeError::new("expected HH:MM format"));
        }

        let bytes = s.as_bytes();
        if bytes[2] != b':' {
            return Err(TimeError::new("expected colon at position 2"));
        }

        let hour =
            parse_two_digits(&bytes[0..2]).ok_or_else(|| TimeError::new("invalid hour digits"))?;
        let minute = parse_two_digits(&bytes[3..5])
            .ok_or_else(|| TimeError::new("invalid minute digits"))?;

        Self::from_hm(hour, minute)
    }

    /// The time of day of an instant, truncated to the minute.
    pub fn of(instant: &NaiveDateTime) -> Self {
        Self((instant.hour() * 60 + instant.minute()) as u16)
    }

    /// Minutes past midnight.
    pub fn minutes(self) -> u16 {
        self.0
    }

    pub fn hour(self) -> u16 {
        self.0 / 60
    }

    pub fn minute(self) -> u16 {
        self.0 % 60
    }

    /// Minutes from `self` forward to `later`, wrapping past midnight.
    pub fn minutes_until(self, later: ClockTime) -> u16 {
        (later.0 + MINUTES_PER_DAY - self.0) % MINUTES_PER_DAY
    }

    pub fn to_naive_time(self) -> NaiveTime {
        // Always valid: the value is below 1440.
        NaiveTime::from_hms_opt(u32::from(self.hour()), u32::from(self.minute()), 0)
            .unwrap_or(NaiveTime::MIN)
    }

    /// This time of day on the given date.
    pub fn on(self, date: NaiveDate) -> NaiveDateTime {
        date.and_time(self.to_naive_time())
    }
}

impl fmt::Debug for ClockTime {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "ClockTime({self})")
    }
}

impl fmt::Display for ClockTime {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:02}:{:02}", self.hour(), self.minute())
    }
}

impl TryFrom<String> for ClockTime {
    type Error = TimeError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::parse_hhmm(&value)
    }
}

impl From<ClockTime> for String {
    fn from(value: ClockTime) -> Self {
        value.to_string()
    }
}

/// A half-open `[start, end)` range of clock times.
///
/// When `end <= start` the window crosses midnight; `start == end` covers
/// the whole day.
///
/// # Examples
///
/// ```
/// use metro_planner::domain::{ClockTime, TimeWindow};
///
/// let night = TimeWindow::new(ClockTime::at(23, 0), ClockTime::at(0, 30));
/// assert!(night.crosses_midnight());
/// assert!(night.contains(ClockTime::at(0, 10)));
/// assert!(!night.contains(ClockTime::at(0, 30)));
/// assert!(!night.contains(ClockTime::at(22, 59)));
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct TimeWindow {
    pub start: ClockTime,
    pub end: ClockTime,
}

impl TimeWindow {
    pub fn new(start: ClockTime, end: ClockTime) -> Self {
        Self { start, end }
    }

    pub fn crosses_midnight(&self) -> bool {
        self.end <= self.start
    }

    /// Length of the window in minutes (1440 for a whole-day window).
    pub fn length_minutes(&self) -> u16 {
        match self.start.minutes_until(self.end) {
            0 => MINUTES_PER_DAY,
            len => len,
        }
    }

    pub fn length(&self) -> Duration {
        Duration::minutes(i64::from(self.length_minutes()))
    }

    /// Whether a time of day falls inside the window.
    pub fn contains(&self, time: ClockTime) -> bool {
        self.start.minutes_until(time) < self.length_minutes()
    }

    /// The window opened on `date`, as concrete instants.
    pub fn on(&self, date: NaiveDate) -> (NaiveDateTime, NaiveDateTime) {
        let open = self.start.on(date);
        (open, open + self.length())
    }

    /// The occurrence of the window that contains `instant`, if any.
    ///
    /// A query at 00:10 against a 23:00–00:30 window resolves to the window
    /// that opened at 23:00 the previous day.
    pub fn occurrence(&self, instant: NaiveDateTime) -> Option<(NaiveDateTime, NaiveDateTime)> {
        let today = instant.date();
        let (open, close) = self.on(today);
        if open <= instant {
            return (instant < close).then_some((open, close));
        }

        let yesterday = today.pred_opt()?;
        let (open, close) = self.on(yesterday);
        (instant < close).then_some((open, close))
    }
}

/// Parse a query instant as sent by callers: "YYYY-MM-DD HH:MM:SS", or the
/// same without seconds.
pub fn parse_query_time(s: &str) -> Result<NaiveDateTime, TimeError> {
    NaiveDateTime::parse_from_str(s, "%Y-%m-%d %H:%M:%S")
        .or_else(|_| NaiveDateTime::parse_from_str(s, "%Y-%m-%d %H:%M"))
        .map_err(|_| TimeError::new("expected YYYY-MM-DD HH:MM:SS"))
}

/// Parse two ASCII digit bytes into a u32.
fn parse_two_digits(bytes: &[u8]) -> Option<u32> {
    if bytes.len() != 2 {
        return None;
    }
    let d1 = (bytes[0] as char).to_digit(10)?;
    let d2 = (bytes[1] as char).to_digit(10)?;
    Some(d1 * 10 + d2)
}
