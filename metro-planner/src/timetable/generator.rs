//! Timetable generation from line schedules.

use std::collections::BTreeSet;

use chrono::{Datelike, Duration, NaiveDate, NaiveDateTime, Weekday};
use tracing::trace;

use super::{DayType, Departure, DepartureSource, LineSchedule, Timetable, WindowCategory};
use crate::domain::{LineId, Minutes, StationId};
use crate::topology::Topology;
use crate::transfers::Period;

/// Upper bound on window hand-offs followed by a live lookup.
const MAX_WINDOW_HOPS: usize = 4;

/// Generates departures from per-line schedules.
///
/// Holds no mutable state; every call is a pure function of the schedules,
/// the holiday calendar and the query.
#[derive(Debug, Clone, Default)]
pub struct TimetableGenerator {
    /// Indexed by `LineId`.
    schedules: Vec<LineSchedule>,
    holidays: BTreeSet<NaiveDate>,
}

/// The rule that applies to one (line, station, instant).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Plan {
    UnknownLine,
    Closed,
    Empty,
    Run(Run),
}

/// Departures every `headway` from `from`, strictly before `until`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct Run {
    from: NaiveDateTime,
    until: NaiveDateTime,
    headway: Duration,
    window: WindowCategory,
    day_type: DayType,
}

impl Run {
    fn new(
        from: NaiveDateTime,
        until: NaiveDateTime,
        headway: Minutes,
        window: WindowCategory,
        day_type: DayType,
    ) -> Self {
        Self {
            from,
            until,
            headway: Duration::minutes(i64::from(headway)),
            window,
            day_type,
        }
    }

    fn first_at_or_after(&self, at: NaiveDateTime) -> Option<NaiveDateTime> {
        let slot = if at <= self.from {
            self.from
        } else {
            let elapsed = (at - self.from).num_milliseconds();
            let step = self.headway.num_milliseconds();
            let steps = (elapsed + step - 1) / step;
            self.from + Duration::milliseconds(steps * step)
        };
        (slot < self.until).then_some(slot)
    }

    fn departures(&self, at: NaiveDateTime) -> Vec<Departure> {
        let mut out = Vec::new();
        let mut next = self.first_at_or_after(at);
        while let Some(slot) = next {
            out.push(Departure {
                at: slot,
                day_type: self.day_type,
                window: self.window,
            });
            let following = slot + self.headway;
            next = (following < self.until).then_some(following);
        }
        out
    }
}

impl TimetableGenerator {
    /// Create a generator from schedules indexed by line id.
    pub fn new(schedules: Vec<LineSchedule>, holidays: BTreeSet<NaiveDate>) -> Self {
        Self {
            schedules,
            holidays,
        }
    }

    /// Create a generator for every line of a topology.
    pub fn from_topology(topology: &Topology, holidays: BTreeSet<NaiveDate>) -> Self {
        let schedules = topology
            .lines()
            .iter()
            .map(|line| line.schedule.clone())
            .collect();
        Self::new(schedules, holidays)
    }

    pub fn schedule(&self, line: LineId) -> Option<&LineSchedule> {
        self.schedules.get(line.index())
    }

    pub fn holidays(&self) -> &BTreeSet<NaiveDate> {
        &self.holidays
    }

    /// Classify a service day.
    pub fn day_type(&self, date: NaiveDate) -> DayType {
        if self.holidays.contains(&date) {
            DayType::Holiday
        } else if matches!(date.weekday(), Weekday::Sat | Weekday::Sun) {
            DayType::Weekend
        } else {
            DayType::Weekday
        }
    }

    /// Departures of `line` at `station` from `at` to the end of the active
    /// window.
    ///
    /// A window with no slots left hands over to the one that follows it,
    /// and on weekend-night service days the normal service runs on into
    /// the extension.
    ///
    /// Unknown lines produce [`Timetable::Empty`]; an instant outside
    /// service produces [`Timetable::Closed`].
    pub fn timetable(&self, line: LineId, station: StationId, at: NaiveDateTime) -> Timetable {
        let mut from = at;
        let mut hops = 0;
        let run = loop {
            match self.plan(line, station, from) {
                Plan::Run(run) if run.first_at_or_after(from).is_some() => break run,
                Plan::Run(run) if hops + 1 < MAX_WINDOW_HOPS => {
                    from = run.until;
                    hops += 1;
                }
                Plan::Closed if hops == 0 => return Timetable::Closed,
                _ => return Timetable::Empty,
            }
        };

        let mut departures = run.departures(from);
        if let Some(extension) = self.continuation(line, station, &run) {
            departures.extend(extension.departures(extension.from));
        }
        trace!(
            line = line.index(),
            station = station.index(),
            window = ?run.window,
            hops,
            count = departures.len(),
            "generated timetable"
        );
        Timetable::Entries(departures)
    }

    /// The window category in force, if the line is running.
    pub fn window_category(
        &self,
        line: LineId,
        station: StationId,
        at: NaiveDateTime,
    ) -> Option<WindowCategory> {
        match self.plan(line, station, at) {
            Plan::Run(run) => Some(run.window),
            _ => None,
        }
    }

    fn plan(&self, line: LineId, station: StationId, at: NaiveDateTime) -> Plan {
        let Some(schedule) = self.schedules.get(line.index()) else {
            return Plan::UnknownLine;
        };

        match schedule.service.occurrence(at) {
            Some((open, close)) => self.service_plan(schedule, station, at, open, close),
            None => self.extension_plan(schedule, station, at),
        }
    }

    /// Rules that apply inside the normal service window.
    fn service_plan(
        &self,
        schedule: &LineSchedule,
        station: StationId,
        at: NaiveDateTime,
        open: NaiveDateTime,
        close: NaiveDateTime,
    ) -> Plan {
        let day_type = self.day_type(open.date());

        if let Some(em) = schedule.early_morning.as_ref().filter(|em| em.serves(&station)) {
            if let Some((from, until)) = em.window.occurrence(at) {
                return Plan::Run(Run::new(
                    from,
                    until.min(close),
                    em.headway,
                    WindowCategory::EarlyMorning,
                    day_type,
                ));
            }
        }

        let in_peak = schedule.peak_days.contains(&day_type)
            && schedule
                .peak_windows
                .iter()
                .any(|w| w.occurrence(at).is_some());
        let late = schedule
            .late
            .filter(|late| late.window.occurrence(at).is_some());

        let (headway, window) = if in_peak {
            match schedule.express.as_ref().filter(|ex| ex.serves(&station)) {
                Some(express) => (express.headway, WindowCategory::Express),
                None => (schedule.headways.peak, WindowCategory::Peak),
            }
        } else if let Some(late) = late {
            (late.headway, WindowCategory::Late)
        } else if let Some(off_peak) = schedule.headways.off_peak {
            (off_peak, WindowCategory::OffPeak)
        } else {
            return Plan::Empty;
        };

        Plan::Run(Run::new(open, close, headway, window, day_type))
    }

    /// The weekend-night run that picks up where `run` stops, if any.
    fn continuation(&self, line: LineId, station: StationId, run: &Run) -> Option<Run> {
        if run.window == WindowCategory::WeekendNight {
            return None;
        }
        match self.plan(line, station, run.until) {
            Plan::Run(next) if next.window == WindowCategory::WeekendNight => Some(next),
            _ => None,
        }
    }

    /// Outside normal service only a weekend-night extension can run.
    fn extension_plan(&self, schedule: &LineSchedule, station: StationId, at: NaiveDateTime) -> Plan {
        let (Some(wn), Some(extension)) =
            (schedule.weekend_night.as_ref(), schedule.extension_window())
        else {
            return Plan::Closed;
        };
        let Some((from, until)) = extension.occurrence(at) else {
            return Plan::Closed;
        };

        let service_day = (from - schedule.service.length()).date();
        if !wn.days.contains(&service_day.weekday()) || !wn.serves(&station) {
            return Plan::Closed;
        }

        Plan::Run(Run::new(
            from,
            until,
            wn.headway,
            WindowCategory::WeekendNight,
            self.day_type(service_day),
        ))
    }
}

impl DepartureSource for TimetableGenerator {
    fn next_departure(
        &self,
        line: LineId,
        station: StationId,
        at: NaiveDateTime,
    ) -> Option<NaiveDateTime> {
        let mut at = at;
        for _ in 0..MAX_WINDOW_HOPS {
            let Plan::Run(run) = self.plan(line, station, at) else {
                return None;
            };
            if let Some(slot) = run.first_at_or_after(at) {
                return Some(slot);
            }
            // This window is exhausted; service may continue in the next one.
            at = run.until;
        }
        None
    }

    fn is_open(&self, line: LineId, station: StationId, at: NaiveDateTime) -> bool {
        matches!(self.plan(line, station, at), Plan::Run(_) | Plan::Empty)
    }

    fn period(&self, line: LineId, station: StationId, at: NaiveDateTime) -> Period {
        match self.plan(line, station, at) {
            Plan::Run(run) => run.window.period(),
            _ => Period::OffPeak,
        }
    }
}
