//! Per-line service rules.
//!
//! A [`LineSchedule`] describes when a line runs and how often. It is
//! generic over the station reference so the same shape serves both the
//! on-disk records (station codes) and the loaded topology (dense ids).

use chrono::Weekday;
use serde::{Deserialize, Serialize};

use super::DayType;
use crate::domain::{ClockTime, Minutes, ScheduleError, StationId, TimeWindow};

/// Service rules for one line.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
#[serde(bound(deserialize = "S: Deserialize<'de>"))]
pub struct LineSchedule<S = StationId> {
    /// Open/close times. Outside this window the line is closed unless a
    /// weekend-night extension applies.
    pub service: TimeWindow,

    /// Peak intervals within the service day.
    pub peak_windows: Vec<TimeWindow>,

    /// Day types on which the peak windows apply.
    pub peak_days: Vec<DayType>,

    pub headways: Headways,

    pub late: Option<LateService>,

    pub early_morning: Option<EarlyMorning<S>>,

    pub weekend_night: Option<WeekendNight<S>>,

    pub express: Option<ExpressService<S>>,
}

/// Base headways in minutes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Headways {
    pub peak: Minutes,
    /// `None` means the line only runs in peak, late or special windows.
    #[serde(default)]
    pub off_peak: Option<Minutes>,
}

/// Reduced service late in the evening.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct LateService {
    pub window: TimeWindow,
    pub headway: Minutes,
}

/// High-frequency service at the start of the day.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(bound(deserialize = "S: Deserialize<'de>"))]
pub struct EarlyMorning<S = StationId> {
    pub window: TimeWindow,
    pub headway: Minutes,
    /// Stations with the early-morning service; empty means every station.
    #[serde(default)]
    pub stations: Vec<S>,
}

/// Extended hours past the normal close on selected nights.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(bound(deserialize = "S: Deserialize<'de>"))]
pub struct WeekendNight<S = StationId> {
    /// Service days (the day the evening starts) that get the extension.
    pub days: Vec<Weekday>,
    /// Closing time of the extension.
    pub close: ClockTime,
    pub headway: Minutes,
    /// Stations with the extension; empty means every station.
    #[serde(default)]
    pub stations: Vec<S>,
}

/// Stations served by express trains during peak windows.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(bound(deserialize = "S: Deserialize<'de>"))]
pub struct ExpressService<S = StationId> {
    pub stations: Vec<S>,
    pub headway: Minutes,
}

impl<S> Default for LineSchedule<S> {
    fn default() -> Self {
        Self {
            service: TimeWindow::new(ClockTime::at(6, 0), ClockTime::at(22, 0)),
            peak_windows: vec![
                TimeWindow::new(ClockTime::at(7, 0), ClockTime::at(9, 0)),
                TimeWindow::new(ClockTime::at(17, 0), ClockTime::at(19, 0)),
            ],
            peak_days: vec![DayType::Weekday],
            headways: Headways::default(),
            late: None,
            early_morning: None,
            weekend_night: None,
            express: None,
        }
    }
}

impl Default for Headways {
    fn default() -> Self {
        Self {
            peak: 10,
            off_peak: Some(15),
        }
    }
}

impl<S> EarlyMorning<S> {
    pub fn serves(&self, station: &S) -> bool
    where
        S: PartialEq,
    {
        self.stations.is_empty() || self.stations.contains(station)
    }
}

impl<S> WeekendNight<S> {
    pub fn serves(&self, station: &S) -> bool
    where
        S: PartialEq,
    {
        self.stations.is_empty() || self.stations.contains(station)
    }
}

impl<S> ExpressService<S> {
    pub fn serves(&self, station: &S) -> bool
    where
        S: PartialEq,
    {
        self.stations.contains(station)
    }
}

impl<S> LineSchedule<S> {
    /// Convert every station reference, failing on the first that does not map.
    pub fn map_stations<T, E>(
        self,
        mut f: impl FnMut(S) -> Result<T, E>,
    ) -> Result<LineSchedule<T>, E> {
        let mut convert = |stations: Vec<S>| -> Result<Vec<T>, E> {
            stations.into_iter().map(&mut f).collect()
        };

        Ok(LineSchedule {
            service: self.service,
            peak_windows: self.peak_windows,
            peak_days: self.peak_days,
            headways: self.headways,
            late: self.late,
            early_morning: match self.early_morning {
                Some(em) => Some(EarlyMorning {
                    window: em.window,
                    headway: em.headway,
                    stations: convert(em.stations)?,
                }),
                None => None,
            },
            weekend_night: match self.weekend_night {
                Some(wn) => Some(WeekendNight {
                    days: wn.days,
                    close: wn.close,
                    headway: wn.headway,
                    stations: convert(wn.stations)?,
                }),
                None => None,
            },
            express: match self.express {
                Some(ex) => Some(ExpressService {
                    stations: convert(ex.stations)?,
                    headway: ex.headway,
                }),
                None => None,
            },
        })
    }

    /// Check the rules are usable for generation.
    pub fn validate(&self) -> Result<(), ScheduleError> {
        if self.headways.peak == 0 {
            return Err(ScheduleError::ZeroHeadway("peak"));
        }
        if self.headways.off_peak == Some(0) {
            return Err(ScheduleError::ZeroHeadway("off-peak"));
        }
        if let Some(late) = &self.late {
            if late.headway == 0 {
                return Err(ScheduleError::ZeroHeadway("late"));
            }
        }
        if let Some(em) = &self.early_morning {
            if em.headway == 0 {
                return Err(ScheduleError::ZeroHeadway("early-morning"));
            }
        }
        if let Some(wn) = &self.weekend_night {
            if wn.headway == 0 {
                return Err(ScheduleError::ZeroHeadway("weekend-night"));
            }
            if wn.close == self.service.end {
                return Err(ScheduleError::ExtensionCloseAtServiceClose);
            }
            if self.service.length_minutes() + self.service.end.minutes_until(wn.close)
                >= crate::domain::MINUTES_PER_DAY
            {
                return Err(ScheduleError::ExtensionOverlapsOpening);
            }
        }
        if let Some(ex) = &self.express {
            if ex.headway == 0 {
                return Err(ScheduleError::ZeroHeadway("express"));
            }
            if ex.stations.is_empty() {
                return Err(ScheduleError::EmptyExpress);
            }
        }
        Ok(())
    }

    /// The extended window past the normal close, if configured.
    pub fn extension_window(&self) -> Option<TimeWindow> {
        self.weekend_night
            .as_ref()
            .map(|wn| TimeWindow::new(self.service.end, wn.close))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_standard_service() {
        let schedule: LineSchedule = LineSchedule::default();
        assert_eq!(schedule.service.start, ClockTime::at(6, 0));
        assert_eq!(schedule.service.end, ClockTime::at(22, 0));
        assert_eq!(schedule.peak_windows.len(), 2);
        assert_eq!(schedule.peak_days, vec![DayType::Weekday]);
        assert_eq!(schedule.headways.peak, 10);
        assert_eq!(schedule.headways.off_peak, Some(15));
        assert!(schedule.validate().is_ok());
    }

    #[test]
    fn deserialize_partial_record() {
        let json = r#"{
            "service": {"start": "05:30", "end": "23:00"},
            "headways": {"peak": 6},
            "express": {"stations": ["A", "C"], "headway": 8}
        }"#;
        let schedule: LineSchedule<String> = serde_json::from_str(json).unwrap();

        assert_eq!(schedule.service.start, ClockTime::at(5, 30));
        assert_eq!(schedule.headways.off_peak, None);
        assert_eq!(schedule.peak_windows.len(), 2);
        let express = schedule.express.unwrap();
        assert!(express.serves(&"A".to_string()));
        assert!(!express.serves(&"B".to_string()));
    }

    #[test]
    fn deserialize_weekend_night() {
        let json = r#"{
            "weekend_night": {"days": ["Fri", "Sat"], "close": "00:30", "headway": 20}
        }"#;
        let schedule: LineSchedule<String> = serde_json::from_str(json).unwrap();
        let wn = schedule.weekend_night.as_ref().unwrap();

        assert_eq!(wn.days, vec![Weekday::Fri, Weekday::Sat]);
        assert!(wn.serves(&"anywhere".to_string()));
        assert_eq!(
            schedule.extension_window(),
            Some(TimeWindow::new(ClockTime::at(22, 0), ClockTime::at(0, 30)))
        );
    }

    #[test]
    fn deserialize_without_station_lists() {
        let json = r#"{
            "early_morning": {"window": {"start": "05:00", "end": "06:00"}, "headway": 5},
            "weekend_night": {"days": ["Sat"], "close": "01:00", "headway": 30}
        }"#;
        let schedule: LineSchedule<String> = serde_json::from_str(json).unwrap();

        assert!(schedule.early_morning.unwrap().stations.is_empty());
        assert!(schedule.weekend_night.unwrap().stations.is_empty());

        let empty: LineSchedule<String> = serde_json::from_str("{}").unwrap();
        assert_eq!(empty, LineSchedule::default());
    }

    #[test]
    fn validate_rejects_express_without_stations() {
        let mut schedule: LineSchedule = LineSchedule::default();
        schedule.express = Some(ExpressService {
            stations: vec![],
            headway: 8,
        });
        assert_eq!(schedule.validate(), Err(ScheduleError::EmptyExpress));
    }

    #[test]
    fn map_stations_converts_every_reference() {
        let schedule = LineSchedule::<&str> {
            early_morning: Some(EarlyMorning {
                window: TimeWindow::new(ClockTime::at(6, 0), ClockTime::at(7, 0)),
                headway: 5,
                stations: vec!["a"],
            }),
            express: Some(ExpressService {
                stations: vec!["a", "bb"],
                headway: 8,
            }),
            ..LineSchedule::default()
        };

        let mapped: LineSchedule<usize> = schedule
            .map_stations(|s| Ok::<_, ()>(s.len()))
            .unwrap();
        assert_eq!(mapped.early_morning.unwrap().stations, vec![1]);
        assert_eq!(mapped.express.unwrap().stations, vec![1, 2]);
    }

    #[test]
    fn map_stations_stops_at_first_failure() {
        let schedule = LineSchedule::<&str> {
            express: Some(ExpressService {
                stations: vec!["ok", "bad"],
                headway: 8,
            }),
            ..LineSchedule::default()
        };

        let result: Result<LineSchedule<&str>, String> = schedule.map_stations(|s| {
            if s == "bad" {
                Err(format!("unknown {s}"))
            } else {
                Ok(s)
            }
        });
        assert_eq!(result.unwrap_err(), "unknown bad");
    }

    #[test]
    fn validate_rejects_zero_headways() {
        let mut schedule: LineSchedule = LineSchedule::default();
        schedule.headways.peak = 0;
        assert_eq!(schedule.validate(), Err(ScheduleError::ZeroHeadway("peak")));

        let mut schedule: LineSchedule = LineSchedule::default();
        schedule.late = Some(LateService {
            window: TimeWindow::new(ClockTime::at(21, 0), ClockTime::at(22, 0)),
            headway: 0,
        });
        assert_eq!(schedule.validate(), Err(ScheduleError::ZeroHeadway("late")));
        assert_eq!(
            schedule.validate().unwrap_err().to_string(),
            "late headway must be positive"
        );
    }

    #[test]
    fn validate_rejects_extension_reaching_next_opening() {
        let mut schedule: LineSchedule = LineSchedule::default();
        schedule.weekend_night = Some(WeekendNight {
            days: vec![Weekday::Fri],
            close: ClockTime::at(6, 30),
            headway: 20,
            stations: vec![],
        });
        assert_eq!(
            schedule.validate(),
            Err(ScheduleError::ExtensionOverlapsOpening)
        );

        schedule.weekend_night = Some(WeekendNight {
            days: vec![Weekday::Fri],
            close: ClockTime::at(1, 0),
            headway: 20,
            stations: vec![],
        });
        assert!(schedule.validate().is_ok());
    }
}
