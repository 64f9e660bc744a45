//! Name-based queries over one network snapshot.

use std::time::Instant;

use chrono::NaiveDateTime;
use tracing::debug;

use super::config::PlannerConfig;
use super::error::PlanError;
use super::express::{self, ExpressRoute};
use super::fastest::fastest_path;
use super::longest::{LongestPath, LongestPathLimits, longest_simple_path};
use super::route::{Journey, Route};
use super::shortest::shortest_path;
use crate::domain::{LineId, LookupError, StationId};
use crate::network::Network;
use crate::timetable::{Timetable, WindowCategory};

/// Answers planning queries against a borrowed snapshot.
///
/// Cheap to construct; build one per request.
#[derive(Debug, Clone, Copy)]
pub struct Planner<'a> {
    network: &'a Network,
    config: &'a PlannerConfig,
}

impl<'a> Planner<'a> {
    pub fn new(network: &'a Network, config: &'a PlannerConfig) -> Self {
        Self { network, config }
    }

    pub fn network(&self) -> &'a Network {
        self.network
    }

    pub fn config(&self) -> &'a PlannerConfig {
        self.config
    }

    /// Station id for a display name or code.
    pub fn resolve_station(&self, name: &str) -> Result<StationId, LookupError> {
        self.network.topology().station_id(name)
    }

    pub fn resolve_line(&self, key: &str) -> Result<LineId, LookupError> {
        self.network.topology().line_id(key)
    }

    pub fn station_names(&self, stations: &[StationId]) -> Vec<String> {
        let topology = self.network.topology();
        stations
            .iter()
            .map(|&s| topology.name(s).to_string())
            .collect()
    }

    /// Weight-minimal route between resolved stations.
    pub fn shortest_path(&self, start: StationId, end: StationId) -> Option<Route> {
        shortest_path(self.network.graph(), start, end)
    }

    pub fn shortest_path_by_name(&self, start: &str, end: &str) -> Result<Option<Route>, PlanError> {
        let start = self.resolve_station(start)?;
        let end = self.resolve_station(end)?;
        Ok(self.shortest_path(start, end))
    }

    /// Earliest-arrival journey leaving at `departure`.
    pub fn fastest_path(
        &self,
        start: &str,
        end: &str,
        departure: NaiveDateTime,
    ) -> Result<Option<Journey>, PlanError> {
        let start = self.resolve_station(start)?;
        let end = self.resolve_station(end)?;
        let fallback = self.network.graph().policy().fallback_minutes;
        Ok(fastest_path(
            self.network.topology(),
            self.network.timetables(),
            fallback,
            start,
            end,
            departure,
        ))
    }

    /// Departures of `line` at `station` from `at`.
    ///
    /// An unknown line, or a station the line does not serve, yields
    /// [`Timetable::Empty`]. An unknown station is an error.
    pub fn timetable(
        &self,
        line: &str,
        station: &str,
        at: NaiveDateTime,
    ) -> Result<Timetable, PlanError> {
        let station = self.resolve_station(station)?;
        let Some(line) = self.serving_line(line, station) else {
            return Ok(Timetable::Empty);
        };
        Ok(self.network.timetables().timetable(line, station, at))
    }

    /// The window category `line` runs under at `station`, if it is running.
    pub fn service_window(
        &self,
        line: &str,
        station: &str,
        at: NaiveDateTime,
    ) -> Result<Option<WindowCategory>, PlanError> {
        let station = self.resolve_station(station)?;
        Ok(self
            .serving_line(line, station)
            .and_then(|line| self.network.timetables().window_category(line, station, at)))
    }

    /// Longest path without repeated stations, bounded by the configured
    /// expansion cap and time limit.
    pub fn longest_simple_path(&self) -> LongestPath {
        let limits = LongestPathLimits {
            max_expansions: self.config.longest_path_max_expansions,
            deadline: self
                .config
                .longest_path_time_limit()
                .map(|limit| Instant::now() + limit),
        };
        longest_simple_path(self.network.topology(), &limits)
    }

    pub fn express_path(&self, start: &str, end: &str) -> Result<Option<ExpressRoute>, PlanError> {
        let start = self.resolve_station(start)?;
        let end = self.resolve_station(end)?;
        express::express_path(self.network.topology(), self.network.graph(), start, end)
    }

    fn serving_line(&self, key: &str, station: StationId) -> Option<LineId> {
        let topology = self.network.topology();
        let line = topology.line_id(key).ok()?;
        if topology.serves(line, station) {
            Some(line)
        } else {
            debug!(line = key, station = station.index(), "line does not serve station");
            None
        }
    }
}
