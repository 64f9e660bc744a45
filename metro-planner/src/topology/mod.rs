//! The network topology: stations, lines and how they connect.
//!
//! A [`Topology`] is built once from raw records and never mutated. Every
//! reference is validated at load, so stations and lines are addressed by
//! dense ids from then on and lookups on the search paths are plain vector
//! indexing.

mod records;

#[cfg(test)]
pub(crate) mod fixtures;

pub use records::{LineRecord, SegmentRecord, StationRecord, TransferRecord};

use std::collections::{HashMap, HashSet};

use tracing::debug;

use crate::domain::{LineId, LookupError, MalformedTopology, Minutes, StationId};
use crate::timetable::LineSchedule;
use crate::transfers::{TransferTable, TransferTimes};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Station {
    pub code: String,
    pub name: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Line {
    pub code: String,
    pub name: String,
    pub schedule: LineSchedule,
}

/// How a neighbor is reached.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Hop {
    /// Ride the line to an adjacent station.
    Travel { minutes: Minutes },
    /// Stay at the station and change from `from_line` to the neighbor's line.
    Transfer { from_line: LineId },
}

/// One entry of a station's adjacency list.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Neighbor {
    pub station: StationId,
    pub line: LineId,
    pub hop: Hop,
}

impl Neighbor {
    pub fn is_transfer(&self) -> bool {
        matches!(self.hop, Hop::Transfer { .. })
    }

    fn sort_key(&self) -> (StationId, LineId, Option<LineId>) {
        let from_line = match self.hop {
            Hop::Travel { .. } => None,
            Hop::Transfer { from_line } => Some(from_line),
        };
        (self.station, self.line, from_line)
    }
}

/// Immutable stations, lines and connectivity.
#[derive(Debug, Clone)]
pub struct Topology {
    stations: Vec<Station>,
    lines: Vec<Line>,
    station_keys: HashMap<String, StationId>,
    line_keys: HashMap<String, LineId>,
    /// Indexed by `StationId`; sorted.
    neighbors: Vec<Vec<Neighbor>>,
    /// Indexed by `StationId`; sorted.
    lines_at: Vec<Vec<LineId>>,
    segment_count: usize,
    transfers: TransferTable,
}

impl Topology {
    /// Validate raw records and build the topology.
    ///
    /// Segments repeated for the same station pair and line keep the first
    /// travel time.
    pub fn load(
        stations: &[StationRecord],
        lines: &[LineRecord],
        segments: &[SegmentRecord],
        transfers: &[TransferRecord],
    ) -> Result<Self, MalformedTopology> {
        let mut station_list = Vec::with_capacity(stations.len());
        let mut by_code: HashMap<&str, StationId> = HashMap::new();
        for record in stations {
            let id = StationId::new(station_list.len());
            if by_code.insert(record.code.as_str(), id).is_some() {
                return Err(MalformedTopology::DuplicateStation(record.code.clone()));
            }
            station_list.push(Station {
                code: record.code.clone(),
                name: record.name.clone(),
            });
        }

        let station_ref = |referenced_by: &'static str, code: &str| {
            by_code
                .get(code)
                .copied()
                .ok_or_else(|| MalformedTopology::UnknownStation {
                    referenced_by,
                    code: code.to_string(),
                })
        };

        let mut line_list = Vec::with_capacity(lines.len());
        let mut line_by_code: HashMap<&str, LineId> = HashMap::new();
        for record in lines {
            let id = LineId::new(line_list.len());
            if line_by_code.insert(record.code.as_str(), id).is_some() {
                return Err(MalformedTopology::DuplicateLine(record.code.clone()));
            }
            let schedule = record
                .schedule
                .clone()
                .map_stations(|code| station_ref("schedule", &code))?;
            schedule
                .validate()
                .map_err(|reason| MalformedTopology::InvalidSchedule {
                    line: record.code.clone(),
                    reason,
                })?;
            line_list.push(Line {
                code: record.code.clone(),
                name: record.name.clone(),
                schedule,
            });
        }

        let line_ref = |referenced_by: &'static str, code: &str| {
            line_by_code
                .get(code)
                .copied()
                .ok_or_else(|| MalformedTopology::UnknownLine {
                    referenced_by,
                    code: code.to_string(),
                })
        };

        let mut neighbors: Vec<Vec<Neighbor>> = vec![Vec::new(); station_list.len()];
        let mut served: Vec<HashSet<LineId>> = vec![HashSet::new(); station_list.len()];
        let mut seen_segments = HashSet::new();
        for record in segments {
            let from = station_ref("segment", &record.from)?;
            let to = station_ref("segment", &record.to)?;
            let line = line_ref("segment", &record.line)?;
            if from == to {
                return Err(MalformedTopology::SelfLoop {
                    line: record.line.clone(),
                    station: record.from.clone(),
                });
            }
            if record.travel_minutes == 0 {
                return Err(MalformedTopology::ZeroTravelTime {
                    from: record.from.clone(),
                    to: record.to.clone(),
                    line: record.line.clone(),
                });
            }
            if !seen_segments.insert((from.min(to), from.max(to), line)) {
                continue;
            }

            let hop = Hop::Travel {
                minutes: record.travel_minutes,
            };
            neighbors[from.index()].push(Neighbor {
                station: to,
                line,
                hop,
            });
            neighbors[to.index()].push(Neighbor {
                station: from,
                line,
                hop,
            });
            served[from.index()].insert(line);
            served[to.index()].insert(line);
        }

        let lines_at: Vec<Vec<LineId>> = served
            .into_iter()
            .map(|set| {
                let mut lines: Vec<LineId> = set.into_iter().collect();
                lines.sort();
                lines
            })
            .collect();

        let mut transfer_table = TransferTable::new();
        for record in transfers {
            let station = station_ref("transfer", &record.station)?;
            let from_line = line_ref("transfer", &record.from_line)?;
            let to_line = line_ref("transfer", &record.to_line)?;
            if from_line == to_line {
                return Err(MalformedTopology::SameLineTransfer {
                    station: record.station.clone(),
                    line: record.from_line.clone(),
                });
            }
            for (line, code) in [(from_line, &record.from_line), (to_line, &record.to_line)] {
                if lines_at[station.index()].binary_search(&line).is_err() {
                    return Err(MalformedTopology::LineNotAtStation {
                        station: record.station.clone(),
                        line: code.clone(),
                    });
                }
            }
            transfer_table.add(
                station,
                from_line,
                to_line,
                TransferTimes::new(record.peak_minutes, record.off_peak_minutes),
            );
        }

        for (index, lines) in lines_at.iter().enumerate() {
            let station = StationId::new(index);
            for &from_line in lines {
                for &to_line in lines {
                    if from_line != to_line {
                        neighbors[index].push(Neighbor {
                            station,
                            line: to_line,
                            hop: Hop::Transfer { from_line },
                        });
                    }
                }
            }
        }
        for list in &mut neighbors {
            list.sort_by_key(Neighbor::sort_key);
        }

        let mut station_keys = HashMap::new();
        for (index, station) in station_list.iter().enumerate() {
            station_keys.insert(station.code.clone(), StationId::new(index));
        }
        // Display names resolve too, but never shadow a code.
        for (index, station) in station_list.iter().enumerate() {
            station_keys
                .entry(station.name.clone())
                .or_insert(StationId::new(index));
        }

        let mut line_keys = HashMap::new();
        for (index, line) in line_list.iter().enumerate() {
            line_keys.insert(line.code.clone(), LineId::new(index));
        }
        for (index, line) in line_list.iter().enumerate() {
            line_keys
                .entry(line.name.clone())
                .or_insert(LineId::new(index));
        }

        debug!(
            stations = station_list.len(),
            lines = line_list.len(),
            segments = seen_segments.len(),
            transfers = transfer_table.len(),
            "loaded topology"
        );

        Ok(Self {
            stations: station_list,
            lines: line_list,
            station_keys,
            line_keys,
            neighbors,
            lines_at,
            segment_count: seen_segments.len(),
            transfers: transfer_table,
        })
    }

    pub fn stations(&self) -> &[Station] {
        &self.stations
    }

    pub fn lines(&self) -> &[Line] {
        &self.lines
    }

    pub fn station_count(&self) -> usize {
        self.stations.len()
    }

    pub fn line_count(&self) -> usize {
        self.lines.len()
    }

    /// Number of distinct segments after de-duplication.
    pub fn segment_count(&self) -> usize {
        self.segment_count
    }

    pub fn station_ids(&self) -> impl Iterator<Item = StationId> + '_ {
        (0..self.stations.len()).map(StationId::new)
    }

    pub fn station(&self, id: StationId) -> &Station {
        &self.stations[id.index()]
    }

    pub fn line(&self, id: LineId) -> &Line {
        &self.lines[id.index()]
    }

    /// Display name of a station.
    pub fn name(&self, id: StationId) -> &str {
        &self.stations[id.index()].name
    }

    /// Resolve a station by display name or code.
    pub fn station_id(&self, key: &str) -> Result<StationId, LookupError> {
        self.station_keys
            .get(key)
            .copied()
            .ok_or_else(|| LookupError::StationNotFound(key.to_string()))
    }

    /// Resolve a line by code or display name.
    pub fn line_id(&self, key: &str) -> Result<LineId, LookupError> {
        self.line_keys
            .get(key)
            .copied()
            .ok_or_else(|| LookupError::LineNotFound(key.to_string()))
    }

    /// Adjacent stations by line, plus same-station transfers for every
    /// ordered pair of distinct lines serving the station. Sorted by
    /// station, then line.
    pub fn neighbors(&self, id: StationId) -> &[Neighbor] {
        &self.neighbors[id.index()]
    }

    /// Lines serving a station, in id order.
    pub fn lines_at(&self, id: StationId) -> &[LineId] {
        &self.lines_at[id.index()]
    }

    pub fn serves(&self, line: LineId, station: StationId) -> bool {
        self.lines_at[station.index()].binary_search(&line).is_ok()
    }

    pub fn transfers(&self) -> &TransferTable {
        &self.transfers
    }
}
