//! Time-dependent earliest-arrival search.
//!
//! Label-correcting search over the raw station adjacency. At each station
//! every (neighbor, line) pair is re-evaluated against the live timetable,
//! so the choice of line is made hop by hop rather than fixed up front.
//! A hop that has no further departure is a local dead end, not a failure.

use std::cmp::Ordering;
use std::collections::BinaryHeap;

use chrono::{Duration, NaiveDateTime};
use tracing::{debug, trace};

use super::route::Journey;
use crate::domain::{Minutes, StationId};
use crate::timetable::DepartureSource;
use crate::topology::{Hop, Topology};

#[derive(Clone, Eq, PartialEq)]
struct Label {
    arrival: NaiveDateTime,
    seq: u64,
    station: StationId,
    path: Vec<StationId>,
}

impl Ord for Label {
    fn cmp(&self, other: &Self) -> Ordering {
        // Min-heap by arrival, then discovery order.
        other
            .arrival
            .cmp(&self.arrival)
            .then_with(|| other.seq.cmp(&self.seq))
    }
}

impl PartialOrd for Label {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

/// Earliest-arrival journey from `start` to `end` leaving at `departure`.
///
/// Returns `None` when the end cannot be reached, or when either endpoint
/// has no line running at the departure instant. Changing line costs the
/// transfer-table time for the period of the departure, or
/// `fallback_transfer` when the table has no entry.
pub fn fastest_path<D: DepartureSource>(
    topology: &Topology,
    source: &D,
    fallback_transfer: Option<Minutes>,
    start: StationId,
    end: StationId,
    departure: NaiveDateTime,
) -> Option<Journey> {
    if start == end {
        return Some(Journey {
            stations: vec![start],
            departure,
            arrival: departure,
        });
    }

    if is_closed(topology, source, start, departure) || is_closed(topology, source, end, departure)
    {
        debug!(
            start = start.index(),
            end = end.index(),
            %departure,
            "endpoint closed at departure"
        );
        return None;
    }

    let mut best: Vec<Option<NaiveDateTime>> = vec![None; topology.station_count()];
    best[start.index()] = Some(departure);

    let mut heap = BinaryHeap::new();
    let mut seq = 0u64;
    heap.push(Label {
        arrival: departure,
        seq,
        station: start,
        path: vec![start],
    });

    while let Some(label) = heap.pop() {
        if label.station == end {
            debug!(
                start = start.index(),
                end = end.index(),
                %departure,
                arrival = %label.arrival,
                "fastest path found"
            );
            return Some(Journey {
                stations: label.path,
                departure,
                arrival: label.arrival,
            });
        }

        if best[label.station.index()].is_some_and(|b| label.arrival > b) {
            continue;
        }

        for neighbor in topology.neighbors(label.station) {
            let Some(leaves) = source.next_departure(neighbor.line, label.station, label.arrival)
            else {
                trace!(
                    station = label.station.index(),
                    line = neighbor.line.index(),
                    "no further departures"
                );
                continue;
            };

            let minutes = match neighbor.hop {
                Hop::Travel { minutes } => minutes,
                Hop::Transfer { from_line } => {
                    let period = source.period(neighbor.line, label.station, leaves);
                    topology
                        .transfers()
                        .minutes(label.station, from_line, neighbor.line, period)
                        .or(fallback_transfer)
                        .unwrap_or(0)
                }
            };
            let arrival = leaves + Duration::minutes(i64::from(minutes));

            let slot = &mut best[neighbor.station.index()];
            if slot.is_none_or(|b| arrival < b) {
                *slot = Some(arrival);
                let mut path = label.path.clone();
                path.push(neighbor.station);
                seq += 1;
                heap.push(Label {
                    arrival,
                    seq,
                    station: neighbor.station,
                    path,
                });
            }
        }
    }

    debug!(start = start.index(), end = end.index(), %departure, "unreachable");
    None
}

/// A station is closed when no line serving it is running.
fn is_closed<D: DepartureSource>(
    topology: &Topology,
    source: &D,
    station: StationId,
    at: NaiveDateTime,
) -> bool {
    !topology
        .lines_at(station)
        .iter()
        .any(|&line| source.is_open(line, station, at))
}

#[cfg(test)]
#[path = "fastest_tests.rs"]
mod tests;
