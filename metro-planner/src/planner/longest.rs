//! Longest simple path.
//!
//! Exhaustive depth-first search from every station, keeping the longest
//! station sequence that visits no station twice. The search is iterative:
//! an explicit stack of neighbor cursors replaces recursion, and the
//! stations on the current branch live in a bitset sized to the network.
//!
//! The search is exponential in the worst case. [`LongestPathLimits`]
//! bounds it by expansion count and wall-clock deadline; when either is hit
//! the best path so far is returned and flagged as truncated.

use std::time::Instant;

use fixedbitset::FixedBitSet;
use tracing::{debug, warn};

use crate::domain::StationId;
use crate::topology::Topology;

/// How often the deadline is checked, in expansions.
const DEADLINE_CHECK_INTERVAL: u64 = 1024;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct LongestPathLimits {
    pub max_expansions: Option<u64>,
    pub deadline: Option<Instant>,
}

impl LongestPathLimits {
    pub fn unbounded() -> Self {
        Self::default()
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LongestPath {
    pub stations: Vec<StationId>,
    /// Number of branch extensions performed.
    pub expansions: u64,
    /// The search stopped at a limit before it was exhaustive.
    pub truncated: bool,
}

/// Find the longest path that repeats no station.
///
/// Ties keep the first path found, scanning start stations in id order.
pub fn longest_simple_path(topology: &Topology, limits: &LongestPathLimits) -> LongestPath {
    let station_count = topology.station_count();

    // Distinct adjacent stations; transfers never leave the station.
    let adjacency: Vec<Vec<StationId>> = topology
        .station_ids()
        .map(|station| {
            let mut next: Vec<StationId> = topology
                .neighbors(station)
                .iter()
                .map(|n| n.station)
                .filter(|&s| s != station)
                .collect();
            next.dedup();
            next
        })
        .collect();

    let mut best: Vec<StationId> = Vec::new();
    let mut visited = FixedBitSet::with_capacity(station_count);
    let mut path: Vec<StationId> = Vec::with_capacity(station_count);
    let mut cursors: Vec<usize> = Vec::with_capacity(station_count);
    let mut expansions = 0u64;
    let mut truncated = false;

    'starts: for start in topology.station_ids() {
        if best.len() == station_count {
            break;
        }

        visited.clear();
        path.clear();
        cursors.clear();
        visited.insert(start.index());
        path.push(start);
        cursors.push(0);
        if path.len() > best.len() {
            best.clone_from(&path);
        }

        while let Some(&station) = path.last() {
            let depth = path.len() - 1;
            let candidates = &adjacency[station.index()];
            let next = candidates[cursors[depth]..]
                .iter()
                .position(|s| !visited.contains(s.index()))
                .map(|offset| cursors[depth] + offset);

            let Some(index) = next else {
                visited.set(station.index(), false);
                path.pop();
                cursors.pop();
                continue;
            };

            cursors[depth] = index + 1;
            expansions += 1;
            if limits.max_expansions.is_some_and(|max| expansions > max)
                || (expansions % DEADLINE_CHECK_INTERVAL == 0
                    && limits.deadline.is_some_and(|d| Instant::now() >= d))
            {
                truncated = true;
                break 'starts;
            }

            let neighbor = candidates[index];
            visited.insert(neighbor.index());
            path.push(neighbor);
            cursors.push(0);
            if path.len() > best.len() {
                best.clone_from(&path);
            }
        }
    }

    if truncated {
        warn!(
            expansions,
            length = best.len(),
            "longest path search stopped at limit"
        );
    } else {
        debug!(expansions, length = best.len(), "longest path search complete");
    }

    LongestPath {
        stations: best,
        expansions,
        truncated,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::topology::fixtures::{cross, single_line};
    use crate::topology::{LineRecord, SegmentRecord, StationRecord};
    use std::collections::HashSet;

    fn assert_simple(path: &[StationId]) {
        let unique: HashSet<_> = path.iter().collect();
        assert_eq!(unique.len(), path.len(), "path repeats a station");
    }

    fn assert_connected(topology: &Topology, path: &[StationId]) {
        for pair in path.windows(2) {
            assert!(
                topology.neighbors(pair[0]).iter().any(|n| n.station == pair[1]),
                "{:?} and {:?} are not adjacent",
                pair[0],
                pair[1]
            );
        }
    }

    #[test]
    fn single_line_is_traversed_end_to_end() {
        let topo = single_line(6, 3);
        let result = longest_simple_path(&topo, &LongestPathLimits::unbounded());

        assert_eq!(result.stations.len(), 6);
        assert!(!result.truncated);
        assert_simple(&result.stations);
        assert_connected(&topo, &result.stations);
    }

    #[test]
    fn star_network() {
        let topo = cross();
        let result = longest_simple_path(&topo, &LongestPathLimits::unbounded());

        assert_eq!(result.stations.len(), 3);
        assert_simple(&result.stations);
        // First found: starts at A1, the lowest id.
        assert_eq!(result.stations[0], topo.station_id("A1").unwrap());
    }

    #[test]
    fn ring_visits_every_station_once() {
        let stations: Vec<_> = ["P", "Q", "R", "S"]
            .iter()
            .map(|c| StationRecord::new(*c, *c))
            .collect();
        let segments = vec![
            SegmentRecord::new("P", "Q", "L", 3),
            SegmentRecord::new("Q", "R", "L", 3),
            SegmentRecord::new("R", "S", "L", 3),
            SegmentRecord::new("S", "P", "L", 3),
        ];
        let topo = Topology::load(&stations, &[LineRecord::new("L", "L")], &segments, &[]).unwrap();

        let result = longest_simple_path(&topo, &LongestPathLimits::unbounded());
        assert_eq!(result.stations.len(), 4);
        assert_simple(&result.stations);
    }

    #[test]
    fn empty_topology() {
        let topo = Topology::load(&[], &[], &[], &[]).unwrap();
        let result = longest_simple_path(&topo, &LongestPathLimits::unbounded());
        assert!(result.stations.is_empty());
        assert!(!result.truncated);
    }

    #[test]
    fn expansion_cap_truncates() {
        let topo = single_line(10, 3);
        let limits = LongestPathLimits {
            max_expansions: Some(4),
            deadline: None,
        };
        let result = longest_simple_path(&topo, &limits);

        assert!(result.truncated);
        assert_eq!(result.stations.len(), 5);
        assert_simple(&result.stations);
    }

    #[test]
    fn passed_deadline_truncates() {
        let topo = single_line(2000, 1);
        let limits = LongestPathLimits {
            max_expansions: None,
            deadline: Some(Instant::now()),
        };
        let result = longest_simple_path(&topo, &limits);

        assert!(result.truncated);
        assert_eq!(result.expansions, DEADLINE_CHECK_INTERVAL);
    }

    #[test]
    fn reference_network_path_is_long_and_simple() {
        let network =
            crate::network::Network::reference(crate::graph::TransferCostPolicy::default())
                .unwrap();
        let topo = network.topology();
        let limits = LongestPathLimits {
            max_expansions: Some(200_000),
            deadline: None,
        };
        let result = longest_simple_path(topo, &limits);

        assert!(result.stations.len() > 10);
        assert_simple(&result.stations);
        assert_connected(topo, &result.stations);
    }
}
