//! Search results.

use chrono::{Duration, NaiveDateTime};

use crate::domain::{Minutes, StationId};
use crate::topology::Topology;

/// A weight-minimal path from the static solver.
///
/// A change of line shows up as the interchange station appearing twice in
/// a row.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Route {
    pub stations: Vec<StationId>,
    pub minutes: Minutes,
}

/// An earliest-arrival path for a concrete departure instant.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Journey {
    pub stations: Vec<StationId>,
    pub departure: NaiveDateTime,
    pub arrival: NaiveDateTime,
}

impl Route {
    pub fn names(&self, topology: &Topology) -> Vec<String> {
        names(&self.stations, topology)
    }

    /// Number of line changes along the route.
    pub fn transfers(&self) -> usize {
        self.stations.windows(2).filter(|w| w[0] == w[1]).count()
    }
}

impl Journey {
    pub fn names(&self, topology: &Topology) -> Vec<String> {
        names(&self.stations, topology)
    }

    pub fn elapsed(&self) -> Duration {
        self.arrival - self.departure
    }

    /// Whole minutes from departure to arrival.
    pub fn elapsed_minutes(&self) -> i64 {
        self.elapsed().num_minutes()
    }
}

fn names(stations: &[StationId], topology: &Topology) -> Vec<String> {
    stations
        .iter()
        .map(|&id| topology.name(id).to_string())
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::parse_query_time;
    use crate::topology::fixtures::cross;

    #[test]
    fn route_names_and_transfers() {
        let topo = cross();
        let ids = ["A1", "X", "X", "B1"].map(|code| topo.station_id(code).unwrap());
        let route = Route {
            stations: ids.to_vec(),
            minutes: 11,
        };

        assert_eq!(route.names(&topo), vec!["Alpha", "Crossing", "Crossing", "Beta"]);
        assert_eq!(route.transfers(), 1);
    }

    #[test]
    fn journey_elapsed() {
        let topo = cross();
        let journey = Journey {
            stations: vec![topo.station_id("A1").unwrap(), topo.station_id("X").unwrap()],
            departure: parse_query_time("2023-10-10 14:01:00").unwrap(),
            arrival: parse_query_time("2023-10-10 14:18:00").unwrap(),
        };

        assert_eq!(journey.elapsed_minutes(), 17);
        assert_eq!(journey.names(&topo), vec!["Alpha", "Crossing"]);
    }
}
