//! Express routing.
//!
//! Lines may designate a set of express stops. Between two such stops on
//! the same line, the express route is the static shortest path reduced to
//! the express stops it passes through.

use tracing::debug;

use super::error::PlanError;
use super::shortest::shortest_path;
use crate::domain::{LineId, StationId};
use crate::graph::LineGraph;
use crate::timetable::ExpressService;
use crate::topology::Topology;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExpressRoute {
    /// The line whose express stops were used.
    pub line: LineId,
    pub stations: Vec<StationId>,
}

/// The first line, by id, that has both stations as express stops.
pub fn express_line(
    topology: &Topology,
    start: StationId,
    end: StationId,
) -> Option<(LineId, &ExpressService)> {
    topology
        .lines()
        .iter()
        .enumerate()
        .find_map(|(index, line)| {
            line.schedule
                .express
                .as_ref()
                .filter(|ex| ex.serves(&start) && ex.serves(&end))
                .map(|ex| (LineId::new(index), ex))
        })
}

/// Express stops along the shortest path from `start` to `end`.
///
/// `Ok(None)` means both stations are express stops but no path joins
/// them.
pub fn express_path(
    topology: &Topology,
    graph: &LineGraph,
    start: StationId,
    end: StationId,
) -> Result<Option<ExpressRoute>, PlanError> {
    let Some((line, express)) = express_line(topology, start, end) else {
        return Err(PlanError::NotExpressServed {
            start: topology.name(start).to_string(),
            end: topology.name(end).to_string(),
        });
    };

    let Some(route) = shortest_path(graph, start, end) else {
        return Ok(None);
    };

    let mut stations: Vec<StationId> = route
        .stations
        .into_iter()
        .filter(|s| express.serves(s))
        .collect();
    stations.dedup();

    debug!(
        line = %topology.line(line).code,
        stops = stations.len(),
        "express path found"
    );
    Ok(Some(ExpressRoute { line, stations }))
}
