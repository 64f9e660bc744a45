//! Network snapshots.
//!
//! A [`Network`] bundles one topology with everything derived from it: the
//! line-expanded graph and the timetable generator. It is immutable; a
//! refresh builds a new snapshot and swaps it in whole.

mod reference;
mod source;

pub use reference::reference_file;
pub use source::{NetworkFile, SourceError};

use std::collections::BTreeSet;
use std::path::Path;

use chrono::NaiveDate;
use tracing::info;

use crate::domain::MalformedTopology;
use crate::graph::{LineGraph, TransferCostPolicy};
use crate::timetable::TimetableGenerator;
use crate::topology::Topology;

#[derive(Debug, Clone)]
pub struct Network {
    topology: Topology,
    graph: LineGraph,
    timetables: TimetableGenerator,
}

impl Network {
    /// Validate a network file and build the snapshot.
    pub fn load(file: &NetworkFile, policy: TransferCostPolicy) -> Result<Self, MalformedTopology> {
        let topology = Topology::load(&file.stations, &file.lines, &file.segments, &file.transfers)?;
        let holidays = file.holidays.iter().copied().collect();
        Ok(Self::from_topology(topology, holidays, policy))
    }

    /// Read and build a snapshot from a JSON file on disk.
    pub fn load_from_path(path: &Path, policy: TransferCostPolicy) -> Result<Self, SourceError> {
        let file = NetworkFile::read(path)?;
        Ok(Self::load(&file, policy)?)
    }

    /// The built-in reference network.
    pub fn reference(policy: TransferCostPolicy) -> Result<Self, MalformedTopology> {
        Self::load(&reference_file(), policy)
    }

    pub fn from_topology(
        topology: Topology,
        holidays: BTreeSet<NaiveDate>,
        policy: TransferCostPolicy,
    ) -> Self {
        let graph = LineGraph::build(&topology, policy);
        let timetables = TimetableGenerator::from_topology(&topology, holidays);
        info!(
            stations = topology.station_count(),
            lines = topology.line_count(),
            graph_nodes = graph.node_count(),
            "network snapshot ready"
        );
        Self {
            topology,
            graph,
            timetables,
        }
    }

    /// Rebuild the line graph under a different transfer-cost policy.
    pub fn with_policy(self, policy: TransferCostPolicy) -> Self {
        let graph = LineGraph::build(&self.topology, policy);
        Self { graph, ..self }
    }

    pub fn topology(&self) -> &Topology {
        &self.topology
    }

    pub fn graph(&self) -> &LineGraph {
        &self.graph
    }

    pub fn timetables(&self) -> &TimetableGenerator {
        &self.timetables
    }
}
