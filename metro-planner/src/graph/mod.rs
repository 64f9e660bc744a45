//! The line-expanded graph.
//!
//! Each vertex is a [`LineNode`]: a station while riding one particular
//! line. Riding to the next station is a travel edge between nodes of the
//! same line; changing line is a transfer edge between two nodes of the
//! same station. This lets a plain weighted shortest-path search charge for
//! transfers without knowing anything about time of day.
//!
//! Edges are stored in a compressed adjacency arena: one flat edge vector
//! plus per-node offsets.

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::domain::{LineId, Minutes, StationId};
use crate::topology::{Hop, Topology};
use crate::transfers::{Period, TransferTable};

/// How transfer edges are weighted in the static graph.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TransferCostPolicy {
    /// Which side of the transfer table is representative.
    pub period: Period,
    /// Cost when a station has no table entry for the line pair. `None`
    /// leaves such transfers out of the graph.
    pub fallback_minutes: Option<Minutes>,
}

impl TransferCostPolicy {
    pub fn new(period: Period, fallback_minutes: Option<Minutes>) -> Self {
        Self {
            period,
            fallback_minutes,
        }
    }

    /// Cost of changing from `from` to `to` at `station`, or `None` when the
    /// transfer is not offered.
    pub fn cost(
        &self,
        table: &TransferTable,
        station: StationId,
        from: LineId,
        to: LineId,
    ) -> Option<Minutes> {
        table
            .minutes(station, from, to, self.period)
            .or(self.fallback_minutes)
    }
}

impl Default for TransferCostPolicy {
    fn default() -> Self {
        Self {
            period: Period::OffPeak,
            fallback_minutes: Some(5),
        }
    }
}

/// Index of a node within a [`LineGraph`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct NodeId(u32);

impl NodeId {
    pub fn index(self) -> usize {
        self.0 as usize
    }
}

/// A station while riding a particular line.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct LineNode {
    pub station: StationId,
    pub line: LineId,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EdgeKind {
    Travel,
    Transfer,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LineEdge {
    pub target: NodeId,
    pub weight: Minutes,
    pub kind: EdgeKind,
}

/// Weighted graph over (station, line) nodes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LineGraph {
    /// Grouped by station, lines ascending within a station.
    nodes: Vec<LineNode>,
    /// Nodes of station `s` are `nodes[station_offsets[s]..station_offsets[s + 1]]`.
    station_offsets: Vec<u32>,
    /// Edges of node `n` are `edges[edge_offsets[n]..edge_offsets[n + 1]]`.
    edge_offsets: Vec<u32>,
    edges: Vec<LineEdge>,
    policy: TransferCostPolicy,
}

impl LineGraph {
    /// Build the graph for a topology.
    ///
    /// The result depends only on the topology and the policy.
    pub fn build(topology: &Topology, policy: TransferCostPolicy) -> Self {
        let mut nodes = Vec::new();
        let mut station_offsets = Vec::with_capacity(topology.station_count() + 1);
        for station in topology.station_ids() {
            station_offsets.push(nodes.len() as u32);
            for &line in topology.lines_at(station) {
                nodes.push(LineNode { station, line });
            }
        }
        station_offsets.push(nodes.len() as u32);

        let mut graph = Self {
            nodes,
            station_offsets,
            edge_offsets: Vec::new(),
            edges: Vec::new(),
            policy,
        };

        let mut edge_offsets = Vec::with_capacity(graph.nodes.len() + 1);
        let mut edges = Vec::new();
        for node in &graph.nodes {
            edge_offsets.push(edges.len() as u32);
            for neighbor in topology.neighbors(node.station) {
                let edge = match neighbor.hop {
                    Hop::Travel { minutes } if neighbor.line == node.line => graph
                        .find(neighbor.station, node.line)
                        .map(|target| LineEdge {
                            target,
                            weight: minutes,
                            kind: EdgeKind::Travel,
                        }),
                    Hop::Transfer { from_line } if from_line == node.line => policy
                        .cost(topology.transfers(), node.station, from_line, neighbor.line)
                        .and_then(|weight| {
                            graph
                                .find(node.station, neighbor.line)
                                .map(|target| LineEdge {
                                    target,
                                    weight,
                                    kind: EdgeKind::Transfer,
                                })
                        }),
                    _ => None,
                };
                edges.extend(edge);
            }
        }
        edge_offsets.push(edges.len() as u32);

        graph.edge_offsets = edge_offsets;
        graph.edges = edges;

        debug!(
            nodes = graph.nodes.len(),
            edges = graph.edges.len(),
            period = ?policy.period,
            fallback = ?policy.fallback_minutes,
            "built line graph"
        );
        graph
    }

    pub fn policy(&self) -> TransferCostPolicy {
        self.policy
    }

    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    pub fn edge_count(&self) -> usize {
        self.edges.len()
    }

    pub fn node(&self, id: NodeId) -> LineNode {
        self.nodes[id.index()]
    }

    /// The node for `station` on `line`, if the line serves the station.
    pub fn find(&self, station: StationId, line: LineId) -> Option<NodeId> {
        let range = self.station_range(station)?;
        let start = range.start;
        self.nodes[range]
            .binary_search_by_key(&line, |node| node.line)
            .ok()
            .map(|offset| NodeId((start + offset) as u32))
    }

    /// Every node of a station, one per serving line.
    pub fn nodes_at(&self, station: StationId) -> impl Iterator<Item = NodeId> + '_ {
        self.station_range(station)
            .unwrap_or(0..0)
            .map(|index| NodeId(index as u32))
    }

    pub fn edges(&self, node: NodeId) -> &[LineEdge] {
        let start = self.edge_offsets[node.index()] as usize;
        let end = self.edge_offsets[node.index() + 1] as usize;
        &self.edges[start..end]
    }

    fn station_range(&self, station: StationId) -> Option<std::ops::Range<usize>> {
        let start = *self.station_offsets.get(station.index())? as usize;
        let end = *self.station_offsets.get(station.index() + 1)? as usize;
        Some(start..end)
    }
}
