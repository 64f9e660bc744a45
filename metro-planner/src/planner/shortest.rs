//! Static shortest path over the line-expanded graph.
//!
//! Multi-source Dijkstra: every line serving the start station is a source
//! at distance zero, and the search stops at the first node of the end
//! station to leave the queue.

use std::cmp::Ordering;
use std::collections::BinaryHeap;

use tracing::debug;

use super::route::Route;
use crate::domain::{Minutes, StationId};
use crate::graph::{LineGraph, NodeId};

#[derive(Copy, Clone, Eq, PartialEq)]
struct State {
    cost: Minutes,
    /// Push order; equal costs pop in discovery order.
    seq: u64,
    node: NodeId,
}

impl Ord for State {
    fn cmp(&self, other: &Self) -> Ordering {
        // Min-heap by cost (reversed from standard Rust BinaryHeap)
        other
            .cost
            .cmp(&self.cost)
            .then_with(|| other.seq.cmp(&self.seq))
    }
}

impl PartialOrd for State {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

/// Weight-minimal route from `start` to `end`, or `None` when no node of
/// `end` is reachable.
///
/// `start == end` yields the one-station route with zero weight.
pub fn shortest_path(graph: &LineGraph, start: StationId, end: StationId) -> Option<Route> {
    if start == end {
        return Some(Route {
            stations: vec![start],
            minutes: 0,
        });
    }

    let mut dist = vec![Minutes::MAX; graph.node_count()];
    let mut parent: Vec<Option<NodeId>> = vec![None; graph.node_count()];
    let mut heap = BinaryHeap::new();
    let mut seq = 0u64;

    for node in graph.nodes_at(start) {
        dist[node.index()] = 0;
        heap.push(State { cost: 0, seq, node });
        seq += 1;
    }

    while let Some(State { cost, node, .. }) = heap.pop() {
        if cost > dist[node.index()] {
            continue;
        }

        if graph.node(node).station == end {
            let route = Route {
                stations: reconstruct(graph, &parent, node),
                minutes: cost,
            };
            debug!(
                start = start.index(),
                end = end.index(),
                minutes = cost,
                hops = route.stations.len(),
                "shortest path found"
            );
            return Some(route);
        }

        for edge in graph.edges(node) {
            let next = cost.saturating_add(edge.weight);
            let target = edge.target.index();
            if next < dist[target] {
                dist[target] = next;
                parent[target] = Some(node);
                heap.push(State {
                    cost: next,
                    seq,
                    node: edge.target,
                });
                seq += 1;
            }
        }
    }

    debug!(start = start.index(), end = end.index(), "no path");
    None
}

/// Walk parent pointers back to a source and project nodes to stations.
fn reconstruct(graph: &LineGraph, parent: &[Option<NodeId>], goal: NodeId) -> Vec<StationId> {
    let mut stations = vec![graph.node(goal).station];
    let mut current = goal;
    while let Some(prev) = parent[current.index()] {
        stations.push(graph.node(prev).station);
        current = prev;
    }
    stations.reverse();
    stations
}
