//! Small networks shared by unit tests.
//!
//! The "cross" network:
//!
//! ```text
//!            B1
//!            |            Z1 -- Z2   (line LC, isolated)
//!   A1 ---- X ---- A3    (line LA)
//!            |
//!            B3          (line LB)
//! ```
//!
//! Every segment takes 3 minutes. Changing between LA and LB at X costs
//! 7 minutes in the peak and 5 off-peak.

use super::{LineRecord, SegmentRecord, StationRecord, Topology, TransferRecord};

pub(crate) fn cross_stations() -> Vec<StationRecord> {
    vec![
        StationRecord::new("A1", "Alpha"),
        StationRecord::new("X", "Crossing"),
        StationRecord::new("A3", "Gamma"),
        StationRecord::new("B1", "Beta"),
        StationRecord::new("B3", "Delta"),
        StationRecord::new("Z1", "Zeta"),
        StationRecord::new("Z2", "Eta"),
    ]
}

pub(crate) fn cross_lines() -> Vec<LineRecord> {
    vec![
        LineRecord::new("LA", "Line A"),
        LineRecord::new("LB", "Line B"),
        LineRecord::new("LC", "Line C"),
    ]
}

pub(crate) fn cross_segments() -> Vec<SegmentRecord> {
    vec![
        SegmentRecord::new("A1", "X", "LA", 3),
        SegmentRecord::new("X", "A3", "LA", 3),
        SegmentRecord::new("B1", "X", "LB", 3),
        SegmentRecord::new("X", "B3", "LB", 3),
        SegmentRecord::new("Z1", "Z2", "LC", 3),
    ]
}

pub(crate) fn cross_transfers() -> Vec<TransferRecord> {
    vec![TransferRecord::new("X", "LA", "LB", 7, 5)]
}

pub(crate) fn cross() -> Topology {
    Topology::load(
        &cross_stations(),
        &cross_lines(),
        &cross_segments(),
        &cross_transfers(),
    )
    .unwrap()
}

/// A single line through `count` stations named S0, S1, ... with the given
/// travel time between each pair.
pub(crate) fn single_line(count: usize, minutes: u32) -> Topology {
    let stations: Vec<_> = (0..count)
        .map(|i| StationRecord::new(format!("S{i}"), format!("Stop {i}")))
        .collect();
    let segments: Vec<_> = (1..count)
        .map(|i| SegmentRecord::new(format!("S{}", i - 1), format!("S{i}"), "L1", minutes))
        .collect();
    Topology::load(&stations, &[LineRecord::new("L1", "Line 1")], &segments, &[]).unwrap()
}
