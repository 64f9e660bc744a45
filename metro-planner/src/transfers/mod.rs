//! Transfer times between lines at interchange stations.
//!
//! Changing line at a station costs a fixed number of minutes that depends
//! on whether the change happens in a peak period. This module stores those
//! costs per (station, line, line) and answers symmetric lookups.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use crate::domain::{LineId, Minutes, StationId};

/// Time-of-day band used to price a transfer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Period {
    Peak,
    OffPeak,
}

/// Peak and off-peak cost of one transfer link.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TransferTimes {
    pub peak: Minutes,
    pub off_peak: Minutes,
}

impl TransferTimes {
    pub fn new(peak: Minutes, off_peak: Minutes) -> Self {
        Self { peak, off_peak }
    }

    pub fn for_period(&self, period: Period) -> Minutes {
        match period {
            Period::Peak => self.peak,
            Period::OffPeak => self.off_peak,
        }
    }
}

/// Transfer costs keyed by station and line pair.
///
/// Links are symmetric: a change from line A to line B at a station costs
/// the same as a change from B to A.
#[derive(Debug, Clone, Default)]
pub struct TransferTable {
    /// Stored in both directions for O(1) lookup.
    links: HashMap<(StationId, LineId, LineId), TransferTimes>,
}

impl TransferTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a transfer link, stored symmetrically.
    ///
    /// A later link for the same station and line pair replaces the earlier one.
    pub fn add(&mut self, station: StationId, a: LineId, b: LineId, times: TransferTimes) {
        self.links.insert((station, a, b), times);
        self.links.insert((station, b, a), times);
    }

    /// Get the transfer times for changing from `from` to `to` at `station`.
    pub fn get(&self, station: StationId, from: LineId, to: LineId) -> Option<TransferTimes> {
        self.links.get(&(station, from, to)).copied()
    }

    /// Transfer cost in minutes for the given period, if a link exists.
    pub fn minutes(
        &self,
        station: StationId,
        from: LineId,
        to: LineId,
        period: Period,
    ) -> Option<Minutes> {
        self.get(station, from, to).map(|t| t.for_period(period))
    }

    /// Number of links (counting A→B and B→A as one).
    pub fn len(&self) -> usize {
        self.links.len() / 2
    }

    pub fn is_empty(&self) -> bool {
        self.links.is_empty()
    }
}
