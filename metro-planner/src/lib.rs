//! Metro journey planner.
//!
//! Answers routing questions over a multi-line rail network: the shortest
//! route by travel and transfer time, the earliest arrival for a departure
//! instant, per-station departure timetables, and the longest route that
//! never repeats a station.

pub mod domain;
pub mod graph;
pub mod network;
pub mod planner;
pub mod timetable;
pub mod topology;
pub mod transfers;
pub mod web;
