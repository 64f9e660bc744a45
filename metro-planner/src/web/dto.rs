//! Data transfer objects for web requests and responses.

use serde::{Deserialize, Serialize};

use crate::timetable::WindowCategory;

/// Query string for the fastest-route endpoint.
#[derive(Debug, Deserialize)]
pub struct FastestRouteQuery {
    /// "YYYY-MM-DD HH:MM:SS" (defaults to now)
    pub departure: Option<String>,
}

/// Query string for the timetable endpoint.
#[derive(Debug, Deserialize)]
pub struct TimetableQuery {
    /// "YYYY-MM-DD HH:MM:SS" (defaults to now)
    pub current_time: Option<String>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct StationResponse {
    /// Name as requested
    pub station: String,

    /// Station code
    pub station_id: String,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct RouteResponse {
    pub start: String,
    pub end: String,

    /// Station names; an interchange appears twice where the line changes
    pub path: Vec<String>,

    pub total_minutes: u32,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct ExpressRouteResponse {
    pub start: String,
    pub end: String,
    pub line: String,
    pub express_path: Vec<String>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct FastestRouteResponse {
    pub start: String,
    pub end: String,
    pub path: Vec<String>,
    pub departure: String,
    pub arrival: String,
    pub elapsed_minutes: i64,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct TimetableResponse {
    pub line: String,
    pub station: String,

    /// "HH:MM" entries, or the closed sentinel alone
    pub timetable: Vec<String>,

    /// "express" or "regular"
    pub service_type: String,

    /// Rule in force at the query time, if running
    pub window: Option<WindowCategory>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct LongestRouteResponse {
    pub longest_route: Vec<String>,

    /// The search stopped at its configured limit
    pub truncated: bool,
}

/// Error response.
#[derive(Debug, Serialize, Deserialize)]
pub struct ErrorResponse {
    /// Error message
    pub error: String,
}
