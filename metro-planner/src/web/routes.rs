//! HTTP route handlers.

use std::sync::Arc;

use axum::{
    Json, Router,
    extract::{Path, Query, State},
    http::StatusCode,
    response::IntoResponse,
    routing::get,
};
use chrono::{Local, NaiveDateTime, Timelike};
use tower_http::trace::TraceLayer;
use tracing::{error, warn};

use crate::domain::{LookupError, parse_query_time};
use crate::planner::{PlanError, Planner};
use crate::timetable::{Timetable, WindowCategory};

use super::dto::*;
use super::state::AppState;

/// Create the application router.
pub fn create_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health))
        .route("/station/:name", get(station))
        .route("/route/:start/:end", get(route))
        .route("/express_route/:start/:end", get(express_route))
        .route("/fastest_route/:start/:end", get(fastest_route))
        .route("/timetable/:line/:station", get(timetable))
        .route("/longest_route", get(longest_route))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// Health check endpoint.
async fn health() -> &'static str {
    "ok"
}

/// Resolve a station name to its code.
async fn station(
    State(state): State<AppState>,
    Path(name): Path<String>,
) -> Result<Json<StationResponse>, AppError> {
    let network = state.network.current().await;
    let topology = network.topology();
    let id = topology.station_id(&name)?;

    Ok(Json(StationResponse {
        station_id: topology.station(id).code.clone(),
        station: name,
    }))
}

/// Static shortest route.
async fn route(
    State(state): State<AppState>,
    Path((start, end)): Path<(String, String)>,
) -> Result<Json<RouteResponse>, AppError> {
    let network = state.network.current().await;
    let planner = Planner::new(&network, &state.config);

    let route = planner
        .shortest_path_by_name(&start, &end)?
        .ok_or_else(|| AppError::NotFound {
            message: format!("No route found from {start} to {end}"),
        })?;

    Ok(Json(RouteResponse {
        path: route.names(network.topology()),
        total_minutes: route.minutes,
        start,
        end,
    }))
}

/// Express stops between two express-served stations.
async fn express_route(
    State(state): State<AppState>,
    Path((start, end)): Path<(String, String)>,
) -> Result<Json<ExpressRouteResponse>, AppError> {
    let network = state.network.current().await;
    let planner = Planner::new(&network, &state.config);

    let express = planner
        .express_path(&start, &end)?
        .ok_or_else(|| AppError::NotFound {
            message: format!("No express route found from {start} to {end}"),
        })?;

    Ok(Json(ExpressRouteResponse {
        line: network.topology().line(express.line).name.clone(),
        express_path: planner.station_names(&express.stations),
        start,
        end,
    }))
}

/// Earliest-arrival route for a departure time.
async fn fastest_route(
    State(state): State<AppState>,
    Path((start, end)): Path<(String, String)>,
    Query(query): Query<FastestRouteQuery>,
) -> Result<Json<FastestRouteResponse>, AppError> {
    let departure = query_time(query.departure.as_deref())?;
    let network = state.network.current().await;
    let planner = Planner::new(&network, &state.config);

    let journey = planner
        .fastest_path(&start, &end, departure)?
        .ok_or_else(|| AppError::NotFound {
            message: format!("{end} is unreachable from {start} at {departure}"),
        })?;

    Ok(Json(FastestRouteResponse {
        path: journey.names(network.topology()),
        departure: journey.departure.format("%Y-%m-%d %H:%M:%S").to_string(),
        arrival: journey.arrival.format("%Y-%m-%d %H:%M:%S").to_string(),
        elapsed_minutes: journey.elapsed_minutes(),
        start,
        end,
    }))
}

/// Upcoming departures of a line at a station.
async fn timetable(
    State(state): State<AppState>,
    Path((line, station)): Path<(String, String)>,
    Query(query): Query<TimetableQuery>,
) -> Result<Json<TimetableResponse>, AppError> {
    let at = query_time(query.current_time.as_deref())?;
    let network = state.network.current().await;
    let planner = Planner::new(&network, &state.config);

    let timetable = planner.timetable(&line, &station, at)?;
    if timetable == Timetable::Empty {
        return Err(AppError::NotFound {
            message: format!("No timetable found for {station} on {line}"),
        });
    }

    let window = planner.service_window(&line, &station, at)?;
    let service_type = if window == Some(WindowCategory::Express) {
        "express"
    } else {
        "regular"
    };

    Ok(Json(TimetableResponse {
        timetable: timetable.labels(at),
        service_type: service_type.to_string(),
        window,
        line,
        station,
    }))
}

/// Longest route without repeated stations.
async fn longest_route(
    State(state): State<AppState>,
) -> Result<Json<LongestRouteResponse>, AppError> {
    let network = state.network.current().await;
    let config = Arc::clone(&state.config);

    let (names, truncated) = tokio::task::spawn_blocking(move || {
        let planner = Planner::new(&network, &config);
        let longest = planner.longest_simple_path();
        (planner.station_names(&longest.stations), longest.truncated)
    })
    .await
    .map_err(|e| AppError::Internal {
        message: format!("Longest route search failed: {e}"),
    })?;

    if names.is_empty() {
        return Err(AppError::NotFound {
            message: "No route found".to_string(),
        });
    }

    Ok(Json(LongestRouteResponse {
        longest_route: names,
        truncated,
    }))
}

/// Parse a query-string time, defaulting to the local wall clock.
fn query_time(raw: Option<&str>) -> Result<NaiveDateTime, AppError> {
    match raw {
        Some(raw) => parse_query_time(raw).map_err(|e| AppError::BadRequest {
            message: format!("{e}; use 'YYYY-MM-DD HH:MM:SS'"),
        }),
        None => {
            let now = Local::now().naive_local();
            Ok(now.with_nanosecond(0).unwrap_or(now))
        }
    }
}

/// Application error type.
#[derive(Debug)]
pub enum AppError {
    BadRequest { message: String },
    NotFound { message: String },
    Internal { message: String },
}

impl From<LookupError> for AppError {
    fn from(e: LookupError) -> Self {
        AppError::NotFound {
            message: e.to_string(),
        }
    }
}

impl From<PlanError> for AppError {
    fn from(e: PlanError) -> Self {
        match e {
            PlanError::Lookup(e) => e.into(),
            PlanError::NotExpressServed { .. } => AppError::BadRequest {
                message: e.to_string(),
            },
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> axum::response::Response {
        let (status, message) = match self {
            AppError::BadRequest { message } => (StatusCode::BAD_REQUEST, message),
            AppError::NotFound { message } => (StatusCode::NOT_FOUND, message),
            AppError::Internal { message } => (StatusCode::INTERNAL_SERVER_ERROR, message),
        };

        if status.is_server_error() {
            error!(%status, %message, "request failed");
        } else {
            warn!(%status, %message, "request rejected");
        }

        let body = Json(ErrorResponse { error: message });
        (status, body).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::graph::TransferCostPolicy;
    use crate::network::Network;
    use crate::planner::PlannerConfig;
    use crate::web::SharedNetwork;
    use axum::body::Body;
    use axum::http::Request;
    use tower::ServiceExt;

    fn app() -> Router {
        let config = PlannerConfig::new(TransferCostPolicy::default(), Some(200_000), None);
        let network = Network::reference(config.transfer_policy).unwrap();
        create_router(AppState::new(SharedNetwork::new(network, None), config))
    }

    async fn get(uri: &str) -> (StatusCode, serde_json::Value) {
        let response = app()
            .oneshot(Request::builder().uri(uri).body(Body::empty()).unwrap())
            .await
            .unwrap();
        let status = response.status();
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        let json = serde_json::from_slice(&bytes).unwrap_or(serde_json::Value::Null);
        (status, json)
    }

    #[tokio::test]
    async fn health_is_ok() {
        let response = app()
            .oneshot(Request::builder().uri("/health").body(Body::empty()).unwrap())
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        assert_eq!(&bytes[..], b"ok");
    }

    #[tokio::test]
    async fn station_lookup() {
        let (status, body) = get("/station/Ben%20Thanh").await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["station"], "Ben Thanh");
        assert_eq!(body["station_id"], "S114BT");

        let (status, body) = get("/station/Atlantis").await;
        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(body["error"], "station not found: Atlantis");
    }

    #[tokio::test]
    async fn shortest_route() {
        let (status, body) = get("/route/Mien%20Dong/Thu%20Duc").await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["path"].as_array().unwrap().len(), 4);
        assert_eq!(body["path"][0], "Mien Dong");
        assert_eq!(body["total_minutes"], 9);

        let (status, _) = get("/route/Mien%20Dong/Atlantis").await;
        assert_eq!(status, StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn express_route_requires_express_stops() {
        let (status, body) = get("/express_route/Ben%20Thanh/Thao%20Dien").await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(
            body["express_path"],
            serde_json::json!(["Ben Thanh", "Ba Son", "Thao Dien"])
        );
        assert_eq!(body["line"], "Line 1");

        let (status, _) = get("/express_route/Ben%20Thanh/Ham%20Nghi").await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn fastest_route_with_departure() {
        let (status, body) =
            get("/fastest_route/Mien%20Dong/Thu%20Duc?departure=2023-10-10%2014:01:00").await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["elapsed_minutes"], 47);
        assert_eq!(body["arrival"], "2023-10-10 14:48:00");

        let (status, _) =
            get("/fastest_route/Mien%20Dong/Thu%20Duc?departure=2023-10-10%2003:00:00").await;
        assert_eq!(status, StatusCode::NOT_FOUND);

        let (status, body) = get("/fastest_route/Mien%20Dong/Thu%20Duc?departure=soon").await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert!(body["error"].as_str().unwrap().contains("YYYY-MM-DD"));
    }

    #[tokio::test]
    async fn timetable_entries_and_service_type() {
        let (status, body) =
            get("/timetable/Line%201/Thu%20Duc?current_time=2023-10-10%2008:00:00").await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["timetable"][0], "08:00");
        assert_eq!(body["timetable"][1], "08:10");
        assert_eq!(body["service_type"], "express");
        assert_eq!(body["window"], "express");

        let (status, body) =
            get("/timetable/Line%202/Bay%20Hien?current_time=2023-10-10%2010:00:00").await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["timetable"][1], "10:15");
        assert_eq!(body["service_type"], "regular");
    }

    #[tokio::test]
    async fn friday_timetable_runs_into_the_night() {
        let (status, body) =
            get("/timetable/Line%201/Ben%20Thanh?current_time=2023-10-13%2021:50:00").await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["timetable"][0], "22:00");
        let entries = body["timetable"].as_array().unwrap();
        assert_eq!(entries.last().unwrap(), "2023-10-14 00:20");
    }

    #[tokio::test]
    async fn timetable_closed_and_missing() {
        let (status, body) =
            get("/timetable/Line%201/Ben%20Thanh?current_time=2023-10-10%2002:00:00").await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["timetable"], serde_json::json!(["Station closed!"]));
        assert_eq!(body["window"], serde_json::Value::Null);

        let (status, _) =
            get("/timetable/Line%2099/Ben%20Thanh?current_time=2023-10-10%2010:00:00").await;
        assert_eq!(status, StatusCode::NOT_FOUND);

        let (status, _) = get("/timetable/Line%201/Ben%20Thanh?current_time=10am").await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn longest_route_is_simple() {
        let (status, body) = get("/longest_route").await;
        assert_eq!(status, StatusCode::OK);

        let route: Vec<&str> = body["longest_route"]
            .as_array()
            .unwrap()
            .iter()
            .map(|v| v.as_str().unwrap())
            .collect();
        let unique: std::collections::HashSet<_> = route.iter().collect();
        assert!(route.len() > 10);
        assert_eq!(unique.len(), route.len());
    }
}
