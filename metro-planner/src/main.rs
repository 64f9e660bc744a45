use std::net::SocketAddr;
use std::path::PathBuf;
use std::str::FromStr;
use std::time::Duration;

use tracing::{error, info, warn};
use tracing_subscriber::EnvFilter;

use metro_planner::network::Network;
use metro_planner::planner::PlannerConfig;
use metro_planner::web::{AppState, SharedNetwork, create_router};

/// Default interval between network refreshes (24 hours).
const DEFAULT_REFRESH_SECS: u64 = 24 * 60 * 60;

/// Read an optional environment variable, warning about and ignoring
/// values that do not parse.
fn env_var<T: FromStr>(name: &str) -> Option<T> {
    let raw = std::env::var(name).ok()?;
    match raw.parse() {
        Ok(value) => Some(value),
        Err(_) => {
            warn!(name, value = %raw, "ignoring unparseable environment variable");
            None
        }
    }
}

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let defaults = PlannerConfig::default();
    let config = PlannerConfig {
        longest_path_max_expansions: env_var("METRO_LONGEST_MAX_EXPANSIONS")
            .or(defaults.longest_path_max_expansions),
        longest_path_time_limit_ms: env_var("METRO_LONGEST_TIME_LIMIT_MS")
            .or(defaults.longest_path_time_limit_ms),
        ..defaults
    };

    // Load the network (fail fast if the file is bad)
    let source: Option<PathBuf> = env_var("METRO_NETWORK_PATH");
    let network = match &source {
        Some(path) => Network::load_from_path(path, config.transfer_policy)
            .unwrap_or_else(|e| panic!("Failed to load network from {}: {e}", path.display())),
        None => Network::reference(config.transfer_policy)
            .unwrap_or_else(|e| panic!("Reference network is malformed: {e}")),
    };
    let shared = SharedNetwork::new(network, source);

    // Spawn background task to reload the network file
    if shared.source().is_some() {
        let refresh_every =
            Duration::from_secs(env_var("METRO_REFRESH_SECS").unwrap_or(DEFAULT_REFRESH_SECS));
        let refresh = shared.clone();
        let refresh_config = config.clone();
        tokio::spawn(async move {
            let mut interval = tokio::time::interval(refresh_every);
            interval.tick().await; // First tick is immediate, skip it
            loop {
                interval.tick().await;
                match refresh.refresh(&refresh_config).await {
                    Ok(count) => info!(stations = count, "refreshed network"),
                    Err(e) => error!(error = %e, "failed to refresh network, keeping previous"),
                }
            }
        });
    }

    let state = AppState::new(shared, config);
    let app = create_router(state);

    let addr: SocketAddr =
        env_var("METRO_BIND_ADDR").unwrap_or_else(|| SocketAddr::from(([127, 0, 0, 1], 3000)));
    info!(%addr, "metro planner listening");
    info!("endpoints: /health /station/:name /route/:start/:end /express_route/:start/:end /fastest_route/:start/:end /timetable/:line/:station /longest_route");

    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .unwrap_or_else(|e| panic!("Failed to bind {addr}: {e}"));
    axum::serve(listener, app)
        .with_graceful_shutdown(async {
            let _ = tokio::signal::ctrl_c().await;
            info!("shutting down");
        })
        .await
        .unwrap_or_else(|e| panic!("Server error: {e}"));
}
