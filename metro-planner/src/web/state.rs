//! Application state for the web layer.

use std::path::PathBuf;
use std::sync::Arc;

use tokio::sync::RwLock;
use tracing::info;

use crate::network::{Network, NetworkFile, SourceError};
use crate::planner::PlannerConfig;

/// The active network snapshot, replaceable in the background.
///
/// Readers clone the inner `Arc` and drop the lock before searching, so a
/// refresh never waits on a running query and a query never sees half of
/// a refresh.
#[derive(Clone)]
pub struct SharedNetwork {
    inner: Arc<RwLock<Arc<Network>>>,
    source: Option<PathBuf>,
}

impl SharedNetwork {
    /// Wrap an initial snapshot. `source` is the JSON file that
    /// [`refresh`](Self::refresh) reloads; without one, refresh keeps the
    /// current snapshot.
    pub fn new(network: Network, source: Option<PathBuf>) -> Self {
        Self {
            inner: Arc::new(RwLock::new(Arc::new(network))),
            source,
        }
    }

    pub fn source(&self) -> Option<&PathBuf> {
        self.source.as_ref()
    }

    /// The snapshot in force right now.
    pub async fn current(&self) -> Arc<Network> {
        let guard = self.inner.read().await;
        Arc::clone(&guard)
    }

    pub async fn replace(&self, network: Network) {
        let mut guard = self.inner.write().await;
        *guard = Arc::new(network);
    }

    /// Rebuild the snapshot from the source file.
    ///
    /// On success, swaps in the new snapshot and returns its station count.
    /// On failure, the existing snapshot is kept and the error is returned.
    pub async fn refresh(&self, config: &PlannerConfig) -> Result<usize, SourceError> {
        let Some(path) = &self.source else {
            return Ok(self.current().await.topology().station_count());
        };

        let json = tokio::fs::read_to_string(path)
            .await
            .map_err(|source| SourceError::Io {
                path: path.clone(),
                source,
            })?;
        let file = NetworkFile::from_json(&json)?;
        let network = Network::load(&file, config.transfer_policy)?;
        let count = network.topology().station_count();

        self.replace(network).await;
        info!(path = %path.display(), stations = count, "network refreshed");
        Ok(count)
    }
}

/// Shared application state.
#[derive(Clone)]
pub struct AppState {
    pub network: SharedNetwork,

    /// Planner configuration
    pub config: Arc<PlannerConfig>,
}

impl AppState {
    pub fn new(network: SharedNetwork, config: PlannerConfig) -> Self {
        Self {
            network,
            config: Arc::new(config),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::network::reference_file;
    use crate::topology::fixtures;
    use std::io::{Seek, Write};

    fn small_file() -> NetworkFile {
        NetworkFile {
            stations: fixtures::cross_stations(),
            lines: fixtures::cross_lines(),
            segments: fixtures::cross_segments(),
            transfers: fixtures::cross_transfers(),
            holidays: Vec::new(),
        }
    }

    fn write_json(file: &mut tempfile::NamedTempFile, network: &NetworkFile) {
        file.as_file_mut().set_len(0).unwrap();
        file.rewind().unwrap();
        file.write_all(network.to_json().unwrap().as_bytes()).unwrap();
        file.flush().unwrap();
    }

    #[tokio::test]
    async fn refresh_swaps_snapshot() {
        let config = PlannerConfig::default();
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write_json(&mut file, &small_file());

        let initial = Network::load(&small_file(), config.transfer_policy).unwrap();
        let shared = SharedNetwork::new(initial, Some(file.path().to_path_buf()));
        let before = shared.current().await;
        assert_eq!(before.topology().station_count(), 7);

        write_json(&mut file, &reference_file());
        let count = shared.refresh(&config).await.unwrap();
        assert_eq!(count, 116);

        // Old readers keep their snapshot.
        assert_eq!(before.topology().station_count(), 7);
        assert_eq!(shared.current().await.topology().station_count(), 116);
    }

    #[tokio::test]
    async fn failed_refresh_keeps_snapshot() {
        let config = PlannerConfig::default();
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write_json(&mut file, &small_file());

        let initial = Network::load(&small_file(), config.transfer_policy).unwrap();
        let shared = SharedNetwork::new(initial, Some(file.path().to_path_buf()));

        file.as_file_mut().set_len(0).unwrap();
        file.rewind().unwrap();
        file.write_all(b"{ not json").unwrap();
        file.flush().unwrap();

        assert!(matches!(
            shared.refresh(&config).await,
            Err(SourceError::Json(_))
        ));
        assert_eq!(shared.current().await.topology().station_count(), 7);
    }

    #[tokio::test]
    async fn refresh_without_source_is_a_no_op() {
        let config = PlannerConfig::default();
        let network = Network::load(&small_file(), config.transfer_policy).unwrap();
        let shared = SharedNetwork::new(network, None);

        assert_eq!(shared.refresh(&config).await.unwrap(), 7);
        assert!(shared.source().is_none());
    }
}
