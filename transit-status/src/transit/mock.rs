//! Mock transit client for running without API access.
//!
//! Loads departure lists from JSON files and serves them as if they were
//! live API responses. Stations without a file fail like an unreachable
//! station would.

use std::collections::HashMap;
use std::path::Path;
use std::sync::Arc;

use tokio::sync::RwLock;

use crate::domain::{Departure, StationId};

use super::convert::convert_departures;
use super::error::TransitError;
use super::source::{DepartureSource, FetchOptions};
use super::types::DeparturesResponse;

/// Mock transit client that serves canned departures.
#[derive(Debug, Clone)]
pub struct MockTransitClient {
    /// Pre-loaded departures, keyed by station.
    boards: Arc<RwLock<HashMap<StationId, Vec<Departure>>>>,
}

impl MockTransitClient {
    /// Create a mock client by loading JSON files from a directory.
    ///
    /// Expects files named `{station_id}.json` (e.g., `900100003.json`)
    /// containing a departures response.
    pub fn new(data_dir: impl AsRef<Path>) -> Result<Self, TransitError> {
        let boards = load_dir(data_dir.as_ref())?;
        Ok(Self::from_departures(boards))
    }

    /// Create a mock client from departures already in memory.
    pub fn from_departures(boards: HashMap<StationId, Vec<Departure>>) -> Self {
        Self {
            boards: Arc::new(RwLock::new(boards)),
        }
    }

    /// List available stations in the mock data.
    pub async fn available_stations(&self) -> Vec<StationId> {
        let boards = self.boards.read().await;
        boards.keys().cloned().collect()
    }

    /// Replace the departures served for one station.
    pub async fn set_departures(&self, station: StationId, departures: Vec<Departure>) {
        let mut boards = self.boards.write().await;
        boards.insert(station, departures);
    }

    /// Reload mock data from disk (useful for development).
    pub async fn reload(&self, data_dir: impl AsRef<Path>) -> Result<(), TransitError> {
        let fresh = load_dir(data_dir.as_ref())?;
        let mut boards = self.boards.write().await;
        *boards = fresh;
        Ok(())
    }
}

impl DepartureSource for MockTransitClient {
    async fn fetch_departures(
        &self,
        station: &StationId,
        _options: &FetchOptions,
    ) -> Result<Vec<Departure>, TransitError> {
        let boards = self.boards.read().await;

        boards
            .get(station)
            .cloned()
            .ok_or_else(|| TransitError::StationNotFound(station.to_string()))
    }
}

fn load_error(message: String) -> TransitError {
    TransitError::Api {
        status: 0,
        message,
    }
}

/// Read every `{station_id}.json` file in a directory.
fn load_dir(data_dir: &Path) -> Result<HashMap<StationId, Vec<Departure>>, TransitError> {
    let mut boards = HashMap::new();

    let entries = std::fs::read_dir(data_dir)
        .map_err(|e| load_error(format!("Failed to read mock data directory: {e}")))?;

    for entry in entries {
        let entry = entry.map_err(|e| load_error(format!("Failed to read directory entry: {e}")))?;

        let path = entry.path();
        if !path.is_file() || path.extension().and_then(|s| s.to_str()) != Some("json") {
            continue;
        }

        let stem = path
            .file_stem()
            .and_then(|s| s.to_str())
            .ok_or_else(|| load_error(format!("Invalid filename: {path:?}")))?;

        let station = StationId::parse(stem)
            .map_err(|e| load_error(format!("Invalid station in filename {stem}: {e}")))?;

        let json = std::fs::read_to_string(&path)
            .map_err(|e| load_error(format!("Failed to read {path:?}: {e}")))?;

        let response: DeparturesResponse = serde_json::from_str(&json).map_err(|e| {
            TransitError::Json {
                message: format!("Failed to parse {path:?}: {e}"),
                body: None,
            }
        })?;

        boards.insert(station, convert_departures(response.into_records()));
    }

    if boards.is_empty() {
        return Err(load_error(format!(
            "No mock departure files found in {data_dir:?}"
        )));
    }

    Ok(boards)
}
