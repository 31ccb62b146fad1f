//! The departure source abstraction used by the poller.

use std::future::Future;

use crate::domain::{Departure, StationId};

use super::client::HafasClient;
use super::error::TransitError;
use super::mock::MockTransitClient;

/// Options passed with every departure fetch.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FetchOptions {
    /// How far ahead to look for departures (minutes).
    pub duration_mins: u32,

    /// Maximum number of departures to return, `None` for the API default.
    pub results: Option<u32>,
}

impl FetchOptions {
    /// Set the look-ahead window.
    pub fn with_duration_mins(mut self, mins: u32) -> Self {
        self.duration_mins = mins;
        self
    }

    /// Cap the number of results.
    pub fn with_results(mut self, results: u32) -> Self {
        self.results = Some(results);
        self
    }
}

impl Default for FetchOptions {
    fn default() -> Self {
        Self {
            duration_mins: 10,
            results: None,
        }
    }
}

/// Trait for providing live departures for a station.
///
/// This abstraction allows the poller to be tested with mock data. An `Err`
/// means the station could not be read this cycle; `Ok(vec![])` means it was
/// read and had nothing departing.
pub trait DepartureSource: Send + Sync + 'static {
    fn fetch_departures(
        &self,
        station: &StationId,
        options: &FetchOptions,
    ) -> impl Future<Output = Result<Vec<Departure>, TransitError>> + Send;
}

/// The departure sources the server can run against.
#[derive(Debug, Clone)]
pub enum TransitSource {
    /// Live HAFAS REST API.
    Hafas(HafasClient),
    /// Canned departures (development and tests).
    Mock(MockTransitClient),
}

impl DepartureSource for TransitSource {
    async fn fetch_departures(
        &self,
        station: &StationId,
        options: &FetchOptions,
    ) -> Result<Vec<Departure>, TransitError> {
        match self {
            TransitSource::Hafas(client) => client.fetch_departures(station, options).await,
            TransitSource::Mock(client) => client.fetch_departures(station, options).await,
        }
    }
}
