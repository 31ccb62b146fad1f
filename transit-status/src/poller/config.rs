//! Poller configuration.

use std::time::Duration;

use crate::domain::StationId;
use crate::status::{StatusConfig, ThresholdError};
use crate::transit::FetchOptions;

/// Error that stops a poll cycle before any station is fetched.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum PollError {
    /// No stations to poll
    #[error("no stations configured")]
    NoStations,

    /// Poll interval of zero
    #[error("poll interval must be greater than zero")]
    ZeroInterval,

    /// Unusable classification thresholds
    #[error("invalid thresholds: {0}")]
    Thresholds(#[from] ThresholdError),
}

/// Configuration for the poll-and-cache engine.
///
/// Supplied once at construction; the poller never reads the environment.
#[derive(Debug, Clone, PartialEq)]
pub struct PollerConfig {
    /// Stations sampled on every cycle.
    pub stations: Vec<StationId>,

    /// Time between poll cycles.
    pub poll_interval: Duration,

    /// Age after which the cached status is no longer trusted.
    pub staleness_threshold: Duration,

    /// Options passed to every departure fetch.
    pub fetch: FetchOptions,

    /// Classification thresholds.
    pub status: StatusConfig,
}

impl PollerConfig {
    /// Create a configuration for the given stations with default timings.
    pub fn new(stations: Vec<StationId>) -> Self {
        Self {
            stations,
            poll_interval: Duration::from_secs(60),
            staleness_threshold: Duration::from_secs(5 * 60),
            fetch: FetchOptions::default(),
            status: StatusConfig::default(),
        }
    }

    /// Set the poll interval.
    pub fn with_poll_interval(mut self, interval: Duration) -> Self {
        self.poll_interval = interval;
        self
    }

    /// Set the staleness threshold.
    pub fn with_staleness_threshold(mut self, threshold: Duration) -> Self {
        self.staleness_threshold = threshold;
        self
    }

    /// Set the fetch options.
    pub fn with_fetch_options(mut self, fetch: FetchOptions) -> Self {
        self.fetch = fetch;
        self
    }

    /// Set the classification thresholds.
    pub fn with_status_config(mut self, status: StatusConfig) -> Self {
        self.status = status;
        self
    }

    /// Staleness threshold in milliseconds, saturating.
    pub fn staleness_threshold_millis(&self) -> i64 {
        i64::try_from(self.staleness_threshold.as_millis()).unwrap_or(i64::MAX)
    }

    /// Check the configuration can drive a single poll cycle.
    ///
    /// The poll interval plays no part in one cycle and is not checked.
    pub fn validate_cycle(&self) -> Result<(), PollError> {
        if self.stations.is_empty() {
            return Err(PollError::NoStations);
        }
        self.status.validate()?;
        Ok(())
    }

    /// Check the configuration can drive recurring polls.
    pub fn validate(&self) -> Result<(), PollError> {
        self.validate_cycle()?;
        if self.poll_interval.is_zero() {
            return Err(PollError::ZeroInterval);
        }
        Ok(())
    }
}
