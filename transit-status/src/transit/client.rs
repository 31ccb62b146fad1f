//! HAFAS REST HTTP client.
//!
//! Queries the transport.rest departures endpoint for one station at a time.
//! Each request carries the client-wide timeout, which bounds how long a
//! slow station can hold up a poll cycle.

use std::sync::Arc;
use std::time::Duration;

use tokio::sync::Semaphore;
use tracing::debug;

use crate::domain::{Departure, StationId};

use super::convert::convert_departures;
use super::error::TransitError;
use super::source::{DepartureSource, FetchOptions};
use super::types::DeparturesResponse;

/// Default base URL: the BVG instance of transport.rest.
pub const DEFAULT_BASE_URL: &str = "https://v6.bvg.transport.rest";

/// Default maximum concurrent requests.
const DEFAULT_MAX_CONCURRENT: usize = 5;

/// Configuration for the HAFAS client.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TransitConfig {
    /// Base URL for the API
    pub base_url: String,
    /// Maximum concurrent requests
    pub max_concurrent: usize,
    /// Request timeout in seconds
    pub timeout_secs: u64,
    /// User-Agent sent with every request
    pub user_agent: String,
}

impl TransitConfig {
    /// Create a config pointing at the given base URL.
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            ..Self::default()
        }
    }

    /// Set maximum concurrent requests.
    pub fn with_max_concurrent(mut self, n: usize) -> Self {
        self.max_concurrent = n;
        self
    }

    /// Set request timeout.
    pub fn with_timeout(mut self, secs: u64) -> Self {
        self.timeout_secs = secs;
        self
    }

    /// Set the User-Agent header.
    pub fn with_user_agent(mut self, user_agent: impl Into<String>) -> Self {
        self.user_agent = user_agent.into();
        self
    }
}

impl Default for TransitConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            max_concurrent: DEFAULT_MAX_CONCURRENT,
            timeout_secs: 10,
            user_agent: concat!("transit-status/", env!("CARGO_PKG_VERSION")).to_string(),
        }
    }
}

/// HAFAS REST API client.
///
/// Uses a semaphore to limit concurrent requests and avoid rate limiting.
#[derive(Debug, Clone)]
pub struct HafasClient {
    http: reqwest::Client,
    base_url: String,
    semaphore: Arc<Semaphore>,
}

impl HafasClient {
    /// Create a new client with the given configuration.
    pub fn new(config: TransitConfig) -> Result<Self, TransitError> {
        if config.max_concurrent == 0 {
            return Err(TransitError::NotConfigured(
                "max_concurrent must be at least 1".to_string(),
            ));
        }

        let http = reqwest::Client::builder()
            .user_agent(config.user_agent)
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()?;

        Ok(Self {
            http,
            base_url: config.base_url.trim_end_matches('/').to_string(),
            semaphore: Arc::new(Semaphore::new(config.max_concurrent)),
        })
    }

    /// URL of the departures endpoint for a station.
    fn departures_url(&self, station: &StationId) -> String {
        format!("{}/stops/{}/departures", self.base_url, station.as_str())
    }

    /// Get upcoming departures for a station.
    pub async fn get_departures(
        &self,
        station: &StationId,
        options: &FetchOptions,
    ) -> Result<Vec<Departure>, TransitError> {
        let _permit = self
            .semaphore
            .acquire()
            .await
            .map_err(|_| TransitError::NotConfigured("semaphore closed".to_string()))?;

        let mut query = vec![
            ("duration", options.duration_mins.to_string()),
            ("remarks", "false".to_string()),
            ("linesOfStops", "false".to_string()),
        ];
        if let Some(results) = options.results {
            query.push(("results", results.to_string()));
        }

        let response = self
            .http
            .get(self.departures_url(station))
            .query(&query)
            .send()
            .await?;

        let status = response.status();

        if status == reqwest::StatusCode::TOO_MANY_REQUESTS {
            return Err(TransitError::RateLimited);
        }

        if status == reqwest::StatusCode::NOT_FOUND {
            return Err(TransitError::StationNotFound(station.to_string()));
        }

        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(TransitError::Api {
                status: status.as_u16(),
                message: body.chars().take(500).collect(),
            });
        }

        let body = response.text().await?;

        let parsed: DeparturesResponse =
            serde_json::from_str(&body).map_err(|e| TransitError::Json {
                message: e.to_string(),
                body: Some(body.chars().take(500).collect()),
            })?;

        let departures = convert_departures(parsed.into_records());
        debug!(station = %station, count = departures.len(), "Fetched departures");

        Ok(departures)
    }
}

impl DepartureSource for HafasClient {
    async fn fetch_departures(
        &self,
        station: &StationId,
        options: &FetchOptions,
    ) -> Result<Vec<Departure>, TransitError> {
        self.get_departures(station, options).await
    }
}
