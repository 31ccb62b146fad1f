//! Process configuration read from environment variables.

use std::net::SocketAddr;
use std::path::PathBuf;
use std::str::FromStr;
use std::time::Duration;

use crate::domain::{InvalidStationId, StationId};
use crate::poller::{PollError, PollerConfig};
use crate::status::StatusConfig;
use crate::transit::{DEFAULT_BASE_URL, FetchOptions, TransitConfig};

/// Stations polled when `BVG_STATIONS` is unset: Alexanderplatz,
/// Hauptbahnhof, Zoologischer Garten, Potsdamer Platz and Warschauer Strasse.
pub const DEFAULT_STATIONS: &str = "900100003,900003201,900023201,900058101,900120005";

const DEFAULT_BIND_ADDR: &str = "127.0.0.1:3000";
const DEFAULT_STATIC_DIR: &str = "static";

/// Errors from reading the environment.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("{var}={value:?} is not valid: {reason}")]
    Invalid {
        var: &'static str,
        value: String,
        reason: String,
    },

    #[error("BVG_STATIONS: {0}")]
    Station(#[from] InvalidStationId),

    #[error(transparent)]
    Poller(#[from] PollError),
}

/// Everything the binary needs to run.
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub poller: PollerConfig,
    pub transit: TransitConfig,
    /// Serve canned departures from this directory instead of the live API.
    pub mock_data_dir: Option<PathBuf>,
    pub bind_addr: SocketAddr,
    pub static_dir: String,
}

impl AppConfig {
    /// Read the process environment.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build from an arbitrary variable lookup. Unset and blank variables
    /// fall back to their defaults.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        let stations = get("BVG_STATIONS").unwrap_or_else(|| DEFAULT_STATIONS.to_string());
        let stations = parse_stations(&stations)?;

        let defaults = StatusConfig::default();
        let status = StatusConfig::new(
            parse_or(&get, "DEGRADED_THRESHOLD", defaults.degraded_threshold)?,
            parse_or(&get, "FUCKED_THRESHOLD", defaults.fucked_threshold)?,
            parse_or(&get, "DELAY_THRESHOLD_SECS", defaults.delay_threshold_secs)?,
        );

        let fetch = FetchOptions::default();
        let duration = parse_or(&get, "FETCH_DURATION_MINS", fetch.duration_mins)?;
        let fetch = fetch.with_duration_mins(duration);

        let poller = PollerConfig::new(stations)
            .with_fetch_options(fetch)
            .with_status_config(status);
        let interval = secs_or(&get, "POLL_INTERVAL_SECS", poller.poll_interval)?;
        let staleness = secs_or(&get, "STALENESS_THRESHOLD_SECS", poller.staleness_threshold)?;
        let poller = poller
            .with_poll_interval(interval)
            .with_staleness_threshold(staleness);
        poller.validate()?;

        let base_url = get("BVG_API_BASE_URL").unwrap_or_else(|| DEFAULT_BASE_URL.to_string());
        let transit = TransitConfig::new(base_url);
        let timeout = parse_or(&get, "FETCH_TIMEOUT_SECS", transit.timeout_secs)?;
        let transit = transit.with_timeout(timeout);

        let bind_addr = parse_or(
            &get,
            "BIND_ADDR",
            SocketAddr::from_str(DEFAULT_BIND_ADDR).map_err(|e| ConfigError::Invalid {
                var: "BIND_ADDR",
                value: DEFAULT_BIND_ADDR.to_string(),
                reason: e.to_string(),
            })?,
        )?;

        Ok(Self {
            poller,
            transit,
            mock_data_dir: get("BVG_MOCK_DATA_DIR").map(PathBuf::from),
            bind_addr,
            static_dir: get("STATIC_DIR").unwrap_or_else(|| DEFAULT_STATIC_DIR.to_string()),
        })
    }
}

/// Parse a comma-separated station list, skipping empty items.
pub fn parse_stations(list: &str) -> Result<Vec<StationId>, InvalidStationId> {
    list.split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(StationId::parse)
        .collect()
}

fn parse_or<F, T>(get: &F, var: &'static str, default: T) -> Result<T, ConfigError>
where
    F: Fn(&str) -> Option<String>,
    T: FromStr,
    T::Err: std::fmt::Display,
{
    match get(var) {
        None => Ok(default),
        Some(value) => value.trim().parse().map_err(|e: T::Err| ConfigError::Invalid {
            var,
            reason: e.to_string(),
            value,
        }),
    }
}

fn secs_or<F>(get: &F, var: &'static str, default: Duration) -> Result<Duration, ConfigError>
where
    F: Fn(&str) -> Option<String>,
{
    parse_or(get, var, default.as_secs()).map(Duration::from_secs)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn load(vars: &[(&str, &str)]) -> Result<AppConfig, ConfigError> {
        let vars: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        AppConfig::from_lookup(|key| vars.get(key).cloned())
    }

    #[test]
    fn empty_environment_uses_defaults() {
        let config = load(&[]).unwrap();

        assert_eq!(config.poller.stations.len(), 5);
        assert_eq!(config.poller.poll_interval, Duration::from_secs(60));
        assert_eq!(config.poller.staleness_threshold, Duration::from_secs(300));
        assert_eq!(config.poller.fetch.duration_mins, 10);
        assert_eq!(config.poller.status, StatusConfig::default());
        assert_eq!(config.transit.base_url, DEFAULT_BASE_URL);
        assert_eq!(config.bind_addr.port(), 3000);
        assert_eq!(config.static_dir, "static");
        assert!(config.mock_data_dir.is_none());
    }

    #[test]
    fn overrides_are_applied() {
        let config = load(&[
            ("BVG_STATIONS", "900100003, 900003201"),
            ("POLL_INTERVAL_SECS", "30"),
            ("STALENESS_THRESHOLD_SECS", "120"),
            ("DEGRADED_THRESHOLD", "0.1"),
            ("FUCKED_THRESHOLD", "0.4"),
            ("DELAY_THRESHOLD_SECS", "180"),
            ("FETCH_DURATION_MINS", "20"),
            ("FETCH_TIMEOUT_SECS", "3"),
            ("BVG_API_BASE_URL", "http://localhost:8080"),
            ("BVG_MOCK_DATA_DIR", "data/mock_departures"),
            ("BIND_ADDR", "0.0.0.0:8000"),
        ])
        .unwrap();

        assert_eq!(config.poller.stations.len(), 2);
        assert_eq!(config.poller.stations[1].as_str(), "900003201");
        assert_eq!(config.poller.poll_interval, Duration::from_secs(30));
        assert_eq!(config.poller.staleness_threshold, Duration::from_secs(120));
        assert_eq!(config.poller.status, StatusConfig::new(0.1, 0.4, 180));
        assert_eq!(config.poller.fetch.duration_mins, 20);
        assert_eq!(config.transit.timeout_secs, 3);
        assert_eq!(config.transit.base_url, "http://localhost:8080");
        assert_eq!(
            config.mock_data_dir,
            Some(PathBuf::from("data/mock_departures"))
        );
        assert_eq!(config.bind_addr.port(), 8000);
    }

    #[test]
    fn blank_values_fall_back_to_defaults() {
        let config = load(&[("POLL_INTERVAL_SECS", "  "), ("BVG_STATIONS", "")]).unwrap();
        assert_eq!(config.poller.poll_interval, Duration::from_secs(60));
        assert_eq!(config.poller.stations.len(), 5);
    }

    #[test]
    fn unparseable_number_names_the_variable() {
        let err = load(&[("POLL_INTERVAL_SECS", "soon")]).unwrap_err();
        assert!(matches!(
            err,
            ConfigError::Invalid {
                var: "POLL_INTERVAL_SECS",
                ..
            }
        ));
        assert!(err.to_string().contains("POLL_INTERVAL_SECS"));
    }

    #[test]
    fn bad_station_is_rejected() {
        let err = load(&[("BVG_STATIONS", "900100003,not a stop")]).unwrap_err();
        assert!(matches!(err, ConfigError::Station(_)));
    }

    #[test]
    fn only_commas_means_no_stations() {
        let err = load(&[("BVG_STATIONS", ", ,")]).unwrap_err();
        assert!(matches!(err, ConfigError::Poller(PollError::NoStations)));
    }

    #[test]
    fn zero_interval_is_rejected() {
        let err = load(&[("POLL_INTERVAL_SECS", "0")]).unwrap_err();
        assert!(matches!(err, ConfigError::Poller(PollError::ZeroInterval)));
    }

    #[test]
    fn inverted_thresholds_are_rejected() {
        let err = load(&[("DEGRADED_THRESHOLD", "0.6"), ("FUCKED_THRESHOLD", "0.3")]).unwrap_err();
        assert!(matches!(err, ConfigError::Poller(PollError::Thresholds(_))));
    }

    #[test]
    fn parse_stations_skips_empty_items() {
        let stations = parse_stations("900100003,,900003201,").unwrap();
        assert_eq!(stations.len(), 2);
    }
}
