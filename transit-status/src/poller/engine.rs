//! The poll-and-cache engine.

use std::sync::{Arc, Mutex, MutexGuard, PoisonError, Weak};
use std::time::{Duration, Instant};

use futures::future::join_all;
use tokio::task::JoinHandle;
use tokio::time::MissedTickBehavior;
use tracing::{debug, error, info, warn};

use crate::domain::Departure;
use crate::transit::DepartureSource;

use super::cache::{CacheEntry, StatusCache, StatusSnapshot};
use super::clock::{Clock, SystemClock};
use super::config::PollerConfig;

/// Background sampler that keeps one pre-computed status entry fresh.
///
/// Cloning is cheap and every clone drives the same engine, so one handle
/// can live in the web layer's state while another controls the lifecycle.
///
/// # Lifecycle
///
/// - [`start`](Self::start) resets the cache, polls immediately, then polls
///   every `poll_interval`. Calling it again while running does nothing.
/// - [`stop`](Self::stop) cancels the schedule. A cycle already in flight
///   still completes and writes its result.
/// - [`get_status`](Self::get_status) works in every state.
pub struct Poller<S, C = SystemClock> {
    inner: Arc<Inner<S, C>>,
}

struct Inner<S, C> {
    source: S,
    clock: C,
    config: PollerConfig,
    cache: StatusCache,
    /// Scheduler task, `Some` while running.
    timer: Mutex<Option<JoinHandle<()>>>,
}

impl<S, C> Clone for Poller<S, C> {
    fn clone(&self) -> Self {
        Self {
            inner: Arc::clone(&self.inner),
        }
    }
}

impl<S: DepartureSource> Poller<S, SystemClock> {
    /// Create a stopped poller using the system clock.
    pub fn new(source: S, config: PollerConfig) -> Self {
        Self::with_clock(source, config, SystemClock)
    }
}

impl<S: DepartureSource, C: Clock> Poller<S, C> {
    /// Create a stopped poller with an explicit clock.
    ///
    /// The cache starts as `Unknown` with no timestamp.
    pub fn with_clock(source: S, config: PollerConfig, clock: C) -> Self {
        Self {
            inner: Arc::new(Inner {
                source,
                clock,
                config,
                cache: StatusCache::default(),
                timer: Mutex::new(None),
            }),
        }
    }

    /// The configuration this poller was built with.
    pub fn config(&self) -> &PollerConfig {
        &self.inner.config
    }

    /// The departure source.
    pub fn source(&self) -> &S {
        &self.inner.source
    }

    fn timer(&self) -> MutexGuard<'_, Option<JoinHandle<()>>> {
        self.inner.timer.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Whether the recurring schedule is active.
    pub fn is_running(&self) -> bool {
        self.timer().as_ref().is_some_and(|h| !h.is_finished())
    }

    /// Start polling.
    ///
    /// Resets the cache to `Unknown` before returning, triggers a poll
    /// straight away and schedules one every `poll_interval`. With a zero
    /// interval only the immediate poll runs. A no-op when already running.
    /// Must be called from within a Tokio runtime.
    pub fn start(&self) {
        let mut timer = self.timer();
        if timer.as_ref().is_some_and(|h| !h.is_finished()) {
            debug!("Poller already running, ignoring start");
            return;
        }

        self.inner.cache.reset();

        let interval = self.inner.config.poll_interval;
        if interval.is_zero() {
            error!("Poll interval is zero, polling once without a schedule");
            let poller = self.clone();
            tokio::spawn(async move { poller.poll().await });
            return;
        }

        let weak = Arc::downgrade(&self.inner);
        *timer = Some(tokio::spawn(run_schedule(weak, interval)));

        info!(
            stations = self.inner.config.stations.len(),
            interval_secs = interval.as_secs(),
            "Poller started"
        );
    }

    /// Stop the recurring schedule.
    ///
    /// Safe to call at any time, any number of times.
    pub fn stop(&self) {
        if let Some(handle) = self.timer().take() {
            handle.abort();
            info!("Poller stopped");
        }
    }

    /// Run one fetch-merge-classify-store cycle.
    ///
    /// Never fails: station errors drop that station's data, and a cycle
    /// that cannot start leaves the cache as it was.
    pub async fn poll(&self) {
        let config = &self.inner.config;
        if let Err(e) = config.validate_cycle() {
            error!(error = %e, "Poll cycle skipped, cached status left unchanged");
            return;
        }

        let started = Instant::now();
        let (departures, failed) = self.fetch_all().await;

        if failed == config.stations.len() {
            warn!(
                stations = failed,
                "Every station fetch failed, recording unknown status"
            );
        }

        let entry = CacheEntry::from_departures(
            &departures,
            &config.status,
            self.inner.clock.now_millis(),
        );

        info!(
            status = %entry.status,
            services = entry.metrics.total_services,
            disrupted_pct = entry.metrics.percent_disrupted,
            failed_stations = failed,
            elapsed_ms = started.elapsed().as_millis() as u64,
            "Poll cycle complete"
        );

        self.inner.cache.store(entry);
    }

    /// Fetch every station concurrently and merge what succeeded.
    ///
    /// Returns the merged departures and the number of stations that failed.
    async fn fetch_all(&self) -> (Vec<Departure>, usize) {
        let config = &self.inner.config;

        // Spawn everything before awaiting anything.
        let handles: Vec<_> = config
            .stations
            .iter()
            .map(|station| {
                let poller = self.clone();
                let station = station.clone();
                tokio::spawn(async move {
                    let inner = &poller.inner;
                    inner
                        .source
                        .fetch_departures(&station, &inner.config.fetch)
                        .await
                })
            })
            .collect();

        let results = join_all(handles).await;

        let mut departures = Vec::new();
        let mut failed = 0;

        for (station, result) in config.stations.iter().zip(results) {
            match result {
                Ok(Ok(deps)) => {
                    debug!(station = %station, count = deps.len(), "Station fetched");
                    departures.extend(deps);
                }
                Ok(Err(e)) => {
                    failed += 1;
                    warn!(station = %station, error = %e, "Failed to fetch departures, skipping station");
                }
                Err(e) => {
                    failed += 1;
                    warn!(station = %station, error = %e, "Fetch task died, skipping station");
                }
            }
        }

        (departures, failed)
    }

    /// Current status as of now.
    ///
    /// Returns an owned snapshot. Staleness is worked out here, at read
    /// time, against the configured threshold.
    pub fn get_status(&self) -> StatusSnapshot {
        let entry = self.inner.cache.read();
        entry.snapshot(
            self.inner.clock.now_millis(),
            self.inner.config.staleness_threshold_millis(),
        )
    }
}

/// Trigger a poll on every tick until stopped or the poller is dropped.
///
/// Each cycle runs as its own task so that aborting the schedule never
/// cancels a cycle halfway through.
async fn run_schedule<S: DepartureSource, C: Clock>(
    weak: Weak<Inner<S, C>>,
    period: Duration,
) {
    let mut interval = tokio::time::interval(period);
    interval.set_missed_tick_behavior(MissedTickBehavior::Delay);

    loop {
        // The first tick completes immediately.
        interval.tick().await;

        let Some(inner) = weak.upgrade() else {
            debug!("Poller dropped, ending schedule");
            return;
        };

        let poller = Poller { inner };
        tokio::spawn(async move { poller.poll().await });
    }
}

impl<S, C> Drop for Inner<S, C> {
    fn drop(&mut self) {
        let timer = self.timer.get_mut().unwrap_or_else(PoisonError::into_inner);
        if let Some(handle) = timer.take() {
            handle.abort();
        }
    }
}
