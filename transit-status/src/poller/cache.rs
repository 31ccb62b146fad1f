//! The single cached status entry and its read-time snapshot.
//!
//! Writers build a complete [`CacheEntry`] off to the side and swap it in
//! with one assignment under the mutex; readers clone it out under the same
//! lock. Nobody ever observes a half-written entry.

use std::sync::{Mutex, MutexGuard, PoisonError};

use serde::Serialize;

use crate::domain::{Departure, Status};
use crate::status::{
    DisplayText, Metrics, StatusConfig, TypeAggregate, VoiceText, aggregate_by_type, classify,
    format_display, format_voice,
};

/// Result of one poll cycle.
#[derive(Debug, Clone, PartialEq)]
pub struct CacheEntry {
    pub status: Status,
    pub metrics: Metrics,
    pub by_type: TypeAggregate,
    pub display: DisplayText,
    pub voice: VoiceText,
    /// When the cycle ran (Unix millis), `None` before the first cycle.
    pub timestamp_millis: Option<i64>,
}

impl CacheEntry {
    /// The entry served before any poll has completed.
    pub fn unknown() -> Self {
        let metrics = Metrics::default();
        Self {
            status: Status::Unknown,
            metrics,
            by_type: TypeAggregate::default(),
            display: format_display(Status::Unknown, &metrics, false),
            voice: format_voice(Status::Unknown, &metrics, false),
            timestamp_millis: None,
        }
    }

    /// Classify, aggregate and format a merged departure list.
    pub fn from_departures(departures: &[Departure], config: &StatusConfig, now_millis: i64) -> Self {
        let result = classify(departures, config);
        Self {
            status: result.status,
            metrics: result.metrics,
            by_type: aggregate_by_type(departures, config.delay_threshold_secs),
            display: format_display(result.status, &result.metrics, false),
            voice: format_voice(result.status, &result.metrics, false),
            timestamp_millis: Some(now_millis),
        }
    }

    /// Whether the entry is too old to trust at `now_millis`.
    ///
    /// Strict: an entry exactly `threshold_millis` old is still fresh.
    pub fn is_stale(&self, now_millis: i64, threshold_millis: i64) -> bool {
        match self.timestamp_millis {
            None => true,
            Some(ts) => now_millis.saturating_sub(ts) > threshold_millis,
        }
    }

    /// Build the consumer-facing view as of `now_millis`.
    ///
    /// Stale entries report `Unknown` with `Unknown` display text, but keep
    /// their original timestamp and metrics so callers can see how old the
    /// last real data is.
    pub fn snapshot(self, now_millis: i64, threshold_millis: i64) -> StatusSnapshot {
        let stale = self.is_stale(now_millis, threshold_millis);

        let (status, display, voice) = if stale {
            (
                Status::Unknown,
                format_display(Status::Unknown, &self.metrics, true),
                format_voice(Status::Unknown, &self.metrics, true),
            )
        } else {
            (self.status, self.display, self.voice)
        };

        StatusSnapshot {
            status,
            metrics: self.metrics,
            by_type: self.by_type,
            display,
            voice,
            timestamp: self.timestamp_millis,
            stale,
        }
    }
}

impl Default for CacheEntry {
    fn default() -> Self {
        Self::unknown()
    }
}

/// What consumers receive from [`Poller::get_status`](super::Poller::get_status).
///
/// An owned copy: holding or changing it has no effect on the poller.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct StatusSnapshot {
    pub status: Status,
    pub metrics: Metrics,
    pub by_type: TypeAggregate,
    pub display: DisplayText,
    pub voice: VoiceText,
    /// Unix millis of the last poll cycle, `null` before the first.
    pub timestamp: Option<i64>,
    pub stale: bool,
}

/// Mutex-guarded holder of the current entry.
#[derive(Debug, Default)]
pub(crate) struct StatusCache {
    entry: Mutex<CacheEntry>,
}

impl StatusCache {
    fn lock(&self) -> MutexGuard<'_, CacheEntry> {
        // The entry is only ever replaced whole, so a poisoned lock still
        // holds a consistent value.
        self.entry.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Copy out the current entry.
    pub(crate) fn read(&self) -> CacheEntry {
        self.lock().clone()
    }

    /// Replace the current entry.
    pub(crate) fn store(&self, entry: CacheEntry) {
        *self.lock() = entry;
    }

    /// Go back to the pre-poll `Unknown` entry.
    pub(crate) fn reset(&self) {
        self.store(CacheEntry::unknown());
    }
}
