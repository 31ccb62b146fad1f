//! Disruption classification.
//!
//! Turns a merged list of departures into an overall [`Status`] plus the
//! [`Metrics`] it was derived from. Every departure counts towards the
//! totals here, whatever its product category.

use serde::Serialize;

use crate::domain::{Departure, Status};

use super::config::StatusConfig;

/// Disruption counts and integer percentages for one poll cycle.
///
/// `disrupted_count == delayed_count + cancelled_count` and
/// `percent_delayed + percent_cancelled == percent_disrupted` always hold.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Metrics {
    pub total_services: usize,
    pub delayed_count: usize,
    pub cancelled_count: usize,
    pub disrupted_count: usize,
    pub percent_delayed: u32,
    pub percent_cancelled: u32,
    pub percent_disrupted: u32,
}

impl Metrics {
    /// Build metrics from raw counts.
    ///
    /// `percent_cancelled` is derived as the remainder so the percentages
    /// always add up after rounding.
    pub fn from_counts(total: usize, delayed: usize, cancelled: usize) -> Self {
        let disrupted = delayed + cancelled;
        let percent_disrupted = percent_half_up(disrupted, total);
        let percent_delayed = percent_half_up(delayed, total);

        Self {
            total_services: total,
            delayed_count: delayed,
            cancelled_count: cancelled,
            disrupted_count: disrupted,
            percent_delayed,
            percent_cancelled: percent_disrupted - percent_delayed,
            percent_disrupted,
        }
    }

    /// Disrupted share as a fraction (0.0 to 1.0) of the rounded percentage.
    pub fn disrupted_fraction(&self) -> f64 {
        f64::from(self.percent_disrupted) / 100.0
    }
}

/// Result of classifying a set of departures.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Classification {
    pub status: Status,
    pub metrics: Metrics,
}

/// Classify departures into an overall status.
///
/// An empty list yields `Unknown` with zeroed metrics. Thresholds are
/// strict: `percent_disrupted / 100 > fucked` is `Fucked`, otherwise
/// `> degraded` is `Degraded`, otherwise `Fine`.
pub fn classify(departures: &[Departure], config: &StatusConfig) -> Classification {
    if departures.is_empty() {
        return Classification {
            status: Status::Unknown,
            metrics: Metrics::default(),
        };
    }

    let threshold = config.delay_threshold_secs;
    let (delayed, cancelled) =
        departures
            .iter()
            .fold((0, 0), |(delayed, cancelled), dep| {
                if dep.is_cancelled() {
                    (delayed, cancelled + 1)
                } else if dep.is_delayed(threshold) {
                    (delayed + 1, cancelled)
                } else {
                    (delayed, cancelled)
                }
            });

    let metrics = Metrics::from_counts(departures.len(), delayed, cancelled);

    Classification {
        status: status_for(&metrics, config),
        metrics,
    }
}

/// Map metrics to a status using strict threshold comparisons.
pub fn status_for(metrics: &Metrics, config: &StatusConfig) -> Status {
    if metrics.total_services == 0 {
        return Status::Unknown;
    }

    let fraction = metrics.disrupted_fraction();
    if fraction > config.fucked_threshold {
        Status::Fucked
    } else if fraction > config.degraded_threshold {
        Status::Degraded
    } else {
        Status::Fine
    }
}

/// `round(100 * part / total)` with halves rounded up, in integer math.
fn percent_half_up(part: usize, total: usize) -> u32 {
    if total == 0 {
        return 0;
    }
    let part = part as u64;
    let total = total as u64;
    ((200 * part + total) / (2 * total)) as u32
}


#[cfg(test)]
mod proptests {
    use super::*;
    use crate::domain::{Line, ProductCategory};
    use proptest::prelude::*;

    fn arb_departure() -> impl Strategy<Value = Departure> {
        (
            prop::option::of(-600i64..3600),
            any::<bool>(),
            prop::sample::select(vec!["bus", "subway", "tram", "suburban", "regional"]),
        )
            .prop_map(|(delay, cancelled, product)| Departure {
                line: Some(Line::new("X", ProductCategory::from_product(product))),
                direction: None,
                scheduled_time: None,
                delay_seconds: delay,
                cancelled,
            })
    }

    proptest! {
        /// Counts and percentages are always consistent
        #[test]
        fn metric_invariants(deps in prop::collection::vec(arb_departure(), 0..300)) {
            let m = classify(&deps, &StatusConfig::default()).metrics;
            prop_assert_eq!(m.total_services, deps.len());
            prop_assert_eq!(m.disrupted_count, m.delayed_count + m.cancelled_count);
            prop_assert_eq!(m.percent_delayed + m.percent_cancelled, m.percent_disrupted);
            prop_assert!(m.percent_disrupted <= 100);
        }

        /// Unknown only for empty input
        #[test]
        fn unknown_iff_empty(deps in prop::collection::vec(arb_departure(), 0..50)) {
            let status = classify(&deps, &StatusConfig::default()).status;
            prop_assert_eq!(status == Status::Unknown, deps.is_empty());
        }

        /// More disruption never yields a milder status
        #[test]
        fn status_monotonic(total in 1usize..500, a in 0usize..500, b in 0usize..500) {
            let config = StatusConfig::default();
            let (lo, hi) = (a.min(b).min(total), a.max(b).min(total));
            let rank = |s: Status| match s {
                Status::Fine => 0,
                Status::Degraded => 1,
                Status::Fucked => 2,
                Status::Unknown => 3,
            };
            let lo_status = status_for(&Metrics::from_counts(total, lo, 0), &config);
            let hi_status = status_for(&Metrics::from_counts(total, hi, 0), &config);
            prop_assert!(rank(lo_status) <= rank(hi_status));
        }
    }
}
