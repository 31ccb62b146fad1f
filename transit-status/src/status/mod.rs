//! Disruption classification.
//!
//! Pure, synchronous functions that turn a merged list of departures into
//! everything a consumer needs to show: an overall status with metrics,
//! per-category counts, and display/voice text.
//!
//! None of these functions fail; malformed departures are tolerated via the
//! `Option` fields on [`Departure`](crate::domain::Departure).

mod aggregate;
mod classify;
mod config;
mod display;
pub mod palette;

pub use aggregate::{TypeAggregate, TypeCounts, aggregate_by_type};
pub use classify::{Classification, Metrics, classify, status_for};
pub use config::{StatusConfig, ThresholdError};
pub use display::{DisplayText, VoiceText, format_display, format_voice};
