//! Live departure data.
//!
//! This module provides the per-station departure fetch the poller relies
//! on: an HTTP client for the HAFAS REST API (transport.rest), a file-backed
//! mock, and the [`DepartureSource`] trait that both implement.
//!
//! Key characteristics of the data:
//! - `delay` is in seconds and may be missing or null for services without
//!   realtime data
//! - `cancelled` is only present (as `true`) on cancelled trips
//! - product categories are HAFAS strings (`subway`, `suburban`, ...)

mod client;
mod convert;
mod error;
mod mock;
mod source;
mod types;

pub use client::{DEFAULT_BASE_URL, HafasClient, TransitConfig};
pub use convert::{convert_departure, convert_departures};
pub use error::TransitError;
pub use mock::MockTransitClient;
pub use source::{DepartureSource, FetchOptions, TransitSource};
pub use types::{DepartureDto, DeparturesResponse, LineDto};
