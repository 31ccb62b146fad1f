//! Domain types for the disruption tracker.
//!
//! This module contains the core domain model types that represent
//! validated transit data. Identifier types enforce their invariants at
//! construction time; departure records mirror the source data and
//! tolerate missing fields.

mod departure;
mod station;
mod status;

pub use departure::{Departure, Line, ProductCategory};
pub use station::{InvalidStationId, StationId};
pub use status::Status;
