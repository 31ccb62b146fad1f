//! Poll-and-cache engine.
//!
//! A [`Poller`] samples departures from every configured station on a
//! timer, classifies the merged list, and keeps exactly one pre-computed
//! [`CacheEntry`]. Consumers read it through [`Poller::get_status`], which
//! is cheap enough to call on every request.
//!
//! Failure handling:
//! - a station that fails contributes no departures for that cycle
//! - if every station fails, the cycle records `Unknown` with a fresh
//!   timestamp
//! - if the cycle cannot even start, the previous entry is kept
//! - data older than the staleness threshold is reported as `Unknown` at
//!   read time, with its original timestamp

mod cache;
mod clock;
mod config;
mod engine;


pub use cache::{CacheEntry, StatusSnapshot};
pub use clock::{Clock, SystemClock};
#[cfg(test)]
pub(crate) use clock::ManualClock;
pub use config::{PollError, PollerConfig};
pub use engine::Poller;
