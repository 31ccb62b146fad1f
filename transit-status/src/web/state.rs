//! Application state for the web layer.

use crate::poller::Poller;
use crate::transit::TransitSource;

/// Shared application state.
///
/// The poller handle is itself cheap to clone; every clone reads the same
/// cache.
#[derive(Clone)]
pub struct AppState {
    pub poller: Poller<TransitSource>,
}

impl AppState {
    /// Create a new app state.
    pub fn new(poller: Poller<TransitSource>) -> Self {
        Self { poller }
    }
}
