//! Web layer for the status page.
//!
//! A thin consumer of [`Poller::get_status`](crate::poller::Poller::get_status):
//! every handler reads the cached snapshot and renders it, nothing here
//! talks to the transit API.

mod dto;
mod routes;
mod state;
pub mod templates;

pub use dto::*;
pub use routes::{AppError, create_router};
pub use state::AppState;
pub use templates::*;
