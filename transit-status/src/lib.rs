//! Is BVG fucked?
//!
//! Samples live departures from a handful of Berlin stations on a fixed
//! schedule, classifies how disrupted the network is, and serves the
//! cached verdict to a web page and a voice assistant without ever
//! blocking a request on the transit API.

pub mod config;
pub mod domain;
pub mod poller;
pub mod status;
pub mod transit;
pub mod web;
