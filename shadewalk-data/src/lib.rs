//! Data adapters for shadewalk.
//!
//! - [`routing`]: walking paths from an OSRM routing service.
//! - [`weather`]: hourly thermal conditions loaded from JSON.
//! - [`exposure`]: thermal exposure costs of a path at a departure time.

#![forbid(unsafe_code)]

pub mod exposure;
pub mod routing;
pub mod weather;
