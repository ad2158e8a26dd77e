//! HTTP path finders for routing services.
//!
//! This module provides [`HttpPathFinder`], an implementation of
//! [`shadewalk_core::PathFinder`] that fetches walking paths from an OSRM
//! routing service.
//!
//! # Architecture
//!
//! The finder calls the OSRM Route API once per candidate departure and
//! rebuilds a [`WalkPath`](shadewalk_core::WalkPath) from the GeoJSON
//! geometry and per-segment annotations. `NoRoute` and `NoSegment` answers
//! mean the place is unreachable and yield `Ok(None)`; every other failure is
//! reported as a [`RoutingError`](shadewalk_core::RoutingError).

mod osrm;
mod provider;

pub use provider::{
    DEFAULT_PROFILE, DEFAULT_USER_AGENT, HttpPathFinder, HttpPathFinderConfig,
    PathFinderBuildError,
};
