//! OSRM API response types for the Route service.
//!
//! Only the fields needed to rebuild a walking path are deserialised: the
//! GeoJSON geometry and the per-segment `distance` and `duration`
//! annotations of each leg.
//!
//! See: <http://project-osrm.org/docs/v5.24.0/api/#route-service>

use serde::Deserialize;

/// Codes meaning the places are valid but not connected by a walkable path.
pub const NOT_FOUND_CODES: [&str; 2] = ["NoRoute", "NoSegment"];

/// OSRM Route API response.
#[derive(Debug, Deserialize)]
pub struct RouteResponse {
    /// Status code from OSRM.
    ///
    /// Common values:
    /// - `"Ok"` - Request was successful
    /// - `"NoRoute"` - No route between the coordinates
    /// - `"NoSegment"` - A coordinate could not be snapped to the network
    /// - `"InvalidQuery"` - Invalid query parameters
    pub code: String,

    /// Optional error message when `code` is not `"Ok"`.
    pub message: Option<String>,

    /// Alternative routes, best first.
    #[serde(default)]
    pub routes: Vec<Route>,
}

impl RouteResponse {
    /// Check if the response indicates success.
    #[must_use]
    pub fn is_ok(&self) -> bool {
        self.code == "Ok"
    }

    /// Check if the response reports that no path exists.
    #[must_use]
    pub fn is_not_found(&self) -> bool {
        NOT_FOUND_CODES.contains(&self.code.as_str())
    }
}

/// A single route between the requested coordinates.
#[derive(Debug, Deserialize)]
pub struct Route {
    /// Total distance in metres.
    pub distance: f64,
    /// Total duration in seconds.
    pub duration: f64,
    /// Full route geometry.
    pub geometry: Geometry,
    /// One leg per pair of consecutive waypoints.
    #[serde(default)]
    pub legs: Vec<Leg>,
}

/// GeoJSON `LineString` geometry.
#[derive(Debug, Deserialize)]
pub struct Geometry {
    /// `[lon, lat]` pairs.
    pub coordinates: Vec<[f64; 2]>,
}

/// Route leg with optional per-segment annotations.
#[derive(Debug, Deserialize)]
pub struct Leg {
    /// Per-segment annotations, present when requested.
    pub annotation: Option<Annotation>,
}

/// Per-segment metrics of a leg.
#[derive(Debug, Deserialize)]
pub struct Annotation {
    /// Segment lengths in metres.
    #[serde(default)]
    pub distance: Vec<f64>,
    /// Segment durations in seconds.
    #[serde(default)]
    pub duration: Vec<f64>,
}
