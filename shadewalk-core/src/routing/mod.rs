//! Routing collaborators consumed by the departure search.
//!
//! The [`PathFinder`] trait abstracts the routing engine that computes a
//! walking path for a departure time. The [`RoutingHelper`] trait abstracts
//! the evaluator that prices an existing path at a point in time. Both are
//! shared read-only across candidate evaluations, hence `Send + Sync`.

mod error;

use geo::Coord;

pub use error::RoutingError;

use crate::{WalkPath, WeightingType};

/// Compute the walking path from `start` to `place` for a departure time.
///
/// Return `Ok(None)` when no path exists (e.g. either point is off the
/// network). Reserve `Err` for collaborator faults.
///
/// # Examples
///
/// ```rust
/// use std::time::Duration;
/// use geo::{Coord, LineString};
/// use shadewalk_core::{PathEdge, PathFinder, RoutingError, WalkPath, WeightingType};
///
/// struct DirectFinder;
///
/// impl PathFinder<i64> for DirectFinder {
///     fn find_path(
///         &self,
///         start: Coord<f64>,
///         place: Coord<f64>,
///         _departure: i64,
///         _weighting: WeightingType,
///     ) -> Result<Option<WalkPath>, RoutingError> {
///         let geometry = LineString::from(vec![start, place]);
///         Ok(Some(WalkPath::new(
///             geometry,
///             vec![PathEdge::new(100.0, Duration::from_secs(75))],
///         )))
///     }
/// }
///
/// let path = DirectFinder
///     .find_path(Coord { x: 0.0, y: 0.0 }, Coord { x: 0.001, y: 0.0 }, 0, WeightingType::Fastest)?
///     .expect("direct path");
/// assert_eq!(path.duration(), Duration::from_secs(75));
/// # Ok::<(), RoutingError>(())
/// ```
pub trait PathFinder<T>: Send + Sync {
    /// Return the path taken when departing at `departure`.
    fn find_path(
        &self,
        start: Coord<f64>,
        place: Coord<f64>,
        departure: T,
        weighting: WeightingType,
    ) -> Result<Option<WalkPath>, RoutingError>;
}

/// Price a path walked from `time` under a weighting.
///
/// Implementations are expected to succeed for any path their paired
/// [`PathFinder`] produced; an `Err` aborts the search.
pub trait RoutingHelper<T>: Send + Sync {
    /// Return the route cost of `path` when walked from `time`.
    fn route_cost(
        &self,
        path: &WalkPath,
        time: T,
        weighting: WeightingType,
    ) -> Result<f64, RoutingError>;
}

impl<T, P: PathFinder<T> + ?Sized> PathFinder<T> for &P {
    fn find_path(
        &self,
        start: Coord<f64>,
        place: Coord<f64>,
        departure: T,
        weighting: WeightingType,
    ) -> Result<Option<WalkPath>, RoutingError> {
        (**self).find_path(start, place, departure, weighting)
    }
}

impl<T, H: RoutingHelper<T> + ?Sized> RoutingHelper<T> for &H {
    fn route_cost(
        &self,
        path: &WalkPath,
        time: T,
        weighting: WeightingType,
    ) -> Result<f64, RoutingError> {
        (**self).route_cost(path, time, weighting)
    }
}

impl<T, P: PathFinder<T> + ?Sized> PathFinder<T> for Box<P> {
    fn find_path(
        &self,
        start: Coord<f64>,
        place: Coord<f64>,
        departure: T,
        weighting: WeightingType,
    ) -> Result<Option<WalkPath>, RoutingError> {
        (**self).find_path(start, place, departure, weighting)
    }
}

impl<T, H: RoutingHelper<T> + ?Sized> RoutingHelper<T> for Box<H> {
    fn route_cost(
        &self,
        path: &WalkPath,
        time: T,
        weighting: WeightingType,
    ) -> Result<f64, RoutingError> {
        (**self).route_cost(path, time, weighting)
    }
}
