//! Core types for choosing the most comfortable time to walk somewhere.
//!
//! The crate samples a departure window at a fixed step, scores each sample
//! with a pluggable [`ObjectiveFunction`] and returns the best feasible
//! departure. Routing and cost models live behind the [`PathFinder`] and
//! [`RoutingHelper`] traits so the search never depends on a concrete
//! routing engine or weather source.

#![forbid(unsafe_code)]

mod error;
mod finder;
mod objective;
mod path;
mod routing;
mod time_axis;
mod time_range;
mod weighting;

#[doc(hidden)]
pub mod test_support;

pub use error::FinderError;
pub use finder::{
    CancellationToken, CandidateTimes, Direction, Execution, OptimalTime, OptimalTimeFinder,
    SearchDiagnostics, SearchOptions, SearchReport,
};
pub use objective::{
    Evaluation, Infeasibility, ObjectiveError, ObjectiveFunction, ObjectiveFunctionPath, Outcome,
    RouteCostObjective, RoutedObjectiveFunction,
};
pub use path::{PathEdge, WalkPath};
pub use routing::{PathFinder, RoutingError, RoutingHelper};
pub use time_axis::TimeAxis;
pub use time_range::{TimeRange, TimeRangeError};
pub use weighting::WeightingType;
