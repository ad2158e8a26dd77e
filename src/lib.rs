//! Facade crate for the shadewalk departure-time search.
//!
//! This crate re-exports the core search types and, behind the `data`
//! feature, the OSRM path finder and thermal exposure model.

#![forbid(unsafe_code)]

pub use shadewalk_core::{
    CancellationToken, CandidateTimes, Direction, Evaluation, Execution, FinderError,
    Infeasibility, ObjectiveError, ObjectiveFunction, ObjectiveFunctionPath, OptimalTime,
    OptimalTimeFinder, Outcome, PathEdge, PathFinder, RouteCostObjective,
    RoutedObjectiveFunction, RoutingError, RoutingHelper, SearchDiagnostics, SearchOptions,
    SearchReport, TimeAxis, TimeRange, TimeRangeError, WalkPath, WeightingType,
};

#[cfg(feature = "data")]
pub use shadewalk_data as data;
