//! Scoring departure times.
//!
//! An [`ObjectiveFunction`] scores a departure between two places. The usual
//! implementation, [`RoutedObjectiveFunction`], routes the walk with a
//! [`PathFinder`](crate::PathFinder) and prices the resulting path with an
//! [`ObjectiveFunctionPath`] such as [`RouteCostObjective`].

mod error;
mod evaluation;
mod function;
mod path;
mod routed;

pub use error::ObjectiveError;
pub use evaluation::{Evaluation, Infeasibility, Outcome};
pub use function::ObjectiveFunction;
pub use path::{ObjectiveFunctionPath, RouteCostObjective};
pub use routed::RoutedObjectiveFunction;
