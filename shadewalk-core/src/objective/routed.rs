//! Objective composed from a path finder and a path-level objective.

use std::time::Duration;

use geo::Coord;
use parking_lot::Mutex;

use crate::{
    Evaluation, Infeasibility, ObjectiveError, ObjectiveFunction, ObjectiveFunctionPath, Outcome,
    PathFinder, TimeAxis, TimeRange, WeightingType,
};

/// [`ObjectiveFunction`] that routes each candidate and scores the path.
///
/// For every call it rejects times outside the limits, asks the
/// [`PathFinder`] for the path taken when departing at that time, rejects
/// walks shorter than the minimum, and otherwise returns whatever the
/// [`ObjectiveFunctionPath`] reports.
///
/// # Examples
/// ```
/// use std::time::Duration;
/// use geo::Coord;
/// use shadewalk_core::test_support::{FixedPathFinder, LengthRoutingHelper};
/// use shadewalk_core::{
///     ObjectiveFunction, RouteCostObjective, RoutedObjectiveFunction, TimeRange, WeightingType,
/// };
///
/// # fn main() -> Result<(), Box<dyn std::error::Error>> {
/// let objective = RoutedObjectiveFunction::new(
///     FixedPathFinder::new(400.0, Duration::from_secs(300)),
///     RouteCostObjective::new(LengthRoutingHelper, WeightingType::Shortest),
///     Some(WeightingType::Shortest),
/// )?;
/// let limits = TimeRange::new(0_i64, 60)?;
/// let here = Coord { x: 0.0, y: 0.0 };
///
/// assert_eq!(ObjectiveFunction::<i64>::last_walking_time(&objective), None);
/// let value = objective.value(30, here, here, &limits, Duration::from_secs(60))?;
/// assert_eq!(value, Some(400.0));
/// assert_eq!(
///     ObjectiveFunction::<i64>::last_walking_time(&objective),
///     Some(Duration::from_secs(300))
/// );
/// # Ok(())
/// # }
/// ```
#[derive(Debug)]
pub struct RoutedObjectiveFunction<P, O> {
    path_finder: P,
    path_objective: O,
    weighting: WeightingType,
    last_walking_time: Mutex<Option<Duration>>,
}

impl<P, O> RoutedObjectiveFunction<P, O> {
    /// Compose a path finder and a path objective under `weighting`.
    ///
    /// # Errors
    ///
    /// Returns [`ObjectiveError::MissingWeighting`] when `weighting` is
    /// `None`; routing always needs one.
    pub fn new(
        path_finder: P,
        path_objective: O,
        weighting: Option<WeightingType>,
    ) -> Result<Self, ObjectiveError> {
        let Some(weighting) = weighting else {
            return Err(ObjectiveError::MissingWeighting);
        };
        Ok(Self {
            path_finder,
            path_objective,
            weighting,
            last_walking_time: Mutex::new(None),
        })
    }

    fn remember(&self, walking_time: Option<Duration>) {
        *self.last_walking_time.lock() = walking_time;
    }
}

impl<T, P, O> ObjectiveFunction<T> for RoutedObjectiveFunction<P, O>
where
    T: TimeAxis,
    P: PathFinder<T>,
    O: ObjectiveFunctionPath<T>,
{
    fn evaluate(
        &self,
        time: T,
        start: Coord<f64>,
        place: Coord<f64>,
        limits: &TimeRange<T>,
        min_walking_time: Duration,
    ) -> Result<Evaluation, ObjectiveError> {
        self.remember(None);
        if !limits.contains(&time) {
            return Ok(Evaluation::infeasible(Infeasibility::OutsideLimits, None));
        }

        let Some(path) = self
            .path_finder
            .find_path(start, place, time, self.weighting)?
        else {
            log::debug!("no {} path from {start:?} to {place:?} at {time}", self.weighting);
            return Ok(Evaluation::infeasible(Infeasibility::NoPath, None));
        };

        let walking_time = path.duration();
        self.remember(Some(walking_time));
        if walking_time < min_walking_time {
            return Ok(Evaluation::infeasible(
                Infeasibility::BelowMinimumWalkingTime {
                    found: walking_time,
                    minimum: min_walking_time,
                },
                Some(walking_time),
            ));
        }

        let outcome = self
            .path_objective
            .value(time, &path, self.weighting)?
            .map_or(Outcome::Infeasible(Infeasibility::NoData), Outcome::Feasible);
        Ok(Evaluation {
            outcome,
            walking_time: Some(walking_time),
        })
    }

    fn weighting_type(&self) -> Option<WeightingType> {
        Some(self.weighting)
    }

    fn last_walking_time(&self) -> Option<Duration> {
        *self.last_walking_time.lock()
    }
}
