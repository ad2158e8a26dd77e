//! Deterministic collaborators for unit, behaviour and property tests.

use std::collections::BTreeMap;
use std::time::Duration;

use geo::{Coord, LineString};
use parking_lot::Mutex;

use crate::{
    Evaluation, Infeasibility, ObjectiveError, ObjectiveFunction, ObjectiveFunctionPath, PathEdge,
    PathFinder, RoutingError, RoutingHelper, TimeAxis, TimeRange, WalkPath, WeightingType,
};

/// Build a single-edge path with the given length and walking time.
#[must_use]
pub fn straight_path(length_metres: f64, duration: Duration) -> WalkPath {
    WalkPath::new(
        LineString::new(Vec::new()),
        vec![PathEdge::new(length_metres, duration)],
    )
}

/// `PathFinder` returning the same straight path for every request.
#[derive(Debug, Clone, Copy)]
pub struct FixedPathFinder {
    length_metres: f64,
    duration: Duration,
}

impl FixedPathFinder {
    /// Create a finder whose paths have the given length and walking time.
    #[must_use]
    pub const fn new(length_metres: f64, duration: Duration) -> Self {
        Self {
            length_metres,
            duration,
        }
    }
}

impl<T> PathFinder<T> for FixedPathFinder {
    fn find_path(
        &self,
        start: Coord<f64>,
        place: Coord<f64>,
        _departure: T,
        _weighting: WeightingType,
    ) -> Result<Option<WalkPath>, RoutingError> {
        Ok(Some(WalkPath::new(
            LineString::from(vec![start, place]),
            vec![PathEdge::new(self.length_metres, self.duration)],
        )))
    }
}

/// `PathFinder` for which no place is ever reachable.
#[derive(Debug, Default, Clone, Copy)]
pub struct NoPathFinder;

impl<T> PathFinder<T> for NoPathFinder {
    fn find_path(
        &self,
        _start: Coord<f64>,
        _place: Coord<f64>,
        _departure: T,
        _weighting: WeightingType,
    ) -> Result<Option<WalkPath>, RoutingError> {
        Ok(None)
    }
}

/// `RoutingHelper` pricing a path by its length in metres.
#[derive(Debug, Default, Clone, Copy)]
pub struct LengthRoutingHelper;

impl<T> RoutingHelper<T> for LengthRoutingHelper {
    fn route_cost(
        &self,
        path: &WalkPath,
        _time: T,
        _weighting: WeightingType,
    ) -> Result<f64, RoutingError> {
        Ok(path.distance_metres())
    }
}

/// `ObjectiveFunctionPath` answering from a table keyed by time.
///
/// Times missing from the table cannot be scored.
#[derive(Debug, Clone, Default)]
pub struct ScriptedPathObjective<T> {
    values: BTreeMap<T, Option<f64>>,
}

impl<T: Ord> ScriptedPathObjective<T> {
    /// Build the table from `(time, value)` pairs.
    #[must_use]
    pub fn from_pairs<I>(pairs: I) -> Self
    where
        I: IntoIterator<Item = (T, Option<f64>)>,
    {
        Self {
            values: pairs.into_iter().collect(),
        }
    }
}

impl<T: Ord + Send + Sync> ObjectiveFunctionPath<T> for ScriptedPathObjective<T> {
    fn value(
        &self,
        time: T,
        _path: &WalkPath,
        _weighting: WeightingType,
    ) -> Result<Option<f64>, ObjectiveError> {
        Ok(self.values.get(&time).copied().flatten())
    }
}

#[derive(Debug, Clone)]
enum Script {
    Value(Option<f64>, Duration),
    Fault(RoutingError),
}

/// `ObjectiveFunction` answering from a table keyed by time.
///
/// Every call is recorded so tests can inspect which candidates a search
/// evaluated. Times missing from the table are reported as having no path.
#[derive(Debug, Default)]
pub struct ScriptedObjective<T> {
    script: BTreeMap<T, Script>,
    weighting: Option<WeightingType>,
    calls: Mutex<Vec<T>>,
    last_walking_time: Mutex<Option<Duration>>,
}

impl<T: TimeAxis> ScriptedObjective<T> {
    /// Script present or absent values with a long enough walk.
    #[must_use]
    pub fn from_values<I>(values: I) -> Self
    where
        I: IntoIterator<Item = (T, Option<f64>)>,
    {
        Self::from_walks(
            values
                .into_iter()
                .map(|(time, value)| (time, value, Duration::from_secs(15 * 60))),
        )
    }

    /// Script values together with the walking time found at each time.
    #[must_use]
    pub fn from_walks<I>(walks: I) -> Self
    where
        I: IntoIterator<Item = (T, Option<f64>, Duration)>,
    {
        Self {
            script: walks
                .into_iter()
                .map(|(time, value, walking)| (time, Script::Value(value, walking)))
                .collect(),
            weighting: None,
            calls: Mutex::new(Vec::new()),
            last_walking_time: Mutex::new(None),
        }
    }

    /// Make the objective fail with `error` when asked about `time`.
    #[must_use]
    pub fn with_fault(mut self, time: T, error: RoutingError) -> Self {
        self.script.insert(time, Script::Fault(error));
        self
    }

    /// Report `weighting` from [`ObjectiveFunction::weighting_type`].
    #[must_use]
    pub fn with_weighting(mut self, weighting: WeightingType) -> Self {
        self.weighting = Some(weighting);
        self
    }

    /// Times evaluated so far, in call order.
    #[must_use]
    pub fn calls(&self) -> Vec<T> {
        self.calls.lock().clone()
    }
}

impl<T: TimeAxis> ObjectiveFunction<T> for ScriptedObjective<T> {
    fn evaluate(
        &self,
        time: T,
        _start: Coord<f64>,
        _place: Coord<f64>,
        limits: &TimeRange<T>,
        min_walking_time: Duration,
    ) -> Result<Evaluation, ObjectiveError> {
        self.calls.lock().push(time);
        *self.last_walking_time.lock() = None;
        if !limits.contains(&time) {
            return Ok(Evaluation::infeasible(Infeasibility::OutsideLimits, None));
        }
        let evaluation = match self.script.get(&time) {
            None => Evaluation::infeasible(Infeasibility::NoPath, None),
            Some(Script::Fault(error)) => return Err(error.clone().into()),
            Some(Script::Value(_, walking)) if *walking < min_walking_time => {
                Evaluation::infeasible(
                    Infeasibility::BelowMinimumWalkingTime {
                        found: *walking,
                        minimum: min_walking_time,
                    },
                    Some(*walking),
                )
            }
            Some(Script::Value(Some(value), walking)) => Evaluation::feasible(*value, *walking),
            Some(Script::Value(None, walking)) => {
                Evaluation::infeasible(Infeasibility::NoData, Some(*walking))
            }
        };
        *self.last_walking_time.lock() = evaluation.walking_time;
        Ok(evaluation)
    }

    fn weighting_type(&self) -> Option<WeightingType> {
        self.weighting
    }

    fn last_walking_time(&self) -> Option<Duration> {
        *self.last_walking_time.lock()
    }
}
