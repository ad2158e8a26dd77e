//! Point-level objectives: score walking from a start to a place at a time.

use std::time::Duration;

use geo::Coord;

use crate::{Evaluation, ObjectiveError, TimeAxis, TimeRange, WeightingType};

/// Score the walk from `start` to `place` when departing at `time`.
///
/// [`evaluate`](Self::evaluate) is the only required operation. The
/// accessors default to "nothing known", which suits weighting-agnostic
/// objectives without diagnostic state.
///
/// Implementations must answer `time` values outside `limits` with
/// [`Infeasibility::OutsideLimits`](crate::Infeasibility::OutsideLimits)
/// before doing any routing work, and must report infeasibility through the
/// returned [`Evaluation`] rather than through `Err`.
///
/// # Examples
///
/// ```rust
/// use std::time::Duration;
/// use geo::Coord;
/// use shadewalk_core::{
///     Evaluation, Infeasibility, ObjectiveError, ObjectiveFunction, TimeRange,
/// };
///
/// /// Prefers departures close to 07:00, expressed in minutes since midnight.
/// struct EarlyBird;
///
/// impl ObjectiveFunction<i64> for EarlyBird {
///     fn evaluate(
///         &self,
///         time: i64,
///         _start: Coord<f64>,
///         _place: Coord<f64>,
///         limits: &TimeRange<i64>,
///         _min_walking_time: Duration,
///     ) -> Result<Evaluation, ObjectiveError> {
///         if !limits.contains(&time) {
///             return Ok(Evaluation::infeasible(Infeasibility::OutsideLimits, None));
///         }
///         let distance = u32::try_from((time - 420).abs()).unwrap_or(u32::MAX);
///         Ok(Evaluation::feasible(f64::from(distance), Duration::from_secs(600)))
///     }
/// }
///
/// let limits = TimeRange::new(360, 540)?;
/// let origin = Coord { x: 0.0, y: 0.0 };
/// let value = EarlyBird.value(450, origin, origin, &limits, Duration::ZERO)?;
/// assert_eq!(value, Some(30.0));
/// # Ok::<(), Box<dyn std::error::Error>>(())
/// ```
pub trait ObjectiveFunction<T: TimeAxis>: Send + Sync {
    /// Score departure at `time`, reporting the walking time found.
    fn evaluate(
        &self,
        time: T,
        start: Coord<f64>,
        place: Coord<f64>,
        limits: &TimeRange<T>,
        min_walking_time: Duration,
    ) -> Result<Evaluation, ObjectiveError>;

    /// Score departure at `time`, returning `None` when infeasible.
    fn value(
        &self,
        time: T,
        start: Coord<f64>,
        place: Coord<f64>,
        limits: &TimeRange<T>,
        min_walking_time: Duration,
    ) -> Result<Option<f64>, ObjectiveError> {
        self.evaluate(time, start, place, limits, min_walking_time)
            .map(|evaluation| evaluation.value())
    }

    /// Weighting the objective routes and scores under, if any.
    fn weighting_type(&self) -> Option<WeightingType> {
        None
    }

    /// Walking time found by the most recent call.
    ///
    /// Diagnostic only: when calls run concurrently it is unspecified which
    /// call the value belongs to. Use [`Evaluation::walking_time`] instead.
    fn last_walking_time(&self) -> Option<Duration> {
        None
    }
}

impl<T: TimeAxis, F: ObjectiveFunction<T> + ?Sized> ObjectiveFunction<T> for Box<F> {
    fn evaluate(
        &self,
        time: T,
        start: Coord<f64>,
        place: Coord<f64>,
        limits: &TimeRange<T>,
        min_walking_time: Duration,
    ) -> Result<Evaluation, ObjectiveError> {
        (**self).evaluate(time, start, place, limits, min_walking_time)
    }

    fn weighting_type(&self) -> Option<WeightingType> {
        (**self).weighting_type()
    }

    fn last_walking_time(&self) -> Option<Duration> {
        (**self).last_walking_time()
    }
}
