//! Search a time window for the best departure.
//!
//! [`OptimalTimeFinder`] samples the window at a fixed step (always
//! including both bounds), scores every sample with an
//! [`ObjectiveFunction`], drops infeasible samples and keeps the extremal
//! feasible one. Ties go to the earliest time, whichever way the samples
//! were scheduled.

mod cancel;
mod candidates;
mod options;
mod report;

use std::time::{Duration, Instant};

use geo::Coord;
use rayon::prelude::*;

pub use cancel::CancellationToken;
pub use candidates::CandidateTimes;
pub use options::{Direction, Execution, SearchOptions};
pub use report::{OptimalTime, SearchDiagnostics, SearchReport};

use crate::{Evaluation, FinderError, ObjectiveFunction, TimeAxis, TimeRange};

/// Departure-time search over a fixed window, route and objective.
///
/// # Examples
/// ```
/// use jiff::{SignedDuration, Timestamp};
/// use geo::Coord;
/// use shadewalk_core::test_support::ScriptedObjective;
/// use shadewalk_core::{OptimalTimeFinder, TimeRange};
///
/// # fn main() -> Result<(), Box<dyn std::error::Error>> {
/// let eight: Timestamp = "2024-07-01T08:00:00Z".parse()?;
/// let at = |mins| eight.checked_add(SignedDuration::from_mins(mins));
/// let objective = ScriptedObjective::from_values([
///     (at(0)?, Some(4.2)),
///     (at(15)?, Some(3.9)),
///     (at(30)?, Some(4.5)),
///     (at(45)?, Some(3.9)),
///     (at(60)?, Some(5.0)),
/// ]);
/// let finder = OptimalTimeFinder::new(
///     TimeRange::new(at(0)?, at(60)?)?,
///     SignedDuration::from_mins(15),
///     Coord { x: 7.58, y: 47.56 },
///     Coord { x: 7.59, y: 47.55 },
///     objective,
/// )?;
///
/// let best = finder.find_optimal_time()?.expect("a feasible departure");
/// assert_eq!(best.time, at(15)?);
/// assert_eq!(best.value, 3.9);
/// # Ok(())
/// # }
/// ```
#[derive(Debug)]
pub struct OptimalTimeFinder<T: TimeAxis, F> {
    limits: TimeRange<T>,
    step: T::Step,
    start: Coord<f64>,
    place: Coord<f64>,
    objective: F,
    options: SearchOptions,
    cancellation: CancellationToken,
}

impl<T, F> OptimalTimeFinder<T, F>
where
    T: TimeAxis,
    F: ObjectiveFunction<T>,
{
    /// Construct a finder with default [`SearchOptions`].
    ///
    /// # Errors
    ///
    /// Returns [`FinderError::NonPositiveStep`] when `step` does not move
    /// forward in time.
    pub fn new(
        limits: TimeRange<T>,
        step: T::Step,
        start: Coord<f64>,
        place: Coord<f64>,
        objective: F,
    ) -> Result<Self, FinderError> {
        if !T::is_positive_step(step) {
            return Err(FinderError::NonPositiveStep {
                step: step.to_string(),
            });
        }
        Ok(Self {
            limits,
            step,
            start,
            place,
            objective,
            options: SearchOptions::default(),
            cancellation: CancellationToken::new(),
        })
    }

    /// Replace the search options.
    #[must_use]
    pub fn with_options(mut self, options: SearchOptions) -> Self {
        self.options = options;
        self
    }

    /// Set the optimisation direction.
    #[must_use]
    pub fn with_direction(mut self, direction: Direction) -> Self {
        self.options.direction = direction;
        self
    }

    /// Set the minimum walking time a feasible walk must reach.
    #[must_use]
    pub fn with_min_walking_time(mut self, min_walking_time: Duration) -> Self {
        self.options.min_walking_time = min_walking_time;
        self
    }

    /// Set how candidates are scheduled.
    #[must_use]
    pub fn with_execution(mut self, execution: Execution) -> Self {
        self.options.execution = execution;
        self
    }

    /// Share `token` so the caller can stop searches from another thread.
    #[must_use]
    pub fn with_cancellation(mut self, token: CancellationToken) -> Self {
        self.cancellation = token;
        self
    }

    /// Search window.
    #[must_use]
    pub const fn limits(&self) -> &TimeRange<T> {
        &self.limits
    }

    /// Sampling step.
    #[must_use]
    pub const fn step(&self) -> T::Step {
        self.step
    }

    /// Optimisation direction.
    #[must_use]
    pub const fn direction(&self) -> Direction {
        self.options.direction
    }

    /// Active search options.
    #[must_use]
    pub const fn options(&self) -> &SearchOptions {
        &self.options
    }

    /// Objective scoring each candidate.
    #[must_use]
    pub const fn objective(&self) -> &F {
        &self.objective
    }

    /// Return the best feasible departure, or `None` if no sampled time is
    /// feasible.
    ///
    /// # Errors
    ///
    /// Returns a [`FinderError`] when the objective reports a configuration
    /// or collaborator fault. The remaining candidates are not evaluated.
    pub fn find_optimal_time(&self) -> Result<Option<OptimalTime<T>>, FinderError> {
        self.search().map(|report| report.best)
    }

    /// Run the search and return the best candidate with diagnostics.
    ///
    /// A cancelled search returns the best candidate among those evaluated
    /// before cancellation.
    ///
    /// # Errors
    ///
    /// As [`find_optimal_time`](Self::find_optimal_time).
    pub fn search(&self) -> Result<SearchReport<T>, FinderError> {
        let started_at = Instant::now();
        let deadline = self
            .options
            .time_limit
            .and_then(|limit| started_at.checked_add(limit));
        let times: Vec<T> = CandidateTimes::new(&self.limits, self.step).collect();
        log::debug!(
            "searching {} candidates in {} every {} ({}, {:?})",
            times.len(),
            self.limits,
            self.step,
            self.options.direction,
            self.options.execution,
        );

        let evaluated = match self.options.execution {
            Execution::Sequential => self.evaluate_sequential(&times, deadline)?,
            Execution::Parallel => self.evaluate_parallel(&times, deadline)?,
        };

        let mut diagnostics = SearchDiagnostics {
            candidates_generated: times.len(),
            candidates_evaluated: evaluated.len(),
            cancelled: evaluated.len() < times.len(),
            ..SearchDiagnostics::default()
        };
        let mut best: Option<OptimalTime<T>> = None;
        for (time, evaluation) in evaluated {
            let Some(candidate) = feasible_candidate(time, &evaluation) else {
                continue;
            };
            diagnostics.candidates_feasible += 1;
            if best
                .as_ref()
                .is_none_or(|incumbent| candidate.beats(incumbent, self.options.direction))
            {
                best = Some(candidate);
            }
        }
        diagnostics.search_time = started_at.elapsed();

        if diagnostics.cancelled {
            log::warn!(
                "search in {} stopped after {} of {} candidates",
                self.limits,
                diagnostics.candidates_evaluated,
                diagnostics.candidates_generated,
            );
        }
        match &best {
            Some(found) => log::info!(
                "best departure {} with value {} ({} of {} candidates feasible)",
                found.time,
                found.value,
                diagnostics.candidates_feasible,
                diagnostics.candidates_evaluated,
            ),
            None => log::info!("no feasible departure in {}", self.limits),
        }
        Ok(SearchReport { best, diagnostics })
    }

    fn should_stop(&self, deadline: Option<Instant>) -> bool {
        self.cancellation.is_cancelled() || deadline.is_some_and(|at| Instant::now() >= at)
    }

    fn evaluate_at(&self, time: T) -> Result<Evaluation, FinderError> {
        let evaluation = self.objective.evaluate(
            time,
            self.start,
            self.place,
            &self.limits,
            self.options.min_walking_time,
        )?;
        log::debug!("candidate {time}: {:?}", evaluation.outcome);
        Ok(evaluation)
    }

    fn evaluate_sequential(
        &self,
        times: &[T],
        deadline: Option<Instant>,
    ) -> Result<Vec<(T, Evaluation)>, FinderError> {
        let mut evaluated = Vec::with_capacity(times.len());
        for &time in times {
            if self.should_stop(deadline) {
                break;
            }
            evaluated.push((time, self.evaluate_at(time)?));
        }
        Ok(evaluated)
    }

    /// Fan candidates out over rayon, then restore time order so the
    /// reduction never depends on completion order.
    fn evaluate_parallel(
        &self,
        times: &[T],
        deadline: Option<Instant>,
    ) -> Result<Vec<(T, Evaluation)>, FinderError> {
        let results = times
            .par_iter()
            .map(|&time| {
                if self.should_stop(deadline) {
                    return Ok(None);
                }
                self.evaluate_at(time).map(|evaluation| Some((time, evaluation)))
            })
            .collect::<Result<Vec<_>, FinderError>>()?;
        Ok(results.into_iter().flatten().collect())
    }
}

/// Keep only present, finite values.
fn feasible_candidate<T: TimeAxis>(time: T, evaluation: &Evaluation) -> Option<OptimalTime<T>> {
    let value = evaluation.value()?;
    if !value.is_finite() {
        log::warn!("discarding non-finite objective value {value} at {time}");
        return None;
    }
    Some(OptimalTime {
        time,
        value,
        walking_time: evaluation.walking_time,
    })
}
