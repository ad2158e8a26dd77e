//! Results of scoring a single departure time.

use std::time::Duration;

/// Why a departure time could not be scored.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize),
    serde(tag = "reason", rename_all = "snake_case")
)]
pub enum Infeasibility {
    /// The time lies outside the search limits.
    OutsideLimits,
    /// The path finder found no path.
    NoPath,
    /// The walk is shorter than the required minimum.
    BelowMinimumWalkingTime {
        /// Walking time of the path that was found.
        found: Duration,
        /// Required minimum.
        minimum: Duration,
    },
    /// The cost model has no usable value for this time.
    NoData,
}

/// Present score or the reason it is absent.
///
/// An absent score is an expected outcome of the search and is never
/// conflated with a zero cost.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Outcome {
    /// The time can be scored.
    Feasible(f64),
    /// The time cannot be scored.
    Infeasible(Infeasibility),
}

impl Outcome {
    /// Return the score, if present.
    #[must_use]
    pub const fn value(&self) -> Option<f64> {
        match self {
            Self::Feasible(value) => Some(*value),
            Self::Infeasible(_) => None,
        }
    }

    /// Return `true` when a score is present.
    #[must_use]
    pub const fn is_feasible(&self) -> bool {
        matches!(self, Self::Feasible(_))
    }
}

/// Outcome of one objective call together with the walking time it found.
///
/// Carrying the walking time per call keeps concurrent searches free of the
/// shared "last walking time" state.
///
/// # Examples
/// ```
/// use std::time::Duration;
/// use shadewalk_core::{Evaluation, Infeasibility};
///
/// let scored = Evaluation::feasible(3.9, Duration::from_secs(900));
/// assert_eq!(scored.value(), Some(3.9));
///
/// let rejected = Evaluation::infeasible(Infeasibility::NoPath, None);
/// assert_eq!(rejected.value(), None);
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Evaluation {
    /// Score or reason for its absence.
    pub outcome: Outcome,
    /// Walking time of the path found, if any.
    pub walking_time: Option<Duration>,
}

impl Evaluation {
    /// A scored evaluation.
    #[must_use]
    pub const fn feasible(value: f64, walking_time: Duration) -> Self {
        Self {
            outcome: Outcome::Feasible(value),
            walking_time: Some(walking_time),
        }
    }

    /// An evaluation that produced no score.
    #[must_use]
    pub const fn infeasible(reason: Infeasibility, walking_time: Option<Duration>) -> Self {
        Self {
            outcome: Outcome::Infeasible(reason),
            walking_time,
        }
    }

    /// Return the score, if present.
    #[must_use]
    pub const fn value(&self) -> Option<f64> {
        self.outcome.value()
    }
}
