//! Search results and diagnostics.

use std::cmp::Ordering;
use std::time::Duration;

use crate::{Direction, TimeAxis};

/// The best feasible departure found by a search.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct OptimalTime<T> {
    /// Departure time.
    pub time: T,
    /// Objective value at that time.
    pub value: f64,
    /// Walking time of the path behind the value.
    pub walking_time: Option<Duration>,
}

impl<T: TimeAxis> OptimalTime<T> {
    /// Return `true` when `self` should replace `incumbent` under
    /// `direction`.
    ///
    /// Values are compared numerically, so `-0.0` and `0.0` tie; equal
    /// values keep the earlier time. Candidates hold finite values only.
    #[must_use]
    pub fn beats(&self, incumbent: &Self, direction: Direction) -> bool {
        let by_value = match direction {
            Direction::Minimize => self.value.partial_cmp(&incumbent.value),
            Direction::Maximize => incumbent.value.partial_cmp(&self.value),
        }
        .unwrap_or(Ordering::Equal);
        by_value.then_with(|| self.time.cmp(&incumbent.time)).is_lt()
    }
}

/// Counters describing one search.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct SearchDiagnostics {
    /// Candidate times sampled from the window.
    pub candidates_generated: usize,
    /// Candidates actually evaluated.
    pub candidates_evaluated: usize,
    /// Evaluated candidates with a present value.
    pub candidates_feasible: usize,
    /// The search stopped early on cancellation or time limit.
    pub cancelled: bool,
    /// Wall-clock time spent searching.
    pub search_time: Duration,
}

/// Best candidate together with search diagnostics.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct SearchReport<T> {
    /// Best candidate, or `None` when nothing evaluated was feasible.
    pub best: Option<OptimalTime<T>>,
    /// Search counters.
    pub diagnostics: SearchDiagnostics,
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    const fn candidate(time: i64, value: f64) -> OptimalTime<i64> {
        OptimalTime {
            time,
            value,
            walking_time: None,
        }
    }

    #[rstest]
    #[case(Direction::Minimize, 3.0, 5.0, true)]
    #[case(Direction::Minimize, 5.0, 3.0, false)]
    #[case(Direction::Maximize, 5.0, 3.0, true)]
    #[case(Direction::Maximize, 3.0, 5.0, false)]
    fn compares_by_direction(
        #[case] direction: Direction,
        #[case] challenger: f64,
        #[case] incumbent: f64,
        #[case] expected: bool,
    ) {
        assert_eq!(
            candidate(10, challenger).beats(&candidate(20, incumbent), direction),
            expected
        );
    }

    #[rstest]
    #[case(Direction::Minimize)]
    #[case(Direction::Maximize)]
    fn ties_go_to_the_earlier_time(#[case] direction: Direction) {
        assert!(candidate(10, 3.9).beats(&candidate(20, 3.9), direction));
        assert!(!candidate(20, 3.9).beats(&candidate(10, 3.9), direction));
    }

    #[rstest]
    #[case(Direction::Minimize)]
    #[case(Direction::Maximize)]
    fn signed_zeros_tie(#[case] direction: Direction) {
        assert!(!candidate(20, -0.0).beats(&candidate(10, 0.0), direction));
        assert!(candidate(10, 0.0).beats(&candidate(20, -0.0), direction));
    }
}
