//! Time types the departure search can step along.
//!
//! [`TimeRange`](crate::TimeRange) only needs a total order. Sampling a range
//! additionally needs a step type, a way to advance by one step and a way to
//! measure the span between two instants; [`TimeAxis`] provides those.

use std::fmt;

use jiff::{SignedDuration, Timestamp, civil::DateTime};

/// A totally ordered time type that can be advanced by a fixed step.
///
/// Implementations must be monotonic: advancing by a positive step always
/// yields a strictly later instant, or `None` when the result is not
/// representable.
///
/// # Examples
/// ```
/// use jiff::{SignedDuration, Timestamp};
/// use shadewalk_core::TimeAxis;
///
/// let start: Timestamp = "2024-07-01T08:00:00Z".parse().unwrap();
/// let next = start.checked_advance(SignedDuration::from_mins(15)).unwrap();
/// assert_eq!(next.span_since(start), SignedDuration::from_mins(15));
/// ```
pub trait TimeAxis: Copy + Ord + fmt::Debug + fmt::Display + Send + Sync {
    /// Distance between two instants on this axis.
    type Step: Copy + PartialEq + fmt::Debug + fmt::Display + Send + Sync;

    /// Return `true` when `step` moves strictly forward in time.
    fn is_positive_step(step: Self::Step) -> bool;

    /// Advance by `step`, returning `None` on overflow.
    fn checked_advance(self, step: Self::Step) -> Option<Self>;

    /// Span from `earlier` to `self`.
    fn span_since(self, earlier: Self) -> Self::Step;
}

impl TimeAxis for Timestamp {
    type Step = SignedDuration;

    fn is_positive_step(step: Self::Step) -> bool {
        step.is_positive()
    }

    fn checked_advance(self, step: Self::Step) -> Option<Self> {
        self.checked_add(step).ok()
    }

    fn span_since(self, earlier: Self) -> Self::Step {
        self.duration_since(earlier)
    }
}

impl TimeAxis for DateTime {
    type Step = SignedDuration;

    fn is_positive_step(step: Self::Step) -> bool {
        step.is_positive()
    }

    fn checked_advance(self, step: Self::Step) -> Option<Self> {
        self.checked_add(step).ok()
    }

    fn span_since(self, earlier: Self) -> Self::Step {
        self.duration_since(earlier)
    }
}

/// Abstract integer ticks, e.g. minutes since midnight.
impl TimeAxis for i64 {
    type Step = Self;

    fn is_positive_step(step: Self::Step) -> bool {
        step > 0
    }

    fn checked_advance(self, step: Self::Step) -> Option<Self> {
        self.checked_add(step)
    }

    fn span_since(self, earlier: Self) -> Self::Step {
        self.saturating_sub(earlier)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case(SignedDuration::from_mins(1), true)]
    #[case(SignedDuration::ZERO, false)]
    #[case(SignedDuration::from_mins(-1), false)]
    fn timestamp_step_positivity(#[case] step: SignedDuration, #[case] expected: bool) {
        assert_eq!(Timestamp::is_positive_step(step), expected);
    }

    #[rstest]
    fn timestamp_advance_reports_overflow() {
        assert!(Timestamp::MAX.checked_advance(SignedDuration::from_secs(1)).is_none());
    }

    #[rstest]
    fn civil_datetime_advances_by_step() {
        let start = jiff::civil::date(2024, 7, 1).at(8, 0, 0, 0);
        let next = start
            .checked_advance(SignedDuration::from_mins(45))
            .expect("advance within range");
        assert_eq!(next, jiff::civil::date(2024, 7, 1).at(8, 45, 0, 0));
    }

    #[rstest]
    fn ticks_advance_and_measure() {
        assert_eq!(10_i64.checked_advance(5), Some(15));
        assert_eq!(i64::MAX.checked_advance(1), None);
        assert_eq!(15_i64.span_since(10), 5);
    }
}
