//! Closed intervals over a totally ordered time type.

use std::fmt;

use thiserror::Error;

use crate::TimeAxis;

/// Errors returned by [`TimeRange::new`].
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TimeRangeError {
    /// The lower bound lies after the upper bound.
    #[error("time range lower bound {lower} is after upper bound {upper}")]
    Inverted {
        /// Rendered lower bound.
        lower: String,
        /// Rendered upper bound.
        upper: String,
    },
}

/// An immutable closed interval `[lower, upper]`.
///
/// Both ends are inclusive. A range whose bounds coincide is a single
/// instant and is still a valid, non-empty range.
///
/// # Examples
/// ```
/// use shadewalk_core::TimeRange;
///
/// # fn main() -> Result<(), shadewalk_core::TimeRangeError> {
/// let window = TimeRange::new(480_i64, 540)?;
/// assert!(window.contains(&480));
/// assert!(window.contains(&540));
/// assert_eq!(window.clamp(600), 540);
/// assert_eq!(window.duration(), 60);
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct TimeRange<T> {
    lower: T,
    upper: T,
}

impl<T: Ord + fmt::Debug> TimeRange<T> {
    /// Validate and construct a range.
    ///
    /// # Errors
    ///
    /// Returns [`TimeRangeError::Inverted`] when `lower > upper`.
    pub fn new(lower: T, upper: T) -> Result<Self, TimeRangeError> {
        if lower > upper {
            return Err(TimeRangeError::Inverted {
                lower: format!("{lower:?}"),
                upper: format!("{upper:?}"),
            });
        }
        Ok(Self { lower, upper })
    }

    /// A range covering exactly one instant.
    #[must_use]
    pub fn instant(at: T) -> Self
    where
        T: Clone,
    {
        Self {
            lower: at.clone(),
            upper: at,
        }
    }

    /// Inclusive lower bound.
    #[must_use]
    pub const fn lower(&self) -> &T {
        &self.lower
    }

    /// Inclusive upper bound.
    #[must_use]
    pub const fn upper(&self) -> &T {
        &self.upper
    }

    /// Return `true` when `lower <= time <= upper`.
    #[must_use]
    pub fn contains(&self, time: &T) -> bool {
        self.lower <= *time && *time <= self.upper
    }

    /// Pull `time` into the range.
    #[must_use]
    pub fn clamp(&self, time: T) -> T
    where
        T: Clone,
    {
        if time < self.lower {
            self.lower.clone()
        } else if time > self.upper {
            self.upper.clone()
        } else {
            time
        }
    }
}

impl<T: TimeAxis> TimeRange<T> {
    /// Span between the bounds.
    #[must_use]
    pub fn duration(&self) -> T::Step {
        self.upper.span_since(self.lower)
    }
}

impl<T: fmt::Display> fmt::Display for TimeRange<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}, {}]", self.lower, self.upper)
    }
}
