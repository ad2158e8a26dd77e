//! Candidate departure times sampled from a window.

use crate::{TimeAxis, TimeRange};

/// Iterator over `lower, lower + step, ...` that always ends on `upper`.
///
/// When the step does not divide the window, `upper` is emitted as an extra
/// final candidate. No instant is emitted twice, so a degenerate window
/// yields exactly one candidate.
#[derive(Debug, Clone)]
pub struct CandidateTimes<T: TimeAxis> {
    next: Option<T>,
    upper: T,
    step: T::Step,
}

impl<T: TimeAxis> CandidateTimes<T> {
    /// Sample `limits` every `step`.
    ///
    /// A non-positive step yields only the window bounds; the finder rejects
    /// such steps before sampling.
    #[must_use]
    pub const fn new(limits: &TimeRange<T>, step: T::Step) -> Self {
        Self {
            next: Some(*limits.lower()),
            upper: *limits.upper(),
            step,
        }
    }
}

impl<T: TimeAxis> Iterator for CandidateTimes<T> {
    type Item = T;

    fn next(&mut self) -> Option<T> {
        let current = self.next.take()?;
        self.next = match current.checked_advance(self.step) {
            Some(advanced) if advanced > current && advanced < self.upper => Some(advanced),
            _ if current < self.upper => Some(self.upper),
            _ => None,
        };
        Some(current)
    }
}
