//! Faults that abort a departure search.

use thiserror::Error;

use crate::{ObjectiveError, TimeRangeError};

/// Errors returned by [`OptimalTimeFinder`](crate::OptimalTimeFinder).
///
/// An infeasible window is not an error: it is reported as an empty result.
/// Every variant here means the search is misconfigured or a collaborator
/// failed, and no candidate from the aborted search should be trusted.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FinderError {
    /// The search window is malformed.
    #[error(transparent)]
    InvalidRange(#[from] TimeRangeError),
    /// The sampling step does not move forward in time.
    #[error("sampling step must be positive, got {step}")]
    NonPositiveStep {
        /// Rendered step.
        step: String,
    },
    /// The objective function failed.
    #[error("objective evaluation failed: {0}")]
    Objective(#[from] ObjectiveError),
}

impl FinderError {
    /// Return `true` for caller or configuration mistakes.
    #[must_use]
    pub const fn is_configuration_fault(&self) -> bool {
        match self {
            Self::InvalidRange(_) | Self::NonPositiveStep { .. } => true,
            Self::Objective(err) => err.is_configuration_fault(),
        }
    }

    /// Return `true` when a routing collaborator failed.
    #[must_use]
    pub const fn is_collaborator_fault(&self) -> bool {
        matches!(self, Self::Objective(ObjectiveError::Routing(_)))
    }
}
