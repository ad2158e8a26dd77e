use thiserror::Error;

use crate::{RoutingError, WeightingType};

/// Faults raised while building or evaluating an objective function.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ObjectiveError {
    /// A weighting is required but none was configured.
    #[error("objective function requires a weighting type")]
    MissingWeighting,
    /// The caller asked to score under a different weighting than configured.
    #[error("objective configured for {configured} was asked to score {requested}")]
    WeightingMismatch {
        /// Weighting fixed at construction.
        configured: WeightingType,
        /// Weighting passed by the caller.
        requested: WeightingType,
    },
    /// A routing collaborator failed.
    #[error(transparent)]
    Routing(#[from] RoutingError),
}

impl ObjectiveError {
    /// Return `true` for caller or configuration mistakes, as opposed to
    /// collaborator failures.
    #[must_use]
    pub const fn is_configuration_fault(&self) -> bool {
        matches!(self, Self::MissingWeighting | Self::WeightingMismatch { .. })
    }
}
