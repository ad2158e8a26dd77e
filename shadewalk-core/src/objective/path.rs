//! Path-level objectives: score an already computed path at a time.

use crate::{ObjectiveError, RoutingHelper, WalkPath, WeightingType};

/// Score an existing path when walked from `time`.
///
/// Implementations must not mutate the path and should return `Ok(None)`
/// when the combination cannot be scored, e.g. when a thermal model has no
/// data for the time. `Err` is reserved for configuration and collaborator
/// faults.
///
/// # Examples
///
/// ```rust
/// use std::time::Duration;
/// use geo::LineString;
/// use shadewalk_core::{ObjectiveError, ObjectiveFunctionPath, PathEdge, WalkPath, WeightingType};
///
/// /// Only daytime departures can be scored.
/// struct Daylight;
///
/// impl ObjectiveFunctionPath<i64> for Daylight {
///     fn value(
///         &self,
///         time: i64,
///         path: &WalkPath,
///         _weighting: WeightingType,
///     ) -> Result<Option<f64>, ObjectiveError> {
///         Ok((360..=1200).contains(&time).then(|| path.distance_metres()))
///     }
/// }
///
/// let path = WalkPath::new(
///     LineString::new(Vec::new()),
///     vec![PathEdge::new(120.0, Duration::from_secs(90))],
/// );
/// assert_eq!(Daylight.value(480, &path, WeightingType::Shortest)?, Some(120.0));
/// assert_eq!(Daylight.value(60, &path, WeightingType::Shortest)?, None);
/// # Ok::<(), ObjectiveError>(())
/// ```
pub trait ObjectiveFunctionPath<T>: Send + Sync {
    /// Return the score of `path` at `time`, or `None` if it cannot be scored.
    fn value(
        &self,
        time: T,
        path: &WalkPath,
        weighting: WeightingType,
    ) -> Result<Option<f64>, ObjectiveError>;
}

/// Default [`ObjectiveFunctionPath`]: the route cost reported by a
/// [`RoutingHelper`] under a weighting fixed at construction.
///
/// The weighting passed to [`value`](ObjectiveFunctionPath::value) is only
/// checked against the configured one. This objective never filters for
/// feasibility; a successful helper call is always a present score.
#[derive(Debug, Clone)]
pub struct RouteCostObjective<H> {
    helper: H,
    weighting: WeightingType,
}

impl<H> RouteCostObjective<H> {
    /// Construct an objective pricing paths with `helper` under `weighting`.
    #[must_use]
    pub const fn new(helper: H, weighting: WeightingType) -> Self {
        Self { helper, weighting }
    }

    /// Weighting used for every route-cost call.
    #[must_use]
    pub const fn weighting(&self) -> WeightingType {
        self.weighting
    }
}

impl<T, H: RoutingHelper<T>> ObjectiveFunctionPath<T> for RouteCostObjective<H> {
    fn value(
        &self,
        time: T,
        path: &WalkPath,
        weighting: WeightingType,
    ) -> Result<Option<f64>, ObjectiveError> {
        if weighting != self.weighting {
            return Err(ObjectiveError::WeightingMismatch {
                configured: self.weighting,
                requested: weighting,
            });
        }
        let cost = self.helper.route_cost(path, time, self.weighting)?;
        Ok(Some(cost))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::RoutingError;
    use crate::test_support::{LengthRoutingHelper, straight_path};
    use rstest::rstest;
    use std::time::Duration;

    struct FailingHelper;

    impl RoutingHelper<i64> for FailingHelper {
        fn route_cost(
            &self,
            _path: &WalkPath,
            _time: i64,
            _weighting: WeightingType,
        ) -> Result<f64, RoutingError> {
            Err(RoutingError::MalformedData {
                message: "edge without geometry".into(),
            })
        }
    }

    #[rstest]
    fn delegates_to_route_cost() {
        let objective = RouteCostObjective::new(LengthRoutingHelper, WeightingType::Shortest);
        let path = straight_path(250.0, Duration::from_secs(180));
        let value = objective
            .value(0_i64, &path, WeightingType::Shortest)
            .expect("helper succeeds");
        assert_eq!(value, Some(250.0));
    }

    #[rstest]
    fn rejects_a_different_weighting() {
        let objective = RouteCostObjective::new(LengthRoutingHelper, WeightingType::HeatIndex);
        let path = straight_path(250.0, Duration::from_secs(180));
        let err = objective
            .value(0_i64, &path, WeightingType::Fastest)
            .expect_err("mismatched weighting");
        assert_eq!(
            err,
            ObjectiveError::WeightingMismatch {
                configured: WeightingType::HeatIndex,
                requested: WeightingType::Fastest,
            }
        );
        assert!(err.is_configuration_fault());
    }

    #[rstest]
    fn helper_faults_propagate() {
        let objective = RouteCostObjective::new(FailingHelper, WeightingType::Shortest);
        let path = straight_path(10.0, Duration::from_secs(8));
        let err = objective
            .value(0, &path, WeightingType::Shortest)
            .expect_err("helper fails");
        assert!(matches!(err, ObjectiveError::Routing(_)));
        assert!(!err.is_configuration_fault());
    }
}
