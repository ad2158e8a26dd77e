//! Thermal exposure costs for walking paths.
//!
//! [`ExposureRoutingHelper`] prices a [`WalkPath`] walked from a departure
//! instant. Each edge is priced with the conditions in force when the walker
//! enters it, so a long walk into the afternoon picks up the afternoon heat.
//!
//! | Weighting                  | Cost per edge                                   |
//! |----------------------------|-------------------------------------------------|
//! | `shortest`                 | length in metres                                |
//! | `fastest`                  | walking time in seconds                         |
//! | `heat_index`               | heat index × seconds                            |
//! | `heat_index_weighted`      | heat index above [`CAUTION_HEAT_INDEX`] × seconds |
//! | `mean_radiant_temperature` | mean radiant temperature × seconds              |

use jiff::{SignedDuration, Timestamp};
use shadewalk_core::{
    ObjectiveError, ObjectiveFunctionPath, PathEdge, RoutingError, RoutingHelper, WalkPath,
    WeightingType,
};

use crate::weather::{ThermalModel, ThermalSample};

/// Heat index in °C from which heat stress starts to accumulate.
pub const CAUTION_HEAT_INDEX: f64 = 27.0;

/// [`RoutingHelper`] pricing paths by thermal exposure.
///
/// # Examples
/// ```
/// use std::time::Duration;
/// use geo::LineString;
/// use jiff::Timestamp;
/// use shadewalk_core::{PathEdge, RoutingHelper, WalkPath, WeightingType};
/// use shadewalk_data::exposure::ExposureRoutingHelper;
/// use shadewalk_data::weather::HourlyThermalSeries;
///
/// # fn main() -> Result<(), Box<dyn std::error::Error>> {
/// let series = HourlyThermalSeries::from_json_str(r#"{
///     "start": "2024-07-01T08:00:00Z",
///     "samples": [{"heat_index": 30.0, "mean_radiant_temperature": 45.0, "air_temperature": 27.0}]
/// }"#)?;
/// let helper = ExposureRoutingHelper::new(series);
/// let path = WalkPath::new(
///     LineString::new(Vec::new()),
///     vec![PathEdge::new(120.0, Duration::from_secs(100))],
/// );
/// let departure: Timestamp = "2024-07-01T08:15:00Z".parse()?;
///
/// assert_eq!(helper.route_cost(&path, departure, WeightingType::HeatIndex)?, 3000.0);
/// assert_eq!(helper.route_cost(&path, departure, WeightingType::HeatIndexWeighted)?, 300.0);
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Clone)]
pub struct ExposureRoutingHelper<M> {
    model: M,
}

impl<M: ThermalModel> ExposureRoutingHelper<M> {
    /// Price paths with conditions from `model`.
    #[must_use]
    pub const fn new(model: M) -> Self {
        Self { model }
    }

    /// Thermal model in use.
    #[must_use]
    pub const fn model(&self) -> &M {
        &self.model
    }

    /// Exposure of `path` walked from `departure`, or `None` when the model
    /// lacks conditions for an edge.
    #[must_use]
    pub fn exposure(
        &self,
        path: &WalkPath,
        departure: Timestamp,
        weighting: WeightingType,
    ) -> Option<f64> {
        if !weighting.is_thermal() {
            return Some(
                path.edges()
                    .iter()
                    .map(|edge| static_cost(weighting, edge))
                    .sum(),
            );
        }
        path.timed_edges()
            .map(|(offset, edge)| {
                let entered = SignedDuration::try_from(offset)
                    .ok()
                    .and_then(|offset| departure.checked_add(offset).ok())?;
                let sample = self.model.sample_at(entered)?;
                Some(thermal_cost(weighting, sample, edge))
            })
            .sum()
    }
}

fn static_cost(weighting: WeightingType, edge: &PathEdge) -> f64 {
    match weighting {
        WeightingType::Shortest => edge.length_metres,
        _ => edge.duration.as_secs_f64(),
    }
}

#[expect(
    clippy::float_arithmetic,
    reason = "exposure is a temperature-time integral"
)]
fn thermal_cost(weighting: WeightingType, sample: ThermalSample, edge: &PathEdge) -> f64 {
    let seconds = edge.duration.as_secs_f64();
    match weighting {
        WeightingType::HeatIndex => sample.heat_index * seconds,
        WeightingType::HeatIndexWeighted => {
            (sample.heat_index - CAUTION_HEAT_INDEX).max(0.0) * seconds
        }
        WeightingType::MeanRadiantTemperature => sample.mean_radiant_temperature * seconds,
        WeightingType::Shortest | WeightingType::Fastest => static_cost(weighting, edge),
    }
}

impl<M: ThermalModel> RoutingHelper<Timestamp> for ExposureRoutingHelper<M> {
    fn route_cost(
        &self,
        path: &WalkPath,
        time: Timestamp,
        weighting: WeightingType,
    ) -> Result<f64, RoutingError> {
        self.exposure(path, time, weighting)
            .ok_or_else(|| RoutingError::MalformedData {
                message: format!("no thermal conditions for a walk leaving at {time}"),
            })
    }
}

/// Path objective reporting missing thermal data as infeasible instead of as
/// a fault.
impl<M: ThermalModel> ObjectiveFunctionPath<Timestamp> for ExposureRoutingHelper<M> {
    fn value(
        &self,
        time: Timestamp,
        path: &WalkPath,
        weighting: WeightingType,
    ) -> Result<Option<f64>, ObjectiveError> {
        let exposure = self.exposure(path, time, weighting);
        if exposure.is_none() {
            log::debug!("no thermal conditions for {weighting} at {time}");
        }
        Ok(exposure)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use geo::LineString;
    use rstest::{fixture, rstest};
    use std::time::Duration;

    /// Model with a fixed sample per UTC hour of day and no data after noon.
    struct Morning;

    impl ThermalModel for Morning {
        #[expect(clippy::float_arithmetic, reason = "hourly test temperatures")]
        fn sample_at(&self, at: Timestamp) -> Option<ThermalSample> {
            let hour = at.to_zoned(jiff::tz::TimeZone::UTC).hour();
            (hour < 12).then(|| ThermalSample {
                heat_index: f64::from(hour) * 3.0,
                mean_radiant_temperature: 40.0,
                air_temperature: 20.0,
            })
        }
    }

    fn at(raw: &str) -> Timestamp {
        raw.parse().expect("valid timestamp")
    }

    #[fixture]
    fn two_edges() -> WalkPath {
        WalkPath::new(
            LineString::new(Vec::new()),
            vec![
                PathEdge::new(300.0, Duration::from_secs(1_800)),
                PathEdge::new(200.0, Duration::from_secs(1_200)),
            ],
        )
    }

    #[rstest]
    #[case(WeightingType::Shortest, 500.0)]
    #[case(WeightingType::Fastest, 3_000.0)]
    // 1800 s at 08:xx (24) + 1200 s at 09:xx (27)
    #[case(WeightingType::HeatIndex, 75_600.0)]
    #[case(WeightingType::HeatIndexWeighted, 0.0)]
    #[case(WeightingType::MeanRadiantTemperature, 120_000.0)]
    #[expect(clippy::float_arithmetic, reason = "tolerance comparison")]
    fn prices_each_edge_at_entry_time(
        two_edges: WalkPath,
        #[case] weighting: WeightingType,
        #[case] expected: f64,
    ) {
        let helper = ExposureRoutingHelper::new(Morning);
        let cost = helper
            .route_cost(&two_edges, at("2024-07-01T08:40:00Z"), weighting)
            .expect("data available");
        assert!((cost - expected).abs() < 1e-6, "{weighting}: {cost}");
    }

    #[rstest]
    #[expect(clippy::float_arithmetic, reason = "tolerance comparison")]
    fn weighted_heat_index_only_counts_excess(two_edges: WalkPath) {
        let helper = ExposureRoutingHelper::new(Morning);
        // 1800 s from 10:40 (30 - 27) + 1200 s from 11:10 (33 - 27)
        let cost = helper
            .route_cost(&two_edges, at("2024-07-01T10:40:00Z"), WeightingType::HeatIndexWeighted)
            .expect("data available");
        assert!((cost - 12_600.0).abs() < 1e-6);
    }

    #[rstest]
    fn missing_conditions_are_a_fault_for_route_cost(two_edges: WalkPath) {
        let helper = ExposureRoutingHelper::new(Morning);
        let err = helper
            .route_cost(&two_edges, at("2024-07-01T11:50:00Z"), WeightingType::HeatIndex)
            .expect_err("afternoon has no data");
        assert!(matches!(err, RoutingError::MalformedData { .. }));
    }

    #[rstest]
    fn missing_conditions_are_absent_for_the_path_objective(two_edges: WalkPath) {
        let helper = ExposureRoutingHelper::new(Morning);
        let value = helper
            .value(at("2024-07-01T13:00:00Z"), &two_edges, WeightingType::HeatIndex)
            .expect("no fault");
        assert_eq!(value, None);
    }

    #[rstest]
    fn static_weightings_ignore_missing_conditions(two_edges: WalkPath) {
        let helper = ExposureRoutingHelper::new(Morning);
        let value = helper
            .value(at("2024-07-01T13:00:00Z"), &two_edges, WeightingType::Shortest)
            .expect("no fault");
        assert_eq!(value, Some(500.0));
    }
}
