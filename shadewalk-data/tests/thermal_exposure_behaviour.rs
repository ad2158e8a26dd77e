#![expect(
    clippy::expect_used,
    reason = "behaviour tests use expect for readable failures"
)]

//! Behavioural tests for thermal exposure pricing using rstest-bdd.
//!
//! These scenarios run the full search with an in-memory path finder, so no
//! routing service is needed.

use std::cell::RefCell;
use std::time::Duration;

use geo::Coord;
use jiff::{SignedDuration, Timestamp};
use rstest::fixture;
use rstest_bdd_macros::{given, scenario, then, when};
use shadewalk_core::test_support::FixedPathFinder;
use shadewalk_core::{
    ObjectiveFunction, OptimalTimeFinder, RouteCostObjective, RoutedObjectiveFunction, TimeRange,
    WeightingType,
};
use shadewalk_data::exposure::ExposureRoutingHelper;
use shadewalk_data::weather::{HourlyThermalSeries, ThermalSample};

const HERE: Coord<f64> = Coord { x: 7.588, y: 47.559 };
const THERE: Coord<f64> = Coord { x: 7.596, y: 47.547 };

fn clock(hh_mm: &str) -> Timestamp {
    format!("2024-07-01T{hh_mm}:00Z")
        .parse()
        .expect("valid wall-clock time")
}

/// World state shared by the exposure scenarios.
#[derive(Default)]
struct ExposureWorld {
    series: RefCell<Option<HourlyThermalSeries>>,
    walk: RefCell<Option<FixedPathFinder>>,
    best: RefCell<Option<Timestamp>>,
    exposure: RefCell<Option<f64>>,
}

impl ExposureWorld {
    fn objective(
        &self,
        weighting: WeightingType,
    ) -> RoutedObjectiveFunction<FixedPathFinder, RouteCostObjective<ExposureRoutingHelper<HourlyThermalSeries>>>
    {
        let series = self.series.borrow().clone().expect("series should be set");
        let walk = self.walk.borrow().expect("walk should be set");
        RoutedObjectiveFunction::new(
            walk,
            RouteCostObjective::new(ExposureRoutingHelper::new(series), weighting),
            Some(weighting),
        )
        .expect("weighting configured")
    }
}

#[fixture]
fn world() -> ExposureWorld {
    ExposureWorld::default()
}

#[given("an hourly heat index series of {values} starting at {start}")]
fn given_series(world: &ExposureWorld, values: String, start: String) {
    let samples = values
        .split(',')
        .map(|value| {
            let heat_index: f64 = value.trim().parse().expect("numeric heat index");
            ThermalSample {
                heat_index,
                mean_radiant_temperature: heat_index,
                air_temperature: heat_index,
            }
        })
        .collect();
    let series = HourlyThermalSeries::new(clock(&start), samples).expect("valid series");
    world.series.replace(Some(series));
}

#[given("a {minutes} minute walk of {metres} metres")]
fn given_walk(world: &ExposureWorld, minutes: u64, metres: f64) {
    world.walk.replace(Some(FixedPathFinder::new(
        metres,
        Duration::from_secs(minutes * 60),
    )));
}

#[when("I search departures from {lower} to {upper} every {step} minutes by {weighting}")]
fn when_search(world: &ExposureWorld, lower: String, upper: String, step: i64, weighting: String) {
    let weighting: WeightingType = weighting.parse().expect("known weighting");
    let limits = TimeRange::new(clock(&lower), clock(&upper)).expect("ordered bounds");
    let best = OptimalTimeFinder::new(
        limits,
        SignedDuration::from_mins(step),
        HERE,
        THERE,
        world.objective(weighting),
    )
    .expect("positive step")
    .with_min_walking_time(Duration::from_secs(10 * 60))
    .find_optimal_time()
    .expect("no fault")
    .expect("a feasible departure");
    world.best.replace(Some(best.time));
}

#[when("I price a departure at {at} by {weighting}")]
fn when_price(world: &ExposureWorld, at: String, weighting: String) {
    let weighting: WeightingType = weighting.parse().expect("known weighting");
    let departure = clock(&at);
    let limits = TimeRange::instant(departure);
    let value = world
        .objective(weighting)
        .value(departure, HERE, THERE, &limits, Duration::ZERO)
        .expect("no fault");
    world.exposure.replace(value);
}

#[then("the best departure is at {at}")]
fn then_best(world: &ExposureWorld, at: String) {
    assert_eq!(*world.best.borrow(), Some(clock(&at)));
}

#[then("the exposure is {expected}")]
#[expect(clippy::float_arithmetic, reason = "tolerance comparison")]
fn then_exposure(world: &ExposureWorld, expected: f64) {
    let exposure = world.exposure.borrow().expect("departure should be priced");
    assert!(
        (exposure - expected).abs() <= 1e-6,
        "expected {expected}, got {exposure}"
    );
}

#[scenario(path = "tests/features/thermal_exposure.feature", index = 0)]
fn coolest_hour(world: ExposureWorld) {
    let _ = world;
}

#[scenario(path = "tests/features/thermal_exposure.feature", index = 1)]
fn priced_by_start_hour(world: ExposureWorld) {
    let _ = world;
}

#[scenario(path = "tests/features/thermal_exposure.feature", index = 2)]
fn clamped_to_last_hour(world: ExposureWorld) {
    let _ = world;
}
