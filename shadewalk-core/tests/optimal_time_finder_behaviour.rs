#![expect(
    clippy::expect_used,
    reason = "behaviour tests use expect for readable failures"
)]

//! Behavioural tests for the departure-time search using rstest-bdd.

use std::cell::RefCell;

use geo::Coord;
use jiff::{SignedDuration, Timestamp};
use rstest::fixture;
use rstest_bdd_macros::{given, scenario, then, when};
use shadewalk_core::test_support::ScriptedObjective;
use shadewalk_core::{
    Direction, Execution, FinderError, OptimalTime, OptimalTimeFinder, RoutingError, TimeRange,
};

const START: Coord<f64> = Coord { x: 7.588, y: 47.559 };
const PLACE: Coord<f64> = Coord { x: 7.596, y: 47.547 };

fn clock(hh_mm: &str) -> Timestamp {
    format!("2024-07-01T{hh_mm}:00Z")
        .parse()
        .expect("valid wall-clock time")
}

/// World state shared by the search scenarios.
#[derive(Default)]
struct SearchWorld {
    window: RefCell<Option<(TimeRange<Timestamp>, SignedDuration)>>,
    objective: RefCell<Option<ScriptedObjective<Timestamp>>>,
    outcome: RefCell<Option<Result<Option<OptimalTime<Timestamp>>, FinderError>>>,
}

impl SearchWorld {
    fn candidates(&self) -> Vec<Timestamp> {
        let borrowed = self.window.borrow();
        let (limits, step) = borrowed.as_ref().expect("window should be set");
        shadewalk_core::CandidateTimes::new(limits, *step).collect()
    }

    fn run(&self, direction: Direction, execution: Execution) {
        let (limits, step) = self.window.borrow().expect("window should be set");
        let objective = self
            .objective
            .borrow_mut()
            .take()
            .expect("objective should be scripted");
        let result = OptimalTimeFinder::new(limits, step, START, PLACE, objective)
            .expect("positive step")
            .with_direction(direction)
            .with_execution(execution)
            .find_optimal_time();
        self.outcome.replace(Some(result));
    }

    fn best(&self) -> OptimalTime<Timestamp> {
        let borrowed = self.outcome.borrow();
        borrowed
            .as_ref()
            .expect("search should have run")
            .as_ref()
            .expect("search should succeed")
            .expect("a feasible departure")
    }
}

#[fixture]
fn world() -> SearchWorld {
    SearchWorld::default()
}

#[given("a morning window from {lower} to {upper} sampled every {minutes} minutes")]
fn given_window(world: &SearchWorld, lower: String, upper: String, minutes: i64) {
    let limits = TimeRange::new(clock(&lower), clock(&upper)).expect("ordered bounds");
    world
        .window
        .replace(Some((limits, SignedDuration::from_mins(minutes))));
}

#[given("scripted heat costs {costs}")]
fn given_costs(world: &SearchWorld, costs: String) {
    let values: Vec<f64> = costs
        .split(',')
        .map(|cost| cost.trim().parse().expect("numeric cost"))
        .collect();
    let candidates = world.candidates();
    assert_eq!(values.len(), candidates.len(), "one cost per candidate");
    let objective =
        ScriptedObjective::from_values(candidates.into_iter().zip(values.into_iter().map(Some)));
    world.objective.replace(Some(objective));
}

#[given("no departure has a path")]
fn given_no_paths(world: &SearchWorld) {
    world
        .objective
        .replace(Some(ScriptedObjective::from_values(std::iter::empty())));
}

#[given("the routing service fails at {at}")]
fn given_failure(world: &SearchWorld, at: String) {
    let objective = world
        .objective
        .borrow_mut()
        .take()
        .expect("objective should be scripted");
    let failing = objective.with_fault(
        clock(&at),
        RoutingError::ServiceError {
            code: "InvalidQuery".into(),
            message: "upstream unavailable".into(),
        },
    );
    world.objective.replace(Some(failing));
}

#[when("I search for the minimum")]
fn when_minimum(world: &SearchWorld) {
    world.run(Direction::Minimize, Execution::Sequential);
}

#[when("I search for the maximum in parallel")]
fn when_maximum_parallel(world: &SearchWorld) {
    world.run(Direction::Maximize, Execution::Parallel);
}

#[then("the best departure is at {at}")]
fn then_best_at(world: &SearchWorld, at: String) {
    assert_eq!(world.best().time, clock(&at));
}

#[then("the best value is {value}")]
#[expect(clippy::float_arithmetic, reason = "tolerance comparison")]
fn then_best_value(world: &SearchWorld, value: f64) {
    assert!((world.best().value - value).abs() <= 1e-9);
}

#[then("no departure is returned")]
fn then_nothing(world: &SearchWorld) {
    let borrowed = world.outcome.borrow();
    let result = borrowed.as_ref().expect("search should have run");
    assert!(matches!(result, Ok(None)), "expected no departure, got {result:?}");
}

#[then("the search fails with a collaborator fault")]
fn then_fault(world: &SearchWorld) {
    let borrowed = world.outcome.borrow();
    let err = borrowed
        .as_ref()
        .expect("search should have run")
        .as_ref()
        .expect_err("search should fail");
    assert!(err.is_collaborator_fault(), "unexpected error {err}");
}

#[scenario(path = "tests/features/optimal_time_finder.feature", index = 0)]
fn earliest_minimum(world: SearchWorld) {
    let _ = world;
}

#[scenario(path = "tests/features/optimal_time_finder.feature", index = 1)]
fn nothing_reachable(world: SearchWorld) {
    let _ = world;
}

#[scenario(path = "tests/features/optimal_time_finder.feature", index = 2)]
fn parallel_maximum(world: SearchWorld) {
    let _ = world;
}

#[scenario(path = "tests/features/optimal_time_finder.feature", index = 3)]
fn routing_failure(world: SearchWorld) {
    let _ = world;
}
