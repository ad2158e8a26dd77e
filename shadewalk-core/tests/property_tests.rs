//! Property-based tests for the departure-time search.
//!
//! # Invariants tested
//!
//! - **Bounds:** every candidate lies inside the window and both bounds are
//!   sampled.
//! - **Extremum:** the result is the extremal feasible value, earliest on ties.
//! - **Determinism:** parallel and sequential searches agree.
//! - **Infeasibility:** a window with no feasible value yields nothing.

use geo::Coord;
use proptest::prelude::*;
use shadewalk_core::test_support::ScriptedObjective;
use shadewalk_core::{
    CandidateTimes, Direction, Execution, OptimalTime, OptimalTimeFinder, TimeRange,
};

const HERE: Coord<f64> = Coord { x: 0.0, y: 0.0 };

/// Script one optional value per candidate of `[0, upper]` sampled every
/// `step`.
fn scripted(upper: i64, step: i64, values: &[Option<i16>]) -> ScriptedObjective<i64> {
    let limits = TimeRange::new(0, upper).expect("ordered bounds");
    ScriptedObjective::from_values(
        CandidateTimes::new(&limits, step)
            .zip(values.iter().cycle())
            .map(|(time, value)| (time, value.map(f64::from))),
    )
}

fn search(
    upper: i64,
    step: i64,
    values: &[Option<i16>],
    direction: Direction,
    execution: Execution,
) -> Option<OptimalTime<i64>> {
    let limits = TimeRange::new(0, upper).expect("ordered bounds");
    OptimalTimeFinder::new(limits, step, HERE, HERE, scripted(upper, step, values))
        .expect("positive step")
        .with_direction(direction)
        .with_execution(execution)
        .find_optimal_time()
        .expect("scripted objectives never fault")
}

fn direction() -> impl Strategy<Value = Direction> {
    prop_oneof![Just(Direction::Minimize), Just(Direction::Maximize)]
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(100))]

    /// Property: candidates stay within the window and include both bounds.
    #[test]
    fn candidates_cover_the_window(lower in -1_000_i64..1_000, width in 0_i64..500, step in 1_i64..120) {
        let limits = TimeRange::new(lower, lower + width).expect("ordered bounds");
        let times: Vec<i64> = CandidateTimes::new(&limits, step).collect();

        prop_assert_eq!(times.first().copied(), Some(lower));
        prop_assert_eq!(times.last().copied(), Some(lower + width));
        prop_assert!(times.iter().all(|time| limits.contains(time)));
        prop_assert!(times.windows(2).all(|pair| matches!(pair, [a, b] if a < b)));
    }

    /// Property: the result is the extremal feasible value, earliest on ties.
    #[test]
    fn result_is_earliest_extremum(
        upper in 0_i64..300,
        step in 1_i64..60,
        values in prop::collection::vec(prop::option::of(-5_i16..5), 1..8),
        direction in direction(),
    ) {
        let limits = TimeRange::new(0, upper).expect("ordered bounds");
        let expected = CandidateTimes::new(&limits, step)
            .zip(values.iter().cycle())
            .filter_map(|(time, value)| value.map(|v| (time, f64::from(v))))
            .reduce(|best, next| {
                let better = match direction {
                    Direction::Minimize => next.1 < best.1,
                    Direction::Maximize => next.1 > best.1,
                };
                if better { next } else { best }
            });

        let found = search(upper, step, &values, direction, Execution::Sequential);
        prop_assert_eq!(found.map(|best| (best.time, best.value)), expected);
    }

    /// Property: parallel evaluation picks exactly the sequential result.
    #[test]
    fn parallel_matches_sequential(
        upper in 0_i64..300,
        step in 1_i64..60,
        values in prop::collection::vec(prop::option::of(-5_i16..5), 1..8),
        direction in direction(),
    ) {
        prop_assert_eq!(
            search(upper, step, &values, direction, Execution::Parallel),
            search(upper, step, &values, direction, Execution::Sequential)
        );
    }

    /// Property: no feasible candidate means no result in either direction.
    #[test]
    fn infeasible_windows_yield_nothing(upper in 0_i64..300, step in 1_i64..60, direction in direction()) {
        prop_assert_eq!(search(upper, step, &[None], direction, Execution::Sequential), None);
    }
}
