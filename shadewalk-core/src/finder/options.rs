//! Tunable search behaviour.

use std::time::Duration;

/// Which extremum the finder selects.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(rename_all = "snake_case")
)]
pub enum Direction {
    /// Prefer the smallest value, e.g. least heat stress.
    #[default]
    Minimize,
    /// Prefer the largest value.
    Maximize,
}

impl std::fmt::Display for Direction {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(match self {
            Self::Minimize => "minimize",
            Self::Maximize => "maximize",
        })
    }
}

impl std::str::FromStr for Direction {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "minimize" | "min" => Ok(Self::Minimize),
            "maximize" | "max" => Ok(Self::Maximize),
            _ => Err(format!("unknown direction '{s}'")),
        }
    }
}

/// How candidate evaluations are scheduled.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(rename_all = "snake_case")
)]
pub enum Execution {
    /// One candidate after another on the calling thread.
    #[default]
    Sequential,
    /// One task per candidate on the rayon thread pool.
    Parallel,
}

impl std::fmt::Display for Execution {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(match self {
            Self::Sequential => "sequential",
            Self::Parallel => "parallel",
        })
    }
}

impl std::str::FromStr for Execution {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "sequential" => Ok(Self::Sequential),
            "parallel" => Ok(Self::Parallel),
            _ => Err(format!("unknown execution mode '{s}'")),
        }
    }
}

/// Options applied to every search run by a finder.
///
/// # Examples
/// ```
/// use std::time::Duration;
/// use shadewalk_core::{Direction, Execution, SearchOptions};
///
/// let options = SearchOptions {
///     min_walking_time: Duration::from_secs(600),
///     execution: Execution::Parallel,
///     ..SearchOptions::default()
/// };
/// assert_eq!(options.direction, Direction::Minimize);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(default)
)]
pub struct SearchOptions {
    /// Optimisation direction.
    pub direction: Direction,
    /// Walks shorter than this are infeasible.
    pub min_walking_time: Duration,
    /// Candidate scheduling.
    pub execution: Execution,
    /// Wall-clock budget for one search; `None` is unbounded.
    pub time_limit: Option<Duration>,
}
