//! Command-line interface for choosing the most comfortable time to walk.
#![forbid(unsafe_code)]

use clap::{Parser, Subcommand};

mod error;
mod optimise;

pub use error::CliError;

use optimise::OptimiseArgs;

const ARG_START: &str = "start";
const ARG_PLACE: &str = "place";
const ARG_FROM: &str = "from";
const ARG_TO: &str = "to";
const ARG_STEP_MINUTES: &str = "step-minutes";
const ARG_WEIGHTING: &str = "weighting";
const ARG_DIRECTION: &str = "direction";
const ARG_MIN_WALKING_MINUTES: &str = "min-walking-minutes";
const ARG_EXECUTION: &str = "execution";
const ARG_TIME_LIMIT_SECS: &str = "time-limit-secs";
const ARG_THERMAL_SERIES: &str = "thermal-series";
const ARG_OSRM_BASE_URL: &str = "osrm-base-url";
const ARG_OSRM_PROFILE: &str = "osrm-profile";
const ENV_START: &str = "SHADEWALK_CMDS_OPTIMISE_START";
const ENV_PLACE: &str = "SHADEWALK_CMDS_OPTIMISE_PLACE";
const ENV_FROM: &str = "SHADEWALK_CMDS_OPTIMISE_FROM";
const ENV_TO: &str = "SHADEWALK_CMDS_OPTIMISE_TO";
const ENV_THERMAL_SERIES: &str = "SHADEWALK_CMDS_OPTIMISE_THERMAL_SERIES";

/// Run the shadewalk CLI with the current process arguments and environment.
///
/// # Errors
///
/// Returns a [`CliError`] when arguments or configuration are invalid, when
/// a collaborator cannot be built, or when the search fails. Finding no
/// feasible departure is not an error.
pub fn run() -> Result<(), CliError> {
    let cli = Cli::try_parse().map_err(CliError::ArgumentParsing)?;
    match cli.command {
        Command::Optimise(args) => optimise::run_optimise(args),
    }
}

#[derive(Debug, Parser)]
#[command(
    name = "shadewalk",
    about = "Find the most comfortable time to walk somewhere",
    version
)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Search a departure window for the least thermally stressful walk.
    Optimise(OptimiseArgs),
}

#[cfg(test)]
mod tests;
