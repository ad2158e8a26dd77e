//! Optimise command implementation for the shadewalk CLI.

use std::io::{self, Write};
use std::time::Duration;

use camino::{Utf8Path, Utf8PathBuf};
use cap_std::{ambient_authority, fs_utf8};
use clap::Parser;
use geo::Coord;
use jiff::{SignedDuration, Timestamp};
use ortho_config::{OrthoConfig, SubcmdConfigMerge};
use serde::{Deserialize, Serialize};
use shadewalk_core::{
    Direction, Execution, ObjectiveFunction, OptimalTimeFinder, RouteCostObjective,
    RoutedObjectiveFunction, SearchOptions, SearchReport, TimeRange, WeightingType,
};
use shadewalk_data::exposure::ExposureRoutingHelper;
use shadewalk_data::routing::{DEFAULT_PROFILE, HttpPathFinder, HttpPathFinderConfig};
use shadewalk_data::weather::HourlyThermalSeries;

use crate::{
    ARG_DIRECTION, ARG_EXECUTION, ARG_FROM, ARG_MIN_WALKING_MINUTES, ARG_OSRM_BASE_URL,
    ARG_OSRM_PROFILE, ARG_PLACE, ARG_START, ARG_STEP_MINUTES, ARG_THERMAL_SERIES,
    ARG_TIME_LIMIT_SECS, ARG_TO, ARG_WEIGHTING, CliError, ENV_FROM, ENV_PLACE, ENV_START,
    ENV_THERMAL_SERIES, ENV_TO,
};

/// Sampling step used when none is configured.
pub(crate) const DEFAULT_STEP_MINUTES: u32 = 15;

/// Weighting used when none is configured.
pub(crate) const DEFAULT_WEIGHTING: WeightingType = WeightingType::HeatIndex;

/// CLI arguments for the `optimise` subcommand.
#[derive(Debug, Clone, Parser, Deserialize, Serialize, OrthoConfig, Default)]
#[command(
    long_about = "Sample a departure window at a fixed step, route the walk \
                 from start to place with OSRM for every sampled time, price \
                 each route against an hourly thermal series and report the \
                 departure with the lowest (or highest) exposure.",
    about = "Find the best time to walk"
)]
#[ortho_config(prefix = "SHADEWALK")]
pub(crate) struct OptimiseArgs {
    /// Start of the walk as `lon,lat`.
    #[arg(long = ARG_START, value_name = "lon,lat", allow_hyphen_values = true)]
    #[serde(default)]
    pub(crate) start: Option<String>,
    /// Destination of the walk as `lon,lat`.
    #[arg(long = ARG_PLACE, value_name = "lon,lat", allow_hyphen_values = true)]
    #[serde(default)]
    pub(crate) place: Option<String>,
    /// Earliest departure (RFC 3339).
    #[arg(long = ARG_FROM, value_name = "timestamp")]
    #[serde(default)]
    pub(crate) from: Option<Timestamp>,
    /// Latest departure (RFC 3339).
    #[arg(long = ARG_TO, value_name = "timestamp")]
    #[serde(default)]
    pub(crate) to: Option<Timestamp>,
    /// Minutes between sampled departures.
    #[arg(long = ARG_STEP_MINUTES, value_name = "minutes")]
    #[serde(default)]
    pub(crate) step_minutes: Option<u32>,
    /// Cost model routes are priced with.
    #[arg(long = ARG_WEIGHTING, value_name = "weighting")]
    #[serde(default)]
    pub(crate) weighting: Option<WeightingType>,
    /// Whether to minimise or maximise the exposure.
    #[arg(long = ARG_DIRECTION, value_name = "direction")]
    #[serde(default)]
    pub(crate) direction: Option<Direction>,
    /// Walks shorter than this many minutes are ignored.
    #[arg(long = ARG_MIN_WALKING_MINUTES, value_name = "minutes")]
    #[serde(default)]
    pub(crate) min_walking_minutes: Option<u32>,
    /// Evaluate candidates sequentially or in parallel.
    #[arg(long = ARG_EXECUTION, value_name = "mode")]
    #[serde(default)]
    pub(crate) execution: Option<Execution>,
    /// Stop searching after this many seconds.
    #[arg(long = ARG_TIME_LIMIT_SECS, value_name = "seconds")]
    #[serde(default)]
    pub(crate) time_limit_secs: Option<u64>,
    /// JSON file holding the hourly thermal series.
    #[arg(long = ARG_THERMAL_SERIES, value_name = "path")]
    #[serde(default)]
    pub(crate) thermal_series: Option<Utf8PathBuf>,
    /// Base URL for the OSRM server (e.g. "http://localhost:5000").
    #[arg(long = ARG_OSRM_BASE_URL, value_name = "url")]
    #[serde(default)]
    pub(crate) osrm_base_url: Option<String>,
    /// OSRM routing profile.
    #[arg(long = ARG_OSRM_PROFILE, value_name = "profile")]
    #[serde(default)]
    pub(crate) osrm_profile: Option<String>,
}

impl OptimiseArgs {
    pub(crate) fn into_config(self) -> Result<OptimiseConfig, CliError> {
        let merged = self.load_and_merge().map_err(CliError::Configuration)?;
        OptimiseConfig::try_from(merged)
    }
}

/// Resolved `optimise` command configuration.
#[derive(Debug, Clone, PartialEq)]
pub(crate) struct OptimiseConfig {
    pub(crate) start: Coord<f64>,
    pub(crate) place: Coord<f64>,
    pub(crate) window: TimeRange<Timestamp>,
    pub(crate) step: SignedDuration,
    pub(crate) weighting: WeightingType,
    pub(crate) options: SearchOptions,
    pub(crate) thermal_series: Utf8PathBuf,
    pub(crate) osrm_base_url: String,
    pub(crate) osrm_profile: String,
}

impl OptimiseConfig {
    pub(crate) fn validate_sources(&self) -> Result<(), CliError> {
        Self::require_existing(&self.thermal_series, ARG_THERMAL_SERIES)
    }

    fn require_existing(path: &Utf8Path, field: &'static str) -> Result<(), CliError> {
        match file_is_file(path) {
            Ok(true) => Ok(()),
            Ok(false) => Err(CliError::SourcePathNotFile {
                field,
                path: path.to_path_buf(),
            }),
            Err(source) if source.kind() == io::ErrorKind::NotFound => {
                Err(CliError::MissingSourceFile {
                    field,
                    path: path.to_path_buf(),
                })
            }
            Err(source) => Err(CliError::InspectSourcePath {
                field,
                path: path.to_path_buf(),
                source,
            }),
        }
    }
}

impl TryFrom<OptimiseArgs> for OptimiseConfig {
    type Error = CliError;

    fn try_from(args: OptimiseArgs) -> Result<Self, Self::Error> {
        let raw_start = args.start.ok_or(CliError::MissingArgument {
            field: ARG_START,
            env: ENV_START,
        })?;
        let raw_place = args.place.ok_or(CliError::MissingArgument {
            field: ARG_PLACE,
            env: ENV_PLACE,
        })?;
        let from = args.from.ok_or(CliError::MissingArgument {
            field: ARG_FROM,
            env: ENV_FROM,
        })?;
        let to = args.to.ok_or(CliError::MissingArgument {
            field: ARG_TO,
            env: ENV_TO,
        })?;
        let thermal_series = args.thermal_series.ok_or(CliError::MissingArgument {
            field: ARG_THERMAL_SERIES,
            env: ENV_THERMAL_SERIES,
        })?;

        let start = parse_coordinate(ARG_START, &raw_start)?;
        let place = parse_coordinate(ARG_PLACE, &raw_place)?;
        let window = TimeRange::new(from, to)?;

        let step_minutes = args.step_minutes.unwrap_or(DEFAULT_STEP_MINUTES);
        let min_walking_minutes = args.min_walking_minutes.unwrap_or_default();
        let options = SearchOptions {
            direction: args.direction.unwrap_or_default(),
            min_walking_time: Duration::from_secs(u64::from(min_walking_minutes) * 60),
            execution: args.execution.unwrap_or_default(),
            time_limit: args.time_limit_secs.map(Duration::from_secs),
        };

        let defaults = HttpPathFinderConfig::default();
        Ok(Self {
            start,
            place,
            window,
            step: SignedDuration::from_mins(i64::from(step_minutes)),
            weighting: args.weighting.unwrap_or(DEFAULT_WEIGHTING),
            options,
            thermal_series,
            osrm_base_url: args.osrm_base_url.unwrap_or(defaults.base_url),
            osrm_profile: args
                .osrm_profile
                .unwrap_or_else(|| DEFAULT_PROFILE.to_owned()),
        })
    }
}

/// Parse a `lon,lat` pair into a coordinate on the globe.
pub(crate) fn parse_coordinate(field: &'static str, raw: &str) -> Result<Coord<f64>, CliError> {
    let invalid = || CliError::InvalidCoordinate {
        field,
        value: raw.to_owned(),
    };
    let (lon, lat) = raw.split_once(',').ok_or_else(invalid)?;
    let x: f64 = lon.trim().parse().map_err(|_| invalid())?;
    let y: f64 = lat.trim().parse().map_err(|_| invalid())?;
    if !(-180.0..=180.0).contains(&x) || !(-90.0..=90.0).contains(&y) {
        return Err(invalid());
    }
    Ok(Coord { x, y })
}

fn file_is_file(path: &Utf8Path) -> io::Result<bool> {
    let parent = path
        .parent()
        .filter(|parent| !parent.as_str().is_empty())
        .unwrap_or_else(|| Utf8Path::new("."));
    let name = path
        .file_name()
        .ok_or_else(|| io::Error::new(io::ErrorKind::NotFound, "path has no file name"))?;
    let dir = fs_utf8::Dir::open_ambient_dir(parent, ambient_authority())?;
    dir.metadata(name).map(|meta| meta.is_file())
}

pub(crate) type BoxedObjective = Box<dyn ObjectiveFunction<Timestamp>>;

/// Builds the objective scoring each departure of an optimise invocation.
pub(super) trait OptimiseObjectiveBuilder {
    fn build(&self, config: &OptimiseConfig) -> Result<BoxedObjective, CliError>;
}

pub(super) struct DefaultOptimiseObjectiveBuilder;

impl OptimiseObjectiveBuilder for DefaultOptimiseObjectiveBuilder {
    fn build(&self, config: &OptimiseConfig) -> Result<BoxedObjective, CliError> {
        let series = HourlyThermalSeries::from_path(&config.thermal_series).map_err(|source| {
            CliError::LoadThermalSeries {
                path: config.thermal_series.clone(),
                source,
            }
        })?;
        let coverage = *series.coverage();
        if !coverage.contains(config.window.lower()) || !coverage.contains(config.window.upper()) {
            log::warn!(
                "search window {} extends beyond thermal data {}; edge hours will be reused",
                config.window,
                coverage,
            );
        }

        let finder_config = HttpPathFinderConfig::new(config.osrm_base_url.clone())
            .with_profile(config.osrm_profile.clone());
        let path_finder = HttpPathFinder::with_config(finder_config).map_err(|source| {
            CliError::BuildPathFinder {
                base_url: config.osrm_base_url.clone(),
                source,
            }
        })?;
        let path_objective =
            RouteCostObjective::new(ExposureRoutingHelper::new(series), config.weighting);
        let objective =
            RoutedObjectiveFunction::new(path_finder, path_objective, Some(config.weighting))?;
        Ok(Box::new(objective))
    }
}

/// JSON document printed by the optimise command.
#[derive(Debug, Serialize)]
pub(crate) struct OptimiseReport {
    pub(crate) weighting: WeightingType,
    pub(crate) direction: Direction,
    pub(crate) window: TimeRange<Timestamp>,
    #[serde(flatten)]
    pub(crate) search: SearchReport<Timestamp>,
}

pub(super) fn run_optimise(args: OptimiseArgs) -> Result<(), CliError> {
    let mut stdout = io::stdout().lock();
    let builder = DefaultOptimiseObjectiveBuilder;
    run_optimise_with(args, &builder, &mut stdout)
}

pub(super) fn run_optimise_with(
    args: OptimiseArgs,
    builder: &dyn OptimiseObjectiveBuilder,
    writer: &mut dyn Write,
) -> Result<(), CliError> {
    let report = execute_optimise(args, builder)?;
    write_optimise_report(writer, &report)
}

fn execute_optimise(
    args: OptimiseArgs,
    builder: &dyn OptimiseObjectiveBuilder,
) -> Result<OptimiseReport, CliError> {
    let config = resolve_optimise_config(args)?;
    let objective = builder.build(&config)?;
    log::info!(
        "optimising {} from ({}, {}) to ({}, {}) in {}",
        config.weighting,
        config.start.x,
        config.start.y,
        config.place.x,
        config.place.y,
        config.window,
    );
    let search = OptimalTimeFinder::new(
        config.window,
        config.step,
        config.start,
        config.place,
        objective,
    )?
    .with_options(config.options)
    .search()?;
    Ok(OptimiseReport {
        weighting: config.weighting,
        direction: config.options.direction,
        window: config.window,
        search,
    })
}

fn resolve_optimise_config(args: OptimiseArgs) -> Result<OptimiseConfig, CliError> {
    let config = args.into_config()?;
    config.validate_sources()?;
    Ok(config)
}

fn write_optimise_report(writer: &mut dyn Write, report: &OptimiseReport) -> Result<(), CliError> {
    let payload = serde_json::to_string_pretty(report).map_err(CliError::SerialiseReport)?;
    writer
        .write_all(payload.as_bytes())
        .map_err(CliError::WriteReport)?;
    writer.write_all(b"\n").map_err(CliError::WriteReport)?;
    Ok(())
}

#[cfg(test)]
pub(crate) fn config_from_layers_for_test(
    layers: Vec<ortho_config::MergeLayer<'static>>,
) -> Result<OptimiseConfig, CliError> {
    let merged = OptimiseArgs::merge_from_layers(layers).map_err(CliError::from)?;
    OptimiseConfig::try_from(merged)
}
