//! Error types emitted by the shadewalk CLI.
//!
//! Keep this error type reasonably small, as many CLI helpers return
//! `Result<_, CliError>` and the workspace enables `clippy::result_large_err`.

use std::sync::Arc;

use camino::Utf8PathBuf;
use shadewalk_core::{FinderError, ObjectiveError, TimeRangeError};
use shadewalk_data::routing::PathFinderBuildError;
use shadewalk_data::weather::ThermalSeriesError;
use thiserror::Error;

/// Errors emitted by the shadewalk CLI.
#[derive(Debug, Error)]
pub enum CliError {
    /// Provided arguments failed Clap validation.
    #[error(transparent)]
    ArgumentParsing(#[from] clap::Error),
    /// Configuration layering failed (files, env, CLI).
    #[error("failed to load configuration: {0}")]
    Configuration(#[from] Arc<ortho_config::OrthoError>),
    /// A required option is missing after configuration merging.
    #[error("missing {field} (set --{field} or {env})")]
    MissingArgument {
        /// Flag name without dashes.
        field: &'static str,
        /// Environment variable carrying the option.
        env: &'static str,
    },
    /// A coordinate is not a `lon,lat` pair on the globe.
    #[error("{field} {value:?} is not a valid lon,lat coordinate")]
    InvalidCoordinate {
        /// Flag name without dashes.
        field: &'static str,
        /// Rejected value.
        value: String,
    },
    /// The search window is inverted.
    #[error("invalid search window: {0}")]
    InvalidWindow(#[from] TimeRangeError),
    /// A referenced input path does not exist on disk.
    #[error("{field} path {path:?} does not exist")]
    MissingSourceFile {
        /// Flag name without dashes.
        field: &'static str,
        /// Offending path.
        path: Utf8PathBuf,
    },
    /// A referenced input path exists but is not a file.
    #[error("{field} path {path:?} exists but is not a file")]
    SourcePathNotFile {
        /// Flag name without dashes.
        field: &'static str,
        /// Offending path.
        path: Utf8PathBuf,
    },
    /// A referenced input path could not be inspected due to an IO error.
    #[error("failed to inspect {field} path {path:?}: {source}")]
    InspectSourcePath {
        /// Flag name without dashes.
        field: &'static str,
        /// Offending path.
        path: Utf8PathBuf,
        /// Underlying IO error.
        #[source]
        source: std::io::Error,
    },
    /// Loading the thermal series failed.
    #[error("failed to load thermal series from {path:?}: {source}")]
    LoadThermalSeries {
        /// Series path.
        path: Utf8PathBuf,
        /// Underlying error.
        #[source]
        source: ThermalSeriesError,
    },
    /// Constructing the path finder failed.
    #[error("failed to build path finder for {base_url:?}: {source}")]
    BuildPathFinder {
        /// OSRM base URL.
        base_url: String,
        /// Underlying error.
        #[source]
        source: PathFinderBuildError,
    },
    /// The objective could not be configured.
    #[error("failed to configure objective: {0}")]
    Objective(#[from] ObjectiveError),
    /// The search failed.
    #[error("search failed: {0}")]
    Search(#[from] FinderError),
    /// Serialising the report failed.
    #[error("failed to serialise report: {0}")]
    SerialiseReport(#[source] serde_json::Error),
    /// Writing the report failed.
    #[error("failed to write report: {0}")]
    WriteReport(#[source] std::io::Error),
}
