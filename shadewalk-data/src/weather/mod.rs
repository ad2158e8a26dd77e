//! Hourly thermal conditions along a walk.
//!
//! A [`ThermalModel`] answers "what is it like outside at this instant?".
//! [`HourlyThermalSeries`] is the file-backed implementation: one
//! [`ThermalSample`] per hour from a start instant, loaded from JSON of the
//! form
//!
//! ```json
//! {
//!   "start": "2024-07-01T06:00:00Z",
//!   "samples": [
//!     {"heat_index": 24.1, "mean_radiant_temperature": 31.0, "air_temperature": 22.5}
//!   ]
//! }
//! ```

use std::io;

use camino::{Utf8Path, Utf8PathBuf};
use cap_std::{ambient_authority, fs_utf8};
use jiff::{SignedDuration, Timestamp};
use serde::Deserialize;
use shadewalk_core::TimeRange;
use thiserror::Error;

/// Longest supported series, roughly a century of hourly samples.
pub const MAX_SAMPLES: usize = 1_000_000;

/// Thermal conditions in force during one hour.
#[derive(Debug, Clone, Copy, PartialEq, Deserialize)]
pub struct ThermalSample {
    /// Apparent temperature combining air temperature and humidity, in °C.
    pub heat_index: f64,
    /// Mean radiant temperature, in °C.
    pub mean_radiant_temperature: f64,
    /// Air temperature, in °C.
    pub air_temperature: f64,
}

impl ThermalSample {
    fn first_non_finite(&self) -> Option<&'static str> {
        [
            ("heat_index", self.heat_index),
            ("mean_radiant_temperature", self.mean_radiant_temperature),
            ("air_temperature", self.air_temperature),
        ]
        .into_iter()
        .find_map(|(field, value)| (!value.is_finite()).then_some(field))
    }
}

/// Source of thermal conditions over time.
pub trait ThermalModel: Send + Sync {
    /// Conditions at `at`, or `None` when the model has no data.
    fn sample_at(&self, at: Timestamp) -> Option<ThermalSample>;
}

impl<M: ThermalModel + ?Sized> ThermalModel for &M {
    fn sample_at(&self, at: Timestamp) -> Option<ThermalSample> {
        (**self).sample_at(at)
    }
}

/// Errors raised while building or loading an [`HourlyThermalSeries`].
#[derive(Debug, Error)]
pub enum ThermalSeriesError {
    /// The series file could not be read.
    #[error("failed to read thermal series {path}: {source}")]
    Io {
        /// Offending path.
        path: Utf8PathBuf,
        /// Underlying IO error.
        #[source]
        source: io::Error,
    },
    /// The series JSON is malformed.
    #[error("failed to parse thermal series: {0}")]
    Parse(#[from] serde_json::Error),
    /// The series has no samples.
    #[error("thermal series must contain at least one sample")]
    Empty,
    /// The series has more samples than supported.
    #[error("thermal series has {count} samples; at most {max} are supported", max = MAX_SAMPLES)]
    TooLong {
        /// Number of samples supplied.
        count: usize,
    },
    /// A sample holds a NaN or infinite value.
    #[error("sample {index} has a non-finite {field}")]
    NonFinite {
        /// Position of the sample.
        index: usize,
        /// Offending field.
        field: &'static str,
    },
    /// The series ends beyond the representable time range.
    #[error("thermal series starting at {start} extends past the supported time range")]
    OutOfRange {
        /// Series start.
        start: Timestamp,
    },
}

#[derive(Deserialize)]
struct SeriesFile {
    start: Timestamp,
    samples: Vec<ThermalSample>,
}

/// Hourly samples starting at a fixed instant.
///
/// Sample `i` is in force during `[start + i h, start + (i + 1) h)`. Instants
/// before the first hour use the first sample and instants after the last hour
/// use the last one.
///
/// # Examples
/// ```
/// use jiff::Timestamp;
/// use shadewalk_data::weather::{HourlyThermalSeries, ThermalModel};
///
/// # fn main() -> Result<(), Box<dyn std::error::Error>> {
/// let series = HourlyThermalSeries::from_json_str(r#"{
///     "start": "2024-07-01T08:00:00Z",
///     "samples": [
///         {"heat_index": 24.0, "mean_radiant_temperature": 30.0, "air_temperature": 22.0},
///         {"heat_index": 29.0, "mean_radiant_temperature": 41.0, "air_temperature": 26.0}
///     ]
/// }"#)?;
/// let nine_thirty: Timestamp = "2024-07-01T09:30:00Z".parse()?;
/// assert_eq!(series.sample_at(nine_thirty).map(|s| s.heat_index), Some(29.0));
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct HourlyThermalSeries {
    start: Timestamp,
    samples: Vec<ThermalSample>,
    coverage: TimeRange<Timestamp>,
}

impl HourlyThermalSeries {
    /// Validate and construct a series.
    ///
    /// # Errors
    ///
    /// Returns an error when `samples` is empty or too long, holds a
    /// non-finite value, or ends past the representable time range.
    pub fn new(start: Timestamp, samples: Vec<ThermalSample>) -> Result<Self, ThermalSeriesError> {
        if samples.is_empty() {
            return Err(ThermalSeriesError::Empty);
        }
        if samples.len() > MAX_SAMPLES {
            return Err(ThermalSeriesError::TooLong {
                count: samples.len(),
            });
        }
        if let Some((index, field)) = samples
            .iter()
            .enumerate()
            .find_map(|(index, sample)| sample.first_non_finite().map(|field| (index, field)))
        {
            return Err(ThermalSeriesError::NonFinite { index, field });
        }
        let out_of_range = || ThermalSeriesError::OutOfRange { start };
        let last_hour = i64::try_from(samples.len().saturating_sub(1)).map_err(|_| out_of_range())?;
        let last = start
            .checked_add(SignedDuration::from_hours(last_hour))
            .map_err(|_| out_of_range())?;
        let coverage = TimeRange::new(start, last).map_err(|_| out_of_range())?;
        Ok(Self {
            start,
            samples,
            coverage,
        })
    }

    /// Parse a series from its JSON representation.
    ///
    /// # Errors
    ///
    /// Returns [`ThermalSeriesError::Parse`] for malformed JSON and the errors
    /// of [`new`](Self::new) for invalid content.
    pub fn from_json_str(raw: &str) -> Result<Self, ThermalSeriesError> {
        let file: SeriesFile = serde_json::from_str(raw)?;
        Self::new(file.start, file.samples)
    }

    /// Load a series from a JSON file.
    ///
    /// # Errors
    ///
    /// Returns [`ThermalSeriesError::Io`] when the file cannot be read, plus
    /// the errors of [`from_json_str`](Self::from_json_str).
    pub fn from_path(path: &Utf8Path) -> Result<Self, ThermalSeriesError> {
        let io_error = |source| ThermalSeriesError::Io {
            path: path.to_owned(),
            source,
        };
        let parent = path
            .parent()
            .filter(|parent| !parent.as_str().is_empty())
            .unwrap_or_else(|| Utf8Path::new("."));
        let file_name = path
            .file_name()
            .ok_or_else(|| io_error(io::Error::other("path should include a file name")))?;
        let dir = fs_utf8::Dir::open_ambient_dir(parent, ambient_authority()).map_err(io_error)?;
        let raw = dir.read_to_string(file_name).map_err(io_error)?;
        log::debug!("loaded thermal series from {path}");
        Self::from_json_str(&raw)
    }

    /// Instant the first sample comes into force.
    #[must_use]
    pub const fn start(&self) -> Timestamp {
        self.start
    }

    /// Samples in hourly order.
    #[must_use]
    pub fn samples(&self) -> &[ThermalSample] {
        &self.samples
    }

    /// Span from the first to the last sample's start.
    #[must_use]
    pub const fn coverage(&self) -> &TimeRange<Timestamp> {
        &self.coverage
    }
}

impl ThermalModel for HourlyThermalSeries {
    fn sample_at(&self, at: Timestamp) -> Option<ThermalSample> {
        let hours = at.duration_since(self.start).as_hours().max(0);
        let index = usize::try_from(hours).unwrap_or(usize::MAX);
        self.samples
            .get(index)
            .or_else(|| self.samples.last())
            .copied()
    }
}
