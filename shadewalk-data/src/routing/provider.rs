//! HTTP-based `PathFinder` using OSRM's Route API.
//!
//! The [`PathFinder`] trait is synchronous so the search stays embeddable in
//! synchronous contexts. This finder bridges the async HTTP calls to the sync
//! interface by blocking on a Tokio runtime internally.

use std::time::Duration;

use geo::{Coord, LineString};
use reqwest::Client;
use shadewalk_core::{PathEdge, PathFinder, RoutingError, TimeAxis, WalkPath, WeightingType};
use thiserror::Error;
use tokio::runtime::{Handle, Runtime, RuntimeFlavor};

use super::osrm::{Annotation, Route, RouteResponse};

/// Errors raised while constructing an [`HttpPathFinder`].
#[derive(Debug, Error)]
pub enum PathFinderBuildError {
    /// Failed to build the HTTP client.
    #[error("failed to build HTTP client: {0}")]
    HttpClient(#[source] reqwest::Error),
    /// Failed to build the Tokio runtime.
    #[error("failed to build Tokio runtime: {0}")]
    Runtime(#[source] std::io::Error),
}

/// Default user agent for OSRM requests.
pub const DEFAULT_USER_AGENT: &str = "shadewalk-routing/0.1";

/// Default OSRM profile for pedestrians.
pub const DEFAULT_PROFILE: &str = "foot";

/// Default request timeout in seconds.
const DEFAULT_TIMEOUT_SECS: u64 = 30;

/// Configuration for [`HttpPathFinder`].
#[derive(Debug, Clone)]
pub struct HttpPathFinderConfig {
    /// Base URL for the OSRM service (e.g., `"http://localhost:5000"`).
    pub base_url: String,
    /// OSRM routing profile.
    pub profile: String,
    /// Request timeout duration.
    pub timeout: Duration,
    /// User agent string for requests.
    pub user_agent: String,
}

impl Default for HttpPathFinderConfig {
    fn default() -> Self {
        Self {
            base_url: "http://localhost:5000".to_owned(),
            profile: DEFAULT_PROFILE.to_owned(),
            timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECS),
            user_agent: DEFAULT_USER_AGENT.to_owned(),
        }
    }
}

impl HttpPathFinderConfig {
    /// Create a new configuration with the given base URL.
    #[must_use]
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            ..Default::default()
        }
    }

    /// Set the OSRM profile.
    #[must_use]
    pub fn with_profile(mut self, profile: impl Into<String>) -> Self {
        self.profile = profile.into();
        self
    }

    /// Set the request timeout.
    #[must_use]
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Set the user agent string.
    #[must_use]
    pub fn with_user_agent(mut self, user_agent: impl Into<String>) -> Self {
        self.user_agent = user_agent.into();
        self
    }
}

/// Walking path finder backed by the OSRM Route API.
///
/// OSRM paths do not depend on the departure time or on the weighting: the
/// same geometry is returned for every candidate and the time-dependent cost
/// is applied afterwards by a [`RoutingHelper`](shadewalk_core::RoutingHelper).
///
/// # Runtime behaviour
///
/// Outside any Tokio runtime the finder blocks on its own `current_thread`
/// runtime. Inside a multi-threaded runtime it uses that runtime's handle with
/// [`tokio::task::block_in_place`]. Inside a `current_thread` runtime it falls
/// back to its own runtime, which may deadlock if the caller's runtime drives
/// IO this request depends on.
///
/// # Examples
///
/// ```no_run
/// use geo::Coord;
/// use jiff::Timestamp;
/// use shadewalk_core::{PathFinder, WeightingType};
/// use shadewalk_data::routing::{HttpPathFinder, HttpPathFinderConfig};
/// use std::time::Duration;
///
/// let config = HttpPathFinderConfig::new("http://localhost:5000")
///     .with_timeout(Duration::from_secs(10));
/// let finder = HttpPathFinder::with_config(config)?;
/// let _path = finder.find_path(
///     Coord { x: 7.588, y: 47.559 },
///     Coord { x: 7.596, y: 47.547 },
///     Timestamp::now(),
///     WeightingType::HeatIndex,
/// )?;
/// # Ok::<(), Box<dyn std::error::Error>>(())
/// ```
pub struct HttpPathFinder {
    client: Client,
    config: HttpPathFinderConfig,
    runtime: Runtime,
}

impl std::fmt::Debug for HttpPathFinder {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("HttpPathFinder")
            .field("client", &self.client)
            .field("config", &self.config)
            .field("runtime", &"<tokio::runtime::Runtime>")
            .finish()
    }
}

impl HttpPathFinder {
    /// Create a finder with default configuration.
    ///
    /// # Errors
    ///
    /// Returns an error if the HTTP client or Tokio runtime fails to build.
    pub fn new(base_url: impl Into<String>) -> Result<Self, PathFinderBuildError> {
        Self::with_config(HttpPathFinderConfig::new(base_url))
    }

    /// Create a finder with explicit configuration.
    ///
    /// # Errors
    ///
    /// Returns an error if the HTTP client or Tokio runtime fails to build.
    pub fn with_config(config: HttpPathFinderConfig) -> Result<Self, PathFinderBuildError> {
        let client = Client::builder()
            .user_agent(&config.user_agent)
            .connect_timeout(config.timeout)
            .timeout(config.timeout)
            .build()
            .map_err(PathFinderBuildError::HttpClient)?;
        let runtime = tokio::runtime::Builder::new_current_thread()
            .enable_all()
            .build()
            .map_err(PathFinderBuildError::Runtime)?;
        Ok(Self {
            client,
            config,
            runtime,
        })
    }

    /// Active configuration.
    #[must_use]
    pub const fn config(&self) -> &HttpPathFinderConfig {
        &self.config
    }

    /// Build the OSRM Route API URL between two coordinates.
    fn build_route_url(&self, start: Coord<f64>, place: Coord<f64>) -> String {
        format!(
            "{}/route/v1/{}/{},{};{},{}?overview=full&geometries=geojson&annotations=distance,duration",
            self.config.base_url.trim_end_matches('/'),
            self.config.profile,
            start.x,
            start.y,
            place.x,
            place.y,
        )
    }

    async fn fetch_path_async(
        &self,
        start: Coord<f64>,
        place: Coord<f64>,
    ) -> Result<Option<WalkPath>, RoutingError> {
        let url = self.build_route_url(start, place);

        let response = self
            .client
            .get(&url)
            .send()
            .await
            .map_err(|err| self.convert_reqwest_error(&err, &url))?;
        // OSRM answers NoRoute with a 400 status and a JSON body, so the body
        // is decoded before the status is checked.
        let status = response.status();
        let bytes = response
            .bytes()
            .await
            .map_err(|err| self.convert_reqwest_error(&err, &url))?;
        match serde_json::from_slice::<RouteResponse>(&bytes) {
            Ok(route_response) => convert_response(route_response),
            Err(_) if !status.is_success() => Err(RoutingError::HttpError {
                url,
                status: status.as_u16(),
                message: String::from_utf8_lossy(&bytes).into_owned(),
            }),
            Err(err) => Err(RoutingError::ParseError {
                message: err.to_string(),
            }),
        }
    }

    /// Convert a reqwest error to a `RoutingError`.
    fn convert_reqwest_error(&self, error: &reqwest::Error, url: &str) -> RoutingError {
        if error.is_timeout() {
            return RoutingError::Timeout {
                url: url.to_owned(),
                timeout_secs: self.config.timeout.as_secs(),
            };
        }

        if let Some(status) = error.status() {
            return RoutingError::HttpError {
                url: url.to_owned(),
                status: status.as_u16(),
                message: error.to_string(),
            };
        }

        RoutingError::NetworkError {
            url: url.to_owned(),
            message: error.to_string(),
        }
    }
}

/// Convert an OSRM response to the first route's walking path.
fn convert_response(response: RouteResponse) -> Result<Option<WalkPath>, RoutingError> {
    if response.is_not_found() {
        log::debug!(
            "OSRM found no path ({}): {}",
            response.code,
            response.message.as_deref().unwrap_or_default()
        );
        return Ok(None);
    }
    if !response.is_ok() {
        return Err(RoutingError::ServiceError {
            code: response.code,
            message: response.message.unwrap_or_default(),
        });
    }
    let Some(route) = response.routes.into_iter().next() else {
        return Ok(None);
    };
    let edges = route_edges(&route)?;
    let geometry = LineString::from(
        route
            .geometry
            .coordinates
            .iter()
            .map(|&[x, y]| Coord { x, y })
            .collect::<Vec<_>>(),
    );
    Ok(Some(WalkPath::new(geometry, edges)))
}

/// One edge per annotated segment, or a single edge spanning the route when
/// any leg lacks annotations.
fn route_edges(route: &Route) -> Result<Vec<PathEdge>, RoutingError> {
    let annotations: Option<Vec<&Annotation>> =
        route.legs.iter().map(|leg| leg.annotation.as_ref()).collect();
    match annotations {
        Some(annotations) if !annotations.is_empty() => annotations
            .into_iter()
            .flat_map(|annotation| {
                let mismatch = (annotation.distance.len() != annotation.duration.len()).then(|| {
                    Err(RoutingError::MalformedData {
                        message: format!(
                            "{} segment distances but {} durations",
                            annotation.distance.len(),
                            annotation.duration.len()
                        ),
                    })
                });
                mismatch.into_iter().chain(
                    annotation
                        .distance
                        .iter()
                        .zip(&annotation.duration)
                        .map(|(&length, &seconds)| edge(length, seconds)),
                )
            })
            .collect(),
        _ => Ok(vec![edge(route.distance, route.duration)?]),
    }
}

fn edge(length_metres: f64, seconds: f64) -> Result<PathEdge, RoutingError> {
    if !(length_metres.is_finite() && length_metres >= 0.0) {
        return Err(RoutingError::MalformedData {
            message: format!("invalid segment length {length_metres}"),
        });
    }
    let duration = Duration::try_from_secs_f64(seconds).map_err(|err| {
        RoutingError::MalformedData {
            message: format!("invalid segment duration {seconds}: {err}"),
        }
    })?;
    Ok(PathEdge::new(length_metres, duration))
}

impl<T: TimeAxis> PathFinder<T> for HttpPathFinder {
    /// Fetch the walking path between `start` and `place`.
    ///
    /// # Runtime requirements
    ///
    /// When called from within an existing Tokio runtime, the runtime should
    /// be multi-threaded; see the type-level documentation.
    fn find_path(
        &self,
        start: Coord<f64>,
        place: Coord<f64>,
        departure: T,
        weighting: WeightingType,
    ) -> Result<Option<WalkPath>, RoutingError> {
        log::debug!("routing departure {departure} ({weighting}) via OSRM");
        let future = self.fetch_path_async(start, place);
        match Handle::try_current() {
            Ok(handle) if handle.runtime_flavor() == RuntimeFlavor::MultiThread => {
                tokio::task::block_in_place(|| handle.block_on(future))
            }
            // No runtime detected, or current_thread runtime: use our own runtime.
            _ => self.runtime.block_on(future),
        }
    }
}
