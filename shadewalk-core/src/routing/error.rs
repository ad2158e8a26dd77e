use thiserror::Error;

/// Faults raised by routing collaborators.
///
/// A missing route is not a fault: path finders report it as `Ok(None)`.
/// These variants describe a collaborator that cannot be trusted for the rest
/// of the search.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RoutingError {
    /// The routing service returned an HTTP error.
    #[error("routing request to {url} failed with HTTP {status}: {message}")]
    HttpError {
        /// Request URL.
        url: String,
        /// HTTP status code.
        status: u16,
        /// Error details.
        message: String,
    },
    /// The routing service could not be reached.
    #[error("routing request to {url} failed: {message}")]
    NetworkError {
        /// Request URL.
        url: String,
        /// Error details.
        message: String,
    },
    /// The routing service did not answer in time.
    #[error("routing request to {url} timed out after {timeout_secs}s")]
    Timeout {
        /// Request URL.
        url: String,
        /// Configured timeout in seconds.
        timeout_secs: u64,
    },
    /// The routing service rejected the request.
    #[error("routing service error {code}: {message}")]
    ServiceError {
        /// Service status code.
        code: String,
        /// Error details.
        message: String,
    },
    /// A response could not be decoded.
    #[error("failed to parse routing response: {message}")]
    ParseError {
        /// Error details.
        message: String,
    },
    /// The graph or cost data behind the collaborator is unusable.
    #[error("malformed routing data: {message}")]
    MalformedData {
        /// Error details.
        message: String,
    },
}
