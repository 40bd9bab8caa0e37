// ABOUTME: Control plane error types with SNAFU pattern.
// ABOUTME: Distinguishes not-found from transport and API failures.

use snafu::Snafu;

/// Errors returned by control plane calls. Everything except `NotFound`
/// propagates verbatim to the caller; this layer performs no retries.
#[derive(Debug, Snafu)]
#[snafu(visibility(pub))]
pub enum ClusterError {
    #[snafu(display("service not found: {name}"))]
    NotFound { name: String },

    #[snafu(display("control plane rejected request ({status}): {message}"))]
    Api { status: u16, message: String },

    #[snafu(display("control plane transport failure: {source}"))]
    Transport { source: reqwest::Error },

    #[snafu(display("malformed control plane response: {message}"))]
    InvalidResponse { message: String },
}

/// Error kind for programmatic handling.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ClusterErrorKind {
    /// The named service does not exist.
    NotFound,
    /// The control plane returned an error status.
    Api,
    /// The request never completed (network, TLS, timeout).
    Transport,
    /// The response body could not be interpreted.
    InvalidResponse,
}

impl ClusterError {
    /// Returns the error kind for programmatic handling.
    pub fn kind(&self) -> ClusterErrorKind {
        match self {
            ClusterError::NotFound { .. } => ClusterErrorKind::NotFound,
            ClusterError::Api { .. } => ClusterErrorKind::Api,
            ClusterError::Transport { .. } => ClusterErrorKind::Transport,
            ClusterError::InvalidResponse { .. } => ClusterErrorKind::InvalidResponse,
        }
    }

    /// True when the error means the named service is absent.
    pub fn is_not_found(&self) -> bool {
        self.kind() == ClusterErrorKind::NotFound
    }
}
