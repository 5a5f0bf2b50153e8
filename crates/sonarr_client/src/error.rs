use reqwest::StatusCode;
use thiserror::Error;

/// Failure modes of a call against the Sonarr API.
#[derive(Debug, Error)]
pub enum SonarrError {
    /// Sonarr answered, but with a non-success status code.
    #[error("Sonarr returned {status}: {body}")]
    Status { status: StatusCode, body: String },
    /// The call never produced a usable response (connection refused, TLS failure,
    /// or an undecodable body).
    #[error("request to Sonarr failed: {0}")]
    Transport(#[from] reqwest::Error),
}
