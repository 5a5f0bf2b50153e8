//! Helper utilities for returning API errors to clients.

use actix_web::http::StatusCode;
use actix_web::{HttpResponse, ResponseError};
use serde::Serialize;
use std::fmt::{Display, Formatter};

/// Represents an error to send back to the notifying media server. Serializes
/// to the `{"detail": "..."}` body shape; the status code travels in the
/// response line only.
#[derive(Debug, Serialize)]
pub struct NextarrApiError {
    #[serde(skip_serializing)]
    pub status: u16,
    pub detail: String,
}

impl ResponseError for NextarrApiError {
    fn status_code(&self) -> StatusCode {
        StatusCode::from_u16(self.status).unwrap()
    }

    fn error_response(&self) -> HttpResponse {
        HttpResponse::build(StatusCode::from_u16(self.status).unwrap()).json(self)
    }
}

impl NextarrApiError {
    /// Create a new instance of [NextarrApiError] with a given [StatusCode].
    /// Before creating a new [NextarrApiError], check for dedicated methods
    /// to return the appropriate status code.
    pub fn new(detail: &str, status: StatusCode) -> Self {
        NextarrApiError {
            detail: String::from(detail),
            status: status.as_u16(),
        }
    }

    pub fn bad_request(detail: &str) -> Self {
        Self::new(detail, StatusCode::BAD_REQUEST)
    }

    pub fn invalid_json() -> Self {
        Self::new("Invalid JSON", StatusCode::BAD_REQUEST)
    }

    pub fn series_not_found() -> Self {
        Self::new("Series not found", StatusCode::NOT_FOUND)
    }

    pub fn upstream_unavailable() -> Self {
        Self::new("Sonarr is unavailable", StatusCode::BAD_GATEWAY)
    }
}

impl Display for NextarrApiError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{}",
            serde_json::to_string(self)
                .unwrap_or_else(|_| String::from("{ detail: \"Fatal Error\" }"))
        )
    }
}
