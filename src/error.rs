//! Error types for the service.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
};
use thiserror::Error;

/// Startup-level error type.
#[derive(Error, Debug)]
pub enum ServiceError {
    /// Configuration loading error.
    #[error("configuration error: {0}")]
    Config(#[from] envy::Error),

    /// IO error (bind, accept, serve).
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
}

/// Outward probe failures. Each maps to one HTTP status with a plain-text detail.
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProbeError {
    /// Boot delay has not elapsed yet.
    #[error("Still booting up")]
    StillBooting,

    /// No database DSN configured.
    #[error("DB_DSN not configured")]
    DbNotConfigured,

    /// Simulated failure of the new feature.
    #[error("Feature failed")]
    FeatureFailed,
}

impl ProbeError {
    /// HTTP status for this failure.
    pub fn status(&self) -> StatusCode {
        match self {
            ProbeError::StillBooting => StatusCode::SERVICE_UNAVAILABLE,
            ProbeError::DbNotConfigured | ProbeError::FeatureFailed => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        }
    }
}

impl IntoResponse for ProbeError {
    fn into_response(self) -> Response {
        (self.status(), self.to_string()).into_response()
    }
}

/// Convenient Result type alias.
pub type Result<T> = std::result::Result<T, ServiceError>;
