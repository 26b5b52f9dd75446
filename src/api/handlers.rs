//! HTTP API handlers.

use std::sync::Arc;
use std::time::Instant;

use axum::{extract::State, http::StatusCode, response::IntoResponse, Json};
use serde::Serialize;
use tracing::{debug, warn};

use crate::config::Config;
use crate::error::ProbeError;
use crate::metrics;
use crate::probe::{evaluate_feature, Probe, RandomSource, StartupClock, ThreadRandom};

/// Application state shared with handlers. Read-only after construction.
#[derive(Debug, Clone)]
pub struct AppState {
    /// Configuration read at boot.
    pub config: Arc<Config>,
    /// Process start time.
    pub clock: StartupClock,
    /// Randomness for the new-feature endpoint.
    pub random: Arc<dyn RandomSource>,
}

impl AppState {
    /// Create new app state, starting the clock now.
    pub fn new(config: Config) -> Self {
        Self {
            config: Arc::new(config),
            clock: StartupClock::start(),
            random: Arc::new(ThreadRandom),
        }
    }

    /// Replace the startup clock.
    pub fn with_clock(mut self, clock: StartupClock) -> Self {
        self.clock = clock;
        self
    }

    /// Replace the randomness source.
    pub fn with_random(mut self, random: Arc<dyn RandomSource>) -> Self {
        self.random = random;
        self
    }

    /// Whether the boot delay has elapsed.
    pub fn is_ready(&self) -> bool {
        self.clock.is_ready(self.config.boot_delay_duration())
    }
}

/// Status response.
#[derive(Debug, Serialize)]
pub struct StatusResponse {
    /// Service name.
    pub service: &'static str,
    /// Whether `/ready` currently succeeds.
    pub ready: bool,
    /// Whole seconds since start.
    pub uptime_seconds: u64,
    /// Start time, RFC 3339.
    pub started_at: String,
    /// Configured boot delay.
    pub boot_delay_seconds: u64,
    /// Whether a DSN is configured. The DSN itself is never returned.
    pub db_configured: bool,
    /// New-feature flag.
    pub feature_new: bool,
}

/// Record the response status for a probe and pass the result through.
fn finish(
    probe: Probe,
    result: Result<&'static str, ProbeError>,
) -> Result<&'static str, ProbeError> {
    let status = match &result {
        Ok(_) => StatusCode::OK,
        Err(e) => e.status(),
    };
    metrics::record_probe(probe, status);
    result
}

/// Liveness handler - always returns 200.
pub async fn live() -> Result<&'static str, ProbeError> {
    finish(Probe::Live, Ok("OK"))
}

/// Readiness handler - 503 until the boot delay has elapsed, 200 after.
pub async fn ready(State(state): State<AppState>) -> Result<&'static str, ProbeError> {
    let now = Instant::now();
    let boot_delay = state.config.boot_delay_duration();

    let result = if state.clock.is_ready_at(boot_delay, now) {
        Ok("Ready")
    } else {
        debug!(
            elapsed_ms = state.clock.elapsed_at(now).as_millis() as u64,
            boot_delay_s = state.config.boot_delay,
            "Readiness probe rejected"
        );
        Err(ProbeError::StillBooting)
    };

    finish(Probe::Ready, result)
}

/// Health handler - 200 when a DSN is configured, 500 otherwise.
pub async fn healthz(State(state): State<AppState>) -> Result<&'static str, ProbeError> {
    let result = if state.config.db_configured() {
        Ok("Healthy")
    } else {
        debug!("Health probe rejected: DB_DSN not configured");
        Err(ProbeError::DbNotConfigured)
    };

    finish(Probe::Health, result)
}

/// New-feature handler - fails half the time when the flag is on.
pub async fn feature_new(State(state): State<AppState>) -> Result<&'static str, ProbeError> {
    let outcome = evaluate_feature(state.config.feature_new, state.random.as_ref());
    metrics::record_feature(outcome);

    let result = match outcome.body() {
        Some(body) => Ok(body),
        None => {
            warn!(outcome = %outcome, "Simulated feature failure");
            Err(ProbeError::FeatureFailed)
        }
    };

    finish(Probe::FeatureNew, result)
}

/// Root handler - basic connectivity check.
pub async fn root() -> Result<&'static str, ProbeError> {
    finish(Probe::Root, Ok("myapp is running"))
}

/// Status handler - JSON summary of the probe state.
pub async fn status(State(state): State<AppState>) -> impl IntoResponse {
    metrics::record_probe(Probe::Status, StatusCode::OK);

    Json(StatusResponse {
        service: "myapp",
        ready: state.is_ready(),
        uptime_seconds: state.clock.elapsed().as_secs(),
        started_at: state.clock.started_at_rfc3339(),
        boot_delay_seconds: state.config.boot_delay,
        db_configured: state.config.db_configured(),
        feature_new: state.config.feature_new,
    })
}

/// Fallback for unknown paths.
pub async fn not_found() -> impl IntoResponse {
    (StatusCode::NOT_FOUND, "Not Found")
}
