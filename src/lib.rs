//! Probe and feature-flag demo service for rollout/rollback exercises.
//!
//! Exposes liveness, readiness, health and feature-flag endpoints whose
//! behaviour is driven by three environment variables, so an orchestrator's
//! rollout and rollback paths can be exercised on demand:
//!
//! ```text
//! BOOT_DELAY=5        /ready   503 for the first 5s, then 200
//! DB_DSN=             /healthz 500 until a DSN is configured
//! FEATURE_NEW=true    /feature/new fails ~50% of requests
//! ```
//!
//! # Modules
//!
//! - [`config`]: Configuration loading from environment
//! - [`error`]: Startup and probe error types
//! - [`probe`]: Readiness gate and feature-flag evaluation
//! - [`api`]: HTTP router, handlers and server loop
//! - [`metrics`]: In-process request counters
//! - [`utils`]: Utility functions

pub mod api;
pub mod config;
pub mod error;
pub mod metrics;
pub mod probe;
pub mod utils;

pub use config::Config;
pub use error::{ProbeError, Result, ServiceError};
