//! Probe logic independent of the HTTP layer.
//!
//! This module handles:
//! - Startup clock and the readiness gate
//! - Feature-flag evaluation with an injectable randomness source
//! - Deterministic randomness sources for testing

pub mod clock;
pub mod feature;
pub mod mock;

pub use clock::StartupClock;
pub use feature::{evaluate_feature, FeatureOutcome, RandomSource, ThreadRandom};
pub use mock::{FixedDraw, ScriptedDraws};

use strum::{Display, EnumString, IntoStaticStr};

/// Endpoint identity, used for routing and as a metric label.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display, EnumString, IntoStaticStr)]
#[strum(serialize_all = "snake_case")]
pub enum Probe {
    /// `GET /live`.
    Live,
    /// `GET /ready`.
    Ready,
    /// `GET /healthz`.
    Health,
    /// `GET /feature/new`.
    FeatureNew,
    /// `GET /`.
    Root,
    /// `GET /status`.
    Status,
}

impl Probe {
    /// Route path served for this probe.
    pub fn path(&self) -> &'static str {
        match self {
            Probe::Live => "/live",
            Probe::Ready => "/ready",
            Probe::Health => "/healthz",
            Probe::FeatureNew => "/feature/new",
            Probe::Root => "/",
            Probe::Status => "/status",
        }
    }
}
