//! New-feature flag with simulated random failures.

use std::fmt::Debug;

use rand::Rng;
use strum::Display;

/// Draws below this value fail the feature when it is enabled.
pub const FAILURE_THRESHOLD: f64 = 0.5;

/// Source of uniform draws in `[0, 1)`.
pub trait RandomSource: Debug + Send + Sync {
    /// Return one uniform value in `[0, 1)`.
    fn draw(&self) -> f64;
}

/// Thread-local RNG, one independent draw per call.
#[derive(Debug, Clone, Copy, Default)]
pub struct ThreadRandom;

impl RandomSource for ThreadRandom {
    fn draw(&self) -> f64 {
        rand::thread_rng().gen::<f64>()
    }
}

/// Result of evaluating the new feature for one request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Display)]
#[strum(serialize_all = "snake_case")]
pub enum FeatureOutcome {
    /// Flag is off.
    Disabled,
    /// Flag is on and the draw succeeded.
    Works,
    /// Flag is on and the draw failed.
    Failed,
}

impl FeatureOutcome {
    /// Response body for successful outcomes.
    pub fn body(&self) -> Option<&'static str> {
        match self {
            FeatureOutcome::Disabled => Some("Feature disabled"),
            FeatureOutcome::Works => Some("Feature works"),
            FeatureOutcome::Failed => None,
        }
    }
}

/// Evaluate the feature. The source is only consulted when the flag is on.
pub fn evaluate_feature(enabled: bool, source: &dyn RandomSource) -> FeatureOutcome {
    if !enabled {
        return FeatureOutcome::Disabled;
    }

    if source.draw() < FAILURE_THRESHOLD {
        FeatureOutcome::Failed
    } else {
        FeatureOutcome::Works
    }
}
