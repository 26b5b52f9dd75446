//! Process-start timestamp and the readiness gate.

use std::time::{Duration, Instant};

use time::format_description::well_known::Rfc3339;
use time::OffsetDateTime;

/// Moment the process started, captured once at boot.
///
/// Readiness is measured on the monotonic [`Instant`]; the wall-clock time
/// is only reported.
#[derive(Debug, Clone, Copy)]
pub struct StartupClock {
    started: Instant,
    started_at: OffsetDateTime,
}

impl StartupClock {
    /// Capture the current moment as the process start.
    pub fn start() -> Self {
        Self {
            started: Instant::now(),
            started_at: OffsetDateTime::now_utc(),
        }
    }

    /// Clock that started at a given monotonic instant.
    pub fn started_at(started: Instant, started_at: OffsetDateTime) -> Self {
        Self {
            started,
            started_at,
        }
    }

    /// Time since start, measured at `now`. Zero if `now` precedes start.
    pub fn elapsed_at(&self, now: Instant) -> Duration {
        now.saturating_duration_since(self.started)
    }

    /// Time since start, measured now.
    pub fn elapsed(&self) -> Duration {
        self.elapsed_at(Instant::now())
    }

    /// Whether `boot_delay` has passed at `now`. Exactly equal counts as ready.
    pub fn is_ready_at(&self, boot_delay: Duration, now: Instant) -> bool {
        self.elapsed_at(now) >= boot_delay
    }

    /// Whether `boot_delay` has passed, measured now.
    pub fn is_ready(&self, boot_delay: Duration) -> bool {
        self.is_ready_at(boot_delay, Instant::now())
    }

    /// Wall-clock start time formatted as RFC 3339.
    pub fn started_at_rfc3339(&self) -> String {
        self.started_at
            .format(&Rfc3339)
            .unwrap_or_default()
    }
}

impl Default for StartupClock {
    fn default() -> Self {
        Self::start()
    }
}
