//! Deterministic randomness sources for testing.
//!
//! These replace [`ThreadRandom`](super::ThreadRandom) so both branches of the
//! feature endpoint can be asserted without relying on statistics.

use std::sync::atomic::{AtomicUsize, Ordering};

use super::feature::RandomSource;

/// Always returns the same value.
#[derive(Debug, Clone, Copy)]
pub struct FixedDraw(pub f64);

impl RandomSource for FixedDraw {
    fn draw(&self) -> f64 {
        self.0
    }
}

/// Replays a fixed sequence of values, wrapping around at the end.
#[derive(Debug)]
pub struct ScriptedDraws {
    values: Vec<f64>,
    next: AtomicUsize,
}

impl ScriptedDraws {
    /// Create a scripted source. An empty script always draws `0.0`.
    pub fn new(values: Vec<f64>) -> Self {
        Self {
            values,
            next: AtomicUsize::new(0),
        }
    }

    /// Number of draws taken so far.
    pub fn draws_taken(&self) -> usize {
        self.next.load(Ordering::SeqCst)
    }
}

impl RandomSource for ScriptedDraws {
    fn draw(&self) -> f64 {
        if self.values.is_empty() {
            return 0.0;
        }
        let index = self.next.fetch_add(1, Ordering::SeqCst);
        self.values[index % self.values.len()]
    }
}
