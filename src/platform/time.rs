//! Frame scheduling
//!
//! The host reports real elapsed time per frame. The clock accumulates it and
//! allows at most one step per frame once a full step has built up. The step
//! consumes every whole step accumulated; only the remainder carries forward.

use crate::consts::STEP_MS;

#[derive(Debug, Clone)]
pub struct FrameClock {
    step_ms: f32,
    accumulated: f32,
    ticks: u64,
}

impl Default for FrameClock {
    fn default() -> Self {
        Self::new(STEP_MS)
    }
}

impl FrameClock {
    pub fn new(step_ms: f32) -> Self {
        Self {
            step_ms,
            accumulated: 0.0,
            ticks: 0,
        }
    }

    /// Feed one frame's elapsed time (ms). Returns the `dt` to tick with, if
    /// a step is due: every whole step accumulated so far, so timers track
    /// real time even after a stall.
    pub fn advance(&mut self, elapsed_ms: f32) -> Option<f32> {
        if !elapsed_ms.is_finite() || elapsed_ms <= 0.0 {
            return None;
        }
        self.accumulated += elapsed_ms;
        if self.accumulated < self.step_ms {
            return None;
        }
        let carried = self.accumulated % self.step_ms;
        let dt = self.accumulated - carried;
        self.accumulated = carried;
        self.ticks += 1;
        Some(dt)
    }

    /// Drop any partial step (e.g. after unpausing from a menu)
    pub fn reset(&mut self) {
        self.accumulated = 0.0;
    }

    pub fn ticks(&self) -> u64 {
        self.ticks
    }

    pub fn step_ms(&self) -> f32 {
        self.step_ms
    }
}
