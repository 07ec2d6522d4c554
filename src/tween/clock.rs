//! Time sources for the tween scheduler
//!
//! Timestamps are milliseconds from an arbitrary monotonic origin.

use std::cell::Cell;
use std::rc::Rc;

/// Monotonic millisecond clock
pub trait Clock {
    fn now_ms(&self) -> f64;
}

/// Macroquad's frame clock (seconds since startup, scaled to ms).
///
/// Only valid inside a running macroquad context.
#[derive(Debug, Clone, Copy, Default)]
pub struct FrameClock;

impl Clock for FrameClock {
    fn now_ms(&self) -> f64 {
        macroquad::time::get_time() * 1000.0
    }
}

/// Hand-driven clock for tests and headless simulation.
///
/// Clones share the same time, so a test can keep one handle and
/// give another to the scheduler.
#[derive(Debug, Clone, Default)]
pub struct ManualClock {
    now: Rc<Cell<f64>>,
}

impl ManualClock {
    pub fn new(start_ms: f64) -> Self {
        Self { now: Rc::new(Cell::new(start_ms)) }
    }

    pub fn set(&self, now_ms: f64) {
        self.now.set(now_ms);
    }

    /// Move time forward by `dt_ms`, returning the new time
    pub fn advance(&self, dt_ms: f64) -> f64 {
        let next = self.now.get() + dt_ms;
        self.now.set(next);
        next
    }
}

impl Clock for ManualClock {
    fn now_ms(&self) -> f64 {
        self.now.get()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_manual_clock_shared() {
        let clock = ManualClock::new(0.0);
        let handle = clock.clone();

        handle.set(250.0);
        assert_eq!(clock.now_ms(), 250.0);

        assert_eq!(clock.advance(16.0), 266.0);
        assert_eq!(handle.now_ms(), 266.0);
    }
}
