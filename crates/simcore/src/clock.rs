//! Time sources for driving the simulation.
//!
//! The engine itself only ever sees plain `f64` timestamps in seconds; a
//! [`Clock`] is how a caller produces them. Tests and batch runs use
//! [`ManualClock`] so every tick is reproducible.

use std::time::Instant;

pub trait Clock {
    /// Seconds since the clock's epoch.
    fn now(&self) -> f64;
}

/// Wall-clock time measured from construction.
#[derive(Debug, Clone, Copy)]
pub struct SystemClock {
    epoch: Instant,
}

impl SystemClock {
    pub fn new() -> Self {
        SystemClock {
            epoch: Instant::now(),
        }
    }
}

impl Default for SystemClock {
    fn default() -> Self {
        Self::new()
    }
}

impl Clock for SystemClock {
    fn now(&self) -> f64 {
        self.epoch.elapsed().as_secs_f64()
    }
}

/// A clock that only moves when told to.
#[derive(Debug, Clone, Copy, Default)]
pub struct ManualClock {
    t: f64,
}

impl ManualClock {
    pub fn starting_at(t: f64) -> Self {
        ManualClock { t }
    }

    pub fn advance(&mut self, dt: f64) -> f64 {
        self.t += dt;
        self.t
    }

    pub fn set(&mut self, t: f64) {
        self.t = t;
    }
}

impl Clock for ManualClock {
    fn now(&self) -> f64 {
        self.t
    }
}
