//! PID Controller
//!
//! Timestamp-driven PID loop with trapezoidal integration and an overall
//! output gain.

use log::warn;
use serde::{Deserialize, Serialize};
use simcore::Model;

fn unit_gain() -> f64 {
    1.0
}

/// Gains for a PID controller
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PidConfig {
    /// Proportional gain
    pub kp: f64,
    /// Integral gain
    pub ki: f64,
    /// Derivative gain
    pub kd: f64,
    /// Gain applied to the summed output
    #[serde(default = "unit_gain")]
    pub k: f64,
}

impl Default for PidConfig {
    fn default() -> Self {
        Self {
            kp: 0.0,
            ki: 0.0,
            kd: 0.0,
            k: 1.0,
        }
    }
}

impl PidConfig {
    /// Create a P-only controller
    pub fn p(kp: f64) -> Self {
        Self { kp, ..Default::default() }
    }

    /// Create a PID controller
    pub fn pid(kp: f64, ki: f64, kd: f64) -> Self {
        Self { kp, ki, kd, ..Default::default() }
    }

    /// Set the output gain
    pub fn with_output_gain(mut self, k: f64) -> Self {
        self.k = k;
        self
    }
}

/// PID controller with state
///
/// The first update has no history: it returns the proportional term alone
/// and records the sample. Later updates integrate with the trapezoid rule
/// and differentiate against the previous sample. A non-positive time step
/// contributes neither integral nor derivative.
#[derive(Debug, Clone)]
pub struct PidController {
    config: PidConfig,
    integral: f64,
    last_error: Option<f64>,
    last_timestamp: Option<f64>,
}

impl PidController {
    /// Create a new controller with the given gains
    pub fn new(config: PidConfig) -> Self {
        Self {
            config,
            integral: 0.0,
            last_error: None,
            last_timestamp: None,
        }
    }

    /// Feed the current error observed at time `now` (seconds) and return the control output
    pub fn update(&mut self, error: f64, now: f64) -> f64 {
        let p_term = self.config.kp * error;

        let (i_term, d_term) = match (self.last_error, self.last_timestamp) {
            (Some(last_error), Some(last_timestamp)) => {
                let delta_time = now - last_timestamp;
                let delta_error = error - last_error;
                if delta_time > 0.0 {
                    self.integral += delta_time * delta_error / 2.0 + last_error * delta_time;
                    let d_term = self.config.kd * delta_error / delta_time;
                    (self.config.ki * self.integral, d_term)
                } else {
                    if delta_time < 0.0 {
                        warn!("PID update went back in time by {:.6}s", -delta_time);
                    }
                    (self.config.ki * self.integral, 0.0)
                }
            }
            _ => (0.0, 0.0),
        };

        self.last_error = Some(error);
        self.last_timestamp = Some(now);

        (p_term + i_term + d_term) * self.config.k
    }

    /// Change any subset of the gains without disturbing the integral
    pub fn tune(&mut self, p: Option<f64>, i: Option<f64>, d: Option<f64>) {
        if let Some(p) = p {
            self.config.kp = p;
        }
        if let Some(i) = i {
            self.config.ki = i;
        }
        if let Some(d) = d {
            self.config.kd = d;
        }
    }

    /// Zero the integral accumulator, keeping history
    pub fn reset_integral(&mut self) {
        self.integral = 0.0;
    }

    /// Get the current integral accumulator value
    pub fn integral(&self) -> f64 {
        self.integral
    }

    pub fn last_error(&self) -> Option<f64> {
        self.last_error
    }

    /// Get a reference to the gains
    pub fn config(&self) -> &PidConfig {
        &self.config
    }
}

impl Model for PidController {
    fn reset(&mut self) {
        self.integral = 0.0;
        self.last_error = None;
        self.last_timestamp = None;
    }
}
