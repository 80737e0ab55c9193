//! Timed joystick scripts for batch runs.

use rand::SeedableRng;
use rand::rngs::StdRng;
use rand_distr::{Distribution, Normal, NormalError};
use simcore::DriveCommand;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum NoiseError {
    #[error("noise standard deviation must be finite and non-negative, got {0}")]
    InvalidStdDev(f64),

    #[error(transparent)]
    Normal(#[from] NormalError),
}

/// Hold one joystick command for `duration` seconds.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DriveSegment {
    pub command: DriveCommand,
    pub duration: f64,
}

impl DriveSegment {
    pub fn new(x: f64, y: f64, z: f64, duration: f64) -> Self {
        DriveSegment {
            command: DriveCommand::new(x, y, z),
            duration,
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct DriveScript {
    segments: Vec<DriveSegment>,
}

impl DriveScript {
    pub fn new(segments: Vec<DriveSegment>) -> Self {
        DriveScript { segments }
    }

    /// Forward, sideways, spin in place, then coast.
    pub fn demo() -> Self {
        DriveScript::new(vec![
            DriveSegment::new(0.0, 1.0, 0.0, 2.0),
            DriveSegment::new(1.0, 0.0, 0.0, 2.0),
            DriveSegment::new(0.0, 0.0, 0.5, 2.0),
            DriveSegment::new(0.7, 0.7, -0.5, 2.0),
            DriveSegment::new(0.0, 0.0, 0.0, 1.0),
        ])
    }

    pub fn duration(&self) -> f64 {
        self.segments.iter().map(|s| s.duration).sum()
    }

    /// Command active at `t` seconds into the script; idle once it has run out.
    pub fn command_at(&self, t: f64) -> DriveCommand {
        let mut start = 0.0;
        for segment in &self.segments {
            if t < start + segment.duration {
                return segment.command;
            }
            start += segment.duration;
        }
        DriveCommand::default()
    }
}

/// Gaussian jitter added to every axis, clamped back into the joystick range.
#[derive(Debug, Clone)]
pub struct JoystickNoise {
    normal: Normal<f64>,
    rng: StdRng,
}

impl JoystickNoise {
    pub fn new(std_dev: f64, seed: u64) -> Result<Self, NoiseError> {
        if !std_dev.is_finite() || std_dev < 0.0 {
            return Err(NoiseError::InvalidStdDev(std_dev));
        }
        Ok(JoystickNoise {
            normal: Normal::new(0.0, std_dev)?,
            rng: StdRng::seed_from_u64(seed),
        })
    }

    pub fn apply(&mut self, command: DriveCommand) -> DriveCommand {
        let mut jitter = |axis: f64| (axis + self.normal.sample(&mut self.rng)).clamp(-1.0, 1.0);
        DriveCommand {
            x: jitter(command.x),
            y: jitter(command.y),
            z: jitter(command.z),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_command_lookup() {
        let script = DriveScript::demo();
        assert_eq!(script.duration(), 9.0);
        assert_eq!(script.command_at(0.0), DriveCommand::new(0.0, 1.0, 0.0));
        assert_eq!(script.command_at(2.0), DriveCommand::new(1.0, 0.0, 0.0));
        assert_eq!(script.command_at(5.5), DriveCommand::new(0.0, 0.0, 0.5));
        assert_eq!(script.command_at(100.0), DriveCommand::default());
    }

    #[test]
    fn test_noise_stays_in_range_and_is_seeded() {
        let mut a = JoystickNoise::new(0.5, 7).unwrap();
        let mut b = JoystickNoise::new(0.5, 7).unwrap();
        for _ in 0..100 {
            let command = DriveCommand::new(1.0, -1.0, 0.0);
            let noisy = a.apply(command);
            assert_eq!(noisy, b.apply(command));
            assert!(noisy.x <= 1.0 && noisy.y >= -1.0 && noisy.z.abs() <= 1.0);
        }
    }

    #[test]
    fn test_bad_std_dev_is_rejected() {
        assert!(matches!(
            JoystickNoise::new(-1.0, 0),
            Err(NoiseError::InvalidStdDev(_))
        ));
        assert!(JoystickNoise::new(f64::NAN, 0).is_err());
        assert!(JoystickNoise::new(f64::INFINITY, 0).is_err());
        assert!(JoystickNoise::new(0.0, 0).is_ok());
    }
}
