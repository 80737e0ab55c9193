//! Per-module force model.
//!
//! Each module pushes along its steering angle with a force proportional to
//! its drive motor command, and loses a constant rolling resistance that
//! always points back against that push.

use std::f64::consts::PI;

use log::trace;
use simcore::{PerWheel, Vector, WheelState};

use crate::config::SwerveDrivetrainConfig;

/// Motor commands at or below this magnitude are treated as noise.
pub const MOTOR_DEAD_ZONE: f64 = 0.05;

/// Force a module produces for `motor_velocity` while steered to `swerve_position`.
///
/// The magnitude is signed: reverse commands push backwards along the heading.
pub fn drive_vector(
    config: &SwerveDrivetrainConfig,
    motor_velocity: f64,
    swerve_position: f64,
) -> Vector {
    if motor_velocity.abs() <= MOTOR_DEAD_ZONE {
        return Vector::zero();
    }
    // Power through an efficiency loss rather than a motor curve.
    let magnitude = config.voltage * config.max_current * motor_velocity
        * config.motor_efficiency
        / config.robot_weight;
    Vector::polar(magnitude, swerve_position)
}

/// Rolling resistance of one module, opposing its drive direction.
///
/// Uses the drive direction instead of the wheel's actual velocity, so a
/// module coasting sideways still sees resistance along its heading.
pub fn resistance_vector(config: &SwerveDrivetrainConfig, drive: &Vector) -> Vector {
    Vector::polar(
        config.robot_weight / 4.0 * config.rolling_friction,
        drive.direction() + PI,
    )
}

pub fn update_drive_vectors(config: &SwerveDrivetrainConfig, wheels: &mut PerWheel<WheelState>) {
    for (id, wheel) in wheels.iter_mut() {
        wheel.drive_vector = drive_vector(config, wheel.drive_motor_velocity, wheel.swerve_position);
        trace!(
            "{} drive vector: {:.4} @ {:.4}",
            id.label(),
            wheel.drive_vector.magnitude(),
            wheel.drive_vector.direction()
        );
    }
}

pub fn update_resistance_vectors(
    config: &SwerveDrivetrainConfig,
    wheels: &mut PerWheel<WheelState>,
) {
    for (_, wheel) in wheels.iter_mut() {
        wheel.resistance_vector = resistance_vector(config, &wheel.drive_vector);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use simcore::WheelId;

    #[test]
    fn test_dead_zone_zeroes_drive() {
        let config = SwerveDrivetrainConfig::default();
        for &command in &[0.0, 0.01, -0.04, 0.05, -0.05] {
            let v = drive_vector(&config, command, 1.2);
            assert_eq!(v.magnitude(), 0.0);
            assert_eq!(v.direction(), 0.0);
        }
        assert!(drive_vector(&config, 0.051, 0.0).magnitude() > 0.0);
    }

    #[test]
    fn test_drive_magnitude_follows_power_equation() {
        let config = SwerveDrivetrainConfig::default();
        let forward = drive_vector(&config, 1.0, 0.4);
        assert!((forward.magnitude() - 0.216).abs() < 1e-12);
        assert_eq!(forward.direction(), 0.4);

        let reverse = drive_vector(&config, -0.5, 0.4);
        assert!((reverse.magnitude() + 0.108).abs() < 1e-12);
    }

    #[test]
    fn test_resistance_opposes_drive_direction() {
        let config = SwerveDrivetrainConfig::default();
        for &heading in &[-3.0, -1.0, 0.0, 0.5, 2.9] {
            let drive = drive_vector(&config, 0.8, heading);
            let resistance = resistance_vector(&config, &drive);
            assert_eq!(resistance.direction(), drive.direction() + PI);
            assert!((resistance.magnitude() - 50.0 / 4.0 * 0.05).abs() < 1e-12);
        }
    }

    #[test]
    fn test_update_stages_touch_every_wheel() {
        let config = SwerveDrivetrainConfig::default();
        let mut wheels = PerWheel::<WheelState>::default();
        wheels[WheelId::FrontRight].drive_motor_velocity = 1.0;
        wheels[WheelId::BackLeft].drive_motor_velocity = -1.0;
        wheels[WheelId::BackLeft].swerve_position = 0.5;

        update_drive_vectors(&config, &mut wheels);
        update_resistance_vectors(&config, &mut wheels);

        assert!((wheels[WheelId::FrontRight].drive_vector.magnitude() - 0.216).abs() < 1e-12);
        assert_eq!(wheels[WheelId::BackRight].drive_vector.magnitude(), 0.0);
        assert_eq!(wheels[WheelId::BackLeft].drive_vector.direction(), 0.5);
        for (_, wheel) in wheels.iter() {
            assert_eq!(
                wheel.resistance_vector.direction(),
                wheel.drive_vector.direction() + PI
            );
        }
    }
}
