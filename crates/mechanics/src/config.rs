use serde::{Deserialize, Serialize};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum DrivetrainError {
    #[error("{field} must be finite, got {value}")]
    NotFinite { field: &'static str, value: f64 },

    #[error("{field} = {value} is out of range: {expected}")]
    OutOfRange {
        field: &'static str,
        value: f64,
        expected: &'static str,
    },
}

/// Physical constants of the robot, fixed for the lifetime of a drivetrain.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SwerveDrivetrainConfig {
    /// Supply voltage (V).
    pub voltage: f64,
    /// Current limit of a drive motor (A).
    pub max_current: f64,
    /// Robot weight, also used as the mass term of the drive force.
    pub robot_weight: f64,
    /// Fraction of electrical power reaching the ground (0, 1].
    pub motor_efficiency: f64,
    pub rolling_friction: f64,
    /// Friction coefficient of a wheel sliding sideways.
    pub wheel_skid_friction: f64,
    pub gravity: f64,
    /// Half the track width; modules sit at (±x, ±y).
    pub wheel_offset: [f64; 2],
    /// Centre of gravity relative to the frame centre.
    pub cg_offset: [f64; 2],
}

impl Default for SwerveDrivetrainConfig {
    fn default() -> Self {
        SwerveDrivetrainConfig {
            voltage: 12.0,
            max_current: 1.0,
            robot_weight: 50.0,
            motor_efficiency: 0.9,
            rolling_friction: 0.05,
            wheel_skid_friction: 0.7,
            gravity: 9.8,
            wheel_offset: [0.3, 0.3],
            cg_offset: [0.0, 0.0],
        }
    }
}

fn finite(field: &'static str, value: f64) -> Result<f64, DrivetrainError> {
    if value.is_finite() {
        Ok(value)
    } else {
        Err(DrivetrainError::NotFinite { field, value })
    }
}

fn require(
    field: &'static str,
    value: f64,
    ok: bool,
    expected: &'static str,
) -> Result<(), DrivetrainError> {
    if ok {
        Ok(())
    } else {
        Err(DrivetrainError::OutOfRange {
            field,
            value,
            expected,
        })
    }
}

impl SwerveDrivetrainConfig {
    /// Power a drive motor delivers at full command, per unit of robot weight.
    pub fn drive_gain(&self) -> f64 {
        self.voltage * self.max_current * self.motor_efficiency / self.robot_weight
    }

    pub fn validate(&self) -> Result<(), DrivetrainError> {
        let voltage = finite("voltage", self.voltage)?;
        require("voltage", voltage, voltage > 0.0, "> 0")?;

        let max_current = finite("max_current", self.max_current)?;
        require("max_current", max_current, max_current >= 0.0, ">= 0")?;

        let weight = finite("robot_weight", self.robot_weight)?;
        require("robot_weight", weight, weight > 0.0, "> 0")?;

        let efficiency = finite("motor_efficiency", self.motor_efficiency)?;
        require(
            "motor_efficiency",
            efficiency,
            efficiency > 0.0 && efficiency <= 1.0,
            "in (0, 1]",
        )?;

        let rolling = finite("rolling_friction", self.rolling_friction)?;
        require("rolling_friction", rolling, rolling >= 0.0, ">= 0")?;

        let skid = finite("wheel_skid_friction", self.wheel_skid_friction)?;
        require("wheel_skid_friction", skid, skid >= 0.0, ">= 0")?;

        let gravity = finite("gravity", self.gravity)?;
        require("gravity", gravity, gravity > 0.0, "> 0")?;

        finite("wheel_offset_x", self.wheel_offset[0])?;
        finite("wheel_offset_y", self.wheel_offset[1])?;
        finite("cg_offset_x", self.cg_offset[0])?;
        finite("cg_offset_y", self.cg_offset[1])?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_is_valid() {
        assert!(SwerveDrivetrainConfig::default().validate().is_ok());
    }

    #[test]
    fn test_drive_gain() {
        let config = SwerveDrivetrainConfig::default();
        assert!((config.drive_gain() - 0.216).abs() < 1e-12);
    }

    #[test]
    fn test_rejects_non_positive_weight() {
        let config = SwerveDrivetrainConfig {
            robot_weight: 0.0,
            ..Default::default()
        };
        let err = config.validate().unwrap_err();
        assert!(err.to_string().contains("robot_weight"));
    }

    #[test]
    fn test_rejects_nan_offsets() {
        let config = SwerveDrivetrainConfig {
            cg_offset: [f64::NAN, 0.0],
            ..Default::default()
        };
        assert!(matches!(
            config.validate(),
            Err(DrivetrainError::NotFinite { field: "cg_offset_x", .. })
        ));
    }

    #[test]
    fn test_rejects_efficiency_above_one() {
        let config = SwerveDrivetrainConfig {
            motor_efficiency: 1.2,
            ..Default::default()
        };
        assert!(matches!(
            config.validate(),
            Err(DrivetrainError::OutOfRange { field: "motor_efficiency", .. })
        ));
    }
}
