//! Persisted robot parameters.
//!
//! The record is a flat JSON object, one key per parameter, loaded once
//! before the engine is built. Every key except `swerve_k` and
//! `friction_model` is required; unknown keys are rejected so a typo cannot
//! silently fall back to a default.

use std::fs;
use std::path::{Path, PathBuf};

use control::PidConfig;
use log::info;
use mechanics::{
    ConstantFriction, DrivetrainError, FrictionCoefficient, SkidBlendFriction,
    SwerveDrivetrainConfig,
};
use serde::{Deserialize, Serialize};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("malformed config: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("invalid config: {0}")]
    Invalid(#[from] DrivetrainError),

    #[error("invalid config: {field} must be finite, got {value}")]
    InvalidGain { field: &'static str, value: f64 },
}

/// How module friction depends on slip angle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FrictionModel {
    /// `rolling_friction` regardless of slip.
    #[default]
    Constant,
    /// Rolling friction blending into `wheel_skid_friction` as modules turn sideways.
    SkidBlend,
}

fn unit_gain() -> f64 {
    1.0
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Config {
    pub voltage: f64,
    pub max_current: f64,
    pub robot_weight: f64,
    pub motor_efficiency: f64,
    pub rolling_friction: f64,
    pub wheel_skid_friction: f64,
    pub gravity: f64,
    pub wheel_offset_x: f64,
    pub wheel_offset_y: f64,
    pub cg_offset_x: f64,
    pub cg_offset_y: f64,
    pub swerve_p: f64,
    pub swerve_i: f64,
    pub swerve_d: f64,
    #[serde(default = "unit_gain")]
    pub swerve_k: f64,
    #[serde(default)]
    pub friction_model: FrictionModel,
}

impl Default for Config {
    fn default() -> Self {
        Config {
            voltage: 12.0,
            max_current: 1.0,
            robot_weight: 50.0,
            motor_efficiency: 0.9,
            rolling_friction: 0.05,
            wheel_skid_friction: 0.7,
            gravity: 9.8,
            wheel_offset_x: 0.3,
            wheel_offset_y: 0.3,
            cg_offset_x: 0.0,
            cg_offset_y: 0.0,
            swerve_p: 1.0,
            swerve_i: 0.0,
            swerve_d: 0.0,
            swerve_k: 1.0,
            friction_model: FrictionModel::Constant,
        }
    }
}

impl Config {
    /// Parse and validate a JSON record.
    pub fn from_json_str(json: &str) -> Result<Self, ConfigError> {
        let config: Config = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let json = fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let config = Self::from_json_str(&json)?;
        info!("loaded robot parameters from {}", path.display());
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        self.drivetrain().validate()?;
        let gains = [
            ("swerve_p", self.swerve_p),
            ("swerve_i", self.swerve_i),
            ("swerve_d", self.swerve_d),
            ("swerve_k", self.swerve_k),
        ];
        for (field, value) in gains {
            if !value.is_finite() {
                return Err(ConfigError::InvalidGain { field, value });
            }
        }
        Ok(())
    }

    pub fn drivetrain(&self) -> SwerveDrivetrainConfig {
        SwerveDrivetrainConfig {
            voltage: self.voltage,
            max_current: self.max_current,
            robot_weight: self.robot_weight,
            motor_efficiency: self.motor_efficiency,
            rolling_friction: self.rolling_friction,
            wheel_skid_friction: self.wheel_skid_friction,
            gravity: self.gravity,
            wheel_offset: [self.wheel_offset_x, self.wheel_offset_y],
            cg_offset: [self.cg_offset_x, self.cg_offset_y],
        }
    }

    pub fn steering_gains(&self) -> PidConfig {
        PidConfig::pid(self.swerve_p, self.swerve_i, self.swerve_d).with_output_gain(self.swerve_k)
    }

    pub fn friction_strategy(&self) -> Box<dyn FrictionCoefficient> {
        match self.friction_model {
            FrictionModel::Constant => Box::new(ConstantFriction::new(self.rolling_friction)),
            FrictionModel::SkidBlend => Box::new(SkidBlendFriction::from_config(&self.drivetrain())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const PARAMS: &str = r#"{
        "voltage": 12,
        "max_current": 1,
        "robot_weight": 50,
        "motor_efficiency": 0.9,
        "rolling_friction": 0.05,
        "wheel_skid_friction": 0.7,
        "gravity": 9.8,
        "wheel_offset_x": 0.3,
        "wheel_offset_y": 0.25,
        "cg_offset_x": 0.0,
        "cg_offset_y": 0.02,
        "swerve_p": 1.5,
        "swerve_i": 0.1,
        "swerve_d": 0.0
    }"#;

    #[test]
    fn test_parses_flat_record() {
        let config = Config::from_json_str(PARAMS).unwrap();
        assert_eq!(config.voltage, 12.0);
        assert_eq!(config.swerve_k, 1.0);
        assert_eq!(config.friction_model, FrictionModel::Constant);

        let drivetrain = config.drivetrain();
        assert_eq!(drivetrain.wheel_offset, [0.3, 0.25]);
        assert_eq!(drivetrain.cg_offset, [0.0, 0.02]);

        let gains = config.steering_gains();
        assert_eq!(gains.kp, 1.5);
        assert_eq!(gains.ki, 0.1);
    }

    #[test]
    fn test_missing_field_is_fatal() {
        let json = PARAMS.replace("\"gravity\": 9.8,", "");
        let err = Config::from_json_str(&json).unwrap_err();
        assert!(matches!(err, ConfigError::Parse(_)));
        assert!(err.to_string().contains("gravity"));
    }

    #[test]
    fn test_unknown_field_is_rejected() {
        let json = PARAMS.replace("\"swerve_d\": 0.0", "\"swerve_d\": 0.0, \"motor_efficency\": 0.9");
        assert!(matches!(Config::from_json_str(&json), Err(ConfigError::Parse(_))));
    }

    #[test]
    fn test_out_of_range_value_is_fatal() {
        let json = PARAMS.replace("\"robot_weight\": 50", "\"robot_weight\": -1");
        let err = Config::from_json_str(&json).unwrap_err();
        assert!(matches!(err, ConfigError::Invalid(_)));
    }

    #[test]
    fn test_non_finite_gain_is_fatal() {
        let config = Config {
            swerve_k: f64::INFINITY,
            ..Default::default()
        };
        assert!(matches!(
            config.validate(),
            Err(ConfigError::InvalidGain { field: "swerve_k", .. })
        ));
    }

    #[test]
    fn test_friction_model_selection() {
        let json = PARAMS.replace("\"swerve_d\": 0.0", "\"swerve_d\": 0.0, \"friction_model\": \"skid_blend\"");
        let config = Config::from_json_str(&json).unwrap();
        let strategy = config.friction_strategy();
        assert!((strategy.coefficient(std::f64::consts::FRAC_PI_2) - 0.7).abs() < 1e-12);
        assert!((Config::default().friction_strategy().coefficient(1.0) - 0.05).abs() < 1e-12);
    }

    #[test]
    fn test_missing_file_reports_path() {
        let err = Config::load("/nonexistent/params.json").unwrap_err();
        assert!(err.to_string().contains("/nonexistent/params.json"));
    }
}
