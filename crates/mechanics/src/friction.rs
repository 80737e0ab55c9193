//! Frame-level friction.
//!
//! The ground resists the whole frame with a force proportional to its
//! weight. How grippy each module is depends on its slip angle, the angle
//! between where the module points and where the frame is being pushed; that
//! dependency is a [`FrictionCoefficient`] strategy so richer tyre models can
//! be dropped in without touching the aggregator.

use std::f64::consts::PI;
use std::fmt::Debug;

use nalgebra::Vector2;
use simcore::{heading, PerWheel, Vector, WheelState};

use crate::config::SwerveDrivetrainConfig;

/// Maps a module's slip angle (radians) to a friction coefficient.
pub trait FrictionCoefficient: Debug + Send + Sync {
    fn coefficient(&self, slip_angle: f64) -> f64;

    /// Clone this strategy into a boxed trait object
    fn box_clone(&self) -> Box<dyn FrictionCoefficient>;
}

impl Clone for Box<dyn FrictionCoefficient> {
    fn clone(&self) -> Self {
        self.box_clone()
    }
}

/// Slip-independent friction; every module rolls with the same coefficient.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ConstantFriction {
    pub coefficient: f64,
}

impl ConstantFriction {
    pub fn new(coefficient: f64) -> Self {
        ConstantFriction { coefficient }
    }
}

impl FrictionCoefficient for ConstantFriction {
    fn coefficient(&self, _slip_angle: f64) -> f64 {
        self.coefficient
    }

    fn box_clone(&self) -> Box<dyn FrictionCoefficient> {
        Box::new(*self)
    }
}

/// Blends from rolling friction (wheel aligned with the push) to skid
/// friction (wheel perpendicular to it) by `|sin(slip)|`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SkidBlendFriction {
    pub rolling: f64,
    pub skid: f64,
}

impl SkidBlendFriction {
    pub fn from_config(config: &SwerveDrivetrainConfig) -> Self {
        SkidBlendFriction {
            rolling: config.rolling_friction,
            skid: config.wheel_skid_friction,
        }
    }
}

impl FrictionCoefficient for SkidBlendFriction {
    fn coefficient(&self, slip_angle: f64) -> f64 {
        let sideways = slip_angle.sin().abs();
        self.rolling + (self.skid - self.rolling) * sideways
    }

    fn box_clone(&self) -> Box<dyn FrictionCoefficient> {
        Box::new(*self)
    }
}

/// Friction on the frame's translation.
///
/// Points against `velocity`; its magnitude sums each module's share of the
/// weight times the coefficient at that module's slip angle relative to
/// `force_direction`.
pub fn frame_friction(
    config: &SwerveDrivetrainConfig,
    friction: &dyn FrictionCoefficient,
    wheels: &PerWheel<WheelState>,
    force_direction: f64,
    velocity: Vector2<f64>,
) -> Vector {
    let magnitude: f64 = wheels
        .values()
        .map(|wheel| {
            let slip = wheel.swerve_position - force_direction;
            friction.coefficient(slip) * config.gravity * config.robot_weight / 4.0
        })
        .sum();
    Vector::polar(magnitude, heading(velocity[1], velocity[0]) + PI)
}

/// Signed friction on the yaw axis: opposes `yaw_velocity`, zero at rest.
pub fn yaw_friction(config: &SwerveDrivetrainConfig, yaw_velocity: f64) -> f64 {
    if yaw_velocity == 0.0 {
        return 0.0;
    }
    let magnitude = config.gravity * config.robot_weight * config.rolling_friction / 2.0;
    -magnitude * yaw_velocity.signum()
}
