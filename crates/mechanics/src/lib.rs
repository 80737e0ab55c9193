//! Physical model of a four-module swerve drivetrain.

pub mod config;
pub mod friction;
pub mod swerve;
pub mod wheel_module;

pub use config::{DrivetrainError, SwerveDrivetrainConfig};
pub use friction::{ConstantFriction, FrictionCoefficient, SkidBlendFriction};
pub use swerve::{SwerveDrivetrain, TorqueArm};
