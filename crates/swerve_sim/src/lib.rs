//! Swerve drive engine.
//!
//! Ties the drivetrain physics and the swerve controller to one robot state,
//! loaded from a flat JSON parameter record and stepped by caller timestamps.

pub mod config;
pub mod engine;
pub mod telemetry;

pub use config::{Config, ConfigError, FrictionModel};
pub use engine::SwerveDriveEngine;
pub use telemetry::{Telemetry, WheelTelemetry};
