//! Control systems for the swerve drive
//!
//! This crate provides:
//! - PID controllers for closed-loop control
//! - The swerve controller: input conditioning, arcade drive mix and shared steering loop

pub mod pid;
pub mod swerve_ctrl;

pub use pid::*;
pub use swerve_ctrl::*;
