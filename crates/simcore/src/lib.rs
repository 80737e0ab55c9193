//! Core types shared by the swerve drive simulation crates.
//!
//! - [`Vector`]: planar vector with synchronised polar and Cartesian forms
//! - [`WheelId`] / [`PerWheel`]: fixed four-module indexing
//! - [`SimState`] and the model traits every stage implements
//! - [`ClampedEuler`]: velocity/position integration with the friction clamp
//! - [`Clock`]s for producing tick timestamps

pub mod clock;
pub mod error;
pub mod integrators;
pub mod traits;
pub mod vector;
pub mod wheel;

pub use clock::*;
pub use error::*;
pub use integrators::*;
pub use traits::*;
pub use vector::*;
pub use wheel::*;
