use nalgebra::Vector2;
use serde::{Deserialize, Serialize};

use crate::vector::Vector;
use crate::wheel::PerWheel;

// Mechanical State

/// Robot position on the field: x, y and heading (radians).
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Pose {
    pub x: f64,
    pub y: f64,
    pub heading: f64,
}

impl Pose {
    pub fn new(x: f64, y: f64, heading: f64) -> Self {
        Pose { x, y, heading }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct WheelState {
    /// Normalised drive motor command.
    pub drive_motor_velocity: f64,
    /// Steering motor angular velocity (rad/s).
    pub swerve_motor_velocity: f64,
    /// Steering angle of the module (rad).
    pub swerve_position: f64,
    /// Distance rolled along the wheel heading.
    pub linear_position: f64,
    pub drive_vector: Vector,
    pub resistance_vector: Vector,
    pub velocity: Vector2<f64>,
}

#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct FrameState {
    pub pose: Pose,
    pub velocity: Vector2<f64>,
    pub yaw_velocity: f64,
    pub yaw_acceleration: f64,
    /// Signed yaw friction, always opposing `yaw_velocity`.
    pub yaw_friction: f64,
    /// Net planar force on the frame.
    pub drive_vector: Vector,
    pub friction_vector: Vector,
}

impl FrameState {
    pub fn at(pose: Pose) -> Self {
        FrameState {
            pose,
            ..Default::default()
        }
    }
}

// Control State

/// Raw driver axes for one tick: translation `x`, `y` and twist `z`, each in [-1, 1].
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct DriveCommand {
    pub x: f64,
    pub y: f64,
    pub z: f64,
}

impl DriveCommand {
    pub fn new(x: f64, y: f64, z: f64) -> Self {
        DriveCommand { x, y, z }
    }
}

// General State

#[derive(Debug, Clone, Default)]
pub struct SimState {
    pub frame: FrameState,
    pub wheels: PerWheel<WheelState>,
    pub control_input: DriveCommand,
    /// Heading the steering loop is driving every module towards.
    pub swerve_target: f64,
}

impl SimState {
    pub fn at(pose: Pose) -> Self {
        SimState {
            frame: FrameState::at(pose),
            ..Default::default()
        }
    }
}

#[derive(Debug, Clone, Copy)]
pub struct SimContext {
    pub dt: f64,
    pub t: f64,
}

pub trait Model {
    fn reset(&mut self);
}

pub trait MechanicsModel: Model {
    fn step_physics(&mut self, ctx: SimContext, state: &mut SimState);
}

pub trait ControlModel: Model {
    fn step_control(&mut self, ctx: SimContext, state: &mut SimState);
}
