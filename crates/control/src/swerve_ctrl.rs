//! Swerve Controller
//!
//! Turns driver axes into module commands. Translation magnitude and twist
//! go to the drive motors through an arcade mix; translation direction
//! becomes the steering target, chased by a single steering PID whose output
//! drives all four steering motors together.

use log::{trace, warn};
use simcore::{heading, ControlModel, DriveCommand, Model, PerWheel, SimContext, SimState, WheelId};

use crate::pid::{PidConfig, PidController};

/// Decimal places driver axes are rounded to before use.
pub const DEFAULT_ROUND_DIGITS: u32 = 2;

/// Finest rounding that still leaves the scale factor finite.
pub const MAX_ROUND_DIGITS: u32 = 15;

/// Round to `digits` decimal places to drop joystick jitter.
///
/// Precision beyond [`MAX_ROUND_DIGITS`] is treated as `MAX_ROUND_DIGITS`.
pub fn round_to(value: f64, digits: u32) -> f64 {
    let scale = 10f64.powi(digits.min(MAX_ROUND_DIGITS) as i32);
    (value * scale).round() / scale
}

/// Polar form of a driver command.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DriveDemand {
    pub magnitude: f64,
    pub direction: f64,
    pub twist: f64,
}

impl DriveDemand {
    pub fn from_command(command: &DriveCommand) -> Self {
        DriveDemand {
            magnitude: command.x.hypot(command.y),
            direction: heading(command.y, command.x),
            twist: command.z,
        }
    }
}

/// Arcade mix: the right pair gets `twist + magnitude`, the left pair `twist - magnitude`.
pub fn arcade_drive(twist: f64, magnitude: f64) -> PerWheel<f64> {
    PerWheel::from_fn(|wheel| {
        if wheel.is_right() {
            twist + magnitude
        } else {
            twist - magnitude
        }
    })
}

fn sanitize(axis: &'static str, value: f64) -> f64 {
    if value.is_finite() {
        value
    } else {
        warn!("ignoring non-finite {axis} axis value {value}");
        0.0
    }
}

#[derive(Debug, Clone)]
pub struct SwerveController {
    steering: PidController,
    round_digits: u32,
    /// Module whose steering angle stands in for all four.
    reference_wheel: WheelId,
}

impl SwerveController {
    pub fn new(steering: PidConfig) -> Self {
        Self {
            steering: PidController::new(steering),
            round_digits: DEFAULT_ROUND_DIGITS,
            reference_wheel: WheelId::FrontRight,
        }
    }

    pub fn set_round_digits(&mut self, digits: u32) {
        if digits > MAX_ROUND_DIGITS {
            warn!("rounding to {digits} digits is finer than f64 holds; using {MAX_ROUND_DIGITS}");
        }
        self.round_digits = digits.min(MAX_ROUND_DIGITS);
    }

    pub fn round_digits(&self) -> u32 {
        self.round_digits
    }

    pub fn steering(&self) -> &PidController {
        &self.steering
    }

    pub fn steering_mut(&mut self) -> &mut PidController {
        &mut self.steering
    }

    /// Rounded, finite copy of a raw driver command.
    pub fn condition(&self, command: &DriveCommand) -> DriveCommand {
        DriveCommand {
            x: round_to(sanitize("x", command.x), self.round_digits),
            y: round_to(sanitize("y", command.y), self.round_digits),
            z: round_to(sanitize("z", command.z), self.round_digits),
        }
    }

    /// Run the steering loop towards `target` at time `now`; returns the steering motor command.
    pub fn steer_to(&mut self, target: f64, state: &mut SimState, now: f64) -> f64 {
        state.swerve_target = target;
        let error = target - state.wheels[self.reference_wheel].swerve_position;
        let velocity = self.steering.update(error, now);
        for (_, wheel) in state.wheels.iter_mut() {
            wheel.swerve_motor_velocity = velocity;
        }
        velocity
    }
}

impl Model for SwerveController {
    fn reset(&mut self) {
        self.steering.reset();
    }
}

impl ControlModel for SwerveController {
    fn step_control(&mut self, ctx: SimContext, state: &mut SimState) {
        let command = self.condition(&state.control_input);
        let demand = DriveDemand::from_command(&command);

        let drive = arcade_drive(demand.twist, demand.magnitude);
        for (id, wheel) in state.wheels.iter_mut() {
            wheel.drive_motor_velocity = drive[id];
        }

        let steer = self.steer_to(demand.direction, state, ctx.t);
        trace!(
            "command ({:.2}, {:.2}, {:.2}) -> drive {:.3}/{:.3}, steer target {:.4} at {:.4} rad/s",
            command.x,
            command.y,
            command.z,
            drive[WheelId::FrontRight],
            drive[WheelId::FrontLeft],
            demand.direction,
            steer
        );
    }
}
