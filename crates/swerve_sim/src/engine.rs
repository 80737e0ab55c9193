use control::{DEFAULT_ROUND_DIGITS, SwerveController};
use log::{debug, info, warn};
use mechanics::{FrictionCoefficient, SwerveDrivetrain};
use simcore::{
    ControlModel, DriveCommand, FrameState, MechanicsModel, Model, Pose, SimContext, SimState,
    WheelId, WheelState,
};

use crate::config::{Config, ConfigError};
use crate::telemetry::Telemetry;

/// Swerve drive simulation: owns every piece of robot state and advances it
/// one caller-driven tick at a time.
///
/// A tick is `send_controls` followed by `update`. Both take the caller's
/// timestamp in seconds; nothing here reads a clock.
#[derive(Debug, Clone)]
pub struct SwerveDriveEngine {
    drivetrain: SwerveDrivetrain,
    controller: SwerveController,
    state: SimState,
    initial_pose: Pose,
    last_update: f64,
}

impl SwerveDriveEngine {
    /// Build an engine at `start`, with `now` as the reference time for the first `update`.
    pub fn new(config: &Config, start: Pose, now: f64) -> Result<Self, ConfigError> {
        config.validate()?;
        let drivetrain = SwerveDrivetrain::with_friction(config.drivetrain(), config.friction_strategy());
        let controller = SwerveController::new(config.steering_gains());
        info!(
            "swerve engine ready at ({:.3}, {:.3}, {:.3}), friction model {:?}",
            start.x, start.y, start.heading, config.friction_model
        );
        Ok(SwerveDriveEngine {
            drivetrain,
            controller,
            state: SimState::at(start),
            initial_pose: start,
            last_update: now,
        })
    }

    /// Replace the slip-angle friction strategy.
    pub fn with_friction(mut self, friction: Box<dyn FrictionCoefficient>) -> Self {
        self.drivetrain.set_friction(friction);
        self
    }

    /// Feed one set of driver axes, rounded to two decimals.
    pub fn send_controls(&mut self, x: f64, y: f64, z: f64, now: f64) {
        self.send_controls_rounded(x, y, z, DEFAULT_ROUND_DIGITS, now);
    }

    /// `send_controls` with an explicit rounding precision.
    pub fn send_controls_rounded(&mut self, x: f64, y: f64, z: f64, round_digits: u32, now: f64) {
        self.state.control_input = DriveCommand::new(x, y, z);
        self.controller.set_round_digits(round_digits);
        self.controller.step_control(SimContext { dt: 0.0, t: now }, &mut self.state);
    }

    /// Advance the physics to `now`.
    ///
    /// Elapsed time is measured from the previous update (or construction).
    /// A timestamp earlier than that is treated as no elapsed time.
    pub fn update(&mut self, now: f64) {
        let mut dt = now - self.last_update;
        if dt.is_nan() || dt < 0.0 {
            warn!(
                "update at {now} is not after the previous update at {}; treating as zero elapsed time",
                self.last_update
            );
            dt = 0.0;
        }
        if now.is_finite() {
            self.last_update = now;
        }
        self.advance(SimContext { dt, t: self.last_update });
    }

    /// Advance the physics by `dt` seconds.
    pub fn step(&mut self, dt: f64) {
        let dt = if dt >= 0.0 {
            dt
        } else {
            warn!("ignoring negative or undefined step {dt}");
            0.0
        };
        self.last_update += dt;
        self.advance(SimContext { dt, t: self.last_update });
    }

    fn advance(&mut self, ctx: SimContext) {
        self.drivetrain.step_physics(ctx, &mut self.state);
    }

    /// Return to the starting pose with all motion and controller history cleared.
    pub fn reset(&mut self, now: f64) {
        self.state = SimState::at(self.initial_pose);
        self.controller.reset();
        self.drivetrain.reset();
        self.last_update = now;
        debug!("swerve engine reset at t={now}");
    }

    pub fn pose(&self) -> Pose {
        self.state.frame.pose
    }

    pub fn frame(&self) -> &FrameState {
        &self.state.frame
    }

    pub fn wheel(&self, wheel: WheelId) -> &WheelState {
        &self.state.wheels[wheel]
    }

    pub fn state(&self) -> &SimState {
        &self.state
    }

    pub fn swerve_target(&self) -> f64 {
        self.state.swerve_target
    }

    pub fn drivetrain(&self) -> &SwerveDrivetrain {
        &self.drivetrain
    }

    pub fn controller(&self) -> &SwerveController {
        &self.controller
    }

    pub fn last_update(&self) -> f64 {
        self.last_update
    }

    /// Read-only snapshot for renderers and displays.
    pub fn telemetry(&self) -> Telemetry {
        Telemetry::capture(&self.state, self.last_update)
    }
}
