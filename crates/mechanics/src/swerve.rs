use log::{debug, trace};
use simcore::{
    heading, ClampedEuler, Integrator, MechanicsModel, Model, PerWheel, SimContext, SimState,
    Vector, WheelId,
};

use crate::config::SwerveDrivetrainConfig;
use crate::friction::{self, ConstantFriction, FrictionCoefficient};
use crate::wheel_module;

/// Lever arm from the centre of gravity to a module's contact patch.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TorqueArm {
    pub length: f64,
    /// Direction from the centre of gravity to the module (rad).
    pub angle: f64,
}

impl TorqueArm {
    /// Module mounting point in the robot frame: x to the right, y forwards.
    pub fn module_position(config: &SwerveDrivetrainConfig, wheel: WheelId) -> [f64; 2] {
        let [ox, oy] = config.wheel_offset;
        let x = if wheel.is_right() { ox } else { -ox };
        let y = if wheel.is_front() { oy } else { -oy };
        [x, y]
    }

    pub fn for_wheel(config: &SwerveDrivetrainConfig, wheel: WheelId) -> Self {
        let [x, y] = Self::module_position(config, wheel);
        let dx = x - config.cg_offset[0];
        let dy = y - config.cg_offset[1];
        TorqueArm {
            length: dx.hypot(dy),
            angle: heading(dy, dx),
        }
    }
}

/// The swerve drivetrain model that turns module commands into frame motion.
///
/// Stages run in a fixed order each tick, each consuming the previous one's
/// output: wheel drive vectors, wheel resistance, frame force and yaw, frame
/// friction, then velocity and position integration.
#[derive(Debug, Clone)]
pub struct SwerveDrivetrain {
    pub config: SwerveDrivetrainConfig,
    torque_arms: PerWheel<TorqueArm>,
    friction: Box<dyn FrictionCoefficient>,
    integrator: ClampedEuler,
}

impl SwerveDrivetrain {
    /// Drivetrain with slip-independent rolling friction.
    pub fn new(config: SwerveDrivetrainConfig) -> Self {
        let friction = Box::new(ConstantFriction::new(config.rolling_friction));
        Self::with_friction(config, friction)
    }

    pub fn with_friction(
        config: SwerveDrivetrainConfig,
        friction: Box<dyn FrictionCoefficient>,
    ) -> Self {
        let torque_arms = PerWheel::from_fn(|wheel| TorqueArm::for_wheel(&config, wheel));
        SwerveDrivetrain {
            config,
            torque_arms,
            friction,
            integrator: ClampedEuler,
        }
    }

    pub fn set_friction(&mut self, friction: Box<dyn FrictionCoefficient>) {
        self.friction = friction;
    }

    pub fn torque_arm(&self, wheel: WheelId) -> TorqueArm {
        self.torque_arms[wheel]
    }

    /// Net planar force and yaw acceleration from the modules' drive vectors.
    ///
    /// Each module only contributes the part of its push that lies along its
    /// torque arm to translation; the perpendicular part turns the frame.
    pub fn aggregate_forces(&self, state: &mut SimState) {
        let mut yaw_acceleration = 0.0;
        let mut net = Vector::zero();

        for (id, wheel) in state.wheels.iter() {
            let arm = self.torque_arms[id];
            let drive = &wheel.drive_vector;
            net = net + drive.project(arm.angle);
            yaw_acceleration += drive.magnitude() * (drive.direction() - arm.angle).sin() * arm.length;
        }

        state.frame.drive_vector = net;
        state.frame.yaw_acceleration = yaw_acceleration;
    }

    /// Friction on the frame, from the velocity as it stands before this tick's integration.
    ///
    /// Velocity is integrated after this stage, so translational friction
    /// lags the motion by one tick.
    pub fn update_frame_friction(&self, state: &mut SimState) {
        let frame = &mut state.frame;
        frame.friction_vector = friction::frame_friction(
            &self.config,
            self.friction.as_ref(),
            &state.wheels,
            frame.drive_vector.direction(),
            frame.velocity,
        );
        frame.yaw_friction = friction::yaw_friction(&self.config, frame.yaw_velocity);
    }

    /// Recompute every force vector from the current motor commands.
    pub fn update_vectors(&self, state: &mut SimState) {
        wheel_module::update_drive_vectors(&self.config, &mut state.wheels);
        wheel_module::update_resistance_vectors(&self.config, &mut state.wheels);
        self.aggregate_forces(state);
        self.update_frame_friction(state);
        trace!(
            "frame force {:.4} @ {:.4}, friction {:.4}, yaw acc {:.4}",
            state.frame.drive_vector.magnitude(),
            state.frame.drive_vector.direction(),
            state.frame.friction_vector.magnitude(),
            state.frame.yaw_acceleration
        );
    }
}

impl Model for SwerveDrivetrain {
    fn reset(&mut self) {
        // Only constants live here; dynamic state belongs to SimState.
    }
}

impl MechanicsModel for SwerveDrivetrain {
    fn step_physics(&mut self, ctx: SimContext, state: &mut SimState) {
        self.update_vectors(state);
        self.integrator.integrate_velocities(&ctx, state);
        self.integrator.integrate_positions(&ctx, state);
        debug!(
            "t={:.3} dt={:.4} pose=({:.4}, {:.4}, {:.4}) v=({:.4}, {:.4}) yaw_v={:.4}",
            ctx.t,
            ctx.dt,
            state.frame.pose.x,
            state.frame.pose.y,
            state.frame.pose.heading,
            state.frame.velocity[0],
            state.frame.velocity[1],
            state.frame.yaw_velocity
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::f64::consts::{FRAC_PI_2, FRAC_PI_4, PI};
    use nalgebra::Vector2;

    fn fast_config() -> SwerveDrivetrainConfig {
        SwerveDrivetrainConfig {
            max_current: 40.0,
            rolling_friction: 0.002,
            ..Default::default()
        }
    }

    #[test]
    fn test_square_frame_torque_arms() {
        let drivetrain = SwerveDrivetrain::new(SwerveDrivetrainConfig::default());
        let expected_length = 0.3 * 2.0_f64.sqrt();
        let expected = [
            (WheelId::FrontRight, FRAC_PI_4),
            (WheelId::BackRight, -FRAC_PI_4),
            (WheelId::FrontLeft, 3.0 * FRAC_PI_4),
            (WheelId::BackLeft, -3.0 * FRAC_PI_4),
        ];
        for (wheel, angle) in expected {
            let arm = drivetrain.torque_arm(wheel);
            assert!((arm.length - expected_length).abs() < 1e-12);
            assert!((arm.angle - angle).abs() < 1e-12, "{wheel:?}: {}", arm.angle);
        }
    }

    #[test]
    fn test_cg_offset_shifts_arms() {
        let config = SwerveDrivetrainConfig {
            cg_offset: [0.3, 0.0],
            ..Default::default()
        };
        let drivetrain = SwerveDrivetrain::new(config);
        let arm = drivetrain.torque_arm(WheelId::FrontRight);
        assert!((arm.length - 0.3).abs() < 1e-12);
        assert!((arm.angle - FRAC_PI_2).abs() < 1e-12);
        let arm = drivetrain.torque_arm(WheelId::BackLeft);
        assert!((arm.length - 0.6_f64.hypot(0.3)).abs() < 1e-12);
    }

    #[test]
    fn test_uniform_drive_translates_without_turning() {
        let drivetrain = SwerveDrivetrain::new(fast_config());
        let mut state = SimState::default();
        for (_, wheel) in state.wheels.iter_mut() {
            wheel.drive_motor_velocity = 1.0;
        }
        drivetrain.update_vectors(&mut state);

        // Each module only passes cos²(π/4) of its push along x through its arm.
        let per_wheel = 12.0 * 40.0 * 0.9 / 50.0;
        assert!((state.frame.drive_vector.x() - 2.0 * per_wheel).abs() < 1e-9);
        assert!(state.frame.drive_vector.y().abs() < 1e-9);
        assert!(state.frame.yaw_acceleration.abs() < 1e-9);
    }

    #[test]
    fn test_opposed_sides_spin_the_frame() {
        let drivetrain = SwerveDrivetrain::new(fast_config());
        let mut state = SimState::default();
        for (id, wheel) in state.wheels.iter_mut() {
            wheel.drive_motor_velocity = if id.is_right() { 1.0 } else { -1.0 };
            wheel.swerve_position = FRAC_PI_2;
        }
        drivetrain.update_vectors(&mut state);

        let per_wheel = 12.0 * 40.0 * 0.9 / 50.0;
        let arm = 0.3 * 2.0_f64.sqrt();
        assert!(state.frame.drive_vector.magnitude() < 1e-9);
        let expected_yaw = 4.0 * per_wheel * FRAC_PI_4.sin() * arm;
        assert!((state.frame.yaw_acceleration - expected_yaw).abs() < 1e-9);
    }

    #[test]
    fn test_step_accelerates_then_moves() {
        let mut drivetrain = SwerveDrivetrain::new(fast_config());
        let mut state = SimState::default();
        for (_, wheel) in state.wheels.iter_mut() {
            wheel.drive_motor_velocity = 1.0;
        }

        drivetrain.step_physics(SimContext { dt: 0.1, t: 0.1 }, &mut state);

        let force = 2.0 * 12.0 * 40.0 * 0.9 / 50.0;
        let friction = 0.002 * 9.8 * 50.0;
        let expected_v = (force - friction) * 0.1;
        assert!((state.frame.velocity[0] - expected_v).abs() < 1e-9);
        assert!(state.frame.velocity[1].abs() < 1e-9);
        assert!((state.frame.pose.x - expected_v * 0.1).abs() < 1e-9);
        assert_eq!(state.frame.friction_vector.direction(), PI);
    }

    #[test]
    fn test_friction_follows_velocity_one_tick_late() {
        let mut drivetrain = SwerveDrivetrain::new(fast_config());
        let mut state = SimState::default();
        state.frame.velocity = Vector2::new(1.0, 0.0);
        for (_, wheel) in state.wheels.iter_mut() {
            wheel.drive_motor_velocity = 1.0;
            wheel.swerve_position = PI;
        }

        // Pushing hard towards -x flips the velocity within one step.
        drivetrain.step_physics(SimContext { dt: 0.1, t: 0.1 }, &mut state);
        let force = 2.0 * 12.0 * 40.0 * 0.9 / 50.0;
        let friction = 0.002 * 9.8 * 50.0;
        assert!((state.frame.velocity[0] - (1.0 - (force + friction) * 0.1)).abs() < 1e-9);
        assert!(state.frame.velocity[0] < 0.0);
        // Friction was computed against the +x velocity the step started with.
        assert_eq!(state.frame.friction_vector.direction(), PI);
        assert!(state.frame.friction_vector.x() < 0.0);

        drivetrain.step_physics(SimContext { dt: 0.1, t: 0.2 }, &mut state);
        assert!(state.frame.friction_vector.x() > 0.0);
    }

    #[test]
    fn test_idle_frame_stays_put() {
        let mut drivetrain = SwerveDrivetrain::new(SwerveDrivetrainConfig::default());
        let mut state = SimState::default();
        drivetrain.step_physics(SimContext { dt: 0.5, t: 0.5 }, &mut state);
        assert_eq!(state.frame.velocity[0], 0.0);
        assert_eq!(state.frame.velocity[1], 0.0);
        assert_eq!(state.frame.pose.x, 0.0);
        assert_eq!(state.frame.pose.y, 0.0);
        for (_, wheel) in state.wheels.iter() {
            assert_eq!(wheel.velocity[0], 0.0);
            assert_eq!(wheel.linear_position, 0.0);
        }
    }
}
