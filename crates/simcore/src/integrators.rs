use nalgebra::Vector2;

use crate::vector::Vector;
use crate::{SimContext, SimState};

/// A two-phase integration strategy: velocities from forces, then positions from velocities.
pub trait Integrator {
    fn integrate_velocities(&self, ctx: &SimContext, state: &mut SimState);

    fn integrate_positions(&self, ctx: &SimContext, state: &mut SimState);

    /// Advances the state by one timestep.
    fn step(&self, ctx: &SimContext, state: &mut SimState) {
        self.integrate_velocities(ctx, state);
        self.integrate_positions(ctx, state);
    }
}

fn same_sign(a: f64, b: f64) -> bool {
    (a > 0.0 && b > 0.0) || (a < 0.0 && b < 0.0)
}

/// One planar velocity step under a drive force and a resistance.
///
/// The resultant's magnitude is applied along the drive direction. When the
/// resistance outweighs the drive it may only bleed velocity off: any axis
/// that ends up moving the same way as the applied delta is zeroed.
pub fn clamped_velocity_step(
    velocity: Vector2<f64>,
    drive: &Vector,
    resistance: &Vector,
    dt: f64,
) -> Vector2<f64> {
    let total = *drive + *resistance;
    let delta = Vector::polar(total.magnitude() * dt, drive.direction()).component();
    let mut next = velocity + delta;

    if drive.magnitude().abs() < resistance.magnitude().abs() {
        for axis in 0..2 {
            if same_sign(next[axis], delta[axis]) {
                next[axis] = 0.0;
            }
        }
    }
    next
}

/// Scalar counterpart of [`clamped_velocity_step`] for yaw.
pub fn clamped_scalar_step(velocity: f64, acceleration: f64, friction: f64, dt: f64) -> f64 {
    let delta = (acceleration + friction) * dt;
    let next = velocity + delta;
    if acceleration.abs() < friction.abs() && same_sign(next, delta) {
        0.0
    } else {
        next
    }
}

/// Explicit Euler with the friction clamp.
///
/// Velocities of every wheel and of the frame are advanced from the vectors
/// already stored in the state; positions then use the new velocities. A zero
/// timestep leaves every velocity and position untouched.
#[derive(Debug, Clone, Copy, Default)]
pub struct ClampedEuler;

impl Integrator for ClampedEuler {
    fn integrate_velocities(&self, ctx: &SimContext, state: &mut SimState) {
        let dt = ctx.dt;
        if dt == 0.0 {
            return;
        }

        for (_, wheel) in state.wheels.iter_mut() {
            wheel.velocity = clamped_velocity_step(
                wheel.velocity,
                &wheel.drive_vector,
                &wheel.resistance_vector,
                dt,
            );
        }

        let frame = &mut state.frame;
        frame.velocity =
            clamped_velocity_step(frame.velocity, &frame.drive_vector, &frame.friction_vector, dt);
        frame.yaw_velocity = clamped_scalar_step(
            frame.yaw_velocity,
            frame.yaw_acceleration,
            frame.yaw_friction,
            dt,
        );
    }

    fn integrate_positions(&self, ctx: &SimContext, state: &mut SimState) {
        let dt = ctx.dt;
        if dt == 0.0 {
            return;
        }

        for (_, wheel) in state.wheels.iter_mut() {
            let rolling = wheel.velocity[0] * wheel.swerve_position.cos()
                + wheel.velocity[1] * wheel.swerve_position.sin();
            wheel.linear_position += rolling * dt;
            wheel.swerve_position += wheel.swerve_motor_velocity * dt;
        }

        let frame = &mut state.frame;
        frame.pose.x += frame.velocity[0] * dt;
        frame.pose.y += frame.velocity[1] * dt;
        frame.pose.heading += frame.yaw_velocity * dt;
    }
}
