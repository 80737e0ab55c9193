//! Per-tick snapshot handed to renderers, graphs and HUD text.

use std::f64::consts::TAU;
use std::fmt::Write;

use serde::Serialize;
use simcore::{Pose, SimState, WheelId};

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct WheelTelemetry {
    pub wheel: WheelId,
    /// Steering angle (rad).
    pub swerve_angle: f64,
    /// Whole and partial turns of the wheel since start.
    pub rotations: f64,
    pub drive_magnitude: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Telemetry {
    pub time: f64,
    pub pose: Pose,
    pub velocity: [f64; 2],
    pub yaw_velocity: f64,
    pub yaw_acceleration: f64,
    pub drive_magnitude: f64,
    pub drive_direction: f64,
    pub friction_magnitude: f64,
    pub swerve_target: f64,
    pub wheels: [WheelTelemetry; 4],
}

impl Telemetry {
    pub fn capture(state: &SimState, time: f64) -> Self {
        let frame = &state.frame;
        let wheels = WheelId::ALL.map(|id| {
            let wheel = &state.wheels[id];
            WheelTelemetry {
                wheel: id,
                swerve_angle: wheel.swerve_position,
                rotations: wheel.linear_position / TAU,
                drive_magnitude: wheel.drive_vector.magnitude(),
            }
        });
        Telemetry {
            time,
            pose: frame.pose,
            velocity: [frame.velocity[0], frame.velocity[1]],
            yaw_velocity: frame.yaw_velocity,
            yaw_acceleration: frame.yaw_acceleration,
            drive_magnitude: frame.drive_vector.magnitude(),
            drive_direction: frame.drive_vector.direction(),
            friction_magnitude: frame.friction_vector.magnitude(),
            swerve_target: state.swerve_target,
            wheels,
        }
    }

    pub fn wheel(&self, id: WheelId) -> &WheelTelemetry {
        &self.wheels[id.index()]
    }

    /// Status block for an on-screen display, four decimal places throughout.
    pub fn hud_text(&self) -> String {
        let mut text = format!(
            "Mag: {:.4}\nDir: {:.4}\nTheta_acc: {:.4}\nVel_x: {:.4}\nVel_y: {:.4}\nVel_t: {:.4}\nPos: {:.4}, {:.4}\nRot: {:.4}",
            self.drive_magnitude,
            self.drive_direction,
            self.yaw_acceleration,
            self.velocity[0],
            self.velocity[1],
            self.yaw_velocity,
            self.pose.x,
            self.pose.y,
            self.pose.heading,
        );
        for wheel in &self.wheels {
            // Writing into a String cannot fail.
            let _ = write!(
                text,
                "\n{}: {:.4} rad, {:.4} turns",
                wheel.wheel.label(),
                wheel.swerve_angle,
                wheel.rotations
            );
        }
        text
    }
}
