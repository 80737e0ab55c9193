//! Batch swerve drive run.
//!
//! Usage: `swerve-sim-app [params.json] [out.csv] [noise_std_dev]`
//!
//! Plays the demo joystick script against the engine on a fixed tick and
//! writes pose and velocity per tick to CSV.

mod script;

use std::env;
use std::fs::File;
use std::io::{BufWriter, Write};

use log::{LevelFilter, info};
use simcore::{Clock, ManualClock, Pose, WheelId};
use simplelog::{ColorChoice, TermLogger, TerminalMode};
use swerve_sim::{Config, SwerveDriveEngine};

use crate::script::{DriveScript, JoystickNoise};

const DT: f64 = 1e-2;
const NOISE_SEED: u64 = 42;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    TermLogger::init(
        LevelFilter::Info,
        simplelog::Config::default(),
        TerminalMode::Mixed,
        ColorChoice::Auto,
    )?;

    let mut args = env::args().skip(1);
    let config_path = args.next().unwrap_or_else(|| "params.json".to_string());
    let out_path = args.next().unwrap_or_else(|| "swerve_drive.csv".to_string());
    let mut noise = match args.next() {
        Some(std_dev) => Some(JoystickNoise::new(std_dev.parse()?, NOISE_SEED)?),
        None => None,
    };

    let config = Config::load(&config_path)?;
    let mut clock = ManualClock::default();
    let mut engine = SwerveDriveEngine::new(&config, Pose::default(), clock.now())?;
    let script = DriveScript::demo();

    let mut csv = BufWriter::new(File::create(&out_path)?);
    writeln!(
        csv,
        "t,x,y,heading,vel_x,vel_y,yaw_rate,swerve_target,swerve_angle,rotations"
    )?;

    while clock.now() < script.duration() {
        let mut command = script.command_at(clock.now());
        if let Some(noise) = noise.as_mut() {
            command = noise.apply(command);
        }
        engine.send_controls(command.x, command.y, command.z, clock.now());
        engine.update(clock.advance(DT));

        let telemetry = engine.telemetry();
        let reference = telemetry.wheel(WheelId::FrontRight);
        writeln!(
            csv,
            "{:.6},{:.6},{:.6},{:.6},{:.6},{:.6},{:.6},{:.6},{:.6},{:.6}",
            telemetry.time,
            telemetry.pose.x,
            telemetry.pose.y,
            telemetry.pose.heading,
            telemetry.velocity[0],
            telemetry.velocity[1],
            telemetry.yaw_velocity,
            telemetry.swerve_target,
            reference.swerve_angle,
            reference.rotations
        )?;
    }
    csv.flush()?;

    info!("final state:\n{}", engine.telemetry().hud_text());
    info!("wrote {out_path}");
    Ok(())
}
