//! Drive base simulator CLI.
//!
//! Runs a tick-timed ramp against the physics model and prints the average
//! velocity of each phase, or plays a simulated match with an autonomous
//! routine selected.
//!
//! Usage:
//!   cargo run -p drivebase_sim --bin drivebase-sim -- [OPTIONS]
//!
//! Options:
//!   --ramp <TICKS>      Ramp up/down duration (default: 20)
//!   --cruise <TICKS>    Cruise duration (default: 40)
//!   --power <P>         Cruise power for both sides (default: 0.8)
//!   --auton <N>         Play a match with auton N (0-4) instead of a ramp
//!   --match <SECS>      Match length in seconds (default: 49)
//!   --seed <N>          Sensor noise seed

use std::env;
use std::process;
use std::str::FromStr;

use drivebase::robot::AutonChoice;
use drivebase_core::parameters::drive::{PARAM_FIXED_LEFT, PARAM_FIXED_RIGHT};
use drivebase_core::parameters::tick_timed::{PARAM_CRUISE_TICKS, PARAM_RAMP_TICKS};
use drivebase_core::parameters::ParamValue;
use drivebase_core::sequencer::{DEFAULT_CRUISE_TICKS, DEFAULT_RAMP_TICKS};
use drivebase_sim::{ModelConfig, Side, SimError, SimRobot};

/// Sensor noise used when a seed is given
const ENCODER_NOISE_FPS: f32 = 0.05;
const GYRO_NOISE_DEG: f32 = 0.1;

struct Args {
    ramp_ticks: u32,
    cruise_ticks: u32,
    power: f32,
    auton: Option<AutonChoice>,
    match_secs: f32,
    seed: Option<u64>,
}

fn parse_args() -> Args {
    let mut args = Args {
        ramp_ticks: DEFAULT_RAMP_TICKS,
        cruise_ticks: DEFAULT_CRUISE_TICKS,
        power: 0.8,
        auton: None,
        match_secs: 49.0,
        seed: None,
    };

    let raw: Vec<String> = env::args().collect();
    let mut i = 1;
    while i < raw.len() {
        match raw[i].as_str() {
            "--ramp" => {
                i += 1;
                args.ramp_ticks = parse_arg(&raw, i, "ramp");
            }
            "--cruise" => {
                i += 1;
                args.cruise_ticks = parse_arg(&raw, i, "cruise");
            }
            "--power" => {
                i += 1;
                args.power = parse_arg(&raw, i, "power");
            }
            "--auton" => {
                i += 1;
                let index: i32 = parse_arg(&raw, i, "auton");
                args.auton = Some(AutonChoice::from_index(index).unwrap_or_else(|| {
                    eprintln!("Error: auton must be 0-4");
                    process::exit(1);
                }));
            }
            "--match" => {
                i += 1;
                args.match_secs = parse_arg(&raw, i, "match");
            }
            "--seed" => {
                i += 1;
                args.seed = Some(parse_arg(&raw, i, "seed"));
            }
            "-h" | "--help" => {
                print_usage();
                process::exit(0);
            }
            other => {
                eprintln!("Unknown option: {other}");
                print_usage();
                process::exit(1);
            }
        }
        i += 1;
    }

    args
}

fn parse_arg<T: FromStr>(raw: &[String], i: usize, name: &str) -> T {
    raw.get(i)
        .unwrap_or_else(|| {
            eprintln!("Error: --{name} requires a value");
            process::exit(1);
        })
        .parse()
        .unwrap_or_else(|_| {
            eprintln!("Error: invalid value for --{name}");
            process::exit(1);
        })
}

fn print_usage() {
    eprintln!(
        "Usage: drivebase-sim [OPTIONS]\n\
         \n\
         Options:\n\
         \x20 --ramp <TICKS>      Ramp up/down duration (default: 20)\n\
         \x20 --cruise <TICKS>    Cruise duration (default: 40)\n\
         \x20 --power <P>         Cruise power for both sides (default: 0.8)\n\
         \x20 --auton <N>         Play a match with auton N (0-4) instead of a ramp\n\
         \x20 --match <SECS>      Match length in seconds (default: 49)\n\
         \x20 --seed <N>          Sensor noise seed\n\
         \x20 -h, --help          Show this help"
    );
}

fn run_ramp(sim: &mut SimRobot, args: &Args) -> Result<(), SimError> {
    println!(
        "Ramp: {} ticks, cruise: {} ticks, power: {:.2}",
        args.ramp_ticks, args.cruise_ticks, args.power
    );
    println!();

    let report = sim.run_ramp(args.ramp_ticks, args.cruise_ticks, args.power, args.power)?;

    println!("{:<10} {:>6} {:>10} {:>10} {:>10}", "phase", "ticks", "left", "right", "dist");
    for phase in &report.phases {
        println!(
            "{:<10} {:>6} {:>10.3} {:>10.3} {:>10.3}",
            phase.phase.name(),
            phase.ticks,
            phase.left_velocity,
            phase.right_velocity,
            phase.distance
        );
    }
    println!();
    println!(
        "Total: {} ticks, {:.3} ft, heading {:.2} deg",
        report.ticks, report.distance, report.heading_deg
    );
    Ok(())
}

fn run_match(sim: &mut SimRobot, args: &Args, auton: AutonChoice) -> Result<(), SimError> {
    sim.set_auton(auton)?;
    sim.set_parameter(PARAM_RAMP_TICKS, ParamValue::Int(args.ramp_ticks as i32))?;
    sim.set_parameter(PARAM_CRUISE_TICKS, ParamValue::Int(args.cruise_ticks as i32))?;
    sim.set_parameter(PARAM_FIXED_LEFT, ParamValue::Float(args.power))?;
    sim.set_parameter(PARAM_FIXED_RIGHT, ParamValue::Float(args.power))?;

    println!("Match: {:.1} s, auton: {}", args.match_secs, auton.name());
    let ticks = sim.run_match(args.match_secs);

    let model = sim.model();
    let left = model.side(Side::Left);
    let right = model.side(Side::Right);
    println!(
        "After {} ticks: left {:.3} ft, right {:.3} ft, heading {:.2} deg",
        ticks,
        left.distance,
        right.distance,
        model.heading_deg()
    );
    Ok(())
}

fn main() {
    let args = parse_args();

    println!("=== drivebase simulator ===");

    let config = match args.seed {
        Some(seed) => ModelConfig {
            encoder_noise_fps: ENCODER_NOISE_FPS,
            gyro_noise_deg: GYRO_NOISE_DEG,
            seed: Some(seed),
            ..ModelConfig::default()
        },
        None => ModelConfig::default(),
    };
    let mut sim = SimRobot::new(config);

    let result = match args.auton {
        Some(auton) => run_match(&mut sim, &args, auton),
        None => run_ramp(&mut sim, &args),
    };
    if let Err(e) = result {
        eprintln!("Error: {e}");
        process::exit(1);
    }
}
