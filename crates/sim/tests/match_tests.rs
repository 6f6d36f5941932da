use drivebase::libraries::oi::{FLIP_BUTTON, THROTTLE_AXIS};
use drivebase::robot::{AutonChoice, DashboardCommand, RobotState};
use drivebase_sim::{ModelConfig, Side, SimRobot};

/// Disabled plus autonomous periods
const AUTON_END_SECS: f32 = 17.0;
/// Start of teleop
const TELEOP_START_SECS: f32 = 19.0;

fn sim() -> SimRobot {
    SimRobot::new(ModelConfig {
        seed: Some(11),
        ..ModelConfig::default()
    })
}

#[test]
fn test_do_nothing_auton_stays_put() {
    let mut sim = sim();
    sim.run_match(AUTON_END_SECS);
    let model = sim.model();
    assert_eq!(model.side(Side::Left).distance, 0.0);
    assert_eq!(model.side(Side::Right).distance, 0.0);
}

#[test]
fn test_drive_forward_auton() {
    let mut sim = sim();
    sim.set_auton(AutonChoice::DriveForward).unwrap();
    sim.run_match(AUTON_END_SECS);

    let model = sim.model();
    assert!(model.side(Side::Left).distance > 1.0);
    assert!(model.side(Side::Right).distance > 1.0);
    assert!(model.heading_deg().abs() < 1e-3);
    // Ramp finished long before the period ended
    assert!(model.forward_velocity().abs() < 1e-3);
}

#[test]
fn test_drive_backward_auton() {
    let mut sim = sim();
    sim.set_auton(AutonChoice::DriveBackward).unwrap();
    sim.run_match(AUTON_END_SECS);
    assert!(sim.model().side(Side::Left).distance < -1.0);
}

#[test]
fn test_rotate_autons_turn_opposite_ways() {
    let mut right = sim();
    right.set_auton(AutonChoice::RotateRight).unwrap();
    right.run_match(AUTON_END_SECS);
    assert!(right.model().heading_deg() > 5.0);

    let mut left = sim();
    left.set_auton(AutonChoice::RotateLeft).unwrap();
    left.run_match(AUTON_END_SECS);
    assert!(left.model().heading_deg() < -5.0);
}

#[test]
fn test_teleop_arcade_drive() {
    let mut sim = sim();
    sim.run_match(TELEOP_START_SECS);
    assert_eq!(sim.driver_station().state(), RobotState::Teleop);

    // Stick forward (Y axis reads negative)
    sim.joystick().set_axis(THROTTLE_AXIS, -1.0);
    sim.run_match(2.0);
    assert_eq!(sim.robot().state(), RobotState::Teleop);
    let forward = sim.model().forward_velocity();
    assert!(forward > 10.0);

    sim.joystick().release_all();
    sim.run_match(2.0);
    assert!(sim.model().forward_velocity().abs() < 0.1);
}

#[test]
fn test_flip_button_reverses_teleop() {
    let mut sim = sim();
    sim.run_match(TELEOP_START_SECS);

    sim.joystick().set_button(FLIP_BUTTON, true);
    sim.step();
    sim.joystick().set_button(FLIP_BUTTON, false);
    assert!(sim.robot().context().config.is_flipped());

    sim.joystick().set_axis(THROTTLE_AXIS, -1.0);
    sim.run_match(2.0);
    assert!(sim.model().forward_velocity() < -10.0);
}

#[test]
fn test_disabled_robot_ignores_joystick() {
    let mut sim = sim();
    sim.joystick().set_axis(THROTTLE_AXIS, -1.0);
    sim.run_match(1.5);
    assert_eq!(sim.robot().state(), RobotState::Disabled);
    assert_eq!(sim.model().side(Side::Left).distance, 0.0);
}

#[test]
fn test_debug_records_loop_stats() {
    let mut sim = sim();
    sim.robot_mut().set_debug(true);
    sim.run_match(1.0);
    let ctx = sim.robot().context();
    assert_eq!(ctx.loop_stats.count(), 50);
    assert!(ctx.dashboard.get("L_ENC_DIST").is_some());
    assert!(ctx.dashboard.get("RUN_AVG").is_some());
}

#[test]
fn test_measure_runs_while_disabled() {
    let mut sim = sim();
    assert!(sim.robot_mut().start_command(DashboardCommand::Measure));
    sim.run_match(0.5);
    assert!(sim.robot().scheduler().is_scheduled("Measure"));
    assert!(sim.robot().context().dashboard.get("YAW_MEAS").is_some());
}
