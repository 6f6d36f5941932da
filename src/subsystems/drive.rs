//! Drive subsystem
//!
//! Two treads (left and right), each a speed controller plus a wheel
//! encoder, along with the gyro and the built-in accelerometer.
//!
//! Sensor readings are cached once per loop by [`DriveSubsystem::periodic`];
//! commands read the cached values so every command in a loop sees the same
//! snapshot.
//!
//! Motor commands that fail are logged and the drive falls back to stop.
//! Nothing here returns an error into the robot loop except through the
//! explicit [`DriveSubsystem::set_power`].

use alloc::boxed::Box;

use drivebase_core::command::OutputSink;
use drivebase_core::drive::PowerPair;
use drivebase_core::measure::{self, DriveSample, EncoderScale, SideReading};
use drivebase_core::parameters::ParameterStore;
use libm::fabsf;

use crate::core::dashboard::publish;
use crate::platform::{Accelerometer, Encoder, Gyro, NeutralMode, Result, SpeedController};

/// Full power maps to this many volts
pub const DEFAULT_VOLTAGE_COMPENSATION: f32 = 12.0;

/// One side of the drive base
pub struct Tread {
    name: &'static str,
    motor: Box<dyn SpeedController>,
    encoder: Box<dyn Encoder>,
    reading: SideReading,
}

impl Tread {
    /// Configure the encoder scale and put the motor in coast with
    /// default voltage compensation
    pub fn new(
        name: &'static str,
        mut motor: Box<dyn SpeedController>,
        mut encoder: Box<dyn Encoder>,
        scale: EncoderScale,
    ) -> Self {
        encoder.set_distance_per_count(scale.feet_per_count());
        if motor
            .set_voltage_compensation(DEFAULT_VOLTAGE_COMPENSATION)
            .is_err()
        {
            crate::log_warn!("{} tread: voltage compensation rejected", name);
        }
        if motor.set_neutral_mode(NeutralMode::Coast).is_err() {
            crate::log_warn!("{} tread: neutral mode rejected", name);
        }
        Self {
            name,
            motor,
            encoder,
            reading: SideReading::default(),
        }
    }

    /// Tread name for logging
    pub fn name(&self) -> &'static str {
        self.name
    }

    /// Command motor power
    pub fn set_power(&mut self, power: f32) -> Result<()> {
        self.motor.set_power(power)
    }

    /// Last commanded motor power
    pub fn power(&self) -> f32 {
        self.motor.power()
    }

    /// Brake (true) or coast (false) at zero power
    pub fn set_brake_mode(&mut self, enable: bool) -> Result<()> {
        self.motor.set_neutral_mode(NeutralMode::from_brake(enable))
    }

    /// Voltage compensation for this side
    pub fn set_voltage_compensation(&mut self, volts: f32) -> Result<()> {
        self.motor.set_voltage_compensation(volts)
    }

    /// Refresh the cached encoder reading
    ///
    /// On failure the previous reading is kept.
    pub fn read_sensors(&mut self) -> Result<()> {
        let counts = self.encoder.counts()?;
        let distance = self.encoder.distance()?;
        let velocity = self.encoder.rate()?;
        self.reading = SideReading {
            counts,
            distance,
            velocity,
        };
        Ok(())
    }

    /// Cached encoder reading
    pub fn reading(&self) -> SideReading {
        self.reading
    }
}

/// Hardware handles for [`DriveSubsystem::new`]
pub struct DriveHardware {
    /// Left side leader controller
    pub left_motor: Box<dyn SpeedController>,
    /// Left wheel encoder
    pub left_encoder: Box<dyn Encoder>,
    /// Right side leader controller
    pub right_motor: Box<dyn SpeedController>,
    /// Right wheel encoder
    pub right_encoder: Box<dyn Encoder>,
    /// Heading sensor
    pub gyro: Box<dyn Gyro>,
    /// Built-in accelerometer
    pub accelerometer: Box<dyn Accelerometer>,
}

/// Drive base subsystem
pub struct DriveSubsystem {
    left: Tread,
    right: Tread,
    gyro: Box<dyn Gyro>,
    accelerometer: Box<dyn Accelerometer>,
    yaw: f32,
    accel: [f32; 3],
    debug: bool,
}

impl DriveSubsystem {
    /// Create the drive with per-side encoder scales
    pub fn new(
        hardware: DriveHardware,
        left_scale: EncoderScale,
        right_scale: EncoderScale,
    ) -> Self {
        Self {
            left: Tread::new(
                "Left",
                hardware.left_motor,
                hardware.left_encoder,
                left_scale,
            ),
            right: Tread::new(
                "Right",
                hardware.right_motor,
                hardware.right_encoder,
                right_scale,
            ),
            gyro: hardware.gyro,
            accelerometer: hardware.accelerometer,
            yaw: 0.0,
            accel: [0.0; 3],
            debug: false,
        }
    }

    /// Publish per-side encoder values every loop
    pub fn set_debug(&mut self, debug: bool) {
        self.debug = debug;
    }

    /// Left tread
    pub fn left(&self) -> &Tread {
        &self.left
    }

    /// Right tread
    pub fn right(&self) -> &Tread {
        &self.right
    }

    /// Command both sides
    ///
    /// Both sides are always commanded; the first error is returned.
    pub fn set_power(&mut self, power: PowerPair) -> Result<()> {
        let left = self.left.set_power(power.left);
        let right = self.right.set_power(power.right);
        left.and(right)
    }

    /// Command both sides, stopping the drive if either side fails
    pub fn apply_power(&mut self, power: PowerPair) {
        if self.set_power(power).is_err() {
            crate::log_warn!("Drive: power command failed, stopping");
            self.stop();
        }
    }

    /// Zero power on both sides
    pub fn stop(&mut self) {
        if self.set_power(PowerPair::STOP).is_err() {
            crate::log_error!("Drive: stop command failed");
        }
    }

    /// Last commanded power
    pub fn power(&self) -> PowerPair {
        PowerPair {
            left: self.left.power(),
            right: self.right.power(),
        }
    }

    /// Brake (true) or coast (false) at zero power
    pub fn set_brake_mode(&mut self, enable: bool) -> Result<()> {
        let left = self.left.set_brake_mode(enable);
        let right = self.right.set_brake_mode(enable);
        left.and(right)
    }

    /// Per-side voltage compensation
    pub fn set_voltage_compensation(&mut self, left_volts: f32, right_volts: f32) -> Result<()> {
        let left = self.left.set_voltage_compensation(left_volts);
        let right = self.right.set_voltage_compensation(right_volts);
        left.and(right)
    }

    /// Read all sensors once per loop
    ///
    /// Publishes per-side encoder values to `dashboard` when debug is on.
    pub fn periodic(&mut self, dashboard: &mut ParameterStore) {
        if self.left.read_sensors().is_err() {
            crate::log_warn!("Drive: left encoder read failed");
        }
        if self.right.read_sensors().is_err() {
            crate::log_warn!("Drive: right encoder read failed");
        }

        match self.gyro.yaw() {
            Ok(yaw) => self.yaw = yaw,
            Err(_) => crate::log_warn!("Drive: gyro read failed"),
        }

        match (
            self.accelerometer.x(),
            self.accelerometer.y(),
            self.accelerometer.z(),
        ) {
            (Ok(x), Ok(y), Ok(z)) => self.accel = [x, y, z],
            _ => crate::log_warn!("Drive: accelerometer read failed"),
        }

        if self.debug {
            let left = self.left.reading();
            let right = self.right.reading();
            publish(dashboard, "L_ENC_DIST", left.distance);
            publish(dashboard, "L_ENC_CNTS", left.counts);
            publish(dashboard, "L_ENC_VEL", left.velocity);
            publish(dashboard, "R_ENC_DIST", right.distance);
            publish(dashboard, "R_ENC_CNTS", right.counts);
            publish(dashboard, "R_ENC_VEL", right.velocity);
            publish(dashboard, "GYRO_YAW", self.yaw);
        }
    }

    /// Cached gyro yaw (degrees)
    pub fn yaw(&self) -> f32 {
        self.yaw
    }

    /// Cached accelerometer reading (g)
    pub fn acceleration(&self) -> [f32; 3] {
        self.accel
    }

    /// Mean distance of both sides (feet)
    pub fn avg_distance(&self) -> f32 {
        (self.left.reading().distance + self.right.reading().distance) / 2.0
    }

    /// Mean velocity of both sides (feet per second)
    pub fn avg_velocity(&self) -> f32 {
        (self.left.reading().velocity + self.right.reading().velocity) / 2.0
    }

    /// Mean speed of both sides, ignoring direction
    ///
    /// Non-zero while turning in place, unlike [`Self::avg_velocity`].
    pub fn avg_abs_velocity(&self) -> f32 {
        (fabsf(self.left.reading().velocity) + fabsf(self.right.reading().velocity)) / 2.0
    }

    /// True if the accelerometer X or Y magnitude exceeds its threshold
    pub fn bump_check(&self, bump_x: f32, bump_y: f32) -> bool {
        measure::bump_check(self.accel[0], self.accel[1], bump_x, bump_y)
    }

    /// Snapshot of the cached sensor readings
    pub fn sample(&self) -> DriveSample {
        DriveSample {
            yaw: self.yaw,
            left: self.left.reading(),
            right: self.right.reading(),
            accel_x: self.accel[0],
            accel_y: self.accel[1],
        }
    }
}

impl OutputSink<PowerPair> for DriveSubsystem {
    fn apply(&mut self, output: PowerPair) {
        self.apply_power(output);
    }
}
