//! Differential drive physics model.
//!
//! Each side responds to commanded power with a first-order lag toward
//! `power * max_speed`. Powers below the dead zone do not move the robot,
//! matching motors that cannot overcome static friction. Distance and
//! heading are integrated every step, and body accelerations are reported
//! in g for the simulated accelerometer.
//!
//! Optional Gaussian noise on encoder rates and gyro yaw makes repeated runs
//! differ; set `seed` for reproducible noise.

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

/// Standard gravity in feet per second squared.
pub const GRAVITY_FPS2: f32 = 32.174;

/// Configuration for the drivetrain model.
#[derive(Debug, Clone)]
pub struct ModelConfig {
    /// Distance between left and right wheels in feet.
    pub track_width_ft: f32,
    /// Side speed at full power in feet per second.
    pub max_speed_fps: f32,
    /// Time for a side to cover ~63% of a speed change (coasting).
    pub time_constant_secs: f32,
    /// Time constant while braking at zero power.
    pub brake_time_constant_secs: f32,
    /// Power magnitude below which a side does not drive.
    pub deadzone: f32,
    /// Encoder rate noise standard deviation in ft/s.
    pub encoder_noise_fps: f32,
    /// Gyro yaw noise standard deviation in degrees.
    pub gyro_noise_deg: f32,
    /// RNG seed for noise. None = random.
    pub seed: Option<u64>,
}

impl Default for ModelConfig {
    fn default() -> Self {
        Self {
            track_width_ft: 2.0,
            max_speed_fps: 12.0,
            time_constant_secs: 0.15,
            brake_time_constant_secs: 0.05,
            deadzone: 0.10,
            encoder_noise_fps: 0.0,
            gyro_noise_deg: 0.0,
            seed: None,
        }
    }
}

/// Drive side selector.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Side {
    Left,
    Right,
}

/// State of one side.
#[derive(Debug, Clone, Copy, Default)]
pub struct SideState {
    /// Commanded power (-1.0 to 1.0).
    pub power: f32,
    /// Brake at zero power.
    pub brake: bool,
    /// Velocity in ft/s.
    pub velocity: f32,
    /// Distance travelled in feet.
    pub distance: f32,
}

/// Drivetrain physics state.
pub struct DrivetrainModel {
    config: ModelConfig,
    left: SideState,
    right: SideState,
    /// Heading in degrees, positive clockwise.
    heading_deg: f32,
    /// Body accelerations in g (x = forward, y = right).
    accel_g: [f32; 2],
    rng: StdRng,
}

impl std::fmt::Debug for DrivetrainModel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DrivetrainModel")
            .field("left", &self.left)
            .field("right", &self.right)
            .field("heading_deg", &self.heading_deg)
            .finish()
    }
}

impl Default for DrivetrainModel {
    fn default() -> Self {
        Self::new(ModelConfig::default())
    }
}

impl DrivetrainModel {
    /// Create a model at rest.
    pub fn new(config: ModelConfig) -> Self {
        let rng = match config.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };
        Self {
            config,
            left: SideState::default(),
            right: SideState::default(),
            heading_deg: 0.0,
            accel_g: [0.0; 2],
            rng,
        }
    }

    /// Model configuration.
    pub fn config(&self) -> &ModelConfig {
        &self.config
    }

    /// State of one side.
    pub fn side(&self, side: Side) -> &SideState {
        match side {
            Side::Left => &self.left,
            Side::Right => &self.right,
        }
    }

    fn side_mut(&mut self, side: Side) -> &mut SideState {
        match side {
            Side::Left => &mut self.left,
            Side::Right => &mut self.right,
        }
    }

    /// Command power for one side.
    pub fn set_power(&mut self, side: Side, power: f32) {
        self.side_mut(side).power = power.clamp(-1.0, 1.0);
    }

    /// Select brake or coast for one side.
    pub fn set_brake(&mut self, side: Side, brake: bool) {
        self.side_mut(side).brake = brake;
    }

    /// Heading in degrees (positive clockwise).
    pub fn heading_deg(&self) -> f32 {
        self.heading_deg
    }

    /// Heading with gyro noise applied.
    pub fn measured_heading_deg(&mut self) -> f32 {
        let noise = self.gaussian_noise(self.config.gyro_noise_deg);
        self.heading_deg + noise
    }

    /// Side velocity with encoder noise applied.
    pub fn measured_velocity(&mut self, side: Side) -> f32 {
        let noise = self.gaussian_noise(self.config.encoder_noise_fps);
        self.side(side).velocity + noise
    }

    /// Body acceleration in g (forward, right).
    pub fn accel_g(&self) -> [f32; 2] {
        self.accel_g
    }

    /// Mean forward speed of both sides in ft/s.
    pub fn forward_velocity(&self) -> f32 {
        (self.left.velocity + self.right.velocity) / 2.0
    }

    /// Integrate the model for one time step.
    pub fn step(&mut self, dt: f32) {
        if dt <= 0.0 {
            return;
        }
        let previous_forward = self.forward_velocity();

        let config = self.config.clone();
        for side in [&mut self.left, &mut self.right] {
            let power = if side.power.abs() < config.deadzone {
                0.0
            } else {
                side.power
            };
            let tau = if power == 0.0 && side.brake {
                config.brake_time_constant_secs
            } else {
                config.time_constant_secs
            };
            let target = power * config.max_speed_fps;
            let alpha = dt / (tau.max(0.0) + dt);
            side.velocity += (target - side.velocity) * alpha;
            side.distance += side.velocity * dt;
        }

        let forward = self.forward_velocity();
        let yaw_rate_rad = (self.left.velocity - self.right.velocity) / config.track_width_ft;
        self.heading_deg += yaw_rate_rad.to_degrees() * dt;

        let accel_forward = (forward - previous_forward) / dt;
        let accel_lateral = forward * yaw_rate_rad;
        self.accel_g = [accel_forward / GRAVITY_FPS2, accel_lateral / GRAVITY_FPS2];
    }

    /// Generate Gaussian noise using Box-Muller transform.
    fn gaussian_noise(&mut self, stddev: f32) -> f32 {
        if stddev == 0.0 {
            return 0.0;
        }
        let u1: f32 = self.rng.gen::<f32>().max(f32::EPSILON);
        let u2: f32 = self.rng.gen();
        let z = (-2.0 * u1.ln()).sqrt() * (2.0 * std::f32::consts::PI * u2).cos();
        z * stddev
    }
}
