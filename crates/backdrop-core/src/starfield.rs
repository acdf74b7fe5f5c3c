//! Slowly rotating particle field surrounding the scene.

use glam::{Mat4, Vec3};
use rand::prelude::*;

use crate::constants::{
    STARFIELD_COUNT, STARFIELD_DEPTH, STARFIELD_RADIUS, STARFIELD_WOBBLE_AMPLITUDE,
    STARFIELD_WOBBLE_RATE, STARFIELD_YAW_RATE,
};

#[derive(Clone, Copy, Debug)]
pub struct StarfieldConfig {
    pub count: usize,
    /// Inner radius of the star shell.
    pub radius: f32,
    /// Radial thickness of the shell.
    pub depth: f32,
    pub yaw_rate: f32,
    pub wobble_rate: f32,
    pub wobble_amplitude: f32,
    pub seed: u64,
}

impl Default for StarfieldConfig {
    fn default() -> Self {
        Self {
            count: STARFIELD_COUNT,
            radius: STARFIELD_RADIUS,
            depth: STARFIELD_DEPTH,
            yaw_rate: STARFIELD_YAW_RATE,
            wobble_rate: STARFIELD_WOBBLE_RATE,
            wobble_amplitude: STARFIELD_WOBBLE_AMPLITUDE,
            seed: 0,
        }
    }
}

pub struct Starfield {
    pub config: StarfieldConfig,
    pub positions: Vec<Vec3>,
}

impl Starfield {
    /// Scatter `count` stars uniformly over a spherical shell
    /// `[radius, radius + depth]`.
    pub fn new(config: StarfieldConfig) -> Self {
        let mut rng = StdRng::seed_from_u64(config.seed);
        let positions = (0..config.count)
            .map(|_| {
                // Uniform direction: z in [-1, 1], azimuth in [0, 2pi)
                let z: f32 = rng.gen::<f32>() * 2.0 - 1.0;
                let azimuth = rng.gen::<f32>() * std::f32::consts::TAU;
                let planar = (1.0 - z * z).max(0.0).sqrt();
                let dir = Vec3::new(planar * azimuth.cos(), z, planar * azimuth.sin());
                let r = config.radius + rng.gen::<f32>() * config.depth;
                dir * r
            })
            .collect();
        Self { config, positions }
    }

    /// Rotation angles `(pitch, yaw)` at `elapsed` seconds: a slow continuous
    /// yaw plus a slight sinusoidal elevation nod.
    pub fn rotation(&self, elapsed: f32) -> (f32, f32) {
        let yaw = elapsed * self.config.yaw_rate;
        let pitch = (elapsed * self.config.wobble_rate).sin() * self.config.wobble_amplitude;
        (pitch, yaw)
    }

    pub fn model_matrix(&self, elapsed: f32) -> Mat4 {
        let (pitch, yaw) = self.rotation(elapsed);
        Mat4::from_rotation_x(pitch) * Mat4::from_rotation_y(yaw)
    }
}
