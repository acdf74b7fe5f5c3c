//! Rotating Earth state: rotation schedule, decorative shells and the city
//! markers expressed in the sphere's local frame.

use glam::{Mat4, Vec3};

use crate::constants::{
    ATMOSPHERE_SHELL_OPACITY, ATMOSPHERE_SHELL_SCALE, CLOUD_RATE_MULTIPLIER, CLOUD_SHELL_OPACITY,
    CLOUD_SHELL_SCALE, EARTH_ROTATION_RATE, GLOBE_RADIUS, GLOBE_SCALE, MARKER_DOT_RADIUS,
    MARKER_GLOW_OPACITY, MARKER_GLOW_RADIUS, MARKER_RADIUS, MARKER_STEM_LENGTH,
};
use crate::geo::{self, CityMarker, GeoPoint};

/// Mesh flavor for a decorative wireframe shell.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ShellMesh {
    /// Latitude/longitude sphere wireframe.
    UvSphere { segments: u32, rings: u32 },
    /// Subdivided icosahedron edge wireframe.
    Icosahedron { detail: u32 },
}

#[derive(Clone, Copy, Debug)]
pub struct ShellSpec {
    pub scale: f32,
    pub opacity: f32,
    pub mesh: ShellMesh,
}

/// The five concentric grid shells layered over the surface, innermost first.
pub const GRID_SHELLS: &[ShellSpec] = &[
    ShellSpec {
        scale: 1.001,
        opacity: 0.3,
        mesh: ShellMesh::UvSphere {
            segments: 72,
            rings: 36,
        },
    },
    ShellSpec {
        scale: 1.002,
        opacity: 0.2,
        mesh: ShellMesh::Icosahedron { detail: 4 },
    },
    ShellSpec {
        scale: 1.003,
        opacity: 0.15,
        mesh: ShellMesh::Icosahedron { detail: 5 },
    },
    ShellSpec {
        scale: 1.004,
        opacity: 0.1,
        mesh: ShellMesh::UvSphere {
            segments: 48,
            rings: 48,
        },
    },
    ShellSpec {
        scale: 1.005,
        opacity: 0.05,
        mesh: ShellMesh::UvSphere {
            segments: 96,
            rings: 48,
        },
    },
];

/// Globe construction parameters. City lists are injected so tests can run
/// against small synthetic sets.
#[derive(Clone, Debug)]
pub struct GlobeConfig {
    pub radius: f32,
    pub group_scale: f32,
    /// Radius markers sit at; slightly above `radius` to avoid z-fighting.
    pub marker_radius: f32,
    /// Base spin rate in radians per second.
    pub rotation_rate: f32,
    pub cloud_rate_multiplier: f32,
    pub capitals: Vec<GeoPoint>,
    pub cities: Vec<CityMarker>,
}

impl Default for GlobeConfig {
    fn default() -> Self {
        Self {
            radius: GLOBE_RADIUS,
            group_scale: GLOBE_SCALE,
            marker_radius: MARKER_RADIUS,
            rotation_rate: EARTH_ROTATION_RATE,
            cloud_rate_multiplier: CLOUD_RATE_MULTIPLIER,
            capitals: geo::CAPITAL_CITIES.to_vec(),
            cities: geo::MAJOR_CITIES.to_vec(),
        }
    }
}

/// A placed marker in the sphere's local (unrotated) frame.
#[derive(Clone, Copy, Debug)]
pub struct Marker {
    pub local_position: Vec3,
    pub dot_radius: f32,
    /// Glow sphere radius; zero for plain city dots.
    pub glow_radius: f32,
    pub glow_opacity: f32,
    /// Stem length toward the surface; zero for plain city dots.
    pub stem_length: f32,
}

/// Rotating globe with markers baked into its local frame.
///
/// Markers are projected exactly once at construction; because they live in
/// the sphere's local coordinates, applying the sphere's per-frame rotation
/// keeps them locked to the surface at any frame rate.
pub struct Globe {
    pub config: GlobeConfig,
    pub capital_markers: Vec<Marker>,
    pub city_markers: Vec<Marker>,
}

impl Globe {
    pub fn new(config: GlobeConfig) -> Self {
        let capital_markers = config
            .capitals
            .iter()
            .map(|c| Marker {
                local_position: geo::project(c.latitude, c.longitude, config.marker_radius),
                dot_radius: MARKER_DOT_RADIUS,
                glow_radius: MARKER_GLOW_RADIUS,
                glow_opacity: MARKER_GLOW_OPACITY,
                stem_length: MARKER_STEM_LENGTH,
            })
            .collect();
        let city_markers = config
            .cities
            .iter()
            .map(|c| Marker {
                local_position: geo::project(
                    c.point.latitude,
                    c.point.longitude,
                    config.marker_radius,
                ),
                dot_radius: c.size,
                glow_radius: 0.0,
                glow_opacity: 0.0,
                stem_length: 0.0,
            })
            .collect();
        Self {
            config,
            capital_markers,
            city_markers,
        }
    }

    /// Spin angle of the surface (and grid shells, atmosphere, markers).
    pub fn rotation_y(&self, elapsed: f32) -> f32 {
        elapsed * self.config.rotation_rate
    }

    /// Spin angle of the cloud shell, slightly faster than the surface.
    pub fn cloud_rotation_y(&self, elapsed: f32) -> f32 {
        elapsed * self.config.rotation_rate * self.config.cloud_rate_multiplier
    }

    /// Model transform for the surface, shells and markers at `elapsed`.
    pub fn model_matrix(&self, elapsed: f32) -> Mat4 {
        Mat4::from_scale(Vec3::splat(self.config.group_scale))
            * Mat4::from_rotation_y(self.rotation_y(elapsed))
    }

    /// Model transform for the cloud shell at `elapsed`.
    pub fn cloud_model_matrix(&self, elapsed: f32) -> Mat4 {
        Mat4::from_scale(Vec3::splat(self.config.group_scale * CLOUD_SHELL_SCALE))
            * Mat4::from_rotation_y(self.cloud_rotation_y(elapsed))
    }

    /// Scale and opacity for the atmosphere glow shell.
    pub fn atmosphere_shell(&self) -> ShellSpec {
        ShellSpec {
            scale: ATMOSPHERE_SHELL_SCALE,
            opacity: ATMOSPHERE_SHELL_OPACITY,
            mesh: ShellMesh::UvSphere {
                segments: 64,
                rings: 64,
            },
        }
    }

    /// Cloud shell spec (textured, not wireframe; mesh kind is nominal).
    pub fn cloud_shell(&self) -> ShellSpec {
        ShellSpec {
            scale: CLOUD_SHELL_SCALE,
            opacity: CLOUD_SHELL_OPACITY,
            mesh: ShellMesh::UvSphere {
                segments: 64,
                rings: 64,
            },
        }
    }
}
