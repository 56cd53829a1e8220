//! Force accumulation: gravity, damping, grid springs and wind

use crate::cloth::ClothInstance;
use crate::grid::NEIGHBOR_OFFSETS;
use glam::{Quat, Vec3};
use serde::{Deserialize, Serialize};

/// Gravitational acceleration, z up
pub const GRAVITY: Vec3 = Vec3::new(0.0, 0.0, -9.81);

/// Wind magnitudes are entered on a 0-100 scale
const WIND_SCALE: f32 = 100.0;

/// How wind strength is shaped around the source
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum WindProfile {
    /// 30 degree cone, constant strength
    Classic,
    /// 40 degree cone, inverse-square falloff with distance
    #[default]
    Attenuated,
}

impl WindProfile {
    /// Half-angle of the cone of effect, in degrees
    pub fn cone_half_angle(&self) -> f32 {
        match self {
            WindProfile::Classic => 30.0,
            WindProfile::Attenuated => 40.0,
        }
    }

    fn effective_magnitude(&self, magnitude: f32, distance: f32) -> f32 {
        let scaled = magnitude / WIND_SCALE;
        match self {
            WindProfile::Classic => scaled,
            WindProfile::Attenuated => scaled / (distance * distance).max(1.0),
        }
    }
}

/// Directional wind blowing from the fan head
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct WindModel {
    pub magnitude: f32,
    /// Direction the fan faces at rest
    pub direction: Vec3,
    /// Position of the fan head relative to the fan
    pub source_offset: Vec3,
    pub profile: WindProfile,
}

impl Default for WindModel {
    fn default() -> Self {
        Self {
            magnitude: 0.0,
            direction: Vec3::NEG_X,
            source_offset: Vec3::ZERO,
            profile: WindProfile::default(),
        }
    }
}

impl WindModel {
    /// Wind direction once the source has yawed by `angle` radians around +Z
    pub fn direction_at(&self, angle: f32) -> Vec3 {
        Quat::from_rotation_z(angle) * self.direction
    }

    /// Point the wind blows from when the fan stands at `fan_position`
    pub fn source_at(&self, fan_position: Vec3) -> Vec3 {
        fan_position + self.source_offset
    }

    /// Force the wind blowing from `source` exerts on a particle at
    /// `position` with surface `normal`
    ///
    /// `direction` must be normalized.
    pub fn force_on(&self, source: Vec3, position: Vec3, normal: Vec3, direction: Vec3) -> Vec3 {
        let offset = position - source;
        let to_vertex = offset.normalize_or_zero();
        let cos_angle = to_vertex.dot(direction).clamp(-1.0, 1.0);
        if cos_angle.acos().to_degrees() > self.profile.cone_half_angle() {
            return Vec3::ZERO;
        }
        let projected = to_vertex.dot(normal);
        projected * normal * self.profile.effective_magnitude(self.magnitude, offset.length())
    }
}

/// Hookean spring force on `p` from a spring to `neighbor`
///
/// Coincident particles have no defined direction and contribute nothing.
pub fn spring_force(p: Vec3, neighbor: Vec3, stiffness: f32, rest: f32) -> Vec3 {
    let d = neighbor - p;
    let dist = d.length();
    if dist > 0.0 {
        stiffness * (dist - rest) * d / dist
    } else {
        Vec3::ZERO
    }
}

/// Overwrite the cloth's force buffer
///
/// `wind_source` and `wind_direction` place the fan head for this tick; the
/// rest of the wind description comes from `wind`.
pub fn compute_forces(
    cloth: &mut ClothInstance,
    wind: &WindModel,
    wind_source: Vec3,
    wind_direction: Vec3,
) {
    let m = cloth.mass_per_particle();
    let stiffness = cloth.params.stiffness;
    let mu = cloth.params.damping;
    let rest = cloth.rest_lengths();

    let grid = &mut cloth.grid;
    let (nx, ny) = (grid.nx(), grid.ny());
    let direction = wind_direction.normalize_or_zero();
    let wind_active = wind.magnitude != 0.0;

    for v in 0..ny {
        for u in 0..nx {
            let p = grid.position[(u, v)];
            let mut f = m * GRAVITY - mu * m * grid.velocity[(u, v)];

            for offset in &NEIGHBOR_OFFSETS {
                if let Some(n) = offset.apply(u, v, nx, ny) {
                    f += spring_force(p, grid.position[n], stiffness, rest.for_offset(offset));
                }
            }

            if wind_active {
                f += wind.force_on(wind_source, p, grid.normal[(u, v)], direction);
            }

            grid.force[(u, v)] = f;
        }
    }
}
