//! Positional constraints: pins, floor and obstacle collisions
//!
//! Constraints only move positions. Velocities are left untouched, so a
//! projected particle keeps its momentum into the next tick.

use crate::cloth::ClothInstance;
use crate::geometry::{Capsule, Sphere};
use glam::Vec3;
use serde::{Deserialize, Serialize};

/// Lift applied to particles that fell through the floor
pub const FLOOR_EPSILON: f32 = 0.001;

/// Inflation of the sphere obstacle radius
pub const SPHERE_MARGIN: f32 = 0.01;

/// Radius of the capsule the cloth collides with around the fan
pub const FAN_CLOTH_RADIUS: f32 = 1.55;

/// Radius of the fan when it is moved against the poles
pub const FAN_BODY_RADIUS: f32 = 1.2;

/// Radius of a clothesline pole
pub const POLE_RADIUS: f32 = 0.3;

/// Movable fan obstacle
///
/// The fan is a capsule centred on its reported position and stretched by
/// `half_extent` either way along `axis`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FanObstacle {
    pub axis: Vec3,
    pub half_extent: f32,
    /// Radius used against cloth particles
    pub cloth_radius: f32,
    /// Radius used against the poles
    pub body_radius: f32,
}

impl Default for FanObstacle {
    fn default() -> Self {
        Self {
            axis: Vec3::Z,
            half_extent: 1.0,
            cloth_radius: FAN_CLOTH_RADIUS,
            body_radius: FAN_BODY_RADIUS,
        }
    }
}

impl FanObstacle {
    /// Cloth collision capsule when the fan stands at `position`
    pub fn capsule_at(&self, position: Vec3) -> Capsule {
        let reach = self.axis.normalize_or_zero() * self.half_extent;
        Capsule::new(position - reach, position + reach, self.cloth_radius)
    }
}

/// Static scene geometry the cloth collides with
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Obstacles {
    /// Height of the floor plane
    pub ground_z: f32,
    #[serde(default)]
    pub sphere: Option<Sphere>,
    #[serde(default)]
    pub fan: Option<FanObstacle>,
    #[serde(default)]
    pub poles: Vec<Capsule>,
}

impl Default for Obstacles {
    fn default() -> Self {
        Self {
            ground_z: -1.0,
            sphere: None,
            fan: None,
            poles: Vec::new(),
        }
    }
}

/// Project the cloth's positions onto every constraint, in a fixed order:
/// pins, floor, sphere, fan, poles.
///
/// Later projections may undo earlier ones; no iteration is done.
pub fn apply_constraints(cloth: &mut ClothInstance, obstacles: &Obstacles, fan_position: Vec3) {
    let ClothInstance { grid, fixed, .. } = cloth;

    for pin in fixed.iter() {
        grid.position[(pin.u, pin.v)] = pin.position;
    }

    let positions = grid.position.as_mut_slice();

    for p in positions.iter_mut() {
        if p.z < obstacles.ground_z {
            p.z = obstacles.ground_z + FLOOR_EPSILON;
        }
    }

    if let Some(sphere) = &obstacles.sphere {
        let radius = sphere.radius + SPHERE_MARGIN;
        for p in positions.iter_mut() {
            let offset = *p - sphere.center;
            if offset.length() < radius {
                // A particle at the exact centre is pushed straight up
                *p = sphere.center + radius * offset.try_normalize().unwrap_or(Vec3::Z);
            }
        }
    }

    if let Some(fan) = &obstacles.fan {
        push_out_of_capsule(positions, &fan.capsule_at(fan_position));
    }

    for pole in &obstacles.poles {
        push_out_of_capsule(positions, pole);
    }
}

fn push_out_of_capsule(positions: &mut [Vec3], capsule: &Capsule) {
    for p in positions.iter_mut() {
        if capsule.contains(*p) {
            *p = capsule.project_to_surface(*p);
        }
    }
}
