//! Fan placement against the static poles
//!
//! The fan is moved by the surrounding application one axis at a time. Each
//! move is checked against the poles; a hit yields a corrected placement and
//! tells the caller on which side the fan is now blocked.

use crate::geometry::{closest_point_on_segment, Capsule};
use glam::Vec3;

/// Horizontal axis a fan move is made along
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Axis {
    X,
    Y,
}

impl Axis {
    pub fn other(self) -> Axis {
        match self {
            Axis::X => Axis::Y,
            Axis::Y => Axis::X,
        }
    }

    pub fn component(self, v: Vec3) -> f32 {
        match self {
            Axis::X => v.x,
            Axis::Y => v.y,
        }
    }
}

/// Which side of one axis the fan is pinned against
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct AxisBlock {
    pub min: bool,
    pub max: bool,
}

impl AxisBlock {
    pub const FREE: AxisBlock = AxisBlock {
        min: false,
        max: false,
    };

    pub fn is_blocked(&self) -> bool {
        self.min || self.max
    }
}

/// Blocking flags for both horizontal axes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct BlockingFlags {
    pub x: AxisBlock,
    pub y: AxisBlock,
}

impl BlockingFlags {
    pub fn axis(&self, axis: Axis) -> AxisBlock {
        match axis {
            Axis::X => self.x,
            Axis::Y => self.y,
        }
    }

    pub fn axis_mut(&mut self, axis: Axis) -> &mut AxisBlock {
        match axis {
            Axis::X => &mut self.x,
            Axis::Y => &mut self.y,
        }
    }

    pub fn clear(&mut self) {
        *self = BlockingFlags::default();
    }

    /// Fold a query result into the flags
    pub fn apply(&mut self, axis: Axis, outcome: Option<&FanCorrection>) {
        match outcome {
            Some(correction) => {
                *self.axis_mut(axis) = AxisBlock::FREE;
                *self.axis_mut(axis.other()) = correction.block;
            }
            None => self.clear(),
        }
    }
}

/// Placement the fan must take after hitting a pole
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FanCorrection {
    pub position: Vec3,
    /// Index of the pole that was hit
    pub pole: usize,
    /// Flags for the axis other than the queried one
    pub block: AxisBlock,
}

/// Check a fan of `fan_radius` at `fan_position` against the poles
///
/// The first pole closer than the sum of radii wins. The correction pushes
/// the fan onto the pole capsule inflated by the fan radius, and reports
/// whether the pole lies on the min or max side of the fan along the axis
/// other than `axis`.
pub fn query_fan_collision(
    fan_position: Vec3,
    fan_radius: f32,
    poles: &[Capsule],
    axis: Axis,
) -> Option<FanCorrection> {
    let (index, pole) = poles
        .iter()
        .enumerate()
        .find(|(_, pole)| pole.distance_to_axis(fan_position) < fan_radius + pole.radius)?;

    let combined = pole.with_radius(fan_radius + pole.radius);
    let position = combined.project_to_surface(fan_position);

    let side = axis.other();
    let contact = closest_point_on_segment(fan_position, pole.start, pole.end);
    let block = if side.component(contact) < side.component(fan_position) {
        AxisBlock {
            min: true,
            max: false,
        }
    } else {
        AxisBlock {
            min: false,
            max: true,
        }
    };

    Some(FanCorrection {
        position,
        pole: index,
        block,
    })
}
