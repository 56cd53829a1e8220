//! Point, segment and capsule helpers shared by the constraint solver and
//! the fan collision query.

use glam::Vec3;
use serde::{Deserialize, Serialize};

/// Distance under which the far-cap branch of [`Capsule::project_to_surface`]
/// snaps to an endpoint. Not tied to the capsule radius.
pub const FAR_CAP_THRESHOLD: f32 = 0.5;

/// Distance from `p` to the segment `[a, b]`
pub fn point_segment_distance(p: Vec3, a: Vec3, b: Vec3) -> f32 {
    p.distance(closest_point_on_segment(p, a, b))
}

/// Point of `[a, b]` nearest to `p`
pub fn closest_point_on_segment(p: Vec3, a: Vec3, b: Vec3) -> Vec3 {
    let ab = b - a;
    let len_sq = ab.length_squared();
    if len_sq == 0.0 {
        return a;
    }
    let t = ((p - a).dot(ab) / len_sq).clamp(0.0, 1.0);
    a + t * ab
}

/// A segment swept by a sphere
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Capsule {
    pub start: Vec3,
    pub end: Vec3,
    pub radius: f32,
}

impl Capsule {
    pub fn new(start: Vec3, end: Vec3, radius: f32) -> Self {
        Self { start, end, radius }
    }

    /// Same axis, different radius
    pub fn with_radius(&self, radius: f32) -> Self {
        Self { radius, ..*self }
    }

    pub fn distance_to_axis(&self, p: Vec3) -> f32 {
        point_segment_distance(p, self.start, self.end)
    }

    pub fn contains(&self, p: Vec3) -> bool {
        self.distance_to_axis(p) < self.radius
    }

    /// Move `p` onto the capsule surface
    ///
    /// Points beyond either end are pushed radially from that endpoint, the
    /// rest radially from their foot on the axis. When the radial offset from
    /// the foot is longer than the radius, the endpoint of the closer
    /// half-segment is used instead, provided it lies within
    /// [`FAR_CAP_THRESHOLD`]; this branch is approximate.
    pub fn project_to_surface(&self, p: Vec3) -> Vec3 {
        let axis = self.end - self.start;
        let length = axis.length();
        if length == 0.0 {
            return self.push_from(self.start, p, axis);
        }
        let dir = axis / length;
        let t = (p - self.start).dot(dir);

        if t <= 0.0 {
            return self.push_from(self.start, p, dir);
        }
        if t >= length {
            return self.push_from(self.end, p, dir);
        }

        let foot = self.start + t * dir;
        if (p - foot).length() > self.radius {
            let to_start = point_segment_distance(p, self.start, foot);
            let to_end = point_segment_distance(p, foot, self.end);
            if to_start <= to_end && to_start < FAR_CAP_THRESHOLD {
                return self.push_from(self.start, p, dir);
            }
            if to_end < to_start && to_end < FAR_CAP_THRESHOLD {
                return self.push_from(self.end, p, dir);
            }
        }
        self.push_from(foot, p, dir)
    }

    /// `center + radius * normalize(p - center)`, picking a direction
    /// orthogonal to `axis` when `p` sits on `center`
    fn push_from(&self, center: Vec3, p: Vec3, axis: Vec3) -> Vec3 {
        let radial = (p - center)
            .try_normalize()
            .unwrap_or_else(|| axis.try_normalize().unwrap_or(Vec3::Z).any_orthonormal_vector());
        center + self.radius * radial
    }
}

/// A sphere obstacle
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Sphere {
    pub center: Vec3,
    pub radius: f32,
}
