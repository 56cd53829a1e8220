//! Structured particle grid and its fixed neighbor topology
//!
//! A cloth is an `nx` x `ny` array of particles addressed by `(u, v)`.
//! Every buffer is stored flat at index `u + nx * v`.

use crate::error::ClothError;
use glam::Vec3;
use serde::{Deserialize, Serialize};
use std::ops::{Index, IndexMut};

/// Smallest accepted sample count along either edge
pub const MIN_SAMPLES: usize = 4;

/// Dense 2D buffer addressed by `(u, v)`
#[derive(Debug, Clone, PartialEq)]
pub struct Grid2D<T> {
    nx: usize,
    ny: usize,
    data: Vec<T>,
}

impl<T: Clone> Grid2D<T> {
    pub fn filled(nx: usize, ny: usize, value: T) -> Self {
        Self {
            nx,
            ny,
            data: vec![value; nx * ny],
        }
    }
}

impl<T> Grid2D<T> {
    pub fn nx(&self) -> usize {
        self.nx
    }

    pub fn ny(&self) -> usize {
        self.ny
    }

    pub fn len(&self) -> usize {
        self.data.len()
    }

    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    pub fn index_of(&self, u: usize, v: usize) -> usize {
        u + self.nx * v
    }

    pub fn get(&self, u: usize, v: usize) -> Option<&T> {
        if u < self.nx && v < self.ny {
            self.data.get(self.index_of(u, v))
        } else {
            None
        }
    }

    pub fn as_slice(&self) -> &[T] {
        &self.data
    }

    pub fn as_mut_slice(&mut self) -> &mut [T] {
        &mut self.data
    }

    pub fn iter(&self) -> std::slice::Iter<'_, T> {
        self.data.iter()
    }
}

impl<T> Index<(usize, usize)> for Grid2D<T> {
    type Output = T;

    fn index(&self, (u, v): (usize, usize)) -> &T {
        &self.data[u + self.nx * v]
    }
}

impl<T> IndexMut<(usize, usize)> for Grid2D<T> {
    fn index_mut(&mut self, (u, v): (usize, usize)) -> &mut T {
        &mut self.data[u + self.nx * v]
    }
}

/// The four corners a flat cloth is stretched between
///
/// `p00` sits at `(0, 0)`, `p10` at `(nx-1, 0)`, `p11` at `(nx-1, ny-1)`
/// and `p01` at `(0, ny-1)`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Corners {
    pub p00: Vec3,
    pub p10: Vec3,
    pub p11: Vec3,
    pub p01: Vec3,
}

impl Corners {
    pub fn new(p00: Vec3, p10: Vec3, p11: Vec3, p01: Vec3) -> Self {
        Self { p00, p10, p11, p01 }
    }

    /// Bilinear interpolation, `s` and `t` in [0, 1]
    pub fn lerp(&self, s: f32, t: f32) -> Vec3 {
        (1.0 - s) * (1.0 - t) * self.p00
            + s * (1.0 - t) * self.p10
            + s * t * self.p11
            + (1.0 - s) * t * self.p01
    }
}

/// Position, velocity, force and normal buffers of one cloth
///
/// The four buffers always share the same dimensions. Changing the sample
/// count means building a new grid.
#[derive(Debug, Clone)]
pub struct ParticleGrid {
    pub position: Grid2D<Vec3>,
    pub velocity: Grid2D<Vec3>,
    pub force: Grid2D<Vec3>,
    pub normal: Grid2D<Vec3>,
    triangles: Vec<[usize; 3]>,
}

impl ParticleGrid {
    /// Build a flat grid stretched between `corners`, at rest
    pub fn from_corners(nx: usize, ny: usize, corners: &Corners) -> Result<Self, ClothError> {
        if nx < MIN_SAMPLES || ny < MIN_SAMPLES {
            return Err(ClothError::InsufficientSamples { nx, ny });
        }

        let mut position = Grid2D::filled(nx, ny, Vec3::ZERO);
        for v in 0..ny {
            for u in 0..nx {
                let s = u as f32 / (nx - 1) as f32;
                let t = v as f32 / (ny - 1) as f32;
                position[(u, v)] = corners.lerp(s, t);
            }
        }

        let mut triangles = Vec::with_capacity(2 * (nx - 1) * (ny - 1));
        for v in 0..ny - 1 {
            for u in 0..nx - 1 {
                let k00 = u + nx * v;
                let k10 = (u + 1) + nx * v;
                let k11 = (u + 1) + nx * (v + 1);
                let k01 = u + nx * (v + 1);
                triangles.push([k00, k10, k11]);
                triangles.push([k11, k01, k00]);
            }
        }

        let mut grid = Self {
            position,
            velocity: Grid2D::filled(nx, ny, Vec3::ZERO),
            force: Grid2D::filled(nx, ny, Vec3::ZERO),
            normal: Grid2D::filled(nx, ny, Vec3::Z),
            triangles,
        };
        grid.recompute_normals();
        Ok(grid)
    }

    pub fn nx(&self) -> usize {
        self.position.nx()
    }

    pub fn ny(&self) -> usize {
        self.position.ny()
    }

    /// Total number of particles
    pub fn len(&self) -> usize {
        self.position.len()
    }

    pub fn is_empty(&self) -> bool {
        self.position.is_empty()
    }

    pub fn triangles(&self) -> &[[usize; 3]] {
        &self.triangles
    }

    /// Area-weighted vertex normals from the triangulation
    ///
    /// A vertex whose accumulated normal vanishes keeps its previous value.
    pub fn recompute_normals(&mut self) {
        let positions = self.position.as_slice();
        let mut accum = vec![Vec3::ZERO; positions.len()];

        for &[a, b, c] in &self.triangles {
            let n = (positions[b] - positions[a]).cross(positions[c] - positions[a]);
            accum[a] += n;
            accum[b] += n;
            accum[c] += n;
        }

        for (normal, sum) in self.normal.as_mut_slice().iter_mut().zip(accum) {
            if let Some(n) = sum.try_normalize() {
                *normal = n;
            }
        }
    }

    /// Largest velocity magnitude over all particles
    pub fn max_speed(&self) -> f32 {
        self.velocity
            .iter()
            .map(|v| v.length())
            .fold(0.0, f32::max)
    }

    /// Lowest z coordinate over all particles
    pub fn min_height(&self) -> f32 {
        self.position
            .iter()
            .map(|p| p.z)
            .fold(f32::INFINITY, f32::min)
    }
}

/// Family of a spring in the grid topology
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SpringKind {
    /// Direct 4-connected neighbor
    Structural,
    /// Diagonal neighbor
    Shear,
    /// Neighbor two cells away along an axis
    Bend,
}

/// Relative position of a neighbor connected by a spring
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct NeighborOffset {
    pub du: isize,
    pub dv: isize,
    pub kind: SpringKind,
}

const fn offset(du: isize, dv: isize, kind: SpringKind) -> NeighborOffset {
    NeighborOffset { du, dv, kind }
}

/// Every spring attached to a particle, before bounds checks
pub const NEIGHBOR_OFFSETS: [NeighborOffset; 12] = [
    offset(1, 0, SpringKind::Structural),
    offset(-1, 0, SpringKind::Structural),
    offset(0, 1, SpringKind::Structural),
    offset(0, -1, SpringKind::Structural),
    offset(1, 1, SpringKind::Shear),
    offset(-1, -1, SpringKind::Shear),
    offset(1, -1, SpringKind::Shear),
    offset(-1, 1, SpringKind::Shear),
    offset(2, 0, SpringKind::Bend),
    offset(-2, 0, SpringKind::Bend),
    offset(0, 2, SpringKind::Bend),
    offset(0, -2, SpringKind::Bend),
];

impl NeighborOffset {
    /// Neighbor coordinates, or `None` when they fall outside the grid
    pub fn apply(&self, u: usize, v: usize, nx: usize, ny: usize) -> Option<(usize, usize)> {
        let nu = u.checked_add_signed(self.du)?;
        let nv = v.checked_add_signed(self.dv)?;
        (nu < nx && nv < ny).then_some((nu, nv))
    }
}

/// Spring rest lengths derived from the cloth's physical size
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RestLengths {
    pub u: f32,
    pub v: f32,
}

impl RestLengths {
    pub fn new(width: f32, height: f32, nx: usize, ny: usize) -> Self {
        Self {
            u: width / (nx as f32 - 1.0),
            v: height / (ny as f32 - 1.0),
        }
    }

    pub fn diagonal(&self) -> f32 {
        (self.u * self.u + self.v * self.v).sqrt()
    }

    pub fn for_offset(&self, offset: &NeighborOffset) -> f32 {
        match offset.kind {
            SpringKind::Shear => self.diagonal(),
            SpringKind::Structural | SpringKind::Bend => {
                let axis = if offset.du != 0 { self.u } else { self.v };
                axis * offset.du.unsigned_abs().max(offset.dv.unsigned_abs()) as f32
            }
        }
    }
}
