//! A single simulated cloth: particle grid, physical parameters and pins

use crate::error::ClothError;
use crate::grid::{Corners, ParticleGrid, RestLengths};
use glam::Vec3;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Physical constants of one cloth
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ClothParams {
    /// Total mass, spread uniformly over every particle
    pub mass_total: f32,
    /// Spring stiffness K
    pub stiffness: f32,
    /// Velocity damping coefficient mu
    pub damping: f32,
    /// Physical extent along u
    pub width: f32,
    /// Physical extent along v
    pub height: f32,
}

impl Default for ClothParams {
    fn default() -> Self {
        Self {
            mass_total: 0.5,
            stiffness: 5.0,
            damping: 15.0,
            width: 1.0,
            height: 1.0,
        }
    }
}

impl ClothParams {
    pub fn validate(&self) -> Result<(), ClothError> {
        ClothError::check_positive("mass_total", self.mass_total)?;
        ClothError::check_positive("stiffness", self.stiffness)?;
        ClothError::check_positive("width", self.width)?;
        ClothError::check_positive("height", self.height)?;
        if !self.damping.is_finite() || self.damping < 0.0 {
            return Err(ClothError::InvalidParameter {
                name: "damping",
                value: self.damping,
            });
        }
        Ok(())
    }

    /// Mass carried by each of `count` particles
    pub fn mass_per_particle(&self, count: usize) -> f32 {
        self.mass_total / count as f32
    }
}

/// A grid sample held at a fixed position
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PinnedSample {
    pub u: usize,
    pub v: usize,
    pub position: Vec3,
}

/// Pinned samples keyed by grid coordinate
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FixedPositions {
    samples: BTreeMap<(usize, usize), PinnedSample>,
}

impl FixedPositions {
    pub fn new() -> Self {
        Self::default()
    }

    /// Pin `(u, v)` where the grid currently holds it
    pub fn pin_current(
        &mut self,
        grid: &ParticleGrid,
        u: usize,
        v: usize,
    ) -> Result<(), ClothError> {
        let position = *grid.position.get(u, v).ok_or(ClothError::PinOutOfBounds {
            u,
            v,
            nx: grid.nx(),
            ny: grid.ny(),
        })?;
        self.samples.insert((u, v), PinnedSample { u, v, position });
        Ok(())
    }

    pub fn clear(&mut self) {
        self.samples.clear();
    }

    pub fn len(&self) -> usize {
        self.samples.len()
    }

    pub fn is_empty(&self) -> bool {
        self.samples.is_empty()
    }

    pub fn get(&self, u: usize, v: usize) -> Option<&PinnedSample> {
        self.samples.get(&(u, v))
    }

    pub fn iter(&self) -> impl Iterator<Item = &PinnedSample> {
        self.samples.values()
    }
}

/// What is needed to rebuild a cloth from scratch
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ClothLayout {
    pub corners: Corners,
    /// Samples along u
    pub nx: usize,
    /// Samples along v
    pub ny: usize,
    /// Grid coordinates pinned at their initial position
    #[serde(default)]
    pub pins: Vec<(usize, usize)>,
}

impl ClothLayout {
    /// Square sampling with both top corners pinned, the clothesline default
    pub fn hanging(corners: Corners, samples: usize) -> Self {
        Self {
            corners,
            nx: samples,
            ny: samples,
            pins: vec![(0, 0), (0, samples.saturating_sub(1))],
        }
    }

    /// Same layout resampled to `samples` per edge
    ///
    /// Pins are remapped so that edge samples stay on the same edge.
    pub fn resampled(&self, samples: usize) -> Self {
        let remap = |k: usize, n: usize| -> usize {
            if n <= 1 {
                0
            } else {
                ((k as f32 / (n - 1) as f32) * samples.saturating_sub(1) as f32).round() as usize
            }
        };
        let mut pins: Vec<(usize, usize)> = self
            .pins
            .iter()
            .map(|&(u, v)| (remap(u, self.nx), remap(v, self.ny)))
            .collect();
        pins.sort_unstable();
        pins.dedup();
        Self {
            corners: self.corners,
            nx: samples,
            ny: samples,
            pins,
        }
    }
}

/// Grid, parameters and pins of one cloth
#[derive(Debug, Clone)]
pub struct ClothInstance {
    pub grid: ParticleGrid,
    pub params: ClothParams,
    pub fixed: FixedPositions,
    layout: ClothLayout,
}

impl ClothInstance {
    pub fn new(layout: ClothLayout, params: ClothParams) -> Result<Self, ClothError> {
        params.validate()?;
        let grid = ParticleGrid::from_corners(layout.nx, layout.ny, &layout.corners)?;
        let mut fixed = FixedPositions::new();
        for &(u, v) in &layout.pins {
            fixed.pin_current(&grid, u, v)?;
        }
        log::debug!(
            "cloth built with {}x{} samples, {} pinned",
            layout.nx,
            layout.ny,
            fixed.len()
        );
        Ok(Self {
            grid,
            params,
            fixed,
            layout,
        })
    }

    pub fn layout(&self) -> &ClothLayout {
        &self.layout
    }

    pub fn rest_lengths(&self) -> RestLengths {
        RestLengths::new(
            self.params.width,
            self.params.height,
            self.grid.nx(),
            self.grid.ny(),
        )
    }

    pub fn mass_per_particle(&self) -> f32 {
        self.params.mass_per_particle(self.grid.len())
    }

    /// Largest speed over the samples that are not pinned
    ///
    /// Pinned samples keep integrating velocity while their position is
    /// restored every tick, so their speed says nothing about the motion.
    pub fn max_free_speed(&self) -> f32 {
        let nx = self.grid.nx();
        self.grid
            .velocity
            .iter()
            .enumerate()
            .filter(|(k, _)| self.fixed.get(k % nx, k / nx).is_none())
            .map(|(_, v)| v.length())
            .fold(0.0, f32::max)
    }

    /// Throw away the simulated state and rebuild from the layout
    pub fn reset(&mut self) -> Result<(), ClothError> {
        *self = Self::new(self.layout.clone(), self.params)?;
        Ok(())
    }

    /// Rebuild with a different sample count per edge
    pub fn rebuild(&mut self, samples: usize) -> Result<(), ClothError> {
        *self = Self::new(self.layout.resampled(samples), self.params)?;
        Ok(())
    }
}
