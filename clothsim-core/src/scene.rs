//! A set of cloths simulated together against shared obstacles

use crate::cloth::ClothInstance;
use crate::collision::{query_fan_collision, Axis, BlockingFlags, FanCorrection};
use crate::config::{SceneConfig, SimulationConfig};
use crate::constraint::{apply_constraints, Obstacles, FAN_BODY_RADIUS};
use crate::divergence::{find_divergence, Divergence};
use crate::error::ClothError;
use crate::forces::compute_forces;
use crate::integrator::step;
use glam::Vec3;
use std::collections::BTreeMap;

pub type ClothId = String;

/// Obstacle state that changes while the simulation runs
///
/// Only the owning [`Scene`] writes it.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct ObstacleState {
    pub fan_position: Vec3,
    /// Current yaw of the fan head around +Z, in radians
    pub fan_angle: f32,
    pub blocking: BlockingFlags,
}

/// Outcome of one displayed frame
#[derive(Debug, Clone, PartialEq)]
pub struct FrameReport {
    pub ticks: usize,
    pub halted: bool,
    pub diverged: Option<(ClothId, Divergence)>,
}

/// Cloths, obstacles and run state
///
/// A divergence in any cloth halts the whole scene until [`Scene::reset`].
#[derive(Debug, Clone)]
pub struct Scene {
    cloths: BTreeMap<ClothId, ClothInstance>,
    obstacles: Obstacles,
    config: SimulationConfig,
    state: ObstacleState,
    halted: bool,
    elapsed: f32,
}

impl Scene {
    pub fn new(config: SimulationConfig, obstacles: Obstacles) -> Result<Self, ClothError> {
        config.validate()?;
        Ok(Self {
            cloths: BTreeMap::new(),
            obstacles,
            config,
            state: ObstacleState::default(),
            halted: false,
            elapsed: 0.0,
        })
    }

    pub fn from_config(config: &SceneConfig) -> Result<Self, ClothError> {
        let mut scene = Self::new(config.simulation, config.obstacles.clone())?;
        scene.state.fan_position = config.fan_position;
        for entry in &config.cloths {
            let cloth = ClothInstance::new(entry.layout.clone(), entry.params)?;
            scene.add_cloth(entry.id.clone(), cloth)?;
        }
        log::info!("scene built with {} cloths", scene.cloths.len());
        Ok(scene)
    }

    pub fn add_cloth(
        &mut self,
        id: impl Into<ClothId>,
        cloth: ClothInstance,
    ) -> Result<(), ClothError> {
        let id = id.into();
        if self.cloths.contains_key(&id) {
            return Err(ClothError::DuplicateCloth(id));
        }
        self.cloths.insert(id, cloth);
        Ok(())
    }

    pub fn cloth(&self, id: &str) -> Result<&ClothInstance, ClothError> {
        self.cloths
            .get(id)
            .ok_or_else(|| ClothError::UnknownCloth(id.to_string()))
    }

    pub fn cloth_mut(&mut self, id: &str) -> Result<&mut ClothInstance, ClothError> {
        self.cloths
            .get_mut(id)
            .ok_or_else(|| ClothError::UnknownCloth(id.to_string()))
    }

    pub fn cloths(&self) -> impl Iterator<Item = (&ClothId, &ClothInstance)> {
        self.cloths.iter()
    }

    pub fn len(&self) -> usize {
        self.cloths.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cloths.is_empty()
    }

    pub fn config(&self) -> &SimulationConfig {
        &self.config
    }

    pub fn obstacles(&self) -> &Obstacles {
        &self.obstacles
    }

    pub fn state(&self) -> &ObstacleState {
        &self.state
    }

    pub fn is_halted(&self) -> bool {
        self.halted
    }

    /// Simulated time since the last reset
    pub fn elapsed(&self) -> f32 {
        self.elapsed
    }

    /// Wind direction for the current fan head angle
    pub fn wind_direction(&self) -> Vec3 {
        self.config.wind.direction_at(self.state.fan_angle)
    }

    /// Point the wind blows from, following the fan
    pub fn wind_source(&self) -> Vec3 {
        self.config.wind.source_at(self.state.fan_position)
    }

    /// Advance every cloth by one time step
    ///
    /// Does nothing once the scene is halted. Returns the first cloth found
    /// diverged during this tick, which also halts the scene.
    pub fn tick(&mut self) -> Option<(ClothId, Divergence)> {
        if self.halted {
            return None;
        }

        let dt = self.config.dt;
        let wind = self.config.wind;
        let wind_source = self.wind_source();
        let wind_direction = self.wind_direction();
        let mut diverged = None;

        for (id, cloth) in self.cloths.iter_mut() {
            compute_forces(cloth, &wind, wind_source, wind_direction);
            step(cloth, dt);
            apply_constraints(cloth, &self.obstacles, self.state.fan_position);

            if let Some(divergence) = find_divergence(&cloth.grid) {
                log::warn!("cloth '{}' diverged: {}", id, divergence);
                if diverged.is_none() {
                    diverged = Some((id.clone(), divergence));
                }
            }
        }

        self.elapsed += dt;
        if diverged.is_some() {
            log::info!("simulation halted at t = {:.3}s", self.elapsed);
            self.halted = true;
        }
        diverged
    }

    /// Run one displayed frame
    ///
    /// When `run` is set and the scene is not halted, the fan head is swept
    /// and `ticks_per_frame` ticks are computed. Normals are refreshed in any
    /// case so the next wind evaluation sees the current surface.
    pub fn frame(&mut self, run: bool) -> FrameReport {
        let mut ticks = 0;
        let mut diverged = None;

        if run && !self.halted {
            self.state.fan_angle = (-self.config.fan_rotation_speed * self.elapsed).sin();
            while ticks < self.config.ticks_per_frame && !self.halted {
                diverged = self.tick();
                ticks += 1;
            }
        }

        for cloth in self.cloths.values_mut() {
            cloth.grid.recompute_normals();
        }

        FrameReport {
            ticks,
            halted: self.halted,
            diverged,
        }
    }

    /// Rebuild every cloth from its layout and resume
    pub fn reset(&mut self) -> Result<(), ClothError> {
        for cloth in self.cloths.values_mut() {
            cloth.reset()?;
        }
        self.halted = false;
        self.elapsed = 0.0;
        self.state.fan_angle = 0.0;
        log::debug!("scene reset");
        Ok(())
    }

    /// Rebuild every cloth with `samples` per edge and resume
    pub fn set_samples(&mut self, samples: usize) -> Result<(), ClothError> {
        for cloth in self.cloths.values_mut() {
            cloth.rebuild(samples)?;
        }
        self.halted = false;
        self.elapsed = 0.0;
        self.state.fan_angle = 0.0;
        log::debug!("scene resampled to {}x{}", samples, samples);
        Ok(())
    }

    /// Move the fan to `target` along `axis`, resolving pole collisions
    ///
    /// The blocking flags are updated from the query and the fan ends up at
    /// the corrected placement, or at `target` when nothing was hit.
    pub fn move_fan(&mut self, target: Vec3, axis: Axis) -> Option<FanCorrection> {
        let radius = self
            .obstacles
            .fan
            .map(|fan| fan.body_radius)
            .unwrap_or(FAN_BODY_RADIUS);
        let correction = query_fan_collision(target, radius, &self.obstacles.poles, axis);
        self.state.blocking.apply(axis, correction.as_ref());
        self.state.fan_position = correction.map_or(target, |c| c.position);
        correction
    }
}
