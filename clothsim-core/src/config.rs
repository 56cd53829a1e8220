//! Scene description files
//!
//! A scene is a JSON document listing cloths, obstacles and the simulation
//! settings. Vectors are written as `[x, y, z]`.

use crate::cloth::{ClothLayout, ClothParams};
use crate::constraint::{FanObstacle, Obstacles, POLE_RADIUS};
use crate::error::ClothError;
use crate::forces::{WindModel, WindProfile};
use crate::geometry::Capsule;
use crate::grid::Corners;
use glam::Vec3;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

/// Immutable per-run simulation settings
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SimulationConfig {
    /// Integration time step
    pub dt: f32,
    /// Ticks computed per displayed frame
    pub ticks_per_frame: usize,
    pub wind: WindModel,
    /// Angular speed of the fan head sweep
    pub fan_rotation_speed: f32,
}

impl Default for SimulationConfig {
    fn default() -> Self {
        Self {
            dt: 0.005,
            ticks_per_frame: 1,
            wind: WindModel::default(),
            fan_rotation_speed: 0.5,
        }
    }
}

impl SimulationConfig {
    pub fn validate(&self) -> Result<(), ClothError> {
        ClothError::check_positive("dt", self.dt)?;
        if self.ticks_per_frame == 0 {
            return Err(ClothError::InvalidParameter {
                name: "ticks_per_frame",
                value: 0.0,
            });
        }
        if !self.wind.magnitude.is_finite() || self.wind.magnitude < 0.0 {
            return Err(ClothError::InvalidParameter {
                name: "wind.magnitude",
                value: self.wind.magnitude,
            });
        }
        Ok(())
    }
}

/// One cloth entry of a scene file
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ClothConfig {
    pub id: String,
    pub layout: ClothLayout,
    #[serde(default)]
    pub params: ClothParams,
}

/// Everything needed to build a [`crate::scene::Scene`]
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SceneConfig {
    pub cloths: Vec<ClothConfig>,
    #[serde(default)]
    pub obstacles: Obstacles,
    #[serde(default)]
    pub simulation: SimulationConfig,
    /// Initial fan placement
    #[serde(default)]
    pub fan_position: Vec3,
}

impl SceneConfig {
    pub fn from_json(source: &str) -> Result<Self, ClothError> {
        Ok(serde_json::from_str(source)?)
    }

    pub fn from_file(path: &Path) -> Result<Self, ClothError> {
        let source = fs::read_to_string(path)?;
        Self::from_json(&source)
    }

    pub fn to_json_pretty(&self) -> Result<String, ClothError> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Resample every cloth to `samples` per edge
    pub fn with_samples(mut self, samples: usize) -> Self {
        for cloth in &mut self.cloths {
            cloth.layout = cloth.layout.resampled(samples);
        }
        self
    }

    /// Clotheslines around an oscillating fan
    ///
    /// The main line runs in front of the fan and along both of its sides,
    /// with three cloths in front, three on the right and five on the left.
    /// One more cloth hangs on a little line behind the fan.
    pub fn clothesline() -> Self {
        let samples = 20;
        let hanging = |id: &str, top_a: Vec3, top_b: Vec3, drop: f32| {
            let down = Vec3::new(0.0, 0.0, -drop);
            ClothConfig {
                id: id.to_string(),
                layout: ClothLayout::hanging(
                    Corners::new(top_a, top_a + down, top_b + down, top_b),
                    samples,
                ),
                params: ClothParams {
                    width: drop,
                    height: top_a.distance(top_b),
                    ..ClothParams::default()
                },
            }
        };
        let pole = |x: f32, y: f32, top: f32| {
            Capsule::new(Vec3::new(x, y, 0.0), Vec3::new(x, y, top), POLE_RADIUS)
        };
        let along_y = |id: &str, x: f32, y0: f32, y1: f32| {
            hanging(id, Vec3::new(x, y0, 3.0), Vec3::new(x, y1, 3.0), 1.6)
        };
        let along_x = |id: &str, y: f32, x0: f32, x1: f32, drop: f32| {
            hanging(id, Vec3::new(x0, y, 3.0), Vec3::new(x1, y, 3.0), drop)
        };

        Self {
            cloths: vec![
                along_y("front-1", -1.0, -3.4, -1.4),
                along_y("front-2", -1.0, -1.0, 1.0),
                along_y("front-3", -1.0, 1.4, 3.4),
                along_x("right-1", -6.0, -3.4, -1.4, 1.4),
                along_x("right-2", -6.0, -1.0, 1.0, 1.4),
                along_x("right-3", -6.0, 1.4, 3.4, 1.4),
                along_x("left-1", 6.0, -3.6, -2.4, 1.2),
                along_x("left-2", 6.0, -2.1, -0.9, 1.2),
                along_x("left-3", 6.0, -0.6, 0.6, 1.2),
                along_x("left-4", 6.0, 0.9, 2.1, 1.2),
                along_x("left-5", 6.0, 2.4, 3.6, 1.2),
                hanging("little-1", Vec3::new(5.0, -1.0, 2.0), Vec3::new(5.0, 1.0, 2.0), 1.0),
            ],
            obstacles: Obstacles {
                ground_z: 0.0,
                sphere: None,
                fan: Some(FanObstacle::default()),
                poles: vec![
                    pole(-1.0, -4.2, 3.2),
                    pole(-1.0, 4.2, 3.2),
                    pole(-4.0, -6.0, 3.2),
                    pole(4.0, -6.0, 3.2),
                    pole(-4.2, 6.0, 3.2),
                    pole(4.2, 6.0, 3.2),
                    pole(5.0, -1.8, 2.2),
                    pole(5.0, 1.8, 2.2),
                ],
            },
            simulation: SimulationConfig {
                dt: 0.005,
                ticks_per_frame: 5,
                wind: WindModel {
                    magnitude: 30.0,
                    direction: Vec3::NEG_X,
                    source_offset: Vec3::new(0.0, 0.0, 0.8),
                    profile: WindProfile::Attenuated,
                },
                fan_rotation_speed: 0.5,
            },
            fan_position: Vec3::new(2.0, 0.0, 1.0),
        }
    }
}
