pub mod cloth;
pub mod collision;
pub mod config;
pub mod constraint;
pub mod divergence;
pub mod error;
pub mod forces;
pub mod geometry;
pub mod grid;
pub mod integrator;
pub mod runtime;
pub mod scene;

pub use cloth::{ClothInstance, ClothLayout, ClothParams, FixedPositions, PinnedSample};
pub use collision::{query_fan_collision, Axis, AxisBlock, BlockingFlags, FanCorrection};
pub use config::{ClothConfig, SceneConfig, SimulationConfig};
pub use constraint::{apply_constraints, FanObstacle, Obstacles};
pub use divergence::{detect_divergence, find_divergence, Divergence};
pub use error::ClothError;
pub use forces::{compute_forces, WindModel, WindProfile};
pub use geometry::{point_segment_distance, Capsule, Sphere};
pub use grid::{Corners, Grid2D, ParticleGrid};
pub use runtime::{run_frames, run_scene, summarize_cloths, ClothSummary, SimulationResult};
pub use scene::{ClothId, FrameReport, ObstacleState, Scene};

// Test helpers module (public for integration tests)
// Always compiled - integration tests are separate crates and need access
pub mod tests;
