use crate::config::SceneConfig;
use crate::divergence::Divergence;
use crate::error::ClothError;
use crate::scene::{ClothId, Scene};

/// State of one cloth at the end of a run
#[derive(Debug, Clone, PartialEq)]
pub struct ClothSummary {
    pub id: ClothId,
    pub particles: usize,
    pub min_height: f32,
    /// Over unpinned samples
    pub max_speed: f32,
}

/// Final result of running a scene
#[derive(Debug)]
pub struct SimulationResult {
    pub frames: usize,
    pub ticks: usize,
    pub halted: bool,
    pub diverged: Option<(ClothId, Divergence)>,
    pub cloths: Vec<ClothSummary>,
}

/// Main entry point: build a scene and run it for `frames` frames
pub fn run_scene(config: &SceneConfig, frames: usize) -> Result<SimulationResult, ClothError> {
    let mut scene = Scene::from_config(config)?;
    Ok(run_frames(&mut scene, frames))
}

/// Run `frames` frames on an existing scene, stopping at the first halt
pub fn run_frames(scene: &mut Scene, frames: usize) -> SimulationResult {
    let mut ticks = 0;
    let mut frames_run = 0;
    let mut diverged = None;

    for _ in 0..frames {
        if scene.is_halted() {
            break;
        }
        let report = scene.frame(true);
        ticks += report.ticks;
        frames_run += 1;
        if report.diverged.is_some() {
            diverged = report.diverged;
        }
    }

    SimulationResult {
        frames: frames_run,
        ticks,
        halted: scene.is_halted(),
        diverged,
        cloths: summarize_cloths(scene),
    }
}

/// Summaries of every cloth in id order
pub fn summarize_cloths(scene: &Scene) -> Vec<ClothSummary> {
    scene
        .cloths()
        .map(|(id, cloth)| ClothSummary {
            id: id.clone(),
            particles: cloth.grid.len(),
            min_height: cloth.grid.min_height(),
            max_speed: cloth.max_free_speed(),
        })
        .collect()
}
