//! Test helper utilities for clothsim tests

use crate::cloth::{ClothInstance, ClothLayout, ClothParams};
use crate::config::SceneConfig;
use crate::grid::Corners;
use crate::runtime::SimulationResult;
use glam::Vec3;
use std::path::PathBuf;

/// Check if two f32 values are approximately equal within tolerance
pub fn approx_eq_f32(a: f32, b: f32, tol: f32) -> bool {
    (a - b).abs() <= tol
}

/// Check if two vectors are approximately equal component-wise
pub fn approx_eq_vec3(a: Vec3, b: Vec3, tol: f32) -> bool {
    a.abs_diff_eq(b, tol)
}

/// Path of a fixture under `tests/data`
pub fn test_data_path(filename: &str) -> PathBuf {
    let mut path = PathBuf::from(env!("CARGO_MANIFEST_DIR"));
    path.push("tests");
    path.push("data");
    path.push(filename);
    path
}

/// Load a scene fixture from `tests/data`
pub fn load_scene(filename: &str) -> Result<SceneConfig, Box<dyn std::error::Error>> {
    Ok(SceneConfig::from_file(&test_data_path(filename))?)
}

/// Horizontal square cloth of side `size` at height `z`, corner at the origin
pub fn flat_layout(samples: usize, size: f32, z: f32) -> ClothLayout {
    ClothLayout {
        corners: Corners::new(
            Vec3::new(0.0, 0.0, z),
            Vec3::new(size, 0.0, z),
            Vec3::new(size, size, z),
            Vec3::new(0.0, size, z),
        ),
        nx: samples,
        ny: samples,
        pins: Vec::new(),
    }
}

/// Flat cloth whose rest lengths match its initial layout
pub fn flat_cloth(samples: usize, size: f32, z: f32, pins: &[(usize, usize)]) -> ClothInstance {
    let mut layout = flat_layout(samples, size, z);
    layout.pins = pins.to_vec();
    let params = ClothParams {
        width: size,
        height: size,
        ..ClothParams::default()
    };
    ClothInstance::new(layout, params).expect("valid test cloth")
}

/// Compare two simulation results with tolerance
pub fn results_approx_equal(a: &SimulationResult, b: &SimulationResult, tol: f32) -> bool {
    if a.halted != b.halted || a.ticks != b.ticks || a.cloths.len() != b.cloths.len() {
        return false;
    }

    for (a_cloth, b_cloth) in a.cloths.iter().zip(b.cloths.iter()) {
        if a_cloth.id != b_cloth.id || a_cloth.particles != b_cloth.particles {
            return false;
        }
        if !approx_eq_f32(a_cloth.min_height, b_cloth.min_height, tol)
            || !approx_eq_f32(a_cloth.max_speed, b_cloth.max_speed, tol)
        {
            return false;
        }
    }

    true
}
