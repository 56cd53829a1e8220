//! Tests for scene file loading

use clothsim_core::config::SceneConfig;
use clothsim_core::error::ClothError;
use clothsim_core::forces::WindProfile;
use clothsim_core::scene::Scene;
use clothsim_core::tests::test_helpers::{load_scene, test_data_path};
use glam::Vec3;

#[test]
fn test_single_cloth_fixture() {
    let config = load_scene("single_cloth.json").expect("Failed to load fixture");

    assert_eq!(config.cloths.len(), 1);
    let cloth = &config.cloths[0];
    assert_eq!(cloth.id, "sheet");
    assert_eq!((cloth.layout.nx, cloth.layout.ny), (6, 6));
    assert_eq!(cloth.layout.pins, vec![(0, 0), (0, 5)]);
    assert_eq!(cloth.layout.corners.p11, Vec3::new(1.0, 1.0, 2.0));

    assert_eq!(config.obstacles.ground_z, 0.0);
    let sphere = config.obstacles.sphere.expect("Sphere should be present");
    assert_eq!(sphere.center, Vec3::new(0.5, 0.5, 1.0));
    assert!(config.obstacles.fan.is_none());
    assert!(config.obstacles.poles.is_empty());

    assert_eq!(config.simulation.ticks_per_frame, 4);
    assert_eq!(config.simulation.wind.magnitude, 0.0);
    // Unlisted wind fields fall back to their defaults
    assert_eq!(config.simulation.wind.profile, WindProfile::Attenuated);
    assert_eq!(config.simulation.wind.direction, Vec3::NEG_X);
}

#[test]
fn test_missing_sections_use_defaults() {
    let config = SceneConfig::from_json(
        r#"{ "cloths": [ { "id": "a", "layout": {
            "corners": { "p00": [0,0,0], "p10": [1,0,0], "p11": [1,1,0], "p01": [0,1,0] },
            "nx": 4, "ny": 4 } } ] }"#,
    )
    .unwrap();

    assert!(config.cloths[0].layout.pins.is_empty());
    assert_eq!(config.cloths[0].params.mass_total, 0.5);
    assert_eq!(config.simulation.dt, 0.005);
    assert_eq!(config.obstacles.ground_z, -1.0);
    assert_eq!(config.fan_position, Vec3::ZERO);
}

#[test]
fn test_preset_round_trips_through_json() {
    let preset = SceneConfig::clothesline();
    let text = preset.to_json_pretty().unwrap();
    let parsed = SceneConfig::from_json(&text).unwrap();
    assert_eq!(parsed, preset);
}

#[test]
fn test_broken_file_is_a_format_error() {
    let result = load_scene("broken.json");
    let err = result.expect_err("Truncated JSON should not load");
    assert!(matches!(
        err.downcast_ref::<ClothError>(),
        Some(ClothError::SceneFormat(_))
    ));
}

#[test]
fn test_missing_file_is_an_io_error() {
    let result = SceneConfig::from_file(&test_data_path("does_not_exist.json"));
    assert!(matches!(result, Err(ClothError::Io(_))));
}

#[test]
fn test_coarse_grid_is_rejected_when_building() {
    let config = load_scene("tiny_grid.json").expect("Fixture itself is well formed");
    assert!(matches!(
        Scene::from_config(&config),
        Err(ClothError::InsufficientSamples { nx: 3, ny: 3 })
    ));
}

#[test]
fn test_invalid_time_step_is_rejected() {
    let mut config = load_scene("single_cloth.json").unwrap();
    config.simulation.dt = -0.01;
    assert!(matches!(
        Scene::from_config(&config),
        Err(ClothError::InvalidParameter { name: "dt", .. })
    ));
}

#[test]
fn test_duplicate_ids_are_rejected() {
    let mut config = load_scene("single_cloth.json").unwrap();
    let twin = config.cloths[0].clone();
    config.cloths.push(twin);
    assert!(matches!(
        Scene::from_config(&config),
        Err(ClothError::DuplicateCloth(id)) if id == "sheet"
    ));
}

#[test]
fn test_with_samples_resamples_layouts() {
    let config = load_scene("single_cloth.json").unwrap().with_samples(11);
    let layout = &config.cloths[0].layout;
    assert_eq!((layout.nx, layout.ny), (11, 11));
    assert_eq!(layout.pins, vec![(0, 0), (0, 10)]);
}
