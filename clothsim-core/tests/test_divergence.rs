//! Tests for divergence detection

use clothsim_core::divergence::{detect_divergence, find_divergence, Divergence};
use clothsim_core::tests::test_helpers::flat_cloth;
use glam::Vec3;

#[test]
fn test_nan_force_diverges() {
    let mut cloth = flat_cloth(4, 1.0, 0.0, &[]);
    cloth.grid.force[(2, 1)] = Vec3::new(f32::NAN, 0.0, 0.0);

    assert!(detect_divergence(&cloth.grid));
    assert_eq!(
        find_divergence(&cloth.grid),
        Some(Divergence::NanForce { index: 6 })
    );
}

#[test]
fn test_force_of_500_is_fine() {
    let mut cloth = flat_cloth(4, 1.0, 0.0, &[]);
    for (k, f) in cloth.grid.force.as_mut_slice().iter_mut().enumerate() {
        *f = Vec3::new(0.0, 0.0, -(k as f32) * 500.0 / 15.0);
    }

    assert!(!detect_divergence(&cloth.grid));
}

#[test]
fn test_force_of_601_diverges() {
    let mut cloth = flat_cloth(4, 1.0, 0.0, &[]);
    cloth.grid.force[(3, 3)] = Vec3::new(0.0, 601.0, 0.0);

    match find_divergence(&cloth.grid) {
        Some(Divergence::ExcessiveForce { index, magnitude }) => {
            assert_eq!(index, 15);
            assert!((magnitude - 601.0).abs() < 1e-3);
        }
        other => panic!("Expected excessive force, got {:?}", other),
    }
}

#[test]
fn test_nan_position_diverges() {
    let mut cloth = flat_cloth(4, 1.0, 0.0, &[]);
    cloth.grid.position[(0, 2)].y = f32::NAN;

    assert_eq!(
        find_divergence(&cloth.grid),
        Some(Divergence::NanPosition { index: 8 })
    );
}

#[test]
fn test_fresh_cloth_is_stable() {
    let cloth = flat_cloth(8, 1.0, 0.0, &[]);
    assert!(!detect_divergence(&cloth.grid));
}
