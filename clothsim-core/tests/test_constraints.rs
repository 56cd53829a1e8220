//! Tests for pin, floor and obstacle projections

use clothsim_core::constraint::{apply_constraints, FanObstacle, Obstacles, FLOOR_EPSILON};
use clothsim_core::geometry::{Capsule, Sphere};
use clothsim_core::tests::test_helpers::{approx_eq_f32, flat_cloth};
use glam::Vec3;

fn open_space() -> Obstacles {
    Obstacles {
        ground_z: -100.0,
        ..Obstacles::default()
    }
}

#[test]
fn test_pins_restore_stored_positions() {
    let mut cloth = flat_cloth(6, 1.0, 2.0, &[(0, 0), (0, 5), (3, 3)]);
    for (k, p) in cloth.grid.position.as_mut_slice().iter_mut().enumerate() {
        *p += Vec3::new(0.1 * k as f32, -0.3, 0.7);
    }

    apply_constraints(&mut cloth, &open_space(), Vec3::ZERO);

    for pin in cloth.fixed.iter() {
        assert_eq!(cloth.grid.position[(pin.u, pin.v)], pin.position);
    }
}

#[test]
fn test_floor_keeps_particles_above_ground() {
    let mut cloth = flat_cloth(5, 1.0, 0.0, &[]);
    cloth.grid.position[(2, 2)].z = -3.0;
    let obstacles = Obstacles {
        ground_z: 0.5,
        ..Obstacles::default()
    };

    apply_constraints(&mut cloth, &obstacles, Vec3::ZERO);

    for p in cloth.grid.position.iter() {
        assert!(p.z >= 0.5, "Particle below floor: {:?}", p);
        assert!(approx_eq_f32(p.z, 0.5 + FLOOR_EPSILON, 1e-6));
    }
}

#[test]
fn test_constraints_leave_velocity_alone() {
    let mut cloth = flat_cloth(5, 1.0, -1.0, &[]);
    for v in cloth.grid.velocity.as_mut_slice() {
        *v = Vec3::new(0.0, 0.0, -2.0);
    }
    let before = cloth.grid.velocity.clone();

    let floor = Obstacles {
        ground_z: 0.0,
        ..Obstacles::default()
    };
    apply_constraints(&mut cloth, &floor, Vec3::ZERO);

    assert_eq!(cloth.grid.velocity, before);
}

#[test]
fn test_sphere_pushes_particles_out() {
    let mut cloth = flat_cloth(11, 1.0, 0.0, &[]);
    let sphere = Sphere {
        center: Vec3::new(0.5, 0.5, 0.0),
        radius: 0.3,
    };
    let obstacles = Obstacles {
        sphere: Some(sphere),
        ..open_space()
    };

    apply_constraints(&mut cloth, &obstacles, Vec3::ZERO);

    for p in cloth.grid.position.iter() {
        assert!(p.distance(sphere.center) >= 0.31 - 1e-5, "Particle inside sphere: {:?}", p);
    }
    // Far corner untouched
    assert_eq!(cloth.grid.position[(0, 0)], Vec3::ZERO);
}

#[test]
fn test_fan_capsule_follows_fan_position() {
    let mut cloth = flat_cloth(7, 1.0, 0.0, &[]);
    let obstacles = Obstacles {
        fan: Some(FanObstacle::default()),
        ..open_space()
    };
    let fan_position = Vec3::new(0.5, 0.5, 0.0);

    apply_constraints(&mut cloth, &obstacles, fan_position);

    let capsule = FanObstacle::default().capsule_at(fan_position);
    for p in cloth.grid.position.iter() {
        assert!(capsule.distance_to_axis(*p) >= 1.55 - 1e-4);
        assert!(approx_eq_f32(p.z, 0.0, 1e-5), "Projection should stay horizontal");
    }
}

#[test]
fn test_fan_far_away_does_nothing() {
    let mut cloth = flat_cloth(5, 1.0, 0.0, &[]);
    let before = cloth.grid.position.clone();
    let obstacles = Obstacles {
        fan: Some(FanObstacle::default()),
        ..open_space()
    };

    apply_constraints(&mut cloth, &obstacles, Vec3::new(10.0, 0.0, 0.0));

    assert_eq!(cloth.grid.position, before);
}

#[test]
fn test_poles_push_particles_out() {
    let mut cloth = flat_cloth(9, 1.0, 0.0, &[]);
    let pole = Capsule::new(Vec3::new(0.5, 0.5, -1.0), Vec3::new(0.5, 0.5, 1.0), 0.3);
    let obstacles = Obstacles {
        poles: vec![pole],
        ..open_space()
    };

    apply_constraints(&mut cloth, &obstacles, Vec3::ZERO);

    for p in cloth.grid.position.iter() {
        assert!(pole.distance_to_axis(*p) >= 0.3 - 1e-5);
    }
}

#[test]
fn test_later_obstacles_win_over_pins() {
    let mut cloth = flat_cloth(5, 1.0, 0.0, &[(0, 0)]);
    let pole = Capsule::new(Vec3::new(0.0, 0.0, -1.0), Vec3::new(0.0, 0.0, 1.0), 0.3);
    let obstacles = Obstacles {
        poles: vec![pole],
        ..open_space()
    };

    apply_constraints(&mut cloth, &obstacles, Vec3::ZERO);

    // Pins are applied first; the pole projection runs after them
    assert!(pole.distance_to_axis(cloth.grid.position[(0, 0)]) >= 0.3 - 1e-5);
}
