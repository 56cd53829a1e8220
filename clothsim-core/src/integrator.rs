use crate::cloth::ClothInstance;

/// Step a cloth forward by dt using semi-implicit Euler integration
pub fn step(cloth: &mut ClothInstance, dt: f32) {
    let m = cloth.mass_per_particle();
    let grid = &mut cloth.grid;

    let velocities = grid.velocity.as_mut_slice();
    let positions = grid.position.as_mut_slice();
    let forces = grid.force.as_slice();

    // Semi-implicit Euler: v += f/m*dt, then x += v*dt with the new v
    for ((v, p), f) in velocities.iter_mut().zip(positions.iter_mut()).zip(forces) {
        *v += dt * *f / m;
        *p += dt * *v;
    }
}
