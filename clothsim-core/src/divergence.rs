//! Detection of numerical blow-up in a cloth's state

use crate::grid::ParticleGrid;

/// Force magnitude past which a cloth is considered unstable
pub const MAX_FORCE: f32 = 600.0;

/// Why a cloth was flagged as diverged
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Divergence {
    NanForce { index: usize },
    ExcessiveForce { index: usize, magnitude: f32 },
    NanPosition { index: usize },
}

impl std::fmt::Display for Divergence {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Divergence::NanForce { index } => write!(f, "NaN force at particle {}", index),
            Divergence::ExcessiveForce { index, magnitude } => {
                write!(f, "force magnitude {} at particle {}", magnitude, index)
            }
            Divergence::NanPosition { index } => write!(f, "NaN position at particle {}", index),
        }
    }
}

/// First particle whose force or position shows divergence
pub fn find_divergence(grid: &ParticleGrid) -> Option<Divergence> {
    let forces = grid.force.iter();
    let positions = grid.position.iter();

    for (index, (force, position)) in forces.zip(positions).enumerate() {
        let magnitude = force.length();
        if magnitude.is_nan() {
            return Some(Divergence::NanForce { index });
        }
        if magnitude > MAX_FORCE {
            return Some(Divergence::ExcessiveForce { index, magnitude });
        }
        if position.is_nan() {
            return Some(Divergence::NanPosition { index });
        }
    }
    None
}

/// Whether the cloth's state has diverged
pub fn detect_divergence(grid: &ParticleGrid) -> bool {
    find_divergence(grid).is_some()
}
