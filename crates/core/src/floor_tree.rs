//! Run map: a random binary tree of encounters spanning floors 1 through 10.

pub mod curve;
pub mod model;

mod generator;
mod navigator;

pub use curve::{MAX_FLOOR, branch_chance};
pub use generator::FloorTreeGenerator;
pub use model::{FloorNode, FloorTree, NodeChildren};
pub use navigator::{DEFAULT_VISIBLE_DEPTH, NextStep};

use crate::rng::GameRng;

pub fn generate(seed: u64) -> FloorTree {
    generate_from(&mut GameRng::from_seed(seed))
}

/// Builds a tree from an existing stream, so a run can derive its map from the run RNG.
pub fn generate_from(rng: &mut GameRng) -> FloorTree {
    FloorTreeGenerator::new(rng).generate()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn generate_matches_generator_over_fresh_stream() {
        let from_helper = generate(321);
        let mut rng = GameRng::from_seed(321);
        let from_generator = FloorTreeGenerator::new(&mut rng).generate();
        assert_eq!(from_helper, from_generator);
    }
}
