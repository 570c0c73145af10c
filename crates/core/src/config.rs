//! Base numbers for a new run before progression bonuses are applied.

use serde::{Deserialize, Serialize};

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(default)]
pub struct RunConfig {
    pub base_max_hp: i32,
    pub base_energy: u32,
    /// Cards drawn at every turn start, before the card-draw upgrade.
    pub hand_size: u32,
    pub starting_gold: u32,
}

impl Default for RunConfig {
    fn default() -> Self {
        Self { base_max_hp: 100, base_energy: 5, hand_size: 5, starting_gold: 100 }
    }
}
