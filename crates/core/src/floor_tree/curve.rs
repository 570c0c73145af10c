//! Floor-dependent generation rules: branching odds, node kind mix, and difficulty spread.

use crate::types::NodeKind;

pub const MAX_FLOOR: u8 = 10;
pub const FIRST_FLOOR: u8 = 1;

/// Probability that the parent of `next_floor` offers two children instead of one.
/// The boss floor is always reached through a single forced node.
pub fn branch_chance(next_floor: u8) -> f64 {
    match next_floor {
        0..=3 => 0.8,
        4..=6 => 0.6,
        7..=9 => 0.4,
        _ => 0.0,
    }
}

pub(super) fn is_fixed_battle_floor(floor: u8) -> bool {
    floor == FIRST_FLOOR || floor == MAX_FLOOR
}

/// 60% Battle, 20% Rest, 20% Shop.
pub(super) fn node_kind_for_roll(roll: f64) -> NodeKind {
    if roll < 0.6 {
        NodeKind::Battle
    } else if roll < 0.8 {
        NodeKind::Rest
    } else {
        NodeKind::Shop
    }
}

pub(super) fn difficulty_for(floor: u8, offset: i32) -> u8 {
    if floor <= FIRST_FLOOR {
        return 1;
    }
    (i32::from(floor) + offset).clamp(1, i32::from(MAX_FLOOR)) as u8
}
