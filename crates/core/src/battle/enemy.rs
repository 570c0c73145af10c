//! Enemy combat state and the weighted intent policy.

use crate::content::enemy_stats;
use crate::rng::GameRng;
use crate::types::{Element, EnemyAction, EnemyKind};

#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct EnemyState {
    pub kind: EnemyKind,
    pub difficulty: u8,
    pub hp: i32,
    pub max_hp: i32,
    pub attack: i32,
    pub shield: i32,
    pub element: Option<Element>,
    pub element_turns: u32,
    pub burn: i32,
    pub burn_turns: u32,
    pub next_action: EnemyAction,
    pub weaken_percent: u32,
    pub weaken_turns: u32,
    pub stunned: bool,
    pub poison: i32,
    pub poison_turns: u32,
}

/// What the player sees before ending their turn.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct EnemyIntent {
    pub action: EnemyAction,
    /// Damage for attacks, shield gained for `Defend`.
    pub magnitude: i32,
}

/// Read-only facts about the player that steer the policy.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct AiSignals {
    pub player_buffed: bool,
    pub player_hp: i32,
    pub player_max_hp: i32,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ActionWeights {
    pub attack: u32,
    pub big_attack: u32,
    pub defend: u32,
}

impl ActionWeights {
    pub fn total(&self) -> u32 {
        self.attack + self.big_attack + self.defend
    }

    /// Maps a roll in `0..total()` onto the cumulative table.
    pub fn pick(&self, roll: u32) -> EnemyAction {
        if roll < self.attack {
            EnemyAction::Attack
        } else if roll < self.attack + self.big_attack {
            EnemyAction::BigAttack
        } else {
            EnemyAction::Defend
        }
    }

    pub fn weight_of(&self, action: EnemyAction) -> u32 {
        match action {
            EnemyAction::Attack => self.attack,
            EnemyAction::BigAttack => self.big_attack,
            EnemyAction::Defend => self.defend,
        }
    }
}

const fn weights(attack: u32, big_attack: u32, defend: u32) -> ActionWeights {
    ActionWeights { attack, big_attack, defend }
}

/// Step function over the enemy's HP ratio. Thresholds are compared in integer space so
/// `hp / max_hp < 0.25` holds exactly when `hp * 4 < max_hp`.
pub fn action_weights(hp: i32, max_hp: i32, shield: i32, signals: AiSignals) -> ActionWeights {
    let (hp, max_hp) = (i64::from(hp), i64::from(max_hp.max(1)));
    if hp * 4 < max_hp {
        weights(2, 2, 6)
    } else if hp * 2 < max_hp {
        if shield < 10 { weights(2, 3, 5) } else { weights(4, 4, 2) }
    } else if hp * 4 < max_hp * 3 {
        if signals.player_buffed { weights(2, 4, 4) } else { weights(5, 4, 1) }
    } else {
        let player_hp = i64::from(signals.player_hp);
        let player_max = i64::from(signals.player_max_hp.max(1));
        if player_hp * 10 > player_max * 7 { weights(4, 5, 1) } else { weights(3, 6, 1) }
    }
}

impl EnemyState {
    pub fn spawn(kind: EnemyKind, difficulty: u8) -> Self {
        let stats = enemy_stats(difficulty);
        Self {
            kind,
            difficulty,
            hp: stats.hp,
            max_hp: stats.hp,
            attack: stats.attack,
            shield: 0,
            element: None,
            element_turns: 0,
            burn: 0,
            burn_turns: 0,
            next_action: EnemyAction::Attack,
            weaken_percent: 0,
            weaken_turns: 0,
            stunned: false,
            poison: 0,
            poison_turns: 0,
        }
    }

    pub fn is_defeated(&self) -> bool {
        self.hp <= 0
    }

    pub fn weights(&self, signals: AiSignals) -> ActionWeights {
        action_weights(self.hp, self.max_hp, self.shield, signals)
    }

    pub(super) fn choose_action(&self, signals: AiSignals, rng: &mut GameRng) -> EnemyAction {
        let table = self.weights(signals);
        let roll = rng.below(table.total() as usize) as u32;
        table.pick(roll)
    }

    /// Damage (or shield) for `action` after the current weaken.
    pub fn magnitude(&self, action: EnemyAction) -> i32 {
        let remaining = i64::from(100 - self.weaken_percent.min(100));
        let attack = i64::from(self.attack);
        let value = match action {
            EnemyAction::Attack => attack * remaining / 100,
            EnemyAction::BigAttack => attack * remaining * 150 / 10_000,
            EnemyAction::Defend => attack * remaining * 120 / 10_000,
        };
        value as i32
    }

    pub fn intent(&self) -> EnemyIntent {
        EnemyIntent { action: self.next_action, magnitude: self.magnitude(self.next_action) }
    }

    pub(super) fn take_direct_damage(&mut self, damage: i32) -> i32 {
        let before = self.hp;
        self.hp = (self.hp - damage.max(0)).clamp(0, self.max_hp);
        before - self.hp
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const CALM: AiSignals = AiSignals { player_buffed: false, player_hp: 100, player_max_hp: 100 };

    #[test]
    fn thresholds_select_expected_tables() {
        assert_eq!(action_weights(20, 100, 0, CALM), weights(2, 2, 6));
        assert_eq!(action_weights(25, 100, 0, CALM), weights(2, 3, 5));
        assert_eq!(action_weights(40, 100, 12, CALM), weights(4, 4, 2));
        assert_eq!(action_weights(60, 100, 0, CALM), weights(5, 4, 1));
        let buffed = AiSignals { player_buffed: true, ..CALM };
        assert_eq!(action_weights(60, 100, 0, buffed), weights(2, 4, 4));
        assert_eq!(action_weights(75, 100, 0, CALM), weights(4, 5, 1));
        let hurt = AiSignals { player_hp: 70, ..CALM };
        assert_eq!(action_weights(100, 100, 0, hurt), weights(3, 6, 1));
    }

    #[test]
    fn cumulative_pick_covers_each_slice() {
        let table = weights(2, 2, 6);
        assert_eq!(table.pick(0), EnemyAction::Attack);
        assert_eq!(table.pick(1), EnemyAction::Attack);
        assert_eq!(table.pick(2), EnemyAction::BigAttack);
        assert_eq!(table.pick(3), EnemyAction::BigAttack);
        assert_eq!(table.pick(4), EnemyAction::Defend);
        assert_eq!(table.pick(9), EnemyAction::Defend);
    }

    #[test]
    fn magnitudes_respect_weaken() {
        let mut enemy = EnemyState::spawn(EnemyKind::Orc, 5);
        assert_eq!(enemy.attack, 10);
        assert_eq!(enemy.magnitude(EnemyAction::Attack), 10);
        assert_eq!(enemy.magnitude(EnemyAction::BigAttack), 15);
        assert_eq!(enemy.magnitude(EnemyAction::Defend), 12);

        enemy.weaken_percent = 25;
        assert_eq!(enemy.magnitude(EnemyAction::Attack), 7);
        assert_eq!(enemy.magnitude(EnemyAction::BigAttack), 11);
        assert_eq!(enemy.magnitude(EnemyAction::Defend), 9);
    }
}
