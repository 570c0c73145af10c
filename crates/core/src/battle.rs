//! One encounter between the player and a single enemy.
//!
//! `Battle` owns a snapshot of the run's deck split into draw, hand, and discard piles, the
//! player's and enemy's combat state, a forked random stream, and an append-only event log.
//! The `impl Battle` blocks are split by concern across the submodules below.

use std::collections::VecDeque;

use slotmap::SlotMap;

use crate::card::{AttackBuff, BuffDuration, Card};
use crate::deck::Deck;
use crate::reaction::Reaction;
use crate::rng::GameRng;
use crate::types::*;

mod deck;
mod enemy;
mod events;
mod play;
mod turns;

#[cfg(test)]
mod test_support;

pub use enemy::{ActionWeights, AiSignals, EnemyIntent, EnemyState, action_weights};
pub use events::BattleEvent;

/// The player's currently active attack buff. `Turns(0)` means none.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct AttackBuffState {
    pub percent: u32,
    pub duration: BuffDuration,
}

impl Default for AttackBuffState {
    fn default() -> Self {
        Self { percent: 0, duration: BuffDuration::Turns(0) }
    }
}

impl AttackBuffState {
    pub fn is_active(&self) -> bool {
        self.duration.is_active() && self.percent > 0
    }

    /// Strengthens or extends, never downgrades.
    pub fn merge(&mut self, buff: AttackBuff) {
        self.percent = self.percent.max(buff.percent);
        self.duration = self.duration.max(buff.duration);
    }

    /// `x * (100 + percent) / 100` while active.
    pub fn scale(&self, damage: i32) -> i32 {
        if !self.is_active() {
            return damage;
        }
        (i64::from(damage) * i64::from(100 + self.percent) / 100) as i32
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct PlayerState {
    pub hp: i32,
    pub max_hp: i32,
    pub shield: i32,
    pub energy: u32,
    pub max_energy: u32,
    pub attack_buff: AttackBuffState,
    pub reaction_cooldown: u32,
}

/// Everything a battle needs from the surrounding run besides the deck and random stream.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct BattleSetup {
    pub enemy: EnemyKind,
    pub difficulty: u8,
    pub player_hp: i32,
    pub player_max_hp: i32,
    pub max_energy: u32,
    pub hand_size: u32,
    pub draw_bonus: u32,
    pub opening_buff: Option<AttackBuff>,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct CardOutcome {
    pub card: CardId,
    /// HP the enemy actually lost from this play.
    pub damage_dealt: i32,
    pub reaction: Option<Reaction>,
    pub drawn: u32,
}

/// Result of running `damage` through a shield.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Absorption {
    pub shield: i32,
    pub hp: i32,
    pub blocked: i32,
    pub hp_loss: i32,
}

/// Shield soaks first; whatever is left comes off HP, which never drops below zero.
pub fn absorb(shield: i32, hp: i32, damage: i32) -> Absorption {
    let damage = damage.max(0);
    let shield = shield.max(0);
    let blocked = shield.min(damage);
    let through = damage - blocked;
    let hp_after = (hp - through).max(0);
    Absorption { shield: shield - blocked, hp: hp_after, blocked, hp_loss: hp - hp_after }
}

#[derive(Clone, Debug)]
pub struct Battle {
    rng: GameRng,
    cards: SlotMap<CardId, Card>,
    draw_pile: VecDeque<CardId>,
    hand: Vec<CardId>,
    discard_pile: Vec<CardId>,
    player: PlayerState,
    enemy: EnemyState,
    status: BattleStatus,
    turn: u32,
    draw_per_turn: u32,
    log: Vec<BattleEvent>,
}

impl Battle {
    pub fn new(setup: BattleSetup, deck: &Deck, rng: GameRng) -> Self {
        let max_hp = setup.player_max_hp.max(1);
        let mut opening = AttackBuffState::default();
        if let Some(buff) = setup.opening_buff {
            opening.merge(buff);
        }
        let mut battle = Self {
            rng,
            cards: deck.slots().clone(),
            draw_pile: VecDeque::new(),
            hand: Vec::new(),
            discard_pile: Vec::new(),
            player: PlayerState {
                hp: setup.player_hp.clamp(0, max_hp),
                max_hp,
                shield: 0,
                energy: setup.max_energy,
                max_energy: setup.max_energy,
                attack_buff: opening,
                reaction_cooldown: 0,
            },
            enemy: EnemyState::spawn(setup.enemy, setup.difficulty),
            status: BattleStatus::Ongoing,
            turn: 1,
            draw_per_turn: setup.hand_size + setup.draw_bonus,
            log: Vec::new(),
        };
        battle.push(BattleEvent::BattleStarted {
            enemy: setup.enemy,
            difficulty: setup.difficulty,
            hp: battle.enemy.hp,
        });

        let mut order: Vec<CardId> = battle.cards.keys().collect();
        battle.rng.shuffle(&mut order);
        battle.draw_pile = order.into();

        battle.roll_enemy_action();
        battle.push(BattleEvent::TurnStarted { turn: 1 });
        battle.draw_cards(battle.draw_per_turn);
        battle
    }

    pub fn player(&self) -> &PlayerState {
        &self.player
    }

    pub fn enemy(&self) -> &EnemyState {
        &self.enemy
    }

    pub fn status(&self) -> BattleStatus {
        self.status
    }

    pub fn is_over(&self) -> bool {
        self.status != BattleStatus::Ongoing
    }

    pub fn turn(&self) -> u32 {
        self.turn
    }

    pub fn log(&self) -> &[BattleEvent] {
        &self.log
    }

    pub fn intent(&self) -> EnemyIntent {
        self.enemy.intent()
    }

    /// Cards in hand, in hand order.
    pub fn hand(&self) -> Vec<(CardId, Card)> {
        self.hand.iter().filter_map(|id| self.cards.get(*id).map(|card| (*id, *card))).collect()
    }

    pub fn hand_ids(&self) -> &[CardId] {
        &self.hand
    }

    pub fn draw_pile_len(&self) -> usize {
        self.draw_pile.len()
    }

    pub fn discard_pile_len(&self) -> usize {
        self.discard_pile.len()
    }

    pub fn deck_size(&self) -> usize {
        self.cards.len()
    }

    /// Draw pile, top first.
    pub fn draw_pile_ids(&self) -> impl Iterator<Item = CardId> + '_ {
        self.draw_pile.iter().copied()
    }

    pub fn discard_pile_ids(&self) -> &[CardId] {
        &self.discard_pile
    }

    #[cfg(test)]
    pub(crate) fn player_mut(&mut self) -> &mut PlayerState {
        &mut self.player
    }

    #[cfg(test)]
    pub(crate) fn enemy_mut(&mut self) -> &mut EnemyState {
        &mut self.enemy
    }

    fn push(&mut self, event: BattleEvent) {
        self.log.push(event);
    }

    /// Records a terminal status once either side is at zero HP. Returns `true` if the battle
    /// is over.
    fn check_outcome(&mut self) -> bool {
        if self.status != BattleStatus::Ongoing {
            return true;
        }
        if self.enemy.hp <= 0 {
            self.status = BattleStatus::Won;
            self.push(BattleEvent::BattleWon { enemy: self.enemy.kind });
        } else if self.player.hp <= 0 {
            self.status = BattleStatus::Lost;
            self.push(BattleEvent::BattleLost);
        }
        self.status != BattleStatus::Ongoing
    }

    fn ensure_ongoing(&self) -> Result<(), GameError> {
        if self.is_over() {
            return Err(GameError::BattleOver);
        }
        Ok(())
    }

    fn ai_signals(&self) -> AiSignals {
        AiSignals {
            player_buffed: self.player.attack_buff.is_active(),
            player_hp: self.player.hp,
            player_max_hp: self.player.max_hp,
        }
    }

    fn roll_enemy_action(&mut self) {
        let signals = self.ai_signals();
        let action = self.enemy.choose_action(signals, &mut self.rng);
        self.enemy.next_action = action;
        self.push(BattleEvent::IntentRolled { intent: self.enemy.intent() });
    }
}
