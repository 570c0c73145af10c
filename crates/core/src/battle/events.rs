//! Structured battle log entries. Purely observational; nothing reads them back for control flow.

use std::fmt;

use super::EnemyIntent;
use crate::card::BuffDuration;
use crate::reaction::Reaction;
use crate::types::{Element, EnemyAction, EnemyKind, GameError};

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum BattleEvent {
    BattleStarted { enemy: EnemyKind, difficulty: u8, hp: i32 },
    TurnStarted { turn: u32 },
    IntentRolled { intent: EnemyIntent },
    CardRejected { index: usize, reason: GameError },
    CardPlayed { name: &'static str, cost: u32 },
    DamageBoosted { base: i32, boosted: i32 },
    ReactionTriggered { reaction: Reaction, bonus: i32 },
    BurnApplied { damage: i32, turns: u32 },
    PlayerHealed { amount: i32, hp: i32 },
    ElementAttached { element: Element },
    ElementBlocked { element: Element },
    EnemyDamaged { hp_loss: i32, blocked: i32, hp: i32 },
    ShieldGained { amount: i32, total: i32 },
    BuffApplied { percent: u32, duration: BuffDuration },
    CardsDrawn { requested: u32, drawn: u32 },
    DiscardReshuffled { cards: usize },
    EnemyWeakened { percent: u32, turns: u32 },
    EnemyStunned,
    EnemyPoisoned { damage: i32, turns: u32 },
    HandDiscarded { cards: usize },
    BurnTick { damage: i32, turns_left: u32, hp: i32 },
    PoisonTick { damage: i32, turns_left: u32, hp: i32 },
    StunConsumed,
    EnemyAttacked { action: EnemyAction, damage: i32 },
    PlayerDamaged { hp_loss: i32, blocked: i32, hp: i32 },
    EnemyDefended { amount: i32, total: i32 },
    WeakenExpired,
    ElementFaded { element: Element },
    BuffExpired,
    BattleWon { enemy: EnemyKind },
    BattleLost,
}

fn action_label(action: EnemyAction) -> &'static str {
    match action {
        EnemyAction::Attack => "attack",
        EnemyAction::BigAttack => "big attack",
        EnemyAction::Defend => "defend",
    }
}

impl fmt::Display for EnemyIntent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.action {
            EnemyAction::Defend => write!(f, "defend (+{} shield)", self.magnitude),
            action => write!(f, "{} ({} damage)", action_label(action), self.magnitude),
        }
    }
}

impl fmt::Display for BattleEvent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::BattleStarted { enemy, difficulty, hp } => {
                write!(f, "A {} appears (difficulty {difficulty}, {hp} HP).", enemy.name())
            }
            Self::TurnStarted { turn } => write!(f, "Turn {turn} begins."),
            Self::IntentRolled { intent } => write!(f, "Enemy intends to {intent}."),
            Self::CardRejected { index, reason } => write!(f, "Cannot play card {index}: {reason}."),
            Self::CardPlayed { name, cost } => write!(f, "Played {name} for {cost} energy."),
            Self::DamageBoosted { base, boosted } => {
                write!(f, "Attack buff raises damage {base} -> {boosted}.")
            }
            Self::ReactionTriggered { reaction, bonus } => {
                write!(f, "{} reaction! +{bonus} damage.", reaction.name())
            }
            Self::BurnApplied { damage, turns } => {
                write!(f, "Enemy is burning: {damage} damage for {turns} turns.")
            }
            Self::PlayerHealed { amount, hp } => write!(f, "Healed {amount} HP (now {hp})."),
            Self::ElementAttached { element } => write!(f, "{} attached to the enemy.", element.label()),
            Self::ElementBlocked { element } => {
                write!(f, "{} could not attach: reaction cooldown.", element.label())
            }
            Self::EnemyDamaged { hp_loss, blocked, hp } => {
                if *blocked > 0 {
                    write!(f, "Enemy takes {hp_loss} damage ({blocked} blocked), {hp} HP left.")
                } else {
                    write!(f, "Enemy takes {hp_loss} damage, {hp} HP left.")
                }
            }
            Self::ShieldGained { amount, total } => {
                write!(f, "Gained {amount} shield (total {total}).")
            }
            Self::BuffApplied { percent, duration } => match duration {
                BuffDuration::Turns(turns) => {
                    write!(f, "Attack buff +{percent}% for {turns} turns.")
                }
                BuffDuration::Persistent => write!(f, "Attack buff +{percent}% for this battle."),
            },
            Self::CardsDrawn { requested, drawn } => {
                if drawn < requested {
                    write!(f, "Drew {drawn} of {requested} cards; nothing left to draw.")
                } else {
                    write!(f, "Drew {drawn} cards.")
                }
            }
            Self::DiscardReshuffled { cards } => {
                write!(f, "Shuffled {cards} discarded cards into the draw pile.")
            }
            Self::EnemyWeakened { percent, turns } => {
                write!(f, "Enemy weakened by {percent}% for {turns} turns.")
            }
            Self::EnemyStunned => write!(f, "Enemy is stunned."),
            Self::EnemyPoisoned { damage, turns } => {
                write!(f, "Enemy is poisoned: {damage} damage for {turns} turns.")
            }
            Self::HandDiscarded { cards } => write!(f, "Discarded {cards} cards from hand."),
            Self::BurnTick { damage, turns_left, hp } => {
                write!(f, "Burn deals {damage} ({turns_left} turns left), enemy at {hp} HP.")
            }
            Self::PoisonTick { damage, turns_left, hp } => {
                write!(f, "Poison deals {damage} ({turns_left} turns left), enemy at {hp} HP.")
            }
            Self::StunConsumed => write!(f, "Enemy is stunned and loses its action."),
            Self::EnemyAttacked { action, damage } => {
                write!(f, "Enemy uses {} for {damage}.", action_label(*action))
            }
            Self::PlayerDamaged { hp_loss, blocked, hp } => {
                write!(f, "You take {hp_loss} damage ({blocked} blocked), {hp} HP left.")
            }
            Self::EnemyDefended { amount, total } => {
                write!(f, "Enemy raises {amount} shield (total {total}).")
            }
            Self::WeakenExpired => write!(f, "Enemy weaken wears off."),
            Self::ElementFaded { element } => write!(f, "{} fades from the enemy.", element.label()),
            Self::BuffExpired => write!(f, "Attack buff expired."),
            Self::BattleWon { enemy } => write!(f, "{} defeated!", enemy.name()),
            Self::BattleLost => write!(f, "You were defeated."),
        }
    }
}
