//! Card resolution: energy payment, effect dispatch, elemental reactions, and damage to the enemy.

use super::*;
use crate::card::{CardEffect, Debuff};
use crate::reaction::{ELEMENT_ATTACH_TURNS, REACTION_COOLDOWN_TURNS, reaction};

/// Damage that reached the enemy from a single strike.
struct Strike {
    hp_loss: i32,
    reaction: Option<Reaction>,
}

impl Battle {
    /// Plays the card at `index` in hand. Rejections leave everything but the log untouched.
    pub fn play_card(&mut self, index: usize) -> Result<CardOutcome, GameError> {
        self.ensure_ongoing()?;
        let (id, card) = match self.playable(index) {
            Ok(found) => found,
            Err(reason) => {
                self.push(BattleEvent::CardRejected { index, reason: reason.clone() });
                return Err(reason);
            }
        };

        self.player.energy = self.player.energy.saturating_sub(card.cost);
        self.push(BattleEvent::CardPlayed { name: card.name, cost: card.cost });

        let mut outcome = CardOutcome { card: id, damage_dealt: 0, reaction: None, drawn: 0 };
        match card.effect {
            CardEffect::Attack { damage, draw } => {
                let strike = self.strike(damage, card.element);
                outcome.damage_dealt = strike.hp_loss;
                outcome.reaction = strike.reaction;
                if draw > 0 && !self.is_over() {
                    outcome.drawn = self.draw_cards(draw);
                }
            }
            CardEffect::Defend { shield, buff } => {
                self.player.shield += shield;
                let total = self.player.shield;
                self.push(BattleEvent::ShieldGained { amount: shield, total });
                if let Some(buff) = buff {
                    self.apply_buff(buff);
                }
            }
            CardEffect::Buff { buff, draw } => {
                self.apply_buff(buff);
                if draw > 0 {
                    outcome.drawn = self.draw_cards(draw);
                }
            }
            CardEffect::Debuff(debuff) => self.apply_debuff(debuff, card.element),
            CardEffect::Draw { draw, damage } => {
                outcome.drawn = self.draw_cards(draw);
                if let Some(damage) = damage {
                    let strike = self.strike(damage, card.element);
                    outcome.damage_dealt = strike.hp_loss;
                    outcome.reaction = strike.reaction;
                }
            }
        }

        self.discard_from_hand(id);
        Ok(outcome)
    }

    fn playable(&self, index: usize) -> Result<(CardId, Card), GameError> {
        let hand_len = self.hand.len();
        let id = *self.hand.get(index).ok_or(GameError::HandIndexOutOfRange { index, hand_len })?;
        let card = *self.cards.get(id).ok_or(GameError::UnknownCard)?;
        if self.player.energy < card.cost {
            return Err(GameError::NotEnoughEnergy { cost: card.cost, energy: self.player.energy });
        }
        Ok((id, card))
    }

    /// Buff scaling, reaction check or element attach, then shield-first damage.
    fn strike(&mut self, base: i32, element: Option<Element>) -> Strike {
        let mut total = self.player.attack_buff.scale(base);
        if total != base {
            self.push(BattleEvent::DamageBoosted { base, boosted: total });
        }

        let fired = reaction(self.enemy.element, element);
        match fired {
            Some(reaction) => {
                total += self.trigger_reaction(reaction);
            }
            None => self.attach_element(element),
        }

        let absorbed = absorb(self.enemy.shield, self.enemy.hp, total);
        self.enemy.shield = absorbed.shield;
        self.enemy.hp = absorbed.hp;
        self.push(BattleEvent::EnemyDamaged {
            hp_loss: absorbed.hp_loss,
            blocked: absorbed.blocked,
            hp: absorbed.hp,
        });
        self.check_outcome();
        Strike { hp_loss: absorbed.hp_loss, reaction: fired }
    }

    /// Applies the reaction's side effects and returns its bonus damage.
    fn trigger_reaction(&mut self, reaction: Reaction) -> i32 {
        let bonus = reaction.bonus_damage();
        self.push(BattleEvent::ReactionTriggered { reaction, bonus });
        if let Some(dot) = reaction.damage_over_time() {
            self.enemy.burn = dot.damage;
            self.enemy.burn_turns = dot.turns;
            self.push(BattleEvent::BurnApplied { damage: dot.damage, turns: dot.turns });
        }
        if let Some(percent) = reaction.heal_percent() {
            let before = self.player.hp;
            let heal = self.player.max_hp * percent / 100;
            self.player.hp = (self.player.hp + heal).min(self.player.max_hp);
            let amount = self.player.hp - before;
            self.push(BattleEvent::PlayerHealed { amount, hp: self.player.hp });
        }
        self.enemy.element = None;
        self.enemy.element_turns = 0;
        self.player.reaction_cooldown = REACTION_COOLDOWN_TURNS;
        bonus
    }

    fn attach_element(&mut self, element: Option<Element>) {
        let Some(element) = element else {
            return;
        };
        if self.player.reaction_cooldown > 0 {
            self.push(BattleEvent::ElementBlocked { element });
            return;
        }
        self.enemy.element = Some(element);
        self.enemy.element_turns = ELEMENT_ATTACH_TURNS;
        self.push(BattleEvent::ElementAttached { element });
    }

    fn apply_buff(&mut self, buff: AttackBuff) {
        self.player.attack_buff.merge(buff);
        let current = self.player.attack_buff;
        self.push(BattleEvent::BuffApplied { percent: current.percent, duration: current.duration });
    }

    fn apply_debuff(&mut self, debuff: Debuff, element: Option<Element>) {
        match debuff {
            Debuff::Weaken { percent, turns } | Debuff::Freeze { percent, turns } => {
                self.enemy.weaken_percent = self.enemy.weaken_percent.max(percent);
                self.enemy.weaken_turns = self.enemy.weaken_turns.max(turns);
                self.push(BattleEvent::EnemyWeakened {
                    percent: self.enemy.weaken_percent,
                    turns: self.enemy.weaken_turns,
                });
            }
            Debuff::Stun => {
                self.enemy.stunned = true;
                self.push(BattleEvent::EnemyStunned);
            }
            Debuff::Poison { damage, turns } => {
                self.enemy.poison = damage;
                self.enemy.poison_turns = turns;
                self.push(BattleEvent::EnemyPoisoned { damage, turns });
            }
        }
        self.attach_element(element);
    }
}
