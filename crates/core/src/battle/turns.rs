//! Turn boundaries: ending the player's turn, the enemy's action phase, and turn-start upkeep.

use super::*;

impl Battle {
    /// Discards the hand, lets a living enemy act, then starts the next player turn.
    pub fn end_turn(&mut self) -> Result<(), GameError> {
        self.ensure_ongoing()?;
        self.discard_hand();
        if !self.enemy.is_defeated() {
            self.enemy_turn();
        }
        if !self.is_over() {
            self.start_turn();
        }
        Ok(())
    }

    fn enemy_turn(&mut self) {
        if self.enemy.poison_turns > 0 {
            let damage = self.enemy.poison;
            self.enemy.take_direct_damage(damage);
            self.enemy.poison_turns -= 1;
            if self.enemy.poison_turns == 0 {
                self.enemy.poison = 0;
            }
            self.push(BattleEvent::PoisonTick {
                damage,
                turns_left: self.enemy.poison_turns,
                hp: self.enemy.hp,
            });
            if self.enemy.is_defeated() {
                self.player.shield = 0;
                self.check_outcome();
                return;
            }
        }

        if self.enemy.stunned {
            self.enemy.stunned = false;
            self.push(BattleEvent::StunConsumed);
        } else {
            self.execute_intent();
            if self.check_outcome() {
                return;
            }
        }

        if self.enemy.weaken_turns > 0 {
            self.enemy.weaken_turns -= 1;
            if self.enemy.weaken_turns == 0 {
                self.enemy.weaken_percent = 0;
                self.push(BattleEvent::WeakenExpired);
            }
        }

        self.roll_enemy_action();
        self.player.shield = 0;
    }

    fn execute_intent(&mut self) {
        let intent = self.enemy.intent();
        match intent.action {
            EnemyAction::Attack | EnemyAction::BigAttack => {
                self.push(BattleEvent::EnemyAttacked {
                    action: intent.action,
                    damage: intent.magnitude,
                });
                let absorbed = absorb(self.player.shield, self.player.hp, intent.magnitude);
                self.player.shield = absorbed.shield;
                self.player.hp = absorbed.hp;
                self.push(BattleEvent::PlayerDamaged {
                    hp_loss: absorbed.hp_loss,
                    blocked: absorbed.blocked,
                    hp: absorbed.hp,
                });
            }
            EnemyAction::Defend => {
                self.enemy.shield += intent.magnitude;
                self.push(BattleEvent::EnemyDefended {
                    amount: intent.magnitude,
                    total: self.enemy.shield,
                });
            }
        }
    }

    fn start_turn(&mut self) {
        self.turn += 1;
        self.push(BattleEvent::TurnStarted { turn: self.turn });

        if self.enemy.burn_turns > 0 {
            let damage = self.enemy.burn;
            self.enemy.take_direct_damage(damage);
            self.enemy.burn_turns -= 1;
            if self.enemy.burn_turns == 0 {
                self.enemy.burn = 0;
            }
            self.push(BattleEvent::BurnTick {
                damage,
                turns_left: self.enemy.burn_turns,
                hp: self.enemy.hp,
            });
            if self.check_outcome() {
                return;
            }
        }

        self.player.energy = self.player.max_energy;

        let buff = &mut self.player.attack_buff;
        if let BuffDuration::Turns(turns) = buff.duration
            && turns > 0
        {
            buff.duration = BuffDuration::Turns(turns - 1);
            if turns == 1 {
                buff.percent = 0;
                self.push(BattleEvent::BuffExpired);
            }
        }

        if self.enemy.element_turns > 0 {
            self.enemy.element_turns -= 1;
            if self.enemy.element_turns == 0
                && let Some(element) = self.enemy.element.take()
            {
                self.push(BattleEvent::ElementFaded { element });
            }
        }

        self.player.reaction_cooldown = self.player.reaction_cooldown.saturating_sub(1);
        self.draw_cards(self.draw_per_turn);
    }
}
