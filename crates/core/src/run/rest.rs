use super::*;
use crate::card::BuffDuration;

pub const MEDITATE_PERCENT: u32 = 20;
pub const ALCHEMY_PERCENT: u32 = 110;

impl RunState {
    pub fn advance_from_rest(&mut self, choice: RestChoice) -> Result<(), GameError> {
        self.expect_phase(RunPhase::Rest, "advance_from_rest")?;
        match choice {
            RestChoice::Meditate => {
                self.pending_battle_buff = Some(AttackBuff {
                    percent: MEDITATE_PERCENT,
                    duration: BuffDuration::Persistent,
                });
            }
            RestChoice::Sleep => self.player_hp = self.player_max_hp,
            RestChoice::Alchemy => {
                self.deck.scale_attack_damage(ALCHEMY_PERCENT);
            }
        }
        self.log.push(RunEvent::Rested { choice });
        self.advance_to_path();
        Ok(())
    }
}
