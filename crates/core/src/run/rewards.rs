//! Post-battle gold and the three-way reward choice, plus the shared card-removal session.

use super::*;
use crate::content::CATALOG;

pub const REWARD_CARD_COUNT: usize = 3;
pub const REWARD_REMOVALS: u8 = 2;
pub const REWARD_POINTS: u32 = 5;

pub(super) fn victory_gold(battles_won: u32) -> u32 {
    20 + battles_won * 5
}

impl RunState {
    pub(super) fn on_battle_won(&mut self) {
        self.battles_won += 1;
        let gold_earned = victory_gold(self.battles_won);
        self.gold += gold_earned;
        self.log.push(RunEvent::BattleWon { gold_earned, gold: self.gold });
        self.phase = RunPhase::Reward;
    }

    pub fn choose_reward(&mut self, choice: RewardChoice) -> Result<(), GameError> {
        self.expect_phase(RunPhase::Reward, "choose_reward")?;
        match choice {
            RewardChoice::Card => {
                let picks = self.rng.sample_distinct(CATALOG.len(), REWARD_CARD_COUNT);
                self.reward_offer = picks.into_iter().map(|index| CATALOG[index]).collect();
                self.phase = RunPhase::CardReward;
            }
            RewardChoice::RemoveCards => {
                self.begin_removal(REWARD_REMOVALS, None, RunPhase::PathChoice);
            }
            RewardChoice::Points => {
                self.earn_points(REWARD_POINTS);
                self.advance_to_path();
            }
        }
        Ok(())
    }

    pub fn take_reward_card(&mut self, index: usize) -> Result<(), GameError> {
        self.expect_phase(RunPhase::CardReward, "take_reward_card")?;
        let card = *self.reward_offer.get(index).ok_or(GameError::InvalidChoice)?;
        self.deck.insert(card);
        self.log.push(RunEvent::RewardCardTaken { name: card.name });
        self.advance_to_path();
        Ok(())
    }

    pub fn skip_reward_card(&mut self) -> Result<(), GameError> {
        self.expect_phase(RunPhase::CardReward, "skip_reward_card")?;
        self.log.push(RunEvent::RewardCardSkipped);
        self.advance_to_path();
        Ok(())
    }

    pub fn remove_card(&mut self, card: CardId) -> Result<(), GameError> {
        self.expect_phase(RunPhase::CardRemoval, "remove_card")?;
        let mut session = self.removal.ok_or(GameError::WrongPhase { command: "remove_card" })?;
        if !self.deck.contains(card) {
            return Err(GameError::UnknownCard);
        }
        if self.deck.len() <= MIN_DECK_SIZE {
            return Err(GameError::DeckAtMinimum { min: MIN_DECK_SIZE });
        }
        if let Some(removed) = self.deck.remove(card) {
            self.log.push(RunEvent::CardRemoved { name: removed.name });
        }
        session.remaining -= 1;
        session.removed += 1;
        self.removal = Some(session);
        if session.remaining == 0 {
            self.end_removal();
        }
        Ok(())
    }

    /// Stops removing early. A paid removal that removed nothing is refunded.
    pub fn finish_removal(&mut self) -> Result<(), GameError> {
        self.expect_phase(RunPhase::CardRemoval, "finish_removal")?;
        if let Some(session) = self.removal
            && session.removed == 0
            && let Some(refund) = session.refund
        {
            self.gold += refund;
            self.log.push(RunEvent::RemovalRefunded { gold: refund });
        }
        self.end_removal();
        Ok(())
    }

    pub(super) fn begin_removal(&mut self, count: u8, refund: Option<u32>, return_to: RunPhase) {
        self.removal = Some(RemovalSession { remaining: count, removed: 0, refund, return_to });
        self.phase = RunPhase::CardRemoval;
    }

    fn end_removal(&mut self) {
        let return_to = self.removal.take().map_or(RunPhase::PathChoice, |s| s.return_to);
        match return_to {
            RunPhase::Shop => self.phase = RunPhase::Shop,
            _ => self.advance_to_path(),
        }
    }

    pub(super) fn earn_points(&mut self, points: u32) {
        self.earned_points += points;
        self.log.push(RunEvent::PointsEarned { points, total: self.earned_points });
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn victory_gold_grows_with_battles_won() {
        assert_eq!(victory_gold(1), 25);
        assert_eq!(victory_gold(4), 40);
    }
}
