//! Draw, discard, and reshuffle over the battle's three piles.

use std::mem;

use super::*;

impl Battle {
    /// Draws up to `count` cards; returns how many actually arrived in hand.
    pub(super) fn draw_cards(&mut self, count: u32) -> u32 {
        let mut drawn = 0;
        while drawn < count {
            if self.draw_pile.is_empty() && !self.reshuffle_discard() {
                break;
            }
            let Some(id) = self.draw_pile.pop_front() else {
                break;
            };
            self.hand.push(id);
            drawn += 1;
        }
        if count > 0 {
            self.push(BattleEvent::CardsDrawn { requested: count, drawn });
        }
        drawn
    }

    fn reshuffle_discard(&mut self) -> bool {
        if self.discard_pile.is_empty() {
            return false;
        }
        let mut pile = mem::take(&mut self.discard_pile);
        self.rng.shuffle(&mut pile);
        let cards = pile.len();
        self.draw_pile.extend(pile);
        self.push(BattleEvent::DiscardReshuffled { cards });
        true
    }

    /// Moves one specific copy from hand to discard.
    pub(super) fn discard_from_hand(&mut self, id: CardId) {
        if let Some(position) = self.hand.iter().position(|held| *held == id) {
            self.hand.remove(position);
            self.discard_pile.push(id);
        }
    }

    pub(super) fn discard_hand(&mut self) {
        let cards = self.hand.len();
        if cards == 0 {
            return;
        }
        self.discard_pile.append(&mut self.hand);
        self.push(BattleEvent::HandDiscarded { cards });
    }
}
