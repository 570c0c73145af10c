//! The run's persistent card collection. Each copy lives in its own slot, so duplicates stay
//! distinguishable and removal is keyed by `CardId` rather than by card equality.

use slotmap::SlotMap;

use crate::card::Card;
use crate::types::CardId;

#[derive(Clone, Debug, Default)]
pub struct Deck {
    cards: SlotMap<CardId, Card>,
}

impl Deck {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_cards(cards: impl IntoIterator<Item = Card>) -> Self {
        let mut deck = Self::new();
        for card in cards {
            deck.insert(card);
        }
        deck
    }

    pub fn insert(&mut self, card: Card) -> CardId {
        self.cards.insert(card)
    }

    pub fn remove(&mut self, id: CardId) -> Option<Card> {
        self.cards.remove(id)
    }

    pub fn get(&self, id: CardId) -> Option<&Card> {
        self.cards.get(id)
    }

    pub fn contains(&self, id: CardId) -> bool {
        self.cards.contains_key(id)
    }

    pub fn len(&self) -> usize {
        self.cards.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cards.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (CardId, &Card)> {
        self.cards.iter()
    }

    pub fn ids(&self) -> Vec<CardId> {
        self.cards.keys().collect()
    }

    /// Scales the direct damage of every damage-dealing card; returns how many changed.
    pub fn scale_attack_damage(&mut self, percent: u32) -> usize {
        let mut changed = 0;
        for card in self.cards.values_mut() {
            let scaled = card.with_damage_scaled(percent);
            if scaled != *card {
                *card = scaled;
                changed += 1;
            }
        }
        changed
    }

    pub(crate) fn slots(&self) -> &SlotMap<CardId, Card> {
        &self.cards
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::content::{keys, starter_deck};

    #[test]
    fn removing_one_duplicate_keeps_the_others() {
        let mut deck = Deck::from_cards(starter_deck());
        let strikes: Vec<CardId> = deck
            .iter()
            .filter(|(_, card)| card.key == keys::ATTACK_STRIKE)
            .map(|(id, _)| id)
            .collect();
        assert_eq!(strikes.len(), 3);

        deck.remove(strikes[1]).expect("strike should be removable");
        assert!(deck.contains(strikes[0]));
        assert!(!deck.contains(strikes[1]));
        assert!(deck.contains(strikes[2]));
        assert_eq!(deck.len(), 9);
    }

    #[test]
    fn alchemy_scaling_touches_only_damage_cards() {
        let mut deck = Deck::from_cards(starter_deck());
        let changed = deck.scale_attack_damage(110);
        assert_eq!(changed, 6);
        let fireball = deck
            .iter()
            .find(|(_, card)| card.key == keys::ATTACK_FIREBALL)
            .map(|(_, card)| *card)
            .expect("fireball");
        assert_eq!(fireball.damage(), Some(24));
    }
}
