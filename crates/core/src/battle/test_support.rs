//! Shared fixtures for the battle test suite.
//! Builds battles whose hand is laid out exactly, so scenarios do not depend on shuffle order.

use super::*;
use crate::content::catalog_card;

pub(super) fn setup() -> BattleSetup {
    BattleSetup {
        enemy: EnemyKind::Orc,
        difficulty: 5,
        player_hp: 100,
        player_max_hp: 100,
        max_energy: 5,
        hand_size: 5,
        draw_bonus: 0,
        opening_buff: None,
    }
}

pub(super) fn card(key: &str) -> Card {
    catalog_card(key).unwrap_or_else(|| panic!("unknown catalog key {key}"))
}

/// A battle whose deck is exactly `keys`, all held in hand in that order, with empty piles.
pub(super) fn battle_with_hand(keys: &[&str]) -> Battle {
    let deck = Deck::from_cards(keys.iter().map(|key| card(key)));
    let mut battle = Battle::new(setup(), &deck, GameRng::from_seed(7));
    let ids: Vec<CardId> = deck.ids();
    battle.draw_pile.clear();
    battle.discard_pile.clear();
    battle.hand = ids;
    battle.enemy.next_action = EnemyAction::Attack;
    battle
}

/// Adds a fresh copy of `key` to the battle and puts it at the end of the hand.
pub(super) fn put_in_hand(battle: &mut Battle, key: &str) -> usize {
    let id = battle.cards.insert(card(key));
    battle.hand.push(id);
    battle.hand.len() - 1
}

pub(super) fn piles_conserved(battle: &Battle) -> bool {
    battle.draw_pile.len() + battle.hand.len() + battle.discard_pile.len() == battle.cards.len()
}

pub(super) fn events_since(battle: &Battle, mark: usize) -> &[BattleEvent] {
    &battle.log[mark..]
}
