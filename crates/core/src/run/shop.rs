//! Shop stock and purchases. Stock is rolled once on entry and does not restock.

use super::*;
use crate::content::CATALOG;

pub const SHOP_CARD_COUNT: usize = 5;
pub const POTION_PRICE: u32 = 30;
pub const POTION_HEAL: i32 = 30;
pub const REMOVAL_PRICE: u32 = 40;
pub const POINTS_PRICE: u32 = 60;
pub const POINTS_PER_PURCHASE: u32 = 3;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct ShopOffer {
    pub card: Card,
    pub price: u32,
    pub sold: bool,
}

#[derive(Clone, Debug, Default, PartialEq, Eq, Hash)]
pub struct ShopStock {
    pub offers: Vec<ShopOffer>,
}

impl ShopStock {
    fn roll(rng: &mut GameRng) -> Self {
        let offers = rng
            .sample_distinct(CATALOG.len(), SHOP_CARD_COUNT)
            .into_iter()
            .map(|index| ShopOffer {
                card: CATALOG[index],
                price: 50 + rng.range_i32(0, 30) as u32,
                sold: false,
            })
            .collect();
        Self { offers }
    }
}

impl RunState {
    pub(super) fn open_shop(&mut self) {
        self.shop = Some(ShopStock::roll(&mut self.rng));
        self.phase = RunPhase::Shop;
    }

    fn spend(&mut self, price: u32) -> Result<(), GameError> {
        if self.gold < price {
            return Err(GameError::NotEnoughGold { price, gold: self.gold });
        }
        self.gold -= price;
        Ok(())
    }

    pub fn buy_shop_card(&mut self, index: usize) -> Result<(), GameError> {
        self.expect_phase(RunPhase::Shop, "buy_shop_card")?;
        let offer = self
            .shop
            .as_ref()
            .and_then(|stock| stock.offers.get(index))
            .copied()
            .filter(|offer| !offer.sold)
            .ok_or(GameError::InvalidChoice)?;
        self.spend(offer.price)?;
        if let Some(slot) = self.shop.as_mut().and_then(|stock| stock.offers.get_mut(index)) {
            slot.sold = true;
        }
        self.deck.insert(offer.card);
        self.log.push(RunEvent::ShopCardBought { name: offer.card.name, price: offer.price });
        Ok(())
    }

    pub fn buy_potion(&mut self) -> Result<(), GameError> {
        self.expect_phase(RunPhase::Shop, "buy_potion")?;
        self.spend(POTION_PRICE)?;
        let before = self.player_hp;
        self.player_hp = (self.player_hp + POTION_HEAL).min(self.player_max_hp);
        self.log.push(RunEvent::PotionBought { healed: self.player_hp - before });
        Ok(())
    }

    pub fn buy_card_removal(&mut self) -> Result<(), GameError> {
        self.expect_phase(RunPhase::Shop, "buy_card_removal")?;
        if self.deck.len() <= MIN_DECK_SIZE {
            return Err(GameError::DeckAtMinimum { min: MIN_DECK_SIZE });
        }
        self.spend(REMOVAL_PRICE)?;
        self.begin_removal(1, Some(REMOVAL_PRICE), RunPhase::Shop);
        Ok(())
    }

    pub fn buy_upgrade_points(&mut self) -> Result<(), GameError> {
        self.expect_phase(RunPhase::Shop, "buy_upgrade_points")?;
        self.spend(POINTS_PRICE)?;
        self.earn_points(POINTS_PER_PURCHASE);
        Ok(())
    }

    pub fn advance_from_shop(&mut self) -> Result<(), GameError> {
        self.expect_phase(RunPhase::Shop, "advance_from_shop")?;
        self.shop = None;
        self.advance_to_path();
        Ok(())
    }
}
