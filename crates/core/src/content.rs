use crate::card::{AttackBuff, BuffDuration, Card, CardEffect, Debuff};
use crate::types::{Element, EnemyKind};

pub mod keys {
    pub const ATTACK_STRIKE: &str = "attack_strike";
    pub const ATTACK_FIREBALL: &str = "attack_fireball";
    pub const ATTACK_WATER_JET: &str = "attack_water_jet";
    pub const ATTACK_VINE_WHIP: &str = "attack_vine_whip";
    pub const ATTACK_METEOR: &str = "attack_meteor";
    pub const ATTACK_DELUGE: &str = "attack_deluge";
    pub const ATTACK_FOREST_WRATH: &str = "attack_forest_wrath";
    pub const ATTACK_BLAZING_SLASH: &str = "attack_blazing_slash";
    pub const ATTACK_DOUBLE_STRIKE: &str = "attack_double_strike";

    pub const DEFEND_GUARD: &str = "defend_guard";
    pub const DEFEND_IRON_WALL: &str = "defend_iron_wall";
    pub const DEFEND_PERFECT_GUARD: &str = "defend_perfect_guard";
    pub const DEFEND_BARRIER_ART: &str = "defend_barrier_art";

    pub const BUFF_FIGHTING_SPIRIT: &str = "buff_fighting_spirit";
    pub const BUFF_FOCUS: &str = "buff_focus";
    pub const BUFF_AWAKENING: &str = "buff_awakening";
    pub const BUFF_MANA_SURGE: &str = "buff_mana_surge";

    pub const DEBUFF_ENFEEBLE: &str = "debuff_enfeeble";
    pub const DEBUFF_CONCUSSION: &str = "debuff_concussion";
    pub const DEBUFF_VENOM_MIST: &str = "debuff_venom_mist";
    pub const DEBUFF_FROST_BIND: &str = "debuff_frost_bind";

    pub const DRAW_INSIGHT: &str = "draw_insight";
    pub const DRAW_STRATAGEM: &str = "draw_stratagem";
    pub const DRAW_MASS_DRAW: &str = "draw_mass_draw";
    pub const DRAW_RAPID_GROWTH: &str = "draw_rapid_growth";
}

const fn card(
    key: &'static str,
    name: &'static str,
    cost: u32,
    element: Option<Element>,
    effect: CardEffect,
) -> Card {
    Card { key, name, cost, element, effect }
}

const fn attack(damage: i32) -> CardEffect {
    CardEffect::Attack { damage, draw: 0 }
}

const fn buff(percent: u32, turns: u32) -> AttackBuff {
    AttackBuff { percent, duration: BuffDuration::Turns(turns) }
}

const FIRE: Option<Element> = Some(Element::Fire);
const WATER: Option<Element> = Some(Element::Water);
const NATURE: Option<Element> = Some(Element::Nature);

/// Every card that can be offered by rewards and shops.
pub const CATALOG: [Card; 25] = [
    card(keys::ATTACK_STRIKE, "Strike", 1, None, attack(10)),
    card(keys::ATTACK_FIREBALL, "Fireball", 2, FIRE, attack(22)),
    card(keys::ATTACK_WATER_JET, "Water Jet", 2, WATER, attack(22)),
    card(keys::ATTACK_VINE_WHIP, "Vine Whip", 2, NATURE, attack(22)),
    card(keys::ATTACK_METEOR, "Meteor", 3, FIRE, attack(40)),
    card(keys::ATTACK_DELUGE, "Deluge", 3, WATER, attack(40)),
    card(keys::ATTACK_FOREST_WRATH, "Forest Wrath", 3, NATURE, attack(40)),
    card(keys::ATTACK_BLAZING_SLASH, "Blazing Slash", 4, FIRE, attack(60)),
    card(
        keys::ATTACK_DOUBLE_STRIKE,
        "Double Strike",
        2,
        None,
        CardEffect::Attack { damage: 15, draw: 1 },
    ),
    card(keys::DEFEND_GUARD, "Guard", 1, None, CardEffect::Defend { shield: 8, buff: None }),
    card(keys::DEFEND_IRON_WALL, "Iron Wall", 2, None, CardEffect::Defend { shield: 20, buff: None }),
    card(
        keys::DEFEND_PERFECT_GUARD,
        "Perfect Guard",
        3,
        None,
        CardEffect::Defend { shield: 38, buff: None },
    ),
    card(
        keys::DEFEND_BARRIER_ART,
        "Barrier Art",
        1,
        None,
        CardEffect::Defend { shield: 12, buff: Some(buff(10, 1)) },
    ),
    card(
        keys::BUFF_FIGHTING_SPIRIT,
        "Fighting Spirit",
        1,
        None,
        CardEffect::Buff { buff: buff(15, 2), draw: 0 },
    ),
    card(keys::BUFF_FOCUS, "Focus", 2, None, CardEffect::Buff { buff: buff(30, 3), draw: 0 }),
    card(keys::BUFF_AWAKENING, "Awakening", 3, None, CardEffect::Buff { buff: buff(60, 2), draw: 0 }),
    card(
        keys::BUFF_MANA_SURGE,
        "Mana Surge",
        2,
        None,
        CardEffect::Buff { buff: buff(25, 2), draw: 1 },
    ),
    card(
        keys::DEBUFF_ENFEEBLE,
        "Enfeeble",
        1,
        None,
        CardEffect::Debuff(Debuff::Weaken { percent: 25, turns: 2 }),
    ),
    card(keys::DEBUFF_CONCUSSION, "Concussion", 2, None, CardEffect::Debuff(Debuff::Stun)),
    card(
        keys::DEBUFF_VENOM_MIST,
        "Venom Mist",
        1,
        NATURE,
        CardEffect::Debuff(Debuff::Poison { damage: 6, turns: 3 }),
    ),
    card(
        keys::DEBUFF_FROST_BIND,
        "Frost Bind",
        2,
        WATER,
        CardEffect::Debuff(Debuff::Freeze { percent: 20, turns: 2 }),
    ),
    card(keys::DRAW_INSIGHT, "Insight", 1, None, CardEffect::Draw { draw: 1, damage: None }),
    card(keys::DRAW_STRATAGEM, "Stratagem", 2, None, CardEffect::Draw { draw: 2, damage: None }),
    card(keys::DRAW_MASS_DRAW, "Mass Draw", 3, None, CardEffect::Draw { draw: 3, damage: None }),
    card(
        keys::DRAW_RAPID_GROWTH,
        "Rapid Growth",
        2,
        NATURE,
        CardEffect::Draw { draw: 2, damage: Some(10) },
    ),
];

pub fn catalog_card(key: &str) -> Option<Card> {
    CATALOG.iter().find(|card| card.key == key).copied()
}

/// Three Strikes, one elemental attack of each element, two Guards, two Insights.
pub fn starter_deck() -> Vec<Card> {
    let starter_keys = [
        keys::ATTACK_STRIKE,
        keys::ATTACK_STRIKE,
        keys::ATTACK_STRIKE,
        keys::ATTACK_FIREBALL,
        keys::ATTACK_WATER_JET,
        keys::ATTACK_VINE_WHIP,
        keys::DEFEND_GUARD,
        keys::DEFEND_GUARD,
        keys::DRAW_INSIGHT,
        keys::DRAW_INSIGHT,
    ];
    starter_keys.iter().filter_map(|key| catalog_card(key)).collect()
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct EnemyStats {
    pub hp: i32,
    pub attack: i32,
}

impl EnemyKind {
    pub fn name(self) -> &'static str {
        match self {
            Self::Slime => "Slime",
            Self::Goblin => "Goblin",
            Self::Orc => "Orc",
            Self::Dragon => "Dragon",
            Self::Wizard => "Wizard",
        }
    }

    pub fn for_difficulty(difficulty: u8) -> Self {
        match difficulty {
            0..=2 => Self::Slime,
            3..=4 => Self::Goblin,
            5..=6 => Self::Orc,
            7..=8 => Self::Dragon,
            _ => Self::Wizard,
        }
    }
}

/// Base enemy stats for a difficulty, already including the global 10% softening.
pub fn enemy_stats(difficulty: u8) -> EnemyStats {
    let d = i32::from(difficulty);
    EnemyStats { hp: (45 + 12 * d) * 9 / 10, attack: (60 + 12 * d) * 9 / 100 }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::card::CardKind;

    #[test]
    fn every_catalog_card_passes_validation() {
        for card in CATALOG {
            assert_eq!(card.validate(), Ok(()), "{} failed validation", card.key);
        }
    }

    #[test]
    fn catalog_keys_are_unique() {
        let mut seen: Vec<&str> = CATALOG.iter().map(|card| card.key).collect();
        seen.sort_unstable();
        seen.dedup();
        assert_eq!(seen.len(), CATALOG.len());
    }

    #[test]
    fn starter_deck_has_ten_cards() {
        let deck = starter_deck();
        assert_eq!(deck.len(), 10);
        assert_eq!(deck.iter().filter(|card| card.key == keys::ATTACK_STRIKE).count(), 3);
        assert_eq!(deck.iter().filter(|card| card.kind() == CardKind::Defend).count(), 2);
    }

    #[test]
    fn enemy_tiers_follow_difficulty_bands() {
        assert_eq!(EnemyKind::for_difficulty(1), EnemyKind::Slime);
        assert_eq!(EnemyKind::for_difficulty(4), EnemyKind::Goblin);
        assert_eq!(EnemyKind::for_difficulty(5), EnemyKind::Orc);
        assert_eq!(EnemyKind::for_difficulty(8), EnemyKind::Dragon);
        assert_eq!(EnemyKind::for_difficulty(10), EnemyKind::Wizard);
    }

    #[test]
    fn enemy_stats_match_softened_curve() {
        assert_eq!(enemy_stats(1), EnemyStats { hp: 51, attack: 6 });
        assert_eq!(enemy_stats(5), EnemyStats { hp: 94, attack: 10 });
        assert_eq!(enemy_stats(10), EnemyStats { hp: 148, attack: 16 });
    }
}
