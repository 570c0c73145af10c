//! Elemental reaction table. Pure lookup, symmetric in its two inputs.

use crate::types::Element;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Reaction {
    /// Fire + Nature.
    Burn,
    /// Fire + Water.
    Vaporize,
    /// Water + Nature.
    Bloom,
}

/// Damage-over-time applied to the target by a reaction.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct DamageOverTime {
    pub damage: i32,
    pub turns: u32,
}

pub const ELEMENT_ATTACH_TURNS: u32 = 2;
pub const REACTION_COOLDOWN_TURNS: u32 = 1;

impl Reaction {
    pub fn name(self) -> &'static str {
        match self {
            Self::Burn => "Burn",
            Self::Vaporize => "Vaporize",
            Self::Bloom => "Bloom",
        }
    }

    pub fn bonus_damage(self) -> i32 {
        match self {
            Self::Burn => 12,
            Self::Vaporize => 30,
            Self::Bloom => 25,
        }
    }

    pub fn damage_over_time(self) -> Option<DamageOverTime> {
        match self {
            Self::Burn => Some(DamageOverTime { damage: 10, turns: 3 }),
            Self::Vaporize | Self::Bloom => None,
        }
    }

    /// Heal for the attacker in percent of their max HP.
    pub fn heal_percent(self) -> Option<i32> {
        match self {
            Self::Bloom => Some(12),
            Self::Burn | Self::Vaporize => None,
        }
    }
}

pub fn reaction(existing: Option<Element>, incoming: Option<Element>) -> Option<Reaction> {
    let (existing, incoming) = (existing?, incoming?);
    match (existing, incoming) {
        (Element::Fire, Element::Nature) | (Element::Nature, Element::Fire) => Some(Reaction::Burn),
        (Element::Fire, Element::Water) | (Element::Water, Element::Fire) => {
            Some(Reaction::Vaporize)
        }
        (Element::Water, Element::Nature) | (Element::Nature, Element::Water) => {
            Some(Reaction::Bloom)
        }
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const ALL: [Option<Element>; 4] =
        [None, Some(Element::Fire), Some(Element::Water), Some(Element::Nature)];

    #[test]
    fn table_is_symmetric() {
        for left in ALL {
            for right in ALL {
                assert_eq!(reaction(left, right), reaction(right, left), "{left:?} vs {right:?}");
            }
        }
    }

    #[test]
    fn missing_element_never_reacts() {
        for element in ALL {
            assert_eq!(reaction(element, None), None);
            assert_eq!(reaction(None, element), None);
        }
    }

    #[test]
    fn same_element_does_not_react() {
        for element in [Element::Fire, Element::Water, Element::Nature] {
            assert_eq!(reaction(Some(element), Some(element)), None);
        }
    }

    #[test]
    fn defined_pairs_carry_their_payloads() {
        let burn = reaction(Some(Element::Fire), Some(Element::Nature)).expect("burn");
        assert_eq!(burn, Reaction::Burn);
        assert_eq!(burn.bonus_damage(), 12);
        assert_eq!(burn.damage_over_time(), Some(DamageOverTime { damage: 10, turns: 3 }));

        let vaporize = reaction(Some(Element::Water), Some(Element::Fire)).expect("vaporize");
        assert_eq!(vaporize.bonus_damage(), 30);
        assert_eq!(vaporize.damage_over_time(), None);

        let bloom = reaction(Some(Element::Nature), Some(Element::Water)).expect("bloom");
        assert_eq!(bloom.bonus_damage(), 25);
        assert_eq!(bloom.heal_percent(), Some(12));
    }
}
