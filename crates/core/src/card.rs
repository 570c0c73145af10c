//! Card templates: a validated tagged effect per card type.
//! Cards are pure data; the battle engine interprets them.

use std::error::Error;
use std::fmt;

use crate::types::Element;

/// How long a player attack buff lasts.
///
/// Variant order matters: `Persistent` compares greater than any `Turns(n)`, which is what the
/// max-merge of buff durations relies on.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum BuffDuration {
    Turns(u32),
    /// Lasts for the whole current battle and never decays per turn.
    Persistent,
}

impl BuffDuration {
    pub fn is_active(self) -> bool {
        !matches!(self, Self::Turns(0))
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct AttackBuff {
    /// Extra outgoing damage in percent (`15` = +15%).
    pub percent: u32,
    pub duration: BuffDuration,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Debuff {
    Weaken { percent: u32, turns: u32 },
    /// Skips the enemy's next action once.
    Stun,
    Poison { damage: i32, turns: u32 },
    /// Weakens like `Weaken` and also tries to attach the card's element.
    Freeze { percent: u32, turns: u32 },
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum CardKind {
    Attack,
    Defend,
    Buff,
    Debuff,
    Draw,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum CardEffect {
    Attack { damage: i32, draw: u32 },
    Defend { shield: i32, buff: Option<AttackBuff> },
    Buff { buff: AttackBuff, draw: u32 },
    Debuff(Debuff),
    Draw { draw: u32, damage: Option<i32> },
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct Card {
    pub key: &'static str,
    pub name: &'static str,
    pub cost: u32,
    pub element: Option<Element>,
    pub effect: CardEffect,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum CardError {
    NonPositiveDamage,
    NonPositiveShield,
    EmptyBuff,
    EmptyDraw,
    WeakenOutOfRange,
    EmptyPoison,
}

impl fmt::Display for CardError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let message = match self {
            Self::NonPositiveDamage => "damage must be positive",
            Self::NonPositiveShield => "shield must be positive",
            Self::EmptyBuff => "buff needs a positive percent and a non-zero duration",
            Self::EmptyDraw => "draw card must draw at least one card",
            Self::WeakenOutOfRange => "weaken percent must be within 1..=100",
            Self::EmptyPoison => "poison needs positive damage and duration",
        };
        f.write_str(message)
    }
}

impl Error for CardError {}

impl Card {
    pub fn new(
        key: &'static str,
        name: &'static str,
        cost: u32,
        element: Option<Element>,
        effect: CardEffect,
    ) -> Result<Self, CardError> {
        let card = Self { key, name, cost, element, effect };
        card.validate()?;
        Ok(card)
    }

    pub fn validate(&self) -> Result<(), CardError> {
        match self.effect {
            CardEffect::Attack { damage, .. } => check_damage(damage),
            CardEffect::Defend { shield, buff } => {
                if shield <= 0 {
                    return Err(CardError::NonPositiveShield);
                }
                buff.map_or(Ok(()), check_buff)
            }
            CardEffect::Buff { buff, .. } => check_buff(buff),
            CardEffect::Debuff(debuff) => match debuff {
                Debuff::Weaken { percent, turns } | Debuff::Freeze { percent, turns } => {
                    if !(1..=100).contains(&percent) || turns == 0 {
                        return Err(CardError::WeakenOutOfRange);
                    }
                    Ok(())
                }
                Debuff::Stun => Ok(()),
                Debuff::Poison { damage, turns } => {
                    if damage <= 0 || turns == 0 {
                        return Err(CardError::EmptyPoison);
                    }
                    Ok(())
                }
            },
            CardEffect::Draw { draw, damage } => {
                if draw == 0 {
                    return Err(CardError::EmptyDraw);
                }
                damage.map_or(Ok(()), check_damage)
            }
        }
    }

    pub fn kind(&self) -> CardKind {
        match self.effect {
            CardEffect::Attack { .. } => CardKind::Attack,
            CardEffect::Defend { .. } => CardKind::Defend,
            CardEffect::Buff { .. } => CardKind::Buff,
            CardEffect::Debuff(_) => CardKind::Debuff,
            CardEffect::Draw { .. } => CardKind::Draw,
        }
    }

    /// Direct damage printed on the card, if any.
    pub fn damage(&self) -> Option<i32> {
        match self.effect {
            CardEffect::Attack { damage, .. } => Some(damage),
            CardEffect::Draw { damage, .. } => damage,
            _ => None,
        }
    }

    /// Returns a copy with direct damage scaled by `percent` (rounded down).
    pub fn with_damage_scaled(mut self, percent: u32) -> Self {
        let scale = |damage: i32| (i64::from(damage) * i64::from(percent) / 100) as i32;
        match &mut self.effect {
            CardEffect::Attack { damage, .. } => *damage = scale(*damage),
            CardEffect::Draw { damage: Some(damage), .. } => *damage = scale(*damage),
            _ => {}
        }
        self
    }

    pub fn describe(&self) -> String {
        let mut parts = Vec::new();
        match self.effect {
            CardEffect::Attack { damage, draw } => {
                parts.push(format!("deal {damage}"));
                if draw > 0 {
                    parts.push(format!("draw {draw}"));
                }
            }
            CardEffect::Defend { shield, buff } => {
                parts.push(format!("shield {shield}"));
                if let Some(buff) = buff {
                    parts.push(describe_buff(buff));
                }
            }
            CardEffect::Buff { buff, draw } => {
                parts.push(describe_buff(buff));
                if draw > 0 {
                    parts.push(format!("draw {draw}"));
                }
            }
            CardEffect::Debuff(debuff) => parts.push(match debuff {
                Debuff::Weaken { percent, turns } => format!("weaken {percent}% for {turns}T"),
                Debuff::Stun => "stun".to_string(),
                Debuff::Poison { damage, turns } => format!("poison {damage}/turn for {turns}T"),
                Debuff::Freeze { percent, turns } => format!("freeze {percent}% for {turns}T"),
            }),
            CardEffect::Draw { draw, damage } => {
                parts.push(format!("draw {draw}"));
                if let Some(damage) = damage {
                    parts.push(format!("deal {damage}"));
                }
            }
        }
        if let Some(element) = self.element {
            parts.push(format!("apply {}", element.label()));
        }
        parts.join(", ")
    }
}

impl fmt::Display for Card {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({}E: {})", self.name, self.cost, self.describe())
    }
}

fn check_damage(damage: i32) -> Result<(), CardError> {
    if damage <= 0 { Err(CardError::NonPositiveDamage) } else { Ok(()) }
}

fn check_buff(buff: AttackBuff) -> Result<(), CardError> {
    if buff.percent == 0 || !buff.duration.is_active() {
        return Err(CardError::EmptyBuff);
    }
    Ok(())
}

fn describe_buff(buff: AttackBuff) -> String {
    match buff.duration {
        BuffDuration::Turns(turns) => format!("attack +{}% for {turns}T", buff.percent),
        BuffDuration::Persistent => format!("attack +{}% this battle", buff.percent),
    }
}
