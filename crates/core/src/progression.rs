//! Meta-progression that outlives a single run: upgrade levels, points, and lifetime stats.

use std::error::Error;
use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum UpgradeKey {
    MaxHp,
    StartingEnergy,
    CardDraw,
}

pub struct UpgradeSpec {
    pub name: &'static str,
    /// Cost of reaching level `i + 1`; the table length is the max level.
    pub costs: &'static [u32],
    pub effect_per_level: u32,
}

const MAX_HP: UpgradeSpec =
    UpgradeSpec { name: "Max HP", costs: &[5, 10, 15, 20, 30], effect_per_level: 10 };
const STARTING_ENERGY: UpgradeSpec =
    UpgradeSpec { name: "Starting Energy", costs: &[10, 20], effect_per_level: 1 };
const CARD_DRAW: UpgradeSpec =
    UpgradeSpec { name: "Card Draw", costs: &[8, 16, 24], effect_per_level: 1 };

impl UpgradeKey {
    pub const ALL: [Self; 3] = [Self::MaxHp, Self::StartingEnergy, Self::CardDraw];

    pub fn spec(self) -> &'static UpgradeSpec {
        match self {
            Self::MaxHp => &MAX_HP,
            Self::StartingEnergy => &STARTING_ENERGY,
            Self::CardDraw => &CARD_DRAW,
        }
    }

    pub fn max_level(self) -> u8 {
        self.spec().costs.len() as u8
    }

    pub fn slug(self) -> &'static str {
        match self {
            Self::MaxHp => "max-hp",
            Self::StartingEnergy => "starting-energy",
            Self::CardDraw => "card-draw",
        }
    }
}

impl fmt::Display for UpgradeKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.spec().name)
    }
}

impl FromStr for UpgradeKey {
    type Err = UpgradeError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|key| key.slug() == value)
            .ok_or_else(|| UpgradeError::UnknownUpgrade(value.to_string()))
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum UpgradeError {
    UnknownUpgrade(String),
    MaxLevel { key: UpgradeKey },
    NotEnoughPoints { cost: u32, points: u32 },
}

impl fmt::Display for UpgradeError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::UnknownUpgrade(name) => write!(f, "unknown upgrade `{name}`"),
            Self::MaxLevel { key } => write!(f, "{key} is already at max level"),
            Self::NotEnoughPoints { cost, points } => {
                write!(f, "not enough points: need {cost}, have {points}")
            }
        }
    }
}

impl Error for UpgradeError {}

#[derive(Clone, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(default)]
pub struct ProgressionRecord {
    pub max_hp_level: u8,
    pub starting_energy_level: u8,
    pub card_draw_level: u8,
    pub upgrade_points: u32,
    pub total_wins: u32,
    pub highest_floor: u8,
    pub total_games: u32,
}

/// Points granted by one `record_result` call.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ResultAward {
    pub points: u32,
    pub new_record: bool,
}

pub const NEW_RECORD_BONUS: u32 = 5;

impl ProgressionRecord {
    pub fn level(&self, key: UpgradeKey) -> u8 {
        match key {
            UpgradeKey::MaxHp => self.max_hp_level,
            UpgradeKey::StartingEnergy => self.starting_energy_level,
            UpgradeKey::CardDraw => self.card_draw_level,
        }
    }

    fn level_mut(&mut self, key: UpgradeKey) -> &mut u8 {
        match key {
            UpgradeKey::MaxHp => &mut self.max_hp_level,
            UpgradeKey::StartingEnergy => &mut self.starting_energy_level,
            UpgradeKey::CardDraw => &mut self.card_draw_level,
        }
    }

    /// Level times per-level effect. Levels beyond the table (hand-edited saves) are capped.
    pub fn total_effect(&self, key: UpgradeKey) -> u32 {
        u32::from(self.level(key).min(key.max_level())) * key.spec().effect_per_level
    }

    /// Cost of the next level, or `None` at max level.
    pub fn next_cost(&self, key: UpgradeKey) -> Option<u32> {
        key.spec().costs.get(usize::from(self.level(key))).copied()
    }

    pub fn add_points(&mut self, points: u32) {
        self.upgrade_points = self.upgrade_points.saturating_add(points);
    }

    /// Spends points on the next level of `key`; returns the new level.
    pub fn purchase_upgrade(&mut self, key: UpgradeKey) -> Result<u8, UpgradeError> {
        let cost = self.next_cost(key).ok_or(UpgradeError::MaxLevel { key })?;
        if self.upgrade_points < cost {
            return Err(UpgradeError::NotEnoughPoints { cost, points: self.upgrade_points });
        }
        self.upgrade_points -= cost;
        let level = self.level_mut(key);
        *level += 1;
        Ok(*level)
    }

    pub fn record_result(&mut self, won: bool, floor_reached: u8) -> ResultAward {
        self.total_games += 1;
        let mut points = if won {
            self.total_wins += 1;
            u32::from(floor_reached) * 2
        } else {
            u32::from(floor_reached / 2).max(1)
        };
        let new_record = floor_reached > self.highest_floor;
        if new_record {
            self.highest_floor = floor_reached;
            points += NEW_RECORD_BONUS;
        }
        self.add_points(points);
        ResultAward { points, new_record }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn purchases_follow_cost_table_until_max() {
        let mut record = ProgressionRecord { upgrade_points: 100, ..ProgressionRecord::default() };
        assert_eq!(record.purchase_upgrade(UpgradeKey::StartingEnergy), Ok(1));
        assert_eq!(record.purchase_upgrade(UpgradeKey::StartingEnergy), Ok(2));
        assert_eq!(record.upgrade_points, 70);
        assert_eq!(
            record.purchase_upgrade(UpgradeKey::StartingEnergy),
            Err(UpgradeError::MaxLevel { key: UpgradeKey::StartingEnergy })
        );
        assert_eq!(record.upgrade_points, 70);
        assert_eq!(record.total_effect(UpgradeKey::StartingEnergy), 2);
    }

    #[test]
    fn purchase_without_points_changes_nothing() {
        let mut record = ProgressionRecord { upgrade_points: 4, ..ProgressionRecord::default() };
        assert_eq!(
            record.purchase_upgrade(UpgradeKey::MaxHp),
            Err(UpgradeError::NotEnoughPoints { cost: 5, points: 4 })
        );
        assert_eq!(record.max_hp_level, 0);
        assert_eq!(record.upgrade_points, 4);
    }

    #[test]
    fn total_effect_scales_by_level() {
        let record = ProgressionRecord {
            max_hp_level: 3,
            card_draw_level: 2,
            ..ProgressionRecord::default()
        };
        assert_eq!(record.total_effect(UpgradeKey::MaxHp), 30);
        assert_eq!(record.total_effect(UpgradeKey::CardDraw), 2);
        assert_eq!(record.total_effect(UpgradeKey::StartingEnergy), 0);
    }

    #[test]
    fn results_award_points_and_track_records() {
        let mut record = ProgressionRecord::default();
        let award = record.record_result(false, 1);
        assert_eq!(award, ResultAward { points: 1 + NEW_RECORD_BONUS, new_record: true });

        let award = record.record_result(false, 1);
        assert_eq!(award, ResultAward { points: 1, new_record: false });

        let award = record.record_result(true, 10);
        assert_eq!(award.points, 20 + NEW_RECORD_BONUS);
        assert_eq!(record.highest_floor, 10);
        assert_eq!((record.total_games, record.total_wins), (3, 1));
        assert_eq!(record.upgrade_points, 6 + 1 + 25);

        let award = record.record_result(false, 7);
        assert_eq!(award.points, 3);
    }

    #[test]
    fn missing_fields_deserialize_to_defaults() {
        let record: ProgressionRecord =
            serde_json::from_str(r#"{"upgrade_points": 12}"#).expect("partial record parses");
        assert_eq!(record.upgrade_points, 12);
        assert_eq!(record.max_hp_level, 0);
    }

    #[test]
    fn upgrade_keys_parse_from_slugs() {
        assert_eq!("card-draw".parse::<UpgradeKey>(), Ok(UpgradeKey::CardDraw));
        assert!("luck".parse::<UpgradeKey>().is_err());
    }
}
