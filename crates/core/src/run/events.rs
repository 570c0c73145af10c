use std::fmt;

use crate::types::{NodeId, NodeKind, RestChoice, RunOutcome};

/// Run-level log entries, above the per-battle log.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum RunEvent {
    RunStarted { seed: u64, nodes: usize },
    EnteredNode { node: NodeId, floor: u8, kind: NodeKind },
    BattleWon { gold_earned: u32, gold: u32 },
    BattleLost { floor: u8 },
    RewardCardTaken { name: &'static str },
    RewardCardSkipped,
    CardRemoved { name: &'static str },
    RemovalRefunded { gold: u32 },
    PointsEarned { points: u32, total: u32 },
    Rested { choice: RestChoice },
    ShopCardBought { name: &'static str, price: u32 },
    PotionBought { healed: i32 },
    RunFinished { outcome: RunOutcome, floor: u8 },
}

impl fmt::Display for RunEvent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::RunStarted { seed, nodes } => write!(f, "Run {seed} starts ({nodes} nodes)."),
            Self::EnteredNode { node, floor, kind } => {
                write!(f, "Floor {floor}: entered {node} ({kind:?}).")
            }
            Self::BattleWon { gold_earned, gold } => {
                write!(f, "Victory! +{gold_earned}G (now {gold}G).")
            }
            Self::BattleLost { floor } => write!(f, "Defeated on floor {floor}."),
            Self::RewardCardTaken { name } => write!(f, "Added {name} to the deck."),
            Self::RewardCardSkipped => write!(f, "Skipped the card reward."),
            Self::CardRemoved { name } => write!(f, "Removed {name} from the deck."),
            Self::RemovalRefunded { gold } => write!(f, "Removal cancelled, {gold}G refunded."),
            Self::PointsEarned { points, total } => {
                write!(f, "+{points} upgrade points ({total} this run).")
            }
            Self::Rested { choice } => match choice {
                RestChoice::Meditate => write!(f, "Meditated: +20% attack next battle."),
                RestChoice::Sleep => write!(f, "Slept: HP fully restored."),
                RestChoice::Alchemy => write!(f, "Alchemy: attack cards deal 10% more."),
            },
            Self::ShopCardBought { name, price } => write!(f, "Bought {name} for {price}G."),
            Self::PotionBought { healed } => write!(f, "Drank a potion, healed {healed} HP."),
            Self::RunFinished { outcome, floor } => match outcome {
                RunOutcome::Cleared => write!(f, "Run cleared on floor {floor}!"),
                RunOutcome::Defeated => write!(f, "Run over on floor {floor}."),
            },
        }
    }
}
