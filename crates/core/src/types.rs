use std::error::Error;
use std::fmt;

use serde::{Deserialize, Serialize};
use slotmap::new_key_type;

new_key_type! {
    /// Handle for one physical copy of a card in the run's deck.
    pub struct CardId;
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct NodeId(pub u32);

impl fmt::Display for NodeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "node_{}", self.0)
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Element {
    Fire,
    Water,
    Nature,
}

impl Element {
    pub fn label(self) -> &'static str {
        match self {
            Self::Fire => "Fire",
            Self::Water => "Water",
            Self::Nature => "Nature",
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum EnemyKind {
    Slime,
    Goblin,
    Orc,
    Dragon,
    Wizard,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum EnemyAction {
    Attack,
    BigAttack,
    Defend,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum NodeKind {
    Battle,
    Rest,
    Shop,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum BattleStatus {
    Ongoing,
    Won,
    Lost,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum RunOutcome {
    Cleared,
    Defeated,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Side {
    Left,
    Right,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum RestChoice {
    /// +20% attack for the whole next battle.
    Meditate,
    /// Full heal.
    Sleep,
    /// Attack damage on every card in the deck +10%.
    Alchemy,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum RewardChoice {
    Card,
    RemoveCards,
    Points,
}

/// Every caller-issued input to a run. Journals store these verbatim.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum RunCommand {
    PlayCard { index: usize },
    EndTurn,
    ChooseReward(RewardChoice),
    TakeRewardCard { index: usize },
    SkipRewardCard,
    RemoveCard { card: CardId },
    FinishRemoval,
    ChooseNextNode(Side),
    AdvanceFromRest(RestChoice),
    BuyShopCard { index: usize },
    BuyPotion,
    BuyCardRemoval,
    BuyUpgradePoints,
    AdvanceFromShop,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum GameError {
    HandIndexOutOfRange { index: usize, hand_len: usize },
    NotEnoughEnergy { cost: u32, energy: u32 },
    BattleOver,
    WrongPhase { command: &'static str },
    InvalidChoice,
    NotEnoughGold { price: u32, gold: u32 },
    UnknownCard,
    DeckAtMinimum { min: usize },
    RunNotFinished,
    AlreadySettled,
}

impl fmt::Display for GameError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::HandIndexOutOfRange { index, hand_len } => {
                write!(f, "hand index {index} is out of range (hand holds {hand_len})")
            }
            Self::NotEnoughEnergy { cost, energy } => {
                write!(f, "not enough energy: card costs {cost}, {energy} available")
            }
            Self::BattleOver => write!(f, "the battle is already over"),
            Self::WrongPhase { command } => write!(f, "{command} is not available right now"),
            Self::InvalidChoice => write!(f, "invalid choice"),
            Self::NotEnoughGold { price, gold } => {
                write!(f, "not enough gold: costs {price}G, {gold}G available")
            }
            Self::UnknownCard => write!(f, "card is not in the deck"),
            Self::DeckAtMinimum { min } => write!(f, "the deck cannot shrink below {min} cards"),
            Self::RunNotFinished => write!(f, "the run has not finished yet"),
            Self::AlreadySettled => write!(f, "the run result was already recorded"),
        }
    }
}

impl Error for GameError {}
