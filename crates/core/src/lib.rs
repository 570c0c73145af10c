pub mod autopilot;
pub mod battle;
pub mod card;
pub mod config;
pub mod content;
pub mod deck;
pub mod floor_tree;
pub mod hash;
pub mod journal;
pub mod progression;
pub mod progression_file;
pub mod reaction;
pub mod replay;
pub mod rng;
pub mod run;
pub mod types;

pub use battle::{Battle, BattleEvent, BattleSetup};
pub use card::{AttackBuff, BuffDuration, Card, CardEffect, CardKind, Debuff};
pub use config::RunConfig;
pub use deck::Deck;
pub use floor_tree::{FloorNode, FloorTree, NextStep, NodeChildren};
pub use journal::{CommandRecord, InputJournal};
pub use progression::{ProgressionRecord, ResultAward, UpgradeError, UpgradeKey};
pub use replay::{ReplayError, ReplayResult, replay_to_end};
pub use rng::GameRng;
pub use run::{RunEvent, RunPhase, RunState};
pub use types::*;
