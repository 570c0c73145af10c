//! A whole climb: the floor tree, the persistent deck and HP, gold, and the phase machine that
//! routes caller commands to battles, rewards, rest sites, and shops.
//!
//! `RunState` is owned by the caller and is the only holder of run state; every input goes
//! through `apply`, which is also what replay drives.

use crate::battle::{Battle, BattleSetup};
use crate::card::{AttackBuff, Card};
use crate::config::RunConfig;
use crate::content::starter_deck;
use crate::deck::Deck;
use crate::floor_tree::{self, FloorNode, FloorTree, NextStep};
use crate::progression::{ProgressionRecord, ResultAward, UpgradeKey};
use crate::rng::GameRng;
use crate::types::*;

mod events;
mod rest;
mod rewards;
mod shop;


pub use events::RunEvent;
pub use rest::{ALCHEMY_PERCENT, MEDITATE_PERCENT};
pub use rewards::{REWARD_CARD_COUNT, REWARD_POINTS, REWARD_REMOVALS};
pub use shop::{
    POINTS_PER_PURCHASE, POINTS_PRICE, POTION_HEAL, POTION_PRICE, REMOVAL_PRICE, SHOP_CARD_COUNT,
    ShopOffer, ShopStock,
};

/// Removal is refused once the deck is this small.
pub const MIN_DECK_SIZE: usize = 10;

const TREE_STREAM: u64 = 0x7472_6565;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum RunPhase {
    Battle,
    /// Battle won; waiting for `ChooseReward`.
    Reward,
    CardReward,
    CardRemoval,
    PathChoice,
    Rest,
    Shop,
    Cleared,
    Defeated,
}

/// Where a removal session came from and what cancelling it gives back.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
struct RemovalSession {
    remaining: u8,
    removed: u8,
    refund: Option<u32>,
    return_to: RunPhase,
}

#[derive(Clone, Debug)]
pub struct RunState {
    seed: u64,
    config: RunConfig,
    rng: GameRng,
    tree: FloorTree,
    current: NodeId,
    deck: Deck,
    player_hp: i32,
    player_max_hp: i32,
    max_energy: u32,
    draw_bonus: u32,
    gold: u32,
    battles_started: u32,
    battles_won: u32,
    earned_points: u32,
    pending_battle_buff: Option<AttackBuff>,
    phase: RunPhase,
    battle: Option<Battle>,
    reward_offer: Vec<Card>,
    shop: Option<ShopStock>,
    removal: Option<RemovalSession>,
    outcome: Option<RunOutcome>,
    settled: bool,
    commands_applied: u64,
    log: Vec<RunEvent>,
}

impl RunState {
    pub fn new(seed: u64, progression: &ProgressionRecord, config: &RunConfig) -> Self {
        let mut rng = GameRng::from_seed(seed);
        let tree = floor_tree::generate_from(&mut rng.fork(TREE_STREAM));
        let max_hp = config.base_max_hp + progression.total_effect(UpgradeKey::MaxHp) as i32;

        let mut run = Self {
            seed,
            config: *config,
            rng,
            tree,
            current: FloorTree::ROOT,
            deck: Deck::from_cards(starter_deck()),
            player_hp: max_hp,
            player_max_hp: max_hp,
            max_energy: config.base_energy + progression.total_effect(UpgradeKey::StartingEnergy),
            draw_bonus: progression.total_effect(UpgradeKey::CardDraw),
            gold: config.starting_gold,
            battles_started: 0,
            battles_won: 0,
            earned_points: 0,
            pending_battle_buff: None,
            phase: RunPhase::Battle,
            battle: None,
            reward_offer: Vec::new(),
            shop: None,
            removal: None,
            outcome: None,
            settled: false,
            commands_applied: 0,
            log: Vec::new(),
        };
        run.log.push(RunEvent::RunStarted { seed, nodes: run.tree.len() });
        run.enter_node(FloorTree::ROOT);
        run
    }

    pub fn seed(&self) -> u64 {
        self.seed
    }

    pub fn config(&self) -> &RunConfig {
        &self.config
    }

    pub fn phase(&self) -> RunPhase {
        self.phase
    }

    pub fn tree(&self) -> &FloorTree {
        &self.tree
    }

    pub fn current_node(&self) -> Option<&FloorNode> {
        self.tree.node(self.current)
    }

    pub fn current_node_id(&self) -> NodeId {
        self.current
    }

    pub fn deck(&self) -> &Deck {
        &self.deck
    }

    pub fn battle(&self) -> Option<&Battle> {
        self.battle.as_ref()
    }

    pub fn player_hp(&self) -> i32 {
        self.player_hp
    }

    pub fn player_max_hp(&self) -> i32 {
        self.player_max_hp
    }

    pub fn max_energy(&self) -> u32 {
        self.max_energy
    }

    pub fn draw_bonus(&self) -> u32 {
        self.draw_bonus
    }

    pub fn gold(&self) -> u32 {
        self.gold
    }

    pub fn battles_won(&self) -> u32 {
        self.battles_won
    }

    pub fn earned_points(&self) -> u32 {
        self.earned_points
    }

    pub fn pending_battle_buff(&self) -> Option<AttackBuff> {
        self.pending_battle_buff
    }

    pub fn reward_offer(&self) -> &[Card] {
        &self.reward_offer
    }

    pub fn shop(&self) -> Option<&ShopStock> {
        self.shop.as_ref()
    }

    /// Cards still removable in the current removal session.
    pub fn removals_left(&self) -> u8 {
        self.removal.map_or(0, |session| session.remaining)
    }

    pub fn outcome(&self) -> Option<RunOutcome> {
        self.outcome
    }

    pub fn is_finished(&self) -> bool {
        self.outcome.is_some()
    }

    pub fn commands_applied(&self) -> u64 {
        self.commands_applied
    }

    pub fn log(&self) -> &[RunEvent] {
        &self.log
    }

    /// Floor of the node the run is on (or ended on).
    pub fn floor_reached(&self) -> u8 {
        self.current_node().map_or(1, |node| node.floor)
    }

    /// Routes one command to the active phase. Errors leave the run unchanged apart from battle
    /// log lines for rejected card plays.
    pub fn apply(&mut self, command: RunCommand) -> Result<(), GameError> {
        match command {
            RunCommand::PlayCard { index } => self.play_card(index)?,
            RunCommand::EndTurn => self.end_turn()?,
            RunCommand::ChooseReward(choice) => self.choose_reward(choice)?,
            RunCommand::TakeRewardCard { index } => self.take_reward_card(index)?,
            RunCommand::SkipRewardCard => self.skip_reward_card()?,
            RunCommand::RemoveCard { card } => self.remove_card(card)?,
            RunCommand::FinishRemoval => self.finish_removal()?,
            RunCommand::ChooseNextNode(side) => self.choose_next_node(side)?,
            RunCommand::AdvanceFromRest(choice) => self.advance_from_rest(choice)?,
            RunCommand::BuyShopCard { index } => self.buy_shop_card(index)?,
            RunCommand::BuyPotion => self.buy_potion()?,
            RunCommand::BuyCardRemoval => self.buy_card_removal()?,
            RunCommand::BuyUpgradePoints => self.buy_upgrade_points()?,
            RunCommand::AdvanceFromShop => self.advance_from_shop()?,
        }
        self.commands_applied += 1;
        Ok(())
    }

    pub fn play_card(&mut self, index: usize) -> Result<(), GameError> {
        let battle = self.active_battle("play_card")?;
        battle.play_card(index)?;
        self.after_battle_step();
        Ok(())
    }

    pub fn end_turn(&mut self) -> Result<(), GameError> {
        let battle = self.active_battle("end_turn")?;
        battle.end_turn()?;
        self.after_battle_step();
        Ok(())
    }

    pub fn choose_next_node(&mut self, side: Side) -> Result<(), GameError> {
        self.expect_phase(RunPhase::PathChoice, "choose_next_node")?;
        let next = self
            .tree
            .node(self.current)
            .and_then(|node| node.children.on(side))
            .ok_or(GameError::InvalidChoice)?;
        self.enter_node(next);
        Ok(())
    }

    /// Adds earned points, then records the result. Only once, and only after the run ended.
    pub fn settle(&mut self, record: &mut ProgressionRecord) -> Result<ResultAward, GameError> {
        let outcome = self.outcome.ok_or(GameError::RunNotFinished)?;
        if self.settled {
            return Err(GameError::AlreadySettled);
        }
        record.add_points(self.earned_points);
        let award = record.record_result(outcome == RunOutcome::Cleared, self.floor_reached());
        self.settled = true;
        Ok(award)
    }

    fn expect_phase(&self, phase: RunPhase, command: &'static str) -> Result<(), GameError> {
        if self.phase != phase {
            return Err(GameError::WrongPhase { command });
        }
        Ok(())
    }

    fn active_battle(&mut self, command: &'static str) -> Result<&mut Battle, GameError> {
        self.expect_phase(RunPhase::Battle, command)?;
        self.battle.as_mut().ok_or(GameError::WrongPhase { command })
    }

    fn after_battle_step(&mut self) {
        let Some(battle) = self.battle.as_ref() else {
            return;
        };
        self.player_hp = battle.player().hp;
        match battle.status() {
            BattleStatus::Ongoing => {}
            BattleStatus::Won => self.on_battle_won(),
            BattleStatus::Lost => {
                self.log.push(RunEvent::BattleLost { floor: self.floor_reached() });
                self.finish(RunOutcome::Defeated);
            }
        }
    }

    fn enter_node(&mut self, id: NodeId) {
        self.current = id;
        self.tree.mark_visited(id);
        let Some(node) = self.tree.node(id).cloned() else {
            self.finish(RunOutcome::Cleared);
            return;
        };
        self.log.push(RunEvent::EnteredNode { node: id, floor: node.floor, kind: node.kind });
        match node.kind {
            NodeKind::Battle => self.start_battle(&node),
            NodeKind::Rest => self.phase = RunPhase::Rest,
            NodeKind::Shop => self.open_shop(),
        }
    }

    fn start_battle(&mut self, node: &FloorNode) {
        self.battles_started += 1;
        let enemy = node.enemy.unwrap_or_else(|| EnemyKind::for_difficulty(node.difficulty));
        let setup = BattleSetup {
            enemy,
            difficulty: node.difficulty,
            player_hp: self.player_hp,
            player_max_hp: self.player_max_hp,
            max_energy: self.max_energy,
            hand_size: self.config.hand_size,
            draw_bonus: self.draw_bonus,
            opening_buff: self.pending_battle_buff.take(),
        };
        let stream = self.rng.fork(u64::from(self.battles_started));
        self.battle = Some(Battle::new(setup, &self.deck, stream));
        self.phase = RunPhase::Battle;
    }

    /// Moves on from a finished node: a path choice if the tree continues, otherwise the end.
    fn advance_to_path(&mut self) {
        self.reward_offer.clear();
        self.removal = None;
        match self.tree.next_step(self.current) {
            NextStep::Choose(_) => self.phase = RunPhase::PathChoice,
            NextStep::RunCleared | NextStep::NoFurtherFloors => self.finish(RunOutcome::Cleared),
        }
    }

    fn finish(&mut self, outcome: RunOutcome) {
        self.outcome = Some(outcome);
        self.phase = match outcome {
            RunOutcome::Cleared => RunPhase::Cleared,
            RunOutcome::Defeated => RunPhase::Defeated,
        };
        self.log.push(RunEvent::RunFinished { outcome, floor: self.floor_reached() });
    }
}
