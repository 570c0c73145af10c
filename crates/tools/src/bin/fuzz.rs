use anyhow::{Result, bail};
use clap::Parser;
use deckclimb_core::{
    ProgressionRecord, RestChoice, RewardChoice, RunCommand, RunConfig, RunPhase,
    RunState, Side,
};
use rand_chacha::ChaCha8Rng;
use rand_chacha::rand_core::{Rng, SeedableRng};
use tracing::{info, warn};

#[derive(Parser)]
#[command(author, version, about, long_about = None)]
struct Args {
    #[arg(short, long, default_value_t = 42)]
    seed: u64,
    /// Commands to issue across all runs
    #[arg(short, long, default_value_t = 5000)]
    commands: u32,
}

fn choose<T: Copy>(rng: &mut ChaCha8Rng, slice: &[T]) -> T {
    slice[rng.next_u64() as usize % slice.len()]
}

fn below(rng: &mut ChaCha8Rng, upper: usize) -> usize {
    rng.next_u64() as usize % upper.max(1)
}

fn random_command(run: &RunState, rng: &mut ChaCha8Rng) -> RunCommand {
    match run.phase() {
        RunPhase::Battle => {
            let hand = run.battle().map_or(0, |battle| battle.hand_ids().len());
            // Bias towards playing; out-of-range indices exercise rejection.
            if below(rng, 4) == 0 {
                RunCommand::EndTurn
            } else {
                RunCommand::PlayCard { index: below(rng, hand + 1) }
            }
        }
        RunPhase::Reward => RunCommand::ChooseReward(choose(
            rng,
            &[RewardChoice::Card, RewardChoice::RemoveCards, RewardChoice::Points],
        )),
        RunPhase::CardReward => {
            if below(rng, 4) == 0 {
                RunCommand::SkipRewardCard
            } else {
                RunCommand::TakeRewardCard { index: below(rng, 4) }
            }
        }
        RunPhase::CardRemoval => {
            let ids = run.deck().ids();
            if ids.is_empty() || below(rng, 3) == 0 {
                RunCommand::FinishRemoval
            } else {
                RunCommand::RemoveCard { card: ids[below(rng, ids.len())] }
            }
        }
        RunPhase::PathChoice => RunCommand::ChooseNextNode(choose(rng, &[Side::Left, Side::Right])),
        RunPhase::Rest => RunCommand::AdvanceFromRest(choose(
            rng,
            &[RestChoice::Meditate, RestChoice::Sleep, RestChoice::Alchemy],
        )),
        RunPhase::Shop => match below(rng, 5) {
            0 => RunCommand::BuyShopCard { index: below(rng, 6) },
            1 => RunCommand::BuyPotion,
            2 => RunCommand::BuyCardRemoval,
            3 => RunCommand::BuyUpgradePoints,
            _ => RunCommand::AdvanceFromShop,
        },
        RunPhase::Cleared | RunPhase::Defeated => RunCommand::EndTurn,
    }
}

fn check(run: &RunState) -> Result<()> {
    if run.player_hp() < 0 || run.player_hp() > run.player_max_hp() {
        bail!("run hp {} outside 0..={}", run.player_hp(), run.player_max_hp());
    }
    if let Some(battle) = run.battle().filter(|_| run.phase() == RunPhase::Battle) {
        let player = battle.player();
        if player.energy > player.max_energy {
            bail!("energy {} above max {}", player.energy, player.max_energy);
        }
        if player.shield < 0 || battle.enemy().shield < 0 {
            bail!("negative shield");
        }
        let piles = battle.hand_ids().len() + battle.draw_pile_len() + battle.discard_pile_len();
        if piles != battle.deck_size() {
            bail!("piles hold {piles} cards but the deck has {}", battle.deck_size());
        }
    }
    Ok(())
}

fn main() -> Result<()> {
    tracing_subscriber::fmt().with_target(false).init();
    let args = Args::parse();
    info!(seed = args.seed, commands = args.commands, "starting fuzz harness");

    let mut rng = ChaCha8Rng::seed_from_u64(args.seed);
    let record = ProgressionRecord::default();
    let config = RunConfig::default();
    let mut run = RunState::new(rng.next_u64(), &record, &config);
    let (mut runs, mut rejected) = (1u32, 0u32);

    for step in 0..args.commands {
        if run.is_finished() {
            info!(
                seed = run.seed(),
                outcome = ?run.outcome(),
                floor = run.floor_reached(),
                "run over"
            );
            run = RunState::new(rng.next_u64(), &record, &config);
            runs += 1;
        }
        let command = random_command(&run, &mut rng);
        let before = (run.phase(), run.gold(), run.deck().len(), run.commands_applied());
        if let Err(err) = run.apply(command.clone()) {
            rejected += 1;
            let after = (run.phase(), run.gold(), run.deck().len(), run.commands_applied());
            if before != after {
                bail!("step {step}: rejected {command:?} ({err}) still changed the run");
            }
        }
        if let Err(err) = check(&run) {
            warn!(seed = run.seed(), step, ?command, "invariant broken");
            return Err(err.context(format!("seed {} step {step}", run.seed())));
        }
    }

    info!(runs, rejected, "fuzzing completed");
    println!("Fuzzing completed: {runs} runs, {} commands, {rejected} rejected.", args.commands);
    Ok(())
}
