use deckclimb_core::battle::{AttackBuffState, absorb};
use deckclimb_core::{
    AttackBuff, BuffDuration, GameRng, ProgressionRecord, RestChoice, RewardChoice, RunCommand,
    RunConfig, RunPhase, RunState, Side,
};
use proptest::prelude::*;
use proptest::test_runner::{Config as ProptestConfig, TestCaseError, TestRunner};

fn random_command(run: &RunState, rng: &mut GameRng) -> RunCommand {
    let side = if rng.below(2) == 0 { Side::Left } else { Side::Right };
    match run.phase() {
        RunPhase::Battle => {
            let hand = run.battle().map_or(0, |battle| battle.hand_ids().len());
            if rng.below(4) == 0 {
                RunCommand::EndTurn
            } else {
                RunCommand::PlayCard { index: rng.below(hand + 2) }
            }
        }
        RunPhase::Reward => {
            let choices = [RewardChoice::Card, RewardChoice::RemoveCards, RewardChoice::Points];
            RunCommand::ChooseReward(choices[rng.below(choices.len())])
        }
        RunPhase::CardReward => match rng.below(4) {
            0 => RunCommand::SkipRewardCard,
            _ => RunCommand::TakeRewardCard { index: rng.below(4) },
        },
        RunPhase::CardRemoval => {
            let ids = run.deck().ids();
            match rng.below(3) {
                0 => RunCommand::FinishRemoval,
                _ => RunCommand::RemoveCard { card: ids[rng.below(ids.len())] },
            }
        }
        RunPhase::PathChoice => RunCommand::ChooseNextNode(side),
        RunPhase::Rest => {
            let choices = [RestChoice::Meditate, RestChoice::Sleep, RestChoice::Alchemy];
            RunCommand::AdvanceFromRest(choices[rng.below(choices.len())])
        }
        RunPhase::Shop => match rng.below(6) {
            0 => RunCommand::BuyShopCard { index: rng.below(6) },
            1 => RunCommand::BuyPotion,
            2 => RunCommand::BuyCardRemoval,
            3 => RunCommand::BuyUpgradePoints,
            4 => RunCommand::EndTurn,
            _ => RunCommand::AdvanceFromShop,
        },
        RunPhase::Cleared | RunPhase::Defeated => RunCommand::EndTurn,
    }
}

fn check_invariants(run: &RunState) -> Result<(), String> {
    if !(0..=run.player_max_hp()).contains(&run.player_hp()) {
        return Err(format!("run hp {} outside 0..={}", run.player_hp(), run.player_max_hp()));
    }
    if run.deck().len() < 10 {
        return Err(format!("deck shrank to {}", run.deck().len()));
    }
    let Some(battle) = run.battle().filter(|_| run.phase() == RunPhase::Battle) else {
        return Ok(());
    };
    let player = battle.player();
    if player.energy > player.max_energy {
        return Err(format!("energy {} above max {}", player.energy, player.max_energy));
    }
    if player.shield < 0 || battle.enemy().shield < 0 {
        return Err("negative shield".to_string());
    }
    let piles = battle.hand_ids().len() + battle.draw_pile_len() + battle.discard_pile_len();
    if piles != battle.deck_size() {
        return Err(format!("piles hold {piles} cards, deck has {}", battle.deck_size()));
    }
    Ok(())
}

fn run_random_commands(seed: u64, command_seed: u64, steps: usize) -> Result<(), String> {
    let mut run = RunState::new(seed, &ProgressionRecord::default(), &RunConfig::default());
    let mut rng = GameRng::from_seed(command_seed);
    for step in 0..steps {
        if run.is_finished() {
            break;
        }
        let command = random_command(&run, &mut rng);
        let before = (run.phase(), run.gold(), run.deck().len(), run.commands_applied());
        if run.apply(command.clone()).is_err() {
            let after = (run.phase(), run.gold(), run.deck().len(), run.commands_applied());
            if before != after {
                return Err(format!("step {step}: rejected {command:?} changed the run"));
            }
        }
        check_invariants(&run).map_err(|err| format!("step {step} after {command:?}: {err}"))?;
    }
    Ok(())
}

#[test]
fn random_command_streams_keep_run_invariants() {
    let mut runner = TestRunner::new(ProptestConfig { cases: 48, ..ProptestConfig::default() });
    runner
        .run(&(any::<u64>(), any::<u64>()), |(seed, command_seed)| {
            run_random_commands(seed, command_seed, 600).map_err(TestCaseError::fail)
        })
        .expect("random command streams must keep invariants");
}

proptest! {
    #[test]
    fn shield_absorbs_before_hp(shield in 0i32..200, hp in 0i32..200, damage in 0i32..400) {
        let result = absorb(shield, hp, damage);
        prop_assert_eq!(result.blocked, shield.min(damage));
        prop_assert_eq!(result.shield, shield - result.blocked);
        prop_assert!(result.hp >= 0);
        prop_assert_eq!(result.hp_loss, hp - result.hp);
        prop_assert!(result.blocked + result.hp_loss <= damage);
        if damage > shield {
            prop_assert_eq!(result.hp, (hp - (damage - shield)).max(0));
        } else {
            prop_assert_eq!(result.hp, hp);
        }
    }

    #[test]
    fn buff_merge_never_weakens(
        percent in 0u32..100,
        turns in 0u32..5,
        persistent in any::<bool>(),
        incoming_percent in 1u32..100,
        incoming_turns in 1u32..5,
        damage in 0i32..100,
    ) {
        let duration =
            if persistent { BuffDuration::Persistent } else { BuffDuration::Turns(turns) };
        let mut state = AttackBuffState { percent, duration };
        let before = state;
        let incoming = BuffDuration::Turns(incoming_turns);
        state.merge(AttackBuff { percent: incoming_percent, duration: incoming });
        prop_assert!(state.percent >= before.percent);
        prop_assert!(state.duration >= before.duration);
        prop_assert!(state.scale(damage) >= before.scale(damage));
        prop_assert!(state.scale(damage) >= damage);
    }
}
