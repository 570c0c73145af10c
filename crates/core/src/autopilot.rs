//! A deterministic greedy player. It picks one command from the visible run state only, so the
//! same state always yields the same command.

use crate::battle::Battle;
use crate::card::{Card, CardEffect, CardKind};
use crate::journal::InputJournal;
use crate::reaction::reaction;
use crate::run::{POTION_PRICE, RunPhase, RunState};
use crate::types::*;

/// Commands a single `play_to_end` call may issue before giving up on the run.
pub const DEFAULT_COMMAND_LIMIT: usize = 20_000;

/// Next command for `run`. Finished runs get `EndTurn`, which `apply` rejects.
pub fn suggest_command(run: &RunState) -> RunCommand {
    match run.phase() {
        RunPhase::Battle => match run.battle() {
            Some(battle) => battle_command(battle),
            None => RunCommand::EndTurn,
        },
        RunPhase::Reward => RunCommand::ChooseReward(RewardChoice::Card),
        RunPhase::CardReward => reward_card_command(run.reward_offer()),
        RunPhase::CardRemoval => RunCommand::FinishRemoval,
        RunPhase::PathChoice => RunCommand::ChooseNextNode(path_side(run)),
        RunPhase::Rest => RunCommand::AdvanceFromRest(rest_choice(run)),
        RunPhase::Shop => shop_command(run),
        RunPhase::Cleared | RunPhase::Defeated => RunCommand::EndTurn,
    }
}

/// Applies suggestions until the run ends or `limit` commands have been issued, recording each
/// accepted command.
pub fn play_to_end(
    run: &mut RunState,
    journal: &mut InputJournal,
    limit: usize,
) -> Result<(), GameError> {
    for _ in 0..limit {
        if run.is_finished() {
            break;
        }
        let command = suggest_command(run);
        run.apply(command.clone())?;
        journal.record(command);
    }
    Ok(())
}

fn shield_of(card: &Card) -> i32 {
    match card.effect {
        CardEffect::Defend { shield, .. } => shield,
        _ => 0,
    }
}

/// Hand index of the highest-scoring card; ties go to the leftmost.
fn best_by(cards: &[(usize, Card)], score: impl Fn(&Card) -> Option<i32>) -> Option<usize> {
    cards
        .iter()
        .filter_map(|(index, card)| score(card).map(|value| (value, *index)))
        .max_by_key(|(value, index)| (*value, usize::MAX - index))
        .map(|(_, index)| index)
}

fn battle_command(battle: &Battle) -> RunCommand {
    let player = battle.player();
    let enemy = battle.enemy();
    let intent = battle.intent();
    let affordable: Vec<(usize, Card)> = battle
        .hand()
        .into_iter()
        .enumerate()
        .filter(|(_, (_, card))| card.cost <= player.energy)
        .map(|(index, (_, card))| (index, card))
        .collect();

    let big_hit_coming = intent.action == EnemyAction::BigAttack && player.shield < intent.magnitude;
    if big_hit_coming
        && let Some(index) =
            best_by(&affordable, |card| (card.kind() == CardKind::Defend).then(|| shield_of(card)))
    {
        return RunCommand::PlayCard { index };
    }

    if player.reaction_cooldown == 0
        && let Some(index) = best_by(&affordable, |card| {
            card.damage().filter(|_| reaction(enemy.element, card.element).is_some())
        })
    {
        return RunCommand::PlayCard { index };
    }

    if let Some(index) = best_by(&affordable, Card::damage) {
        return RunCommand::PlayCard { index };
    }

    let supporting = |card: &Card| -> Option<i32> {
        match card.kind() {
            CardKind::Buff if !player.attack_buff.is_active() => Some(3),
            CardKind::Debuff => Some(2),
            CardKind::Draw => Some(1),
            CardKind::Defend if intent.action != EnemyAction::Defend && player.shield == 0 => {
                Some(0)
            }
            _ => None,
        }
    };
    match best_by(&affordable, supporting) {
        Some(index) => RunCommand::PlayCard { index },
        None => RunCommand::EndTurn,
    }
}

fn reward_card_command(offer: &[Card]) -> RunCommand {
    offer
        .iter()
        .enumerate()
        .filter_map(|(index, card)| card.damage().map(|damage| (damage, index)))
        .max_by_key(|(damage, index)| (*damage, usize::MAX - index))
        .map_or(RunCommand::SkipRewardCard, |(_, index)| RunCommand::TakeRewardCard { index })
}

fn is_low(run: &RunState) -> bool {
    run.player_hp() * 2 < run.player_max_hp()
}

fn path_side(run: &RunState) -> Side {
    let Some(current) = run.current_node() else {
        return Side::Left;
    };
    let next_floor = current.floor + 1;
    let score = |side: Side| -> i32 {
        let Some(node) = current.children.on(side).and_then(|id| run.tree().node(id)) else {
            return i32::MIN;
        };
        match node.kind {
            NodeKind::Rest if is_low(run) => 4,
            NodeKind::Battle if node.difficulty <= next_floor => 3,
            NodeKind::Shop if run.gold() >= 80 => 2,
            NodeKind::Battle => 1,
            _ => 0,
        }
    };
    if score(Side::Right) > score(Side::Left) { Side::Right } else { Side::Left }
}

fn rest_choice(run: &RunState) -> RestChoice {
    if run.player_hp() * 10 < run.player_max_hp() * 7 {
        RestChoice::Sleep
    } else {
        RestChoice::Alchemy
    }
}

fn shop_command(run: &RunState) -> RunCommand {
    if is_low(run) && run.gold() >= POTION_PRICE {
        return RunCommand::BuyPotion;
    }
    let best_offer = run.shop().and_then(|stock| {
        stock
            .offers
            .iter()
            .enumerate()
            .filter(|(_, offer)| !offer.sold && offer.price <= run.gold())
            .filter_map(|(index, offer)| offer.card.damage().map(|damage| (damage, index)))
            .max_by_key(|(damage, index)| (*damage, usize::MAX - index))
    });
    match best_offer {
        Some((_, index)) => RunCommand::BuyShopCard { index },
        None => RunCommand::AdvanceFromShop,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::RunConfig;
    use crate::content::catalog_card;
    use crate::progression::ProgressionRecord;

    fn fresh_run(seed: u64) -> RunState {
        RunState::new(seed, &ProgressionRecord::default(), &RunConfig::default())
    }

    #[test]
    fn suggestions_are_always_accepted() {
        for seed in 0..10 {
            let mut run = fresh_run(seed);
            for _ in 0..2_000 {
                if run.is_finished() {
                    break;
                }
                let command = suggest_command(&run);
                assert_eq!(run.apply(command.clone()), Ok(()), "seed {seed}: {command:?}");
            }
        }
    }

    #[test]
    fn opening_turn_plays_damage_or_shield() {
        let run = fresh_run(21);
        let battle = run.battle().expect("battle");
        match suggest_command(&run) {
            RunCommand::PlayCard { index } => {
                let (_, card) = battle.hand()[index];
                assert!(card.damage().is_some() || card.kind() == CardKind::Defend, "{card:?}");
            }
            other => panic!("expected a card play, got {other:?}"),
        }
    }

    #[test]
    fn reward_pick_prefers_the_hardest_hitter() {
        let offer: Vec<Card> = ["attack_strike", "defend_guard", "attack_meteor"]
            .iter()
            .filter_map(|key| catalog_card(key))
            .collect();
        assert_eq!(reward_card_command(&offer), RunCommand::TakeRewardCard { index: 2 });
        assert_eq!(reward_card_command(&[]), RunCommand::SkipRewardCard);
    }

    #[test]
    fn play_to_end_journals_every_command() {
        let mut run = fresh_run(4);
        let mut journal = InputJournal::new(4);
        play_to_end(&mut run, &mut journal, DEFAULT_COMMAND_LIMIT).expect("autopilot run");
        assert!(run.is_finished());
        assert_eq!(journal.len() as u64, run.commands_applied());
    }
}
