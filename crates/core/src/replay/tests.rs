use super::*;
use crate::autopilot::{DEFAULT_COMMAND_LIMIT, play_to_end};
use crate::types::RunCommand;

fn recorded_run(seed: u64, progression: &ProgressionRecord) -> (RunState, InputJournal) {
    let mut run = RunState::new(seed, progression, &RunConfig::default());
    let mut journal = InputJournal::for_run(seed, progression, &RunConfig::default());
    play_to_end(&mut run, &mut journal, DEFAULT_COMMAND_LIMIT).expect("autopilot run");
    (run, journal)
}

#[test]
fn replay_reaches_the_same_final_state() {
    let progression = ProgressionRecord::default();
    for seed in [1, 77, 4096] {
        let (run, journal) = recorded_run(seed, &progression);
        let replayed =
            replay_to_end(&journal, &progression, &RunConfig::default()).expect("replay");
        assert_eq!(replayed.final_snapshot_hash, run.snapshot_hash(), "seed {seed}");
        assert_eq!(replayed.outcome, run.outcome());
        assert_eq!(replayed.commands, journal.len() as u64);
    }
}

#[test]
fn replay_needs_the_same_upgrades() {
    let upgraded = ProgressionRecord { max_hp_level: 3, ..ProgressionRecord::default() };
    let (run, journal) = recorded_run(12, &upgraded);
    let replayed =
        replay_to_end(&journal, &journal.progression, &journal.config).expect("replay");
    assert_eq!(replayed.final_snapshot_hash, run.snapshot_hash());

    let plain = rebuild(&journal, &ProgressionRecord::default(), &RunConfig::default());
    let diverged = plain.map_or(true, |other| other.snapshot_hash() != run.snapshot_hash());
    assert!(diverged);
}

#[test]
fn partial_journal_replays_to_a_running_state() {
    let progression = ProgressionRecord::default();
    let mut run = RunState::new(5, &progression, &RunConfig::default());
    let mut journal = InputJournal::new(5);
    run.apply(RunCommand::EndTurn).expect("end turn");
    journal.record(RunCommand::EndTurn);

    let replayed = replay_to_end(&journal, &progression, &RunConfig::default()).expect("replay");
    assert_eq!(replayed.outcome, None);
    assert_eq!(replayed.commands, 1);
    assert_eq!(replayed.final_snapshot_hash, run.snapshot_hash());
}

#[test]
fn rejected_command_reports_its_sequence_number() {
    let mut journal = InputJournal::new(5);
    journal.record(RunCommand::EndTurn);
    journal.record(RunCommand::BuyPotion);

    let err = replay_to_end(&journal, &ProgressionRecord::default(), &RunConfig::default())
        .expect_err("potion outside a shop");
    assert_eq!(err.seq, 1);
    assert_eq!(err.error, GameError::WrongPhase { command: "buy_potion" });
}
