use deckclimb_core::autopilot::{DEFAULT_COMMAND_LIMIT, play_to_end};
use deckclimb_core::floor_tree;
use deckclimb_core::{InputJournal, ProgressionRecord, RunConfig, RunState, replay_to_end};

fn autopilot_run(seed: u64) -> (RunState, InputJournal) {
    let mut run = RunState::new(seed, &ProgressionRecord::default(), &RunConfig::default());
    let mut journal = InputJournal::new(seed);
    play_to_end(&mut run, &mut journal, DEFAULT_COMMAND_LIMIT).expect("autopilot run");
    (run, journal)
}

fn trace(run: &RunState) -> Vec<String> {
    let mut lines: Vec<String> = run.log().iter().map(ToString::to_string).collect();
    if let Some(battle) = run.battle() {
        lines.extend(battle.log().iter().map(ToString::to_string));
    }
    lines
}

#[test]
fn identical_seeds_produce_identical_runs() {
    let (first, first_journal) = autopilot_run(12345);
    let (second, second_journal) = autopilot_run(12345);
    assert_eq!(first.snapshot_hash(), second.snapshot_hash());
    assert_eq!(first_journal, second_journal);
    assert_eq!(trace(&first), trace(&second));
}

#[test]
fn different_seeds_produce_different_runs() {
    let (first, _) = autopilot_run(123);
    let (second, _) = autopilot_run(456);
    assert_ne!(first.snapshot_hash(), second.snapshot_hash());
}

#[test]
fn tree_depends_only_on_the_seed() {
    for seed in [0, 1, 99, u64::MAX] {
        assert_eq!(floor_tree::generate(seed), floor_tree::generate(seed));
    }
    let config = RunConfig::default();
    let record = ProgressionRecord::default();
    let run = RunState::new(31, &record, &config);
    let upgraded = ProgressionRecord { card_draw_level: 2, ..ProgressionRecord::default() };
    let other = RunState::new(31, &upgraded, &config);
    assert_eq!(run.tree().canonical_bytes(), other.tree().canonical_bytes());
}

#[test]
fn journal_survives_json_and_replays_to_the_same_hash() {
    let (run, journal) = autopilot_run(2024);
    let json = serde_json::to_string(&journal).expect("serialize journal");
    let restored: InputJournal = serde_json::from_str(&json).expect("deserialize journal");
    assert_eq!(restored, journal);

    let replayed = replay_to_end(&restored, &ProgressionRecord::default(), &RunConfig::default())
        .expect("replay");
    assert_eq!(replayed.final_snapshot_hash, run.snapshot_hash());
    assert_eq!(replayed.outcome, run.outcome());
}
