use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result, anyhow};
use clap::{Parser, Subcommand};
use deckclimb_core::autopilot::{DEFAULT_COMMAND_LIMIT, play_to_end};
use deckclimb_core::floor_tree::DEFAULT_VISIBLE_DEPTH;
use deckclimb_core::{
    InputJournal, NodeId, ProgressionRecord, RunConfig, RunState, UpgradeKey, floor_tree, journal,
    progression_file, replay_to_end,
};
use directories::ProjectDirs;
use tracing::{debug, info, warn};
use tracing_subscriber::EnvFilter;

const SAVE_ENV: &str = "DECKCLIMB_SAVE";

#[derive(Parser)]
#[command(author, version, about = "Headless driver for deckclimb runs", long_about = None)]
struct Cli {
    /// TOML file overriding the base run numbers
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Progression save file
    #[arg(long, global = true, env = SAVE_ENV)]
    save: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Play runs with the autopilot and bank the results
    Simulate {
        #[arg(short, long, default_value_t = 1)]
        seed: u64,
        #[arg(short, long, default_value_t = 1)]
        runs: u32,
        /// Directory receiving one journal per run
        #[arg(long)]
        journal_out: Option<PathBuf>,
        /// Play without reading or writing the save file
        #[arg(long)]
        dry_run: bool,
    },
    /// Rebuild a run from a journal and print its final state
    Replay {
        #[arg(short, long)]
        journal: PathBuf,
    },
    /// Print the floor tree around a node
    Tree {
        #[arg(short, long)]
        seed: u64,
        #[arg(short, long, default_value_t = DEFAULT_VISIBLE_DEPTH)]
        depth: u8,
        #[arg(short, long, default_value_t = 0)]
        node: u32,
    },
    /// Inspect or spend upgrade points
    Progress {
        #[command(subcommand)]
        action: ProgressAction,
    },
}

#[derive(Subcommand)]
enum ProgressAction {
    Show,
    /// Buy the next level of `max-hp`, `starting-energy`, or `card-draw`
    Buy { upgrade: String },
}

fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(io::stderr)
        .init();
}

fn default_save_path() -> Option<PathBuf> {
    ProjectDirs::from("", "", "deckclimb").map(|dirs| dirs.data_dir().join("progression.json"))
}

fn save_path(cli: &Cli) -> Result<PathBuf> {
    cli.save
        .clone()
        .or_else(default_save_path)
        .ok_or_else(|| anyhow!("no save location: pass --save or set {SAVE_ENV}"))
}

fn load_config(path: Option<&Path>) -> Result<RunConfig> {
    let Some(path) = path else {
        return Ok(RunConfig::default());
    };
    let content = fs::read_to_string(path)
        .with_context(|| format!("failed to read config {}", path.display()))?;
    toml::from_str(&content).with_context(|| format!("invalid config {}", path.display()))
}

fn simulate(
    cli: &Cli,
    config: &RunConfig,
    seed: u64,
    runs: u32,
    journal_out: Option<&Path>,
    dry_run: bool,
) -> Result<()> {
    let path = if dry_run { None } else { Some(save_path(cli)?) };
    let mut record = match &path {
        Some(path) => progression_file::load_or_default(path),
        None => ProgressionRecord::default(),
    };

    for offset in 0..u64::from(runs) {
        let run_seed = seed.wrapping_add(offset);
        let mut run = RunState::new(run_seed, &record, config);
        let mut journal = InputJournal::for_run(run_seed, &record, config);
        play_to_end(&mut run, &mut journal, DEFAULT_COMMAND_LIMIT)
            .with_context(|| format!("autopilot failed on seed {run_seed}"))?;
        if !run.is_finished() {
            warn!(seed = run_seed, commands = run.commands_applied(), "run hit the command limit");
        }
        for event in run.log() {
            debug!(seed = run_seed, "{event}");
        }

        let award = match run.settle(&mut record) {
            Ok(award) => Some(award),
            Err(err) => {
                warn!(seed = run_seed, "not settled: {err}");
                None
            }
        };
        info!(
            seed = run_seed,
            outcome = ?run.outcome(),
            floor = run.floor_reached(),
            battles_won = run.battles_won(),
            commands = run.commands_applied(),
            "run finished"
        );
        println!(
            "seed {run_seed}: {:?} on floor {}, {} battles won, +{} points",
            run.outcome(),
            run.floor_reached(),
            run.battles_won(),
            run.earned_points() + award.map_or(0, |award| award.points),
        );

        if let Some(dir) = journal_out {
            let file = dir.join(format!("run-{run_seed}.json"));
            journal::save(&journal, &file)
                .with_context(|| format!("failed to write journal {}", file.display()))?;
            info!(path = %file.display(), "journal written");
        }
    }

    if let Some(path) = path {
        progression_file::save_atomic(&record, &path)
            .with_context(|| format!("failed to save progression to {}", path.display()))?;
        info!(path = %path.display(), points = record.upgrade_points, "progression saved");
    }
    Ok(())
}

fn replay(path: &Path) -> Result<()> {
    let journal = journal::load(path)
        .with_context(|| format!("failed to read journal {}", path.display()))?;
    let result = replay_to_end(&journal, &journal.progression, &journal.config)
        .context("replay diverged")?;

    println!("Replay complete.");
    println!("Commands: {}", result.commands);
    println!("Outcome: {:?}", result.outcome);
    println!("Snapshot Hash: {:016x}", result.final_snapshot_hash);
    Ok(())
}

fn tree(seed: u64, depth: u8, node: u32) -> Result<()> {
    let tree = floor_tree::generate(seed);
    let start = NodeId(node);
    let start_floor = tree
        .node(start)
        .map(|node| node.floor)
        .ok_or_else(|| anyhow!("{start} is not in the tree"))?;
    println!("Seed {seed}: {} nodes", tree.len());
    for (id, node) in tree.visible_subtree(start, depth) {
        let indent = "  ".repeat(usize::from(node.floor.saturating_sub(start_floor)));
        println!("{indent}[{}] {id} {}", node.floor, node.label());
    }
    Ok(())
}

fn progress(cli: &Cli, action: &ProgressAction) -> Result<()> {
    let path = save_path(cli)?;
    let mut record = progression_file::load_or_default(&path);
    match action {
        ProgressAction::Show => {
            println!("Save: {}", path.display());
            println!("Upgrade points: {}", record.upgrade_points);
            println!(
                "Games: {}  Wins: {}  Best floor: {}",
                record.total_games, record.total_wins, record.highest_floor
            );
            for key in UpgradeKey::ALL {
                let next = record
                    .next_cost(key)
                    .map_or_else(|| "max".to_string(), |cost| format!("next {cost} pts"));
                println!(
                    "  {:<16} {:<16} Lv.{}/{} (+{}) {next}",
                    key.to_string(),
                    key.slug(),
                    record.level(key),
                    key.max_level(),
                    record.total_effect(key),
                );
            }
        }
        ProgressAction::Buy { upgrade } => {
            let key: UpgradeKey = upgrade.parse()?;
            let level = record.purchase_upgrade(key)?;
            progression_file::save_atomic(&record, &path)
                .with_context(|| format!("failed to save progression to {}", path.display()))?;
            info!(upgrade = key.slug(), level, "upgrade purchased");
            println!("{key} is now level {level} ({} points left).", record.upgrade_points);
        }
    }
    Ok(())
}

fn main() -> Result<()> {
    init_tracing();
    let cli = Cli::parse();
    let config = load_config(cli.config.as_deref())?;

    match &cli.command {
        Command::Simulate { seed, runs, journal_out, dry_run } => {
            simulate(&cli, &config, *seed, *runs, journal_out.as_deref(), *dry_run)
        }
        Command::Replay { journal } => replay(journal),
        Command::Tree { seed, depth, node } => tree(*seed, *depth, *node),
        Command::Progress { action } => progress(&cli, action),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn toml_config_overrides_only_named_fields() {
        let dir = tempdir().expect("tempdir");
        let path = dir.path().join("run.toml");
        fs::write(&path, "hand_size = 6\nstarting_gold = 150\n").expect("write config");
        let config = load_config(Some(&path)).expect("config loads");
        assert_eq!(
            config,
            RunConfig { hand_size: 6, starting_gold: 150, ..RunConfig::default() }
        );
        assert_eq!(load_config(None).expect("defaults"), RunConfig::default());
    }

    #[test]
    fn malformed_config_is_reported_with_its_path() {
        let dir = tempdir().expect("tempdir");
        let path = dir.path().join("broken.toml");
        fs::write(&path, "hand_size = \"six\"").expect("write config");
        let err = load_config(Some(&path)).expect_err("type mismatch");
        assert!(err.to_string().contains("broken.toml"));
    }
}
