use std::error::Error;
use std::fmt;

use crate::config::RunConfig;
use crate::journal::InputJournal;
use crate::progression::ProgressionRecord;
use crate::run::RunState;
use crate::types::{GameError, RunOutcome};

/// A recorded command the rebuilt run refused.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ReplayError {
    pub seq: u64,
    pub error: GameError,
}

impl fmt::Display for ReplayError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "replay diverged at command {}: {}", self.seq, self.error)
    }
}

impl Error for ReplayError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        Some(&self.error)
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ReplayResult {
    /// `None` when the journal stops before the run ends.
    pub outcome: Option<RunOutcome>,
    pub final_snapshot_hash: u64,
    pub commands: u64,
}

/// Rebuilds the run from its seed and feeds every recorded command back through `apply`.
pub fn replay_to_end(
    journal: &InputJournal,
    progression: &ProgressionRecord,
    config: &RunConfig,
) -> Result<ReplayResult, ReplayError> {
    let run = rebuild(journal, progression, config)?;
    Ok(ReplayResult {
        outcome: run.outcome(),
        final_snapshot_hash: run.snapshot_hash(),
        commands: run.commands_applied(),
    })
}

/// Same as `replay_to_end` but hands back the rebuilt run.
pub fn rebuild(
    journal: &InputJournal,
    progression: &ProgressionRecord,
    config: &RunConfig,
) -> Result<RunState, ReplayError> {
    let mut run = RunState::new(journal.seed, progression, config);
    for record in &journal.commands {
        run.apply(record.command.clone())
            .map_err(|error| ReplayError { seq: record.seq, error })?;
    }
    Ok(run)
}

#[cfg(test)]
mod tests;
