//! Recorded command streams. A journal plus the progression record and config the run started
//! from is enough to rebuild the run exactly.

use std::fs;
use std::io;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::config::RunConfig;
use crate::progression::ProgressionRecord;
use crate::types::RunCommand;

pub const JOURNAL_FORMAT_VERSION: u16 = 1;

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct InputJournal {
    pub format_version: u16,
    pub seed: u64,
    /// Upgrades in effect when the run started.
    #[serde(default)]
    pub progression: ProgressionRecord,
    #[serde(default)]
    pub config: RunConfig,
    pub commands: Vec<CommandRecord>,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct CommandRecord {
    pub seq: u64,
    pub command: RunCommand,
}

impl InputJournal {
    pub fn new(seed: u64) -> Self {
        Self::for_run(seed, &ProgressionRecord::default(), &RunConfig::default())
    }

    pub fn for_run(seed: u64, progression: &ProgressionRecord, config: &RunConfig) -> Self {
        Self {
            format_version: JOURNAL_FORMAT_VERSION,
            seed,
            progression: progression.clone(),
            config: *config,
            commands: Vec::new(),
        }
    }

    /// Appends an accepted command with the next sequence number.
    pub fn record(&mut self, command: RunCommand) {
        let seq = self.commands.len() as u64;
        self.commands.push(CommandRecord { seq, command });
    }

    pub fn len(&self) -> usize {
        self.commands.len()
    }

    pub fn is_empty(&self) -> bool {
        self.commands.is_empty()
    }
}

pub fn save(journal: &InputJournal, path: &Path) -> io::Result<()> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }
    let tmp_path = path.with_extension("json.tmp");
    let json = serde_json::to_string_pretty(journal).map_err(io::Error::other)?;
    fs::write(&tmp_path, json)?;
    fs::rename(&tmp_path, path)
}

pub fn load(path: &Path) -> io::Result<InputJournal> {
    let content = fs::read_to_string(path)?;
    let journal: InputJournal = serde_json::from_str(&content)
        .map_err(|e| io::Error::new(io::ErrorKind::InvalidData, e))?;
    if journal.format_version > JOURNAL_FORMAT_VERSION {
        return Err(io::Error::new(
            io::ErrorKind::InvalidData,
            format!("unsupported journal format version {}", journal.format_version),
        ));
    }
    Ok(journal)
}
