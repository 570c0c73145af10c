//! JSON persistence for `ProgressionRecord`. Writes go to a sibling `*.json.tmp` and are renamed
//! into place, so a failed save leaves the previous file untouched.

use std::fs;
use std::io;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::progression::ProgressionRecord;

pub const FORMAT_VERSION: u32 = 1;

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
struct ProgressionFile {
    format_version: u32,
    #[serde(default)]
    record: ProgressionRecord,
}

pub fn save_atomic(record: &ProgressionRecord, path: &Path) -> io::Result<()> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }

    let file = ProgressionFile { format_version: FORMAT_VERSION, record: record.clone() };
    let tmp_path = path.with_extension("json.tmp");
    let json = serde_json::to_string_pretty(&file).map_err(io::Error::other)?;

    fs::write(&tmp_path, json)?;
    fs::rename(&tmp_path, path)?;

    Ok(())
}

pub fn load(path: &Path) -> io::Result<ProgressionRecord> {
    let content = fs::read_to_string(path)?;
    let file: ProgressionFile = serde_json::from_str(&content)
        .map_err(|e| io::Error::new(io::ErrorKind::InvalidData, e))?;
    if file.format_version > FORMAT_VERSION {
        return Err(io::Error::new(
            io::ErrorKind::InvalidData,
            format!("unsupported progression format version {}", file.format_version),
        ));
    }
    Ok(file.record)
}

/// Missing or unreadable saves fall back to a fresh record.
pub fn load_or_default(path: &Path) -> ProgressionRecord {
    load(path).unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    fn sample() -> ProgressionRecord {
        ProgressionRecord {
            max_hp_level: 2,
            starting_energy_level: 1,
            card_draw_level: 0,
            upgrade_points: 17,
            total_wins: 3,
            highest_floor: 8,
            total_games: 9,
        }
    }

    #[test]
    fn atomic_write_and_load() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("nested").join("progression.json");

        save_atomic(&sample(), &path).unwrap();
        assert!(path.exists());
        assert_eq!(load(&path).unwrap(), sample());

        let tmp_path = path.with_extension("json.tmp");
        assert!(!tmp_path.exists());
    }

    #[test]
    fn missing_file_falls_back_to_default() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("absent.json");
        assert!(load(&path).is_err());
        assert_eq!(load_or_default(&path), ProgressionRecord::default());
    }

    #[test]
    fn corrupt_file_falls_back_to_default() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("progression.json");
        fs::write(&path, "{ not json").unwrap();
        let err = load(&path).unwrap_err();
        assert_eq!(err.kind(), io::ErrorKind::InvalidData);
        assert_eq!(load_or_default(&path), ProgressionRecord::default());
    }

    #[test]
    fn newer_format_version_is_rejected() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("progression.json");
        fs::write(&path, r#"{"format_version": 99, "record": {}}"#).unwrap();
        assert!(load(&path).is_err());
    }

    #[test]
    fn overwrite_replaces_previous_record() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("progression.json");
        save_atomic(&ProgressionRecord::default(), &path).unwrap();
        save_atomic(&sample(), &path).unwrap();
        assert_eq!(load(&path).unwrap(), sample());
    }
}
