// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Glassdome Contributors

//! Mission Store (spec.md §4.8): one JSON file per mission under a
//! configured directory. `original_source/glassdome/reaper/mission_store.py`
//! keeps missions purely in an in-memory dict; SPEC_FULL.md §10.3 calls for
//! durable persistence instead, so this crate writes each mission document
//! to disk via write-to-temp-then-rename — the same crash-safety idiom the
//! teacher's own snapshot module (`storage/snapshot.rs`) relies on `fs::rename`
//! for. The directory path itself is supplied by the caller; default
//! resolution lives in `glassdome-overseer`'s config, not here.

use crate::error::ReaperError;
use glassdome_core::MissionState;
use std::path::{Path, PathBuf};

pub struct MissionStore {
    dir: PathBuf,
}

impl MissionStore {
    pub fn new(dir: impl Into<PathBuf>) -> Result<Self, ReaperError> {
        let dir = dir.into();
        std::fs::create_dir_all(&dir)?;
        Ok(Self { dir })
    }

    fn path_for(&self, mission_id: &str) -> PathBuf {
        self.dir.join(format!("{mission_id}.json"))
    }

    pub fn load(&self, mission_id: &str) -> Result<Option<MissionState>, ReaperError> {
        let path = self.path_for(mission_id);
        if !path.exists() {
            return Ok(None);
        }
        let bytes = std::fs::read(&path)?;
        Ok(Some(serde_json::from_slice(&bytes)?))
    }

    pub fn save(&self, mission: &MissionState) -> Result<(), ReaperError> {
        let path = self.path_for(&mission.mission_id);
        let tmp = path.with_extension("json.tmp");
        std::fs::write(&tmp, serde_json::to_vec_pretty(mission)?)?;
        std::fs::rename(&tmp, &path)?;
        Ok(())
    }

    pub fn delete(&self, mission_id: &str) -> Result<bool, ReaperError> {
        let path = self.path_for(mission_id);
        if !path.exists() {
            return Ok(false);
        }
        std::fs::remove_file(&path)?;
        Ok(true)
    }

    pub fn list_missions(&self) -> Result<Vec<String>, ReaperError> {
        list_mission_ids(&self.dir)
    }
}

fn list_mission_ids(dir: &Path) -> Result<Vec<String>, ReaperError> {
    let mut ids = Vec::new();
    for entry in std::fs::read_dir(dir)? {
        let entry = entry?;
        let path = entry.path();
        if path.extension().and_then(|e| e.to_str()) == Some("json") {
            if let Some(stem) = path.file_stem().and_then(|s| s.to_str()) {
                ids.push(stem.to_string());
            }
        }
    }
    ids.sort();
    Ok(ids)
}

#[cfg(test)]
#[path = "mission_store_tests.rs"]
mod tests;
