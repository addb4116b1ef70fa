//! End-of-session summary record.

use anyhow::Result;
use sapimouse_core::SessionLabel;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SessionSummary {
    pub username: String,
    pub label: SessionLabel,
    pub duration_min: u64,
    pub blocks_saved: u64,
    pub output_file: PathBuf,
}

impl SessionSummary {
    /// Writes the summary beside the block destination, one file per
    /// duration, overwritten by the most recent session.
    pub fn write_beside(&self, output_file: &Path) -> Result<PathBuf> {
        let path = output_file.with_extension("summary.json");
        let data = serde_json::to_vec_pretty(self)?;
        std::fs::write(&path, data)?;
        Ok(path)
    }
}
