//! Block persistence.
//!
//! One destination file per configured session duration; rows are
//! append-only so same-duration sessions accumulate across runs.

use crate::error::RecorderError;
use sapimouse_core::SessionLabel;
use std::fs::OpenOptions;
use std::path::{Path, PathBuf};

/// Destination for completed blocks.
pub trait BlockSink: Send {
    /// Appends one row: the block's magnitudes followed by username and label.
    fn append(
        &mut self,
        magnitudes: &[u32],
        username: &str,
        label: SessionLabel,
    ) -> Result<(), RecorderError>;

    /// Human-readable destination name for status notices.
    fn describe(&self) -> String;
}

/// Append-only CSV destination keyed by session duration.
pub struct CsvBlockSink {
    path: PathBuf,
}

impl CsvBlockSink {
    /// Creates the output directory if absent and verifies the destination
    /// file is openable. Failures here are fatal to session start.
    pub fn create(output_dir: &Path, duration_min: u64) -> Result<Self, RecorderError> {
        std::fs::create_dir_all(output_dir)?;
        let path = output_dir.join(format!("sapimouse_ABS_dx_dy_{duration_min}min.csv"));
        OpenOptions::new().create(true).append(true).open(&path)?;
        Ok(Self { path })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl BlockSink for CsvBlockSink {
    fn append(
        &mut self,
        magnitudes: &[u32],
        username: &str,
        label: SessionLabel,
    ) -> Result<(), RecorderError> {
        let file = OpenOptions::new().create(true).append(true).open(&self.path)?;
        let mut writer = csv::Writer::from_writer(file);

        let record = magnitudes
            .iter()
            .map(u32::to_string)
            .chain([username.to_string(), label.to_string()]);
        writer.write_record(record)?;
        // One flush per row; readers never see a partially written record.
        writer.flush()?;
        Ok(())
    }

    fn describe(&self) -> String {
        self.path.display().to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::block::BLOCK_SCALARS;

    #[test]
    fn appends_rows_with_trailing_username_and_label() {
        let dir = tempfile::tempdir().unwrap();
        let mut sink = CsvBlockSink::create(dir.path(), 3).unwrap();
        let magnitudes: Vec<u32> = (0..BLOCK_SCALARS as u32).collect();

        sink.append(&magnitudes, "user1", SessionLabel::Genuine).unwrap();
        sink.append(&magnitudes, "user1", SessionLabel::Genuine).unwrap();

        let contents = std::fs::read_to_string(sink.path()).unwrap();
        let rows: Vec<&str> = contents.lines().collect();
        assert_eq!(rows.len(), 2);
        for row in rows {
            let fields: Vec<&str> = row.split(',').collect();
            assert_eq!(fields.len(), BLOCK_SCALARS + 2);
            assert_eq!(fields[0], "0");
            assert_eq!(fields[BLOCK_SCALARS], "user1");
            assert_eq!(fields[BLOCK_SCALARS + 1], "Genuine");
        }
    }

    #[test]
    fn filename_embeds_duration() {
        let dir = tempfile::tempdir().unwrap();
        let sink = CsvBlockSink::create(dir.path(), 10).unwrap();
        assert!(
            sink.path()
                .file_name()
                .unwrap()
                .to_string_lossy()
                .contains("sapimouse_ABS_dx_dy_10min.csv")
        );
    }
}
