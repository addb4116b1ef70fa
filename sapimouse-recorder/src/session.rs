//! Session configuration and lifecycle.

use crate::collector::{CounterCallback, MotionCollector, StatusCallback};
use crate::error::RecorderError;
use crate::sink::CsvBlockSink;
use sapimouse_core::SessionLabel;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::Duration;

/// Output directory, created under the configured root if absent.
pub const OUTPUT_FOLDER: &str = "mousedatacollection";

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SessionConfig {
    pub username: String,
    pub label: SessionLabel,
    pub duration_min: u64,
}

impl SessionConfig {
    /// Rejects invalid configuration before any session state is created.
    pub fn validate(&self) -> Result<(), RecorderError> {
        if self.username.trim().is_empty() {
            return Err(RecorderError::EmptyUsername);
        }
        if self.duration_min == 0 {
            return Err(RecorderError::InvalidDuration(self.duration_min));
        }
        Ok(())
    }

    pub fn duration(&self) -> Duration {
        Duration::from_secs(self.duration_min * 60)
    }
}

/// One collection run: a started collector bound to its duration-keyed
/// destination.
pub struct RecordingSession {
    collector: Arc<MotionCollector>,
    config: SessionConfig,
    output_path: PathBuf,
}

impl RecordingSession {
    /// Validates the configuration, prepares the destination and starts
    /// collecting with `initial` as the reference position. Destination
    /// failures are fatal here; nothing is half-started.
    pub fn begin(
        config: SessionConfig,
        output_root: &Path,
        status: StatusCallback,
        counter: CounterCallback,
        initial: (i32, i32),
    ) -> Result<Self, RecorderError> {
        config.validate()?;

        let sink = CsvBlockSink::create(&output_root.join(OUTPUT_FOLDER), config.duration_min)?;
        let output_path = sink.path().to_path_buf();

        let collector = Arc::new(MotionCollector::new(
            config.username.clone(),
            config.label,
            Box::new(sink),
            status,
            counter,
        ));
        collector.start(initial);

        Ok(Self {
            collector,
            config,
            output_path,
        })
    }

    pub fn collector(&self) -> Arc<MotionCollector> {
        Arc::clone(&self.collector)
    }

    pub fn stop(&self) {
        self.collector.stop();
    }

    pub fn is_active(&self) -> bool {
        self.collector.is_active()
    }

    pub fn block_count(&self) -> u64 {
        self.collector.block_count()
    }

    pub fn config(&self) -> &SessionConfig {
        &self.config
    }

    pub fn output_path(&self) -> &Path {
        &self.output_path
    }
}
