//! Motion recording: converts a live stream of absolute pointer positions
//! into fixed-size blocks of displacement magnitudes and appends each
//! completed block to a CSV destination tagged with username and label.

pub mod block;
pub mod collector;
pub mod error;
pub mod session;
pub mod sink;

pub use block::{BLOCK_SCALARS, BLOCK_SIZE, DIMENSIONS, BlockBuffer, DisplacementTracker};
pub use collector::{CounterCallback, MotionCollector, StatusCallback};
pub use error::RecorderError;
pub use session::{OUTPUT_FOLDER, RecordingSession, SessionConfig};
pub use sink::{BlockSink, CsvBlockSink};
