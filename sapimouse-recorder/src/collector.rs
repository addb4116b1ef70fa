//! Live pointer-stream consumer.
//!
//! The collector may be driven from a background listener thread while the
//! UI thread reads progress, so the active flag is atomic and the pipeline
//! state lives behind a mutex. Callbacks are fire-and-forget and must not
//! touch UI-owned state directly; the application posts them onto its own
//! event loop.

use crate::block::{BlockBuffer, DisplacementTracker};
use crate::sink::BlockSink;
use parking_lot::Mutex;
use sapimouse_core::SessionLabel;
use std::sync::atomic::{AtomicBool, Ordering};
use tracing::{error, info};

pub type StatusCallback = Box<dyn Fn(&str) + Send + Sync>;
pub type CounterCallback = Box<dyn Fn(usize, u64) + Send + Sync>;

struct CollectorState {
    tracker: DisplacementTracker,
    buffer: BlockBuffer,
    block_count: u64,
    sink: Box<dyn BlockSink>,
}

pub struct MotionCollector {
    username: String,
    label: SessionLabel,
    active: AtomicBool,
    state: Mutex<CollectorState>,
    status: StatusCallback,
    counter: CounterCallback,
}

impl MotionCollector {
    pub fn new(
        username: String,
        label: SessionLabel,
        sink: Box<dyn BlockSink>,
        status: StatusCallback,
        counter: CounterCallback,
    ) -> Self {
        Self {
            username,
            label,
            active: AtomicBool::new(false),
            state: Mutex::new(CollectorState {
                tracker: DisplacementTracker::new(),
                buffer: BlockBuffer::new(),
                block_count: 0,
                sink,
            }),
            status,
            counter,
        }
    }

    /// Begins collection with `initial` as the reference point for the first
    /// displacement. Re-starting an active collector is a no-op, so the
    /// stream is never consumed twice.
    pub fn start(&self, initial: (i32, i32)) {
        if self.active.swap(true, Ordering::SeqCst) {
            return;
        }
        self.state.lock().tracker.seed(initial.0, initial.1);
        info!(username = %self.username, "collection started");
        (self.status)(&format!("Collecting data for '{}'...", self.username));
    }

    /// Handles one pointer event reduced to its position. No-op while
    /// inactive. The counter callback fires on every evaluated event,
    /// displacement or not.
    pub fn on_pointer_event(&self, x: i32, y: i32) {
        if !self.active.load(Ordering::SeqCst) {
            return;
        }
        let mut state = self.state.lock();
        if let Some((dx, dy)) = state.tracker.observe(x, y) {
            state.buffer.push(dx, dy);
            self.drain_blocks(&mut state);
        }
        (self.counter)(state.buffer.displacement_count(), state.block_count);
    }

    fn drain_blocks(&self, state: &mut CollectorState) {
        while let Some(block) = state.buffer.take_block() {
            match state.sink.append(&block, &self.username, self.label) {
                Ok(()) => {
                    state.block_count += 1;
                    info!(block = state.block_count, "block persisted");
                    (self.status)(&format!(
                        "Saved block #{} for user '{}'.",
                        state.block_count, self.username
                    ));
                }
                Err(e) => {
                    // Put the block back; the next pointer event retries.
                    error!("failed to persist block: {e}");
                    (self.status)(&format!("Error: failed to save block: {e}"));
                    state.buffer.restore_front(block);
                    break;
                }
            }
        }
    }

    /// Stops collection, discarding any partial buffer. Idempotent.
    pub fn stop(&self) {
        if !self.active.swap(false, Ordering::SeqCst) {
            return;
        }
        let mut state = self.state.lock();
        state.buffer.clear();
        let destination = state.sink.describe();
        info!(blocks = state.block_count, "collection stopped");
        (self.status)(&format!("Stopped. Data saved in '{destination}'."));
    }

    pub fn is_active(&self) -> bool {
        self.active.load(Ordering::SeqCst)
    }

    pub fn block_count(&self) -> u64 {
        self.state.lock().block_count
    }
}
