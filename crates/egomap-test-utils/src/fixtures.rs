//! Reusable downstream stage fixtures.
//!
//! - [`RecordingStage`]: logs what it saw each tick into a shared [`StageLog`].
//! - [`FailingStage`]: fails deterministically after N calls.

use std::sync::{Arc, Mutex};

use egomap_core::{CellClass, PixelCoord, PixelShift, StageError, TickId};
use egomap_engine::{Stage, StageContext};

/// One observation made by a [`RecordingStage`].
#[derive(Clone, Debug, PartialEq)]
pub struct StageRecord {
    pub stage: String,
    pub tick: TickId,
    pub shift: PixelShift,
    pub center_index: PixelCoord,
    pub visited_cells: usize,
}

/// Shared log written by any number of recording stages.
pub type StageLog = Arc<Mutex<Vec<StageRecord>>>;

/// Appends a [`StageRecord`] for every tick it runs on.
///
/// Several recorders can share one log to check execution order.
pub struct RecordingStage {
    pub name: String,
    log: StageLog,
}

impl RecordingStage {
    pub fn new(name: impl Into<String>, log: &StageLog) -> Self {
        Self {
            name: name.into(),
            log: Arc::clone(log),
        }
    }
}

impl Stage for RecordingStage {
    fn name(&self) -> &str {
        &self.name
    }

    fn run(&mut self, ctx: &StageContext<'_>) -> Result<(), StageError> {
        let record = StageRecord {
            stage: self.name.clone(),
            tick: ctx.tick,
            shift: ctx.shift,
            center_index: ctx.snapshot.center_index(),
            visited_cells: ctx.snapshot.count_class(CellClass::Visited),
        };
        self.log
            .lock()
            .map_err(|_| StageError::ExecutionFailed {
                reason: "stage log poisoned".to_string(),
            })?
            .push(record);
        Ok(())
    }
}

/// Succeeds a configurable number of times, then fails every call.
pub struct FailingStage {
    pub name: String,
    pub succeed_count: usize,
    call_count: usize,
}

impl FailingStage {
    /// Create a stage that succeeds `succeed_count` times then fails.
    pub fn new(name: impl Into<String>, succeed_count: usize) -> Self {
        Self {
            name: name.into(),
            succeed_count,
            call_count: 0,
        }
    }
}

impl Stage for FailingStage {
    fn name(&self) -> &str {
        &self.name
    }

    fn run(&mut self, _ctx: &StageContext<'_>) -> Result<(), StageError> {
        let n = self.call_count;
        self.call_count += 1;
        if n >= self.succeed_count {
            return Err(StageError::ExecutionFailed {
                reason: format!(
                    "deliberate failure after {} successful calls",
                    self.succeed_count
                ),
            });
        }
        Ok(())
    }
}
