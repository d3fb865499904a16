//! Per-tick performance metrics for the mapping engine.
//!
//! [`StepMetrics`] captures timing and work counts for a single tick, plus
//! cumulative fault counters carried across ticks. It is plain `Copy` data
//! so the tick path never allocates to report it; per-stage timings live
//! next to each registered stage and are read through
//! `TickEngine::stage_timings`.

use egomap_core::PixelShift;

/// Timing and work metrics collected during a single tick.
///
/// All durations are in microseconds. The engine populates these fields
/// after each successful `execute_tick()`; fault counters are cumulative
/// since construction or the last reset.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct StepMetrics {
    /// Wall-clock time for the entire tick, in microseconds.
    pub total_us: u64,
    /// Time spent waiting on the localization source, in microseconds.
    pub localization_us: u64,
    /// Time spent translating the map and marking the footprint, in microseconds.
    pub map_update_us: u64,
    /// Time spent in downstream stages, summed over all stages, in microseconds.
    pub stages_us: u64,
    /// Whole-pixel shift applied this tick.
    pub shift: PixelShift,
    /// Cells reset to neutral by the translation.
    pub cells_cleared: usize,
    /// Cells marked visited by the footprint.
    pub footprint_cells: usize,
    /// Cumulative number of map faults.
    pub fault_events: u64,
    /// Cumulative number of transitions into tick-disabled state.
    pub tick_disabled_transitions: u64,
}
