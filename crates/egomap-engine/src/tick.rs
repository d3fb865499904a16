//! Tick engine: the fixed-period mapping loop.
//!
//! [`TickEngine`] owns the dynamic map, pulls one displacement from the
//! localization source per tick, re-centres the map, marks the robot
//! footprint, and hands a read-only view to downstream stages.
//!
//! # Fault handling
//!
//! Localization failures, non-finite displacements and shifts beyond the
//! single-wrap bound are map faults: the tick is skipped and the map and
//! drift state are left exactly as they were. After
//! `max_consecutive_faults` map faults in a row the engine refuses to tick
//! until [`reset()`](TickEngine::reset). A stage failure is reported after
//! the map has been updated and does not count as a map fault.

use std::fmt;
use std::time::Instant;

use egomap_core::{LocalizationSource, PixelShift, StepError, TickId};
use egomap_grid::{advance, DynamicMap, GridError, MapSnapshot};
use indexmap::IndexMap;
use tracing::{debug, info, warn};

use crate::config::{ConfigError, MapConfig, MapGeometry};
use crate::metrics::StepMetrics;
use crate::stage::{Stage, StageContext};

// Compile-time assertion: TickEngine can be moved onto a dedicated thread.
const _: () = {
    #[allow(dead_code)]
    fn assert_send<T: Send>() {}
    #[allow(dead_code)]
    fn check() {
        assert_send::<TickEngine>();
    }
};

// ── TickResult ───────────────────────────────────────────────────

/// Result of a successful tick execution.
#[derive(Clone, Debug, PartialEq)]
pub struct TickResult {
    /// The tick that was executed.
    pub tick: TickId,
    /// Whole-pixel shift applied to the map.
    pub shift: PixelShift,
    /// Performance metrics for this tick.
    pub metrics: StepMetrics,
}

// ── TickError ───────────────────────────────────────────────────

/// Error returned from [`TickEngine::execute_tick()`].
#[derive(Clone, Debug, PartialEq)]
pub struct TickError {
    /// The underlying error.
    pub kind: StepError,
    /// The tick that failed. For map faults the tick counter did not
    /// advance; for stage failures it did.
    pub tick: TickId,
}

impl fmt::Display for TickError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "tick {}: {}", self.tick, self.kind)
    }
}

impl std::error::Error for TickError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        Some(&self.kind)
    }
}

// ── StageSlot ───────────────────────────────────────────────────

/// A registered stage and the time it took on the last tick.
struct StageSlot {
    stage: Box<dyn Stage>,
    last_us: u64,
}

// ── TickEngine ───────────────────────────────────────────────────

/// Single-threaded tick engine.
///
/// Owns the map exclusively. Readers borrow it through
/// [`snapshot()`](Self::snapshot), so no tick can run while a snapshot is
/// alive. Every buffer is sized at construction or stage registration;
/// a successful tick performs no heap allocation.
pub struct TickEngine {
    geometry: MapGeometry,
    map: DynamicMap,
    source: Box<dyn LocalizationSource>,
    stages: IndexMap<String, StageSlot>,
    current_tick: TickId,
    consecutive_faults: u32,
    max_consecutive_faults: u32,
    tick_disabled: bool,
    fault_events: u64,
    tick_disabled_transitions: u64,
    last_metrics: StepMetrics,
}

impl TickEngine {
    /// Construct an engine from a [`MapConfig`].
    ///
    /// Validates the configuration, allocates the map once, and leaves it
    /// reset with the robot at the centre.
    pub fn new(config: MapConfig, source: Box<dyn LocalizationSource>) -> Result<Self, ConfigError> {
        let geometry = config.geometry()?;
        let map = DynamicMap::new(geometry.extent, geometry.grid_step_mm)?;

        info!(
            edge_px = geometry.extent.edge(),
            cells = geometry.extent.cell_count(),
            grid_step_mm = geometry.grid_step_mm,
            footprint_px = geometry.footprint.diameter(),
            tick_period_ms = geometry.tick_period.as_millis() as u64,
            source = source.name(),
            "dynamic map allocated"
        );

        Ok(Self {
            geometry,
            map,
            source,
            stages: IndexMap::new(),
            current_tick: TickId(0),
            consecutive_faults: 0,
            max_consecutive_faults: config.max_consecutive_faults,
            tick_disabled: false,
            fault_events: 0,
            tick_disabled_transitions: 0,
            last_metrics: StepMetrics::default(),
        })
    }

    /// Register a downstream stage. Stages run in registration order.
    pub fn add_stage(&mut self, stage: Box<dyn Stage>) -> Result<(), ConfigError> {
        let name = stage.name().to_string();
        if self.stages.contains_key(&name) {
            return Err(ConfigError::DuplicateStage { name });
        }
        debug!(stage = %name, position = self.stages.len(), "stage registered");
        self.stages.insert(name, StageSlot { stage, last_us: 0 });
        Ok(())
    }

    /// Execute one tick.
    ///
    /// Fetches the displacement, re-centres the map, marks the footprint,
    /// then runs every stage on the updated map.
    pub fn execute_tick(&mut self) -> Result<TickResult, TickError> {
        let tick_start = Instant::now();
        let next_tick = self.current_tick.next();

        // 0. Check if ticking is disabled.
        if self.tick_disabled {
            return Err(TickError {
                kind: StepError::TickDisabled,
                tick: next_tick,
            });
        }

        // 1. Localization.
        let loc_start = Instant::now();
        let displacement = match self.source.displacement() {
            Ok(d) => d,
            Err(e) => return self.handle_fault(next_tick, e.into()),
        };
        let localization_us = loc_start.elapsed().as_micros() as u64;
        if let Some(axis) = displacement.non_finite_axis() {
            let value = displacement.along(axis);
            return self.handle_fault(next_tick, StepError::NonFiniteDisplacement { axis, value });
        }

        // 2. Quantize. Pure: nothing is committed yet.
        let step = self.map.drift().plan(displacement);

        // 3. Translate and commit drift, rejecting out-of-range shifts
        //    before any cell is written.
        let map_start = Instant::now();
        let report = match advance(&mut self.map, &step) {
            Ok(report) => report,
            Err(GridError::ShiftOutOfRange { axis, shift, max }) => {
                return self.handle_fault(next_tick, StepError::ShiftOutOfRange { axis, shift, max });
            }
            Err(other) => unreachable!("translation only rejects shifts, got {other}"),
        };

        // 4. Footprint.
        let footprint_cells = match self.geometry.footprint.apply(&mut self.map) {
            Ok(cells) => cells,
            Err(other) => unreachable!("footprint is fitted when the engine is built, got {other}"),
        };
        let map_update_us = map_start.elapsed().as_micros() as u64;

        self.current_tick = next_tick;
        self.consecutive_faults = 0;
        debug!(
            tick = next_tick.0,
            dx = step.shift.dx,
            dy = step.shift.dy,
            cells_cleared = report.cells_cleared,
            "map updated"
        );

        // 5. Downstream stages.
        let ctx = StageContext {
            snapshot: self.map.snapshot(),
            tick: next_tick,
            shift: step.shift,
            displacement,
        };
        let mut stages_us = 0;
        let mut stage_failure = None;
        for (name, slot) in self.stages.iter_mut() {
            // Stages after a failure did not run this tick.
            if stage_failure.is_some() {
                slot.last_us = 0;
                continue;
            }
            let stage_start = Instant::now();
            let outcome = slot.stage.run(&ctx);
            slot.last_us = stage_start.elapsed().as_micros() as u64;
            stages_us += slot.last_us;
            if let Err(reason) = outcome {
                warn!(tick = next_tick.0, stage = %name, error = %reason, "stage failed");
                stage_failure = Some(StepError::StageFailed {
                    name: name.clone(),
                    reason,
                });
            }
        }

        // 6. Metrics. Recorded for stage failures too: the map did change.
        let metrics = StepMetrics {
            total_us: tick_start.elapsed().as_micros() as u64,
            localization_us,
            map_update_us,
            stages_us,
            shift: step.shift,
            cells_cleared: report.cells_cleared,
            footprint_cells,
            fault_events: self.fault_events,
            tick_disabled_transitions: self.tick_disabled_transitions,
        };
        self.last_metrics = metrics;

        match stage_failure {
            Some(kind) => Err(TickError {
                kind,
                tick: next_tick,
            }),
            None => Ok(TickResult {
                tick: next_tick,
                shift: step.shift,
                metrics,
            }),
        }
    }

    /// Count a map fault and latch ticking off once the limit is reached.
    fn handle_fault(&mut self, tick: TickId, kind: StepError) -> Result<TickResult, TickError> {
        self.consecutive_faults += 1;
        self.fault_events += 1;
        warn!(
            tick = tick.0,
            consecutive = self.consecutive_faults,
            error = %kind,
            "map update skipped"
        );
        if self.consecutive_faults >= self.max_consecutive_faults && !self.tick_disabled {
            self.tick_disabled = true;
            self.tick_disabled_transitions += 1;
            warn!(
                limit = self.max_consecutive_faults,
                "ticking disabled until reset"
            );
        }
        Err(TickError { kind, tick })
    }

    /// Reset the map to its initial state after relocalization.
    ///
    /// Zeroes every cell, re-centres, forgets drift, restarts the tick
    /// counter and clears the fault latch. No allocation.
    pub fn reset(&mut self) {
        self.map.reset();
        self.current_tick = TickId(0);
        self.tick_disabled = false;
        self.consecutive_faults = 0;
        self.fault_events = 0;
        self.tick_disabled_transitions = 0;
        self.last_metrics = StepMetrics::default();
        for slot in self.stages.values_mut() {
            slot.last_us = 0;
        }
        info!("dynamic map reset");
    }

    /// Read-only view of the current map.
    pub fn snapshot(&self) -> MapSnapshot<'_> {
        self.map.snapshot()
    }

    /// Last executed tick; `TickId(0)` right after construction or reset.
    pub fn current_tick(&self) -> TickId {
        self.current_tick
    }

    /// Whether ticking is disabled due to consecutive map faults.
    pub fn is_tick_disabled(&self) -> bool {
        self.tick_disabled
    }

    /// Number of consecutive map faults since the last successful update.
    pub fn consecutive_faults(&self) -> u32 {
        self.consecutive_faults
    }

    /// Metrics from the most recent tick that updated the map.
    pub fn last_metrics(&self) -> &StepMetrics {
        &self.last_metrics
    }

    /// Derived geometry this engine was built with.
    pub fn geometry(&self) -> &MapGeometry {
        &self.geometry
    }

    /// Registered stage names, in execution order.
    pub fn stage_names(&self) -> impl Iterator<Item = &str> {
        self.stages.keys().map(String::as_str)
    }

    /// Per-stage execution time of the last tick, in microseconds, in
    /// execution order. Stages skipped after a failure report zero.
    pub fn stage_timings(&self) -> impl Iterator<Item = (&str, u64)> {
        self.stages
            .iter()
            .map(|(name, slot)| (name.as_str(), slot.last_us))
    }
}

impl fmt::Debug for TickEngine {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TickEngine")
            .field("edge_px", &self.geometry.extent.edge())
            .field("source", &self.source.name())
            .field("stages", &self.stages.len())
            .field("current_tick", &self.current_tick)
            .field("tick_disabled", &self.tick_disabled)
            .finish()
    }
}
