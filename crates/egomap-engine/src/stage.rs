//! Downstream consumers of the map.
//!
//! Obstacle detection, path planning and motion planning run after the map
//! update as [`Stage`]s. They receive a read-only [`StageContext`] and
//! cannot write the map.

use egomap_core::{Displacement, PixelShift, StageError, TickId};
use egomap_grid::MapSnapshot;

/// Everything a stage may read for one tick.
#[derive(Clone, Copy, Debug)]
pub struct StageContext<'a> {
    /// The map after this tick's translation and footprint update.
    pub snapshot: MapSnapshot<'a>,
    /// The tick being executed.
    pub tick: TickId,
    /// Whole-pixel shift applied this tick.
    pub shift: PixelShift,
    /// Displacement reported by localization this tick.
    pub displacement: Displacement,
}

/// A unit of downstream work run once per tick, in registration order.
///
/// # Examples
///
/// ```
/// use egomap_core::{CellClass, StageError};
/// use egomap_engine::{Stage, StageContext};
///
/// struct VisitedCounter(usize);
///
/// impl Stage for VisitedCounter {
///     fn name(&self) -> &str { "visited_counter" }
///
///     fn run(&mut self, ctx: &StageContext<'_>) -> Result<(), StageError> {
///         self.0 = ctx.snapshot.count_class(CellClass::Visited);
///         Ok(())
///     }
/// }
/// ```
pub trait Stage: Send + 'static {
    /// Unique name within one engine.
    fn name(&self) -> &str;

    /// Process the updated map.
    fn run(&mut self, ctx: &StageContext<'_>) -> Result<(), StageError>;
}
