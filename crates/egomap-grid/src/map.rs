//! The ego-centric dynamic map.

use egomap_core::{CellValue, PixelCoord};

use crate::drift::DriftAccumulator;
use crate::error::GridError;
use crate::extent::GridExtent;
use crate::snapshot::MapSnapshot;
use crate::store::ToroidalGrid;

/// Bounded occupancy grid re-centred on the robot every tick.
///
/// Three pieces of state:
///
/// - the toroidal cell store, allocated once;
/// - `center_index`, the *storage* pixel currently under the robot, always
///   in `[0, E]` on both axes;
/// - the drift accumulator holding the sub-pixel remainder.
///
/// The robot's *logical* position is always `(E / 2, E / 2)`; the mapping
/// from logical to storage coordinates is `wrap(center_index - E / 2 + l)`.
///
/// # Examples
///
/// ```
/// use egomap_core::{CellValue, PixelCoord, PixelShift};
/// use egomap_grid::{translate, DynamicMap, GridExtent};
///
/// let mut map = DynamicMap::new(GridExtent::new(100).unwrap(), 10.0).unwrap();
/// assert_eq!(map.center_index(), PixelCoord::new(50, 50));
///
/// translate(&mut map, PixelShift::new(1, 0)).unwrap();
/// assert_eq!(map.center_index(), PixelCoord::new(51, 50));
///
/// map.reset();
/// assert_eq!(map.center_index(), PixelCoord::new(50, 50));
/// assert_eq!(map.grid().count(CellValue::NEUTRAL), 101 * 101);
/// ```
#[derive(Clone, Debug)]
pub struct DynamicMap {
    grid: ToroidalGrid,
    center_index: PixelCoord,
    drift: DriftAccumulator,
}

impl DynamicMap {
    /// Allocate a reset map of the given extent and resolution.
    ///
    /// Returns `Err(GridError::InvalidStep)` unless `grid_step_mm` is finite
    /// and positive. Nothing is allocated in that case.
    pub fn new(extent: GridExtent, grid_step_mm: f32) -> Result<Self, GridError> {
        let drift = DriftAccumulator::new(grid_step_mm)?;
        Ok(Self {
            grid: ToroidalGrid::new(extent),
            center_index: extent.logical_center(),
            drift,
        })
    }

    /// Zero every cell, re-centre, and forget drift.
    ///
    /// Reuses the existing buffer.
    pub fn reset(&mut self) {
        self.grid.fill(CellValue::NEUTRAL);
        self.center_index = self.grid.extent().logical_center();
        self.drift.clear();
    }

    /// Map dimensions.
    pub fn extent(&self) -> GridExtent {
        self.grid.extent()
    }

    /// Storage pixel currently under the robot.
    pub fn center_index(&self) -> PixelCoord {
        self.center_index
    }

    /// Largest per-axis shift [`translate`](crate::translate) accepts: `E / 2`.
    pub fn max_shift(&self) -> i32 {
        self.extent().half()
    }

    /// Storage coordinate of logical pixel `(0, 0)`. May lie in `[-E/2, E/2]`.
    pub fn base(&self) -> PixelCoord {
        let half = self.extent().half();
        PixelCoord::new(self.center_index.x - half, self.center_index.y - half)
    }

    /// Storage coordinate of a logical pixel in `[0, E]^2`.
    pub fn storage_of(&self, logical: PixelCoord) -> PixelCoord {
        let base = self.base();
        self.extent()
            .wrap_coord(PixelCoord::new(base.x + logical.x, base.y + logical.y))
    }

    /// Read-only access to the cell store.
    pub fn grid(&self) -> &ToroidalGrid {
        &self.grid
    }

    /// Read-only access to the drift accumulator.
    pub fn drift(&self) -> &DriftAccumulator {
        &self.drift
    }

    /// Borrowed read-only view for downstream consumers.
    pub fn snapshot(&self) -> MapSnapshot<'_> {
        MapSnapshot::new(
            self.grid.as_slice(),
            self.extent(),
            self.center_index,
            self.drift.leftover_mm(),
        )
    }

    pub(crate) fn grid_mut(&mut self) -> &mut ToroidalGrid {
        &mut self.grid
    }

    pub(crate) fn set_center_index(&mut self, center: PixelCoord) {
        debug_assert!(
            self.extent().in_bounds(center.x) && self.extent().in_bounds(center.y),
            "center_index {center} left [0, E]"
        );
        self.center_index = center;
    }

    pub(crate) fn drift_mut(&mut self) -> &mut DriftAccumulator {
        &mut self.drift
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use egomap_core::Displacement;

    fn map(edge: u32) -> DynamicMap {
        DynamicMap::new(GridExtent::new(edge).unwrap(), 10.0).unwrap()
    }

    #[test]
    fn new_map_is_reset() {
        let m = map(100);
        assert_eq!(m.center_index(), PixelCoord::new(50, 50));
        assert_eq!(m.base(), PixelCoord::new(0, 0));
        assert_eq!(m.drift().leftover_mm(), (0.0, 0.0));
        assert_eq!(m.grid().count(CellValue::NEUTRAL), 101 * 101);
    }

    #[test]
    fn reset_restores_center_cells_and_drift() {
        let mut m = map(20);
        m.grid_mut().set(3, 4, CellValue::VISITED);
        m.set_center_index(PixelCoord::new(2, 19));
        let step = m.drift().plan(Displacement::new(4.0, -7.0));
        m.drift_mut().commit(&step);

        m.reset();

        assert_eq!(m.center_index(), PixelCoord::new(10, 10));
        assert_eq!(m.drift().leftover_mm(), (0.0, 0.0));
        assert_eq!(m.grid().count(CellValue::NEUTRAL), 21 * 21);
    }

    #[test]
    fn logical_center_maps_to_center_index() {
        let mut m = map(20);
        m.set_center_index(PixelCoord::new(3, 18));
        assert_eq!(m.storage_of(PixelCoord::new(10, 10)), PixelCoord::new(3, 18));
        // Logical (0, 0) sits E/2 up-left of the robot, wrapped.
        assert_eq!(m.storage_of(PixelCoord::new(0, 0)), PixelCoord::new(14, 8));
    }

    #[test]
    fn non_positive_step_is_an_error() {
        let ext = GridExtent::new(10).unwrap();
        for step_mm in [0.0, -1.0, f32::NAN] {
            match DynamicMap::new(ext, step_mm) {
                Err(GridError::InvalidStep { .. }) => {}
                other => panic!("expected InvalidStep for {step_mm}, got {other:?}"),
            }
        }
    }

    #[test]
    fn max_shift_is_half_edge() {
        assert_eq!(map(100).max_shift(), 50);
        assert_eq!(map(4).max_shift(), 2);
    }
}
