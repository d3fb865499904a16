//! Incremental re-centering of the dynamic map.
//!
//! Moving the robot by `(dx, dy)` pixels does not move any data. Instead the
//! storage centre advances by the shift, and the bands of storage that just
//! scrolled into view (and still hold history from the far side of the
//! torus) are reset to neutral.
//!
//! With `base = center_index - E / 2` (storage of logical `(0, 0)`):
//!
//! - `dx > 0` exposes storage columns `[base_x, base_x + dx)`;
//! - `dx < 0` exposes storage columns `[base_x + dx, base_x)`.
//!
//! Rows are handled the same way for `dy`. Columns span every row and rows
//! span every column, so diagonal motion clears the corner twice; both
//! writes are neutral.

use egomap_core::{Axis, CellValue, PixelShift};

use crate::drift::DriftStep;
use crate::error::GridError;
use crate::map::DynamicMap;

/// What a translation wrote.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct TranslateReport {
    /// Storage columns reset to neutral.
    pub cleared_columns: u32,
    /// Storage rows reset to neutral.
    pub cleared_rows: u32,
    /// Cell writes performed (corner cells of diagonal moves count twice).
    pub cells_cleared: usize,
}

/// Check a shift against the single-wrap bound `|d| <= E / 2` on both axes.
pub fn check_shift(map: &DynamicMap, shift: PixelShift) -> Result<(), GridError> {
    let max = map.max_shift();
    for axis in Axis::BOTH {
        let d = shift.along(axis);
        if d.unsigned_abs() > max.unsigned_abs() {
            return Err(GridError::ShiftOutOfRange {
                axis,
                shift: d,
                max,
            });
        }
    }
    Ok(())
}

/// Re-centre `map` by `shift`, clearing every newly exposed cell.
///
/// Returns `Err(GridError::ShiftOutOfRange)` without touching the map when
/// either component exceeds [`DynamicMap::max_shift`]. A zero shift is a
/// no-op.
pub fn translate(map: &mut DynamicMap, shift: PixelShift) -> Result<TranslateReport, GridError> {
    check_shift(map, shift)?;

    let base = map.base();
    let mut report = TranslateReport::default();

    if shift.dx != 0 {
        let (start, end) = exposed_band(base.x, shift.dx);
        let grid = map.grid_mut();
        for x in start..end {
            report.cells_cleared += grid.fill_column(x, CellValue::NEUTRAL);
        }
        report.cleared_columns = shift.dx.unsigned_abs();
    }

    if shift.dy != 0 {
        let (start, end) = exposed_band(base.y, shift.dy);
        let grid = map.grid_mut();
        for y in start..end {
            report.cells_cleared += grid.fill_row(y, CellValue::NEUTRAL);
        }
        report.cleared_rows = shift.dy.unsigned_abs();
    }

    let extent = map.extent();
    let moved = map.center_index() + shift;
    map.set_center_index(extent.wrap_coord(moved));

    Ok(report)
}

/// Translate by a planned drift step and commit its leftover.
///
/// The drift state only advances when the translation is accepted.
pub fn advance(map: &mut DynamicMap, step: &DriftStep) -> Result<TranslateReport, GridError> {
    let report = translate(map, step.shift)?;
    map.drift_mut().commit(step);
    Ok(report)
}

/// Half-open storage interval exposed by moving `d` pixels from `base`.
fn exposed_band(base: i32, d: i32) -> (i32, i32) {
    if d >= 0 {
        (base, base + d)
    } else {
        (base + d, base)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::extent::GridExtent;
    use egomap_core::{Displacement, PixelCoord};
    use proptest::prelude::*;

    fn map(edge: u32) -> DynamicMap {
        DynamicMap::new(GridExtent::new(edge).unwrap(), 10.0).unwrap()
    }

    /// Fill every storage cell with VISITED so clears are visible.
    fn painted(edge: u32) -> DynamicMap {
        let mut m = map(edge);
        m.grid_mut().fill(CellValue::VISITED);
        m
    }

    #[test]
    fn zero_shift_is_noop() {
        let mut m = painted(10);
        let before = m.grid().as_slice().to_vec();
        let report = translate(&mut m, PixelShift::ZERO).unwrap();
        assert_eq!(report, TranslateReport::default());
        assert_eq!(m.grid().as_slice(), &before[..]);
        assert_eq!(m.center_index(), PixelCoord::new(5, 5));
    }

    #[test]
    fn unit_shift_right_clears_exactly_one_column() {
        let mut m = painted(100);
        let report = translate(&mut m, PixelShift::new(1, 0)).unwrap();
        assert_eq!(report.cells_cleared, 101);
        assert_eq!(m.grid().count(CellValue::NEUTRAL), 101);
        // base_x was 0: storage column 0 is recycled as the new right edge.
        for y in 0..=100 {
            assert_eq!(m.grid().get(0, y), CellValue::NEUTRAL);
        }
        assert_eq!(m.center_index(), PixelCoord::new(51, 50));
    }

    #[test]
    fn unit_shift_left_clears_column_across_wrap() {
        let mut m = painted(100);
        translate(&mut m, PixelShift::new(-1, 0)).unwrap();
        assert_eq!(m.grid().count(CellValue::NEUTRAL), 101);
        // base_x was 0: the new left edge is storage column -1 == 100.
        for y in 0..=100 {
            assert_eq!(m.grid().get(100, y), CellValue::NEUTRAL);
        }
        assert_eq!(m.center_index(), PixelCoord::new(49, 50));
    }

    #[test]
    fn unit_shift_vertical_clears_one_row() {
        let mut m = painted(100);
        translate(&mut m, PixelShift::new(0, -1)).unwrap();
        assert_eq!(m.grid().count(CellValue::NEUTRAL), 101);
        for x in 0..=100 {
            assert_eq!(m.grid().get(x, 100), CellValue::NEUTRAL);
        }
    }

    #[test]
    fn diagonal_shift_clears_column_and_row() {
        let mut m = painted(10);
        let report = translate(&mut m, PixelShift::new(2, 3)).unwrap();
        assert_eq!(report.cleared_columns, 2);
        assert_eq!(report.cleared_rows, 3);
        assert_eq!(report.cells_cleared, 2 * 11 + 3 * 11);
        // 2 columns + 3 rows minus the 6 shared corner cells.
        assert_eq!(m.grid().count(CellValue::NEUTRAL), 22 + 33 - 6);
    }

    #[test]
    fn center_wraps_past_the_edge() {
        let mut m = map(10);
        for _ in 0..6 {
            translate(&mut m, PixelShift::new(1, -1)).unwrap();
        }
        // 5 + 6 = 11 -> 0 ; 5 - 6 = -1 -> 10
        assert_eq!(m.center_index(), PixelCoord::new(0, 10));
    }

    #[test]
    fn shift_beyond_half_edge_is_rejected_untouched() {
        let mut m = painted(10);
        let before = m.grid().as_slice().to_vec();
        let err = translate(&mut m, PixelShift::new(0, -6)).unwrap_err();
        assert_eq!(
            err,
            GridError::ShiftOutOfRange {
                axis: Axis::Y,
                shift: -6,
                max: 5
            }
        );
        assert_eq!(m.grid().as_slice(), &before[..]);
        assert_eq!(m.center_index(), PixelCoord::new(5, 5));
    }

    #[test]
    fn shift_at_half_edge_is_accepted() {
        let mut m = painted(10);
        translate(&mut m, PixelShift::new(-5, 5)).unwrap();
        assert_eq!(m.center_index(), PixelCoord::new(0, 10));
    }

    #[test]
    fn advance_commits_leftover_only_on_success() {
        let mut m = map(10);
        let step = m.drift().plan(Displacement::new(12.0, 0.0));
        advance(&mut m, &step).unwrap();
        assert_eq!(m.center_index(), PixelCoord::new(6, 5));
        assert!((m.drift().leftover_mm().0 - 2.0).abs() < 1e-5);

        let bad = m.drift().plan(Displacement::new(90.0, 0.0));
        assert!(advance(&mut m, &bad).is_err());
        assert!((m.drift().leftover_mm().0 - 2.0).abs() < 1e-5);
    }

    /// Reference model in unwrapped storage coordinates: the old window is
    /// `[old_base, old_base + side)` and the new one is the same interval
    /// moved by the shift. Cells of the new window that were outside the
    /// old one must be neutral; everything else must be untouched.
    fn check_coverage(edge: u32, start: PixelCoord, shift: PixelShift) {
        let mut m = map(edge);
        m.set_center_index(start);
        m.grid_mut().fill(CellValue::VISITED);
        let ext = m.extent();
        let old_base = m.base();

        translate(&mut m, shift).unwrap();
        assert_eq!(m.center_index(), ext.wrap_coord(start + shift));

        let side = ext.side();
        let old_x = old_base.x..old_base.x + side;
        let old_y = old_base.y..old_base.y + side;
        for ly in 0..side {
            for lx in 0..side {
                let wx = old_base.x + shift.dx + lx;
                let wy = old_base.y + shift.dy + ly;
                let cell = m.grid().get(wx, wy);
                if old_x.contains(&wx) && old_y.contains(&wy) {
                    assert_eq!(
                        cell,
                        CellValue::VISITED,
                        "retained cell ({lx},{ly}) cleared for start {start} shift {shift}"
                    );
                } else {
                    assert_eq!(
                        cell,
                        CellValue::NEUTRAL,
                        "exposed cell ({lx},{ly}) not cleared for start {start} shift {shift}"
                    );
                }
            }
        }
    }

    #[test]
    fn coverage_boundary_cases() {
        for shift in [
            PixelShift::new(1, 0),
            PixelShift::new(-1, 0),
            PixelShift::new(0, 1),
            PixelShift::new(0, -1),
            PixelShift::new(5, -5),
        ] {
            for start in [
                PixelCoord::new(5, 5),
                PixelCoord::new(0, 0),
                PixelCoord::new(10, 10),
                PixelCoord::new(0, 10),
            ] {
                check_coverage(10, start, shift);
            }
        }
    }

    proptest! {
        #[test]
        fn translation_coverage(
            half in 1u32..12,
            cx in 0i32..25, cy in 0i32..25,
            dx in -12i32..=12, dy in -12i32..=12,
        ) {
            let edge = half * 2;
            let e = edge as i32;
            let start = PixelCoord::new(cx % (e + 1), cy % (e + 1));
            let h = e / 2;
            let shift = PixelShift::new(dx.clamp(-h, h), dy.clamp(-h, h));
            check_coverage(edge, start, shift);
        }
    }
}
