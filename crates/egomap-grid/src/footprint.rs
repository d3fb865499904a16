//! Marking the robot's swept footprint as visited.
//!
//! The robot disc is approximated by a padded square: row `j` of a
//! `(D + 1) x (D + 1)` box skips `pad[j]` columns on each side. That gives
//! an octagon-like outline with a fixed, branch-free cost per tick instead of
//! a per-cell distance test.
//!
//! The padding is derived from the diameter rather than hand-tuned:
//! with `r = D / 2` and `dy = j - r`,
//!
//! ```text
//! pad[j] = r - isqrt(r^2 + 1 - dy^2)
//! ```
//!
//! The `+ 1` rounds the outline slightly outward, so the four rows touching
//! the bounding box keep a short segment instead of a single pixel. For
//! `D = 10` this gives `{4, 2, 1, 1, 0, 0, 0, 1, 1, 2, 4}`.

use egomap_core::CellValue;
use smallvec::SmallVec;

use crate::error::GridError;
use crate::extent::GridExtent;
use crate::map::DynamicMap;

/// Precomputed footprint mask for a robot of a given pixel diameter.
///
/// # Examples
///
/// ```
/// use egomap_grid::FootprintMask;
///
/// let mask = FootprintMask::for_diameter(10).unwrap();
/// assert_eq!(mask.padding(), &[4, 2, 1, 1, 0, 0, 0, 1, 1, 2, 4]);
/// assert!(FootprintMask::for_diameter(9).is_err());
/// ```
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct FootprintMask {
    diameter: u32,
    padding: SmallVec<[u32; 16]>,
}

impl FootprintMask {
    /// Derive the mask for an even diameter `D` (in pixels).
    ///
    /// Returns `Err(GridError::OddFootprint)` for odd `D`: the mask spans
    /// `D + 1` rows and columns and is only symmetric around its centre
    /// pixel when `D` is even.
    pub fn for_diameter(diameter: u32) -> Result<Self, GridError> {
        if diameter % 2 != 0 {
            return Err(GridError::OddFootprint { diameter });
        }
        let r = i64::from(diameter / 2);
        let padding = (0..=i64::from(diameter))
            .map(|j| {
                let dy = j - r;
                let reach_sq = (r * r + 1 - dy * dy).max(0) as u64;
                let half_width = (reach_sq.isqrt() as i64).min(r);
                (r - half_width) as u32
            })
            .collect();
        Ok(Self { diameter, padding })
    }

    /// Check that this mask fits inside a map window.
    pub fn check_fits(&self, extent: GridExtent) -> Result<(), GridError> {
        if self.diameter as i64 > i64::from(extent.edge()) {
            return Err(GridError::FootprintTooLarge {
                diameter: self.diameter,
                edge: extent.edge(),
            });
        }
        Ok(())
    }

    /// Diameter `D` in pixels.
    pub fn diameter(&self) -> u32 {
        self.diameter
    }

    /// `D / 2`.
    pub fn radius(&self) -> i32 {
        (self.diameter / 2) as i32
    }

    /// Columns skipped on each side, one entry per row `0..=D`.
    pub fn padding(&self) -> &[u32] {
        &self.padding
    }

    /// Number of cells the mask covers.
    pub fn cell_count(&self) -> usize {
        let width = self.diameter as usize + 1;
        self.padding
            .iter()
            .map(|&p| width - 2 * p as usize)
            .sum()
    }

    /// Offsets `(dx, dy)` of every covered cell, relative to the centre.
    pub fn offsets(&self) -> impl Iterator<Item = (i32, i32)> + '_ {
        let r = self.radius();
        let d = self.diameter as i32;
        self.padding.iter().enumerate().flat_map(move |(j, &pad)| {
            let pad = pad as i32;
            (pad..=d - pad).map(move |i| (i - r, j as i32 - r))
        })
    }

    /// Overwrite every covered cell around `center_index` with
    /// [`CellValue::VISITED`]. Returns the number of cells written.
    ///
    /// Existing values are replaced, not merged: a cell the robot sits on is
    /// traversable by definition.
    ///
    /// Returns `Err(GridError::FootprintTooLarge)` without writing anything
    /// when the mask is wider than the map window.
    pub fn apply(&self, map: &mut DynamicMap) -> Result<usize, GridError> {
        self.check_fits(map.extent())?;
        let center = map.center_index();
        let r = self.radius();
        let (ox, oy) = (center.x - r, center.y - r);
        let d = self.diameter as i32;
        let grid = map.grid_mut();
        let mut written = 0;
        for (j, &pad) in self.padding.iter().enumerate() {
            let y = oy + j as i32;
            let pad = pad as i32;
            for i in pad..=d - pad {
                grid.set(ox + i, y, CellValue::VISITED);
                written += 1;
            }
        }
        Ok(written)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use egomap_core::{PixelCoord, PixelShift};
    use std::collections::HashSet;

    fn map(edge: u32) -> DynamicMap {
        DynamicMap::new(GridExtent::new(edge).unwrap(), 10.0).unwrap()
    }

    fn visited_offsets(m: &DynamicMap) -> HashSet<(i32, i32)> {
        let ext = m.extent();
        let c = m.center_index();
        let side = ext.side();
        let mut out = HashSet::new();
        for y in 0..side {
            for x in 0..side {
                if m.grid().get(x, y) == CellValue::VISITED {
                    // Smallest signed distance on the torus.
                    let dx = (x - c.x + side + side / 2) % side - side / 2;
                    let dy = (y - c.y + side + side / 2) % side - side / 2;
                    out.insert((dx, dy));
                }
            }
        }
        out
    }

    #[test]
    fn derived_table_matches_reference_robot() {
        let mask = FootprintMask::for_diameter(10).unwrap();
        assert_eq!(mask.padding(), &[4, 2, 1, 1, 0, 0, 0, 1, 1, 2, 4]);
        assert_eq!(mask.cell_count(), 3 + 7 + 9 + 9 + 11 + 11 + 11 + 9 + 9 + 7 + 3);
    }

    #[test]
    fn tiny_masks() {
        let point = FootprintMask::for_diameter(0).unwrap();
        assert_eq!(point.padding(), &[0]);
        assert_eq!(point.cell_count(), 1);

        let small = FootprintMask::for_diameter(2).unwrap();
        assert_eq!(small.padding(), &[0, 0, 0]);
        assert_eq!(small.cell_count(), 9);
    }

    #[test]
    fn padding_is_palindromic_for_many_diameters() {
        for d in (0..=64).step_by(2) {
            let mask = FootprintMask::for_diameter(d).unwrap();
            let pad = mask.padding();
            assert_eq!(pad.len(), d as usize + 1);
            let reversed: Vec<u32> = pad.iter().rev().copied().collect();
            assert_eq!(pad, &reversed[..], "asymmetric padding for D={d}");
            assert_eq!(pad[d as usize / 2], 0, "middle row must be full for D={d}");
            assert!(pad.iter().all(|&p| p <= d / 2));
        }
    }

    #[test]
    fn odd_diameter_rejected() {
        assert_eq!(
            FootprintMask::for_diameter(11),
            Err(GridError::OddFootprint { diameter: 11 })
        );
    }

    #[test]
    fn too_large_for_map() {
        let ext = GridExtent::new(10).unwrap();
        assert!(FootprintMask::for_diameter(10).unwrap().check_fits(ext).is_ok());
        assert!(matches!(
            FootprintMask::for_diameter(12).unwrap().check_fits(ext),
            Err(GridError::FootprintTooLarge { diameter: 12, edge: 10 })
        ));
    }

    #[test]
    fn apply_marks_exactly_the_mask() {
        let mut m = map(100);
        let mask = FootprintMask::for_diameter(10).unwrap();
        let written = mask.apply(&mut m).unwrap();
        assert_eq!(written, mask.cell_count());
        assert_eq!(m.grid().count(CellValue::VISITED), mask.cell_count());
        let expected: HashSet<(i32, i32)> = mask.offsets().collect();
        assert_eq!(visited_offsets(&m), expected);
    }

    #[test]
    fn cleared_set_is_symmetric_about_both_axes() {
        let mut m = map(40);
        let mask = FootprintMask::for_diameter(14).unwrap();
        mask.apply(&mut m).unwrap();
        let set = visited_offsets(&m);
        for &(dx, dy) in &set {
            assert!(set.contains(&(-dx, dy)), "not mirrored in x: {dx},{dy}");
            assert!(set.contains(&(dx, -dy)), "not mirrored in y: {dx},{dy}");
        }
    }

    #[test]
    fn apply_wraps_around_the_buffer_edge() {
        let mut m = map(20);
        // Drive the centre to the storage corner.
        for _ in 0..2 {
            crate::translate(&mut m, PixelShift::new(5, 5)).unwrap();
        }
        assert_eq!(m.center_index(), PixelCoord::new(20, 20));
        let mask = FootprintMask::for_diameter(6).unwrap();
        mask.apply(&mut m).unwrap();
        assert_eq!(m.grid().count(CellValue::VISITED), mask.cell_count());
        assert_eq!(m.grid().get(0, 0), CellValue::VISITED);
        assert_eq!(m.grid().get(20, 20), CellValue::VISITED);
        let expected: HashSet<(i32, i32)> = mask.offsets().collect();
        assert_eq!(visited_offsets(&m), expected);
    }

    #[test]
    fn apply_overwrites_existing_values() {
        let mut m = map(20);
        let c = m.center_index();
        let wall = CellValue::occupancy(90).unwrap();
        m.grid_mut().set(c.x, c.y, wall);
        FootprintMask::for_diameter(4).unwrap().apply(&mut m).unwrap();
        assert_eq!(m.grid().get(c.x, c.y), CellValue::VISITED);
    }

    #[test]
    fn apply_rejects_mask_wider_than_map() {
        let mut m = map(4);
        let mask = FootprintMask::for_diameter(20).unwrap();
        match mask.apply(&mut m) {
            Err(GridError::FootprintTooLarge { diameter: 20, edge: 4 }) => {}
            other => panic!("expected FootprintTooLarge, got {other:?}"),
        }
        assert_eq!(m.grid().count(CellValue::NEUTRAL), m.extent().cell_count());

        // A mask exactly as wide as the window still fits.
        assert_eq!(FootprintMask::for_diameter(4).unwrap().apply(&mut m).unwrap(), 21);
    }
}
