//! Fixed-size toroidal cell store.

use egomap_core::CellValue;

use crate::extent::GridExtent;

/// A square buffer of `(E + 1)^2` cells addressed through [`GridExtent::wrap`].
///
/// The buffer is allocated once in [`new`](Self::new) and never resized.
/// All coordinate-taking methods accept anything in the single-wrap domain
/// `[-E, 2E]`.
#[derive(Clone, Debug)]
pub struct ToroidalGrid {
    extent: GridExtent,
    cells: Vec<CellValue>,
}

impl ToroidalGrid {
    /// Allocate a neutral grid.
    pub fn new(extent: GridExtent) -> Self {
        Self {
            extent,
            cells: vec![CellValue::NEUTRAL; extent.cell_count()],
        }
    }

    /// Grid dimensions.
    pub fn extent(&self) -> GridExtent {
        self.extent
    }

    /// Cell at `(x, y)` after wrapping.
    #[inline]
    pub fn get(&self, x: i32, y: i32) -> CellValue {
        self.cells[self.extent.index(x, y)]
    }

    /// Overwrite the cell at `(x, y)` after wrapping.
    #[inline]
    pub fn set(&mut self, x: i32, y: i32, value: CellValue) {
        let i = self.extent.index(x, y);
        self.cells[i] = value;
    }

    /// Overwrite every cell.
    pub fn fill(&mut self, value: CellValue) {
        self.cells.fill(value);
    }

    /// Overwrite a whole storage column (all rows). Returns cells written.
    pub fn fill_column(&mut self, x: i32, value: CellValue) -> usize {
        let side = self.extent.side() as usize;
        let col = self.extent.wrap(x) as usize;
        for row in self.cells.chunks_exact_mut(side) {
            row[col] = value;
        }
        side
    }

    /// Overwrite a whole storage row (all columns). Returns cells written.
    pub fn fill_row(&mut self, y: i32, value: CellValue) -> usize {
        let side = self.extent.side() as usize;
        let start = (self.extent.wrap(y) as usize) * side;
        self.cells[start..start + side].fill(value);
        side
    }

    /// Raw cells in storage (row-major) order.
    pub fn as_slice(&self) -> &[CellValue] {
        &self.cells
    }

    /// Number of cells equal to `value`.
    pub fn count(&self, value: CellValue) -> usize {
        self.cells.iter().filter(|&&c| c == value).count()
    }
}
