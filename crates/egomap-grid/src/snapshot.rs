//! Read-only borrowed view of the dynamic map.

use egomap_core::{CellClass, CellValue, PixelCoord, TickId};

use crate::extent::GridExtent;
use crate::render::{CenteredView, RawView};

/// Borrowed, read-only view of a [`DynamicMap`](crate::DynamicMap).
///
/// Holding a snapshot borrows the map, so no tick can run while a
/// consumer is reading it.
///
/// Logical coordinates put the robot at `(E / 2, E / 2)`; storage
/// coordinates index the raw buffer.
#[derive(Clone, Copy, Debug)]
pub struct MapSnapshot<'a> {
    cells: &'a [CellValue],
    extent: GridExtent,
    center_index: PixelCoord,
    subpixel_offset_mm: (f32, f32),
}

impl<'a> MapSnapshot<'a> {
    pub(crate) fn new(
        cells: &'a [CellValue],
        extent: GridExtent,
        center_index: PixelCoord,
        subpixel_offset_mm: (f32, f32),
    ) -> Self {
        debug_assert_eq!(cells.len(), extent.cell_count());
        Self {
            cells,
            extent,
            center_index,
            subpixel_offset_mm,
        }
    }

    /// Raw cells in storage (row-major) order.
    pub fn cells(&self) -> &'a [CellValue] {
        self.cells
    }

    /// Map dimensions.
    pub fn extent(&self) -> GridExtent {
        self.extent
    }

    /// Storage pixel under the robot.
    pub fn center_index(&self) -> PixelCoord {
        self.center_index
    }

    /// Sub-pixel drift not yet applied, per axis, in millimetres.
    pub fn subpixel_offset_mm(&self) -> (f32, f32) {
        self.subpixel_offset_mm
    }

    /// Storage coordinate of a logical pixel in `[0, E]^2`.
    pub fn storage_of(&self, logical: PixelCoord) -> PixelCoord {
        let half = self.extent.half();
        self.extent.wrap_coord(PixelCoord::new(
            self.center_index.x - half + logical.x,
            self.center_index.y - half + logical.y,
        ))
    }

    /// Cell at logical `(lx, ly)`, or `None` outside `[0, E]`.
    pub fn logical(&self, lx: i32, ly: i32) -> Option<CellValue> {
        if !self.extent.in_bounds(lx) || !self.extent.in_bounds(ly) {
            return None;
        }
        let s = self.storage_of(PixelCoord::new(lx, ly));
        Some(self.cells[self.extent.index(s.x, s.y)])
    }

    /// Logical rows, top to bottom, each left to right.
    pub fn logical_rows(&self) -> impl Iterator<Item = impl Iterator<Item = CellValue> + 'a> + 'a {
        let snap = *self;
        let side = self.extent.side();
        (0..side).map(move |ly| {
            (0..side).map(move |lx| {
                let s = snap.storage_of(PixelCoord::new(lx, ly));
                snap.cells[snap.extent.index(s.x, s.y)]
            })
        })
    }

    /// Number of cells of the given class.
    pub fn count_class(&self, class: CellClass) -> usize {
        self.cells.iter().filter(|c| c.class() == class).count()
    }

    /// Render rows re-ordered so the robot sits in the middle.
    pub fn centered(&self) -> CenteredView<'a> {
        CenteredView::new(*self, None)
    }

    /// [`centered`](Self::centered) preceded by a `MAP-Centered` header.
    pub fn centered_at(&self, tick: TickId) -> CenteredView<'a> {
        CenteredView::new(*self, Some(tick))
    }

    /// Render rows in storage order.
    pub fn raw(&self) -> RawView<'a> {
        RawView::new(*self, None)
    }

    /// [`raw`](Self::raw) preceded by a `MAP-Memory` header.
    pub fn raw_at(&self, tick: TickId) -> RawView<'a> {
        RawView::new(*self, Some(tick))
    }
}
