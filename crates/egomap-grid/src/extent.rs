//! Grid extent and single-step wraparound addressing.
//!
//! A map of edge `E` stores `(E + 1) x (E + 1)` pixels so that the robot
//! always sits on an exact centre pixel `E / 2`. Logical coordinates drift
//! outside `[0, E]` as the robot moves; [`GridExtent::wrap`] folds them back
//! with a single correction of `+(E + 1)`, `0` or `-(E + 1)`.

use egomap_core::PixelCoord;

use crate::error::GridError;

/// Validated dimensions of a square toroidal map.
///
/// # Examples
///
/// ```
/// use egomap_grid::GridExtent;
///
/// let ext = GridExtent::new(100).unwrap();
/// assert_eq!(ext.side(), 101);
/// assert_eq!(ext.half(), 50);
///
/// // One grid-width out of range in either direction folds back.
/// assert_eq!(ext.wrap(-1), 100);
/// assert_eq!(ext.wrap(101), 0);
/// assert_eq!(ext.wrap(42), 42);
///
/// // Odd edges have no exact centre pixel.
/// assert!(GridExtent::new(99).is_err());
/// ```
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct GridExtent {
    edge: i32,
}

impl GridExtent {
    /// Largest accepted edge: `edge + 1` and `2 * edge` must both fit `i32`.
    pub const MAX_EDGE: u32 = (i32::MAX / 2) as u32;

    /// Create an extent with edge `E` (side `E + 1`).
    ///
    /// Returns `Err(GridError::EmptyGrid)` for `E == 0`,
    /// `Err(GridError::OddEdge)` when `E / 2` is not exact, and
    /// `Err(GridError::DimensionTooLarge)` beyond [`MAX_EDGE`](Self::MAX_EDGE).
    pub fn new(edge: u32) -> Result<Self, GridError> {
        if edge == 0 {
            return Err(GridError::EmptyGrid);
        }
        if edge > Self::MAX_EDGE {
            return Err(GridError::DimensionTooLarge {
                value: edge,
                max: Self::MAX_EDGE,
            });
        }
        if edge % 2 != 0 {
            return Err(GridError::OddEdge { edge });
        }
        Ok(Self { edge: edge as i32 })
    }

    /// Edge `E`: the largest valid storage coordinate.
    pub const fn edge(&self) -> i32 {
        self.edge
    }

    /// Side length `E + 1` of the stored square.
    pub const fn side(&self) -> i32 {
        self.edge + 1
    }

    /// `E / 2`, the logical centre on each axis.
    pub const fn half(&self) -> i32 {
        self.edge / 2
    }

    /// Total number of stored cells, `(E + 1)^2`.
    pub const fn cell_count(&self) -> usize {
        (self.side() as usize) * (self.side() as usize)
    }

    /// The fixed logical centre `(E / 2, E / 2)`.
    pub const fn logical_center(&self) -> PixelCoord {
        PixelCoord::new(self.half(), self.half())
    }

    /// Whether `coord` lies in the single-wrap domain `[-E, 2E]`.
    pub const fn in_wrap_domain(&self, coord: i32) -> bool {
        coord >= -self.edge && coord <= 2 * self.edge
    }

    /// Whether `coord` already lies in `[0, E]`.
    pub const fn in_bounds(&self, coord: i32) -> bool {
        coord >= 0 && coord <= self.edge
    }

    /// Fold a coordinate in `[-E, 2E]` into `[0, E]`.
    ///
    /// The correction is chosen by a three-way classification (below zero,
    /// in range, above `E`) rather than a general modulo. Callers must keep
    /// the input inside `[-E, 2E]`; debug builds assert this, release builds
    /// return an out-of-range value. Use [`try_wrap`](Self::try_wrap) when
    /// the input is untrusted.
    #[inline]
    pub fn wrap(&self, coord: i32) -> i32 {
        debug_assert!(
            self.in_wrap_domain(coord),
            "wrap precondition violated: {coord} outside [-{e}, {}]",
            2 * self.edge,
            e = self.edge,
        );
        coord + self.wrap_offset(coord)
    }

    /// Checked [`wrap`](Self::wrap): `None` outside `[-E, 2E]`.
    pub fn try_wrap(&self, coord: i32) -> Option<i32> {
        self.in_wrap_domain(coord)
            .then(|| coord + self.wrap_offset(coord))
    }

    /// Linear storage index of `(x, y)` after wrapping each axis.
    #[inline]
    pub fn index(&self, x: i32, y: i32) -> usize {
        (self.wrap(y) as usize) * (self.side() as usize) + (self.wrap(x) as usize)
    }

    /// Wrap both components of a coordinate.
    pub fn wrap_coord(&self, c: PixelCoord) -> PixelCoord {
        PixelCoord::new(self.wrap(c.x), self.wrap(c.y))
    }

    #[inline]
    fn wrap_offset(&self, coord: i32) -> i32 {
        let side = self.side();
        let offsets = [side, 0, -side];
        let class = usize::from(coord >= 0) + usize::from(coord >= side);
        offsets[class]
    }
}
