//! Planar geometry types shared across the workspace.

use std::fmt;
use std::ops::Add;

/// A 2D integer pixel coordinate.
///
/// Used both for *storage* coordinates (always inside `[0, E]` on each axis)
/// and for *logical* coordinates (which may run past the buffer before being
/// wrapped).
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct PixelCoord {
    /// Column.
    pub x: i32,
    /// Row.
    pub y: i32,
}

impl PixelCoord {
    /// Construct a coordinate.
    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }
}

impl Add<PixelShift> for PixelCoord {
    type Output = PixelCoord;

    fn add(self, shift: PixelShift) -> PixelCoord {
        PixelCoord::new(self.x + shift.dx, self.y + shift.dy)
    }
}

impl fmt::Display for PixelCoord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.x, self.y)
    }
}

/// A whole-pixel translation of the map.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub struct PixelShift {
    /// Horizontal shift in pixels.
    pub dx: i32,
    /// Vertical shift in pixels.
    pub dy: i32,
}

impl PixelShift {
    /// No movement.
    pub const ZERO: Self = Self { dx: 0, dy: 0 };

    /// Construct a shift.
    pub const fn new(dx: i32, dy: i32) -> Self {
        Self { dx, dy }
    }

    /// `true` when neither axis moves.
    pub const fn is_zero(self) -> bool {
        self.dx == 0 && self.dy == 0
    }

    /// Component along `axis`.
    pub const fn along(self, axis: Axis) -> i32 {
        match axis {
            Axis::X => self.dx,
            Axis::Y => self.dy,
        }
    }
}

impl fmt::Display for PixelShift {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{:+}, {:+}] px", self.dx, self.dy)
    }
}

/// Planar displacement in millimetres, as reported by localization.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Displacement {
    /// Displacement along x, in millimetres.
    pub dx_mm: f32,
    /// Displacement along y, in millimetres.
    pub dy_mm: f32,
}

impl Displacement {
    /// No movement.
    pub const ZERO: Self = Self {
        dx_mm: 0.0,
        dy_mm: 0.0,
    };

    /// Construct a displacement.
    pub const fn new(dx_mm: f32, dy_mm: f32) -> Self {
        Self { dx_mm, dy_mm }
    }

    /// Component along `axis`.
    pub const fn along(self, axis: Axis) -> f32 {
        match axis {
            Axis::X => self.dx_mm,
            Axis::Y => self.dy_mm,
        }
    }

    /// First axis whose component is NaN or infinite, if any.
    pub fn non_finite_axis(self) -> Option<Axis> {
        Axis::BOTH
            .into_iter()
            .find(|&axis| !self.along(axis).is_finite())
    }

    /// `true` when both components are finite.
    pub fn is_finite(self) -> bool {
        self.non_finite_axis().is_none()
    }
}

impl Add for Displacement {
    type Output = Displacement;

    fn add(self, rhs: Displacement) -> Displacement {
        Displacement::new(self.dx_mm + rhs.dx_mm, self.dy_mm + rhs.dy_mm)
    }
}

/// A map axis, used for per-axis error reporting.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Axis {
    /// Columns.
    X,
    /// Rows.
    Y,
}

impl Axis {
    /// Both axes, x first.
    pub const BOTH: [Axis; 2] = [Axis::X, Axis::Y];
}

impl fmt::Display for Axis {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::X => write!(f, "x"),
            Self::Y => write!(f, "y"),
        }
    }
}
