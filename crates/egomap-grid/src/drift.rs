//! Sub-pixel drift accumulation.
//!
//! Localization reports continuous millimetre displacements, but the map
//! can only move by whole pixels. The accumulator carries the fractional
//! remainder from tick to tick so quantization error never compounds.
//!
//! Shifts are truncated toward zero, not floored: a request of `-5 mm` on a
//! `10 mm` grid yields no shift and a `-5 mm` leftover, never `-1 px` with
//! `+5 mm`. This keeps both directions of travel symmetric.

use egomap_core::{Displacement, PixelShift};

use crate::error::GridError;

/// Result of planning one tick's displacement.
///
/// Produced by [`DriftAccumulator::plan`] without touching state; the
/// caller applies it with [`DriftAccumulator::commit`] once the shift has
/// been accepted by the map.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct DriftStep {
    /// Whole-pixel shift to hand to the translation engine.
    pub shift: PixelShift,
    /// Leftover millimetres to carry into the next tick, per axis.
    pub leftover_mm: (f32, f32),
}

/// Per-axis sub-pixel remainder carried between ticks.
///
/// Each leftover component stays strictly inside `(-step, step)`.
///
/// # Examples
///
/// ```
/// use egomap_core::{Displacement, PixelShift};
/// use egomap_grid::DriftAccumulator;
///
/// let mut drift = DriftAccumulator::new(10.0).unwrap();
///
/// let step = drift.plan(Displacement::new(-5.0, 14.0));
/// assert_eq!(step.shift, PixelShift::new(0, 1));
/// drift.commit(&step);
/// assert_eq!(drift.leftover_mm(), (-5.0, 4.0));
///
/// let step = drift.plan(Displacement::new(-5.0, 0.0));
/// assert_eq!(step.shift, PixelShift::new(-1, 0));
/// ```
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct DriftAccumulator {
    step_mm: f32,
    leftover_mm: (f32, f32),
}

impl DriftAccumulator {
    /// Create an accumulator for a grid of `step_mm` millimetres per pixel.
    ///
    /// Returns `Err(GridError::InvalidStep)` unless `step_mm` is finite and
    /// positive.
    pub fn new(step_mm: f32) -> Result<Self, GridError> {
        if !(step_mm.is_finite() && step_mm > 0.0) {
            return Err(GridError::InvalidStep { step_mm });
        }
        Ok(Self {
            step_mm,
            leftover_mm: (0.0, 0.0),
        })
    }

    /// Millimetres per pixel.
    pub fn step_mm(&self) -> f32 {
        self.step_mm
    }

    /// Current leftover, per axis, in millimetres.
    pub fn leftover_mm(&self) -> (f32, f32) {
        self.leftover_mm
    }

    /// Split `requested + leftover` into whole pixels and a new leftover.
    ///
    /// Pure: the accumulator is unchanged until [`commit`](Self::commit).
    pub fn plan(&self, requested: Displacement) -> DriftStep {
        let (sx, lx) = Self::split(requested.dx_mm + self.leftover_mm.0, self.step_mm);
        let (sy, ly) = Self::split(requested.dy_mm + self.leftover_mm.1, self.step_mm);
        DriftStep {
            shift: PixelShift::new(sx, sy),
            leftover_mm: (lx, ly),
        }
    }

    /// Store the leftover of an accepted step.
    pub fn commit(&mut self, step: &DriftStep) {
        self.leftover_mm = step.leftover_mm;
    }

    /// Forget any accumulated remainder.
    pub fn clear(&mut self) {
        self.leftover_mm = (0.0, 0.0);
    }

    fn split(combined_mm: f32, step_mm: f32) -> (i32, f32) {
        let pixels = (combined_mm / step_mm).trunc();
        let leftover = combined_mm - pixels * step_mm;
        // `as` saturates; out-of-range shifts are rejected downstream.
        (pixels as i32, leftover)
    }
}
