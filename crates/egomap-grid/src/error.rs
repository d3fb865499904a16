//! Error types for grid construction and map operations.

use egomap_core::Axis;
use std::fmt;

/// Errors arising from grid construction or map mutation.
#[derive(Clone, Debug, PartialEq)]
pub enum GridError {
    /// Attempted to construct a grid with zero edge.
    EmptyGrid,
    /// The edge is odd, so `E / 2` has no exact centre pixel.
    OddEdge {
        /// The rejected edge.
        edge: u32,
    },
    /// The edge does not fit the `i32` coordinate space.
    DimensionTooLarge {
        /// The rejected edge.
        value: u32,
        /// Largest accepted edge.
        max: u32,
    },
    /// The grid step is zero, negative, or not finite.
    InvalidStep {
        /// The rejected step in millimetres per pixel.
        step_mm: f32,
    },
    /// The footprint diameter is odd, so the mask cannot be symmetric.
    OddFootprint {
        /// The rejected diameter in pixels.
        diameter: u32,
    },
    /// The footprint is wider than the map window.
    FootprintTooLarge {
        /// Footprint diameter in pixels.
        diameter: u32,
        /// Map edge in pixels.
        edge: i32,
    },
    /// A translation would need more than one wrap to address its bands.
    ShiftOutOfRange {
        /// Offending axis.
        axis: Axis,
        /// Requested shift in pixels.
        shift: i32,
        /// Largest accepted magnitude.
        max: i32,
    },
}

impl fmt::Display for GridError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::EmptyGrid => write!(f, "grid must have a non-zero edge"),
            Self::OddEdge { edge } => {
                write!(f, "grid edge {edge} is odd; E/2 must be exact")
            }
            Self::DimensionTooLarge { value, max } => {
                write!(f, "grid edge {value} exceeds maximum of {max}")
            }
            Self::InvalidStep { step_mm } => {
                write!(f, "grid step must be finite and positive, got {step_mm} mm")
            }
            Self::OddFootprint { diameter } => {
                write!(f, "footprint diameter {diameter} px is odd; mask would be asymmetric")
            }
            Self::FootprintTooLarge { diameter, edge } => {
                write!(f, "footprint diameter {diameter} px exceeds map edge {edge} px")
            }
            Self::ShiftOutOfRange { axis, shift, max } => {
                write!(f, "shift of {shift} px on {axis} exceeds bound of {max} px")
            }
        }
    }
}

impl std::error::Error for GridError {}
