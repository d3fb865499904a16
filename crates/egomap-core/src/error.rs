//! Error types for the egomap mapping core.
//!
//! Organised by subsystem: cell construction, the localization
//! collaborator, downstream stages, and the per-tick step as a whole.

use std::error::Error;
use std::fmt;

use crate::coord::Axis;

/// A cell value was requested outside its named band.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum CellError {
    /// The raw value does not belong to the requested band.
    OutOfBand {
        /// The rejected raw value.
        value: i8,
        /// Human-readable name and range of the band.
        band: &'static str,
    },
}

impl fmt::Display for CellError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::OutOfBand { value, band } => {
                write!(f, "cell value {value} outside {band}")
            }
        }
    }
}

impl Error for CellError {}

/// Errors reported by a [`LocalizationSource`](crate::LocalizationSource).
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum LocalizationError {
    /// No estimate is available for this tick.
    Unavailable {
        /// Why the estimate is missing.
        reason: String,
    },
    /// The producer feeding the source has gone away.
    Disconnected,
}

impl fmt::Display for LocalizationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Unavailable { reason } => write!(f, "displacement unavailable: {reason}"),
            Self::Disconnected => write!(f, "localization producer disconnected"),
        }
    }
}

impl Error for LocalizationError {}

/// Errors from a downstream stage (obstacle detection, planning, ...).
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum StageError {
    /// The stage could not complete its work for this tick.
    ExecutionFailed {
        /// Human-readable description of the failure.
        reason: String,
    },
}

impl fmt::Display for StageError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::ExecutionFailed { reason } => write!(f, "execution failed: {reason}"),
        }
    }
}

impl Error for StageError {}

/// Errors from one tick of the mapping core.
///
/// Everything except [`StageFailed`](Self::StageFailed) is detected before
/// the map is touched: the map and its drift state are left exactly as they
/// were, and the tick is skipped.
#[derive(Clone, Debug, PartialEq)]
pub enum StepError {
    /// The localization source failed to produce a displacement.
    Localization(LocalizationError),
    /// The reported displacement is NaN or infinite.
    NonFiniteDisplacement {
        /// Offending axis.
        axis: Axis,
        /// The reported value.
        value: f32,
    },
    /// The resulting pixel shift breaks the single-wrap addressing contract.
    ShiftOutOfRange {
        /// Offending axis.
        axis: Axis,
        /// Requested shift in pixels.
        shift: i32,
        /// Largest magnitude the map accepts in one tick.
        max: i32,
    },
    /// A downstream stage failed after the map was updated.
    StageFailed {
        /// Name of the failing stage.
        name: String,
        /// The underlying stage error.
        reason: StageError,
    },
    /// Ticking is disabled after too many consecutive map faults.
    TickDisabled,
}

impl StepError {
    /// `true` if the map was not modified by the failing tick.
    pub fn map_untouched(&self) -> bool {
        !matches!(self, Self::StageFailed { .. })
    }
}

impl fmt::Display for StepError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Localization(e) => write!(f, "localization: {e}"),
            Self::NonFiniteDisplacement { axis, value } => {
                write!(f, "non-finite displacement on {axis}: {value}")
            }
            Self::ShiftOutOfRange { axis, shift, max } => {
                write!(
                    f,
                    "shift of {shift} px on {axis} exceeds the per-tick bound of {max} px"
                )
            }
            Self::StageFailed { name, reason } => write!(f, "stage '{name}' failed: {reason}"),
            Self::TickDisabled => write!(f, "ticking disabled after consecutive map faults"),
        }
    }
}

impl Error for StepError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Localization(e) => Some(e),
            Self::StageFailed { reason, .. } => Some(reason),
            _ => None,
        }
    }
}

impl From<LocalizationError> for StepError {
    fn from(e: LocalizationError) -> Self {
        Self::Localization(e)
    }
}
