//! The value domain of a single map cell.
//!
//! A cell is one signed byte. Disjoint ranges of that byte carry different
//! meanings:
//!
//! | range        | meaning                                            |
//! |--------------|----------------------------------------------------|
//! | `0`          | neutral / unexplored (the zero value)              |
//! | `-10`        | visited by the robot                               |
//! | `[-20, 20]`  | walkable band (includes neutral and visited)       |
//! | `[1, 100]`   | occupancy probability from ranging sensors         |
//! | `[101, 120]` | hard no-go / edge zone                             |
//!
//! The mapping core only ever writes [`CellValue::NEUTRAL`] and
//! [`CellValue::VISITED`]. Occupancy and edge values exist for sensor
//! integrations and can only be built through checked constructors.

use std::fmt;

use crate::error::CellError;

/// Lower bound of the walkable band (inclusive).
pub const WALKABLE_MIN: i8 = -20;
/// Upper bound of the walkable band (inclusive).
pub const WALKABLE_MAX: i8 = 20;
/// Lowest occupancy probability a ranging sensor may write.
pub const OCCUPANCY_MIN: i8 = 1;
/// Highest occupancy probability a ranging sensor may write.
pub const OCCUPANCY_MAX: i8 = 100;
/// Lowest no-go (edge / cliff) score.
pub const EDGE_MIN: i8 = 101;
/// Highest no-go (edge / cliff) score.
pub const EDGE_MAX: i8 = 120;

/// One cell of the dynamic map.
///
/// `Default` is [`CellValue::NEUTRAL`], so bulk-zeroed storage is a valid
/// unexplored map.
///
/// # Examples
///
/// ```
/// use egomap_core::{CellClass, CellValue};
///
/// assert_eq!(CellValue::default(), CellValue::NEUTRAL);
/// assert_eq!(CellValue::VISITED.class(), CellClass::Visited);
/// assert!(CellValue::VISITED.is_walkable());
///
/// let wall = CellValue::occupancy(90).unwrap();
/// assert!(!wall.is_walkable());
/// assert!(CellValue::occupancy(0).is_err());
/// ```
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[repr(transparent)]
pub struct CellValue(i8);

impl CellValue {
    /// Unexplored cell. Must stay zero: map resets rely on bulk-zeroing.
    pub const NEUTRAL: Self = Self(0);

    /// Cell swept by the robot footprint.
    pub const VISITED: Self = Self(-10);

    /// Build an occupancy-probability cell. Accepts `[1, 100]`.
    pub fn occupancy(probability: i8) -> Result<Self, CellError> {
        if (OCCUPANCY_MIN..=OCCUPANCY_MAX).contains(&probability) {
            Ok(Self(probability))
        } else {
            Err(CellError::OutOfBand {
                value: probability,
                band: "occupancy [1, 100]",
            })
        }
    }

    /// Build a hard no-go cell. Accepts `[101, 120]`.
    pub fn edge(score: i8) -> Result<Self, CellError> {
        if (EDGE_MIN..=EDGE_MAX).contains(&score) {
            Ok(Self(score))
        } else {
            Err(CellError::OutOfBand {
                value: score,
                band: "edge [101, 120]",
            })
        }
    }

    /// The raw signed byte.
    pub const fn raw(self) -> i8 {
        self.0
    }

    /// Whether a planner may drive through this cell.
    pub const fn is_walkable(self) -> bool {
        self.0 >= WALKABLE_MIN && self.0 <= WALKABLE_MAX
    }

    /// Whether this cell must never be entered.
    pub const fn is_no_go(self) -> bool {
        self.0 >= EDGE_MIN && self.0 <= EDGE_MAX
    }

    /// Classify this cell by the range its value falls in.
    pub const fn class(self) -> CellClass {
        match self.0 {
            0 => CellClass::Neutral,
            -10 => CellClass::Visited,
            OCCUPANCY_MIN..=OCCUPANCY_MAX => CellClass::Occupied,
            EDGE_MIN..=EDGE_MAX => CellClass::NoGo,
            WALKABLE_MIN..=WALKABLE_MAX => CellClass::Walkable,
            _ => CellClass::Unclassified,
        }
    }
}

impl fmt::Display for CellValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Semantic class of a [`CellValue`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum CellClass {
    /// Exactly [`CellValue::NEUTRAL`].
    Neutral,
    /// Exactly [`CellValue::VISITED`].
    Visited,
    /// Other values in the walkable band `[-20, 0)`.
    Walkable,
    /// Occupancy probability `[1, 100]`. Values up to 20 are still walkable.
    Occupied,
    /// Hard no-go zone `[101, 120]`.
    NoGo,
    /// Outside every named band.
    Unclassified,
}
