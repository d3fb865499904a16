//! Core types and traits for the egomap mapping core.
//!
//! This is the leaf crate with zero internal dependencies. It defines the
//! cell value domain, planar geometry types, tick identifiers, the error
//! taxonomy, and the localization collaborator trait.

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![forbid(unsafe_code)]

pub mod cell;
pub mod coord;
pub mod error;
pub mod id;
pub mod traits;

pub use cell::{CellClass, CellValue};
pub use coord::{Axis, Displacement, PixelCoord, PixelShift};
pub use error::{CellError, LocalizationError, StageError, StepError};
pub use id::TickId;
pub use traits::LocalizationSource;
