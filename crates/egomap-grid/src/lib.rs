//! Ego-centric occupancy grid for the egomap mapping core.
//!
//! The map is a fixed `(E + 1) x (E + 1)` buffer addressed as a torus. As
//! the robot moves, the buffer is never copied: the storage centre advances
//! and only the newly exposed bands are reset.
//!
//! # Building blocks
//!
//! - [`GridExtent`]: validated dimensions and single-wrap addressing
//! - [`ToroidalGrid`]: the cell store
//! - [`DriftAccumulator`]: millimetre-to-pixel quantization with carry
//! - [`translate`] / [`advance`]: incremental re-centering
//! - [`FootprintMask`]: marking the robot's swept area as visited
//! - [`MapSnapshot`]: borrowed read-only view with text rendering
//!
//! [`DynamicMap`] ties these together.

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![forbid(unsafe_code)]

pub mod drift;
pub mod error;
pub mod extent;
pub mod footprint;
pub mod map;
pub mod render;
pub mod snapshot;
pub mod store;
pub mod translate;

pub use drift::{DriftAccumulator, DriftStep};
pub use error::GridError;
pub use extent::GridExtent;
pub use footprint::FootprintMask;
pub use map::DynamicMap;
pub use render::{CenteredView, RawView};
pub use snapshot::MapSnapshot;
pub use store::ToroidalGrid;
pub use translate::{advance, check_shift, translate, TranslateReport};
