//! egomap: an ego-centric dynamic occupancy map for small ground robots.
//!
//! This is the top-level facade crate that re-exports the public API from
//! the egomap sub-crates. For most users, adding `egomap` as a single
//! dependency is sufficient.
//!
//! # Quick start
//!
//! ```rust
//! use egomap::prelude::*;
//!
//! // Odometry that always reports 10 mm towards -x.
//! struct Reverse;
//! impl LocalizationSource for Reverse {
//!     fn name(&self) -> &str { "reverse" }
//!     fn displacement(&mut self) -> Result<Displacement, LocalizationError> {
//!         Ok(Displacement::new(-10.0, 0.0))
//!     }
//! }
//!
//! // 1 m map at 10 mm per pixel, 100 mm robot.
//! let mut engine = TickEngine::new(MapConfig::default(), Box::new(Reverse)).unwrap();
//! let result = engine.execute_tick().unwrap();
//! assert_eq!(result.tick, TickId(1));
//! assert_eq!(result.shift, PixelShift::new(-1, 0));
//!
//! let snap = engine.snapshot();
//! assert_eq!(snap.logical(50, 50), Some(CellValue::VISITED));
//! ```
//!
//! # Modules
//!
//! | Module | Sub-crate | Contents |
//! |--------|-----------|----------|
//! | [`types`] | `egomap-core` | Cell values, coordinates, IDs, errors, collaborator traits |
//! | [`grid`] | `egomap-grid` | Toroidal storage, translation, drift, footprint, snapshots |
//! | [`engine`] | `egomap-engine` | Configuration, tick engine, stages, periodic driver |

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![forbid(unsafe_code)]

/// Core types, traits, and IDs (`egomap-core`).
///
/// Contains the cell encoding, pixel and millimetre coordinates, error
/// types, and the [`types::LocalizationSource`] trait.
pub use egomap_core as types;

/// Map storage and geometry (`egomap-grid`).
///
/// [`grid::DynamicMap`] owns the wrapped grid and drift state;
/// [`grid::translate`] and [`grid::FootprintMask`] are the per-tick
/// operations, and [`grid::MapSnapshot`] is the read-only view.
pub use egomap_grid as grid;

/// The per-tick pipeline (`egomap-engine`).
///
/// [`engine::TickEngine`] for synchronous ticking,
/// [`engine::PeriodicDriver`] for fixed-period loops.
pub use egomap_engine as engine;

/// Common imports for typical egomap usage.
///
/// ```rust
/// use egomap::prelude::*;
/// ```
pub mod prelude {
    // Core types and traits
    pub use egomap_core::{
        CellClass, CellValue, Displacement, LocalizationSource, PixelCoord, PixelShift, TickId,
    };

    // Errors
    pub use egomap_core::{LocalizationError, StageError, StepError};

    // Grid
    pub use egomap_grid::{DynamicMap, FootprintMask, GridExtent, MapSnapshot};

    // Engine
    pub use egomap_engine::{
        ChannelSource, MapConfig, PeriodicDriver, Stage, StageContext, StepMetrics, TickEngine,
        TickError, TickResult,
    };
}
