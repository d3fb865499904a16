//! Tick orchestration for the egomap dynamic map.
//!
//! [`TickEngine`] runs the per-tick sequence: fetch displacement, quantize,
//! re-centre, mark the footprint, hand off to downstream [`Stage`]s.
//! [`MapConfig`] describes the map in physical units and derives the
//! pixel geometry. [`PeriodicDriver`] calls the engine at a fixed rate and
//! [`ChannelSource`] feeds it odometry from another thread.

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![forbid(unsafe_code)]

pub mod config;
pub mod metrics;
pub mod periodic;
pub mod source;
pub mod stage;
pub mod tick;

pub use config::{ConfigError, MapConfig, MapGeometry};
pub use metrics::StepMetrics;
pub use periodic::{PeriodicDriver, RunSummary};
pub use source::ChannelSource;
pub use stage::{Stage, StageContext};
pub use tick::{TickEngine, TickError, TickResult};
