//! Test utilities and mock collaborators for egomap development.
//!
//! Provides mock [`LocalizationSource`] implementations, reference map
//! builders, and (in [`fixtures`]) downstream stages that record or fail
//! on demand.

#![forbid(unsafe_code)]
#![allow(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]

pub mod fixtures;

pub use fixtures::{FailingStage, RecordingStage, StageLog, StageRecord};

use std::collections::VecDeque;

use egomap_core::{Displacement, LocalizationError, LocalizationSource};
use egomap_engine::MapConfig;
use egomap_grid::{DynamicMap, FootprintMask, GridExtent};
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;

/// A 1 m map at 10 mm per pixel: `E = 100`, 101 x 101 cells.
pub fn reference_map() -> DynamicMap {
    DynamicMap::new(
        GridExtent::new(100).expect("reference edge is valid"),
        10.0,
    )
    .expect("reference step is positive")
}

/// Footprint of the 100 mm reference robot on a 10 mm grid.
pub fn reference_footprint() -> FootprintMask {
    FootprintMask::for_diameter(10).expect("reference diameter is even")
}

/// Config matching [`reference_map`] with a custom fault limit.
pub fn config_with_fault_limit(limit: u32) -> MapConfig {
    MapConfig {
        max_consecutive_faults: limit,
        ..MapConfig::default()
    }
}

/// Reports the same displacement every tick.
pub struct ConstantSource {
    pub name: String,
    pub displacement: Displacement,
}

impl ConstantSource {
    pub fn new(displacement: Displacement) -> Self {
        Self {
            name: "constant".to_string(),
            displacement,
        }
    }
}

impl LocalizationSource for ConstantSource {
    fn name(&self) -> &str {
        &self.name
    }

    fn displacement(&mut self) -> Result<Displacement, LocalizationError> {
        Ok(self.displacement)
    }
}

/// Replays a fixed script of results, then reports no motion.
pub struct ScriptedSource {
    pub name: String,
    script: VecDeque<Result<Displacement, LocalizationError>>,
    calls: usize,
}

impl ScriptedSource {
    pub fn new(script: Vec<Result<Displacement, LocalizationError>>) -> Self {
        Self {
            name: "scripted".to_string(),
            script: script.into(),
            calls: 0,
        }
    }

    /// Script of successful displacements only.
    pub fn from_displacements(steps: impl IntoIterator<Item = Displacement>) -> Self {
        Self::new(steps.into_iter().map(Ok).collect())
    }

    /// How many times `displacement()` has been called.
    pub fn calls(&self) -> usize {
        self.calls
    }

    /// Entries not yet replayed.
    pub fn remaining(&self) -> usize {
        self.script.len()
    }
}

impl LocalizationSource for ScriptedSource {
    fn name(&self) -> &str {
        &self.name
    }

    fn displacement(&mut self) -> Result<Displacement, LocalizationError> {
        self.calls += 1;
        self.script.pop_front().unwrap_or(Ok(Displacement::ZERO))
    }
}

/// Seeded random walk: each axis moves uniformly in `[-max_step_mm, max_step_mm]`.
///
/// Deterministic for a given seed, so failures are reproducible.
pub struct RandomWalkSource {
    pub name: String,
    pub max_step_mm: f32,
    rng: ChaCha8Rng,
}

impl RandomWalkSource {
    pub fn new(seed: u64, max_step_mm: f32) -> Self {
        Self {
            name: format!("random_walk_{seed}"),
            max_step_mm,
            rng: ChaCha8Rng::seed_from_u64(seed),
        }
    }

    /// Draw the next displacement without going through the trait.
    pub fn next_displacement(&mut self) -> Displacement {
        let m = self.max_step_mm;
        Displacement::new(self.rng.random_range(-m..=m), self.rng.random_range(-m..=m))
    }
}

impl LocalizationSource for RandomWalkSource {
    fn name(&self) -> &str {
        &self.name
    }

    fn displacement(&mut self) -> Result<Displacement, LocalizationError> {
        Ok(self.next_displacement())
    }
}
