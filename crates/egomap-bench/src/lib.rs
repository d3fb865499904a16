//! Benchmark profiles for the egomap dynamic map.
//!
//! Provides pre-built [`MapConfig`] profiles for benchmarks and examples:
//!
//! - [`reference_profile`]: 1 m map at 10 mm (101 x 101 cells), 100 mm robot
//! - [`stress_profile`]: 10 m map at 10 mm (1001 x 1001 cells), 300 mm robot
//! - [`scripted_walk`]: deterministic displacement sequence for tick benches

#![forbid(unsafe_code)]
#![deny(rustdoc::broken_intra_doc_links)]

use egomap_core::Displacement;
use egomap_engine::MapConfig;

/// The firmware-sized map: `E = 100`, 10 mm pixels, 100 ms ticks.
pub fn reference_profile() -> MapConfig {
    MapConfig::default()
}

/// A 10 m map at the same resolution, about 1M cells.
pub fn stress_profile() -> MapConfig {
    MapConfig {
        map_width_mm: 10_000,
        map_height_mm: 10_000,
        grid_step_mm: 10,
        robot_diameter_mm: 300,
        ..MapConfig::default()
    }
}

/// `len` displacements tracing a slow square spiral, all well inside the
/// per-tick bound of either profile.
pub fn scripted_walk(len: usize) -> Vec<Displacement> {
    const LEG: usize = 25;
    const SPEED_MM: f32 = 17.5;
    let headings = [(1.0, 0.0), (0.0, 1.0), (-1.0, 0.0), (0.0, -1.0)];
    (0..len)
        .map(|i| {
            let (hx, hy) = headings[(i / LEG) % headings.len()];
            Displacement::new(hx * SPEED_MM, hy * SPEED_MM)
        })
        .collect()
}
