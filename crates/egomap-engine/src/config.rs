//! Map configuration, derived geometry, and error types.
//!
//! [`MapConfig`] holds the physical parameters in millimetres as an
//! integrator would write them. [`geometry()`](MapConfig::geometry)
//! validates them and derives the pixel-space [`MapGeometry`] the engine
//! runs on. Configs can be loaded from YAML.

use std::error::Error;
use std::fmt;
use std::path::Path;
use std::time::Duration;

use egomap_grid::{FootprintMask, GridError, GridExtent};
use serde::{Deserialize, Serialize};

// ── ConfigError ────────────────────────────────────────────────────

/// Errors detected while validating a [`MapConfig`] or building an engine.
#[derive(Clone, Debug, PartialEq)]
pub enum ConfigError {
    /// `grid_step_mm` is zero.
    ZeroGridStep,
    /// Only square maps are supported.
    NotSquare {
        /// Configured width in millimetres.
        width_mm: u32,
        /// Configured height in millimetres.
        height_mm: u32,
    },
    /// The map span is not a whole number of grid steps.
    SpanNotDivisible {
        /// Map span in millimetres.
        span_mm: u32,
        /// Grid step in millimetres.
        step_mm: u32,
    },
    /// The robot diameter is not a whole number of grid steps.
    FootprintNotDivisible {
        /// Robot diameter in millimetres.
        diameter_mm: u32,
        /// Grid step in millimetres.
        step_mm: u32,
    },
    /// `tick_period_ms` is zero.
    InvalidTickPeriod {
        /// The invalid value.
        value: u32,
    },
    /// `max_speed_mm_per_s` is NaN, infinite, zero, or negative.
    InvalidSpeed {
        /// The invalid value.
        value: f32,
    },
    /// At top speed the robot would move further in one tick than the map
    /// can re-centre.
    SpeedExceedsShiftBound {
        /// Configured top speed in mm/s.
        speed_mm_per_s: f32,
        /// Highest speed the geometry allows, in mm/s.
        limit_mm_per_s: f32,
    },
    /// `max_consecutive_faults` is zero.
    ZeroFaultLimit,
    /// Two stages share a name.
    DuplicateStage {
        /// The repeated name.
        name: String,
    },
    /// Grid dimensions or footprint rejected by the grid layer.
    Grid(GridError),
    /// YAML could not be parsed or produced.
    Parse(String),
    /// A config file could not be read or written.
    Io(String),
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::ZeroGridStep => write!(f, "grid_step_mm must be at least 1"),
            Self::NotSquare {
                width_mm,
                height_mm,
            } => write!(f, "map must be square, got {width_mm} x {height_mm} mm"),
            Self::SpanNotDivisible { span_mm, step_mm } => {
                write!(f, "map span {span_mm} mm is not a multiple of grid step {step_mm} mm")
            }
            Self::FootprintNotDivisible {
                diameter_mm,
                step_mm,
            } => write!(
                f,
                "robot diameter {diameter_mm} mm is not a multiple of grid step {step_mm} mm"
            ),
            Self::InvalidTickPeriod { value } => {
                write!(f, "tick_period_ms must be at least 1, got {value}")
            }
            Self::InvalidSpeed { value } => {
                write!(f, "max_speed_mm_per_s must be finite and positive, got {value}")
            }
            Self::SpeedExceedsShiftBound {
                speed_mm_per_s,
                limit_mm_per_s,
            } => write!(
                f,
                "max speed {speed_mm_per_s} mm/s exceeds the per-tick shift bound of {limit_mm_per_s} mm/s"
            ),
            Self::ZeroFaultLimit => write!(f, "max_consecutive_faults must be at least 1"),
            Self::DuplicateStage { name } => write!(f, "stage '{name}' registered twice"),
            Self::Grid(e) => write!(f, "grid: {e}"),
            Self::Parse(msg) => write!(f, "parse error: {msg}"),
            Self::Io(msg) => write!(f, "io error: {msg}"),
        }
    }
}

impl Error for ConfigError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Grid(e) => Some(e),
            _ => None,
        }
    }
}

impl From<GridError> for ConfigError {
    fn from(e: GridError) -> Self {
        Self::Grid(e)
    }
}

// ── MapGeometry ────────────────────────────────────────────────────

/// Pixel-space parameters derived from a validated [`MapConfig`].
#[derive(Clone, Debug, PartialEq)]
pub struct MapGeometry {
    /// Map dimensions in pixels.
    pub extent: GridExtent,
    /// Millimetres per pixel.
    pub grid_step_mm: f32,
    /// Robot footprint mask.
    pub footprint: FootprintMask,
    /// Fixed tick period.
    pub tick_period: Duration,
    /// Largest accepted per-axis shift per tick, in pixels.
    pub max_shift_px: i32,
    /// Distance from the robot to the map edge, in millimetres.
    pub visibility_range_mm: u32,
}

impl MapGeometry {
    /// Highest speed, in mm/s, the map can follow without faulting.
    pub fn max_trackable_speed_mm_per_s(&self) -> f32 {
        self.max_shift_px as f32 * self.grid_step_mm / self.tick_period.as_secs_f32()
    }
}

// ── MapConfig ──────────────────────────────────────────────────────

/// Physical configuration of the dynamic map.
///
/// Missing YAML keys fall back to [`Default`], which describes a 1 m map
/// at 10 mm resolution for a 100 mm robot ticking every 100 ms.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MapConfig {
    /// Map width in millimetres. Default: 1000.
    pub map_width_mm: u32,
    /// Map height in millimetres. Must equal the width. Default: 1000.
    pub map_height_mm: u32,
    /// Millimetres per pixel. Default: 10.
    pub grid_step_mm: u32,
    /// Robot diameter in millimetres. Default: 100.
    pub robot_diameter_mm: u32,
    /// Tick period in milliseconds. Default: 100.
    pub tick_period_ms: u32,
    /// Robot top speed. When set, validation rejects speeds the map could
    /// not follow. Default: `None`.
    pub max_speed_mm_per_s: Option<f32>,
    /// Consecutive map faults before ticking is disabled. Default: 3.
    pub max_consecutive_faults: u32,
}

impl Default for MapConfig {
    fn default() -> Self {
        Self {
            map_width_mm: 1000,
            map_height_mm: 1000,
            grid_step_mm: 10,
            robot_diameter_mm: 100,
            tick_period_ms: 100,
            max_speed_mm_per_s: None,
            max_consecutive_faults: 3,
        }
    }
}

impl MapConfig {
    /// Validate all structural invariants.
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.geometry().map(|_| ())
    }

    /// Validate and derive the pixel-space geometry.
    pub fn geometry(&self) -> Result<MapGeometry, ConfigError> {
        // 1. Resolution.
        let step = self.grid_step_mm;
        if step == 0 {
            return Err(ConfigError::ZeroGridStep);
        }
        // 2. Square, whole number of pixels.
        if self.map_width_mm != self.map_height_mm {
            return Err(ConfigError::NotSquare {
                width_mm: self.map_width_mm,
                height_mm: self.map_height_mm,
            });
        }
        let span = self.map_width_mm;
        if span % step != 0 {
            return Err(ConfigError::SpanNotDivisible {
                span_mm: span,
                step_mm: step,
            });
        }
        let extent = GridExtent::new(span / step)?;
        // 3. Footprint.
        if self.robot_diameter_mm % step != 0 {
            return Err(ConfigError::FootprintNotDivisible {
                diameter_mm: self.robot_diameter_mm,
                step_mm: step,
            });
        }
        let footprint = FootprintMask::for_diameter(self.robot_diameter_mm / step)?;
        footprint.check_fits(extent)?;
        // 4. Timing.
        if self.tick_period_ms == 0 {
            return Err(ConfigError::InvalidTickPeriod {
                value: self.tick_period_ms,
            });
        }
        let geometry = MapGeometry {
            extent,
            grid_step_mm: step as f32,
            footprint,
            tick_period: Duration::from_millis(u64::from(self.tick_period_ms)),
            max_shift_px: extent.half(),
            visibility_range_mm: span / 2,
        };
        // 5. Speed, if declared, must fit the per-tick shift bound.
        if let Some(speed) = self.max_speed_mm_per_s {
            if !speed.is_finite() || speed <= 0.0 {
                return Err(ConfigError::InvalidSpeed { value: speed });
            }
            let limit = geometry.max_trackable_speed_mm_per_s();
            if speed > limit {
                return Err(ConfigError::SpeedExceedsShiftBound {
                    speed_mm_per_s: speed,
                    limit_mm_per_s: limit,
                });
            }
        }
        // 6. Fault latch.
        if self.max_consecutive_faults == 0 {
            return Err(ConfigError::ZeroFaultLimit);
        }
        Ok(geometry)
    }

    /// Load from a YAML file.
    pub fn from_yaml_file(path: &Path) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(path).map_err(|e| ConfigError::Io(e.to_string()))?;
        Self::from_yaml(&contents)
    }

    /// Parse from a YAML string.
    pub fn from_yaml(yaml: &str) -> Result<Self, ConfigError> {
        serde_yaml::from_str(yaml).map_err(|e| ConfigError::Parse(e.to_string()))
    }

    /// Serialize to a YAML string.
    pub fn to_yaml(&self) -> Result<String, ConfigError> {
        serde_yaml::to_string(self).map_err(|e| ConfigError::Parse(e.to_string()))
    }
}
