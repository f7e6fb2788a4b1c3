//! Scheduling configuration parser.
//!
//! The core never owns configuration; callers load a [`ScheduleConfig`]
//! (typically from a TOML file) and pass its [`ScatterWidthLimits`] into
//! every feasibility check.
//!
//! ```toml
//! seed = 7
//!
//! [scatter_width]
//! min = 5
//! range_percent = 0.2
//! ```

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::ConfigError;

/// Absorbs representation error in `min * (1 + range)` (5 * 1.2 must be 6).
const MAX_WIDTH_EPSILON: f64 = 1e-6;

/// Acceptable scatter-width band: `[min, min * (1 + range_percent)]`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ScatterWidthLimits {
    #[serde(rename = "min")]
    pub min_scatter_width: u32,
    #[serde(default)]
    pub range_percent: f64,
}

impl ScatterWidthLimits {
    pub fn new(min_scatter_width: u32, range_percent: f64) -> Self {
        Self {
            min_scatter_width,
            range_percent,
        }
    }

    /// Upper bound of the band, truncated to an integer width.
    pub fn max_scatter_width(&self) -> u32 {
        let raw = f64::from(self.min_scatter_width) * (1.0 + self.range_percent);
        (raw + MAX_WIDTH_EPSILON).floor() as u32
    }

    /// Whether `width` lies inside `[min, max]`.
    pub fn contains(&self, width: u32) -> bool {
        width >= self.min_scatter_width && width <= self.max_scatter_width()
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.min_scatter_width == 0 {
            return Err(ConfigError::ZeroMinScatterWidth);
        }
        if !self.range_percent.is_finite() || self.range_percent < 0.0 {
            return Err(ConfigError::InvalidRangePercent(self.range_percent));
        }
        Ok(())
    }
}

impl Default for ScatterWidthLimits {
    fn default() -> Self {
        Self::new(1, 0.0)
    }
}

/// Top-level scheduling configuration document.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ScheduleConfig {
    /// Fixed seed for candidate shuffling. Unset means a fresh
    /// thread-local generator per scheduling pass.
    pub seed: Option<u64>,
    #[serde(default)]
    pub scatter_width: ScatterWidthLimits,
}

impl ScheduleConfig {
    pub fn from_file(path: &Path) -> anyhow::Result<Self> {
        let content = std::fs::read_to_string(path)?;
        Self::from_toml_str(&content)
    }

    pub fn from_toml_str(content: &str) -> anyhow::Result<Self> {
        let config: ScheduleConfig = toml::from_str(content)?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        self.scatter_width.validate()
    }

    pub fn to_toml_string(&self) -> anyhow::Result<String> {
        Ok(toml::to_string_pretty(self)?)
    }
}
