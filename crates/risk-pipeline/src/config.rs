//! Configuration for the payload pipeline.

use ensemble_grid::{EnsembleError, EnsembleResult};
use serde::{Deserialize, Serialize};

/// Default point budget for one payload.
pub const DEFAULT_MAX_POINTS: usize = 150_000;

/// Default trailing-average window length in time steps.
pub const DEFAULT_WINDOW_STEPS: usize = 7;

/// Configuration for the payload pipeline.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PipelineConfig {
    /// Maximum number of points in a payload.
    pub max_points: usize,

    /// Trailing-average window length in time steps.
    pub window_steps: usize,

    /// Downsampling strategy.
    pub strategy: SampleStrategy,
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self {
            max_points: DEFAULT_MAX_POINTS,
            window_steps: DEFAULT_WINDOW_STEPS,
            strategy: SampleStrategy::Stride,
        }
    }
}

impl PipelineConfig {
    /// Load configuration from environment variables.
    pub fn from_env() -> Self {
        let mut config = Self::default();

        if let Ok(val) = std::env::var("VIZ_MAX_POINTS") {
            if let Ok(points) = val.parse() {
                config.max_points = points;
            }
        }

        if let Ok(val) = std::env::var("VIZ_WINDOW_STEPS") {
            if let Ok(steps) = val.parse() {
                config.window_steps = steps;
            }
        }

        if let Ok(val) = std::env::var("VIZ_SAMPLE_STRATEGY") {
            config.strategy = SampleStrategy::parse(&val);
        }

        config
    }

    /// Validate the configuration.
    pub fn validate(&self) -> EnsembleResult<()> {
        if self.max_points == 0 {
            return Err(EnsembleError::invalid_config("max_points must be > 0"));
        }
        if self.window_steps == 0 {
            return Err(EnsembleError::invalid_config("window_steps must be > 0"));
        }
        Ok(())
    }
}

/// Strategy for reducing a flattened point cloud to the point budget.
///
/// Both strategies are deterministic, which keeps payloads reproducible
/// across requests for the same selection.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum SampleStrategy {
    /// Keep every step-th point starting at index 0. Fast, but can alias
    /// toward whichever points fall on the stride.
    #[default]
    Stride,
    /// Keep the middle index of each stride block. Same point count scaling,
    /// slightly less edge bias on regular grids.
    BlockCenter,
}

impl SampleStrategy {
    /// Parse from string (case-insensitive), defaulting to stride.
    pub fn parse(s: &str) -> Self {
        match s.to_lowercase().as_str() {
            "block-center" | "block_center" | "center" => Self::BlockCenter,
            _ => Self::Stride,
        }
    }
}

impl std::fmt::Display for SampleStrategy {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Stride => write!(f, "stride"),
            Self::BlockCenter => write!(f, "block-center"),
        }
    }
}
