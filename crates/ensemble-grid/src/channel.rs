//! Physical channel names and unit conventions.
//!
//! The inference collaborator produces datasets keyed by short channel
//! names. Four channels feed the wildfire-risk estimator; any other channel
//! present in a dataset can still be visualized but is ignored by the risk
//! calculation.

use serde::{Deserialize, Serialize};

/// Offset between Kelvin (storage convention) and Celsius (display convention).
pub const KELVIN_OFFSET: f32 = 273.15;

/// The channels required by the wildfire-risk estimator.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Channel {
    /// Near-surface temperature, stored in Kelvin.
    T2m,
    /// Eastward 10 m wind component, m/s.
    U10m,
    /// Northward 10 m wind component, m/s.
    V10m,
    /// Relative humidity at the 50 hPa reference level, percent.
    R50,
}

/// All channels required for risk estimation, in estimator argument order.
pub const REQUIRED_CHANNELS: [Channel; 4] = [Channel::T2m, Channel::U10m, Channel::V10m, Channel::R50];

impl Channel {
    /// The dataset key for this channel.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::T2m => "t2m",
            Self::U10m => "u10m",
            Self::V10m => "v10m",
            Self::R50 => "r50",
        }
    }

    /// Parse a dataset key into a known channel, if it is one of the four.
    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "t2m" => Some(Self::T2m),
            "u10m" => Some(Self::U10m),
            "v10m" => Some(Self::V10m),
            "r50" => Some(Self::R50),
            _ => None,
        }
    }

    /// Physical units as stored in the dataset.
    pub fn units(&self) -> &'static str {
        match self {
            Self::T2m => "K",
            Self::U10m | Self::V10m => "m/s",
            Self::R50 => "%",
        }
    }

    /// Whether display values need Kelvin-to-Celsius conversion.
    pub fn is_temperature(&self) -> bool {
        matches!(self, Self::T2m)
    }
}

impl std::fmt::Display for Channel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Convert a slice of Kelvin values to Celsius in place.
pub fn kelvin_to_celsius(values: &mut [f32]) {
    for v in values.iter_mut() {
        *v -= KELVIN_OFFSET;
    }
}
