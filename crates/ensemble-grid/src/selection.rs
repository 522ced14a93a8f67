//! Per-request selection parameters.
//!
//! A [`Selection`] carries the full selection context for one extraction:
//! which channel to visualize, which ensemble member and time step to slice,
//! and the optional geographic crop. The core never reads ambient state;
//! every call receives its selection as an argument.

use serde::{Deserialize, Serialize};

use crate::countries;
use crate::error::{EnsembleError, EnsembleResult};

/// Default region size in degrees when none is supplied.
pub const DEFAULT_REGION_SIZE_DEG: f64 = 1.0;

/// How the geographic extent of a request is chosen.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RegionMode {
    /// No cropping; the whole grid is processed.
    #[default]
    Global,
    /// Center comes from the country lookup table.
    Country,
    /// Center is supplied by the caller.
    Custom,
}

impl RegionMode {
    /// Parse from a request string.
    pub fn parse(s: &str) -> EnsembleResult<Self> {
        match s.to_lowercase().as_str() {
            "global" => Ok(Self::Global),
            "country" => Ok(Self::Country),
            "custom" => Ok(Self::Custom),
            other => Err(EnsembleError::UnknownRegionMode(other.to_string())),
        }
    }
}

impl std::fmt::Display for RegionMode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Global => write!(f, "global"),
            Self::Country => write!(f, "country"),
            Self::Custom => write!(f, "custom"),
        }
    }
}

/// Selection parameters for one extraction pass.
///
/// Use the builder methods to construct a selection:
///
/// ```rust
/// use ensemble_grid::Selection;
///
/// let sel = Selection::new("t2m")
///     .member(2)
///     .at_time(10)
///     .custom_region(133.5, -25.0, 4.0);
/// ```
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Selection {
    /// Channel to visualize (any channel present in the dataset).
    pub channel: String,
    /// Ensemble member index.
    pub member: usize,
    /// Time step to display.
    pub time_index: usize,
    /// How the geographic extent is chosen.
    pub mode: RegionMode,
    /// Country name, required when `mode == Country`.
    pub country: Option<String>,
    /// Center longitude in degrees, required when `mode == Custom`.
    pub longitude: Option<f64>,
    /// Center latitude in degrees, required when `mode == Custom`.
    pub latitude: Option<f64>,
    /// Side length of the inclusion box in degrees.
    pub region_size_deg: f64,
}

impl Selection {
    /// Create a global selection for a channel at member 0, time 0.
    pub fn new(channel: impl Into<String>) -> Self {
        Self {
            channel: channel.into(),
            member: 0,
            time_index: 0,
            mode: RegionMode::Global,
            country: None,
            longitude: None,
            latitude: None,
            region_size_deg: DEFAULT_REGION_SIZE_DEG,
        }
    }

    /// Select an ensemble member.
    pub fn member(mut self, member: usize) -> Self {
        self.member = member;
        self
    }

    /// Select the displayed time step.
    pub fn at_time(mut self, time_index: usize) -> Self {
        self.time_index = time_index;
        self
    }

    /// Crop to a box around a country's center.
    pub fn country_region(mut self, name: impl Into<String>, size_deg: f64) -> Self {
        self.mode = RegionMode::Country;
        self.country = Some(name.into());
        self.region_size_deg = size_deg;
        self
    }

    /// Crop to a box around a caller-supplied center.
    pub fn custom_region(mut self, longitude: f64, latitude: f64, size_deg: f64) -> Self {
        self.mode = RegionMode::Custom;
        self.longitude = Some(longitude);
        self.latitude = Some(latitude);
        self.region_size_deg = size_deg;
        self
    }

    /// Resolve the crop center for this selection.
    ///
    /// Returns `None` for global mode. Fails with
    /// [`EnsembleError::MissingRegionParameter`] when a cropping mode lacks
    /// its center, and [`EnsembleError::UnknownCountry`] when the country is
    /// not in the lookup table.
    pub fn resolve_center(&self) -> EnsembleResult<Option<(f64, f64)>> {
        match self.mode {
            RegionMode::Global => Ok(None),
            RegionMode::Country => {
                let name = self
                    .country
                    .as_deref()
                    .ok_or_else(|| EnsembleError::missing_region_parameter("country"))?;
                let center = countries::center(name)
                    .ok_or_else(|| EnsembleError::UnknownCountry(name.to_string()))?;
                Ok(Some(center))
            }
            RegionMode::Custom => {
                let lon = self
                    .longitude
                    .ok_or_else(|| EnsembleError::missing_region_parameter("longitude"))?;
                let lat = self
                    .latitude
                    .ok_or_else(|| EnsembleError::missing_region_parameter("latitude"))?;
                Ok(Some((lon, lat)))
            }
        }
    }
}
