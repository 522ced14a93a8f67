//! Common types shared across the fire-weather-viz workspace.

pub mod channel;
pub mod countries;
pub mod dataset;
pub mod error;
pub mod selection;

pub use channel::{Channel, KELVIN_OFFSET};
pub use dataset::{EnsembleDataset, GridShape};
pub use error::{EnsembleError, EnsembleResult};
pub use selection::{RegionMode, Selection};
