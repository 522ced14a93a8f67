//! The in-memory ensemble dataset handle.
//!
//! An [`EnsembleDataset`] is produced entirely by the external inference
//! collaborator; this crate only validates and reads it. Data is stored as
//! one row-major `Vec<f32>` per channel over the dimensions
//! (member, time step, lat row, lon column), with `f64` coordinate axes.

use std::collections::HashMap;

use chrono::{DateTime, Utc};

use crate::channel::REQUIRED_CHANNELS;
use crate::error::{EnsembleError, EnsembleResult};

/// Dimensionality shared by every channel in a dataset.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GridShape {
    /// Number of ensemble members.
    pub members: usize,
    /// Number of time steps.
    pub steps: usize,
    /// Number of latitude rows.
    pub height: usize,
    /// Number of longitude columns.
    pub width: usize,
}

impl GridShape {
    /// Create a new shape.
    pub fn new(members: usize, steps: usize, height: usize, width: usize) -> Self {
        Self {
            members,
            steps,
            height,
            width,
        }
    }

    /// Number of cells in one lat/lon grid.
    pub fn grid_len(&self) -> usize {
        self.height * self.width
    }

    /// Total number of values in one channel.
    pub fn channel_len(&self) -> usize {
        self.members * self.steps * self.grid_len()
    }
}

/// A read-only, multi-channel, multi-member gridded dataset.
#[derive(Debug, Clone)]
pub struct EnsembleDataset {
    shape: GridShape,
    /// Longitude axis, length `shape.width`.
    lons: Vec<f64>,
    /// Latitude axis, length `shape.height`.
    lats: Vec<f64>,
    /// Valid time per step, length `shape.steps`.
    times: Vec<DateTime<Utc>>,
    /// Channel name -> row-major values of length `shape.channel_len()`.
    channels: HashMap<String, Vec<f32>>,
}

impl EnsembleDataset {
    /// Create an empty dataset with validated axes.
    ///
    /// Channels are added with [`EnsembleDataset::with_channel`].
    pub fn new(
        shape: GridShape,
        lons: Vec<f64>,
        lats: Vec<f64>,
        times: Vec<DateTime<Utc>>,
    ) -> EnsembleResult<Self> {
        if lons.len() != shape.width {
            return Err(EnsembleError::shape_mismatch(format!(
                "longitude axis has {} entries, expected {}",
                lons.len(),
                shape.width
            )));
        }
        if lats.len() != shape.height {
            return Err(EnsembleError::shape_mismatch(format!(
                "latitude axis has {} entries, expected {}",
                lats.len(),
                shape.height
            )));
        }
        if times.len() != shape.steps {
            return Err(EnsembleError::shape_mismatch(format!(
                "time axis has {} entries, expected {}",
                times.len(),
                shape.steps
            )));
        }
        Ok(Self {
            shape,
            lons,
            lats,
            times,
            channels: HashMap::new(),
        })
    }

    /// Add a channel, validating its length against the dataset shape.
    pub fn with_channel(mut self, name: impl Into<String>, data: Vec<f32>) -> EnsembleResult<Self> {
        let name = name.into();
        let expected = self.shape.channel_len();
        if data.len() != expected {
            return Err(EnsembleError::shape_mismatch(format!(
                "channel '{}' has {} values, expected {}",
                name,
                data.len(),
                expected
            )));
        }
        self.channels.insert(name, data);
        Ok(self)
    }

    /// Check that the four risk-estimator channels are present.
    pub fn has_required_channels(&self) -> bool {
        REQUIRED_CHANNELS
            .iter()
            .all(|c| self.channels.contains_key(c.as_str()))
    }

    /// The dataset shape.
    pub fn shape(&self) -> GridShape {
        self.shape
    }

    /// Number of ensemble members.
    pub fn members(&self) -> usize {
        self.shape.members
    }

    /// Number of time steps.
    pub fn time_steps(&self) -> usize {
        self.shape.steps
    }

    /// Number of cells in one lat/lon grid.
    pub fn grid_len(&self) -> usize {
        self.shape.grid_len()
    }

    /// Longitude axis.
    pub fn lons(&self) -> &[f64] {
        &self.lons
    }

    /// Latitude axis.
    pub fn lats(&self) -> &[f64] {
        &self.lats
    }

    /// Valid time of a step, if in range.
    pub fn time_at(&self, step: usize) -> Option<DateTime<Utc>> {
        self.times.get(step).copied()
    }

    /// Whether a channel is present.
    pub fn has_channel(&self, name: &str) -> bool {
        self.channels.contains_key(name)
    }

    /// One lat/lon grid for a channel at (member, step), row-major.
    pub fn step_slice(&self, channel: &str, member: usize, step: usize) -> EnsembleResult<&[f32]> {
        let data = self
            .channels
            .get(channel)
            .ok_or_else(|| EnsembleError::UnknownChannel(channel.to_string()))?;
        if member >= self.shape.members {
            return Err(EnsembleError::MemberIndexOutOfBounds {
                requested: member,
                available: self.shape.members,
            });
        }
        if step >= self.shape.steps {
            return Err(EnsembleError::TimeIndexOutOfBounds {
                requested: step,
                available: self.shape.steps,
            });
        }
        let grid = self.shape.grid_len();
        let offset = (member * self.shape.steps + step) * grid;
        Ok(&data[offset..offset + grid])
    }

    /// Flattened coordinate mesh in row-major order (lat rows outer,
    /// lon columns inner), matching the layout of [`Self::step_slice`].
    pub fn coordinate_mesh(&self) -> (Vec<f64>, Vec<f64>) {
        let grid = self.shape.grid_len();
        let mut lons = Vec::with_capacity(grid);
        let mut lats = Vec::with_capacity(grid);
        for &lat in &self.lats {
            for &lon in &self.lons {
                lons.push(lon);
                lats.push(lat);
            }
        }
        (lons, lats)
    }
}
