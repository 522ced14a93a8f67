//! The map-ready payload.

use chrono::{DateTime, Utc};
use ensemble_grid::{EnsembleError, EnsembleResult};
use serde::{Deserialize, Serialize};

/// Downsampled, flattened point cloud ready for client rendering.
///
/// The four sequences are parallel: index `i` describes one grid cell.
/// Field names match the JSON wire keys consumed by the map client.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MapPayload {
    /// Longitude per point, degrees.
    pub lons: Vec<f64>,
    /// Latitude per point, degrees.
    pub lats: Vec<f64>,
    /// Visualized channel value per point (t2m in °C).
    pub values: Vec<f32>,
    /// Wildfire-risk score per point, in [0, 100].
    pub wildfire_risk: Vec<f32>,
    /// Valid time of the displayed step, if the dataset carries one.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub valid_time: Option<DateTime<Utc>>,
}

impl MapPayload {
    /// Number of points in the payload.
    pub fn len(&self) -> usize {
        self.lons.len()
    }

    /// Check if the payload has no points.
    pub fn is_empty(&self) -> bool {
        self.lons.is_empty()
    }

    /// The parallel fields and their wire keys, in serialization order.
    fn field_lens(&self) -> [(&'static str, usize); 4] {
        [
            ("lons", self.lons.len()),
            ("lats", self.lats.len()),
            ("values", self.values.len()),
            ("wildfire_risk", self.wildfire_risk.len()),
        ]
    }

    /// Check that all parallel sequences within this payload agree.
    pub fn ensure_consistent(&self) -> EnsembleResult<()> {
        let n = self.len();
        for (field, len) in self.field_lens() {
            if len != n {
                return Err(EnsembleError::structural_mismatch(field, len, n));
            }
        }
        Ok(())
    }

    /// Check structural compatibility with another payload.
    ///
    /// Two payloads are compatible iff every parallel sequence has the same
    /// length in both. Incompatible payloads must never be differenced;
    /// truncating to the shorter side would corrupt the visualization.
    pub fn ensure_compatible(&self, other: &MapPayload) -> EnsembleResult<()> {
        self.ensure_consistent()?;
        other.ensure_consistent()?;
        for ((field, left), (_, right)) in self.field_lens().iter().zip(other.field_lens()) {
            if *left != right {
                return Err(EnsembleError::structural_mismatch(*field, *left, right));
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn payload(n: usize) -> MapPayload {
        MapPayload {
            lons: vec![0.0; n],
            lats: vec![0.0; n],
            values: vec![1.0; n],
            wildfire_risk: vec![50.0; n],
            valid_time: None,
        }
    }

    #[test]
    fn test_compatible_payloads() {
        assert!(payload(4).ensure_compatible(&payload(4)).is_ok());
        assert!(payload(0).ensure_compatible(&payload(0)).is_ok());
    }

    #[test]
    fn test_incompatible_lengths() {
        let err = payload(4).ensure_compatible(&payload(3)).unwrap_err();
        assert!(matches!(
            err,
            EnsembleError::StructuralMismatch { left: 4, right: 3, .. }
        ));
    }

    #[test]
    fn test_internal_inconsistency() {
        let mut p = payload(4);
        p.wildfire_risk.pop();
        assert!(p.ensure_consistent().is_err());
        assert!(p.ensure_compatible(&payload(4)).is_err());
    }

    #[test]
    fn test_wire_keys() {
        let json = serde_json::to_value(payload(1)).unwrap();
        let obj = json.as_object().unwrap();
        for key in ["lons", "lats", "values", "wildfire_risk"] {
            assert!(obj.contains_key(key), "missing key {}", key);
        }
        // valid_time is omitted when absent
        assert!(!obj.contains_key("valid_time"));
    }
}
