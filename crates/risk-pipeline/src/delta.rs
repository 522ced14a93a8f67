//! Delta composition between a modulated run and its baseline.

use ensemble_grid::EnsembleResult;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::payload::MapPayload;

/// A [`MapPayload`] augmented with per-point deltas against a baseline run.
///
/// JSON output flattens the base payload and adds one `<field>_delta` key
/// per delta-eligible field; coordinates pass through from the modulated
/// payload unchanged.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DeltaPayload {
    #[serde(flatten)]
    pub payload: MapPayload,
    /// Per-point `modulated - unmodulated` channel value.
    pub values_delta: Vec<f32>,
    /// Per-point `modulated - unmodulated` risk score.
    pub wildfire_risk_delta: Vec<f32>,
}

impl DeltaPayload {
    /// Number of points in the payload.
    pub fn len(&self) -> usize {
        self.payload.len()
    }

    /// Check if the payload has no points.
    pub fn is_empty(&self) -> bool {
        self.payload.is_empty()
    }
}

/// Compose a delta payload from two structurally compatible payloads.
///
/// Both payloads must describe the same grid selection; any per-field
/// length mismatch is a fatal structural error and nothing is returned.
/// Comparing a payload with itself yields exact zero deltas, which is the
/// defined behavior for a neutral modulation factor.
pub fn compose_deltas(
    modulated: MapPayload,
    unmodulated: &MapPayload,
) -> EnsembleResult<DeltaPayload> {
    modulated.ensure_compatible(unmodulated)?;

    let values_delta = elementwise_diff(&modulated.values, &unmodulated.values);
    let wildfire_risk_delta =
        elementwise_diff(&modulated.wildfire_risk, &unmodulated.wildfire_risk);

    debug!(points = modulated.len(), "composed delta payload");

    Ok(DeltaPayload {
        payload: modulated,
        values_delta,
        wildfire_risk_delta,
    })
}

fn elementwise_diff(modulated: &[f32], unmodulated: &[f32]) -> Vec<f32> {
    modulated
        .iter()
        .zip(unmodulated)
        .map(|(&m, &u)| m - u)
        .collect()
}
