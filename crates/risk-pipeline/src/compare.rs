//! Two-run comparison orchestration.
//!
//! One logical request compares a modulated run against its unmodulated
//! baseline. The two extraction passes share no mutable state, so they run
//! on a rayon join when a baseline dataset is supplied; with a neutral
//! modulation factor there is only one dataset and the deltas are exactly
//! zero by construction.

use ensemble_grid::{EnsembleDataset, EnsembleResult, Selection};
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::config::PipelineConfig;
use crate::delta::{compose_deltas, DeltaPayload};
use crate::extract::extract_region;

/// The perturbation applied to the modulated run's inputs.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Modulation {
    /// Input channel that was scaled.
    pub channel: String,
    /// Scaling factor; 1.0 means no perturbation.
    pub factor: f64,
}

impl Modulation {
    /// Create a modulation descriptor.
    pub fn new(channel: impl Into<String>, factor: f64) -> Self {
        Self {
            channel: channel.into(),
            factor,
        }
    }

    /// Whether this modulation leaves the run identical to the baseline.
    pub fn is_neutral(&self) -> bool {
        self.factor == 1.0
    }
}

impl std::fmt::Display for Modulation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} x{}", self.channel, self.factor)
    }
}

/// Process a modulated run and its baseline into one delta payload.
///
/// When `baseline` is `None` (neutral modulation factor) the modulated
/// payload is compared with itself and every delta is zero. Otherwise both
/// datasets are extracted with the same selection and configuration (the
/// passes are independent and run in parallel) and the payloads are
/// composed into a [`DeltaPayload`].
pub fn compare_runs(
    modulated: &EnsembleDataset,
    baseline: Option<&EnsembleDataset>,
    selection: &Selection,
    config: &PipelineConfig,
) -> EnsembleResult<DeltaPayload> {
    match baseline {
        None => {
            debug!("neutral modulation, single extraction pass");
            let payload = extract_region(modulated, selection, config)?;
            compose_deltas(payload.clone(), &payload)
        }
        Some(baseline) => {
            info!(
                channel = %selection.channel,
                time_index = selection.time_index,
                "running modulated and baseline extraction"
            );
            let (modulated_payload, baseline_payload) = rayon::join(
                || extract_region(modulated, selection, config),
                || extract_region(baseline, selection, config),
            );
            compose_deltas(modulated_payload?, &baseline_payload?)
        }
    }
}
