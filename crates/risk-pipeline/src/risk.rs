//! Composite wildfire-risk estimation.
//!
//! The estimator maps four averaged physical fields to a normalized risk
//! score per grid cell. Sub-risks grow exponentially so that risk
//! accelerates rather than grows linearly as conditions worsen, and the
//! composite is min-max normalized over the array being processed. The
//! visualized scale is always anchored to the current view's own min and
//! max, not a global historical range.

use ensemble_grid::{EnsembleError, EnsembleResult};

/// Weight of the temperature sub-risk. Temperature dominates the composite.
pub const TEMP_WEIGHT: f32 = 0.8;

/// Weight of the wind-speed sub-risk.
pub const WIND_WEIGHT: f32 = 0.1;

/// Weight of the dryness sub-risk.
pub const DRYNESS_WEIGHT: f32 = 0.1;

/// E-folding scale (°C, m/s, %) shared by the three exponential curves.
const RISK_SCALE: f32 = 10.0;

/// Estimate wildfire risk per cell, normalized to [0, 100].
///
/// # Arguments
/// * `temp_c` - Window-averaged near-surface temperature in Celsius
/// * `u10m` - Window-averaged eastward wind component in m/s
/// * `v10m` - Window-averaged northward wind component in m/s
/// * `humidity` - Window-averaged relative humidity in percent
///
/// All four slices must have equal length; the result has the same length.
///
/// If every composite value is identical (a single cell, or a uniform
/// field) the min-max span is zero and the whole array resolves to 0.0
/// rather than propagating NaN.
pub fn wildfire_risk(
    temp_c: &[f32],
    u10m: &[f32],
    v10m: &[f32],
    humidity: &[f32],
) -> EnsembleResult<Vec<f32>> {
    let n = temp_c.len();
    if u10m.len() != n || v10m.len() != n || humidity.len() != n {
        return Err(EnsembleError::shape_mismatch(format!(
            "risk inputs have lengths {}/{}/{}/{}",
            n,
            u10m.len(),
            v10m.len(),
            humidity.len()
        )));
    }

    let mut composite = Vec::with_capacity(n);
    for i in 0..n {
        let wind_speed = u10m[i].hypot(v10m[i]);
        let temp_risk = (temp_c[i] / RISK_SCALE).exp();
        let wind_risk = (wind_speed / RISK_SCALE).exp();
        let dryness_risk = ((100.0 - humidity[i]) / RISK_SCALE).exp();
        composite.push(
            temp_risk * TEMP_WEIGHT + wind_risk * WIND_WEIGHT + dryness_risk * DRYNESS_WEIGHT,
        );
    }

    Ok(normalize_to_100(composite))
}

/// Min-max normalize an array to [0, 100] in place.
///
/// Degenerate spans (all values equal, single value, empty input) map to a
/// constant 0.0.
fn normalize_to_100(mut values: Vec<f32>) -> Vec<f32> {
    let mut min = f32::INFINITY;
    let mut max = f32::NEG_INFINITY;
    for &v in &values {
        min = min.min(v);
        max = max.max(v);
    }

    let span = max - min;
    if !(span > 0.0) {
        for v in values.iter_mut() {
            *v = 0.0;
        }
        return values;
    }

    for v in values.iter_mut() {
        *v = (*v - min) / span * 100.0;
    }
    values
}
