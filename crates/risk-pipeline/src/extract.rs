//! Region extraction and downsampling.
//!
//! [`extract_region`] is the single entry point that turns a dataset plus a
//! selection into a [`MapPayload`]: slice, window-average, mask, estimate
//! risk, flatten, downsample.

use ensemble_grid::channel::{kelvin_to_celsius, Channel};
use ensemble_grid::{EnsembleDataset, EnsembleError, EnsembleResult, Selection};
use tracing::debug;

use crate::config::PipelineConfig;
use crate::payload::MapPayload;
use crate::risk::wildfire_risk;
use crate::sample::{sample_indices, take};

/// Extract a time/member slice, derive the risk field, and downsample.
///
/// See the crate-level docs for the full step sequence. Fails on an
/// out-of-range time or member index, a missing region parameter, or an
/// unknown channel; an empty region mask yields an empty, valid payload.
pub fn extract_region(
    dataset: &EnsembleDataset,
    selection: &Selection,
    config: &PipelineConfig,
) -> EnsembleResult<MapPayload> {
    config.validate()?;

    let available = dataset.time_steps();
    if selection.time_index >= available {
        return Err(EnsembleError::TimeIndexOutOfBounds {
            requested: selection.time_index,
            available,
        });
    }
    if selection.member >= dataset.members() {
        return Err(EnsembleError::MemberIndexOutOfBounds {
            requested: selection.member,
            available: dataset.members(),
        });
    }

    // Displayed values: the visualized channel at the selected step.
    let mut values = dataset
        .step_slice(&selection.channel, selection.member, selection.time_index)?
        .to_vec();
    if Channel::parse(&selection.channel).is_some_and(|c| c.is_temperature()) {
        kelvin_to_celsius(&mut values);
    }

    let (mut lons, mut lats) = dataset.coordinate_mesh();

    let (start, end) = trailing_window(selection.time_index, config.window_steps);
    debug!(
        start,
        end,
        time_index = selection.time_index,
        "averaging window"
    );

    // Region mask over the flattened mesh, shared by every channel.
    let mask = match selection.resolve_center()? {
        Some((center_lon, center_lat)) => {
            let mask = region_mask(&lons, &lats, center_lon, center_lat, selection.region_size_deg);
            let kept = mask.iter().filter(|&&keep| keep).count();
            debug!(
                kept,
                total = mask.len(),
                mode = %selection.mode,
                "region mask applied"
            );
            Some(mask)
        }
        None => None,
    };

    // Window-averaged inputs for the risk estimator.
    let mut avg_t2m = window_mean(dataset, Channel::T2m, selection.member, start, end, mask.as_deref())?;
    let avg_u10m = window_mean(dataset, Channel::U10m, selection.member, start, end, mask.as_deref())?;
    let avg_v10m = window_mean(dataset, Channel::V10m, selection.member, start, end, mask.as_deref())?;
    let avg_r50 = window_mean(dataset, Channel::R50, selection.member, start, end, mask.as_deref())?;
    kelvin_to_celsius(&mut avg_t2m);

    let risk = wildfire_risk(&avg_t2m, &avg_u10m, &avg_v10m, &avg_r50)?;

    if let Some(mask) = &mask {
        lons = filter_by_mask(&lons, mask);
        lats = filter_by_mask(&lats, mask);
        values = filter_by_mask(&values, mask);
    }

    let total_points = lons.len();
    let indices = sample_indices(total_points, config.max_points, config.strategy);
    debug!(
        total_points,
        kept = indices.len(),
        strategy = %config.strategy,
        "downsampled payload"
    );

    Ok(MapPayload {
        lons: take(&lons, &indices),
        lats: take(&lats, &indices),
        values: take(&values, &indices),
        wildfire_risk: take(&risk, &indices),
        valid_time: dataset.time_at(selection.time_index),
    })
}

/// Bounds of the trailing averaging window as a half-open step range.
///
/// At time 0 the window is exactly the single current step. Once past it,
/// the window spans up to `window_steps` prior steps and never includes the
/// current one. The asymmetry is deliberate and load-bearing for the
/// displayed-vs-averaged comparison.
pub fn trailing_window(time_index: usize, window_steps: usize) -> (usize, usize) {
    if time_index == 0 {
        (0, 1)
    } else {
        (time_index.saturating_sub(window_steps), time_index)
    }
}

/// Axis-aligned inclusion mask over the flattened coordinate mesh.
///
/// A cell is kept iff both coordinates lie within half the region size of
/// the center. Bounds are inclusive, so `size_deg == 0` keeps only cells
/// exactly at the center.
fn region_mask(
    lons: &[f64],
    lats: &[f64],
    center_lon: f64,
    center_lat: f64,
    size_deg: f64,
) -> Vec<bool> {
    let half = size_deg / 2.0;
    lons.iter()
        .zip(lats)
        .map(|(&lon, &lat)| (lat - center_lat).abs() <= half && (lon - center_lon).abs() <= half)
        .collect()
}

/// Per-cell mean of a channel over `[start, end)`, restricted to masked cells.
///
/// The output preserves the masked subset's relative order (row-major over
/// the full grid when no mask is given).
fn window_mean(
    dataset: &EnsembleDataset,
    channel: Channel,
    member: usize,
    start: usize,
    end: usize,
    mask: Option<&[bool]>,
) -> EnsembleResult<Vec<f32>> {
    let out_len = match mask {
        Some(m) => m.iter().filter(|&&keep| keep).count(),
        None => dataset.grid_len(),
    };
    let mut acc = vec![0.0f32; out_len];

    for step in start..end {
        let slice = dataset.step_slice(channel.as_str(), member, step)?;
        match mask {
            Some(m) => {
                let mut out = 0;
                for (i, &keep) in m.iter().enumerate() {
                    if keep {
                        acc[out] += slice[i];
                        out += 1;
                    }
                }
            }
            None => {
                for (a, &v) in acc.iter_mut().zip(slice) {
                    *a += v;
                }
            }
        }
    }

    let count = (end - start) as f32;
    for a in acc.iter_mut() {
        *a /= count;
    }
    Ok(acc)
}

fn filter_by_mask<T: Copy>(values: &[T], mask: &[bool]) -> Vec<T> {
    values
        .iter()
        .zip(mask)
        .filter_map(|(&v, &keep)| keep.then_some(v))
        .collect()
}
