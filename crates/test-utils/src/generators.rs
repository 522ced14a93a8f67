//! Synthetic ensemble datasets with predictable value patterns.
//!
//! All generators are deterministic so tests can assert exact values.

use chrono::{DateTime, Duration, TimeZone, Utc};
use ensemble_grid::channel::Channel;
use ensemble_grid::{EnsembleDataset, GridShape};

/// Evenly spaced coordinate axis starting at `start`.
pub fn degree_axis(start: f64, step: f64, n: usize) -> Vec<f64> {
    (0..n).map(|i| start + i as f64 * step).collect()
}

/// Six-hourly valid times starting 2024-06-01T00:00Z.
pub fn six_hourly_times(steps: usize) -> Vec<DateTime<Utc>> {
    let start = Utc.with_ymd_and_hms(2024, 6, 1, 0, 0, 0).unwrap();
    (0..steps)
        .map(|i| start + Duration::hours(i as i64 * 6))
        .collect()
}

fn channel_value(
    channel: Channel,
    member: usize,
    step: usize,
    row: usize,
    col: usize,
    height: usize,
    width: usize,
) -> f32 {
    let x = col as f32 / width.max(2) as f32;
    let y = row as f32 / height.max(2) as f32;
    match channel {
        // Warm gradient in Kelvin, drifting slightly per step and member.
        Channel::T2m => 270.0 + x * 30.0 + y * 20.0 + step as f32 * 0.5 + member as f32,
        // Trade-wind-like bands: U varies by latitude, V by longitude.
        Channel::U10m => (y - 0.5) * 2.0 * 20.0,
        Channel::V10m => (x - 0.5) * 2.0 * 15.0,
        // Humidity ramp from dry west to moist east.
        Channel::R50 => 20.0 + x * 60.0,
    }
}

fn build_channel(channel: Channel, shape: GridShape, scale: f32) -> Vec<f32> {
    let mut data = Vec::with_capacity(shape.channel_len());
    for member in 0..shape.members {
        for step in 0..shape.steps {
            for row in 0..shape.height {
                for col in 0..shape.width {
                    data.push(
                        channel_value(channel, member, step, row, col, shape.height, shape.width)
                            * scale,
                    );
                }
            }
        }
    }
    data
}

/// A weather-like dataset with gradients across all four risk channels.
///
/// Longitudes start at 0.0°E and latitudes at -40.0°N, both spaced 1.0°.
pub fn synthetic_dataset(
    members: usize,
    steps: usize,
    height: usize,
    width: usize,
) -> EnsembleDataset {
    modulated_synthetic_dataset(members, steps, height, width, None)
}

/// Like [`synthetic_dataset`], with one channel scaled by a factor.
///
/// Passing `Some((channel, factor))` simulates a modulated inference run;
/// `None` yields the unmodulated baseline.
pub fn modulated_synthetic_dataset(
    members: usize,
    steps: usize,
    height: usize,
    width: usize,
    modulation: Option<(Channel, f32)>,
) -> EnsembleDataset {
    let shape = GridShape::new(members, steps, height, width);
    let mut ds = EnsembleDataset::new(
        shape,
        degree_axis(0.0, 1.0, width),
        degree_axis(-40.0, 1.0, height),
        six_hourly_times(steps),
    )
    .expect("axes match shape");

    for channel in [Channel::T2m, Channel::U10m, Channel::V10m, Channel::R50] {
        let scale = match modulation {
            Some((modulated, factor)) if modulated == channel => factor,
            _ => 1.0,
        };
        ds = ds
            .with_channel(channel.as_str(), build_channel(channel, shape, scale))
            .expect("channel matches shape");
    }
    ds
}

/// A dataset with spatially constant channels.
pub fn constant_dataset(
    members: usize,
    steps: usize,
    height: usize,
    width: usize,
    t2m_k: f32,
    u10m: f32,
    v10m: f32,
    r50: f32,
) -> EnsembleDataset {
    let shape = GridShape::new(members, steps, height, width);
    let len = shape.channel_len();
    EnsembleDataset::new(
        shape,
        degree_axis(0.0, 1.0, width),
        degree_axis(-40.0, 1.0, height),
        six_hourly_times(steps),
    )
    .expect("axes match shape")
    .with_channel("t2m", vec![t2m_k; len])
    .expect("channel matches shape")
    .with_channel("u10m", vec![u10m; len])
    .expect("channel matches shape")
    .with_channel("v10m", vec![v10m; len])
    .expect("channel matches shape")
    .with_channel("r50", vec![r50; len])
    .expect("channel matches shape")
}

/// A dataset where temperature is `280 + step` Kelvin at every cell.
///
/// Winds are calm and humidity is 50%, making window-average assertions
/// exact: the mean over steps `[a, b)` is `280 + (a + b - 1) / 2`.
pub fn step_ramp_dataset(
    members: usize,
    steps: usize,
    height: usize,
    width: usize,
) -> EnsembleDataset {
    let shape = GridShape::new(members, steps, height, width);
    let grid = shape.grid_len();
    let mut t2m = Vec::with_capacity(shape.channel_len());
    for _member in 0..members {
        for step in 0..steps {
            t2m.extend(std::iter::repeat(280.0 + step as f32).take(grid));
        }
    }
    EnsembleDataset::new(
        shape,
        degree_axis(0.0, 1.0, width),
        degree_axis(-40.0, 1.0, height),
        six_hourly_times(steps),
    )
    .expect("axes match shape")
    .with_channel("t2m", t2m)
    .expect("channel matches shape")
    .with_channel("u10m", vec![0.0; shape.channel_len()])
    .expect("channel matches shape")
    .with_channel("v10m", vec![0.0; shape.channel_len()])
    .expect("channel matches shape")
    .with_channel("r50", vec![50.0; shape.channel_len()])
    .expect("channel matches shape")
}
