//! Deterministic point-cloud downsampling.
//!
//! Payloads are reduced to the point budget by stride subsampling: compute
//! `step = ceil(total / max_points)` and keep every step-th point in the
//! original flattening order. This is fast and reproducible but not
//! area-weighted: points that fall on the stride are systematically
//! favored, which can alias structured fields. The block-center strategy
//! shifts the kept index to the middle of each stride block without
//! changing the determinism or the point-count scaling.

use crate::config::SampleStrategy;

/// Stride between kept points for a given total and budget (minimum 1).
pub fn sample_step(total_points: usize, max_points: usize) -> usize {
    if max_points == 0 {
        return 1;
    }
    ((total_points + max_points - 1) / max_points).max(1)
}

/// Indices of the points to keep, in ascending order.
pub fn sample_indices(total_points: usize, max_points: usize, strategy: SampleStrategy) -> Vec<usize> {
    let step = sample_step(total_points, max_points);
    let offset = match strategy {
        SampleStrategy::Stride => 0,
        SampleStrategy::BlockCenter => step / 2,
    };
    (offset..total_points).step_by(step).collect()
}

/// Gather the values at `indices` from a slice.
pub fn take<T: Copy>(values: &[T], indices: &[usize]) -> Vec<T> {
    indices.iter().map(|&i| values[i]).collect()
}
