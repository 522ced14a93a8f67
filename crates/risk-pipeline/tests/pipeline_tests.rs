//! End-to-end tests of the extraction and comparison pipeline over
//! synthetic ensemble datasets.

use ensemble_grid::channel::Channel;
use ensemble_grid::{EnsembleError, Selection};
use risk_pipeline::{
    compare_runs, extract_region, DeltaPayload, PipelineConfig, SampleStrategy,
};
use test_utils::{
    constant_dataset, modulated_synthetic_dataset, step_ramp_dataset, synthetic_dataset,
};

fn config(max_points: usize) -> PipelineConfig {
    PipelineConfig {
        max_points,
        ..PipelineConfig::default()
    }
}

#[test]
fn payload_sequences_are_parallel_and_bounded() {
    let ds = synthetic_dataset(2, 5, 20, 30);
    let sel = Selection::new("t2m").member(1).at_time(3);
    let cfg = config(100);

    let payload = extract_region(&ds, &sel, &cfg).unwrap();
    assert!(payload.len() <= 100);
    assert!(!payload.is_empty());
    assert_eq!(payload.lats.len(), payload.len());
    assert_eq!(payload.values.len(), payload.len());
    assert_eq!(payload.wildfire_risk.len(), payload.len());
    for &r in &payload.wildfire_risk {
        assert!((0.0..=100.0).contains(&r));
    }
}

#[test]
fn temperature_is_displayed_in_celsius() {
    let ds = constant_dataset(1, 3, 4, 4, 300.15, 0.0, 0.0, 50.0);
    let payload = extract_region(&ds, &Selection::new("t2m"), &config(1000)).unwrap();
    for &v in &payload.values {
        assert!((v - 27.0).abs() < 1e-3);
    }
    // Uniform conditions: the degenerate normalization resolves to 0.
    assert!(payload.wildfire_risk.iter().all(|&r| r == 0.0));
}

#[test]
fn non_temperature_channels_are_not_converted() {
    let ds = constant_dataset(1, 1, 4, 4, 290.0, 3.0, 0.0, 50.0);
    let payload = extract_region(&ds, &Selection::new("u10m"), &config(1000)).unwrap();
    assert!(payload.values.iter().all(|&v| (v - 3.0).abs() < 1e-6));
}

#[test]
fn trailing_window_excludes_current_step() {
    // Two datasets identical on steps [0, 10) but different at step 10:
    // the averaging window for time_index=10 never sees the current step,
    // so the risk fields must match exactly while the values differ.
    let base = step_ramp_dataset(1, 12, 6, 6);
    let spiked = {
        let shape = base.shape();
        let grid = shape.grid_len();
        let mut t2m = Vec::with_capacity(shape.channel_len());
        for step in 0..shape.steps {
            let v = if step == 10 { 400.0 } else { 280.0 + step as f32 };
            t2m.extend(std::iter::repeat(v).take(grid));
        }
        ensemble_grid::EnsembleDataset::new(
            shape,
            test_utils::degree_axis(0.0, 1.0, shape.width),
            test_utils::degree_axis(-40.0, 1.0, shape.height),
            test_utils::six_hourly_times(shape.steps),
        )
        .unwrap()
        .with_channel("t2m", t2m)
        .unwrap()
        .with_channel("u10m", vec![0.0; shape.channel_len()])
        .unwrap()
        .with_channel("v10m", vec![0.0; shape.channel_len()])
        .unwrap()
        .with_channel("r50", vec![50.0; shape.channel_len()])
        .unwrap()
    };

    let sel = Selection::new("t2m").at_time(10);
    let cfg = config(1000);
    let p_base = extract_region(&base, &sel, &cfg).unwrap();
    let p_spiked = extract_region(&spiked, &sel, &cfg).unwrap();

    assert_eq!(p_base.wildfire_risk, p_spiked.wildfire_risk);
    assert!((p_base.values[0] - (290.0 - 273.15)).abs() < 1e-3);
    assert!((p_spiked.values[0] - (400.0 - 273.15)).abs() < 1e-3);
}

#[test]
fn time_zero_window_is_the_single_current_step() {
    // At time 0 the window is the current step itself, so a step-0
    // difference does affect the risk inputs.
    let warm = constant_dataset(1, 3, 4, 4, 310.0, 0.0, 0.0, 50.0);
    let payload = extract_region(&warm, &Selection::new("t2m"), &config(1000)).unwrap();
    // Uniform field still normalizes to zero, but extraction succeeded with
    // a one-step window.
    assert_eq!(payload.len(), 16);
    assert!((payload.values[0] - (310.0 - 273.15)).abs() < 1e-3);
}

#[test]
fn custom_region_crops_to_box() {
    // Axes are integer degrees; a 2-degree box around (10, -35) keeps a
    // 3x3 block of cells.
    let ds = synthetic_dataset(1, 2, 20, 20);
    let sel = Selection::new("t2m").at_time(1).custom_region(10.0, -35.0, 2.0);
    let payload = extract_region(&ds, &sel, &config(10_000)).unwrap();

    assert_eq!(payload.len(), 9);
    for (&lon, &lat) in payload.lons.iter().zip(&payload.lats) {
        assert!((lon - 10.0).abs() <= 1.0);
        assert!((lat + 35.0).abs() <= 1.0);
    }
}

#[test]
fn zero_size_region_keeps_only_the_center_cell() {
    let ds = synthetic_dataset(1, 2, 20, 20);
    let sel = Selection::new("t2m").at_time(1).custom_region(10.0, -35.0, 0.0);
    let payload = extract_region(&ds, &sel, &config(10_000)).unwrap();

    assert_eq!(payload.len(), 1);
    assert_eq!(payload.lons[0], 10.0);
    assert_eq!(payload.lats[0], -35.0);
}

#[test]
fn empty_region_yields_empty_valid_payload() {
    let ds = synthetic_dataset(1, 2, 10, 10);
    // Center far outside the grid's coordinate range.
    let sel = Selection::new("t2m").at_time(1).custom_region(120.0, 80.0, 2.0);
    let payload = extract_region(&ds, &sel, &config(10_000)).unwrap();

    assert!(payload.is_empty());
    assert!(payload.ensure_consistent().is_ok());
}

#[test]
fn country_region_resolves_from_lookup_table() {
    // Grid spans lon [0, 40) x lat [-40, 0); Australia's center (133.78E)
    // is outside it, Kenya's (37.91E, -0.02N) is inside.
    let ds = synthetic_dataset(1, 2, 40, 40);
    let sel = Selection::new("t2m").at_time(1).country_region("Kenya", 4.0);
    let payload = extract_region(&ds, &sel, &config(10_000)).unwrap();
    assert!(!payload.is_empty());
    for &lon in &payload.lons {
        assert!((lon - 37.91).abs() <= 2.0);
    }
}

#[test]
fn stride_downsampling_preserves_flattening_order() {
    // 100x100 grid with a 1000-point budget: step 10, first kept points are
    // mesh indices 0 and 10 (row 0, columns 0 and 10).
    let ds = synthetic_dataset(1, 1, 100, 100);
    let payload = extract_region(&ds, &Selection::new("t2m"), &config(1000)).unwrap();

    assert_eq!(payload.len(), 1000);
    assert_eq!(payload.lons[0], 0.0);
    assert_eq!(payload.lons[1], 10.0);
    assert_eq!(payload.lats[0], payload.lats[1]);
}

#[test]
fn block_center_strategy_shifts_kept_points() {
    let ds = synthetic_dataset(1, 1, 100, 100);
    let cfg = PipelineConfig {
        max_points: 1000,
        strategy: SampleStrategy::BlockCenter,
        ..PipelineConfig::default()
    };
    let payload = extract_region(&ds, &Selection::new("t2m"), &cfg).unwrap();
    assert_eq!(payload.len(), 1000);
    assert_eq!(payload.lons[0], 5.0);
}

#[test]
fn out_of_bounds_time_index_is_fatal() {
    let ds = synthetic_dataset(1, 4, 4, 4);
    let err = extract_region(&ds, &Selection::new("t2m").at_time(4), &config(1000)).unwrap_err();
    assert!(matches!(
        err,
        EnsembleError::TimeIndexOutOfBounds { requested: 4, available: 4 }
    ));
}

#[test]
fn out_of_bounds_member_index_is_fatal() {
    let ds = synthetic_dataset(2, 4, 4, 4);
    let err = extract_region(&ds, &Selection::new("t2m").member(5), &config(1000)).unwrap_err();
    assert!(matches!(
        err,
        EnsembleError::MemberIndexOutOfBounds { requested: 5, available: 2 }
    ));
}

#[test]
fn missing_region_parameters_are_fatal() {
    let ds = synthetic_dataset(1, 2, 4, 4);
    let mut sel = Selection::new("t2m").custom_region(1.0, 1.0, 2.0);
    sel.longitude = None;
    let err = extract_region(&ds, &sel, &config(1000)).unwrap_err();
    assert!(matches!(err, EnsembleError::MissingRegionParameter(_)));
}

#[test]
fn unknown_visualization_channel_is_fatal() {
    let ds = synthetic_dataset(1, 2, 4, 4);
    let err = extract_region(&ds, &Selection::new("z500"), &config(1000)).unwrap_err();
    assert!(matches!(err, EnsembleError::UnknownChannel(_)));
}

#[test]
fn neutral_comparison_yields_zero_deltas() {
    let ds = synthetic_dataset(1, 3, 10, 10);
    let sel = Selection::new("t2m").at_time(2);
    let delta: DeltaPayload = compare_runs(&ds, None, &sel, &config(1000)).unwrap();

    assert_eq!(delta.len(), 100);
    assert!(delta.values_delta.iter().all(|&d| d == 0.0));
    assert!(delta.wildfire_risk_delta.iter().all(|&d| d == 0.0));
}

#[test]
fn modulated_comparison_produces_signed_deltas() {
    let baseline = synthetic_dataset(1, 3, 10, 10);
    let modulated = modulated_synthetic_dataset(1, 3, 10, 10, Some((Channel::T2m, 1.1)));
    let sel = Selection::new("t2m").at_time(2);
    let delta = compare_runs(&modulated, Some(&baseline), &sel, &config(1000)).unwrap();

    assert_eq!(delta.len(), 100);
    assert_eq!(delta.values_delta.len(), delta.len());
    // Temperatures are positive Kelvin, so a 1.1 factor warms every cell.
    assert!(delta.values_delta.iter().all(|&d| d > 0.0));
    // Coordinates come from the modulated payload.
    assert_eq!(delta.payload.lons.len(), delta.len());
}

#[test]
fn comparison_across_mismatched_grids_is_fatal() {
    let baseline = synthetic_dataset(1, 3, 10, 10);
    let modulated = synthetic_dataset(1, 3, 12, 12);
    let sel = Selection::new("t2m").at_time(2);
    let err = compare_runs(&modulated, Some(&baseline), &sel, &config(100_000)).unwrap_err();
    assert!(matches!(err, EnsembleError::StructuralMismatch { .. }));
}

#[test]
fn payload_carries_valid_time() {
    let ds = synthetic_dataset(1, 4, 4, 4);
    let payload = extract_region(&ds, &Selection::new("t2m").at_time(2), &config(1000)).unwrap();
    assert_eq!(payload.valid_time, ds.time_at(2));
}
