//! End-to-end demo: build a synthetic modulated/baseline dataset pair,
//! run the comparison pipeline, and print the delta payload as JSON.
//!
//! Run with: `cargo run --example compare_demo`

use anyhow::Result;
use ensemble_grid::channel::Channel;
use tracing::info;
use ensemble_grid::Selection;
use risk_pipeline::{compare_runs, Modulation, PipelineConfig};
use test_utils::{modulated_synthetic_dataset, synthetic_dataset};

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "risk_pipeline=debug".into()),
        )
        .init();

    let modulation = Modulation::new("t2m", 1.2);
    let baseline = synthetic_dataset(4, 14, 60, 90);
    let modulated =
        modulated_synthetic_dataset(4, 14, 60, 90, Some((Channel::T2m, modulation.factor as f32)));

    let selection = Selection::new("t2m")
        .member(1)
        .at_time(10)
        .country_region("Kenya", 8.0);
    let config = PipelineConfig::from_env();

    info!(modulation = %modulation, "comparing modulated run against baseline");
    let baseline_ref = (!modulation.is_neutral()).then_some(&baseline);
    let delta = compare_runs(&modulated, baseline_ref, &selection, &config)?;

    println!(
        "{} points, first risk delta {:?}",
        delta.len(),
        delta.wildfire_risk_delta.first()
    );
    println!("{}", serde_json::to_string_pretty(&delta)?);
    Ok(())
}
