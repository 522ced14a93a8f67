//! Map-ready payload preparation for ensemble wildfire-risk visualization.
//!
//! This crate turns a multi-member, multi-timestep gridded dataset into a
//! lightweight payload for client-side map rendering:
//!
//! ```text
//! EnsembleDataset
//!      │
//!      ▼
//! extract_region(dataset, selection, config)
//!      │
//!      ├─► validate time/member indices
//!      ├─► slice visualized channel (K → °C for t2m)
//!      ├─► build trailing averaging window
//!      ├─► apply rectangular region mask (country/custom modes)
//!      ├─► average the four risk channels, estimate wildfire risk
//!      └─► flatten + stride-downsample to the point budget
//!               │
//!               ▼
//!          MapPayload ──► compose_deltas(modulated, unmodulated)
//!                              │
//!                              ▼
//!                         DeltaPayload
//! ```
//!
//! [`compare_runs`] orchestrates the two-pass (modulated vs. baseline) flow
//! and is the entry point callers should reach for.

pub mod compare;
pub mod config;
pub mod delta;
pub mod extract;
pub mod payload;
pub mod risk;
pub mod sample;

// Re-export commonly used items at the crate root
pub use compare::{compare_runs, Modulation};
pub use config::{PipelineConfig, SampleStrategy};
pub use delta::{compose_deltas, DeltaPayload};
pub use extract::extract_region;
pub use payload::MapPayload;
pub use risk::wildfire_risk;
