//! Sliding-window environment engine for seqwin.
//!
//! [`WindowEnv`] is the primary user-facing type: it validates a time series
//! and its observation array once, then exposes a `lookback`-row window that
//! [`step()`](WindowEnv::step) advances by `step_size` rows until the data
//! runs out. [`BatchedEnv`] steps several environments together.
//!
//! Construction parameters live in [`EnvConfig`]; the predicates used to
//! validate inputs are exposed in [`series`].

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![forbid(unsafe_code)]

pub mod batched;
pub mod config;
pub mod metrics;
pub mod series;
pub mod window;

pub use batched::{BatchError, BatchedEnv};
pub use config::{EnvConfig, DEFAULT_LOOKBACK, DEFAULT_STEP_SIZE};
pub use metrics::EpisodeMetrics;
pub use window::{ObsShape, WindowEnv};
