//! seqwin: sliding-window time-series environments for reinforcement learning.
//!
//! This is the top-level facade crate that re-exports the public API from the
//! seqwin sub-crates. For most users, adding `seqwin` as a single dependency
//! is sufficient.
//!
//! # Quick start
//!
//! ```rust
//! use seqwin::prelude::*;
//! use seqwin::ndarray::{arr1, Array1};
//!
//! // Reward the change in the newest price, scaled by the position taken.
//! let reward = |s: &Array1<f64>, n: &Array1<f64>, position: &f64| {
//!     (n[n.len() - 1] - s[s.len() - 1]) * position
//! };
//!
//! let timestamps: Vec<i64> = (0..7).collect();
//! let prices = arr1(&[10.0, 20.0, 30.0, 40.0, 50.0, 60.0, 70.0]);
//! let config = EnvConfig::default().with_bounds(2, 5).with_lookback(3);
//! let mut env = WindowEnv::new(timestamps, prices, config, reward).unwrap();
//!
//! assert_eq!(env.current_state(), arr1(&[30.0, 40.0, 50.0]));
//! let (next_state, reward, done) = env.step(1.0).unwrap().into_parts();
//! assert_eq!(next_state, arr1(&[40.0, 50.0, 60.0]));
//! assert_eq!(reward, 10.0);
//! assert!(done);
//!
//! assert!(env.step(1.0).is_err());
//! env.reset();
//! assert!(!env.is_exhausted());
//! ```
//!
//! # Modules
//!
//! | Module | Sub-crate | Contents |
//! |--------|-----------|----------|
//! | [`types`] | `seqwin-core` | Errors, `StepResult`, `RewardFn` and `Environment` traits |
//! | [`engine`] | `seqwin-engine` | `WindowEnv`, `EnvConfig`, `BatchedEnv`, series validation |

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![forbid(unsafe_code)]

/// Core types and traits (`seqwin-core`).
///
/// Contains the error taxonomy ([`types::InvalidInputError`],
/// [`types::ExhaustedError`], [`types::EnvError`]) and the
/// [`types::RewardFn`] and [`types::Environment`] traits.
pub use seqwin_core as types;

/// Environment engine (`seqwin-engine`).
///
/// [`engine::WindowEnv`] for a single series, [`engine::BatchedEnv`] for
/// stepping several environments together.
pub use seqwin_engine as engine;

/// The `ndarray` version observations are expressed in.
pub use ndarray;

/// Common imports for typical seqwin usage.
///
/// ```rust
/// use seqwin::prelude::*;
/// ```
pub mod prelude {
    // Core types and traits
    pub use seqwin_core::{Environment, RewardFn, StepResult};

    // Errors
    pub use seqwin_core::{EnvError, ExhaustedError, InvalidInputError};

    // Engine
    pub use seqwin_engine::{BatchError, BatchedEnv, EnvConfig, EpisodeMetrics, WindowEnv};
}
