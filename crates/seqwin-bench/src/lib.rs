//! Benchmark profiles for seqwin environments.
//!
//! Provides seeded synthetic series and pre-built environments:
//!
//! - [`random_walk`]: deterministic random-walk prices with `features` columns
//! - [`reference_profile`]: 10K rows x 8 features, lookback 32
//! - [`stress_profile`]: 1M rows x 8 features, lookback 256
//! - [`batch_profile`]: N reference environments over disjoint time bounds

#![forbid(unsafe_code)]
#![deny(rustdoc::broken_intra_doc_links)]

use ndarray::{Array2, Ix2};
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use seqwin_core::InvalidInputError;
use seqwin_engine::{BatchError, BatchedEnv, EnvConfig, WindowEnv};

/// Environment type used by every profile: integer timestamps, `f64`
/// feature rows and a scalar `f64` action.
pub type BenchEnv = WindowEnv<i64, f64, Ix2, f64>;

/// Generate `len` rows of a seeded random walk.
///
/// Column 0 is the walk itself (starting at 100, increments uniform in
/// `[-1, 1)`); the remaining columns are independent uniform noise in
/// `[0, 1)`. Timestamps are `0..len`.
pub fn random_walk(len: usize, features: usize, seed: u64) -> (Vec<i64>, Array2<f64>) {
    let mut rng = ChaCha8Rng::seed_from_u64(seed);
    let mut data = Array2::zeros((len, features.max(1)));
    let mut level = 100.0;
    for mut row in data.rows_mut() {
        level += rng.random_range(-1.0..1.0);
        row[0] = level;
        for cell in row.iter_mut().skip(1) {
            *cell = rng.random::<f64>();
        }
    }
    ((0..len as i64).collect(), data)
}

/// Position-weighted change of the walk column between the newest rows.
pub fn pnl_reward(state: &Array2<f64>, next_state: &Array2<f64>, action: &f64) -> f64 {
    let last = |w: &Array2<f64>| w[[w.nrows() - 1, 0]];
    (last(next_state) - last(state)) * action
}

/// Build a reference environment: 10K rows, 8 features, lookback 32.
///
/// # Errors
///
/// Propagates construction errors (none for a valid seed).
pub fn reference_profile(seed: u64) -> Result<BenchEnv, InvalidInputError> {
    let (timestamps, data) = random_walk(10_000, 8, seed);
    WindowEnv::new(
        timestamps,
        data,
        EnvConfig::default().with_lookback(32),
        pnl_reward,
    )
}

/// Build a stress environment: 1M rows, 8 features, lookback 256.
///
/// # Errors
///
/// Propagates construction errors (none for a valid seed).
pub fn stress_profile(seed: u64) -> Result<BenchEnv, InvalidInputError> {
    let (timestamps, data) = random_walk(1_000_000, 8, seed);
    WindowEnv::new(
        timestamps,
        data,
        EnvConfig::default().with_lookback(256),
        pnl_reward,
    )
}

/// Build `n` environments over one shared series, each restricted to its
/// own 1K-row slice via time bounds.
///
/// # Errors
///
/// [`BatchError::InvalidArgument`] if `n == 0`; construction failures are
/// reported as [`BatchError::Step`] with the failing slice index.
pub fn batch_profile(n: usize, seed: u64) -> Result<BatchedEnv<BenchEnv>, BatchError> {
    const SLICE: i64 = 1_000;
    let (timestamps, data) = random_walk(SLICE as usize * n, 8, seed);
    let envs = (0..n)
        .map(|env_index| {
            let start = env_index as i64 * SLICE;
            WindowEnv::new(
                timestamps.clone(),
                data.clone(),
                EnvConfig::default()
                    .with_bounds(start, start + SLICE - 1)
                    .with_lookback(32),
                pnl_reward,
            )
            .map_err(|e| BatchError::Step {
                env_index,
                source: e.into(),
            })
        })
        .collect::<Result<Vec<_>, _>>()?;
    BatchedEnv::new(envs)
}
