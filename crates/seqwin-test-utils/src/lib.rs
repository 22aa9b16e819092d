//! Test fixtures for seqwin development.
//!
//! Provides small deterministic series ([`ramp_series`],
//! [`scenario_series`], [`feature_series`]) and reward fixtures in
//! [`rewards`].

#![forbid(unsafe_code)]
#![allow(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]

pub mod rewards;

pub use rewards::{CountingReward, LastRowDelta};

use ndarray::{Array1, Array2};

/// Timestamps `0..len` with scalar rows `10, 20, 30, ...`.
pub fn ramp_series(len: usize) -> (Vec<i64>, Array1<f64>) {
    let timestamps = (0..len as i64).collect();
    let data = Array1::from_iter((1..=len).map(|i| (i * 10) as f64));
    (timestamps, data)
}

/// Seven rows: timestamps `0..=6`, values `10..=70` in steps of 10.
pub fn scenario_series() -> (Vec<i64>, Array1<f64>) {
    ramp_series(7)
}

/// Timestamps `0..len` with `width` features per row; cell `(r, c)` holds
/// `r * width + c`.
pub fn feature_series(len: usize, width: usize) -> (Vec<i64>, Array2<f64>) {
    let timestamps = (0..len as i64).collect();
    let data = Array2::from_shape_fn((len, width), |(r, c)| (r * width + c) as f64);
    (timestamps, data)
}
