//! Error types for seqwin environments.
//!
//! Split by lifecycle phase: [`InvalidInputError`] is raised while an
//! environment is being constructed, [`ExhaustedError`] while it is being
//! stepped. [`EnvError`] unifies both for generic callers such as batched
//! runners.

use thiserror::Error;

/// Malformed or inconsistent constructor arguments.
///
/// Every variant is fatal to the constructor call; no partially
/// initialized environment is ever returned.
#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum InvalidInputError {
    /// `timestamps[index] > timestamps[index + 1]` (or the pair is not
    /// comparable, e.g. a NaN float).
    #[error("timestamps must be ascending: entry {index} is greater than entry {next}", next = .index + 1)]
    NotAscending {
        /// Index of the first element of the offending pair.
        index: usize,
    },
    /// The observation array has no axes, so it has no rows to align with
    /// the time series.
    #[error("data must be array-like with at least one axis, got a 0-dimensional array")]
    NotArrayLike,
    /// The time series and the observation array disagree on length.
    #[error("there must be just as many timestamps as data rows: {timestamps} timestamps, {rows} rows")]
    LengthMismatch {
        /// Number of timestamps supplied.
        timestamps: usize,
        /// Number of rows along axis 0 of the observation array.
        rows: usize,
    },
    /// `step_size` was zero.
    #[error("step_size must be 1 or greater")]
    ZeroStepSize,
    /// `lookback` was zero.
    #[error("lookback must be 1 or greater")]
    ZeroLookback,
    /// After bound filtering there is no room for one full step from the
    /// initial window.
    #[error(
        "not enough timesteps: {available} available, lookback {lookback} + step_size {step_size} required"
    )]
    InsufficientData {
        /// Rows left after bound filtering.
        available: usize,
        /// Configured lookback.
        lookback: usize,
        /// Configured step size.
        step_size: usize,
    },
}

/// `step` was called after the environment ran out of data.
///
/// The environment is left unchanged; call `reset` before stepping again.
#[derive(Clone, Debug, PartialEq, Eq, Error)]
#[error("no more steps left in environment at time index {time_index}, please reset")]
pub struct ExhaustedError {
    /// Time index of the final window.
    pub time_index: usize,
}

/// Any error an environment can produce.
#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum EnvError {
    /// Construction failed.
    #[error(transparent)]
    InvalidInput(#[from] InvalidInputError),
    /// Stepping failed because the environment is exhausted.
    #[error(transparent)]
    Exhausted(#[from] ExhaustedError),
}
