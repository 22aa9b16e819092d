//! Environment configuration and its validation.
//!
//! [`EnvConfig`] is the builder-input for a [`WindowEnv`](crate::WindowEnv).
//! [`validate()`](EnvConfig::validate) checks the parameters that can be
//! judged without looking at the data; the constructor runs it and then
//! checks the parameters against the bound-filtered series.

use seqwin_core::InvalidInputError;

/// Default number of timesteps advanced per `step`.
pub const DEFAULT_STEP_SIZE: usize = 1;

/// Default number of rows in a state window.
pub const DEFAULT_LOOKBACK: usize = 5;

// ── EnvConfig ──────────────────────────────────────────────────────

/// Construction parameters for a sliding-window environment.
///
/// Bounds share the timestamp type `T` and are inclusive: a row is kept
/// when `start_bound <= timestamp <= end_bound`.
///
/// ```
/// use seqwin_engine::EnvConfig;
///
/// let config = EnvConfig::default()
///     .with_bounds(2, 5)
///     .with_lookback(3);
/// assert_eq!(config.step_size, 1);
/// assert!(config.validate().is_ok());
/// ```
#[derive(Clone, Debug, PartialEq)]
pub struct EnvConfig<T> {
    /// Drop rows whose timestamp is below this value.
    pub start_bound: Option<T>,
    /// Drop rows whose timestamp is above this value. Applied after
    /// `start_bound`.
    pub end_bound: Option<T>,
    /// Timesteps advanced per `step`. Must be >= 1. Default: 1.
    pub step_size: usize,
    /// Rows per state window. Must be >= 1. Default: 5.
    pub lookback: usize,
}

impl<T> Default for EnvConfig<T> {
    fn default() -> Self {
        Self {
            start_bound: None,
            end_bound: None,
            step_size: DEFAULT_STEP_SIZE,
            lookback: DEFAULT_LOOKBACK,
        }
    }
}

impl<T> EnvConfig<T> {
    /// Set the step size.
    pub fn with_step_size(mut self, step_size: usize) -> Self {
        self.step_size = step_size;
        self
    }

    /// Set the lookback.
    pub fn with_lookback(mut self, lookback: usize) -> Self {
        self.lookback = lookback;
        self
    }

    /// Set the inclusive lower timestamp bound.
    pub fn with_start_bound(mut self, start: T) -> Self {
        self.start_bound = Some(start);
        self
    }

    /// Set the inclusive upper timestamp bound.
    pub fn with_end_bound(mut self, end: T) -> Self {
        self.end_bound = Some(end);
        self
    }

    /// Set both inclusive bounds.
    pub fn with_bounds(self, start: T, end: T) -> Self {
        self.with_start_bound(start).with_end_bound(end)
    }

    /// Smallest series length that allows one full step from the initial
    /// window (`lookback + step_size`, saturating).
    pub fn min_series_len(&self) -> usize {
        self.lookback.saturating_add(self.step_size)
    }

    /// Check the data-independent parameters.
    ///
    /// # Errors
    ///
    /// [`InvalidInputError::ZeroStepSize`] or
    /// [`InvalidInputError::ZeroLookback`], checked in that order.
    pub fn validate(&self) -> Result<(), InvalidInputError> {
        if self.step_size == 0 {
            return Err(InvalidInputError::ZeroStepSize);
        }
        if self.lookback == 0 {
            return Err(InvalidInputError::ZeroLookback);
        }
        Ok(())
    }
}
