//! Sliding-window environment over a fixed time series.
//!
//! [`WindowEnv`] exposes `lookback` consecutive rows of an observation array
//! as its state and advances that window by `step_size` rows per
//! [`step()`](WindowEnv::step). Rewards come from a caller-supplied
//! [`RewardFn`].
//!
//! # Cursor
//!
//! The window is tracked by two indices that always satisfy
//! `data_index + lookback - 1 == time_index`:
//!
//! - `data_index`: first row of the window (starts at 0);
//! - `time_index`: last row of the window (starts at `lookback - 1`).
//!
//! # Lifecycle
//!
//! The environment is *active* while `next_time()` is `Some` and
//! *exhausted* once the final step has been taken. Stepping an exhausted
//! environment fails with [`ExhaustedError`] and changes nothing;
//! [`reset()`](WindowEnv::reset) returns it to the construction-time state
//! without re-validating or copying the data.
//!
//! # Ownership model
//!
//! `WindowEnv` is [`Send`] but all mutation goes through `&mut self`, so one
//! caller drives an instance at a time. Run one instance per worker when
//! stepping in parallel.

use ndarray::{Array, ArrayView, Axis, Dimension, Slice};
use seqwin_core::{
    EnvError, Environment, ExhaustedError, InvalidInputError, RewardFn, StepResult,
};
use smallvec::SmallVec;
use tracing::{debug, info, warn};

use crate::config::EnvConfig;
use crate::metrics::EpisodeMetrics;
use crate::series::AlignedSeries;

// Compile-time assertion: WindowEnv is Send for Send timestamps and rows.
const _: () = {
    #[allow(dead_code)]
    fn assert_send<T: Send>() {}
    #[allow(dead_code)]
    fn check() {
        assert_send::<WindowEnv<i64, f64, ndarray::Ix2, u8>>();
    }
};

/// Observation shape: `[lookback, row dims...]`.
pub type ObsShape = SmallVec<[usize; 4]>;

// ── Cursor ──────────────────────────────────────────────────────

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
struct Cursor {
    time_index: usize,
    data_index: usize,
}

impl Cursor {
    fn initial(lookback: usize) -> Self {
        Self {
            time_index: lookback - 1,
            data_index: 0,
        }
    }

    fn advanced(self, step_size: usize) -> Self {
        Self {
            time_index: self.time_index + step_size,
            data_index: self.data_index + step_size,
        }
    }
}

/// Owned copy of `lookback` rows starting at `start`.
fn window<A: Clone, D: Dimension>(
    data: &Array<A, D>,
    start: usize,
    lookback: usize,
) -> Array<A, D> {
    data.slice_axis(Axis(0), Slice::from(start..start + lookback))
        .to_owned()
}

// ── WindowEnv ───────────────────────────────────────────────────

/// Sliding-window environment over index-aligned timestamps and rows.
///
/// `T` is the timestamp type, `A` the element type of the observation
/// array, `D` its dimensionality (axis 0 is time) and `Act` the action type
/// passed to the reward function.
///
/// # Example
///
/// ```
/// use ndarray::{arr1, Array1};
/// use seqwin_engine::{EnvConfig, WindowEnv};
///
/// let reward = |s: &Array1<i64>, n: &Array1<i64>, _a: &i32| (n[n.len() - 1] - s[s.len() - 1]) as f64;
/// let mut env = WindowEnv::new(
///     (0..7).collect::<Vec<i64>>(),
///     arr1(&[10, 20, 30, 40, 50, 60, 70]),
///     EnvConfig::default().with_lookback(3),
///     reward,
/// )?;
///
/// let step = env.step(0)?;
/// assert_eq!(step.next_state, arr1(&[20, 30, 40]));
/// assert_eq!(step.reward, 10.0);
/// assert!(!step.done);
/// # Ok::<(), Box<dyn std::error::Error>>(())
/// ```
pub struct WindowEnv<T, A, D: Dimension, Act> {
    timestamps: Vec<T>,
    data: Array<A, D>,
    config: EnvConfig<T>,
    reward_fn: Box<dyn RewardFn<Array<A, D>, Act>>,
    cursor: Cursor,
    current_state: Array<A, D>,
    next_time: Option<T>,
    metrics: EpisodeMetrics,
}

impl<T, A, D, Act> WindowEnv<T, A, D, Act>
where
    T: PartialOrd + Clone + std::fmt::Debug,
    A: Clone,
    D: Dimension,
{
    /// Validate the inputs and build an environment at its initial window.
    ///
    /// Bound filtering is applied to both `timestamps` and `data` before the
    /// length requirement is checked.
    ///
    /// # Errors
    ///
    /// Returns the first failing check, in order: ascending timestamps,
    /// array-like data, equal lengths, non-zero step size, non-zero lookback,
    /// and at least `lookback + step_size` rows left after filtering.
    pub fn new<R>(
        timestamps: Vec<T>,
        data: Array<A, D>,
        config: EnvConfig<T>,
        reward_fn: R,
    ) -> Result<Self, InvalidInputError>
    where
        R: RewardFn<Array<A, D>, Act> + 'static,
    {
        let series = AlignedSeries::new(timestamps, data)?
            .truncate(config.start_bound.as_ref(), config.end_bound.as_ref());
        config.validate()?;
        if series.len() < config.min_series_len() {
            return Err(InvalidInputError::InsufficientData {
                available: series.len(),
                lookback: config.lookback,
                step_size: config.step_size,
            });
        }

        let (timestamps, data) = series.into_parts();
        let cursor = Cursor::initial(config.lookback);
        let current_state = window(&data, cursor.data_index, config.lookback);
        let next_time = timestamps.get(cursor.time_index + config.step_size).cloned();

        info!(
            first = ?timestamps.first(),
            last = ?timestamps.last(),
            rows = timestamps.len(),
            step_size = config.step_size,
            lookback = config.lookback,
            "window environment initialised"
        );
        if config.lookback < config.step_size {
            warn!(
                lookback = config.lookback,
                step_size = config.step_size,
                "lookback is smaller than step_size; rows between windows are never observed"
            );
        }

        Ok(Self {
            timestamps,
            data,
            config,
            reward_fn: Box::new(reward_fn),
            cursor,
            current_state,
            next_time,
            metrics: EpisodeMetrics::default(),
        })
    }

    /// Advance the window by `step_size` rows.
    ///
    /// Computes the next window, scores the transition with the reward
    /// function, then moves the cursor. `done` is `true` when this step
    /// consumed the last full step the series allows; the environment is
    /// exhausted afterwards.
    ///
    /// # Errors
    ///
    /// Returns [`ExhaustedError`] if no step remains. The environment is
    /// not modified.
    pub fn step(&mut self, action: Act) -> Result<StepResult<Array<A, D>>, ExhaustedError> {
        if self.next_time.is_none() {
            return Err(ExhaustedError {
                time_index: self.cursor.time_index,
            });
        }

        let step_size = self.config.step_size;
        let next = self.cursor.advanced(step_size);
        let next_state = window(&self.data, next.data_index, self.config.lookback);
        let reward = self
            .reward_fn
            .reward(&self.current_state, &next_state, &action);
        let done = next.time_index + step_size >= self.timestamps.len();

        self.cursor = next;
        self.current_state = next_state.clone();
        // Never index past the end once done.
        self.next_time = if done {
            None
        } else {
            self.timestamps.get(next.time_index + step_size).cloned()
        };
        self.metrics.record(reward);

        debug!(
            time_index = next.time_index,
            data_index = next.data_index,
            reward,
            done,
            "window environment stepped"
        );

        Ok(StepResult {
            next_state,
            reward,
            done,
        })
    }

    /// Restore the construction-time window and return a view of it.
    ///
    /// Reuses the stored, already filtered series; episode metrics are
    /// cleared. Calling it repeatedly is idempotent.
    pub fn reset(&mut self) -> ArrayView<'_, A, D> {
        let lookback = self.config.lookback;
        self.cursor = Cursor::initial(lookback);
        self.current_state = window(&self.data, self.cursor.data_index, lookback);
        self.next_time = self
            .timestamps
            .get(self.cursor.time_index + self.config.step_size)
            .cloned();
        self.metrics = EpisodeMetrics::default();
        info!(time_index = self.cursor.time_index, "window environment reset");
        self.current_state.view()
    }
}

impl<T, A, D: Dimension, Act> WindowEnv<T, A, D, Act> {
    /// The current window (`lookback` rows).
    pub fn current_state(&self) -> ArrayView<'_, A, D> {
        self.current_state.view()
    }

    /// Index of the last row of the current window.
    pub fn time_index(&self) -> usize {
        self.cursor.time_index
    }

    /// Index of the first row of the current window.
    pub fn data_index(&self) -> usize {
        self.cursor.data_index
    }

    /// Timestamp of the last row of the current window.
    pub fn current_time(&self) -> &T {
        &self.timestamps[self.cursor.time_index]
    }

    /// Timestamp that would end the window after one more step, or `None`
    /// once exhausted.
    pub fn next_time(&self) -> Option<&T> {
        self.next_time.as_ref()
    }

    /// Whether a reset is required before the next step.
    pub fn is_exhausted(&self) -> bool {
        self.next_time.is_none()
    }

    /// Successful steps left before the environment is exhausted.
    pub fn steps_remaining(&self) -> usize {
        (self.timestamps.len() - 1 - self.cursor.time_index) / self.config.step_size
    }

    /// Rows per window.
    pub fn lookback(&self) -> usize {
        self.config.lookback
    }

    /// Rows advanced per step.
    pub fn step_size(&self) -> usize {
        self.config.step_size
    }

    /// The configuration this environment was built with.
    pub fn config(&self) -> &EnvConfig<T> {
        &self.config
    }

    /// The bound-filtered timestamps.
    pub fn timestamps(&self) -> &[T] {
        &self.timestamps
    }

    /// The bound-filtered observation array.
    pub fn data(&self) -> ArrayView<'_, A, D> {
        self.data.view()
    }

    /// Number of rows in the bound-filtered series.
    pub fn series_len(&self) -> usize {
        self.timestamps.len()
    }

    /// Shape of every state window: `[lookback, row dims...]`.
    pub fn observation_shape(&self) -> ObsShape {
        let mut shape = ObsShape::from_slice(self.data.shape());
        shape[0] = self.config.lookback;
        shape
    }

    /// Counters for the current episode.
    pub fn metrics(&self) -> &EpisodeMetrics {
        &self.metrics
    }
}

impl<T, A, D, Act> Environment for WindowEnv<T, A, D, Act>
where
    T: PartialOrd + Clone + std::fmt::Debug,
    A: Clone,
    D: Dimension,
{
    type Observation = Array<A, D>;
    type Action = Act;

    fn step(&mut self, action: Act) -> Result<StepResult<Array<A, D>>, EnvError> {
        WindowEnv::step(self, action).map_err(EnvError::from)
    }

    fn reset(&mut self) -> Array<A, D> {
        WindowEnv::reset(self).to_owned()
    }

    fn is_exhausted(&self) -> bool {
        WindowEnv::is_exhausted(self)
    }
}

impl<T: std::fmt::Debug, A, D: Dimension, Act> std::fmt::Debug for WindowEnv<T, A, D, Act> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("WindowEnv")
            .field("rows", &self.timestamps.len())
            .field("lookback", &self.config.lookback)
            .field("step_size", &self.config.step_size)
            .field("time_index", &self.cursor.time_index)
            .field("data_index", &self.cursor.data_index)
            .field("next_time", &self.next_time)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ndarray::{arr1, arr2, Array1, Array2, Ix1};
    use proptest::prelude::*;

    type ScalarEnv = WindowEnv<i64, i64, Ix1, i32>;

    fn last_delta(s: &Array1<i64>, n: &Array1<i64>, _a: &i32) -> f64 {
        (n[n.len() - 1] - s[s.len() - 1]) as f64
    }

    fn scalar_env(len: usize, lookback: usize, step_size: usize) -> ScalarEnv {
        let timestamps: Vec<i64> = (0..len as i64).collect();
        let data = Array1::from_iter((0..len as i64).map(|i| (i + 1) * 10));
        WindowEnv::new(
            timestamps,
            data,
            EnvConfig::default()
                .with_lookback(lookback)
                .with_step_size(step_size),
            last_delta,
        )
        .unwrap()
    }

    fn assert_cursor_invariant(env: &ScalarEnv) {
        assert_eq!(env.current_state().len(), env.lookback());
        assert_eq!(env.data_index() + env.lookback() - 1, env.time_index());
    }

    // ── Construction ────────────────────────────────────────────

    #[test]
    fn initial_state_matches_first_window() {
        let env = scalar_env(7, 3, 1);
        assert_eq!(env.current_state(), arr1(&[10, 20, 30]));
        assert_eq!(env.time_index(), 2);
        assert_eq!(env.data_index(), 0);
        assert_eq!(*env.current_time(), 2);
        assert_eq!(env.next_time(), Some(&3));
        assert!(!env.is_exhausted());
        assert_eq!(env.steps_remaining(), 4);
    }

    #[test]
    fn default_config_uses_lookback_five() {
        let env: ScalarEnv = WindowEnv::new(
            (0..6).collect(),
            Array1::from_iter(0..6),
            EnvConfig::default(),
            last_delta,
        )
        .unwrap();
        assert_eq!(env.lookback(), 5);
        assert_eq!(env.step_size(), 1);
        assert_eq!(env.steps_remaining(), 1);
    }

    #[test]
    fn rejects_zero_dimensional_data() {
        let err = WindowEnv::new(
            Vec::<i64>::new(),
            ndarray::arr0(1.0),
            EnvConfig::default(),
            |_s: &ndarray::Array0<f64>, _n: &ndarray::Array0<f64>, _a: &()| 0.0,
        )
        .unwrap_err();
        assert_eq!(err, InvalidInputError::NotArrayLike);
    }

    #[test]
    fn insufficient_after_filtering() {
        let err = WindowEnv::new(
            (0..10).collect::<Vec<i64>>(),
            Array1::from_iter(0..10i64),
            EnvConfig::default()
                .with_lookback(3)
                .with_bounds(8, 20),
            last_delta,
        )
        .unwrap_err();
        assert_eq!(
            err,
            InvalidInputError::InsufficientData {
                available: 2,
                lookback: 3,
                step_size: 1
            }
        );
    }

    #[test]
    fn multi_dimensional_rows() {
        let data = arr2(&[[1.0, 2.0], [3.0, 4.0], [5.0, 6.0], [7.0, 8.0]]);
        let mut env = WindowEnv::new(
            vec![0.0, 0.5, 1.0, 1.5],
            data,
            EnvConfig::default().with_lookback(2).with_step_size(2),
            |s: &Array2<f64>, n: &Array2<f64>, a: &f64| (n.sum() - s.sum()) * a,
        )
        .unwrap();
        assert_eq!(env.observation_shape().as_slice(), &[2, 2]);

        let step = env.step(0.5).unwrap();
        assert_eq!(step.next_state, arr2(&[[5.0, 6.0], [7.0, 8.0]]));
        assert_eq!(step.reward, 8.0);
        assert!(step.done);
        assert_eq!(*env.current_time(), 1.5);
    }

    // ── Stepping ────────────────────────────────────────────────

    #[test]
    fn step_after_exhaustion_fails_without_mutation() {
        let mut env = scalar_env(4, 3, 1);
        assert!(env.step(0).unwrap().done);
        let before = (env.time_index(), env.current_state().to_owned());

        let err = env.step(0).unwrap_err();
        assert_eq!(err, ExhaustedError { time_index: 3 });
        assert_eq!((env.time_index(), env.current_state().to_owned()), before);
        assert_eq!(env.metrics().steps, 1);
    }

    #[test]
    fn returned_state_is_independent() {
        let mut env = scalar_env(7, 3, 1);
        let mut step = env.step(0).unwrap();
        step.next_state.fill(-1);
        assert_eq!(env.current_state(), arr1(&[20, 30, 40]));
        assert_eq!(env.data()[1], 20);
    }

    #[test]
    fn reward_sees_action() {
        let mut env = WindowEnv::new(
            (0..4).collect::<Vec<u32>>(),
            arr1(&[1.0, 2.0, 3.0, 4.0]),
            EnvConfig::default().with_lookback(1),
            |_s: &Array1<f64>, _n: &Array1<f64>, a: &String| a.len() as f64,
        )
        .unwrap();
        assert_eq!(env.step("hold".to_string()).unwrap().reward, 4.0);
    }

    #[test]
    fn metrics_track_episode_and_clear_on_reset() {
        let mut env = scalar_env(7, 3, 1);
        env.step(0).unwrap();
        env.step(0).unwrap();
        assert_eq!(env.metrics().steps, 2);
        assert_eq!(env.metrics().cumulative_reward, 20.0);
        env.reset();
        assert_eq!(*env.metrics(), EpisodeMetrics::default());
    }

    #[test]
    fn environment_trait_maps_exhaustion() {
        let mut env = scalar_env(4, 3, 1);
        let e: &mut dyn Environment<Observation = Array1<i64>, Action = i32> = &mut env;
        assert!(e.step(1).unwrap().done);
        assert!(e.is_exhausted());
        assert_eq!(
            e.step(1).unwrap_err(),
            EnvError::Exhausted(ExhaustedError { time_index: 3 })
        );
        assert_eq!(e.reset(), arr1(&[10, 20, 30]));
        assert!(!e.is_exhausted());
    }

    #[test]
    fn debug_omits_reward_fn() {
        let env = scalar_env(7, 3, 1);
        let s = format!("{env:?}");
        assert!(s.contains("time_index: 2"), "{s}");
    }

    // ── Properties ──────────────────────────────────────────────

    proptest! {
        #[test]
        fn cursor_invariant_holds_throughout(
            lookback in 1usize..8,
            step_size in 1usize..5,
            extra in 0usize..20,
        ) {
            let len = lookback + step_size + extra;
            let mut env = scalar_env(len, lookback, step_size);
            assert_cursor_invariant(&env);
            while !env.is_exhausted() {
                env.step(0).unwrap();
                assert_cursor_invariant(&env);
            }
            env.reset();
            assert_cursor_invariant(&env);
        }

        #[test]
        fn step_count_until_done(
            lookback in 1usize..8,
            step_size in 1usize..5,
            extra in 0usize..20,
        ) {
            let len = lookback + step_size + extra;
            let mut env = scalar_env(len, lookback, step_size);
            let expected = (len - lookback) / step_size;
            prop_assert_eq!(env.steps_remaining(), expected);

            let mut steps = 0;
            loop {
                let r = env.step(0).unwrap();
                steps += 1;
                prop_assert_eq!(env.steps_remaining(), expected - steps);
                if r.done {
                    break;
                }
            }
            prop_assert_eq!(steps, expected);
            prop_assert!(env.is_exhausted());
        }

        #[test]
        fn each_step_advances_by_step_size(
            lookback in 1usize..8,
            step_size in 1usize..5,
            extra in 0usize..20,
        ) {
            let len = lookback + step_size + extra;
            let mut env = scalar_env(len, lookback, step_size);
            while !env.is_exhausted() {
                let (t0, d0) = (env.time_index(), env.data_index());
                let r = env.step(0).unwrap();
                prop_assert_eq!(env.time_index(), t0 + step_size);
                prop_assert_eq!(env.data_index(), d0 + step_size);
                prop_assert_eq!(env.current_state(), r.next_state.view());
            }
        }

        #[test]
        fn reset_is_idempotent(
            lookback in 1usize..8,
            step_size in 1usize..5,
            extra in 0usize..20,
            steps_before in 0usize..10,
            resets in 1usize..4,
        ) {
            let len = lookback + step_size + extra;
            let mut env = scalar_env(len, lookback, step_size);
            let initial = (
                env.time_index(),
                env.data_index(),
                env.current_state().to_owned(),
                env.next_time().copied(),
            );
            for _ in 0..steps_before {
                if env.step(0).is_err() {
                    break;
                }
            }
            for _ in 0..resets {
                let view = env.reset().to_owned();
                prop_assert_eq!(&view, &initial.2);
                let now = (
                    env.time_index(),
                    env.data_index(),
                    env.current_state().to_owned(),
                    env.next_time().copied(),
                );
                prop_assert_eq!(&now, &initial);
            }
        }
    }
}
