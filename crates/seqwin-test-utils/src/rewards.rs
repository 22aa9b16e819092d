//! Reward fixtures.
//!
//! - [`LastRowDelta`]: sum of the newest row of `next_state` minus that of
//!   `state`.
//! - [`CountingReward`]: constant reward that counts its calls.

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use ndarray::{Array, Axis, RemoveAxis};
use seqwin_core::RewardFn;

/// `sum(next_state[-1]) - sum(state[-1])`, ignoring the action.
///
/// For scalar rows this is the change in the newest value.
#[derive(Clone, Copy, Debug, Default)]
pub struct LastRowDelta;

fn last_row_sum<A, D>(window: &Array<A, D>) -> f64
where
    A: Copy + Into<f64>,
    D: RemoveAxis,
{
    let rows = window.len_of(Axis(0));
    if rows == 0 {
        return 0.0;
    }
    window
        .index_axis(Axis(0), rows - 1)
        .iter()
        .map(|&v| Into::<f64>::into(v))
        .sum()
}

impl<A, D, Act> RewardFn<Array<A, D>, Act> for LastRowDelta
where
    A: Copy + Into<f64>,
    D: RemoveAxis,
{
    fn reward(&self, state: &Array<A, D>, next_state: &Array<A, D>, _action: &Act) -> f64 {
        last_row_sum(next_state) - last_row_sum(state)
    }
}

/// Returns a fixed value and counts how often it was called.
///
/// The counter is shared, so a clone kept by the test observes calls made
/// through the copy moved into an environment.
#[derive(Clone, Debug)]
pub struct CountingReward {
    value: f64,
    calls: Arc<AtomicUsize>,
}

impl CountingReward {
    pub fn new(value: f64) -> Self {
        Self {
            value,
            calls: Arc::new(AtomicUsize::new(0)),
        }
    }

    /// Number of reward evaluations so far, across all clones.
    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

impl<S, Act> RewardFn<S, Act> for CountingReward {
    fn reward(&self, _state: &S, _next_state: &S, _action: &Act) -> f64 {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.value
    }
}
