//! Extension points: reward functions and the environment contract.

use crate::error::EnvError;
use crate::step::StepResult;

/// Scores a transition from `state` to `next_state` under `action`.
///
/// Reward functions must be pure: same inputs, same output. Any
/// `Fn(&S, &S, &Act) -> f64 + Send` closure implements this trait, so most
/// callers never name it:
///
/// ```
/// use seqwin_core::RewardFn;
///
/// let delta = |s: &Vec<f64>, n: &Vec<f64>, _a: &u8| n[n.len() - 1] - s[s.len() - 1];
/// assert_eq!(delta.reward(&vec![1.0, 2.0], &vec![2.0, 5.0], &0), 3.0);
/// ```
///
/// # Object safety
///
/// This trait is object-safe; environments store it as
/// `Box<dyn RewardFn<S, Act>>`.
pub trait RewardFn<S, Act>: Send {
    /// Compute the reward for one transition.
    fn reward(&self, state: &S, next_state: &S, action: &Act) -> f64;
}

impl<S, Act, F> RewardFn<S, Act> for F
where
    F: Fn(&S, &S, &Act) -> f64 + Send,
{
    fn reward(&self, state: &S, next_state: &S, action: &Act) -> f64 {
        self(state, next_state, action)
    }
}

/// The step/reset contract shared by every seqwin environment.
///
/// An environment is either *active* (steps remain) or *exhausted*.
/// [`step`](Environment::step) is the only way to advance;
/// [`reset`](Environment::reset) is the only way back to the initial state.
pub trait Environment {
    /// Observation type produced by `step` and `reset`.
    type Observation;
    /// Action type consumed by `step`.
    type Action;

    /// Advance the environment by one step.
    ///
    /// # Errors
    ///
    /// Returns [`EnvError::Exhausted`] if no step remains. The environment
    /// is left unchanged in that case.
    fn step(&mut self, action: Self::Action) -> Result<StepResult<Self::Observation>, EnvError>;

    /// Restore the initial state and return a copy of the initial observation.
    fn reset(&mut self) -> Self::Observation;

    /// Whether a reset is required before the next step.
    fn is_exhausted(&self) -> bool;
}

#[cfg(test)]
mod tests {
    use super::*;

    struct Constant(f64);

    impl RewardFn<u32, ()> for Constant {
        fn reward(&self, _state: &u32, _next_state: &u32, _action: &()) -> f64 {
            self.0
        }
    }

    #[test]
    fn closures_are_reward_fns() {
        let f = |s: &i64, n: &i64, a: &i64| (n - s + a) as f64;
        let boxed: Box<dyn RewardFn<i64, i64>> = Box::new(f);
        assert_eq!(boxed.reward(&1, &4, &2), 5.0);
    }

    #[test]
    fn structs_are_reward_fns() {
        let boxed: Box<dyn RewardFn<u32, ()>> = Box::new(Constant(-1.0));
        assert_eq!(boxed.reward(&0, &1, &()), -1.0);
    }
}
