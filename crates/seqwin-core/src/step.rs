//! The [`StepResult`] returned by every environment step.

/// Outcome of one successful environment step.
///
/// `next_state` is owned by the caller; mutating it never affects the
/// environment that produced it.
#[derive(Clone, Debug, PartialEq)]
pub struct StepResult<O> {
    /// Observation window after the step.
    pub next_state: O,
    /// Value returned by the reward function for this transition.
    pub reward: f64,
    /// `true` when no further step is possible without a reset.
    pub done: bool,
}

impl<O> StepResult<O> {
    /// Split into the conventional `(next_state, reward, done)` tuple.
    pub fn into_parts(self) -> (O, f64, bool) {
        (self.next_state, self.reward, self.done)
    }
}

impl<O> From<StepResult<O>> for (O, f64, bool) {
    fn from(result: StepResult<O>) -> Self {
        result.into_parts()
    }
}
