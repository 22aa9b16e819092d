//! Per-episode counters for a sliding-window environment.
//!
//! [`EpisodeMetrics`] accumulates over the steps since construction or the
//! last reset. Training loops read it from
//! [`WindowEnv::metrics()`](crate::WindowEnv::metrics) when an episode ends.

/// Counters for the current episode.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct EpisodeMetrics {
    /// Successful `step` calls this episode.
    pub steps: u64,
    /// Sum of rewards returned this episode.
    pub cumulative_reward: f64,
    /// Reward from the most recent step, if any.
    pub last_reward: Option<f64>,
}

impl EpisodeMetrics {
    pub(crate) fn record(&mut self, reward: f64) {
        self.steps += 1;
        self.cumulative_reward += reward;
        self.last_reward = Some(reward);
    }

    /// Mean reward per step, or `None` before the first step.
    pub fn mean_reward(&self) -> Option<f64> {
        (self.steps > 0).then(|| self.cumulative_reward / self.steps as f64)
    }
}
