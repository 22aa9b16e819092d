//! Batched stepping over several independent environments.
//!
//! [`BatchedEnv`] owns N environments (typically one per worker or data
//! slice) and steps them all with one action each. It performs no
//! auto-reset: exhausted members must be reset explicitly with
//! [`reset_env()`](BatchedEnv::reset_env) or [`reset_all()`](BatchedEnv::reset_all).

use seqwin_core::{EnvError, Environment, StepResult};
use thiserror::Error;
use tracing::debug;

// ── Error type ──────────────────────────────────────────────────

/// Error from a batched operation, annotated with the failing env index.
#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum BatchError {
    /// An environment was exhausted before the batch step began; no
    /// environment was stepped.
    #[error("env {env_index} is exhausted, reset it before stepping the batch")]
    Exhausted {
        /// Index of the first exhausted environment (0-based).
        env_index: usize,
    },
    /// An environment's `step()` failed.
    #[error("env {env_index}: step failed: {source}")]
    Step {
        /// Index of the environment that failed (0-based).
        env_index: usize,
        /// The underlying environment error.
        #[source]
        source: EnvError,
    },
    /// Environment index out of bounds.
    #[error("env index {env_index} out of range (num_envs={num_envs})")]
    InvalidIndex {
        /// The requested index.
        env_index: usize,
        /// Total number of environments.
        num_envs: usize,
    },
    /// Batch-level argument validation failed.
    #[error("invalid argument: {reason}")]
    InvalidArgument {
        /// Human-readable description of what's wrong.
        reason: String,
    },
}

// ── BatchedEnv ──────────────────────────────────────────────────

/// A fixed set of environments stepped together.
pub struct BatchedEnv<E> {
    envs: Vec<E>,
}

impl<E: Environment> BatchedEnv<E> {
    /// Wrap a non-empty set of environments.
    ///
    /// # Errors
    ///
    /// Returns [`BatchError::InvalidArgument`] if `envs` is empty.
    pub fn new(envs: Vec<E>) -> Result<Self, BatchError> {
        if envs.is_empty() {
            return Err(BatchError::InvalidArgument {
                reason: "BatchedEnv requires at least one environment".into(),
            });
        }
        Ok(Self { envs })
    }

    /// Step every environment with its own action.
    ///
    /// All members are checked for exhaustion before any is stepped, so a
    /// rejected batch leaves every environment untouched.
    ///
    /// # Errors
    ///
    /// [`BatchError::InvalidArgument`] if `actions.len()` differs from
    /// [`num_envs()`](Self::num_envs), [`BatchError::Exhausted`] for the
    /// first exhausted member, or [`BatchError::Step`] if a member fails.
    pub fn step_all(
        &mut self,
        actions: Vec<E::Action>,
    ) -> Result<Vec<StepResult<E::Observation>>, BatchError> {
        if actions.len() != self.envs.len() {
            return Err(BatchError::InvalidArgument {
                reason: format!(
                    "got {} actions for {} environments",
                    actions.len(),
                    self.envs.len()
                ),
            });
        }
        if let Some(env_index) = self.envs.iter().position(|e| e.is_exhausted()) {
            return Err(BatchError::Exhausted { env_index });
        }

        let mut results = Vec::with_capacity(self.envs.len());
        for (env_index, (env, action)) in self.envs.iter_mut().zip(actions).enumerate() {
            let result = env
                .step(action)
                .map_err(|source| BatchError::Step { env_index, source })?;
            results.push(result);
        }
        debug!(
            num_envs = self.envs.len(),
            done = results.iter().filter(|r| r.done).count(),
            "batch stepped"
        );
        Ok(results)
    }

    /// Reset every environment and return the initial observations.
    pub fn reset_all(&mut self) -> Vec<E::Observation> {
        self.envs.iter_mut().map(|e| e.reset()).collect()
    }

    /// Reset a single environment and return its initial observation.
    ///
    /// # Errors
    ///
    /// Returns [`BatchError::InvalidIndex`] if `env_index` is out of range.
    pub fn reset_env(&mut self, env_index: usize) -> Result<E::Observation, BatchError> {
        let num_envs = self.envs.len();
        self.envs
            .get_mut(env_index)
            .map(|e| e.reset())
            .ok_or(BatchError::InvalidIndex {
                env_index,
                num_envs,
            })
    }

    /// Exhaustion flag per environment.
    pub fn exhausted(&self) -> Vec<bool> {
        self.envs.iter().map(|e| e.is_exhausted()).collect()
    }

    /// Whether every environment is exhausted.
    pub fn all_exhausted(&self) -> bool {
        self.envs.iter().all(|e| e.is_exhausted())
    }
}

impl<E> BatchedEnv<E> {
    /// Number of environments in the batch.
    pub fn num_envs(&self) -> usize {
        self.envs.len()
    }

    /// Borrow one environment.
    pub fn env(&self, env_index: usize) -> Option<&E> {
        self.envs.get(env_index)
    }

    /// Iterate over the environments in index order.
    pub fn iter(&self) -> std::slice::Iter<'_, E> {
        self.envs.iter()
    }

    /// Take back ownership of the environments.
    pub fn into_inner(self) -> Vec<E> {
        self.envs
    }
}

impl<E: std::fmt::Debug> std::fmt::Debug for BatchedEnv<E> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("BatchedEnv")
            .field("num_envs", &self.envs.len())
            .field("envs", &self.envs)
            .finish()
    }
}
