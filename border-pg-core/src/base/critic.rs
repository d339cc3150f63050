//! Critic.
use crate::record::Record;
use anyhow::Result;

/// A state-value function used as a baseline for advantage estimation.
pub trait Critic<O> {
    /// Returns `V(o)` for each observation; the output has the same length as `obs`.
    fn evaluate(&self, obs: &[O]) -> Result<Vec<f32>>;

    /// Performs a single regression step towards `targets`.
    fn update(&mut self, obs: &[O], targets: &[f32]) -> Result<Record>;
}
