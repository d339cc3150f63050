//! Actor.
use crate::record::Record;
use anyhow::Result;

/// A stochastic policy trained with policy gradients.
///
/// `O` and `A` are the types of a single observation and a single action.
pub trait Actor<O, A> {
    /// Performs a policy-gradient update on a flattened batch.
    ///
    /// `obs`, `act` and `advantages` have the same length, which is the number of
    /// timesteps in the batch. `advantages[i]` is the weight of the log-likelihood of
    /// `act[i]` given `obs[i]`.
    fn update(&mut self, obs: &[O], act: &[A], advantages: &[f32]) -> Result<Record>;
}
