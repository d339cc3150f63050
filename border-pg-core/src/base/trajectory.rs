//! Trajectory.
use crate::error::PgError;

/// A single episode `(o_t, a_t, r_t)` for `t = 0..T`.
///
/// The last timestep is implicitly terminal. All fields must have the same length,
/// which must be at least 1; this is checked by [`Trajectory::validate`] and when
/// trajectories are flattened into a [`Batch`](crate::Batch).
#[derive(Clone, Debug, PartialEq)]
pub struct Trajectory<O, A> {
    /// Observations.
    pub obs: Vec<O>,

    /// Actions.
    pub act: Vec<A>,

    /// Rewards.
    pub reward: Vec<f32>,
}

impl<O, A> Trajectory<O, A> {
    /// Creates a trajectory. Lengths are not checked here.
    pub fn new(obs: Vec<O>, act: Vec<A>, reward: Vec<f32>) -> Self {
        Self { obs, act, reward }
    }

    /// Returns the number of timesteps, taken from the rewards.
    pub fn len(&self) -> usize {
        self.reward.len()
    }

    /// Returns `true` if there is no timestep.
    pub fn is_empty(&self) -> bool {
        self.reward.is_empty()
    }

    /// Sum of undiscounted rewards.
    pub fn total_reward(&self) -> f32 {
        self.reward.iter().sum()
    }

    /// Checks that the trajectory is non-empty and its fields share the same length,
    /// returning the length.
    pub fn validate(&self) -> Result<usize, PgError> {
        self.check().map_err(PgError::ShapeMismatch)
    }

    pub(crate) fn check(&self) -> Result<usize, String> {
        let len = self.reward.len();
        if len == 0 {
            return Err("trajectory has no timestep".to_string());
        }
        if self.obs.len() != len || self.act.len() != len {
            return Err(format!(
                "lengths of obs, act and reward differ: {}, {}, {}",
                self.obs.len(),
                self.act.len(),
                len
            ));
        }
        Ok(len)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate() {
        let tr = Trajectory::new(vec![vec![0f32]; 3], vec![0usize; 3], vec![1.0, 2.0, 3.0]);
        assert_eq!(tr.validate(), Ok(3));
        assert_eq!(tr.total_reward(), 6.0);

        let tr = Trajectory::new(vec![vec![0f32]; 2], vec![0usize; 3], vec![1.0, 2.0, 3.0]);
        assert!(matches!(tr.validate(), Err(PgError::ShapeMismatch(_))));

        let tr: Trajectory<Vec<f32>, usize> = Trajectory::new(vec![], vec![], vec![]);
        assert!(tr.is_empty());
        assert!(matches!(tr.validate(), Err(PgError::ShapeMismatch(_))));
    }
}
