//! Monte-Carlo estimation of Q-values.
use border_pg_core::error::PgError;
use serde::{Deserialize, Serialize};

/// How Q-values are computed from the rewards of a trajectory.
#[derive(Clone, Copy, Debug, Deserialize, Serialize, PartialEq, Eq)]
pub enum QValueMode {
    /// Every timestep gets the discounted return of the whole trajectory,
    /// `sum_{t'=0}^{T-1} gamma^t' r_t'`.
    FullReturn,

    /// Each timestep gets the discounted reward-to-go,
    /// `sum_{t'=t}^{T-1} gamma^(t'-t) r_t'`.
    RewardToGo,
}

impl Default for QValueMode {
    fn default() -> Self {
        Self::RewardToGo
    }
}

impl QValueMode {
    /// Computes Q-values of a single trajectory.
    ///
    /// The output has the same length as `reward`.
    pub fn q_values(&self, reward: &[f32], gamma: f32) -> Result<Vec<f32>, PgError> {
        let q = match self {
            Self::FullReturn => vec![discounted_return(reward, gamma); reward.len()],
            Self::RewardToGo => discounted_reward_to_go(reward, gamma),
        };

        match q.iter().position(|v| !v.is_finite()) {
            Some(t) => Err(PgError::Numerical(format!(
                "Q-value at timestep {} is {} ({:?}, gamma = {})",
                t, q[t], self, gamma
            ))),
            None => Ok(q),
        }
    }
}

/// Returns `sum_{t=0}^{T-1} gamma^t r_t`.
pub fn discounted_return(reward: &[f32], gamma: f32) -> f32 {
    let mut discount = 1f32;
    let mut sum = 0f32;
    for r in reward.iter() {
        sum += discount * r;
        discount *= gamma;
    }
    sum
}

/// Returns the discounted reward-to-go at each timestep.
pub fn discounted_reward_to_go(reward: &[f32], gamma: f32) -> Vec<f32> {
    let mut q = vec![0f32; reward.len()];
    let mut cumulative = 0f32;
    for t in (0..reward.len()).rev() {
        cumulative = reward[t] + gamma * cumulative;
        q[t] = cumulative;
    }
    q
}

#[cfg(test)]
mod tests {
    use super::*;

    fn assert_close(a: &[f32], b: &[f32]) {
        assert_eq!(a.len(), b.len());
        for (x, y) in a.iter().zip(b.iter()) {
            assert!((x - y).abs() < 1e-4, "{:?} != {:?}", a, b);
        }
    }

    #[test]
    fn test_full_return_of_constant_reward() {
        let (r, gamma, n) = (2f32, 0.9f32, 10);
        let q = QValueMode::FullReturn
            .q_values(&vec![r; n], gamma)
            .unwrap();
        let expected = r * (1.0 - gamma.powi(n as i32)) / (1.0 - gamma);
        assert_close(&q, &vec![expected; n]);
    }

    #[test]
    fn test_reward_to_go() {
        let q = QValueMode::RewardToGo.q_values(&[1.0, 1.0], 0.9).unwrap();
        assert_close(&q, &[1.9, 1.0]);

        let q = QValueMode::RewardToGo.q_values(&[-3.5], 0.5).unwrap();
        assert_eq!(q, vec![-3.5]);
    }

    #[test]
    fn test_reward_to_go_at_start_is_full_return() {
        let reward = [0.5, -1.0, 2.0, 0.0, 3.0];
        let gamma = 0.95;
        let rtg = QValueMode::RewardToGo.q_values(&reward, gamma).unwrap();
        let full = QValueMode::FullReturn.q_values(&reward, gamma).unwrap();
        assert!((rtg[0] - full[0]).abs() < 1e-5);
        assert!(full.iter().all(|&v| v == full[0]));
    }

    #[test]
    fn test_non_finite_q_values() {
        let reward = [f32::MAX, f32::MAX];
        assert!(matches!(
            QValueMode::RewardToGo.q_values(&reward, 1.0),
            Err(PgError::Numerical(_))
        ));
        assert!(matches!(
            QValueMode::FullReturn.q_values(&reward, 1.0),
            Err(PgError::Numerical(_))
        ));
    }
}
