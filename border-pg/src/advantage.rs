//! Advantage estimation on flattened batches.
//!
//! All functions take arrays of the same length `N`, laid out as in
//! [`Batch`](border_pg_core::Batch): trajectories are concatenated and
//! `is_terminated[t] == 1` marks the last timestep of each of them.
use border_pg_core::error::PgError;

/// Returns `q_values - values`.
///
/// `values` are baseline predictions `V(o_t)` and are subtracted as they are.
pub fn baseline_advantages(q_values: &[f32], values: &[f32]) -> Result<Vec<f32>, PgError> {
    if q_values.len() != values.len() {
        return Err(PgError::ShapeMismatch(format!(
            "{} baseline values for {} Q-values",
            values.len(),
            q_values.len()
        )));
    }
    Ok(q_values
        .iter()
        .zip(values.iter())
        .map(|(q, v)| q - v)
        .collect())
}

/// Generalized advantage estimation over a concatenated batch.
///
/// With the TD residual
/// `delta_t = r_t + gamma * V(o_t+1) * (1 - is_terminated_t) - V(o_t)`,
/// the advantage is `A_t = delta_t` at a terminal and
/// `A_t = delta_t + gamma * lambda * A_t+1` otherwise.
///
/// The recursion runs backward once over the whole batch. Terminal markers reset it, so
/// an advantage never depends on rewards or values of another trajectory. Past the last
/// index both the lookahead value and the lookahead advantage are 0.
pub fn gae(
    reward: &[f32],
    values: &[f32],
    is_terminated: &[i8],
    gamma: f32,
    lambda: f32,
) -> Result<Vec<f32>, PgError> {
    let n = reward.len();
    if values.len() != n || is_terminated.len() != n {
        return Err(PgError::ShapeMismatch(format!(
            "lengths of reward, values and is_terminated differ: {}, {}, {}",
            n,
            values.len(),
            is_terminated.len()
        )));
    }

    let mut advantages = vec![0f32; n];
    let mut next_value = 0f32;
    let mut next_advantage = 0f32;

    for t in (0..n).rev() {
        advantages[t] = if is_terminated[t] == 1 {
            reward[t] - values[t]
        } else {
            let delta = reward[t] + gamma * next_value - values[t];
            delta + gamma * lambda * next_advantage
        };
        next_value = values[t];
        next_advantage = advantages[t];
    }

    Ok(advantages)
}

/// Returns an error naming the first non-finite element of `xs`.
pub(crate) fn check_finite(name: &str, xs: &[f32]) -> Result<(), PgError> {
    match xs.iter().position(|x| !x.is_finite()) {
        Some(i) => Err(PgError::Numerical(format!(
            "{} at index {} is {}",
            name, i, xs[i]
        ))),
        None => Ok(()),
    }
}
