//! Batch.
use super::Trajectory;
use crate::error::PgError;
use log::trace;
use std::ops::Range;

/// Trajectories flattened into index-aligned arrays.
///
/// All arrays have the same length `N`, the total number of timesteps.
/// `is_terminated[i] == 1` marks the last timestep of a trajectory and the last element
/// is always a terminal, so the markers split the arrays into contiguous segments, one
/// per trajectory, in the order the trajectories were given.
#[derive(Clone, Debug, PartialEq)]
pub struct Batch<O, A> {
    obs: Vec<O>,
    act: Vec<A>,
    reward: Vec<f32>,
    is_terminated: Vec<i8>,
    q_values: Vec<f32>,
}

impl<O, A> Batch<O, A> {
    /// Flattens trajectories together with their per-timestep Q-values.
    ///
    /// `q_values[i]` must have the same length as `trajectories[i]`.
    pub fn build(
        trajectories: Vec<Trajectory<O, A>>,
        q_values: Vec<Vec<f32>>,
    ) -> Result<Self, PgError> {
        if trajectories.is_empty() {
            return Err(PgError::ShapeMismatch("no trajectory in batch".to_string()));
        }
        if q_values.len() != trajectories.len() {
            return Err(PgError::ShapeMismatch(format!(
                "{} Q-value sequences for {} trajectories",
                q_values.len(),
                trajectories.len()
            )));
        }

        let mut n = 0;
        for (i, (tr, q)) in trajectories.iter().zip(q_values.iter()).enumerate() {
            let len = tr
                .check()
                .map_err(|e| PgError::ShapeMismatch(format!("trajectory {}: {}", i, e)))?;
            if q.len() != len {
                return Err(PgError::ShapeMismatch(format!(
                    "trajectory {}: {} Q-values for {} timesteps",
                    i,
                    q.len(),
                    len
                )));
            }
            n += len;
        }

        let mut batch = Self {
            obs: Vec::with_capacity(n),
            act: Vec::with_capacity(n),
            reward: Vec::with_capacity(n),
            is_terminated: Vec::with_capacity(n),
            q_values: Vec::with_capacity(n),
        };
        for (tr, q) in trajectories.into_iter().zip(q_values) {
            let len = tr.len();
            batch.obs.extend(tr.obs);
            batch.act.extend(tr.act);
            batch.reward.extend(tr.reward);
            batch.is_terminated.extend((0..len).map(|t| (t + 1 == len) as i8));
            batch.q_values.extend(q);
        }
        trace!(
            "Flattened {} trajectories into {} timesteps",
            batch.n_trajectories(),
            n
        );

        Ok(batch)
    }

    /// Builds a batch from arrays that are already flat.
    ///
    /// Terminal markers must be 0 or 1 and the last one must be 1.
    pub fn from_flat(
        obs: Vec<O>,
        act: Vec<A>,
        reward: Vec<f32>,
        is_terminated: Vec<i8>,
        q_values: Vec<f32>,
    ) -> Result<Self, PgError> {
        let n = reward.len();
        if n == 0 {
            return Err(PgError::ShapeMismatch("no timestep in batch".to_string()));
        }
        if obs.len() != n || act.len() != n || is_terminated.len() != n || q_values.len() != n {
            return Err(PgError::ShapeMismatch(format!(
                "lengths of obs, act, reward, is_terminated and q_values differ: {}, {}, {}, {}, {}",
                obs.len(),
                act.len(),
                n,
                is_terminated.len(),
                q_values.len()
            )));
        }
        if let Some(i) = is_terminated.iter().position(|&d| d != 0 && d != 1) {
            return Err(PgError::ShapeMismatch(format!(
                "terminal marker at {} is {}, expected 0 or 1",
                i, is_terminated[i]
            )));
        }
        if is_terminated[n - 1] != 1 {
            return Err(PgError::ShapeMismatch(
                "the last timestep is not marked as terminal".to_string(),
            ));
        }

        Ok(Self {
            obs,
            act,
            reward,
            is_terminated,
            q_values,
        })
    }

    /// Returns the number of timesteps.
    pub fn len(&self) -> usize {
        self.reward.len()
    }

    /// Always `false` for a successfully built batch.
    pub fn is_empty(&self) -> bool {
        self.reward.is_empty()
    }

    /// Returns the number of trajectories.
    pub fn n_trajectories(&self) -> usize {
        self.is_terminated.iter().filter(|&&d| d == 1).count()
    }

    /// Returns the index ranges of the trajectories.
    pub fn segments(&self) -> Vec<Range<usize>> {
        segments(&self.is_terminated)
    }

    /// Returns `o_t`.
    pub fn obs(&self) -> &[O] {
        &self.obs
    }

    /// Returns `a_t`.
    pub fn act(&self) -> &[A] {
        &self.act
    }

    /// Returns `r_t`.
    pub fn reward(&self) -> &[f32] {
        &self.reward
    }

    /// Returns terminal markers.
    pub fn is_terminated(&self) -> &[i8] {
        &self.is_terminated
    }

    /// Returns Q-values.
    pub fn q_values(&self) -> &[f32] {
        &self.q_values
    }
}

/// Splits `0..is_terminated.len()` into ranges ending at terminal markers.
///
/// Timesteps after the last marker, if any, form a final range.
pub fn segments(is_terminated: &[i8]) -> Vec<Range<usize>> {
    let mut ranges = Vec::new();
    let mut start = 0;
    for (i, &d) in is_terminated.iter().enumerate() {
        if d == 1 {
            ranges.push(start..i + 1);
            start = i + 1;
        }
    }
    if start < is_terminated.len() {
        ranges.push(start..is_terminated.len());
    }
    ranges
}
