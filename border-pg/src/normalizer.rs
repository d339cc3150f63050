//! Post-processing of advantages.
use border_pg_core::{error::PgError, segments};
use serde::{Deserialize, Serialize};

const STD_EPS: f32 = 1e-8;

/// How advantages are rescaled before the policy update.
#[derive(Clone, Copy, Debug, Deserialize, Serialize, PartialEq, Eq)]
pub enum AdvantageNormalization {
    /// Divides the advantages of each trajectory by its number of timesteps.
    SegmentLength,

    /// Subtracts the mean and divides by the standard deviation over the whole batch.
    Standardize,
}

impl Default for AdvantageNormalization {
    fn default() -> Self {
        Self::SegmentLength
    }
}

impl AdvantageNormalization {
    /// Rescales `advantages` in place.
    ///
    /// `is_terminated` delimits trajectories and must have the same length as `advantages`.
    pub fn apply(&self, advantages: &mut [f32], is_terminated: &[i8]) -> Result<(), PgError> {
        if advantages.len() != is_terminated.len() {
            return Err(PgError::ShapeMismatch(format!(
                "{} advantages for {} terminal markers",
                advantages.len(),
                is_terminated.len()
            )));
        }

        match self {
            Self::SegmentLength => {
                for range in segments(is_terminated) {
                    let len = range.len() as f32;
                    advantages[range].iter_mut().for_each(|a| *a /= len);
                }
            }
            Self::Standardize => {
                if advantages.is_empty() {
                    return Ok(());
                }
                let (mean, std) = mean_std(advantages);
                let std = std + STD_EPS;
                advantages.iter_mut().for_each(|a| *a = (*a - mean) / std);
            }
        }
        Ok(())
    }
}

/// Population mean and standard deviation. `xs` must not be empty.
pub(crate) fn mean_std(xs: &[f32]) -> (f32, f32) {
    let n = xs.len() as f32;
    let mean = xs.iter().sum::<f32>() / n;
    let var = xs.iter().map(|x| (x - mean).powi(2)).sum::<f32>() / n;
    (mean, var.sqrt())
}
