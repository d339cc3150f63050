use super::LinearBaselineConfig;
use anyhow::Result;
use border_pg_core::{
    error::PgError,
    record::{Record, RecordValue},
    Critic,
};

const INIT_SCALE: f32 = 0.01;

/// State-value function `V(o) = w^T o + b`, fitted by full-batch gradient descent
/// on the mean squared error.
///
/// Observations are anything that can be viewed as `&[f32]` of length `obs_dim`.
#[derive(Clone, Debug)]
pub struct LinearBaseline {
    w: Vec<f32>,
    b: f32,
    learning_rate: f32,
}

impl LinearBaseline {
    /// Constructs a baseline with small random weights.
    pub fn build(config: &LinearBaselineConfig) -> Self {
        let rng = fastrand::Rng::with_seed(config.seed);
        let w = (0..config.obs_dim)
            .map(|_| INIT_SCALE * (2.0 * rng.f32() - 1.0))
            .collect();

        Self {
            w,
            b: 0.0,
            learning_rate: config.learning_rate,
        }
    }

    /// Returns the weights and the bias.
    pub fn params(&self) -> (&[f32], f32) {
        (&self.w, self.b)
    }

    fn forward(&self, o: &[f32]) -> Result<f32, PgError> {
        if o.len() != self.w.len() {
            return Err(PgError::ShapeMismatch(format!(
                "observation of dimension {}, expected {}",
                o.len(),
                self.w.len()
            )));
        }
        Ok(self.w.iter().zip(o.iter()).map(|(w, x)| w * x).sum::<f32>() + self.b)
    }

    /// Mean squared error between predictions and targets.
    pub fn loss<O: AsRef<[f32]>>(&self, obs: &[O], targets: &[f32]) -> Result<f32> {
        let preds = self.evaluate(obs)?;
        check_targets(obs.len(), targets)?;
        let n = preds.len() as f32;
        Ok(preds
            .iter()
            .zip(targets.iter())
            .map(|(p, t)| (p - t).powi(2))
            .sum::<f32>()
            / n)
    }
}

fn check_targets(n: usize, targets: &[f32]) -> Result<(), PgError> {
    if n == 0 || targets.len() != n {
        return Err(PgError::ShapeMismatch(format!(
            "{} targets for {} observations",
            targets.len(),
            n
        )));
    }
    Ok(())
}

impl<O: AsRef<[f32]>> Critic<O> for LinearBaseline {
    fn evaluate(&self, obs: &[O]) -> Result<Vec<f32>> {
        let values = obs
            .iter()
            .map(|o| self.forward(o.as_ref()))
            .collect::<Result<Vec<_>, _>>()?;
        Ok(values)
    }

    fn update(&mut self, obs: &[O], targets: &[f32]) -> Result<Record> {
        check_targets(obs.len(), targets)?;
        let preds = self.evaluate(obs)?;
        let n = obs.len() as f32;

        let mut grad_w = vec![0f32; self.w.len()];
        let mut grad_b = 0f32;
        let mut loss = 0f32;
        for ((o, p), t) in obs.iter().zip(preds.iter()).zip(targets.iter()) {
            let err = p - t;
            loss += err * err;
            grad_b += 2.0 * err;
            for (g, x) in grad_w.iter_mut().zip(o.as_ref().iter()) {
                *g += 2.0 * err * x;
            }
        }

        for (w, g) in self.w.iter_mut().zip(grad_w.iter()) {
            *w -= self.learning_rate * g / n;
        }
        self.b -= self.learning_rate * grad_b / n;

        Ok(Record::from_slice(&[("loss_critic", RecordValue::Scalar(loss / n))]))
    }
}
