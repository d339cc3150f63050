use super::PgConfig;
use crate::{
    advantage::{baseline_advantages, check_finite, gae},
    normalizer::mean_std,
    AdvantageNormalization, QValueMode,
};
use anyhow::Result;
use border_pg_core::{
    error::PgError,
    record::{Record, RecordValue},
    Actor, Batch, Critic, Trajectory,
};
use log::{debug, trace};
use std::marker::PhantomData;

/// Critic type of an agent without a baseline.
///
/// It has no value, so an agent of type `PgAgent<_, _, _, NoBaseline>` can never run
/// baseline code paths.
#[derive(Debug)]
pub enum NoBaseline {}

impl<O> Critic<O> for NoBaseline {
    fn evaluate(&self, _obs: &[O]) -> Result<Vec<f32>> {
        match *self {}
    }

    fn update(&mut self, _obs: &[O], _targets: &[f32]) -> Result<Record> {
        match *self {}
    }
}

/// A critic together with the settings that only make sense with it.
struct Baseline<V> {
    critic: V,
    gradient_steps: usize,
    gae_lambda: Option<f32>,
}

#[cfg_attr(doc, aquamarine::aquamarine)]
/// Vanilla policy-gradient agent with an optional value baseline.
///
/// [`PgAgent::update`] turns sampled trajectories into one policy update and
/// a fixed number of baseline updates:
///
/// ```mermaid
/// graph LR
///     T[Trajectories]-->|rewards|Q[Q-values]
///     T-->B[Batch]
///     Q-->B
///     B-->|obs|V[Critic::evaluate]
///     V-->ADV[Advantages]
///     B-->|q_values, reward, is_terminated|ADV
///     ADV-->N[Normalization]
///     N-->|obs, act, advantages|P[Actor::update]
///     B-->|obs, q_values|C[Critic::update]
/// ```
///
/// The advantages are
/// * the Q-values when there is no baseline,
/// * the Q-values minus `V(o_t)` with a baseline,
/// * the output of [`gae`](crate::gae) with a baseline and `gae_lambda`.
///
/// The returned [`Record`] merges the records of the actor and of every baseline update,
/// later ones overwriting earlier ones with the same key, and adds the following
/// statistics of the batch: `n_trajectories`, `n_steps`, `episode_return_mean`,
/// `q_value_mean`, `advantage_mean` and `advantage_std`.
pub struct PgAgent<O, A, P, V = NoBaseline> {
    actor: P,
    baseline: Option<Baseline<V>>,
    gamma: f32,
    q_value_mode: QValueMode,
    normalize_advantages: Option<AdvantageNormalization>,
    n_updates: usize,
    phantom: PhantomData<(O, A)>,
}

impl<O, A, P> PgAgent<O, A, P, NoBaseline>
where
    P: Actor<O, A>,
{
    /// Constructs an agent without a baseline.
    ///
    /// Fails if `config` requests GAE.
    pub fn build(config: PgConfig, actor: P) -> Result<Self> {
        config.check(false)?;
        Ok(Self::new(config, actor, None))
    }
}

impl<O, A, P, V> PgAgent<O, A, P, V>
where
    P: Actor<O, A>,
    V: Critic<O>,
{
    /// Constructs an agent with `critic` as the value baseline.
    pub fn build_with_baseline(config: PgConfig, actor: P, critic: V) -> Result<Self> {
        config.check(true)?;
        let baseline = Baseline {
            critic,
            gradient_steps: config.baseline_gradient_steps,
            gae_lambda: config.gae_lambda,
        };
        Ok(Self::new(config, actor, Some(baseline)))
    }

    fn new(config: PgConfig, actor: P, baseline: Option<Baseline<V>>) -> Self {
        Self {
            actor,
            baseline,
            gamma: config.gamma,
            q_value_mode: config.q_value_mode,
            normalize_advantages: config.normalize_advantages,
            n_updates: 0,
            phantom: PhantomData,
        }
    }

    /// Computes Q-values of each trajectory.
    pub fn q_values(&self, trajectories: &[Trajectory<O, A>]) -> Result<Vec<Vec<f32>>> {
        let mut q_values = Vec::with_capacity(trajectories.len());
        for tr in trajectories.iter() {
            tr.validate()?;
            q_values.push(self.q_value_mode.q_values(&tr.reward, self.gamma)?);
        }
        Ok(q_values)
    }

    /// Computes advantages of a batch, normalized if configured.
    ///
    /// The critic is only evaluated, not updated.
    pub fn estimate_advantages(&self, batch: &Batch<O, A>) -> Result<Vec<f32>> {
        let mut advantages = match &self.baseline {
            None => batch.q_values().to_vec(),
            Some(baseline) => {
                let values = baseline.critic.evaluate(batch.obs())?;
                if values.len() != batch.len() {
                    return Err(PgError::ShapeMismatch(format!(
                        "critic returned {} values for {} observations",
                        values.len(),
                        batch.len()
                    ))
                    .into());
                }
                check_finite("baseline value", &values)?;

                match baseline.gae_lambda {
                    None => baseline_advantages(batch.q_values(), &values)?,
                    Some(lambda) => gae(
                        batch.reward(),
                        &values,
                        batch.is_terminated(),
                        self.gamma,
                        lambda,
                    )?,
                }
            }
        };

        if let Some(normalization) = &self.normalize_advantages {
            normalization.apply(&mut advantages, batch.is_terminated())?;
        }
        check_finite("advantage", &advantages)?;

        Ok(advantages)
    }

    /// Performs an update of the actor and, if any, the baseline.
    pub fn update(&mut self, trajectories: Vec<Trajectory<O, A>>) -> Result<Record> {
        let q_values = self.q_values(&trajectories)?;
        let returns: Vec<f32> = trajectories.iter().map(|tr| tr.total_reward()).collect();
        let batch = Batch::build(trajectories, q_values)?;
        debug!(
            "Update {}: {} trajectories, {} timesteps",
            self.n_updates,
            returns.len(),
            batch.len()
        );

        let advantages = self.estimate_advantages(&batch)?;

        trace!("Update actor");
        let mut record = self.actor.update(batch.obs(), batch.act(), &advantages)?;

        if let Some(baseline) = self.baseline.as_mut() {
            for i in 0..baseline.gradient_steps {
                trace!("Update critic ({}/{})", i + 1, baseline.gradient_steps);
                let critic_record = baseline.critic.update(batch.obs(), batch.q_values())?;
                record.merge_inplace(critic_record);
            }
        }

        let (advantage_mean, advantage_std) = mean_std(&advantages);
        record.merge_inplace(Record::from_slice(&[
            ("n_trajectories", RecordValue::Scalar(returns.len() as f32)),
            ("n_steps", RecordValue::Scalar(batch.len() as f32)),
            ("episode_return_mean", RecordValue::Scalar(mean_std(&returns).0)),
            ("q_value_mean", RecordValue::Scalar(mean_std(batch.q_values()).0)),
            ("advantage_mean", RecordValue::Scalar(advantage_mean)),
            ("advantage_std", RecordValue::Scalar(advantage_std)),
        ]));
        self.n_updates += 1;

        Ok(record)
    }

    /// Returns the number of completed updates.
    pub fn n_updates(&self) -> usize {
        self.n_updates
    }

    /// Returns the actor.
    pub fn actor(&self) -> &P {
        &self.actor
    }

    /// Returns the actor.
    pub fn actor_mut(&mut self) -> &mut P {
        &mut self.actor
    }

    /// Returns the critic, if the agent has a baseline.
    pub fn critic(&self) -> Option<&V> {
        self.baseline.as_ref().map(|b| &b.critic)
    }

    /// Returns the critic, if the agent has a baseline.
    pub fn critic_mut(&mut self) -> Option<&mut V> {
        self.baseline.as_mut().map(|b| &mut b.critic)
    }

    /// Consumes the agent, returning the actor and the critic.
    pub fn into_inner(self) -> (P, Option<V>) {
        (self.actor, self.baseline.map(|b| b.critic))
    }
}
