//! Vanilla policy gradient on a synthetic contextual task.
//!
//! At every step the observation is `[x]` with `x` drawn uniformly from `[0, 1)`.
//! Action 1 is rewarded when `x > 0.5` and action 0 otherwise. The actor is a logistic
//! policy `pi(1|x) = sigmoid(w * x + b)` trained with the advantages computed by
//! [`PgAgent`], optionally against a [`LinearBaseline`].
use anyhow::Result;
use border_pg::{
    AdvantageNormalization, LinearBaseline, LinearBaselineConfig, PgAgent, PgConfig, QValueMode,
};
use border_pg_core::{
    record::{Record, RecordValue},
    Actor, Trajectory,
};
use clap::Parser;
use log::info;

const EPISODE_LEN: usize = 10;
const LR_ACTOR: f32 = 0.5;
const LR_CRITIC: f32 = 0.05;
const RECORD_INTERVAL: usize = 20;

type Obs = Vec<f32>;
type Act = usize;

#[derive(Parser, Debug)]
#[command(version, about)]
struct Args {
    /// Number of agent updates
    #[arg(long, default_value_t = 200)]
    n_updates: usize,

    /// Number of episodes per update
    #[arg(long, default_value_t = 16)]
    n_episodes: usize,

    /// Discount factor
    #[arg(long, default_value_t = 0.99)]
    gamma: f32,

    /// Lambda of GAE; uses plain baseline subtraction if not given
    #[arg(long)]
    gae_lambda: Option<f32>,

    /// Standardize advantages over the batch
    #[arg(long, default_value_t = false)]
    standardize: bool,

    /// Do not use a value baseline
    #[arg(long, default_value_t = false)]
    no_baseline: bool,

    /// Random seed
    #[arg(long, default_value_t = 42)]
    seed: u64,
}

/// Logistic policy over two actions.
struct LogisticActor {
    w: f32,
    b: f32,
    rng: fastrand::Rng,
}

impl LogisticActor {
    fn new(seed: u64) -> Self {
        Self {
            w: 0.0,
            b: 0.0,
            rng: fastrand::Rng::with_seed(seed),
        }
    }

    fn prob_one(&self, o: &Obs) -> f32 {
        1.0 / (1.0 + (-(self.w * o[0] + self.b)).exp())
    }

    fn sample(&self, o: &Obs) -> Act {
        (self.rng.f32() < self.prob_one(o)) as Act
    }
}

impl Actor<Obs, Act> for LogisticActor {
    fn update(&mut self, obs: &[Obs], act: &[Act], advantages: &[f32]) -> Result<Record> {
        let n = obs.len() as f32;
        let (mut grad_w, mut grad_b, mut loss) = (0f32, 0f32, 0f32);
        for ((o, &a), adv) in obs.iter().zip(act.iter()).zip(advantages.iter()) {
            let p = self.prob_one(o);
            let logp = if a == 1 { p.ln() } else { (1.0 - p).ln() };
            let dlogp = a as f32 - p;
            grad_w += adv * dlogp * o[0];
            grad_b += adv * dlogp;
            loss -= adv * logp;
        }
        self.w += LR_ACTOR * grad_w / n;
        self.b += LR_ACTOR * grad_b / n;

        Ok(Record::from_slice(&[
            ("loss_actor", RecordValue::Scalar(loss / n)),
            ("w", RecordValue::Scalar(self.w)),
            ("b", RecordValue::Scalar(self.b)),
        ]))
    }
}

fn rollout(actor: &LogisticActor, rng: &fastrand::Rng) -> Trajectory<Obs, Act> {
    let mut tr = Trajectory::new(vec![], vec![], vec![]);
    for _ in 0..EPISODE_LEN {
        let o = vec![rng.f32()];
        let a = actor.sample(&o);
        let r = ((a == 1) == (o[0] > 0.5)) as usize as f32;
        tr.obs.push(o);
        tr.act.push(a);
        tr.reward.push(r);
    }
    tr
}

fn create_agent_config(args: &Args) -> PgConfig {
    let mut config = PgConfig::default()
        .discount_factor(args.gamma)
        .q_value_mode(QValueMode::RewardToGo)
        .baseline_gradient_steps(5);
    if let Some(lambda) = args.gae_lambda {
        config = config.gae_lambda(lambda);
    }
    if args.standardize {
        config = config.normalize_advantages(AdvantageNormalization::Standardize);
    }
    config
}

fn run<V>(mut agent: PgAgent<Obs, Act, LogisticActor, V>, args: &Args) -> Result<Record>
where
    V: border_pg_core::Critic<Obs>,
{
    let rng = fastrand::Rng::with_seed(args.seed);
    let mut record = Record::empty();

    for i in 0..args.n_updates {
        let trajectories = (0..args.n_episodes)
            .map(|_| rollout(agent.actor(), &rng))
            .collect();
        record = agent.update(trajectories)?;

        if (i + 1) % RECORD_INTERVAL == 0 {
            info!(
                "update {}: episode_return_mean = {:.3}, advantage_std = {:.3}",
                i + 1,
                record.get_scalar("episode_return_mean")?,
                record.get_scalar("advantage_std")?,
            );
        }
    }

    Ok(record)
}

fn train(args: &Args) -> Result<Record> {
    let config = create_agent_config(args);
    let actor = LogisticActor::new(args.seed + 1);

    if args.no_baseline {
        run(PgAgent::build(config, actor)?, args)
    } else {
        let critic_config = LinearBaselineConfig::default()
            .obs_dim(1)
            .learning_rate(LR_CRITIC)
            .seed(args.seed);
        let critic = LinearBaseline::build(&critic_config);
        run(PgAgent::build_with_baseline(config, actor, critic)?, args)
    }
}

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
    let args = Args::parse();
    let record = train(&args)?;
    info!(
        "Final episode_return_mean = {:.3} (max {})",
        record.get_scalar("episode_return_mean")?,
        EPISODE_LEN
    );
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::{train, Args};
    use anyhow::Result;

    fn args() -> Args {
        Args {
            n_updates: 5,
            n_episodes: 4,
            gamma: 0.9,
            gae_lambda: None,
            standardize: false,
            no_baseline: false,
            seed: 0,
        }
    }

    #[test]
    fn test_pg_synthetic() -> Result<()> {
        let record = train(&args())?;
        assert!(record.get_scalar("episode_return_mean")?.is_finite());
        assert!(record.get_scalar("loss_critic")?.is_finite());
        Ok(())
    }

    #[test]
    fn test_pg_synthetic_gae_standardized() -> Result<()> {
        let args = Args {
            gae_lambda: Some(0.95),
            standardize: true,
            ..args()
        };
        let record = train(&args)?;
        assert!(record.get_scalar("advantage_mean")?.abs() < 1e-3);
        Ok(())
    }

    #[test]
    fn test_pg_synthetic_without_baseline() -> Result<()> {
        let args = Args {
            no_baseline: true,
            ..args()
        };
        let record = train(&args)?;
        assert!(record.get("loss_critic").is_none());
        Ok(())
    }
}
