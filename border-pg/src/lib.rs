#![warn(missing_docs)]
//! Training signals for policy-gradient agents.
//!
//! Given sampled trajectories, [`PgAgent`] computes Q-values with [`QValueMode`],
//! advantages with or without a value baseline (optionally with generalized advantage
//! estimation, see [`gae`]), post-processes them with [`AdvantageNormalization`] and
//! dispatches the results to an [`Actor`](border_pg_core::Actor) and a
//! [`Critic`](border_pg_core::Critic).
//!
//! [`LinearBaseline`] is a backend-free critic, useful for tests and small problems.
pub mod advantage;
mod agent;
mod linear;
mod normalizer;
mod q_value;
pub use advantage::gae;
pub use agent::{NoBaseline, PgAgent, PgConfig};
pub use linear::{LinearBaseline, LinearBaselineConfig};
pub use normalizer::AdvantageNormalization;
pub use q_value::{discounted_return, discounted_reward_to_go, QValueMode};
