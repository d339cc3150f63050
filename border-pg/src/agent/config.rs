//! Configuration of [`PgAgent`](super::PgAgent).
use crate::{AdvantageNormalization, QValueMode};
use anyhow::Result;
use border_pg_core::error::PgError;
use log::info;
use serde::{Deserialize, Serialize};
use std::{
    fs::File,
    io::{BufReader, Write},
    path::Path,
};

/// Configuration of [`PgAgent`](super::PgAgent).
#[derive(Clone, Debug, Deserialize, Serialize, PartialEq)]
pub struct PgConfig {
    /// Discount factor.
    pub gamma: f32,

    /// How Q-values are computed from rewards.
    pub q_value_mode: QValueMode,

    /// Lambda of generalized advantage estimation. Requires a baseline.
    pub gae_lambda: Option<f32>,

    /// Post-processing of advantages. `None` leaves them as they are.
    pub normalize_advantages: Option<AdvantageNormalization>,

    /// Number of baseline updates per agent update. 0 skips baseline updates.
    pub baseline_gradient_steps: usize,
}

impl Default for PgConfig {
    fn default() -> Self {
        Self {
            gamma: 0.99,
            q_value_mode: QValueMode::RewardToGo,
            gae_lambda: None,
            normalize_advantages: None,
            baseline_gradient_steps: 1,
        }
    }
}

impl PgConfig {
    /// Discount factor.
    pub fn discount_factor(mut self, v: f32) -> Self {
        self.gamma = v;
        self
    }

    /// Sets how Q-values are computed.
    pub fn q_value_mode(mut self, v: QValueMode) -> Self {
        self.q_value_mode = v;
        self
    }

    /// Enables generalized advantage estimation with the given lambda.
    pub fn gae_lambda(mut self, v: f32) -> Self {
        self.gae_lambda = Some(v);
        self
    }

    /// Enables normalization of advantages.
    pub fn normalize_advantages(mut self, v: AdvantageNormalization) -> Self {
        self.normalize_advantages = Some(v);
        self
    }

    /// Sets the number of baseline updates per agent update.
    pub fn baseline_gradient_steps(mut self, v: usize) -> Self {
        self.baseline_gradient_steps = v;
        self
    }

    /// Checks the configuration for an agent with or without a baseline.
    pub fn check(&self, with_baseline: bool) -> Result<(), PgError> {
        if !(0.0..=1.0).contains(&self.gamma) {
            return Err(PgError::Configuration(format!(
                "gamma must be in [0, 1], got {}",
                self.gamma
            )));
        }
        if let Some(lambda) = self.gae_lambda {
            if !with_baseline {
                return Err(PgError::Configuration(
                    "GAE requires a baseline".to_string(),
                ));
            }
            if !(0.0..=1.0).contains(&lambda) {
                return Err(PgError::Configuration(format!(
                    "gae_lambda must be in [0, 1], got {}",
                    lambda
                )));
            }
        }
        Ok(())
    }

    /// Constructs [`PgConfig`] from YAML file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path_ = path.as_ref().to_owned();
        let file = File::open(path)?;
        let rdr = BufReader::new(file);
        let b = serde_yaml::from_reader(rdr)?;
        info!("Load config of PG agent from {:?}", path_);
        Ok(b)
    }

    /// Saves [`PgConfig`] to YAML file.
    pub fn save(&self, path: impl AsRef<Path>) -> Result<()> {
        let path_ = path.as_ref().to_owned();
        let mut file = File::create(path)?;
        file.write_all(serde_yaml::to_string(&self)?.as_bytes())?;
        info!("Save config of PG agent into {:?}", path_);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempdir::TempDir;

    #[test]
    fn test_serde_pg_config() -> Result<()> {
        let config = PgConfig::default()
            .discount_factor(0.9)
            .q_value_mode(QValueMode::FullReturn)
            .gae_lambda(0.95)
            .normalize_advantages(AdvantageNormalization::Standardize)
            .baseline_gradient_steps(5);

        let dir = TempDir::new("pg_config")?;
        let path = dir.path().join("pg_config.yaml");
        config.save(&path)?;
        let config_ = PgConfig::load(&path)?;
        assert_eq!(config, config_);
        Ok(())
    }

    #[test]
    fn test_negative_gradient_steps_are_rejected() -> Result<()> {
        let dir = TempDir::new("pg_config")?;
        let path = dir.path().join("pg_config.yaml");
        let yaml = serde_yaml::to_string(&PgConfig::default())?
            .replace("baseline_gradient_steps: 1", "baseline_gradient_steps: -1");
        std::fs::write(&path, yaml)?;
        assert!(PgConfig::load(&path).is_err());
        Ok(())
    }

    #[test]
    fn test_check() {
        assert!(PgConfig::default().check(false).is_ok());
        assert!(matches!(
            PgConfig::default().gae_lambda(0.9).check(false),
            Err(PgError::Configuration(_))
        ));
        assert!(PgConfig::default().gae_lambda(0.9).check(true).is_ok());
        assert!(matches!(
            PgConfig::default().gae_lambda(1.5).check(true),
            Err(PgError::Configuration(_))
        ));
        assert!(matches!(
            PgConfig::default().discount_factor(f32::NAN).check(false),
            Err(PgError::Configuration(_))
        ));
        assert!(matches!(
            PgConfig::default().discount_factor(1.5).check(false),
            Err(PgError::Configuration(_))
        ));
        assert!(matches!(
            PgConfig::default().discount_factor(-0.1).check(true),
            Err(PgError::Configuration(_))
        ));
        assert!(matches!(
            PgConfig::default().gae_lambda(-0.5).check(true),
            Err(PgError::Configuration(_))
        ));
        assert!(PgConfig::default().discount_factor(0.0).check(false).is_ok());
        assert!(PgConfig::default()
            .discount_factor(1.0)
            .gae_lambda(0.0)
            .check(true)
            .is_ok());
    }
}
