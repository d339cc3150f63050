//! Configuration of [`LinearBaseline`](super::LinearBaseline).
use anyhow::Result;
use log::info;
use serde::{Deserialize, Serialize};
use std::{
    fs::File,
    io::{BufReader, Write},
    path::Path,
};

/// Configuration of [`LinearBaseline`](super::LinearBaseline).
#[derive(Clone, Debug, Deserialize, Serialize, PartialEq)]
pub struct LinearBaselineConfig {
    /// Dimension of observations.
    pub obs_dim: usize,

    /// Step size of gradient descent.
    pub learning_rate: f32,

    /// Seed of the initial weights.
    pub seed: u64,
}

impl Default for LinearBaselineConfig {
    fn default() -> Self {
        Self {
            obs_dim: 1,
            learning_rate: 0.01,
            seed: 42,
        }
    }
}

impl LinearBaselineConfig {
    /// Sets the dimension of observations.
    pub fn obs_dim(mut self, v: usize) -> Self {
        self.obs_dim = v;
        self
    }

    /// Sets the learning rate.
    pub fn learning_rate(mut self, v: f32) -> Self {
        self.learning_rate = v;
        self
    }

    /// Sets the seed.
    pub fn seed(mut self, v: u64) -> Self {
        self.seed = v;
        self
    }

    /// Constructs [`LinearBaselineConfig`] from YAML file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path_ = path.as_ref().to_owned();
        let file = File::open(path)?;
        let rdr = BufReader::new(file);
        let b = serde_yaml::from_reader(rdr)?;
        info!("Load config of linear baseline from {:?}", path_);
        Ok(b)
    }

    /// Saves [`LinearBaselineConfig`] to YAML file.
    pub fn save(&self, path: impl AsRef<Path>) -> Result<()> {
        let path_ = path.as_ref().to_owned();
        let mut file = File::create(path)?;
        file.write_all(serde_yaml::to_string(&self)?.as_bytes())?;
        info!("Save config of linear baseline into {:?}", path_);
        Ok(())
    }
}
