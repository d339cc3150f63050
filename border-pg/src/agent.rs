//! Policy-gradient agent.
mod base;
mod config;
pub use base::{NoBaseline, PgAgent};
pub use config::PgConfig;
