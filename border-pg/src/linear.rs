//! A linear state-value function without any tensor backend.
mod base;
mod config;
pub use base::LinearBaseline;
pub use config::LinearBaselineConfig;
