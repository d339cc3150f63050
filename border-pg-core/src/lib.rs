#![warn(missing_docs)]
//! Core data model for policy-gradient agents.
//!
//! * [`Trajectory`] is a single episode sampled from an environment.
//! * [`Batch`] flattens an ordered collection of trajectories into index-aligned
//!   arrays with terminal markers.
//! * [`Actor`] and [`Critic`] are the contracts of the policy and the value baseline,
//!   which are implemented outside of this crate.
//! * [`record::Record`] carries the metrics returned from updates.
pub mod error;
pub mod record;

mod base;
pub use base::{segments, Actor, Batch, Critic, Trajectory};
