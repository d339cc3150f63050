//! Core functionalities.
mod actor;
mod batch;
mod critic;
mod trajectory;
pub use actor::Actor;
pub use batch::{segments, Batch};
pub use critic::Critic;
pub use trajectory::Trajectory;
