//! Metrics returned from updates of actors, critics and agents.
//!
//! A [`Record`] is a mapping from metric names to [`RecordValue`]s. Actors and critics
//! return one from each update, and the agent merges them into a single record.
//!
//! ```rust
//! use border_pg_core::record::{Record, RecordValue};
//!
//! let mut record = Record::from_scalar("loss_actor", 0.5);
//! record.insert("advantages", RecordValue::Array1(vec![1.0, -1.0]));
//! record.merge_inplace(Record::from_scalar("loss_critic", 0.1));
//!
//! assert_eq!(record.get_scalar("loss_critic").unwrap(), 0.1);
//! assert_eq!(record.len(), 3);
//! ```
mod base;
pub use base::{Record, RecordValue};
