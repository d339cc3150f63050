//! Key-value container of metrics.
use crate::error::PgError;
use std::collections::{
    hash_map::Iter,
    HashMap,
};

/// Possible types of values stored in a [`Record`].
#[derive(Debug, Clone, PartialEq)]
pub enum RecordValue {
    /// A single floating-point value, typically a loss or a batch statistic.
    Scalar(f32),

    /// A 1-dimensional array of floating-point values.
    Array1(Vec<f32>),

    /// A text value.
    String(String),
}

/// A container of metrics keyed by name.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Record(HashMap<String, RecordValue>);

impl Record {
    /// Creates an empty record.
    pub fn empty() -> Self {
        Self(HashMap::new())
    }

    /// Creates a record containing a single scalar value.
    pub fn from_scalar(name: impl Into<String>, value: f32) -> Self {
        Self(HashMap::from([(name.into(), RecordValue::Scalar(value))]))
    }

    /// Creates a record from a slice of key-value pairs.
    pub fn from_slice<K: Into<String> + Clone>(s: &[(K, RecordValue)]) -> Self {
        Self(
            s.iter()
                .map(|(k, v)| (k.clone().into(), v.clone()))
                .collect(),
        )
    }

    /// Inserts a key-value pair, overwriting an existing value with the same key.
    pub fn insert(&mut self, k: impl Into<String>, v: RecordValue) {
        self.0.insert(k.into(), v);
    }

    /// Returns an iterator over the key-value pairs in the record.
    pub fn iter(&self) -> Iter<'_, String, RecordValue> {
        self.0.iter()
    }

    /// Gets a reference to the value associated with the given key.
    pub fn get(&self, k: &str) -> Option<&RecordValue> {
        self.0.get(k)
    }

    /// Merges two records, consuming both.
    ///
    /// If both records contain the same key, the value from `record` wins.
    pub fn merge(self, record: Record) -> Self {
        Record(self.0.into_iter().chain(record.0).collect())
    }

    /// Merges another record into this one in place.
    ///
    /// If both records contain the same key, the value from `record` wins.
    pub fn merge_inplace(&mut self, record: Record) {
        self.0.extend(record.0);
    }

    /// Gets a scalar value from the record.
    pub fn get_scalar(&self, k: &str) -> Result<f32, PgError> {
        match self.0.get(k) {
            Some(RecordValue::Scalar(v)) => Ok(*v),
            Some(_) => Err(PgError::RecordValueType("Scalar".to_string())),
            None => Err(PgError::RecordKey(k.to_string())),
        }
    }

    /// Gets a 1-dimensional array from the record.
    pub fn get_array1(&self, k: &str) -> Result<Vec<f32>, PgError> {
        match self.0.get(k) {
            Some(RecordValue::Array1(v)) => Ok(v.clone()),
            Some(_) => Err(PgError::RecordValueType("Array1".to_string())),
            None => Err(PgError::RecordKey(k.to_string())),
        }
    }

    /// Gets a string value from the record.
    pub fn get_string(&self, k: &str) -> Result<String, PgError> {
        match self.0.get(k) {
            Some(RecordValue::String(s)) => Ok(s.clone()),
            Some(_) => Err(PgError::RecordValueType("String".to_string())),
            None => Err(PgError::RecordKey(k.to_string())),
        }
    }

    /// Returns the number of entries.
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Returns `true` if the record contains no key-value pairs.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_merge_overwrites_with_later_record() {
        let first = Record::from_slice(&[
            ("loss_critic", RecordValue::Scalar(2.0)),
            ("loss_actor", RecordValue::Scalar(1.0)),
        ]);
        let second = Record::from_scalar("loss_critic", 0.5);

        let merged = first.clone().merge(second.clone());
        assert_eq!(merged.get_scalar("loss_critic").unwrap(), 0.5);
        assert_eq!(merged.get_scalar("loss_actor").unwrap(), 1.0);

        let mut inplace = first;
        inplace.merge_inplace(second);
        assert_eq!(inplace, merged);

        let mut keys: Vec<&str> = merged.iter().map(|(k, _)| k.as_str()).collect();
        keys.sort_unstable();
        assert_eq!(keys, vec!["loss_actor", "loss_critic"]);
        assert_eq!(merged.len(), 2);
    }

    #[test]
    fn test_getters_report_key_and_type_errors() {
        let mut record = Record::empty();
        assert!(record.is_empty());
        record.insert("name", RecordValue::String("vpg".to_string()));

        assert_eq!(record.get_string("name").unwrap(), "vpg");
        assert_eq!(
            record.get_scalar("name"),
            Err(PgError::RecordValueType("Scalar".to_string()))
        );
        assert_eq!(
            record.get_array1("missing"),
            Err(PgError::RecordKey("missing".to_string()))
        );
    }
}
