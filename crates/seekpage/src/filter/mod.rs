//! Caller filter sets and their drift fingerprints.

mod fingerprint;

use crate::value::Value;
use derive_more::{Deref, IntoIterator};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

// re-exports
pub use fingerprint::{FILTER_HASH_SEED, FILTER_HASH_VERSION, FilterFingerprint, hash_filters};

///
/// FilterMap
///
/// The caller's active filter set, keyed by filter name. Keys are held in
/// canonical (sorted) order, so two maps built in different insertion orders
/// are indistinguishable. An absent key and a key bound to `Value::Null` are
/// different filter sets.
///

#[derive(Clone, Debug, Default, Deref, Deserialize, Eq, IntoIterator, PartialEq, Serialize)]
#[serde(transparent)]
pub struct FilterMap(BTreeMap<String, Value>);

impl FilterMap {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder-style insert.
    #[must_use]
    pub fn with(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.insert(key, value);
        self
    }

    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<Value>) -> Option<Value> {
        self.0.insert(key.into(), value.into())
    }

    pub fn remove(&mut self, key: &str) -> Option<Value> {
        self.0.remove(key)
    }

    /// Build a filter map from a JSON object; non-object input yields `None`.
    #[must_use]
    pub fn from_json(json: &serde_json::Value) -> Option<Self> {
        let object = json.as_object()?;

        Some(
            object
                .iter()
                .map(|(key, value)| (key.clone(), Value::from_json(value)))
                .collect(),
        )
    }

    /// Render this filter map as a plain JSON object.
    #[must_use]
    pub fn to_json(&self) -> serde_json::Value {
        serde_json::Value::Object(
            self.0
                .iter()
                .map(|(key, value)| (key.clone(), value.to_json()))
                .collect(),
        )
    }

    /// Fingerprint of this filter set.
    #[must_use]
    pub fn fingerprint(&self) -> FilterFingerprint {
        hash_filters(self)
    }
}

impl<K: Into<String>, V: Into<Value>> FromIterator<(K, V)> for FilterMap {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self(
            iter.into_iter()
                .map(|(key, value)| (key.into(), value.into()))
                .collect(),
        )
    }
}

impl From<BTreeMap<String, Value>> for FilterMap {
    fn from(map: BTreeMap<String, Value>) -> Self {
        Self(map)
    }
}
