//! Field access on fetched rows.

use crate::value::Value;
use std::collections::{BTreeMap, HashMap};

///
/// SeekRow
///
/// Read access to the sort-key values of one fetched row.
///
/// `path` may be a dotted path (`category.name`) for nested rows. A missing
/// field reads as `None` and is treated as NULL for ordering and seeking.
///

pub trait SeekRow {
    fn field(&self, path: &str) -> Option<Value>;

    /// Field value with missing fields collapsed to `Value::Null`.
    fn field_or_null(&self, path: &str) -> Value {
        self.field(path).unwrap_or(Value::Null)
    }
}

impl<T: SeekRow + ?Sized> SeekRow for &T {
    fn field(&self, path: &str) -> Option<Value> {
        (**self).field(path)
    }
}

impl SeekRow for BTreeMap<String, Value> {
    fn field(&self, path: &str) -> Option<Value> {
        let mut segments = path.split('.').filter(|segment| !segment.is_empty());
        let mut current = self.get(segments.next()?)?;

        for segment in segments {
            let Value::Map(entries) = current else {
                return None;
            };
            current = entries.get(segment)?;
        }

        Some(current.clone())
    }
}

impl SeekRow for HashMap<String, Value> {
    fn field(&self, path: &str) -> Option<Value> {
        if let Some(value) = self.get(path) {
            return Some(value.clone());
        }

        let (head, rest) = path.split_once('.')?;
        match self.get(head)? {
            Value::Map(entries) => entries.field(rest),
            _ => None,
        }
    }
}

impl SeekRow for serde_json::Value {
    fn field(&self, path: &str) -> Option<Value> {
        let mut current = self;

        for segment in path.split('.').filter(|segment| !segment.is_empty()) {
            current = current.as_object()?.get(segment)?;
        }

        Some(Value::from_json(current))
    }
}

impl SeekRow for serde_json::Map<String, serde_json::Value> {
    fn field(&self, path: &str) -> Option<Value> {
        let (head, rest) = match path.split_once('.') {
            Some((head, rest)) => (head, Some(rest)),
            None => (path, None),
        };
        let value = self.get(head)?;

        match rest {
            Some(rest) => value.field(rest),
            None => Some(Value::from_json(value)),
        }
    }
}

///
/// TESTS
///
