use crate::value::Value;
use std::collections::BTreeMap;

/// Build a map row from `(field, value)` pairs.
pub(crate) fn row(fields: &[(&str, Value)]) -> BTreeMap<String, Value> {
    fields
        .iter()
        .map(|(field, value)| ((*field).to_string(), value.clone()))
        .collect()
}

/// Rows `id`, `amount` from the payments fixture used across module tests.
pub(crate) fn payments() -> Vec<BTreeMap<String, Value>> {
    [("a", 100), ("b", 100), ("c", 50), ("d", 50), ("e", 10)]
        .into_iter()
        .map(|(id, amount)| row(&[("id", Value::from(id)), ("amount", Value::Int(amount))]))
        .collect()
}
