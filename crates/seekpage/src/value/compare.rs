use crate::value::Value;
use std::{cmp::Ordering, collections::BTreeMap};

/// Total canonical comparator used by ordering and predicate evaluation.
///
/// Ordering rules:
/// 1. Canonical variant rank (`Null` ranks lowest)
/// 2. Variant-specific comparison for same-ranked values
///
/// `Int`, `Uint` and `Float` share one numeric rank and compare by numeric
/// value. Mixed-rank comparisons are rank-only and remain deterministic.
/// NULL placement in ORDER BY is decided by `NullOrdering`, not here.
#[must_use]
pub fn canonical_cmp(left: &Value, right: &Value) -> Ordering {
    let rank = canonical_rank(left).cmp(&canonical_rank(right));
    if rank != Ordering::Equal {
        return rank;
    }

    canonical_cmp_same_rank(left, right)
}

/// Canonical rank of a value variant.
#[must_use]
pub const fn canonical_rank(value: &Value) -> u8 {
    match value {
        Value::Null => 0,
        Value::Bool(_) => 1,
        Value::Int(_) | Value::Uint(_) | Value::Float(_) => 2,
        Value::Text(_) => 3,
        Value::Date(_) => 4,
        Value::Timestamp(_) => 5,
        Value::List(_) => 6,
        Value::Map(_) => 7,
    }
}

fn canonical_cmp_same_rank(left: &Value, right: &Value) -> Ordering {
    match (left, right) {
        (Value::Bool(a), Value::Bool(b)) => a.cmp(b),
        (Value::Text(a), Value::Text(b)) => a.cmp(b),
        (Value::Date(a), Value::Date(b)) => a.cmp(b),
        (Value::Timestamp(a), Value::Timestamp(b)) => a.cmp(b),
        (Value::List(a), Value::List(b)) => canonical_cmp_value_list(a, b),
        (Value::Map(a), Value::Map(b)) => canonical_cmp_value_map(a, b),
        (Value::Int(_) | Value::Uint(_) | Value::Float(_), _) => numeric_cmp(left, right),
        _ => Ordering::Equal,
    }
}

fn numeric_cmp(left: &Value, right: &Value) -> Ordering {
    match (left, right) {
        (Value::Int(a), Value::Int(b)) => a.cmp(b),
        (Value::Uint(a), Value::Uint(b)) => a.cmp(b),
        (Value::Int(a), Value::Uint(b)) => i128::from(*a).cmp(&i128::from(*b)),
        (Value::Uint(a), Value::Int(b)) => i128::from(*a).cmp(&i128::from(*b)),
        (Value::Float(a), Value::Float(b)) => a.cmp(b),
        (Value::Float(a), Value::Int(b)) => int_float_cmp(i128::from(*b), a.get()).reverse(),
        (Value::Float(a), Value::Uint(b)) => int_float_cmp(i128::from(*b), a.get()).reverse(),
        (Value::Int(a), Value::Float(b)) => int_float_cmp(i128::from(*a), b.get()),
        (Value::Uint(a), Value::Float(b)) => int_float_cmp(i128::from(*a), b.get()),
        _ => Ordering::Equal,
    }
}

// Exact integer/float comparison. Every i64 and u64 fits in i128, and any
// finite f64 inside the i128 range has an integral floor that converts
// without loss.
#[expect(clippy::cast_possible_truncation)]
fn int_float_cmp(int: i128, float: f64) -> Ordering {
    const I128_BOUND: f64 = 170_141_183_460_469_231_731_687_303_715_884_105_728.0; // 2^127

    if float >= I128_BOUND {
        return Ordering::Less;
    }
    if float < -I128_BOUND {
        return Ordering::Greater;
    }

    let floor = float.floor();
    match int.cmp(&(floor as i128)) {
        Ordering::Equal if floor < float => Ordering::Less,
        other => other,
    }
}

fn canonical_cmp_value_list(left: &[Value], right: &[Value]) -> Ordering {
    for (left, right) in left.iter().zip(right.iter()) {
        let cmp = canonical_cmp(left, right);
        if cmp != Ordering::Equal {
            return cmp;
        }
    }

    left.len().cmp(&right.len())
}

fn canonical_cmp_value_map(left: &BTreeMap<String, Value>, right: &BTreeMap<String, Value>) -> Ordering {
    for ((left_key, left_value), (right_key, right_value)) in left.iter().zip(right.iter()) {
        let key_cmp = left_key.cmp(right_key);
        if key_cmp != Ordering::Equal {
            return key_cmp;
        }

        let value_cmp = canonical_cmp(left_value, right_value);
        if value_cmp != Ordering::Equal {
            return value_cmp;
        }
    }

    left.len().cmp(&right.len())
}
