use crate::{
    cursor::{CursorDirection, SeekValue},
    error::{CursorError, PaginationError},
    predicate::Predicate,
    sort::{NullOrdering, SortDirection, SortSpec},
    value::Value,
};

/// Build the keyset predicate selecting rows strictly past the seek position.
///
/// For criteria `c1..cn` with seek values `v1..vn` the result is
/// `(c1 ≻ v1) OR (c1 = v1 AND c2 ≻ v2) OR … OR (c1 = v1 AND … AND cn ≻ vn)`,
/// where `≻` is `>` when the criterion reads ascending in `direction` and `<`
/// otherwise. NULLs are placed per `nulls`, so NULL seek values and NULL row
/// values are expressed with explicit `IsNull` / `IsNotNull` tests.
///
/// Without a seek position the predicate is `True`.
pub fn build_seek_predicate(
    spec: &SortSpec,
    seek: Option<&SeekValue>,
    direction: CursorDirection,
    nulls: NullOrdering,
) -> Result<Predicate, PaginationError> {
    let Some(seek) = seek else {
        return Ok(Predicate::True);
    };

    if seek.len() != spec.len() {
        return Err(PaginationError::invalid_cursor(CursorError::ArityMismatch {
            expected: spec.len(),
            found: seek.len(),
        }));
    }

    let mut branches = Vec::with_capacity(spec.len());
    let mut prefix: Vec<Predicate> = Vec::with_capacity(spec.len());

    for (position, (criterion, (field, value))) in spec.iter().zip(seek.iter()).enumerate() {
        if *field != criterion.field {
            return Err(PaginationError::invalid_cursor(CursorError::FieldMismatch {
                position,
                expected: criterion.field.clone(),
                found: field.clone(),
            }));
        }

        let effective = if direction.is_forward() {
            criterion.direction
        } else {
            criterion.direction.inverted()
        };

        let past = strictly_past(field, value, effective, nulls);
        if !past.is_false() {
            let mut terms = prefix.clone();
            terms.push(past);
            branches.push(conjunction(terms));
        }

        prefix.push(equal_to(field, value));
    }

    Ok(disjunction(branches))
}

// Rows strictly after `value` when reading `field` in `effective` order.
fn strictly_past(
    field: &str,
    value: &Value,
    effective: SortDirection,
    nulls: NullOrdering,
) -> Predicate {
    // NULL is the greatest value under NullsHigh and the least under NullsLow
    let reading_toward_nulls = !nulls.nulls_first(effective);

    match (value.is_null(), reading_toward_nulls) {
        // nothing lies past NULL when NULLs come last
        (true, true) => Predicate::False,
        // everything non-null lies past a leading NULL
        (true, false) => Predicate::is_not_null(field),
        (false, true) => Predicate::or(vec![
            compare_past(field, value, effective),
            Predicate::is_null(field),
        ]),
        (false, false) => compare_past(field, value, effective),
    }
}

fn compare_past(field: &str, value: &Value, effective: SortDirection) -> Predicate {
    match effective {
        SortDirection::Asc => Predicate::gt(field.to_string(), value.clone()),
        SortDirection::Desc => Predicate::lt(field.to_string(), value.clone()),
    }
}

fn equal_to(field: &str, value: &Value) -> Predicate {
    if value.is_null() {
        Predicate::is_null(field)
    } else {
        Predicate::eq(field.to_string(), value.clone())
    }
}

fn conjunction(mut terms: Vec<Predicate>) -> Predicate {
    match terms.len() {
        1 => terms.remove(0),
        _ => Predicate::and(terms),
    }
}

fn disjunction(mut branches: Vec<Predicate>) -> Predicate {
    match branches.len() {
        0 => Predicate::False,
        1 => branches.remove(0),
        _ => Predicate::or(branches),
    }
}

///
/// TESTS
///

#[cfg(test)]
mod tests {
    use super::build_seek_predicate;
    use crate::{
        cursor::{CursorDirection, SeekValue},
        error::{CursorError, PaginationError},
        predicate::Predicate,
        sort::{NullOrdering, SortCriterion, SortSpec, compare_rows},
        test_support::{payments, row},
        value::Value,
    };
    use std::{cmp::Ordering, collections::BTreeMap};

    fn spec() -> SortSpec {
        SortSpec::new(vec![SortCriterion::desc("amount"), SortCriterion::asc("id")])
    }

    fn seek(amount: Value, id: &str) -> SeekValue {
        SeekValue::new(vec![
            ("amount".to_string(), amount),
            ("id".to_string(), Value::from(id)),
        ])
    }

    fn ids(rows: &[BTreeMap<String, Value>], predicate: &Predicate) -> Vec<String> {
        rows.iter()
            .filter(|r| predicate.eval(*r))
            .map(|r| match r.get("id") {
                Some(Value::Text(id)) => id.clone(),
                other => panic!("row id should be text, got {other:?}"),
            })
            .collect()
    }

    #[test]
    fn no_seek_is_identity() {
        let predicate =
            build_seek_predicate(&spec(), None, CursorDirection::Forward, NullOrdering::NullsHigh)
                .expect("first page predicate");

        assert_eq!(predicate, Predicate::True);
    }

    #[test]
    fn forward_predicate_has_lexicographic_shape() {
        let predicate = build_seek_predicate(
            &spec(),
            Some(&seek(Value::Int(100), "b")),
            CursorDirection::Forward,
            NullOrdering::NullsHigh,
        )
        .expect("predicate should build");

        assert_eq!(
            predicate,
            Predicate::or(vec![
                Predicate::lt("amount".into(), Value::Int(100)),
                Predicate::and(vec![
                    Predicate::eq("amount".into(), Value::Int(100)),
                    Predicate::or(vec![
                        Predicate::gt("id".into(), Value::from("b")),
                        Predicate::is_null("id"),
                    ]),
                ]),
            ])
        );
    }

    #[test]
    fn forward_after_b_selects_remaining_rows() {
        let predicate = build_seek_predicate(
            &spec(),
            Some(&seek(Value::Int(100), "b")),
            CursorDirection::Forward,
            NullOrdering::NullsHigh,
        )
        .expect("predicate should build");

        assert_eq!(ids(&payments(), &predicate), vec!["c", "d", "e"]);
    }

    #[test]
    fn backward_before_c_selects_preceding_rows() {
        let predicate = build_seek_predicate(
            &spec(),
            Some(&seek(Value::Int(50), "c")),
            CursorDirection::Backward,
            NullOrdering::NullsHigh,
        )
        .expect("predicate should build");

        assert_eq!(ids(&payments(), &predicate), vec!["a", "b"]);
    }

    #[test]
    fn seek_past_null_under_nulls_high() {
        let asc = SortSpec::new(vec![SortCriterion::asc("rank"), SortCriterion::asc("id")]);
        let rows = vec![
            row(&[("id", Value::from("a")), ("rank", Value::Int(1))]),
            row(&[("id", Value::from("b")), ("rank", Value::Null)]),
            row(&[("id", Value::from("c")), ("rank", Value::Null)]),
        ];
        let pivot = SeekValue::new(vec![
            ("rank".to_string(), Value::Null),
            ("id".to_string(), Value::from("b")),
        ]);

        let forward = build_seek_predicate(
            &asc,
            Some(&pivot),
            CursorDirection::Forward,
            NullOrdering::NullsHigh,
        )
        .expect("predicate should build");
        assert_eq!(ids(&rows, &forward), vec!["c"]);

        let backward = build_seek_predicate(
            &asc,
            Some(&pivot),
            CursorDirection::Backward,
            NullOrdering::NullsHigh,
        )
        .expect("predicate should build");
        assert_eq!(ids(&rows, &backward), vec!["a"]);
    }

    #[test]
    fn fully_dropped_branches_collapse_to_false() {
        let single = SortSpec::new(vec![SortCriterion::asc("rank")]);
        let pivot = SeekValue::new(vec![("rank".to_string(), Value::Null)]);

        let predicate = build_seek_predicate(
            &single,
            Some(&pivot),
            CursorDirection::Forward,
            NullOrdering::NullsHigh,
        )
        .expect("predicate should build");

        assert_eq!(predicate, Predicate::False);
    }

    #[test]
    fn arity_and_field_mismatches_are_invalid_cursors() {
        let short = SeekValue::new(vec![("amount".to_string(), Value::Int(1))]);
        let err = build_seek_predicate(
            &spec(),
            Some(&short),
            CursorDirection::Forward,
            NullOrdering::NullsHigh,
        )
        .expect_err("short seek");
        assert!(matches!(
            err,
            PaginationError::InvalidCursor {
                reason: CursorError::ArityMismatch { .. }
            }
        ));

        let renamed = SeekValue::new(vec![
            ("price".to_string(), Value::Int(1)),
            ("id".to_string(), Value::from("a")),
        ]);
        let err = build_seek_predicate(
            &spec(),
            Some(&renamed),
            CursorDirection::Forward,
            NullOrdering::NullsHigh,
        )
        .expect_err("renamed seek field");
        assert!(matches!(
            err,
            PaginationError::InvalidCursor {
                reason: CursorError::FieldMismatch { .. }
            }
        ));
    }

    // The predicate must agree with the row comparator for every pivot, both
    // directions, and both NULL policies.
    #[test]
    fn predicate_agrees_with_row_order() {
        let spec = SortSpec::new(vec![SortCriterion::desc("rank"), SortCriterion::asc("id")]);
        let ranks = [Value::Null, Value::Int(1), Value::Int(2), Value::Null, Value::Int(1)];
        let rows: Vec<_> = ranks
            .iter()
            .enumerate()
            .map(|(i, rank)| row(&[("id", Value::Uint(i as u64)), ("rank", rank.clone())]))
            .collect();

        for nulls in [NullOrdering::NullsHigh, NullOrdering::NullsLow] {
            for direction in [CursorDirection::Forward, CursorDirection::Backward] {
                for pivot in &rows {
                    let predicate = build_seek_predicate(
                        &spec,
                        Some(&SeekValue::from_row(&spec, pivot)),
                        direction,
                        nulls,
                    )
                    .expect("predicate should build");

                    for candidate in &rows {
                        let expected = match direction {
                            CursorDirection::Forward => Ordering::Greater,
                            CursorDirection::Backward => Ordering::Less,
                        };
                        let past = compare_rows(&spec, nulls, candidate, pivot) == expected;

                        assert_eq!(
                            predicate.eval(candidate),
                            past,
                            "nulls={nulls:?} direction={direction:?} pivot={pivot:?} candidate={candidate:?}"
                        );
                    }
                }
            }
        }
    }
}
