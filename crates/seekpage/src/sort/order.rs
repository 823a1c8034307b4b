use crate::{
    row::SeekRow,
    sort::{NullOrdering, SortCriterion, SortSpec},
};
use std::cmp::Ordering;

/// Complete a sort spec into a total order.
///
/// If `tie_breaker` is already one of the criteria the spec is returned
/// unchanged; otherwise it is appended as the final, ascending criterion.
/// Without a unique final field, rows equal on every criterion have no
/// defined relative position and a page boundary falling between them would
/// skip or repeat rows.
#[must_use]
pub fn validate_cursor_order(spec: SortSpec, tie_breaker: &str) -> SortSpec {
    if spec.contains(tie_breaker) {
        return spec;
    }

    let mut spec = spec;
    spec.push(SortCriterion::asc(tie_breaker));

    spec
}

/// Flip every criterion's direction.
///
/// Backward pages are fetched closest-to-pivot first under the inverted
/// order and reversed into presentation order afterwards.
#[must_use]
pub fn invert_order(spec: &SortSpec) -> SortSpec {
    spec.iter().map(SortCriterion::inverted).collect::<Vec<_>>().into()
}

/// Compare two rows under `spec` and the NULL policy.
///
/// Missing fields compare as NULL. Once `spec` holds a unique tie-breaker,
/// `Equal` only occurs for the same row.
pub fn compare_rows<R: SeekRow + ?Sized>(
    spec: &SortSpec,
    nulls: NullOrdering,
    left: &R,
    right: &R,
) -> Ordering {
    for criterion in spec.iter() {
        let left_value = left.field_or_null(&criterion.field);
        let right_value = right.field_or_null(&criterion.field);
        let ordering = criterion
            .direction
            .apply(nulls.compare(&left_value, &right_value));

        if ordering != Ordering::Equal {
            return ordering;
        }
    }

    Ordering::Equal
}

///
/// TESTS
///
