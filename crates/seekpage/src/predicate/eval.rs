use crate::{
    predicate::{CompareOp, ComparePredicate, Predicate},
    row::SeekRow,
    value::canonical_cmp,
};
use std::cmp::Ordering;

impl Predicate {
    /// Evaluate this predicate against one row.
    ///
    /// Missing fields read as NULL. `And([])` is true and `Or([])` is false.
    #[must_use]
    pub fn eval<R: SeekRow + ?Sized>(&self, row: &R) -> bool {
        match self {
            Self::True => true,
            Self::False => false,
            Self::And(children) => children.iter().all(|child| child.eval(row)),
            Self::Or(children) => children.iter().any(|child| child.eval(row)),
            Self::Compare(cmp) => eval_compare(row, cmp),
            Self::IsNull { field } => row.field_or_null(field).is_null(),
            Self::IsNotNull { field } => !row.field_or_null(field).is_null(),
        }
    }
}

// NULL on either side never satisfies a comparison.
fn eval_compare<R: SeekRow + ?Sized>(row: &R, cmp: &ComparePredicate) -> bool {
    let actual = row.field_or_null(&cmp.field);
    if actual.is_null() || cmp.value.is_null() {
        return false;
    }

    let ordering = canonical_cmp(&actual, &cmp.value);
    match cmp.op {
        CompareOp::Eq => ordering == Ordering::Equal,
        CompareOp::Lt => ordering == Ordering::Less,
        CompareOp::Gt => ordering == Ordering::Greater,
    }
}

///
/// TESTS
///
