//! Sort declarations: parsing, tie-breaker completion, inversion, and the
//! NULL placement policy shared by seek predicates and row ordering.

mod order;
mod parse;
mod signature;

use crate::value::{Value, canonical_cmp};
use derive_more::{Deref, IntoIterator};
use serde::{Deserialize, Serialize};
use std::{cmp::Ordering, fmt};

// re-exports
pub use order::{compare_rows, invert_order, validate_cursor_order};
pub use parse::parse_sort;
pub use signature::SortSignature;

///
/// SortDirection
///

#[derive(Clone, Copy, Debug, Default, Deserialize, Eq, Hash, PartialEq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum SortDirection {
    #[default]
    Asc,
    Desc,
}

impl SortDirection {
    /// Return the opposite direction.
    #[must_use]
    pub const fn inverted(self) -> Self {
        match self {
            Self::Asc => Self::Desc,
            Self::Desc => Self::Asc,
        }
    }

    /// Orient an ascending comparison result to this direction.
    #[must_use]
    pub const fn apply(self, ordering: Ordering) -> Ordering {
        match self {
            Self::Asc => ordering,
            Self::Desc => ordering.reverse(),
        }
    }

    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Asc => "asc",
            Self::Desc => "desc",
        }
    }
}

///
/// NullOrdering
///
/// Where NULL sort keys land. This is a stated policy of the engine, passed to
/// the query engine with every fetch, never left to a store's default.
///

#[derive(Clone, Copy, Debug, Default, Deserialize, Eq, Hash, PartialEq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum NullOrdering {
    /// NULL compares above every value: last when ascending, first when
    /// descending.
    #[default]
    NullsHigh,
    /// NULL compares below every value: first when ascending, last when
    /// descending.
    NullsLow,
}

impl NullOrdering {
    /// Ascending comparison of two sort-key values under this NULL policy.
    #[must_use]
    pub fn compare(self, left: &Value, right: &Value) -> Ordering {
        match (left.is_null(), right.is_null()) {
            (true, true) => Ordering::Equal,
            (true, false) => self.null_vs_value(),
            (false, true) => self.null_vs_value().reverse(),
            (false, false) => canonical_cmp(left, right),
        }
    }

    /// Whether NULLs come first when reading in `direction`.
    #[must_use]
    pub const fn nulls_first(self, direction: SortDirection) -> bool {
        matches!(
            (self, direction),
            (Self::NullsHigh, SortDirection::Desc) | (Self::NullsLow, SortDirection::Asc)
        )
    }

    const fn null_vs_value(self) -> Ordering {
        match self {
            Self::NullsHigh => Ordering::Greater,
            Self::NullsLow => Ordering::Less,
        }
    }

    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::NullsHigh => "nulls_high",
            Self::NullsLow => "nulls_low",
        }
    }
}

///
/// SortCriterion
///

#[derive(Clone, Debug, Deserialize, Eq, Hash, PartialEq, Serialize)]
pub struct SortCriterion {
    pub field: String,
    pub direction: SortDirection,
}

impl SortCriterion {
    #[must_use]
    pub fn new(field: impl Into<String>, direction: SortDirection) -> Self {
        Self {
            field: field.into(),
            direction,
        }
    }

    #[must_use]
    pub fn asc(field: impl Into<String>) -> Self {
        Self::new(field, SortDirection::Asc)
    }

    #[must_use]
    pub fn desc(field: impl Into<String>) -> Self {
        Self::new(field, SortDirection::Desc)
    }

    #[must_use]
    pub fn inverted(&self) -> Self {
        Self::new(self.field.clone(), self.direction.inverted())
    }
}

impl fmt::Display for SortCriterion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.field, self.direction.as_str())
    }
}

///
/// SortSpec
///
/// Ordered sort criteria. Once passed through `validate_cursor_order` the list
/// is non-empty, free of duplicate fields, and contains the unique
/// tie-breaker, so it defines a total order over rows.
///

#[derive(Clone, Debug, Default, Deref, Deserialize, Eq, Hash, IntoIterator, PartialEq, Serialize)]
#[serde(transparent)]
pub struct SortSpec(Vec<SortCriterion>);

impl SortSpec {
    /// Build a spec from criteria without validation.
    #[must_use]
    pub const fn new(criteria: Vec<SortCriterion>) -> Self {
        Self(criteria)
    }

    #[must_use]
    pub fn criteria(&self) -> &[SortCriterion] {
        &self.0
    }

    #[must_use]
    pub fn contains(&self, field: &str) -> bool {
        self.0.iter().any(|criterion| criterion.field == field)
    }

    /// Field names in sort order.
    pub fn fields(&self) -> impl Iterator<Item = &str> {
        self.0.iter().map(|criterion| criterion.field.as_str())
    }

    /// Stable digest of this spec under the given NULL policy.
    #[must_use]
    pub fn signature(&self, nulls: NullOrdering) -> SortSignature {
        SortSignature::compute(self, nulls)
    }

    pub(crate) fn push(&mut self, criterion: SortCriterion) {
        self.0.push(criterion);
    }
}

impl From<Vec<SortCriterion>> for SortSpec {
    fn from(criteria: Vec<SortCriterion>) -> Self {
        Self(criteria)
    }
}

impl fmt::Display for SortSpec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, criterion) in self.0.iter().enumerate() {
            if i > 0 {
                f.write_str(",")?;
            }
            write!(f, "{criterion}")?;
        }

        Ok(())
    }
}

///
/// TESTS
///
