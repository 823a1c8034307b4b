use crate::{cursor::CursorDirection, error::PaginationError, filter::FilterMap};
use serde::{Deserialize, Serialize};

///
/// PaginationRequest
///
/// Relay-style arguments for one page. `first`/`after` read forward,
/// `last`/`before` read backward. On the wire `filters` is a plain JSON
/// object such as `{"status": "open"}`.
///

#[derive(Clone, Debug, Default, Deserialize, Eq, PartialEq, Serialize)]
#[serde(default, rename_all = "camelCase")]
pub struct PaginationRequest {
    pub first: Option<u32>,
    pub last: Option<u32>,
    pub after: Option<String>,
    pub before: Option<String>,
    #[serde(with = "plain_filters")]
    pub filters: FilterMap,
    pub sort: Vec<String>,
    pub total_count: bool,
}

impl PaginationRequest {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub const fn first(mut self, first: u32) -> Self {
        self.first = Some(first);
        self
    }

    #[must_use]
    pub const fn last(mut self, last: u32) -> Self {
        self.last = Some(last);
        self
    }

    #[must_use]
    pub fn after(mut self, cursor: impl Into<String>) -> Self {
        self.after = Some(cursor.into());
        self
    }

    #[must_use]
    pub fn before(mut self, cursor: impl Into<String>) -> Self {
        self.before = Some(cursor.into());
        self
    }

    #[must_use]
    pub fn filters(mut self, filters: FilterMap) -> Self {
        self.filters = filters;
        self
    }

    #[must_use]
    pub fn sort<I, S>(mut self, sort: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.sort = sort.into_iter().map(Into::into).collect();
        self
    }

    #[must_use]
    pub const fn with_total_count(mut self) -> Self {
        self.total_count = true;
        self
    }

    /// Resolve the Relay arguments into one traversal window.
    pub(crate) fn window(
        &self,
        default_page_size: u32,
        max_page_size: u32,
    ) -> Result<RequestWindow<'_>, PaginationError> {
        if self.first.is_some() && self.last.is_some() {
            return Err(PaginationError::invalid_args(
                "'first' and 'last' cannot be combined",
            ));
        }
        if self.after.is_some() && self.before.is_some() {
            return Err(PaginationError::invalid_args(
                "'after' and 'before' cannot be combined",
            ));
        }
        if self.first.is_some() && self.before.is_some() {
            return Err(PaginationError::invalid_args(
                "'first' reads forward and cannot be combined with 'before'",
            ));
        }
        if self.last.is_some() && self.after.is_some() {
            return Err(PaginationError::invalid_args(
                "'last' reads backward and cannot be combined with 'after'",
            ));
        }

        let (direction, requested) = match (self.first, self.last) {
            (_, Some(last)) => (CursorDirection::Backward, Some(last)),
            (Some(first), None) => (CursorDirection::Forward, Some(first)),
            (None, None) if self.before.is_some() => (CursorDirection::Backward, None),
            (None, None) => (CursorDirection::Forward, None),
        };

        let size = match requested {
            None => default_page_size,
            Some(0) => {
                return Err(PaginationError::invalid_args("page size must be at least 1"));
            }
            Some(size) if size > max_page_size => {
                return Err(PaginationError::invalid_args(format!(
                    "page size {size} exceeds the maximum of {max_page_size}"
                )));
            }
            Some(size) => size,
        };

        let cursor = match direction {
            CursorDirection::Forward => self.after.as_deref(),
            CursorDirection::Backward => self.before.as_deref(),
        };

        Ok(RequestWindow {
            direction,
            size,
            cursor,
        })
    }
}

///
/// RequestWindow
///

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub(crate) struct RequestWindow<'a> {
    pub(crate) direction: CursorDirection,
    pub(crate) size: u32,
    pub(crate) cursor: Option<&'a str>,
}

mod plain_filters {
    use crate::filter::FilterMap;
    use serde::{Deserialize, Deserializer, Serialize, Serializer, de::Error as _};

    pub fn serialize<S: Serializer>(filters: &FilterMap, serializer: S) -> Result<S::Ok, S::Error> {
        filters.to_json().serialize(serializer)
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<FilterMap, D::Error> {
        let json = serde_json::Value::deserialize(deserializer)?;
        if json.is_null() {
            return Ok(FilterMap::new());
        }

        FilterMap::from_json(&json).ok_or_else(|| D::Error::custom("filters must be a JSON object"))
    }
}

///
/// TESTS
///
