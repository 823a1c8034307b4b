use crate::{
    DEFAULT_MAX_PAGE_SIZE, DEFAULT_PAGE_SIZE, DEFAULT_TIE_BREAKER, error::PaginationError,
    sort::NullOrdering,
};
use serde::{Deserialize, Serialize};

///
/// StaleCursorPolicy
///
/// What to do with a cursor issued under a different filter set.
///

#[derive(Clone, Copy, Debug, Default, Deserialize, Eq, PartialEq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum StaleCursorPolicy {
    /// Fail the call with `StaleCursor`.
    #[default]
    Reject,
    /// Drop the cursor, serve the first page in the requested direction, and
    /// flag the connection with `filters_changed`.
    Restart,
}

///
/// PaginatorConfig
///
/// Per-collection pagination settings, usually loaded from a TOML table:
///
/// ```toml
/// kind = "payments"
/// tie_breaker = "id"
/// allowed_sort_fields = ["amount", "created_at"]
/// default_page_size = 20
/// max_page_size = 100
/// null_ordering = "nulls_high"
/// stale_cursor_policy = "reject"
/// ```
///

#[derive(Clone, Debug, Deserialize, Eq, PartialEq, Serialize)]
#[serde(default, deny_unknown_fields)]
pub struct PaginatorConfig {
    /// Collection name stamped into every cursor.
    pub kind: String,
    /// Field unique per row, appended to every sort order.
    pub tie_breaker: String,
    /// Sortable fields; `None` accepts any field. The tie-breaker is always
    /// sortable.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub allowed_sort_fields: Option<Vec<String>>,
    pub default_page_size: u32,
    pub max_page_size: u32,
    pub null_ordering: NullOrdering,
    pub stale_cursor_policy: StaleCursorPolicy,
}

impl Default for PaginatorConfig {
    fn default() -> Self {
        Self {
            kind: String::new(),
            tie_breaker: DEFAULT_TIE_BREAKER.to_string(),
            allowed_sort_fields: None,
            default_page_size: DEFAULT_PAGE_SIZE,
            max_page_size: DEFAULT_MAX_PAGE_SIZE,
            null_ordering: NullOrdering::default(),
            stale_cursor_policy: StaleCursorPolicy::default(),
        }
    }
}

impl PaginatorConfig {
    /// Default config for the named collection.
    #[must_use]
    pub fn new(kind: impl Into<String>) -> Self {
        Self {
            kind: kind.into(),
            ..Self::default()
        }
    }

    #[must_use]
    pub fn with_tie_breaker(mut self, field: impl Into<String>) -> Self {
        self.tie_breaker = field.into();
        self
    }

    #[must_use]
    pub fn with_allowed_sort_fields<I, S>(mut self, fields: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.allowed_sort_fields = Some(fields.into_iter().map(Into::into).collect());
        self
    }

    #[must_use]
    pub const fn with_page_sizes(mut self, default_page_size: u32, max_page_size: u32) -> Self {
        self.default_page_size = default_page_size;
        self.max_page_size = max_page_size;
        self
    }

    #[must_use]
    pub const fn with_null_ordering(mut self, nulls: NullOrdering) -> Self {
        self.null_ordering = nulls;
        self
    }

    #[must_use]
    pub const fn with_stale_cursor_policy(mut self, policy: StaleCursorPolicy) -> Self {
        self.stale_cursor_policy = policy;
        self
    }

    /// Parse and validate a TOML config table.
    pub fn from_toml_str(raw: &str) -> Result<Self, PaginationError> {
        let config: Self =
            toml::from_str(raw).map_err(|err| PaginationError::config(err.to_string()))?;
        config.validate()?;

        Ok(config)
    }

    pub fn validate(&self) -> Result<(), PaginationError> {
        if self.kind.trim().is_empty() {
            return Err(PaginationError::config("kind must not be empty"));
        }
        if self.tie_breaker.trim().is_empty() {
            return Err(PaginationError::config("tie_breaker must not be empty"));
        }
        if self.default_page_size == 0 {
            return Err(PaginationError::config("default_page_size must be at least 1"));
        }
        if self.default_page_size > self.max_page_size {
            return Err(PaginationError::config(format!(
                "default_page_size ({}) exceeds max_page_size ({})",
                self.default_page_size, self.max_page_size
            )));
        }

        Ok(())
    }

    /// Allowed sort fields with the tie-breaker included, or `None` for any.
    pub(crate) fn sortable_fields(&self) -> Option<Vec<String>> {
        self.allowed_sort_fields.as_ref().map(|fields| {
            let mut fields = fields.clone();
            if !fields.contains(&self.tie_breaker) {
                fields.push(self.tie_breaker.clone());
            }
            fields
        })
    }
}

///
/// TESTS
///
