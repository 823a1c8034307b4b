use crate::filter::FilterFingerprint;
use std::error::Error as StdError;
use thiserror::Error as ThisError;

///
/// ErrorClass
///
/// Coarse classification used by API boundaries to decide between a user
/// error payload and an internal failure.
///

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum ErrorClass {
    /// The request (cursor, sort, or page arguments) is at fault.
    Client,
    /// The external query engine failed.
    Engine,
    /// The paginator configuration is invalid.
    Config,
}

///
/// PaginationError
///
/// Terminal failures for one pagination call. Nothing in this crate retries;
/// the caller decides whether to start again without a cursor.
///

#[derive(Debug, ThisError)]
pub enum PaginationError {
    #[error("invalid cursor: {reason}")]
    InvalidCursor { reason: CursorError },

    #[error("stale cursor: {reason}")]
    StaleCursor { reason: StaleReason },

    #[error("invalid sort field '{field}': {reason}")]
    InvalidSortField { field: String, reason: SortFieldIssue },

    #[error("invalid pagination arguments: {reason}")]
    InvalidPaginationArgs { reason: String },

    #[error("query engine failure: {source}")]
    Engine {
        #[source]
        source: Box<dyn StdError + Send + Sync + 'static>,
    },

    #[error("invalid paginator config: {reason}")]
    Config { reason: String },
}

impl PaginationError {
    pub(crate) const fn invalid_cursor(reason: CursorError) -> Self {
        Self::InvalidCursor { reason }
    }

    pub(crate) const fn stale_cursor(reason: StaleReason) -> Self {
        Self::StaleCursor { reason }
    }

    pub(crate) fn invalid_sort_field(field: impl Into<String>, reason: SortFieldIssue) -> Self {
        Self::InvalidSortField {
            field: field.into(),
            reason,
        }
    }

    pub(crate) fn invalid_args(reason: impl Into<String>) -> Self {
        Self::InvalidPaginationArgs {
            reason: reason.into(),
        }
    }

    pub(crate) fn engine(source: impl Into<Box<dyn StdError + Send + Sync + 'static>>) -> Self {
        Self::Engine {
            source: source.into(),
        }
    }

    pub(crate) fn config(reason: impl Into<String>) -> Self {
        Self::Config {
            reason: reason.into(),
        }
    }

    #[must_use]
    pub const fn class(&self) -> ErrorClass {
        match self {
            Self::InvalidCursor { .. }
            | Self::StaleCursor { .. }
            | Self::InvalidSortField { .. }
            | Self::InvalidPaginationArgs { .. } => ErrorClass::Client,
            Self::Engine { .. } => ErrorClass::Engine,
            Self::Config { .. } => ErrorClass::Config,
        }
    }
}

impl From<CursorError> for PaginationError {
    fn from(reason: CursorError) -> Self {
        Self::invalid_cursor(reason)
    }
}

///
/// CursorError
///
/// Why a cursor token could not be accepted.
///

#[derive(Clone, Debug, Eq, PartialEq, ThisError)]
pub enum CursorError {
    #[error("cursor token is empty")]
    Empty,

    #[error("cursor token exceeds max length: {len} chars (max {max})")]
    TooLong { len: usize, max: usize },

    #[error("cursor token is not valid base64url: {0}")]
    Base64(String),

    #[error("cursor payload is malformed: {0}")]
    Payload(String),

    #[error("unsupported cursor version: {version}")]
    UnsupportedVersion { version: u8 },

    #[error("cursor belongs to '{actual}', expected '{expected}'")]
    KindMismatch { expected: String, actual: String },

    #[error("cursor seek arity mismatch: expected {expected}, found {found}")]
    ArityMismatch { expected: usize, found: usize },

    #[error("cursor seek field mismatch at position {position}: expected '{expected}', found '{found}'")]
    FieldMismatch {
        position: usize,
        expected: String,
        found: String,
    },

    #[error("failed to encode cursor: {0}")]
    Encode(String),
}

///
/// StaleReason
///
/// The cursor is well-formed but was issued for a different query shape.
///

#[derive(Clone, Debug, Eq, PartialEq, ThisError)]
pub enum StaleReason {
    #[error("filters changed since the cursor was issued: expected={expected}, actual={actual}")]
    Filters {
        expected: FilterFingerprint,
        actual: FilterFingerprint,
    },

    #[error("sort order changed since the cursor was issued: expected={expected}, actual={actual}")]
    Sort { expected: String, actual: String },
}

///
/// SortFieldIssue
///

#[derive(Clone, Copy, Debug, Eq, PartialEq, ThisError)]
pub enum SortFieldIssue {
    #[error("field is not sortable")]
    Unknown,

    #[error("field appears more than once")]
    Duplicate,

    #[error("field name is empty")]
    Empty,

    #[error("direction must be 'asc' or 'desc'")]
    Direction,
}

///
/// TESTS
///
