//! Opaque continuation cursors.
//!
//! A cursor pins one row position (its seek values) to the query shape it was
//! issued under: collection kind, sort signature, and filter fingerprint.
//! Cursors are immutable values; nothing about them is persisted.

mod codec;
mod validate;
mod wire;

use crate::{
    filter::FilterFingerprint,
    row::SeekRow,
    sort::{SortSignature, SortSpec},
    value::Value,
};
use derive_more::{Deref, IntoIterator};
use serde::{Deserialize, Serialize};

// re-exports
pub use codec::{MAX_CURSOR_TOKEN_LEN, decode_cursor, encode_cursor};
pub use validate::{CursorExpectations, validate_cursor};
pub use wire::CURSOR_VERSION;

///
/// CursorDirection
///
/// Traversal direction a page was requested in.
///

#[derive(Clone, Copy, Debug, Default, Deserialize, Eq, Hash, PartialEq, Serialize)]
pub enum CursorDirection {
    #[default]
    #[serde(rename = "f")]
    Forward,
    #[serde(rename = "b")]
    Backward,
}

impl CursorDirection {
    #[must_use]
    pub const fn is_forward(self) -> bool {
        matches!(self, Self::Forward)
    }

    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Forward => "forward",
            Self::Backward => "backward",
        }
    }
}

///
/// SeekValue
///
/// Sort-key values of the pivot row, one `(field, value)` pair per sort
/// criterion and in criterion order.
///

#[derive(Clone, Debug, Default, Deref, Deserialize, Eq, IntoIterator, PartialEq, Serialize)]
#[serde(transparent)]
pub struct SeekValue(Vec<(String, Value)>);

impl SeekValue {
    #[must_use]
    pub const fn new(entries: Vec<(String, Value)>) -> Self {
        Self(entries)
    }

    /// Read the seek position of `row` under `spec`.
    pub fn from_row<R: SeekRow + ?Sized>(spec: &SortSpec, row: &R) -> Self {
        Self(
            spec.iter()
                .map(|criterion| (criterion.field.clone(), row.field_or_null(&criterion.field)))
                .collect(),
        )
    }

    /// Seek value for `field`, if present.
    #[must_use]
    pub fn get(&self, field: &str) -> Option<&Value> {
        self.0
            .iter()
            .find_map(|(name, value)| (name == field).then_some(value))
    }
}

///
/// CursorPayload
///
/// Decoded cursor contents.
///

#[derive(Clone, Debug, Eq, PartialEq)]
pub struct CursorPayload {
    version: u8,
    kind: String,
    direction: CursorDirection,
    seek: SeekValue,
    sort: SortSignature,
    filters: FilterFingerprint,
}

impl CursorPayload {
    /// Build a payload at the current cursor version.
    #[must_use]
    pub fn new(
        kind: impl Into<String>,
        direction: CursorDirection,
        seek: SeekValue,
        sort: SortSignature,
        filters: FilterFingerprint,
    ) -> Self {
        Self {
            version: CURSOR_VERSION,
            kind: kind.into(),
            direction,
            seek,
            sort,
            filters,
        }
    }

    #[must_use]
    pub const fn version(&self) -> u8 {
        self.version
    }

    #[must_use]
    pub fn kind(&self) -> &str {
        &self.kind
    }

    #[must_use]
    pub const fn direction(&self) -> CursorDirection {
        self.direction
    }

    #[must_use]
    pub const fn seek(&self) -> &SeekValue {
        &self.seek
    }

    #[must_use]
    pub const fn sort(&self) -> SortSignature {
        self.sort
    }

    #[must_use]
    pub const fn filters(&self) -> FilterFingerprint {
        self.filters
    }

    #[must_use]
    pub fn into_seek(self) -> SeekValue {
        self.seek
    }
}
