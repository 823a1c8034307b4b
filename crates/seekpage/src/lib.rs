//! Keyset cursor pagination: opaque drift-checked cursors, total sort orders
//! with a mandatory tie-breaker, seek predicates, and Relay-style connections.
#![warn(unreachable_pub)]

pub mod connection;
pub mod cursor;
pub mod engine;
pub mod error;
pub mod filter;
pub mod paginate;
pub mod predicate;
pub mod row;
pub mod sort;
pub mod value;

// test
#[cfg(test)]
pub(crate) mod test_support;

///
/// CONSTANTS
///

/// Default tie-breaker field appended to every sort order.
pub const DEFAULT_TIE_BREAKER: &str = "id";

/// Default page size used when a request names neither `first` nor `last`.
pub const DEFAULT_PAGE_SIZE: u32 = 20;

/// Default upper bound for `first` / `last`.
pub const DEFAULT_MAX_PAGE_SIZE: u32 = 100;

///
/// Prelude
///
/// Prelude contains the vocabulary needed to configure and drive a paginator.
///

pub mod prelude {
    pub use crate::{
        connection::{Connection, Edge, PageInfo},
        cursor::CursorDirection,
        engine::{FetchRequest, MemoryQueryEngine, QueryEngine},
        error::PaginationError,
        filter::FilterMap,
        paginate::{PaginationRequest, Paginator, PaginatorConfig},
        predicate::Predicate,
        row::SeekRow,
        sort::{NullOrdering, SortDirection, SortSpec},
        value::Value,
    };
}
