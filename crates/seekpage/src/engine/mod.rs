//! Query engine port.
//!
//! The paginator never talks to storage directly. It hands an abstract
//! predicate, a total order, and a row limit to a `QueryEngine` and gets rows
//! back in that order.

mod memory;

use crate::{
    filter::FilterMap,
    predicate::Predicate,
    row::SeekRow,
    sort::{NullOrdering, SortSpec},
};
use async_trait::async_trait;
use std::error::Error as StdError;

// re-exports
pub use memory::{FilterMatcher, MemoryQueryEngine, match_equal};

///
/// FetchRequest
///
/// One row fetch. Rows must satisfy both the caller filters and `predicate`,
/// be ordered by `order` with NULLs placed per `nulls`, and number at most
/// `limit`.
///

#[derive(Clone, Copy, Debug)]
pub struct FetchRequest<'a> {
    pub filters: &'a FilterMap,
    pub predicate: &'a Predicate,
    pub order: &'a SortSpec,
    pub nulls: NullOrdering,
    pub limit: usize,
}

///
/// QueryEngine
///
/// External collaborator that executes fetches and counts. Implementations
/// own translation of `Predicate` and `SortSpec` into their query language.
/// Calls are not retried by the paginator.
///

#[async_trait]
pub trait QueryEngine: Send + Sync {
    type Row: SeekRow + Send;
    type Error: StdError + Send + Sync + 'static;

    async fn fetch<'a>(&self, request: FetchRequest<'a>) -> Result<Vec<Self::Row>, Self::Error>;

    /// Count rows matching `filters`, ignoring any seek position.
    async fn count(&self, filters: &FilterMap) -> Result<u64, Self::Error>;
}
