use crate::{
    engine::{FetchRequest, QueryEngine},
    filter::FilterMap,
    row::SeekRow,
    sort::compare_rows,
    value::canonical_cmp,
};
use async_trait::async_trait;
use std::{
    cmp::Ordering,
    convert::Infallible,
    fmt,
    sync::{
        Arc,
        atomic::{AtomicUsize, Ordering as AtomicOrdering},
    },
};

/// Row filter applied before the seek predicate.
pub type FilterMatcher<R> = Arc<dyn Fn(&R, &FilterMap) -> bool + Send + Sync>;

/// Default matcher: every filter entry must equal the row's field value.
/// A `Null` filter value matches rows where the field is NULL or missing.
pub fn match_equal<R: SeekRow + ?Sized>(row: &R, filters: &FilterMap) -> bool {
    filters.iter().all(|(field, expected)| {
        let actual = row.field_or_null(field);
        match (actual.is_null(), expected.is_null()) {
            (true, true) => true,
            (false, false) => canonical_cmp(&actual, expected) == Ordering::Equal,
            _ => false,
        }
    })
}

///
/// MemoryQueryEngine
///
/// Reference engine over an in-memory row set. Applies the filter matcher and
/// the seek predicate, sorts with the canonical comparator, and truncates to
/// the limit.
///

pub struct MemoryQueryEngine<R> {
    rows: Vec<R>,
    matcher: FilterMatcher<R>,
    fetches: AtomicUsize,
    counts: AtomicUsize,
}

impl<R> MemoryQueryEngine<R>
where
    R: SeekRow + Clone + Send + Sync + 'static,
{
    /// Engine matching filters by field equality.
    #[must_use]
    pub fn new(rows: Vec<R>) -> Self {
        Self::with_matcher(rows, Arc::new(|row: &R, filters: &FilterMap| match_equal(row, filters)))
    }

    #[must_use]
    pub fn with_matcher(rows: Vec<R>, matcher: FilterMatcher<R>) -> Self {
        Self {
            rows,
            matcher,
            fetches: AtomicUsize::new(0),
            counts: AtomicUsize::new(0),
        }
    }

    #[must_use]
    pub fn rows(&self) -> &[R] {
        &self.rows
    }

    /// Number of `fetch` calls served so far.
    #[must_use]
    pub fn fetch_calls(&self) -> usize {
        self.fetches.load(AtomicOrdering::Relaxed)
    }

    /// Number of `count` calls served so far.
    #[must_use]
    pub fn count_calls(&self) -> usize {
        self.counts.load(AtomicOrdering::Relaxed)
    }
}

impl<R> fmt::Debug for MemoryQueryEngine<R> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("MemoryQueryEngine")
            .field("rows", &self.rows.len())
            .field("fetches", &self.fetches.load(AtomicOrdering::Relaxed))
            .field("counts", &self.counts.load(AtomicOrdering::Relaxed))
            .finish_non_exhaustive()
    }
}

impl<R> FromIterator<R> for MemoryQueryEngine<R>
where
    R: SeekRow + Clone + Send + Sync + 'static,
{
    fn from_iter<I: IntoIterator<Item = R>>(iter: I) -> Self {
        Self::new(iter.into_iter().collect())
    }
}

#[async_trait]
impl<R> QueryEngine for MemoryQueryEngine<R>
where
    R: SeekRow + Clone + Send + Sync + 'static,
{
    type Row = R;
    type Error = Infallible;

    async fn fetch<'a>(&self, request: FetchRequest<'a>) -> Result<Vec<R>, Infallible> {
        self.fetches.fetch_add(1, AtomicOrdering::Relaxed);

        let mut rows: Vec<R> = self
            .rows
            .iter()
            .filter(|row| (self.matcher)(*row, request.filters) && request.predicate.eval(*row))
            .cloned()
            .collect();

        rows.sort_by(|left, right| compare_rows(request.order, request.nulls, left, right));
        rows.truncate(request.limit);

        Ok(rows)
    }

    async fn count(&self, filters: &FilterMap) -> Result<u64, Infallible> {
        self.counts.fetch_add(1, AtomicOrdering::Relaxed);

        let matched = self
            .rows
            .iter()
            .filter(|row| (self.matcher)(*row, filters))
            .count();

        Ok(u64::try_from(matched).unwrap_or(u64::MAX))
    }
}

///
/// TESTS
///
