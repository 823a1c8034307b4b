//! Module: paginate
//! Responsibility: one pagination call end to end, from Relay arguments to a
//! connection.
//! Does not own: cursor wire format, predicate construction, or page assembly.
//! Boundary: the public entry point over a `QueryEngine`.

mod config;
mod request;

use crate::{
    connection::{Connection, CursorContext, PageWindow, assemble_connection},
    cursor::{CursorDirection, CursorExpectations, SeekValue, decode_cursor, validate_cursor},
    engine::{FetchRequest, QueryEngine},
    error::{PaginationError, StaleReason},
    filter::{FilterFingerprint, FilterMap},
    predicate::{Predicate, build_seek_predicate},
    sort::{NullOrdering, SortSignature, SortSpec, invert_order, parse_sort, validate_cursor_order},
};
use futures::future::try_join;
use tracing::{debug, trace};

// re-exports
pub use config::{PaginatorConfig, StaleCursorPolicy};
pub use request::PaginationRequest;

const LOG_TARGET: &str = "seekpage::paginate";

///
/// PreparedQuery
///
/// Everything a call resolves before touching the engine: the total
/// presentation order, the (possibly inverted) fetch order, the seek
/// predicate, and the page geometry.
///

#[derive(Clone, Debug, Eq, PartialEq)]
pub struct PreparedQuery {
    order: SortSpec,
    fetch_order: SortSpec,
    predicate: Predicate,
    direction: CursorDirection,
    page_size: u32,
    has_pivot: bool,
    filters_changed: bool,
    sort: SortSignature,
    filters: FilterFingerprint,
    nulls: NullOrdering,
}

impl PreparedQuery {
    /// Total sort order pages are presented in.
    #[must_use]
    pub const fn order(&self) -> &SortSpec {
        &self.order
    }

    /// Order rows are fetched in; inverted for backward pages.
    #[must_use]
    pub const fn fetch_order(&self) -> &SortSpec {
        &self.fetch_order
    }

    #[must_use]
    pub const fn predicate(&self) -> &Predicate {
        &self.predicate
    }

    #[must_use]
    pub const fn direction(&self) -> CursorDirection {
        self.direction
    }

    #[must_use]
    pub const fn page_size(&self) -> u32 {
        self.page_size
    }

    /// Rows requested from the engine: one more than the page size.
    #[must_use]
    pub const fn limit(&self) -> usize {
        self.page_size as usize + 1
    }

    #[must_use]
    pub const fn has_pivot(&self) -> bool {
        self.has_pivot
    }

    /// Whether a cursor from another filter set was dropped.
    #[must_use]
    pub const fn filters_changed(&self) -> bool {
        self.filters_changed
    }

    #[must_use]
    pub const fn sort_signature(&self) -> SortSignature {
        self.sort
    }

    #[must_use]
    pub const fn filter_fingerprint(&self) -> FilterFingerprint {
        self.filters
    }

    #[must_use]
    pub const fn nulls(&self) -> NullOrdering {
        self.nulls
    }

    /// The engine fetch this query issues for `filters`.
    #[must_use]
    pub fn fetch_request<'a>(&'a self, filters: &'a FilterMap) -> FetchRequest<'a> {
        FetchRequest {
            filters,
            predicate: &self.predicate,
            order: &self.fetch_order,
            nulls: self.nulls,
            limit: self.limit(),
        }
    }
}

///
/// Paginator
///
/// Stateless keyset paginator for one collection. Holds immutable config and
/// the engine; every call is independent.
///

#[derive(Debug)]
pub struct Paginator<Q> {
    config: PaginatorConfig,
    engine: Q,
}

impl<Q: QueryEngine> Paginator<Q> {
    /// Build a paginator, validating `config`.
    pub fn new(config: PaginatorConfig, engine: Q) -> Result<Self, PaginationError> {
        config.validate()?;

        Ok(Self { config, engine })
    }

    #[must_use]
    pub const fn config(&self) -> &PaginatorConfig {
        &self.config
    }

    #[must_use]
    pub const fn engine(&self) -> &Q {
        &self.engine
    }

    /// Resolve a request up to the seek predicate without any engine I/O.
    pub fn prepare(&self, request: &PaginationRequest) -> Result<PreparedQuery, PaginationError> {
        let window = request.window(self.config.default_page_size, self.config.max_page_size)?;

        let allowed = self.config.sortable_fields();
        let order = validate_cursor_order(
            parse_sort(&request.sort, allowed.as_deref())?,
            &self.config.tie_breaker,
        );
        let nulls = self.config.null_ordering;
        let sort = order.signature(nulls);
        let filters = request.filters.fingerprint();

        trace!(
            target: LOG_TARGET,
            kind = %self.config.kind,
            direction = window.direction.as_str(),
            page_size = window.size,
            order = %order,
            "paginate.start"
        );

        let (seek, filters_changed) = match window.cursor {
            None => {
                trace!(target: LOG_TARGET, "paginate.no_cursor");
                (None, false)
            }
            Some(token) => self.accept_cursor(token, &order, sort, filters)?,
        };

        let predicate = build_seek_predicate(&order, seek.as_ref(), window.direction, nulls)?;
        let fetch_order = match window.direction {
            CursorDirection::Forward => order.clone(),
            CursorDirection::Backward => invert_order(&order),
        };

        trace!(
            target: LOG_TARGET,
            predicate = ?predicate,
            fetch_order = %fetch_order,
            "paginate.seek_predicate_built"
        );

        Ok(PreparedQuery {
            has_pivot: seek.is_some(),
            order,
            fetch_order,
            predicate,
            direction: window.direction,
            page_size: window.size,
            filters_changed,
            sort,
            filters,
            nulls,
        })
    }

    /// Fetch one page of raw rows.
    pub async fn paginate(
        &self,
        request: &PaginationRequest,
    ) -> Result<Connection<Q::Row>, PaginationError> {
        self.paginate_with(request, |row| row).await
    }

    /// Fetch one page, mapping each row into a node after its cursor is built.
    pub async fn paginate_with<N, F>(
        &self,
        request: &PaginationRequest,
        map: F,
    ) -> Result<Connection<N>, PaginationError>
    where
        F: FnMut(Q::Row) -> N + Send,
    {
        let prepared = self.prepare(request)?;
        let fetch = self.engine.fetch(prepared.fetch_request(&request.filters));

        let (rows, total_count) = if request.total_count {
            let count = self.engine.count(&request.filters);
            let (rows, total) = try_join(fetch, count)
                .await
                .map_err(PaginationError::engine)?;
            (rows, Some(total))
        } else {
            (fetch.await.map_err(PaginationError::engine)?, None)
        };

        debug!(
            target: LOG_TARGET,
            kind = %self.config.kind,
            fetched = rows.len(),
            limit = prepared.limit(),
            total_count = ?total_count,
            "paginate.fetched"
        );

        let context = CursorContext {
            kind: &self.config.kind,
            order: &prepared.order,
            sort: prepared.sort,
            filters: prepared.filters,
        };
        let window = PageWindow {
            size: prepared.page_size as usize,
            direction: prepared.direction,
            has_pivot: prepared.has_pivot,
        };

        let mut connection = assemble_connection(rows, window, &context, map)?;
        connection.total_count = total_count;
        connection.filters_changed = prepared.filters_changed;

        debug!(
            target: LOG_TARGET,
            kind = %self.config.kind,
            edges = connection.len(),
            has_next_page = connection.page_info.has_next_page,
            has_previous_page = connection.page_info.has_previous_page,
            filters_changed = connection.filters_changed,
            "paginate.assembled"
        );

        Ok(connection)
    }

    // Decode and check a cursor. Returns the seek position to resume from,
    // or `None` with the changed flag when a filter-drifted cursor is dropped.
    fn accept_cursor(
        &self,
        token: &str,
        order: &SortSpec,
        sort: SortSignature,
        filters: FilterFingerprint,
    ) -> Result<(Option<SeekValue>, bool), PaginationError> {
        let payload = decode_cursor(token).map_err(|reason| {
            debug!(target: LOG_TARGET, reason = %reason, "paginate.cursor_rejected");
            PaginationError::invalid_cursor(reason)
        })?;

        let expectations = CursorExpectations {
            kind: &self.config.kind,
            order,
            sort,
            filters,
        };

        match validate_cursor(&payload, &expectations) {
            Ok(()) => {
                trace!(
                    target: LOG_TARGET,
                    issued_direction = payload.direction().as_str(),
                    "paginate.cursor_decoded"
                );
                Ok((Some(payload.into_seek()), false))
            }
            Err(PaginationError::StaleCursor {
                reason: StaleReason::Filters { expected, actual },
            }) if self.config.stale_cursor_policy == StaleCursorPolicy::Restart => {
                debug!(
                    target: LOG_TARGET,
                    expected = %expected,
                    actual = %actual,
                    "paginate.cursor_restarted"
                );
                Ok((None, true))
            }
            Err(err) => {
                debug!(target: LOG_TARGET, error = %err, "paginate.cursor_rejected");
                Err(err)
            }
        }
    }
}

///
/// TESTS
///
