use crate::{
    connection::{Connection, Edge, PageInfo},
    cursor::{CursorDirection, CursorPayload, SeekValue, encode_cursor},
    error::PaginationError,
    filter::FilterFingerprint,
    row::SeekRow,
    sort::{SortSignature, SortSpec},
};

///
/// CursorContext
///
/// Query shape stamped into every cursor issued for a page. `order` is the
/// presentation order (never the inverted fetch order).
///

#[derive(Clone, Copy, Debug)]
pub struct CursorContext<'a> {
    pub kind: &'a str,
    pub order: &'a SortSpec,
    pub sort: SortSignature,
    pub filters: FilterFingerprint,
}

///
/// PageWindow
///
/// Requested page geometry: size, direction, and whether the request started
/// from a pivot cursor.
///

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct PageWindow {
    pub size: usize,
    pub direction: CursorDirection,
    pub has_pivot: bool,
}

/// Assemble a connection from rows fetched with a limit of `size + 1`.
///
/// `rows` arrive in fetch order: presentation order when forward, and
/// closest-to-pivot first when backward. The oversampled row is trimmed and
/// sets the "more" flag for the traversal direction; backward pages are then
/// reversed so edges always read in presentation order.
pub fn assemble_connection<R, N, F>(
    mut rows: Vec<R>,
    window: PageWindow,
    context: &CursorContext<'_>,
    mut map: F,
) -> Result<Connection<N>, PaginationError>
where
    R: SeekRow,
    F: FnMut(R) -> N,
{
    let has_more = rows.len() > window.size;
    rows.truncate(window.size);

    if !window.direction.is_forward() {
        rows.reverse();
    }

    let mut edges = Vec::with_capacity(rows.len());
    for row in rows {
        let cursor = encode_row_cursor(&row, window.direction, context)?;
        edges.push(Edge {
            node: map(row),
            cursor,
        });
    }

    // the opposite flag reports only whether the request came from a pivot
    let (has_next_page, has_previous_page) = match window.direction {
        CursorDirection::Forward => (has_more, window.has_pivot),
        CursorDirection::Backward => (window.has_pivot, has_more),
    };

    let page_info = PageInfo {
        has_next_page,
        has_previous_page,
        start_cursor: edges.first().map(|edge| edge.cursor.clone()),
        end_cursor: edges.last().map(|edge| edge.cursor.clone()),
    };

    Ok(Connection {
        edges,
        page_info,
        total_count: None,
        filters_changed: false,
    })
}

fn encode_row_cursor<R: SeekRow>(
    row: &R,
    direction: CursorDirection,
    context: &CursorContext<'_>,
) -> Result<String, PaginationError> {
    let payload = CursorPayload::new(
        context.kind,
        direction,
        SeekValue::from_row(context.order, row),
        context.sort,
        context.filters,
    );

    encode_cursor(&payload).map_err(PaginationError::from)
}

///
/// TESTS
///
