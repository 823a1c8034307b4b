//! Module: connection
//! Responsibility: Relay-style page payloads and their assembly from fetched rows.
//! Does not own: fetching, cursor validation, or request argument resolution.
//! Boundary: the value returned to callers of `Paginator::paginate`.

mod assemble;

use serde::{Deserialize, Serialize};

// re-exports
pub use assemble::{CursorContext, PageWindow, assemble_connection};

///
/// Edge
///
/// One node plus the opaque cursor pointing at it.
///

#[derive(Clone, Debug, Deserialize, Eq, PartialEq, Serialize)]
pub struct Edge<N> {
    pub node: N,
    pub cursor: String,
}

///
/// PageInfo
///

#[derive(Clone, Debug, Default, Deserialize, Eq, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PageInfo {
    pub has_next_page: bool,
    pub has_previous_page: bool,
    pub start_cursor: Option<String>,
    pub end_cursor: Option<String>,
}

///
/// Connection
///
/// One page of nodes in forward reading order, regardless of the direction
/// the page was requested in.
///
/// `filters_changed` is set when a cursor issued under different filters was
/// discarded and the page restarted from the beginning.
///

#[derive(Clone, Debug, Deserialize, Eq, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Connection<N> {
    pub edges: Vec<Edge<N>>,
    pub page_info: PageInfo,
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub total_count: Option<u64>,
    #[serde(default)]
    pub filters_changed: bool,
}

impl<N> Connection<N> {
    #[must_use]
    pub fn len(&self) -> usize {
        self.edges.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.edges.is_empty()
    }

    /// Borrow the nodes in page order.
    pub fn nodes(&self) -> impl Iterator<Item = &N> {
        self.edges.iter().map(|edge| &edge.node)
    }

    /// Consume the connection and return its nodes in page order.
    #[must_use]
    pub fn into_nodes(self) -> Vec<N> {
        self.edges.into_iter().map(|edge| edge.node).collect()
    }

    /// Map every node, keeping cursors and page info.
    #[must_use]
    pub fn map<M>(self, mut f: impl FnMut(N) -> M) -> Connection<M> {
        Connection {
            edges: self
                .edges
                .into_iter()
                .map(|edge| Edge {
                    node: f(edge.node),
                    cursor: edge.cursor,
                })
                .collect(),
            page_info: self.page_info,
            total_count: self.total_count,
            filters_changed: self.filters_changed,
        }
    }
}

///
/// TESTS
///
