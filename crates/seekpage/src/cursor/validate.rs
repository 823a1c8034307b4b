use crate::{
    cursor::CursorPayload,
    error::{CursorError, PaginationError, StaleReason},
    filter::FilterFingerprint,
    sort::{SortSignature, SortSpec},
};

///
/// CursorExpectations
///
/// The query shape a cursor must have been issued under to be honored.
///

#[derive(Clone, Copy, Debug)]
pub struct CursorExpectations<'a> {
    pub kind: &'a str,
    pub order: &'a SortSpec,
    pub sort: SortSignature,
    pub filters: FilterFingerprint,
}

/// Check a decoded cursor against the current query shape.
///
/// Checks run in a fixed order: kind, seek arity, sort signature, seek field
/// names, filter fingerprint. Structural problems are `InvalidCursor`; a
/// well-formed cursor issued for another sort or filter set is `StaleCursor`.
pub fn validate_cursor(
    payload: &CursorPayload,
    expected: &CursorExpectations<'_>,
) -> Result<(), PaginationError> {
    if payload.kind() != expected.kind {
        return Err(PaginationError::invalid_cursor(CursorError::KindMismatch {
            expected: expected.kind.to_string(),
            actual: payload.kind().to_string(),
        }));
    }

    let seek = payload.seek();
    if seek.len() != expected.order.len() {
        return Err(PaginationError::invalid_cursor(CursorError::ArityMismatch {
            expected: expected.order.len(),
            found: seek.len(),
        }));
    }

    if payload.sort() != expected.sort {
        return Err(PaginationError::stale_cursor(StaleReason::Sort {
            expected: expected.sort.as_hex(),
            actual: payload.sort().as_hex(),
        }));
    }

    // signature matched, so a name mismatch means the token was edited
    for (position, ((found, _), criterion)) in seek.iter().zip(expected.order.iter()).enumerate() {
        if *found != criterion.field {
            return Err(PaginationError::invalid_cursor(CursorError::FieldMismatch {
                position,
                expected: criterion.field.clone(),
                found: found.clone(),
            }));
        }
    }

    if payload.filters() != expected.filters {
        return Err(PaginationError::stale_cursor(StaleReason::Filters {
            expected: expected.filters,
            actual: payload.filters(),
        }));
    }

    Ok(())
}

///
/// TESTS
///
