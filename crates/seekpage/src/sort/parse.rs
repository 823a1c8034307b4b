use crate::{
    error::{PaginationError, SortFieldIssue},
    sort::{SortCriterion, SortDirection, SortSpec},
};

/// Parse raw sort declarations (`field`, `field:asc`, `field:desc`).
///
/// Direction defaults to ascending and is matched case-insensitively.
/// `allowed` restricts the sortable fields; `None` accepts any field.
/// The result is not yet total: run it through `validate_cursor_order`.
pub fn parse_sort<S: AsRef<str>>(
    raw: &[S],
    allowed: Option<&[String]>,
) -> Result<SortSpec, PaginationError> {
    let mut spec = SortSpec::default();

    for entry in raw {
        let criterion = parse_entry(entry.as_ref())?;

        if let Some(allowed) = allowed
            && !allowed.iter().any(|field| *field == criterion.field)
        {
            return Err(PaginationError::invalid_sort_field(
                criterion.field,
                SortFieldIssue::Unknown,
            ));
        }

        if spec.contains(&criterion.field) {
            return Err(PaginationError::invalid_sort_field(
                criterion.field,
                SortFieldIssue::Duplicate,
            ));
        }

        spec.push(criterion);
    }

    Ok(spec)
}

// Parse one `field[:direction]` entry.
fn parse_entry(entry: &str) -> Result<SortCriterion, PaginationError> {
    let (field, direction) = match entry.rsplit_once(':') {
        Some((field, direction)) => (field.trim(), Some(direction.trim())),
        None => (entry.trim(), None),
    };

    if field.is_empty() {
        return Err(PaginationError::invalid_sort_field(entry, SortFieldIssue::Empty));
    }

    let direction = match direction {
        None => SortDirection::Asc,
        Some(raw) if raw.eq_ignore_ascii_case("asc") => SortDirection::Asc,
        Some(raw) if raw.eq_ignore_ascii_case("desc") => SortDirection::Desc,
        Some(_) => {
            return Err(PaginationError::invalid_sort_field(
                field,
                SortFieldIssue::Direction,
            ));
        }
    };

    Ok(SortCriterion::new(field, direction))
}

///
/// TESTS
///
