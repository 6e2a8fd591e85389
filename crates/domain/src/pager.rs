//! Fixed-size page slicing over an ordered view.

/// Records per page when the consumer does not configure one.
pub const DEFAULT_PAGE_SIZE: usize = 20;

/// Number of pages needed for `view_len` items. Never less than 1, so an
/// empty view still has a (blank) first page.
pub fn page_count(view_len: usize, page_size: usize) -> usize {
    if page_size == 0 {
        return 1;
    }
    view_len.div_ceil(page_size).max(1)
}

/// Returns page `page_number` (1-based) of `view`.
///
/// Pages past the end, page `0` and a zero page size all yield an empty
/// slice. Callers clamp page numbers themselves.
pub fn page<T>(view: &[T], page_number: usize, page_size: usize) -> &[T] {
    if page_number == 0 || page_size == 0 {
        return &[];
    }
    let start = (page_number - 1).saturating_mul(page_size);
    if start >= view.len() {
        return &[];
    }
    let end = start.saturating_add(page_size).min(view.len());
    &view[start..end]
}
