//! List helper functions

/// Slice `items[start..end]`, returning all of `items` when it is shorter
/// than `end`
///
/// Never panics: `start` is clamped to `end`.
pub fn lop<T>(items: &[T], start: usize, end: usize) -> &[T] {
    if items.len() < end {
        return items;
    }
    &items[start.min(end)..end]
}
