//! Position lookup in a newest-first contest list.
//!
//! Codeforces lists contests with the furthest upcoming one first and the
//! oldest finished one last. The cursor is the position just before the first
//! finished contest: the upcoming contest closest to now.

/// First position `i` whose successor `i + 1` is finished, or `None` when no
/// contest after the first one has finished.
pub fn find_cursor<I>(finished: I) -> Option<usize>
where
    I: IntoIterator<Item = bool>,
{
    finished
        .into_iter()
        .skip(1)
        .position(|finished| finished)
}

/// Position `index` steps from the cursor towards the head of the list.
///
/// Index 0 is the cursor itself. `None` when that walks past the head.
pub fn select_backward(cursor: usize, index: usize) -> Option<usize> {
    cursor.checked_sub(index)
}
