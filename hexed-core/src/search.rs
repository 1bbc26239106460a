//! Literal byte-pattern search.
//!
//! Plain O(N·M) scans over the content. Matches may overlap: `"aa"` occurs
//! twice in `"aaa"`. Nothing here mutates; patterns arrive already resolved
//! to bytes (see `hexed_types::Encoding`).

/// Scan direction for [`find`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Direction {
    /// Lowest match at or after the start offset.
    Forward,
    /// Closest match strictly before the start offset.
    Backward,
}

/// Find `pattern` in `haystack`.
///
/// - `Forward`: first match at `i >= start`.
/// - `Backward`: scans down from `min(start - 1, len - pattern.len())`, so a
///   match beginning exactly at `start` is not returned; `start == 0` finds
///   nothing.
///
/// Returns `None` if the pattern or haystack is empty, or nothing matches.
pub fn find(haystack: &[u8], pattern: &[u8], start: usize, direction: Direction) -> Option<usize> {
    if pattern.is_empty() || haystack.is_empty() {
        return None;
    }
    let last = haystack.len().checked_sub(pattern.len())?;
    let matches_at = |i: usize| &haystack[i..i + pattern.len()] == pattern;

    match direction {
        Direction::Forward => {
            if start > last {
                return None;
            }
            (start..=last).find(|&i| matches_at(i))
        }
        Direction::Backward => {
            let from = start.checked_sub(1)?.min(last);
            (0..=from).rev().find(|&i| matches_at(i))
        }
    }
}

/// Count every start position where `pattern` occurs, overlaps included.
pub fn count_matches(haystack: &[u8], pattern: &[u8]) -> usize {
    if pattern.is_empty() || haystack.is_empty() || pattern.len() > haystack.len() {
        return 0;
    }
    haystack
        .windows(pattern.len())
        .filter(|window| *window == pattern)
        .count()
}
