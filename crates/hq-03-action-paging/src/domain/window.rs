//! Signed request window normalisation.
//!
//! Clients address an account's history with a signed `pos`/`offset` pair.
//! `pos == -1` anchors at the newest action and reads backwards; any other
//! `pos` is an absolute ascending index. Before any backend call the pair is
//! reduced to a non-negative `(start, count)` window in one direction.

use shared_types::SortOrder;

/// `pos` used when the request omits it: the newest action.
pub const DEFAULT_POS: i64 = -1;

/// `offset` used when the request omits it: the 20 newest actions.
pub const DEFAULT_OFFSET: i64 = -20;

/// Raw client window.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageRequest {
    /// `-1` for newest-first, otherwise an ascending index.
    pub pos: i64,
    /// Item count relative to the anchor; negative reads before it.
    pub offset: i64,
}

impl Default for PageRequest {
    fn default() -> Self {
        Self {
            pos: DEFAULT_POS,
            offset: DEFAULT_OFFSET,
        }
    }
}

/// Normalised window. Positions count from the first item in `order`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageWindow {
    /// Traversal direction.
    pub order: SortOrder,
    /// First position, 0-based.
    pub start: u64,
    /// Number of positions, at least 1.
    pub count: u64,
}

impl PageWindow {
    /// One past the last position.
    pub fn end(&self) -> u64 {
        self.start.saturating_add(self.count)
    }
}

impl PageRequest {
    /// Create a request.
    pub fn new(pos: i64, offset: i64) -> Self {
        Self { pos, offset }
    }

    /// Reduce to a concrete window, or `None` when it selects nothing.
    ///
    /// | anchor | offset | pos | count |
    /// |--------|--------|-----|-------|
    /// | `-1` | `>= 0` | `pos - offset` | `offset + 1` |
    /// | `-1` | `< 0` | `-1` | `|offset - 1|` |
    /// | `>= 0` | `>= 0` | `pos` | `offset + 1` |
    /// | `>= 0` | `< 0` | `pos + offset` | `|offset - 1|` |
    ///
    /// Then `pos + count <= 0` selects nothing, and a negative `pos` is
    /// clamped to 0 by shrinking `count`.
    pub fn normalize(&self) -> Option<PageWindow> {
        // i128 so that extreme i64 inputs cannot overflow.
        let mut pos = i128::from(self.pos);
        let offset = i128::from(self.offset);

        let (order, mut count) = if self.pos == -1 {
            if offset >= 0 {
                pos -= offset;
                (SortOrder::Descending, offset + 1)
            } else {
                (SortOrder::Descending, (offset - 1).abs())
            }
        } else if offset >= 0 {
            (SortOrder::Ascending, offset + 1)
        } else {
            pos += offset;
            (SortOrder::Ascending, (offset - 1).abs())
        };

        if pos + count <= 0 {
            return None;
        }
        if pos < 0 {
            count += pos;
            pos = 0;
        }

        Some(PageWindow {
            order,
            start: u64::try_from(pos).ok()?,
            count: u64::try_from(count).unwrap_or(u64::MAX),
        })
    }
}
