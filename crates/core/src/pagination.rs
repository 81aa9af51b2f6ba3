//! Offset/limit pagination cursor
//!
//! Tracks where the next page starts and whether the API has anything left.
//! Once a short page is seen the cursor is exhausted for good.

use serde::Serialize;

use crate::pokemon::DEFAULT_OFFSET;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct PaginationCursor {
    offset: usize,
    has_more: bool,
}

impl Default for PaginationCursor {
    fn default() -> Self {
        Self {
            offset: DEFAULT_OFFSET,
            has_more: true,
        }
    }
}

impl PaginationCursor {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn offset(&self) -> usize {
        self.offset
    }

    pub fn has_more(&self) -> bool {
        self.has_more
    }

    /// Record a successfully loaded page
    ///
    /// The offset always moves by a full `page_size`, even for the final short
    /// page. `has_more` only ever goes from true to false.
    pub fn advance(&mut self, page_len: usize, page_size: usize) {
        if page_len < page_size {
            self.has_more = false;
        }
        self.offset += page_size;
    }
}
