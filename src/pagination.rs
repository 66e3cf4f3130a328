//! Page-number pagination bookkeeping.

use serde::Serialize;

/// Default number of items requested per page.
pub const DEFAULT_PAGE_SIZE: u32 = 20;

/// Current page position and derived page count.
///
/// Invariants: `page_size >= 1`, `total_pages = max(1, ceil(total_items / page_size))`
/// and `1 <= page <= total_pages`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Cursor {
    page: u32,
    page_size: u32,
    total_items: u64,
    total_pages: u32,
}

impl Default for Cursor {
    fn default() -> Self {
        Self::new(1, DEFAULT_PAGE_SIZE, 0)
    }
}

impl Cursor {
    pub fn new(page: u32, page_size: u32, total_items: u64) -> Self {
        let page_size = page_size.max(1);
        let total_pages = total_pages(total_items, page_size);
        Self {
            page: page.clamp(1, total_pages),
            page_size,
            total_items,
            total_pages,
        }
    }

    pub fn page(&self) -> u32 {
        self.page
    }

    pub fn page_size(&self) -> u32 {
        self.page_size
    }

    pub fn total_items(&self) -> u64 {
        self.total_items
    }

    pub fn total_pages(&self) -> u32 {
        self.total_pages
    }

    /// Clamp an arbitrary page number into `[1, total_pages]`.
    pub fn clamp(&self, page: u32) -> u32 {
        page.clamp(1, self.total_pages)
    }

    pub fn has_previous(&self) -> bool {
        self.page > 1
    }

    pub fn has_next(&self) -> bool {
        self.page < self.total_pages
    }

    /// `None` at the first page.
    pub fn previous_page(&self) -> Option<u32> {
        self.has_previous().then(|| self.page - 1)
    }

    /// `None` at the last page.
    pub fn next_page(&self) -> Option<u32> {
        self.has_next().then(|| self.page + 1)
    }

    /// Zero-based item range covered by the current page.
    pub fn item_range(&self) -> std::ops::Range<usize> {
        let start = (self.page as usize - 1) * self.page_size as usize;
        let end = (start + self.page_size as usize).min(self.total_items as usize);
        start.min(end)..end
    }
}

/// `max(1, ceil(total_items / page_size))`.
pub fn total_pages(total_items: u64, page_size: u32) -> u32 {
    let page_size = u64::from(page_size.max(1));
    let pages = total_items.div_ceil(page_size).max(1);
    u32::try_from(pages).unwrap_or(u32::MAX)
}
