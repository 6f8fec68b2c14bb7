//! Page results returned by the list endpoints of the library API.

use serde::{Deserialize, Serialize};

/// Server-supplied description of where a page sits in the full result set.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct PaginationMeta {
    pub current_page: usize,
    pub total_pages: usize,
    #[serde(default)]
    pub total_items: usize,
    #[serde(default)]
    pub items_per_page: usize,
    #[serde(default)]
    pub has_next_page: bool,
    #[serde(default)]
    pub has_prev_page: bool,
}

impl PaginationMeta {
    pub fn new(
        current_page: usize,
        total_pages: usize,
        total_items: usize,
        items_per_page: usize,
    ) -> Self {
        Self {
            current_page,
            total_pages,
            total_items,
            items_per_page,
            has_next_page: false,
            has_prev_page: false,
        }
        .normalized()
    }

    /// Metadata for an endpoint that returned every item at once.
    pub fn single_page(total_items: usize) -> Self {
        Self::new(1, 1, total_items, total_items)
    }

    /// Re-derives the navigation flags from the page counters.
    ///
    /// A page cursor of zero is treated as page one; a cursor past the last
    /// page is pulled back to it.
    pub fn normalized(mut self) -> Self {
        self.current_page = self.current_page.max(1);
        if self.total_pages > 0 {
            self.current_page = self.current_page.min(self.total_pages);
        }
        self.has_next_page = self.current_page < self.total_pages;
        self.has_prev_page = self.current_page > 1;
        self
    }

    /// Whether `page` addresses an existing page of this result set.
    pub fn contains(&self, page: usize) -> bool {
        (1..=self.total_pages).contains(&page)
    }
}

/// One page of items together with its pagination metadata.
///
/// Replaced wholesale on every fetch.
#[derive(Clone, Debug, Serialize)]
pub struct PageResult<T> {
    pub items: Vec<T>,
    pub pagination: PaginationMeta,
}
