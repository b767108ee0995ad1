//! A single window of a paginated result set.

use serde::Serialize;

use crate::PageRequest;

/// Items for one page plus the size of the whole result set.
///
/// A request beyond the last page yields an empty page whose metadata still
/// reports the real totals, so callers can tell "out of range" from "no data".
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Page<T> {
    items: Vec<T>,
    number: u32,
    size: u32,
    total_items: u64,
}

/// Serialisable page metadata for response envelopes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PageMeta {
    /// One-based page number that was served.
    pub number: u32,
    /// Maximum number of items per page.
    pub page_size: u32,
    /// Number of items across all pages.
    pub total_items: u64,
    /// Number of pages; an empty result set still has one (empty) page.
    pub total_pages: u64,
    /// Whether a following page exists.
    pub has_next: bool,
    /// Whether a preceding page exists.
    pub has_previous: bool,
}

impl<T> Page<T> {
    /// Assemble a page from the items fetched for `request`.
    #[must_use]
    pub fn new(items: Vec<T>, request: PageRequest, total_items: u64) -> Self {
        Self {
            items,
            number: request.number(),
            size: request.size(),
            total_items,
        }
    }

    /// Items on this page, in result order.
    #[must_use]
    pub fn items(&self) -> &[T] {
        &self.items
    }

    /// Consume the page and return its items.
    #[must_use]
    pub fn into_items(self) -> Vec<T> {
        self.items
    }

    /// One-based page number.
    #[must_use]
    pub const fn number(&self) -> u32 {
        self.number
    }

    /// Configured page size.
    #[must_use]
    pub const fn size(&self) -> u32 {
        self.size
    }

    /// Number of items across all pages.
    #[must_use]
    pub const fn total_items(&self) -> u64 {
        self.total_items
    }

    /// Number of pages, never less than one.
    #[must_use]
    pub fn total_pages(&self) -> u64 {
        self.total_items.div_ceil(u64::from(self.size.max(1))).max(1)
    }

    /// Whether a following page exists.
    #[must_use]
    pub fn has_next(&self) -> bool {
        u64::from(self.number) < self.total_pages()
    }

    /// Whether a preceding page exists.
    #[must_use]
    pub const fn has_previous(&self) -> bool {
        self.number > 1
    }

    /// Whether the requested page lies beyond the last page.
    #[must_use]
    pub fn is_out_of_range(&self) -> bool {
        u64::from(self.number) > self.total_pages()
    }

    /// Metadata for response envelopes.
    #[must_use]
    pub fn meta(&self) -> PageMeta {
        PageMeta {
            number: self.number,
            page_size: self.size,
            total_items: self.total_items,
            total_pages: self.total_pages(),
            has_next: self.has_next(),
            has_previous: self.has_previous(),
        }
    }

    /// Transform every item while keeping the pagination metadata.
    #[must_use]
    pub fn map<U, F>(self, f: F) -> Page<U>
    where
        F: FnMut(T) -> U,
    {
        Page {
            items: self.items.into_iter().map(f).collect(),
            number: self.number,
            size: self.size,
            total_items: self.total_items,
        }
    }
}
