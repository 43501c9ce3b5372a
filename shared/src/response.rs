//! Response envelope and pagination
//!
//! Every admin endpoint answers with
//! ```json
//! { "success": true, "message": "...", "<data-key>": ... }
//! ```
//! The data key differs per endpoint (`users`, `sites`, `mappings`, ...), so
//! [`Envelope`] only models the common header fields; callers read their data
//! key from the same JSON object.

use serde::{Deserialize, Serialize};

/// Common header fields of the admin response envelope
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Envelope {
    /// Outcome flag. Some endpoints omit it; absence counts as success.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub success: Option<bool>,
    /// Human-readable message, mostly present on failures and mutations
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

impl Envelope {
    /// Successful envelope with a message
    pub fn ok(message: impl Into<String>) -> Self {
        Self {
            success: Some(true),
            message: Some(message.into()),
        }
    }

    /// Failed envelope with a message
    pub fn fail(message: impl Into<String>) -> Self {
        Self {
            success: Some(false),
            message: Some(message.into()),
        }
    }

    /// `true` unless the server explicitly reported `success: false`
    pub fn is_success(&self) -> bool {
        self.success.unwrap_or(true)
    }
}

/// One page of a list endpoint as returned by the server
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ListPage<T> {
    pub items: Vec<T>,
    /// Total number of matching rows, when the server reports it
    pub total_count: Option<u64>,
    /// Total number of pages, when the server reports it
    pub total_pages: Option<u32>,
}

impl<T> ListPage<T> {
    /// Page holding every item, without server-side counts
    pub fn unpaged(items: Vec<T>) -> Self {
        Self {
            items,
            total_count: None,
            total_pages: None,
        }
    }

    /// Resolve pagination metadata for this page, see [`Pagination::resolve`]
    pub fn pagination(&self, page: u32, per_page: u32) -> Pagination {
        Pagination::resolve(
            page,
            per_page,
            self.total_count,
            self.total_pages,
            self.items.len(),
        )
    }
}

/// Pagination metadata
///
/// The single contract for every list page: a server-provided `total_pages`
/// wins; otherwise pages are derived from `total_count` and `per_page`, and
/// when the server sends no count either, from the number of items it sent.
#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Eq)]
pub struct Pagination {
    /// Current page number (1-based)
    pub page: u32,
    /// Items per page (0 = everything on one page)
    pub per_page: u32,
    /// Total number of items
    pub total: u64,
    /// Total number of pages
    pub total_pages: u32,
}

impl Pagination {
    /// Create a new pagination, deriving the page count
    pub fn new(page: u32, per_page: u32, total: u64) -> Self {
        let total_pages = match (per_page, total) {
            (_, 0) => 0,
            (0, _) => 1,
            (per_page, total) => u32::try_from(total.div_ceil(per_page as u64)).unwrap_or(u32::MAX),
        };
        Self {
            page: page.max(1),
            per_page,
            total,
            total_pages,
        }
    }

    /// Combine what the server reported with what the client knows
    pub fn resolve(
        page: u32,
        per_page: u32,
        total_count: Option<u64>,
        total_pages: Option<u32>,
        items_len: usize,
    ) -> Self {
        let total = total_count.unwrap_or(items_len as u64);
        let mut pagination = Self::new(page, per_page, total);
        if let Some(server_pages) = total_pages {
            pagination.total_pages = server_pages;
        }
        pagination
    }

    /// Index of the first item of the current page
    pub fn offset(&self) -> usize {
        (self.page.saturating_sub(1) as usize).saturating_mul(self.per_page as usize)
    }

    pub fn has_prev(&self) -> bool {
        self.page > 1
    }

    pub fn has_next(&self) -> bool {
        self.page < self.total_pages
    }

    /// Items of the current page
    ///
    /// A server that ignores `limit` returns the whole listing; in that case
    /// the current page is cut out locally. A list no longer than one page is
    /// taken as already paginated.
    pub fn page_slice<'a, T>(&self, items: &'a [T]) -> &'a [T] {
        let per_page = self.per_page as usize;
        if per_page == 0 || items.len() <= per_page {
            return items;
        }
        let start = self.offset().min(items.len());
        let end = start.saturating_add(per_page).min(items.len());
        &items[start..end]
    }

    /// "page / total_pages" label, showing at least one page
    pub fn label(&self) -> String {
        format!("{} / {}", self.page, self.total_pages.max(1))
    }
}
