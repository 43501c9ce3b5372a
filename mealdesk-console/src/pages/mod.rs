//! Page controllers
//!
//! Each controller holds the admin API handle and its page-local state, and
//! reloads its data wholesale after every successful mutation.

mod ingredients;
mod mappings;
mod meal_pricing;
mod sites;
mod suppliers;
mod users;

pub use ingredients::IngredientsPage;
pub use mappings::{MappingFilter, MappingForm, MappingsPage};
pub use meal_pricing::{
    EditingCell, MealPricingPage, PendingEdit, PricingField, PricingForm, PricingRow, RecordState,
};
pub use sites::{SiteForm, SiteStats, SitesPage};
pub use suppliers::{SupplierForm, SuppliersPage};
pub use users::{UserForm, UsersPage};

use shared::{ListPage, Pagination};

use crate::error::ConsoleError;
use crate::notice::Notice;
use crate::view::LoadState;

/// Rows of the current page of a paginated list
#[derive(Debug, Clone)]
pub struct Listing<T> {
    pub page: u32,
    pub per_page: u32,
    pub rows: Vec<T>,
    pub pagination: Pagination,
    pub state: LoadState,
}

impl<T: Clone> Listing<T> {
    pub fn new(per_page: u32) -> Self {
        Self {
            page: 1,
            per_page,
            rows: Vec::new(),
            pagination: Pagination::new(1, per_page, 0),
            state: LoadState::NotLoaded,
        }
    }

    /// Take a server page, slicing locally when the server sent everything
    pub fn apply(&mut self, list: ListPage<T>) {
        self.pagination = list.pagination(self.page, self.per_page);
        self.rows = self.pagination.page_slice(&list.items).to_vec();
        self.state = LoadState::Loaded;
    }

    /// Keep the last rows, mark the table as not loaded
    pub fn fail(&mut self, message: impl Into<String>) {
        self.state = LoadState::Failed(message.into());
    }

    /// Move to `page`, clamped to the known page range
    pub fn go_to(&mut self, page: u32) {
        let last = self.pagination.total_pages.max(1);
        self.page = page.clamp(1, last);
    }
}

/// Record `err` as the page notice and hand it back
pub(crate) fn report(notice: &mut Option<Notice>, err: ConsoleError) -> ConsoleError {
    tracing::warn!(error = %err, "admin action failed");
    *notice = Some(Notice::error(err.user_message()));
    err
}

/// Trimmed text, `None` when blank
pub(crate) fn non_blank(value: &str) -> Option<String> {
    let value = value.trim();
    (!value.is_empty()).then(|| value.to_string())
}
