//! Console aggregate: navigation shell plus one controller per page

use mealdesk_client::AdminApi;
use std::sync::Arc;

use crate::error::ConsoleResult;
use crate::navigation::{Page, Shell};
use crate::notice::Notice;
use crate::pages::{
    IngredientsPage, MappingsPage, MealPricingPage, SitesPage, SuppliersPage, UsersPage,
};

pub struct Console {
    api: Arc<dyn AdminApi>,
    shell: Shell,
    pub users: UsersPage,
    pub sites: SitesPage,
    pub suppliers: SuppliersPage,
    pub mappings: MappingsPage,
    pub meal_pricing: MealPricingPage,
    pub ingredients: IngredientsPage,
}

impl Console {
    /// # Arguments
    /// * `api` - admin API shared by every page
    /// * `page_size` - rows per page of paginated lists
    pub fn new(api: Arc<dyn AdminApi>, page_size: u32) -> Self {
        Self {
            users: UsersPage::new(api.clone(), page_size),
            sites: SitesPage::new(api.clone()),
            suppliers: SuppliersPage::new(api.clone(), page_size),
            mappings: MappingsPage::new(api.clone(), page_size),
            meal_pricing: MealPricingPage::new(api.clone()),
            ingredients: IngredientsPage::new(api.clone()),
            shell: Shell::new(),
            api,
        }
    }

    pub fn shell(&self) -> &Shell {
        &self.shell
    }

    /// Switch to the page named `name` and load it
    ///
    /// An unknown name changes nothing. A failed load still leaves the page
    /// shown with its error notice.
    pub async fn show_page(&mut self, name: &str) -> ConsoleResult<Page> {
        let page = self.shell.show_page(name)?;
        self.activate(page).await?;
        Ok(page)
    }

    /// Run the initializer of `page`
    pub async fn activate(&mut self, page: Page) -> ConsoleResult<()> {
        match page {
            Page::Users => self.users.load().await,
            Page::Sites => self.sites.load().await,
            Page::Suppliers => self.suppliers.load().await,
            Page::Mappings => self.mappings.load().await,
            Page::MealPricing => self.meal_pricing.load().await,
            Page::Ingredients => Ok(()),
        }
    }

    /// Notice of the page currently shown
    pub fn notice(&self) -> Option<&Notice> {
        match self.shell.active()? {
            Page::Users => self.users.notice.as_ref(),
            Page::Sites => self.sites.notice.as_ref(),
            Page::Suppliers => self.suppliers.notice.as_ref(),
            Page::Mappings => self.mappings.notice.as_ref(),
            Page::MealPricing => self.meal_pricing.notice.as_ref(),
            Page::Ingredients => self.ingredients.notice.as_ref(),
        }
    }

    /// End the backend session
    pub async fn logout(&mut self) -> ConsoleResult<()> {
        self.api.logout().await?;
        tracing::info!("logged out");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pages::testing::FakeApi;

    #[tokio::test]
    async fn test_show_page_loads_only_that_page() {
        let api = Arc::new(FakeApi::default());
        let mut console = Console::new(api.clone(), 20);

        assert_eq!(console.show_page("meal-pricing").await.unwrap(), Page::MealPricing);
        assert_eq!(console.shell().active(), Some(Page::MealPricing));
        assert_eq!(api.calls(), vec!["list_meal_pricing"]);

        console.show_page("ingredients").await.unwrap();
        assert_eq!(api.calls().len(), 1);
    }

    #[tokio::test]
    async fn test_unknown_page_keeps_current() {
        let api = Arc::new(FakeApi::default());
        let mut console = Console::new(api.clone(), 20);
        console.show_page("users").await.unwrap();

        assert!(console.show_page("reports").await.is_err());
        assert_eq!(console.shell().active(), Some(Page::Users));
        assert_eq!(api.calls(), vec!["list_users"]);
    }
}
