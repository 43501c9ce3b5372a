//! Mealdesk Console - admin console for the meal service backend
//!
//! One controller per admin page, each owning its page-local state:
//!
//! - [`pages::UsersPage`] / [`pages::SuppliersPage`] - searchable CRUD lists
//! - [`pages::SitesPage`] - the site hierarchy tree with drag-and-drop moves
//! - [`pages::MappingsPage`] - supplier code mappings per customer site
//! - [`pages::MealPricingPage`] - inline-editable price table with cost ratio
//! - [`pages::IngredientsPage`] - ingredient sheet upload
//!
//! [`Console`] owns the controllers and the navigation [`Shell`]. Controllers
//! produce view models ([`view`]) that [`render`] turns into text.

pub mod cli;
pub mod console;
pub mod error;
pub mod logger;
pub mod navigation;
pub mod notice;
pub mod pages;
pub mod render;
pub mod site_tree;
pub mod view;

pub use console::Console;
pub use error::{ConsoleError, ConsoleResult};
pub use navigation::{LinkRoute, Page, Shell};
pub use notice::{Notice, NoticeLevel};
