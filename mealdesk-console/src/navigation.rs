//! Navigation shell
//!
//! Exactly one page container is visible at a time. Switching pages marks the
//! nav item active and tells the caller which page initializer to run.

use std::str::FromStr;

use crate::error::{ConsoleError, ConsoleResult};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Page {
    Users,
    Sites,
    Suppliers,
    Mappings,
    MealPricing,
    Ingredients,
}

impl Page {
    pub const ALL: [Page; 6] = [
        Page::Users,
        Page::Sites,
        Page::Suppliers,
        Page::Mappings,
        Page::MealPricing,
        Page::Ingredients,
    ];

    /// Page name used in links (`#meal-pricing`)
    pub fn name(&self) -> &'static str {
        match self {
            Self::Users => "users",
            Self::Sites => "sites",
            Self::Suppliers => "suppliers",
            Self::Mappings => "mappings",
            Self::MealPricing => "meal-pricing",
            Self::Ingredients => "ingredients",
        }
    }

    pub fn title(&self) -> &'static str {
        match self {
            Self::Users => "사용자 관리",
            Self::Sites => "사업장 관리",
            Self::Suppliers => "협력업체 관리",
            Self::Mappings => "협력업체 매핑",
            Self::MealPricing => "식단가 관리",
            Self::Ingredients => "식자재 업로드",
        }
    }

    pub fn container_id(&self) -> String {
        format!("{}-page", self.name())
    }
}

impl FromStr for Page {
    type Err = ConsoleError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let name = s.trim().trim_start_matches('#');
        Self::ALL
            .into_iter()
            .find(|page| page.name() == name)
            .ok_or_else(|| ConsoleError::UnknownPage(s.to_string()))
    }
}

/// Where a clicked link goes
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LinkRoute {
    /// Switch pages inside the console
    Internal(Page),
    /// Leave it to the browser / open elsewhere
    External,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NavItem {
    pub page: Page,
    pub title: &'static str,
    pub active: bool,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Container {
    pub id: String,
    pub visible: bool,
}

#[derive(Debug, Clone, Default)]
pub struct Shell {
    active: Option<Page>,
}

impl Shell {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn active(&self) -> Option<Page> {
        self.active
    }

    /// Show the page named `name` and hide every other container
    ///
    /// Returns the page whose initializer must run. An unknown name leaves
    /// the shell untouched.
    pub fn show_page(&mut self, name: &str) -> ConsoleResult<Page> {
        let page = name.parse::<Page>()?;
        self.active = Some(page);
        tracing::debug!(page = page.name(), "page shown");
        Ok(page)
    }

    pub fn containers(&self) -> Vec<Container> {
        Page::ALL
            .into_iter()
            .map(|page| Container {
                id: page.container_id(),
                visible: self.active == Some(page),
            })
            .collect()
    }

    pub fn nav_items(&self) -> Vec<NavItem> {
        Page::ALL
            .into_iter()
            .map(|page| NavItem {
                page,
                title: page.title(),
                active: self.active == Some(page),
            })
            .collect()
    }

    /// Decide whether a link is handled by the shell
    ///
    /// `target="_blank"` links and hrefs outside the console go to the
    /// browser. Console hrefs are `#page`, `/admin#page` or `/admin/page`.
    pub fn route_link(&self, href: &str, target: Option<&str>) -> ConsoleResult<LinkRoute> {
        let href = href.trim();
        if target == Some("_blank") {
            return Ok(LinkRoute::External);
        }
        if href.starts_with('#') {
            return href.parse().map(LinkRoute::Internal);
        }
        let Some(rest) = href.strip_prefix("/admin") else {
            return Ok(LinkRoute::External);
        };
        let name = match rest.split_once('#') {
            Some((_, fragment)) => fragment,
            None => rest.trim_matches('/'),
        };
        if name.is_empty() {
            return Ok(LinkRoute::Internal(Page::Users));
        }
        name.parse().map(LinkRoute::Internal)
    }
}
