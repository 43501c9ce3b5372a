//! Query string construction for list endpoints

use urlencoding::encode;

/// Query string builder
///
/// Blank text values are skipped so an empty search box does not filter.
#[derive(Debug, Clone, Default)]
pub struct Query {
    pairs: Vec<(&'static str, String)>,
}

impl Query {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a value
    pub fn push(&mut self, key: &'static str, value: impl ToString) -> &mut Self {
        self.pairs.push((key, value.to_string()));
        self
    }

    /// Add a value if present
    pub fn push_opt<V: ToString>(&mut self, key: &'static str, value: Option<V>) -> &mut Self {
        if let Some(value) = value {
            self.push(key, value);
        }
        self
    }

    /// Add a trimmed text value if present and not blank
    pub fn push_text(&mut self, key: &'static str, value: Option<&str>) -> &mut Self {
        if let Some(value) = value.map(str::trim).filter(|v| !v.is_empty()) {
            self.push(key, value);
        }
        self
    }

    pub fn is_empty(&self) -> bool {
        self.pairs.is_empty()
    }

    /// Append the query string to `path`
    pub fn to_path(&self, path: &str) -> String {
        if self.pairs.is_empty() {
            return path.to_string();
        }
        let query: Vec<String> = self
            .pairs
            .iter()
            .map(|(key, value)| format!("{}={}", key, encode(value)))
            .collect();
        format!("{}?{}", path, query.join("&"))
    }
}

/// Paged list with a free-text search (users, suppliers)
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchQuery {
    pub page: u32,
    pub limit: u32,
    pub search: Option<String>,
}

impl SearchQuery {
    pub fn new(page: u32, limit: u32) -> Self {
        Self {
            page,
            limit,
            search: None,
        }
    }

    pub fn with_search(mut self, search: impl Into<String>) -> Self {
        self.search = Some(search.into());
        self
    }

    pub fn to_query(&self) -> Query {
        let mut query = Query::new();
        query
            .push("page", self.page)
            .push("limit", self.limit)
            .push_text("search", self.search.as_deref());
        query
    }
}

/// Filters of the supplier mapping list
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MappingQuery {
    pub page: u32,
    pub limit: u32,
    pub supplier_id: Option<i64>,
    pub customer_id: Option<i64>,
    pub is_active: Option<bool>,
}

impl MappingQuery {
    pub fn to_query(&self) -> Query {
        let mut query = Query::new();
        query
            .push("page", self.page)
            .push("limit", self.limit)
            .push_opt("supplier_id", self.supplier_id)
            .push_opt("customer_id", self.customer_id)
            .push_opt("is_active", self.is_active);
        query
    }
}

/// Filters of the meal pricing table
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PricingQuery {
    pub location_name: Option<String>,
}

impl PricingQuery {
    pub fn to_query(&self) -> Query {
        let mut query = Query::new();
        query.push_text("location_name", self.location_name.as_deref());
        query
    }
}
