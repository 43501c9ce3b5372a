//! Client configuration

use crate::{AdminClient, ClientResult, NetworkHttpClient};

/// Default rows per list page
pub const DEFAULT_PAGE_SIZE: u32 = 20;

/// Client configuration for connecting to the admin backend
///
/// # Environment variables
///
/// | Variable | Default | Meaning |
/// |----------|---------|---------|
/// | MEALDESK_API_URL | http://localhost:8000 | Backend base URL |
/// | MEALDESK_TIMEOUT_SECS | 30 | Request timeout |
/// | MEALDESK_TOKEN | (none) | Optional bearer token |
/// | MEALDESK_PAGE_SIZE | 20 | Rows per list page |
#[derive(Debug, Clone)]
pub struct ClientConfig {
    /// Server base URL (e.g., "http://localhost:8000")
    pub base_url: String,

    /// Bearer token; the cookie session is used when absent
    pub token: Option<String>,

    /// Request timeout in seconds
    pub timeout: u64,

    /// Rows per list page
    pub page_size: u32,
}

impl ClientConfig {
    /// Create a new client configuration
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            token: None,
            timeout: 30,
            page_size: DEFAULT_PAGE_SIZE,
        }
    }

    /// Load from environment variables, falling back to defaults
    pub fn from_env() -> Self {
        let mut config = Self::new(
            std::env::var("MEALDESK_API_URL").unwrap_or_else(|_| "http://localhost:8000".into()),
        );
        config.token = std::env::var("MEALDESK_TOKEN").ok().filter(|t| !t.is_empty());
        config.timeout = std::env::var("MEALDESK_TIMEOUT_SECS")
            .ok()
            .and_then(|v| v.parse().ok())
            .unwrap_or(30);
        config.page_size = std::env::var("MEALDESK_PAGE_SIZE")
            .ok()
            .and_then(|v| v.parse().ok())
            .unwrap_or(DEFAULT_PAGE_SIZE);
        config
    }

    /// Set the bearer token
    pub fn with_token(mut self, token: impl Into<String>) -> Self {
        self.token = Some(token.into());
        self
    }

    /// Set the request timeout
    pub fn with_timeout(mut self, seconds: u64) -> Self {
        self.timeout = seconds;
        self
    }

    /// Set the rows per list page
    pub fn with_page_size(mut self, page_size: u32) -> Self {
        self.page_size = page_size;
        self
    }

    /// Create a network HTTP client from this configuration
    pub fn build_http_client(&self) -> ClientResult<NetworkHttpClient> {
        NetworkHttpClient::new(self)
    }

    /// Create an admin API client over the network transport
    pub fn build_admin_client(&self) -> ClientResult<AdminClient<NetworkHttpClient>> {
        Ok(AdminClient::new(self.build_http_client()?))
    }
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self::new("http://localhost:8000")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builder_overrides() {
        let config = ClientConfig::new("http://admin.local")
            .with_token("abc")
            .with_timeout(5)
            .with_page_size(50);
        assert_eq!(config.base_url, "http://admin.local");
        assert_eq!(config.token.as_deref(), Some("abc"));
        assert_eq!(config.timeout, 5);
        assert_eq!(config.page_size, 50);
    }

    #[test]
    fn test_defaults() {
        let config = ClientConfig::default();
        assert_eq!(config.page_size, DEFAULT_PAGE_SIZE);
        assert!(config.token.is_none());
    }
}
