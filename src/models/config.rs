//! Application configuration structures.

use std::fs;
use std::net::SocketAddr;
use std::path::Path;

use serde::{Deserialize, Serialize};
use url::Url;

use crate::error::{AppError, Result};

/// Root application configuration.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct Config {
    /// HTTP listener settings
    #[serde(default)]
    pub server: ServerConfig,

    /// Upstream content API settings
    #[serde(default)]
    pub api: ApiConfig,

    /// Public site identity used in pages, sitemaps and metadata
    #[serde(default)]
    pub site: SiteConfig,

    /// Listing sizes
    #[serde(default)]
    pub feeds: FeedsConfig,

    /// Cache-Control hints per response class
    #[serde(default)]
    pub cache: CacheConfig,
}

impl Config {
    /// Load configuration from a TOML file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let content = fs::read_to_string(path)?;
        Ok(toml::from_str(&content)?)
    }

    /// Load configuration or return default if loading fails.
    pub fn load_or_default(path: impl AsRef<Path>) -> Self {
        Self::load(&path).unwrap_or_else(|e| {
            log::warn!(
                "Config load failed from {:?}: {}. Using defaults.",
                path.as_ref(),
                e
            );
            Self::default()
        })
    }

    /// Serialize the configuration back to TOML.
    pub fn to_toml(&self) -> Result<String> {
        Ok(toml::to_string_pretty(self)?)
    }

    /// Validate configuration values for basic sanity.
    pub fn validate(&self) -> Result<()> {
        if self.api.user_agent.trim().is_empty() {
            return Err(AppError::validation("api.user_agent is empty"));
        }
        if self.api.timeout_secs == 0 {
            return Err(AppError::validation("api.timeout_secs must be > 0"));
        }
        if self.api.sitemap_timeout_secs == 0 {
            return Err(AppError::validation(
                "api.sitemap_timeout_secs must be > 0",
            ));
        }
        for (name, value) in [
            ("feeds.per_page", self.feeds.per_page),
            ("feeds.sitemap_per_page", self.feeds.sitemap_per_page),
        ] {
            if !(1..=1000).contains(&value) {
                return Err(AppError::validation(format!(
                    "{name} must be within 1..=1000 (got {value})"
                )));
            }
        }
        Url::parse(&self.api.base_url)
            .map_err(|e| AppError::validation(format!("api.base_url: {e}")))?;
        Url::parse(&self.site.base_url)
            .map_err(|e| AppError::validation(format!("site.base_url: {e}")))?;
        self.bind_addr()?;
        if self.site.name.trim().is_empty() {
            return Err(AppError::validation("site.name is empty"));
        }
        Ok(())
    }

    /// Parsed listener address.
    pub fn bind_addr(&self) -> Result<SocketAddr> {
        self.server
            .bind
            .parse()
            .map_err(|e| AppError::validation(format!("server.bind '{}': {e}", self.server.bind)))
    }

    /// Absolute site URL for a path, without a doubled slash.
    pub fn site_url(&self, path: &str) -> String {
        format!("{}{}", self.site.base_url.trim_end_matches('/'), path)
    }
}

/// HTTP listener settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    /// Socket address to bind, e.g. "127.0.0.1:3000"
    #[serde(default = "defaults::bind")]
    pub bind: String,

    /// Emit one log line per request
    #[serde(default = "defaults::enabled")]
    pub request_log: bool,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            bind: defaults::bind(),
            request_log: defaults::enabled(),
        }
    }
}

/// Upstream API client settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiConfig {
    /// Base URL of the content API
    #[serde(default = "defaults::api_base_url")]
    pub base_url: String,

    /// User-Agent header for API requests
    #[serde(default = "defaults::user_agent")]
    pub user_agent: String,

    /// Request timeout in seconds
    #[serde(default = "defaults::timeout")]
    pub timeout_secs: u64,

    /// Race timeout for each sitemap source fetch
    #[serde(default = "defaults::sitemap_timeout")]
    pub sitemap_timeout_secs: u64,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            base_url: defaults::api_base_url(),
            user_agent: defaults::user_agent(),
            timeout_secs: defaults::timeout(),
            sitemap_timeout_secs: defaults::sitemap_timeout(),
        }
    }
}

/// Public identity of the mirror.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SiteConfig {
    #[serde(default = "defaults::site_name")]
    pub name: String,

    /// Canonical origin used for absolute links
    #[serde(default = "defaults::site_base_url")]
    pub base_url: String,

    #[serde(default = "defaults::tagline")]
    pub tagline: String,

    #[serde(default = "defaults::description")]
    pub description: String,

    #[serde(default = "defaults::keywords")]
    pub keywords: String,

    /// Embed the visitorbadge.io counter on listing pages
    #[serde(default)]
    pub visitor_badge: bool,
}

impl Default for SiteConfig {
    fn default() -> Self {
        Self {
            name: defaults::site_name(),
            base_url: defaults::site_base_url(),
            tagline: defaults::tagline(),
            description: defaults::description(),
            keywords: defaults::keywords(),
            visitor_badge: false,
        }
    }
}

/// Listing sizes.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FeedsConfig {
    /// Articles per grid page
    #[serde(default = "defaults::per_page")]
    pub per_page: u32,

    /// Articles fetched per source for the sitemap index
    #[serde(default = "defaults::sitemap_per_page")]
    pub sitemap_per_page: u32,
}

impl Default for FeedsConfig {
    fn default() -> Self {
        Self {
            per_page: defaults::per_page(),
            sitemap_per_page: defaults::sitemap_per_page(),
        }
    }
}

/// Revalidation windows in seconds.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CacheConfig {
    #[serde(default = "defaults::revalidate_latest")]
    pub latest_secs: u64,
    #[serde(default = "defaults::revalidate_top")]
    pub top_secs: u64,
    #[serde(default = "defaults::revalidate_latest")]
    pub search_secs: u64,
    #[serde(default = "defaults::revalidate_article")]
    pub article_secs: u64,
    #[serde(default = "defaults::revalidate_top")]
    pub user_secs: u64,
    #[serde(default = "defaults::revalidate_static")]
    pub static_secs: u64,
    #[serde(default = "defaults::revalidate_article")]
    pub sitemap_secs: u64,
    #[serde(default = "defaults::revalidate_authors_sitemap")]
    pub authors_sitemap_secs: u64,
    /// Max-age for responses built from a failed upstream call
    #[serde(default = "defaults::revalidate_latest")]
    pub error_secs: u64,
}

impl Default for CacheConfig {
    fn default() -> Self {
        Self {
            latest_secs: defaults::revalidate_latest(),
            top_secs: defaults::revalidate_top(),
            search_secs: defaults::revalidate_latest(),
            article_secs: defaults::revalidate_article(),
            user_secs: defaults::revalidate_top(),
            static_secs: defaults::revalidate_static(),
            sitemap_secs: defaults::revalidate_article(),
            authors_sitemap_secs: defaults::revalidate_authors_sitemap(),
            error_secs: defaults::revalidate_latest(),
        }
    }
}

mod defaults {
    // Server defaults
    pub fn bind() -> String {
        "127.0.0.1:3000".into()
    }
    pub fn enabled() -> bool {
        true
    }

    // API defaults
    pub fn api_base_url() -> String {
        "https://dev.to/api".into()
    }
    pub fn user_agent() -> String {
        "DevArt-Blog/1.0 (https://devto.30tools.com)".into()
    }
    pub fn timeout() -> u64 {
        30
    }
    pub fn sitemap_timeout() -> u64 {
        10
    }

    // Site defaults
    pub fn site_name() -> String {
        "DevArt".into()
    }
    pub fn site_base_url() -> String {
        "https://devto.30tools.com".into()
    }
    pub fn tagline() -> String {
        "Discover the latest programming articles and developer insights".into()
    }
    pub fn description() -> String {
        "Discover the latest programming articles, coding tutorials, and developer resources \
         from the Dev.to community. Stay updated with trending tech content."
            .into()
    }
    pub fn keywords() -> String {
        "programming, development, coding, tutorials, javascript, python, react, nextjs, \
         web development, software engineering"
            .into()
    }

    // Feed defaults
    pub fn per_page() -> u32 {
        12
    }
    pub fn sitemap_per_page() -> u32 {
        100
    }

    // Cache defaults
    pub fn revalidate_latest() -> u64 {
        300
    }
    pub fn revalidate_top() -> u64 {
        600
    }
    pub fn revalidate_article() -> u64 {
        3600
    }
    pub fn revalidate_authors_sitemap() -> u64 {
        7200
    }
    pub fn revalidate_static() -> u64 {
        86400
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn validate_default_config_ok() {
        assert!(Config::default().validate().is_ok());
    }

    #[test]
    fn validate_rejects_empty_user_agent() {
        let mut config = Config::default();
        config.api.user_agent = "  ".to_string();
        assert!(config.validate().is_err());
    }

    #[test]
    fn validate_rejects_zero_timeout() {
        let mut config = Config::default();
        config.api.timeout_secs = 0;
        assert!(config.validate().is_err());
    }

    #[test]
    fn validate_rejects_out_of_range_per_page() {
        let mut config = Config::default();
        config.feeds.per_page = 0;
        assert!(config.validate().is_err());
        config.feeds.per_page = 1001;
        assert!(config.validate().is_err());
    }

    #[test]
    fn validate_rejects_bad_urls_and_bind() {
        let mut config = Config::default();
        config.site.base_url = "not a url".to_string();
        assert!(config.validate().is_err());

        let mut config = Config::default();
        config.server.bind = "localhost".to_string();
        assert!(config.validate().is_err());
    }

    #[test]
    fn partial_toml_fills_defaults() {
        let config: Config = toml::from_str(
            r#"
            [site]
            name = "Mirror"

            [feeds]
            per_page = 30
            "#,
        )
        .unwrap();

        assert_eq!(config.site.name, "Mirror");
        assert_eq!(config.site.base_url, "https://devto.30tools.com");
        assert_eq!(config.feeds.per_page, 30);
        assert_eq!(config.feeds.sitemap_per_page, 100);
        assert_eq!(config.cache.article_secs, 3600);
        assert_eq!(config.api.base_url, "https://dev.to/api");
    }

    #[test]
    fn site_url_joins_without_double_slash() {
        let mut config = Config::default();
        config.site.base_url = "https://example.com/".to_string();
        assert_eq!(config.site_url("/trending"), "https://example.com/trending");
        assert_eq!(config.site_url(""), "https://example.com");
    }

    #[test]
    fn toml_round_trip_preserves_values() {
        let mut config = Config::default();
        config.server.bind = "0.0.0.0:8080".into();
        let text = config.to_toml().unwrap();
        let parsed: Config = toml::from_str(&text).unwrap();
        assert_eq!(parsed.server.bind, "0.0.0.0:8080");
    }
}
