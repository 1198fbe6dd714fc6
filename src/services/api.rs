// src/services/api.rs

//! Content API client.
//!
//! `ContentSource` is the seam between page rendering and the upstream API;
//! `DevToClient` is the production implementation over `reqwest`.

use async_trait::async_trait;
use reqwest::{Client, StatusCode};
use serde::de::DeserializeOwned;

use crate::error::{AppError, Result};
use crate::models::{ApiConfig, Article};
use crate::utils::http::create_async_client;
use crate::utils::url::{endpoint, validate_slug, validate_username};

/// Read-only access to article listings and details.
#[async_trait]
pub trait ContentSource: Send + Sync {
    /// Newest articles.
    async fn latest_articles(&self, page: u32, per_page: u32) -> Result<Vec<Article>>;

    /// Most popular articles of the past week.
    async fn top_articles(&self, page: u32, per_page: u32) -> Result<Vec<Article>>;

    /// Articles matching a query. Upstream only supports tag matching.
    async fn search_articles(&self, query: &str, page: u32, per_page: u32)
    -> Result<Vec<Article>>;

    /// A single article with its body. `Ok(None)` when upstream has no such article.
    async fn article(&self, username: &str, slug: &str) -> Result<Option<Article>>;

    /// Articles published by one author.
    async fn user_articles(&self, username: &str, page: u32, per_page: u32)
    -> Result<Vec<Article>>;
}

/// Days of history considered by the "top" listing.
const TOP_WINDOW_DAYS: &str = "7";

/// HTTP client for the Dev.to API.
#[derive(Clone)]
pub struct DevToClient {
    client: Client,
    base_url: String,
}

impl DevToClient {
    /// Create a client from API settings.
    pub fn new(config: &ApiConfig) -> Result<Self> {
        Ok(Self::with_client(
            create_async_client(config)?,
            config.base_url.clone(),
        ))
    }

    /// Create a client around an existing `reqwest::Client`.
    pub fn with_client(client: Client, base_url: impl Into<String>) -> Self {
        Self {
            client,
            base_url: base_url.into(),
        }
    }

    async fn get_json<T: DeserializeOwned>(
        &self,
        segments: &[&str],
        query: &[(&str, String)],
    ) -> Result<Option<T>> {
        let url = endpoint(&self.base_url, segments, query)?;
        log::debug!("GET {url}");

        let response = self.client.get(url.clone()).send().await?;
        let status = response.status();
        if status == StatusCode::NOT_FOUND {
            return Ok(None);
        }
        if !status.is_success() {
            log::warn!("Content API answered {} for {}", status.as_u16(), url.path());
            return Err(AppError::api(url.path(), status.as_u16()));
        }
        Ok(Some(response.json::<T>().await?))
    }

    async fn get_list(
        &self,
        segments: &[&str],
        query: &[(&str, String)],
    ) -> Result<Vec<Article>> {
        match self.get_json::<Vec<Article>>(segments, query).await? {
            Some(articles) => Ok(articles),
            None => Err(AppError::api(segments.join("/"), 404)),
        }
    }

    fn paging(page: u32, per_page: u32) -> [(&'static str, String); 2] {
        [("page", page.max(1).to_string()), ("per_page", per_page.to_string())]
    }
}

#[async_trait]
impl ContentSource for DevToClient {
    async fn latest_articles(&self, page: u32, per_page: u32) -> Result<Vec<Article>> {
        self.get_list(&["articles", "latest"], &Self::paging(page, per_page))
            .await
    }

    async fn top_articles(&self, page: u32, per_page: u32) -> Result<Vec<Article>> {
        let [p, pp] = Self::paging(page, per_page);
        self.get_list(&["articles"], &[p, pp, ("top", TOP_WINDOW_DAYS.to_string())])
            .await
    }

    async fn search_articles(
        &self,
        query: &str,
        page: u32,
        per_page: u32,
    ) -> Result<Vec<Article>> {
        let [p, pp] = Self::paging(page, per_page);
        self.get_list(&["articles"], &[p, pp, ("tag", query.trim().to_string())])
            .await
    }

    async fn article(&self, username: &str, slug: &str) -> Result<Option<Article>> {
        let username = validate_username(username)?;
        let slug = validate_slug(slug)?;
        self.get_json(&["articles", username, slug], &[]).await
    }

    async fn user_articles(
        &self,
        username: &str,
        page: u32,
        per_page: u32,
    ) -> Result<Vec<Article>> {
        let username = validate_username(username)?;
        let [p, pp] = Self::paging(page, per_page);
        self.get_list(&["articles"], &[("username", username.to_string()), p, pp])
            .await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn paging_clamps_page_to_one() {
        let [p, pp] = DevToClient::paging(0, 12);
        assert_eq!(p, ("page", "1".to_string()));
        assert_eq!(pp, ("per_page", "12".to_string()));
    }

    #[tokio::test]
    async fn invalid_segments_fail_before_any_request() {
        // Unroutable base: any request attempt would surface as an HTTP error.
        let client = DevToClient::with_client(Client::new(), "http://127.0.0.1:9");
        let err = client.article("../etc", "passwd").await.unwrap_err();
        assert!(matches!(err, AppError::InvalidPath { .. }));

        let err = client.user_articles("a b", 1, 12).await.unwrap_err();
        assert!(matches!(err, AppError::InvalidPath { .. }));
    }
}
