// src/services/feeds.rs

//! Uniform request / error / fallback wrappers around the content API.
//!
//! Page handlers never see an upstream error directly: a failed fetch is
//! captured as a message next to whatever content can still be shown.

use std::fmt;

use chrono::Utc;

use crate::models::Article;
use crate::services::ContentSource;
use crate::services::fallback::fallback_articles;

/// Which listing to load.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FeedKind {
    Latest,
    Top,
    Search(String),
    User(String),
}

impl fmt::Display for FeedKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FeedKind::Latest => write!(f, "latest articles"),
            FeedKind::Top => write!(f, "top articles"),
            FeedKind::Search(q) => write!(f, "search '{q}'"),
            FeedKind::User(u) => write!(f, "articles by @{u}"),
        }
    }
}

/// Outcome of loading one page of a listing.
#[derive(Debug, Clone, Default)]
pub struct FeedResult {
    pub articles: Vec<Article>,
    pub error: Option<String>,
    pub has_more: bool,
    pub using_fallback: bool,
}

impl FeedResult {
    fn empty() -> Self {
        Self::default()
    }
}

/// Outcome of loading a single article.
#[derive(Debug, Clone, Default)]
pub struct ArticleResult {
    pub article: Option<Article>,
    pub error: Option<String>,
}

/// Load one page of a listing, converting failures into a message.
pub async fn load_feed(
    source: &dyn ContentSource,
    kind: &FeedKind,
    page: u32,
    per_page: u32,
) -> FeedResult {
    let page = page.max(1);

    let result = match kind {
        FeedKind::Latest => source.latest_articles(page, per_page).await,
        FeedKind::Top => source.top_articles(page, per_page).await,
        FeedKind::Search(query) => {
            if query.trim().is_empty() {
                return FeedResult::empty();
            }
            source.search_articles(query, page, per_page).await
        }
        FeedKind::User(username) => {
            if username.trim().is_empty() {
                return FeedResult::empty();
            }
            source.user_articles(username, page, per_page).await
        }
    };

    match result {
        Ok(articles) => FeedResult {
            has_more: articles.len() == per_page as usize,
            articles,
            error: None,
            using_fallback: false,
        },
        Err(e) => {
            log::warn!("Failed to fetch {kind} (page {page}): {e}");
            let fallback = page == 1 && matches!(kind, FeedKind::Latest | FeedKind::Top);
            FeedResult {
                articles: if fallback {
                    fallback_articles(Utc::now())
                } else {
                    Vec::new()
                },
                error: Some(e.to_string()),
                has_more: false,
                using_fallback: fallback,
            }
        }
    }
}

/// Load a single article, converting failures into a message.
pub async fn load_article(source: &dyn ContentSource, username: &str, slug: &str) -> ArticleResult {
    match source.article(username, slug).await {
        Ok(article) => ArticleResult {
            article,
            error: None,
        },
        Err(e) => {
            log::warn!("Failed to fetch article {username}/{slug}: {e}");
            ArticleResult {
                article: None,
                error: Some(e.to_string()),
            }
        }
    }
}

/// Page count shown by pagination. Upstream has no totals, so the only
/// signal is whether the current page came back full.
pub fn total_pages_hint(page: u32, has_more: bool) -> u32 {
    let page = page.max(1);
    if has_more { page.saturating_add(1) } else { page }
}
