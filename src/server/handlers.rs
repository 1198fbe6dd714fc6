// src/server/handlers.rs

//! Route handlers: parse the request, fetch through the services layer,
//! render a page.

use axum::extract::{Path, Query, State};
use axum::http::{HeaderMap, StatusCode};
use axum::response::{IntoResponse, Redirect, Response};
use chrono::Utc;

use crate::render::pages;
use crate::seo::{self, SitemapKind};
use crate::server::AppState;
use crate::server::response::{self, PageError};
use crate::services::{FeedKind, FeedResult, POPULAR_AUTHORS_LIMIT, load_article, load_feed, popular_authors};
use crate::error::AppError;
use crate::utils::url::{validate_slug, validate_username};

/// First-level paths owned by the mirror; never treated as a username.
const RESERVED_SEGMENTS: [&str; 5] = ["article", "author", "authors", "search", "trending"];

/// Raw query pairs in request order. Repeated keys are kept, so a
/// `?page=2&page=3` request still renders instead of failing extraction.
type QueryPairs = Query<Vec<(String, String)>>;

/// First value for `key`, ignoring later repeats.
fn first_value<'a>(pairs: &'a [(String, String)], key: &str) -> Option<&'a str> {
    pairs.iter().find(|(k, _)| k == key).map(|(_, v)| v.as_str())
}

/// Page number from a query value: missing or unparsable is 1, lower values clamp to 1.
pub fn parse_page(raw: Option<&str>) -> u32 {
    raw.and_then(|s| s.trim().parse::<i64>().ok())
        .map(|n| n.clamp(1, i64::from(u32::MAX)) as u32)
        .unwrap_or(1)
}

/// Cache window for a listing, shortened when the listing failed.
fn revalidate(state: &AppState, feed: &FeedResult, normal: u64) -> u64 {
    if feed.error.is_some() {
        state.config.cache.error_secs
    } else {
        normal
    }
}

pub async fn home(State(state): State<AppState>, headers: HeaderMap) -> Response {
    let per_page = state.config.feeds.per_page;
    let source = state.source.as_ref();
    let (latest, trending) = futures::join!(
        load_feed(source, &FeedKind::Latest, 1, per_page),
        load_feed(source, &FeedKind::Top, 1, per_page),
    );

    let secs = if latest.error.is_some() || trending.error.is_some() {
        state.config.cache.error_secs
    } else {
        state.config.cache.latest_secs
    };
    let body = pages::home(&state.config, &latest, &trending, Utc::now());
    response::html(&headers, StatusCode::OK, body, secs)
}

pub async fn trending(
    State(state): State<AppState>,
    Query(query): QueryPairs,
    headers: HeaderMap,
) -> Response {
    let page = parse_page(first_value(&query, "page"));
    let feed = load_feed(state.source.as_ref(), &FeedKind::Top, page, state.config.feeds.per_page).await;

    let secs = revalidate(&state, &feed, state.config.cache.top_secs);
    let body = pages::trending(&state.config, &feed, page, Utc::now());
    response::html(&headers, StatusCode::OK, body, secs)
}

pub async fn search(
    State(state): State<AppState>,
    Query(query): QueryPairs,
    headers: HeaderMap,
) -> Response {
    let page = parse_page(first_value(&query, "page"));
    let q = first_value(&query, "q").unwrap_or_default();
    let feed = load_feed(
        state.source.as_ref(),
        &FeedKind::Search(q.trim().to_string()),
        page,
        state.config.feeds.per_page,
    )
    .await;

    let secs = revalidate(&state, &feed, state.config.cache.search_secs);
    let body = pages::search(&state.config, q, &feed, page, Utc::now());
    response::html(&headers, StatusCode::OK, body, secs)
}

pub async fn authors(State(state): State<AppState>, headers: HeaderMap) -> Response {
    let authors = popular_authors(state.source.as_ref(), POPULAR_AUTHORS_LIMIT).await;

    let secs = if authors.is_empty() {
        state.config.cache.error_secs
    } else {
        state.config.cache.user_secs
    };
    let body = pages::authors(&state.config, &authors);
    response::html(&headers, StatusCode::OK, body, secs)
}

pub async fn author(
    State(state): State<AppState>,
    Path(username): Path<String>,
    Query(query): QueryPairs,
    headers: HeaderMap,
) -> Result<Response, PageError> {
    let username = validate_username(&username).map_err(|e| state.page_error(e))?;
    let page = parse_page(first_value(&query, "page"));
    let feed = load_feed(
        state.source.as_ref(),
        &FeedKind::User(username.to_string()),
        page,
        state.config.feeds.per_page,
    )
    .await;

    let secs = revalidate(&state, &feed, state.config.cache.user_secs);
    let body = pages::author(&state.config, username, &feed, page, Utc::now());
    Ok(response::html(&headers, StatusCode::OK, body, secs))
}

pub async fn article(
    State(state): State<AppState>,
    Path((username, slug)): Path<(String, String)>,
    headers: HeaderMap,
) -> Result<Response, PageError> {
    let username = validate_username(&username).map_err(|e| state.page_error(e))?;
    let slug = validate_slug(&slug).map_err(|e| state.page_error(e))?;
    let result = load_article(state.source.as_ref(), username, slug).await;

    let (status, secs) = match (&result.article, &result.error) {
        (Some(_), _) => (StatusCode::OK, state.config.cache.article_secs),
        (None, None) => (StatusCode::NOT_FOUND, state.config.cache.error_secs),
        (None, Some(_)) => (StatusCode::BAD_GATEWAY, state.config.cache.error_secs),
    };
    let body = pages::article(&state.config, username, slug, &result, Utc::now());
    Ok(response::html(&headers, status, body, secs))
}

/// `/{username}/{slug}` from the upstream URL scheme.
pub async fn legacy_article(
    State(state): State<AppState>,
    Path((username, slug)): Path<(String, String)>,
) -> Result<Response, PageError> {
    if RESERVED_SEGMENTS.contains(&username.as_str()) {
        return Err(state.page_error(AppError::invalid_path(username)));
    }
    let username = validate_username(&username).map_err(|e| state.page_error(e))?;
    let slug = validate_slug(&slug).map_err(|e| state.page_error(e))?;
    Ok(Redirect::permanent(&format!("/article/{username}/{slug}")).into_response())
}

async fn sitemap(state: AppState, kind: SitemapKind) -> Response {
    let sitemap = seo::sitemap::build(kind, &state.config, state.source.as_ref(), Utc::now()).await;
    response::xml(sitemap)
}

pub async fn sitemap_index(State(state): State<AppState>) -> Response {
    sitemap(state, SitemapKind::Index).await
}

pub async fn sitemap_static(State(state): State<AppState>) -> Response {
    sitemap(state, SitemapKind::Static).await
}

pub async fn sitemap_articles(State(state): State<AppState>) -> Response {
    sitemap(state, SitemapKind::Articles).await
}

pub async fn sitemap_authors(State(state): State<AppState>) -> Response {
    sitemap(state, SitemapKind::Authors).await
}

pub async fn robots(State(state): State<AppState>) -> Response {
    response::text(seo::robots_txt(&state.config), state.config.cache.static_secs)
}

pub async fn healthz() -> &'static str {
    "ok"
}

pub async fn not_found(State(state): State<AppState>, headers: HeaderMap) -> Response {
    let body = pages::not_found(&state.config);
    response::html(&headers, StatusCode::NOT_FOUND, body, state.config.cache.error_secs)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn page_parsing_defaults_and_clamps() {
        assert_eq!(parse_page(None), 1);
        assert_eq!(parse_page(Some("")), 1);
        assert_eq!(parse_page(Some("abc")), 1);
        assert_eq!(parse_page(Some("0")), 1);
        assert_eq!(parse_page(Some("-4")), 1);
        assert_eq!(parse_page(Some(" 3 ")), 3);
        assert_eq!(parse_page(Some("99999999999")), u32::MAX);
    }

    #[test]
    fn first_value_ignores_repeats() {
        let pairs = vec![
            ("q".to_string(), "rust".to_string()),
            ("page".to_string(), "2".to_string()),
            ("page".to_string(), "3".to_string()),
        ];
        assert_eq!(first_value(&pairs, "page"), Some("2"));
        assert_eq!(first_value(&pairs, "q"), Some("rust"));
        assert_eq!(first_value(&pairs, "tag"), None);
    }
}
