// src/server/response.rs

//! Response builders: content types, cache hints, ETags, error pages.

use std::sync::Arc;

use axum::http::{HeaderMap, HeaderValue, StatusCode, header};
use axum::response::{IntoResponse, Response};
use sha2::{Digest, Sha256};

use crate::error::AppError;
use crate::models::Config;
use crate::render::pages;
use crate::seo::Sitemap;

const HTML: &str = "text/html; charset=utf-8";
const XML: &str = "application/xml; charset=utf-8";
const TEXT: &str = "text/plain; charset=utf-8";

/// Hex characters of the body digest used as the entity tag.
const ETAG_LEN: usize = 16;

/// Quoted entity tag for a body.
pub fn etag(body: &[u8]) -> String {
    let digest = hex::encode(Sha256::digest(body));
    format!("\"{}\"", &digest[..ETAG_LEN])
}

/// Whether the client already holds `tag`.
fn matches_if_none_match(request: &HeaderMap, tag: &str) -> bool {
    request
        .get_all(header::IF_NONE_MATCH)
        .iter()
        .filter_map(|v| v.to_str().ok())
        .flat_map(|v| v.split(','))
        .map(|v| v.trim().trim_start_matches("W/"))
        .any(|candidate| candidate == "*" || candidate == tag)
}

fn header_value(value: &str) -> HeaderValue {
    HeaderValue::from_str(value).unwrap_or_else(|_| HeaderValue::from_static("no-cache"))
}

/// `Cache-Control` for rendered pages.
pub fn page_cache_control(revalidate_secs: u64) -> String {
    format!("public, s-maxage={revalidate_secs}, stale-while-revalidate")
}

/// HTML page with cache hints and an ETag; answers 304 when the tag matches.
pub fn html(request: &HeaderMap, status: StatusCode, body: String, revalidate_secs: u64) -> Response {
    let tag = etag(body.as_bytes());
    let cache_control = page_cache_control(revalidate_secs);

    if status == StatusCode::OK && matches_if_none_match(request, &tag) {
        return (
            StatusCode::NOT_MODIFIED,
            [
                (header::ETAG, header_value(&tag)),
                (header::CACHE_CONTROL, header_value(&cache_control)),
            ],
        )
            .into_response();
    }

    (
        status,
        [
            (header::CONTENT_TYPE, HeaderValue::from_static(HTML)),
            (header::CACHE_CONTROL, header_value(&cache_control)),
            (header::ETAG, header_value(&tag)),
        ],
        body,
    )
        .into_response()
}

/// Sitemap document.
pub fn xml(sitemap: Sitemap) -> Response {
    (
        [
            (header::CONTENT_TYPE, HeaderValue::from_static(XML)),
            (header::CACHE_CONTROL, header_value(&sitemap.cache_control())),
        ],
        sitemap.xml,
    )
        .into_response()
}

/// Plain text with a shared max-age.
pub fn text(body: String, max_age_secs: u64) -> Response {
    (
        [
            (header::CONTENT_TYPE, HeaderValue::from_static(TEXT)),
            (
                header::CACHE_CONTROL,
                header_value(&format!("public, max-age={max_age_secs}, s-maxage={max_age_secs}")),
            ),
        ],
        body,
    )
        .into_response()
}

/// An error raised while serving a page, rendered with the site chrome.
#[derive(Debug)]
pub struct PageError {
    config: Arc<Config>,
    error: AppError,
}

impl PageError {
    pub fn new(config: Arc<Config>, error: AppError) -> Self {
        Self { config, error }
    }
}

impl IntoResponse for PageError {
    fn into_response(self) -> Response {
        let status = self.error.status_code();
        let body = if status == StatusCode::NOT_FOUND {
            log::debug!("Not found: {}", self.error);
            pages::not_found(&self.config)
        } else {
            log::error!("Request failed: {}", self.error);
            pages::error(&self.config, &self.error.to_string())
        };

        (
            status,
            [
                (header::CONTENT_TYPE, HeaderValue::from_static(HTML)),
                (
                    header::CACHE_CONTROL,
                    header_value(&format!("public, max-age={}", self.config.cache.error_secs)),
                ),
            ],
            body,
        )
            .into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn request_with(tag: &str) -> HeaderMap {
        let mut headers = HeaderMap::new();
        headers.insert(header::IF_NONE_MATCH, HeaderValue::from_str(tag).unwrap());
        headers
    }

    #[test]
    fn etag_is_quoted_hex_prefix() {
        let tag = etag(b"hello");
        assert_eq!(tag.len(), ETAG_LEN + 2);
        assert!(tag.starts_with('"') && tag.ends_with('"'));
        assert_eq!(tag, etag(b"hello"));
        assert_ne!(tag, etag(b"hello!"));
    }

    #[test]
    fn html_sets_headers() {
        let response = html(&HeaderMap::new(), StatusCode::OK, "<p>x</p>".into(), 300);
        assert_eq!(response.status(), StatusCode::OK);
        let headers = response.headers();
        assert_eq!(headers[header::CONTENT_TYPE], HTML);
        assert_eq!(
            headers[header::CACHE_CONTROL],
            "public, s-maxage=300, stale-while-revalidate"
        );
        assert_eq!(headers[header::ETAG], etag(b"<p>x</p>").as_str());
    }

    #[test]
    fn matching_tag_is_not_modified() {
        let body = "<p>x</p>".to_string();
        let tag = etag(body.as_bytes());
        let response = html(&request_with(&format!("\"other\", W/{tag}")), StatusCode::OK, body, 60);
        assert_eq!(response.status(), StatusCode::NOT_MODIFIED);
    }

    #[test]
    fn error_status_never_short_circuits() {
        let body = "<p>gone</p>".to_string();
        let tag = etag(body.as_bytes());
        let response = html(&request_with(&tag), StatusCode::NOT_FOUND, body, 60);
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }

    #[test]
    fn page_error_uses_error_status() {
        let config = Arc::new(Config::default());
        let response = PageError::new(config.clone(), AppError::invalid_path("..")).into_response();
        assert_eq!(response.status(), StatusCode::NOT_FOUND);

        let response = PageError::new(config, AppError::timeout("latest", 10)).into_response();
        assert_eq!(response.status(), StatusCode::GATEWAY_TIMEOUT);
        assert_eq!(response.headers()[header::CACHE_CONTROL], "public, max-age=300");
    }
}
