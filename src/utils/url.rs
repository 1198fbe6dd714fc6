// src/utils/url.rs

//! URL manipulation utilities.

use std::sync::OnceLock;

use regex::Regex;
use url::{Url, form_urlencoded};

use crate::error::{AppError, Result};

fn username_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| Regex::new(r"^[A-Za-z0-9_.\-]+$").expect("static regex is valid"))
}

fn slug_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| Regex::new(r"^[A-Za-z0-9_.~\-]+$").expect("static regex is valid"))
}

/// Check a username before it is spliced into an API path.
///
/// # Examples
/// ```
/// use devart::utils::url::validate_username;
///
/// assert!(validate_username("ben").is_ok());
/// assert!(validate_username("../admin").is_err());
/// ```
pub fn validate_username(segment: &str) -> Result<&str> {
    validate(segment, username_pattern())
}

/// Check an article slug before it is spliced into an API path.
pub fn validate_slug(segment: &str) -> Result<&str> {
    validate(segment, slug_pattern())
}

fn validate<'a>(segment: &'a str, pattern: &Regex) -> Result<&'a str> {
    if segment.len() > 200 || segment.starts_with('.') || !pattern.is_match(segment) {
        return Err(AppError::invalid_path(segment));
    }
    Ok(segment)
}

/// Build an endpoint URL under `base`, appending path segments and query pairs.
///
/// Segments and query values are percent-encoded by `url`.
pub fn endpoint(base: &str, segments: &[&str], query: &[(&str, String)]) -> Result<Url> {
    let mut url = Url::parse(base)?;
    {
        let mut path = url
            .path_segments_mut()
            .map_err(|_| AppError::config(format!("API base URL cannot be a base: {base}")))?;
        path.pop_if_empty();
        for segment in segments {
            path.push(segment);
        }
    }
    if !query.is_empty() {
        let mut pairs = url.query_pairs_mut();
        for (key, value) in query {
            pairs.append_pair(key, value);
        }
    }
    Ok(url)
}

/// Percent-encode a single query or path component.
pub fn encode_component(value: &str) -> String {
    form_urlencoded::byte_serialize(value.as_bytes())
        .collect::<String>()
        .replace('+', "%20")
}

/// Render query pairs as `a=1&b=2` without a leading `?`.
pub fn query_string(pairs: &[(String, String)]) -> String {
    form_urlencoded::Serializer::new(String::new())
        .extend_pairs(pairs.iter().map(|(k, v)| (k.as_str(), v.as_str())))
        .finish()
}
