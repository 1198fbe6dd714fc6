//! Service layer for the mirror.
//!
//! This module contains the data access logic for:
//! - The content API client (`ContentSource`, `DevToClient`)
//! - Listing wrappers with error capture and fallback (`load_feed`, `load_article`)
//! - Popular-authors aggregation (`popular_authors`)

mod api;
pub mod authors;
pub mod fallback;
pub mod feeds;

pub use api::{ContentSource, DevToClient};
pub use authors::{POPULAR_AUTHORS_LIMIT, popular_authors};
pub use feeds::{ArticleResult, FeedKind, FeedResult, load_article, load_feed, total_pages_hint};
