//! Server-side HTML rendering.
//!
//! Markup is assembled from strings; every value that did not come from
//! this crate passes through [`escape_html`](crate::utils::escape_html)
//! except article bodies, which upstream delivers as sanitized HTML.

pub mod components;
pub mod layout;
pub mod pages;
pub mod pagination;
pub mod time;
pub mod toc;

pub use pagination::{PageItem, page_url, visible_pages};
pub use time::time_ago;
