//! Search-engine facing output: sitemaps, robots.txt and head metadata.

pub mod meta;
pub mod robots;
pub mod sitemap;

pub use meta::{OgType, PageMeta, TwitterCard};
pub use robots::robots_txt;
pub use sitemap::{Sitemap, SitemapKind};
