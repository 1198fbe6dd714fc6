// src/models/mod.rs

//! Domain models for the mirror.
//!
//! API payloads (`Article`, `User`), aggregates built from them
//! (`AuthorStats`), and the TOML configuration.

mod article;
mod author;
mod config;
mod user;

// Re-export all public types
pub use article::{Article, split_tags};
pub use author::AuthorStats;
pub use config::{ApiConfig, CacheConfig, Config, FeedsConfig, ServerConfig, SiteConfig};
pub use user::User;

#[cfg(test)]
pub(crate) use article::tests::sample_article;
