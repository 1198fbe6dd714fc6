// src/lib.rs

//! DevArt: a read-only, server-rendered mirror of the Dev.to article API.
//!
//! Layers, bottom up:
//! - [`services`]: API client and the fetch wrappers that turn failures into
//!   displayable state
//! - [`render`] and [`seo`]: HTML pages, sitemaps, robots.txt, head metadata
//! - [`server`]: the axum router tying routes to the above

pub mod config;
pub mod error;
pub mod models;
pub mod render;
pub mod seo;
pub mod server;
pub mod services;
pub mod utils;
