// src/server/mod.rs

//! HTTP front end.
//!
//! ```text
//! GET /                            latest + trending
//! GET /trending?page               top articles of the week
//! GET /search?q&page               tag search
//! GET /authors                     popular authors
//! GET /author/{username}?page      one author's articles
//! GET /article/{username}/{slug}   one article
//! GET /{username}/{slug}           308 to /article/{username}/{slug}
//! GET /sitemap*.xml, /robots.txt   crawler documents
//! GET /healthz                     liveness
//! ```

mod handlers;
pub mod response;

use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Instant;

use axum::Router;
use axum::extract::{Request, State};
use axum::middleware::{self, Next};
use axum::response::Response;
use axum::routing::get;
use tokio::net::TcpListener;

use crate::error::{AppError, Result};
use crate::models::Config;
use crate::services::{ContentSource, DevToClient};

pub use handlers::parse_page;
pub use response::PageError;

/// State shared by every handler.
#[derive(Clone)]
pub struct AppState {
    pub config: Arc<Config>,
    pub source: Arc<dyn ContentSource>,
}

impl AppState {
    pub fn new(config: Config, source: Arc<dyn ContentSource>) -> Self {
        Self {
            config: Arc::new(config),
            source,
        }
    }

    /// State backed by the configured upstream API.
    pub fn from_config(config: Config) -> Result<Self> {
        let client = DevToClient::new(&config.api)?;
        Ok(Self::new(config, Arc::new(client)))
    }

    pub(crate) fn page_error(&self, error: AppError) -> PageError {
        PageError::new(Arc::clone(&self.config), error)
    }
}

/// Build the application router.
pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/", get(handlers::home))
        .route("/trending", get(handlers::trending))
        .route("/search", get(handlers::search))
        .route("/authors", get(handlers::authors))
        .route("/author/{username}", get(handlers::author))
        .route("/article/{username}/{slug}", get(handlers::article))
        .route("/sitemap.xml", get(handlers::sitemap_index))
        .route("/sitemap-static.xml", get(handlers::sitemap_static))
        .route("/sitemap-articles.xml", get(handlers::sitemap_articles))
        .route("/sitemap-authors.xml", get(handlers::sitemap_authors))
        .route("/robots.txt", get(handlers::robots))
        .route("/healthz", get(handlers::healthz))
        .route("/{username}/{slug}", get(handlers::legacy_article))
        .fallback(handlers::not_found)
        .layer(middleware::from_fn_with_state(state.clone(), request_log))
        .with_state(state)
}

async fn request_log(State(state): State<AppState>, request: Request, next: Next) -> Response {
    if !state.config.server.request_log {
        return next.run(request).await;
    }

    let method = request.method().clone();
    let path = request.uri().path().to_string();
    let started = Instant::now();
    let response = next.run(request).await;
    log::info!(
        "{} {} -> {} ({} ms)",
        method,
        path,
        response.status().as_u16(),
        started.elapsed().as_millis()
    );
    response
}

/// Bind `addr` and serve until Ctrl-C.
pub async fn serve(state: AppState, addr: SocketAddr) -> Result<()> {
    let listener = TcpListener::bind(addr).await?;
    log::info!(
        "Serving {} on http://{} (upstream {})",
        state.config.site.name,
        listener.local_addr()?,
        state.config.api.base_url
    );

    axum::serve(listener, router(state))
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    log::info!("Server stopped");
    Ok(())
}

async fn shutdown_signal() {
    match tokio::signal::ctrl_c().await {
        Ok(()) => log::info!("Shutdown signal received, draining connections"),
        Err(e) => {
            log::error!("Failed to listen for shutdown signal: {e}");
            std::future::pending::<()>().await;
        }
    }
}
