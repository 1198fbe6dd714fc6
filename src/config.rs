// src/config.rs

//! Configuration loading utilities.
//!
//! A TOML file is optional: when it is missing or unreadable the defaults
//! are used. Environment variables are applied on top in either case.

use std::env;
use std::path::Path;

use crate::error::{AppError, Result};
use crate::models::Config;

/// Listener address override, e.g. `0.0.0.0:8080`.
pub const ENV_BIND: &str = "DEVART_BIND";
/// Public origin override.
pub const ENV_SITE_URL: &str = "DEVART_SITE_URL";
/// Upstream API base override.
pub const ENV_API_BASE_URL: &str = "DEVART_API_BASE_URL";
/// Platform-provided port; binds all interfaces.
pub const ENV_PORT: &str = "PORT";

/// Load configuration from `path` (falling back to defaults), apply
/// environment overrides, then validate.
pub fn load_config(path: Option<&Path>) -> Result<Config> {
    let mut config = match path {
        Some(path) => Config::load_or_default(path),
        None => Config::default(),
    };
    apply_env_overrides(&mut config, |key| env::var(key).ok())?;
    config.validate()?;
    Ok(config)
}

/// Apply overrides read through `lookup`.
///
/// `PORT` wins over `DEVART_BIND` when both are set.
pub fn apply_env_overrides<F>(config: &mut Config, lookup: F) -> Result<()>
where
    F: Fn(&str) -> Option<String>,
{
    let get = |key: &str| lookup(key).map(|v| v.trim().to_string()).filter(|v| !v.is_empty());

    if let Some(bind) = get(ENV_BIND) {
        log::debug!("{ENV_BIND} overrides server.bind: {bind}");
        config.server.bind = bind;
    }
    if let Some(port) = get(ENV_PORT) {
        let port: u16 = port
            .parse()
            .map_err(|_| AppError::config(format!("{ENV_PORT} is not a valid port: '{port}'")))?;
        log::debug!("{ENV_PORT} overrides server.bind: 0.0.0.0:{port}");
        config.server.bind = format!("0.0.0.0:{port}");
    }
    if let Some(site) = get(ENV_SITE_URL) {
        log::debug!("{ENV_SITE_URL} overrides site.base_url: {site}");
        config.site.base_url = site;
    }
    if let Some(api) = get(ENV_API_BASE_URL) {
        log::debug!("{ENV_API_BASE_URL} overrides api.base_url: {api}");
        config.api.base_url = api;
    }
    Ok(())
}
