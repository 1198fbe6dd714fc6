//! DevArt CLI
//!
//! Runs the mirror server and prints the crawler documents it serves.

use std::path::PathBuf;

use chrono::Utc;
use clap::{Parser, Subcommand};
use devart::{
    config::load_config,
    error::Result,
    seo::{self, SitemapKind},
    server::{self, AppState},
};

/// DevArt - Dev.to content mirror
#[derive(Parser, Debug)]
#[command(
    name = "devart",
    version,
    about = "Server-rendered mirror of the Dev.to article API"
)]
struct Cli {
    /// Path to the TOML config file (defaults apply when it is missing)
    #[arg(short, long, default_value = "devart.toml")]
    config: PathBuf,

    /// Enable verbose logging
    #[arg(short, long)]
    verbose: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Start the HTTP server
    Serve {
        /// Listener address, overriding config and environment
        #[arg(long)]
        bind: Option<String>,
    },

    /// Validate the configuration
    Validate,

    /// Print the effective configuration as TOML
    Config,

    /// Print a sitemap (index, static, articles or authors)
    Sitemap {
        #[arg(default_value = "index")]
        kind: SitemapKind,
    },

    /// Print robots.txt
    Robots,
}

/// Initialize logging based on verbosity flag.
fn init_logging(verbose: bool) {
    let level = if verbose { "debug" } else { "info" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(level))
        .format_timestamp_secs()
        .init();
}

/// Main entry point for the CLI application.
#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    let config_path = cli.config.exists().then_some(cli.config.as_path());
    if config_path.is_none() {
        log::debug!("No config at {}, using defaults", cli.config.display());
    }

    let mut config = match load_config(config_path) {
        Ok(config) => config,
        Err(e) => {
            log::error!("Config validation failed: {}", e);
            return Err(e);
        }
    };

    match cli.command {
        Command::Serve { bind } => {
            if let Some(bind) = bind {
                config.server.bind = bind;
            }
            let addr = config.bind_addr()?;
            let state = AppState::from_config(config)?;
            server::serve(state, addr).await?;
        }

        Command::Validate => {
            log::info!("✓ Config OK ({})", cli.config.display());
            log::info!("  site: {} at {}", config.site.name, config.site.base_url);
            log::info!("  upstream: {}", config.api.base_url);
            log::info!("  bind: {}", config.server.bind);
        }

        Command::Config => {
            print!("{}", config.to_toml()?);
        }

        Command::Sitemap { kind } => {
            let state = AppState::from_config(config)?;
            let sitemap =
                seo::sitemap::build(kind, &state.config, state.source.as_ref(), Utc::now()).await;
            println!("{}", sitemap.xml);
            log::info!("Cache-Control: {}", sitemap.cache_control());
        }

        Command::Robots => {
            println!("{}", seo::robots_txt(&config));
        }
    }

    Ok(())
}
