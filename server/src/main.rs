//! campus-search binary — thin CLI shell over the `campus_search_server`
//! library crate: `serve` (default) starts the HTTP server, `build-cache`
//! runs every scraper once and exits (spec §6 "CLI surface").

use std::path::PathBuf;

use anyhow::Context;
use clap::{Parser, Subcommand};
use tracing::{error, info};

use campus_search_scrape::ScrapeEnv;
use campus_search_server::app::build_router;
use campus_search_server::config::Env;
use campus_search_server::{Config, InitState};

/// Multi-corpus fuzzy search server over scraped university discipline and
/// course data.
#[derive(Parser)]
#[command(name = "campus-search", version, about)]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,

    /// Deployment profile controlling score/hidden-field visibility,
    /// pretty-printing, compression, and bind address.
    #[arg(long, value_enum, default_value = "development")]
    env: Env,

    /// Base URL of the catalog site the reference scraper plugins read from.
    #[arg(long, default_value = "https://example.invalid")]
    base_url: String,

    /// Directory holding `Cache/` and `Public/` (default: current directory).
    #[arg(long)]
    resources_dir: Option<PathBuf>,

    /// Port to bind (default: 8080, or 0.0.0.0 when `--env production`).
    #[arg(long, default_value_t = 8080)]
    port: u16,
}

#[derive(Subcommand)]
enum Commands {
    /// Start the HTTP server (default).
    Serve,
    /// Run every scraper once, persist their caches, and exit.
    BuildCache,
}

fn init_tracing() {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive("campus_search=info".parse().unwrap()),
        )
        .with_target(false)
        .init();
}

fn build_config(cli: &Cli) -> Config {
    let resources_dir =
        cli.resources_dir.clone().unwrap_or_else(|| std::env::current_dir().unwrap_or_default());
    Config::for_env(cli.env, cli.base_url.clone(), resources_dir)
}

fn scrape_env(config: &Config) -> ScrapeEnv {
    ScrapeEnv {
        client: reqwest::Client::new(),
        cache: config.cache.clone(),
        warn_about_http_version: config.warn_about_http_version,
    }
}

async fn run_build_cache(config: Config) -> i32 {
    let init = InitState::new(config.base_url.clone());
    let env = scrape_env(&config);
    init.spawn_init(env);

    match init.wait_all().await {
        Ok(()) => {
            info!("build-cache: all corpora initialized");
            0
        }
        Err(err) => {
            error!(error = %err, "build-cache: initialization task panicked");
            1
        }
    }
}

async fn run_serve(config: Config, port: u16) -> anyhow::Result<()> {
    let init = InitState::new(config.base_url.clone());
    let env = scrape_env(&config);
    init.spawn_init(env.clone());

    // Block startup until every corpus reaches a terminal state (spec §5
    // "Ordering guarantees"): requests admitted before this point may still
    // observe ServiceUnavailable, but once this returns, no request will.
    if let Err(err) = init.wait_all_blocking() {
        error!(error = %err, "initialization task panicked during startup");
    }

    let app = build_router(init, env, &config);

    let bind_addr = if config.bind_all { "0.0.0.0" } else { "127.0.0.1" };
    let listener = tokio::net::TcpListener::bind(format!("{bind_addr}:{port}"))
        .await
        .with_context(|| format!("binding listener on {bind_addr}:{port}"))?;

    info!(port = port, env = ?config.env, "serving campus-search");
    axum::serve(listener, app).await.context("serving campus-search")
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    init_tracing();
    let cli = Cli::parse();
    let config = build_config(&cli);

    match cli.command {
        Some(Commands::BuildCache) => {
            std::process::exit(run_build_cache(config).await);
        }
        Some(Commands::Serve) | None => {
            run_serve(config, cli.port).await?;
        }
    }
    Ok(())
}
