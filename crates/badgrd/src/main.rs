//! Badgr daemon
//!
//! Serves `GET /v1/github/checks/{owner}/{repo}/badge.svg` by redirecting to
//! a shields.io badge for the aggregated status of the repository's GitHub
//! check suites. Results are cached in Redis under a warm and a cold tier.

mod config;
mod routes;

use std::net::SocketAddr;
use std::sync::Arc;

use anyhow::{Context, Result};
use badgr_cache::{RedisStore, TieredCache};
use badgr_core::{CheckResolver, GitHubClient, RequestPipeline};
use clap::Parser;
use tokio::net::TcpListener;
use tracing::{info, Level};

use crate::config::Cli;

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let level = if cli.verbose {
        Level::DEBUG
    } else {
        Level::INFO
    };
    badgr_core::init_tracing(cli.json, level);
    info!(version = badgr_core::VERSION, "badgrd starting");

    let redis_config = cli.redis.to_config();
    let store = RedisStore::new(&redis_config).context("Invalid Redis configuration")?;
    let cache = Arc::new(TieredCache::new(store, cli.redis.redis_prefix.clone()));

    let github = GitHubClient::new(cli.github.to_config())
        .context("Failed to build GitHub client")?;
    let resolver = Arc::new(CheckResolver::new(Arc::new(github)));

    let pipeline =
        RequestPipeline::new(cache, resolver).with_resolve_timeout(cli.resolve_timeout());
    let app = routes::build_router(pipeline);

    let addr = SocketAddr::from(([0, 0, 0, 0], cli.port));
    let listener = TcpListener::bind(addr)
        .await
        .with_context(|| format!("Failed to bind {addr}"))?;
    info!(
        addr = %addr,
        redis_host = %redis_config.host,
        redis_tls = redis_config.enable_tls,
        "badgrd listening"
    );

    axum::serve(listener, app)
        .with_graceful_shutdown(wait_for_shutdown_signal())
        .await
        .context("Server error")?;

    info!("badgrd stopped");
    Ok(())
}

async fn wait_for_shutdown_signal() {
    #[cfg(unix)]
    {
        use tokio::signal::unix::{signal, SignalKind};
        match signal(SignalKind::terminate()) {
            Ok(mut sigterm) => {
                tokio::select! {
                    _ = sigterm.recv() => {}
                    _ = tokio::signal::ctrl_c() => {}
                }
            }
            Err(e) => {
                tracing::warn!(error = %e, "cannot listen for SIGTERM, falling back to ctrl-c");
                let _ = tokio::signal::ctrl_c().await;
            }
        }
    }
    #[cfg(not(unix))]
    {
        let _ = tokio::signal::ctrl_c().await;
    }
    info!("shutdown signal received, draining connections");
}
