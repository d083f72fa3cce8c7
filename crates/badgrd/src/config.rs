//! Command-line and environment configuration for `badgrd`.

use std::time::Duration;

use badgr_cache::RedisConfig;
use badgr_core::github::DEFAULT_API_URL;
use badgr_core::GitHubConfig;
use clap::builder::BoolishValueParser;
use clap::{Args, Parser};

#[derive(Debug, Parser)]
#[command(name = "badgrd")]
#[command(author = "Stevedores Org")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(about = "CI status badges backed by GitHub check suites", long_about = None)]
pub struct Cli {
    /// Port to listen on
    #[arg(long, env = "PORT", default_value_t = 8080)]
    pub port: u16,

    /// Enable verbose output
    #[arg(short, long)]
    pub verbose: bool,

    /// Emit JSON-formatted log lines
    #[arg(long, env = "LOG_JSON", value_parser = BoolishValueParser::new())]
    pub json: bool,

    /// Deadline for computing a fresh badge, in seconds
    #[arg(long, env = "RESOLVE_TIMEOUT_SECS", default_value_t = 10)]
    pub resolve_timeout_secs: u64,

    #[command(flatten)]
    pub redis: RedisArgs,

    #[command(flatten)]
    pub github: GitHubArgs,
}

impl Cli {
    pub fn resolve_timeout(&self) -> Duration {
        Duration::from_secs(self.resolve_timeout_secs)
    }
}

#[derive(Debug, Args)]
pub struct RedisArgs {
    #[arg(long, env = "REDIS_HOST")]
    pub redis_host: String,

    #[arg(long, env = "REDIS_PORT", default_value_t = 6379)]
    pub redis_port: u16,

    #[arg(long, env = "REDIS_PASSWORD", hide_env_values = true)]
    pub redis_password: Option<String>,

    #[arg(long, env = "REDIS_DB", default_value_t = 0)]
    pub redis_db: i64,

    /// Connect with TLS (`rediss://`)
    #[arg(long, env = "REDIS_ENABLE_TLS", value_parser = BoolishValueParser::new())]
    pub redis_enable_tls: bool,

    /// Prefix for every cache key, to share one Redis between deployments
    #[arg(long, env = "REDIS_PREFIX", default_value = "")]
    pub redis_prefix: String,

    /// Per-attempt deadline for a cache command, in milliseconds
    #[arg(long, env = "REDIS_TIMEOUT_MS", default_value_t = 1000)]
    pub redis_timeout_ms: u64,

    /// Attempts per cache command
    #[arg(long, env = "REDIS_MAX_RETRIES", default_value_t = 5)]
    pub redis_max_retries: usize,
}

impl RedisArgs {
    pub fn to_config(&self) -> RedisConfig {
        RedisConfig {
            password: self.redis_password.clone().unwrap_or_default(),
            db: self.redis_db,
            enable_tls: self.redis_enable_tls,
            command_timeout: Duration::from_millis(self.redis_timeout_ms),
            max_retries: self.redis_max_retries.max(1),
            ..RedisConfig::new(&self.redis_host, self.redis_port)
        }
    }
}

#[derive(Debug, Args)]
pub struct GitHubArgs {
    /// GitHub REST API root
    #[arg(long, env = "GITHUB_API_URL", default_value = DEFAULT_API_URL)]
    pub github_api_url: String,

    /// Token for authenticated GitHub requests
    #[arg(long, env = "GITHUB_TOKEN", hide_env_values = true)]
    pub github_token: Option<String>,
}

impl GitHubArgs {
    pub fn to_config(&self) -> GitHubConfig {
        let config = GitHubConfig {
            api_url: self.github_api_url.trim_end_matches('/').to_string(),
            ..GitHubConfig::default()
        };
        match self.github_token.as_deref().filter(|t| !t.is_empty()) {
            Some(token) => config.with_token(token),
            None => config,
        }
    }
}
