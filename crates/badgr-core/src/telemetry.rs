//! Tracing setup for the Badgr daemon.

use tracing::Level;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{fmt, EnvFilter};

/// Crates whose chatter is capped at `warn` unless `RUST_LOG` says otherwise.
const QUIET_DEPENDENCIES: &[&str] = &["hyper", "hyper_util", "h2", "reqwest", "redis", "tower"];

/// Install the global subscriber.
///
/// `RUST_LOG` wins when set. Otherwise Badgr logs at `level` and the HTTP and
/// Redis client stacks only at `warn`. JSON output keeps the request span
/// fields (`request_id`, `request`) on every line.
///
/// Only the first call takes effect.
pub fn init_tracing(json: bool, level: Level) {
    let env_filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(default_directives(level)));

    if json {
        tracing_subscriber::registry()
            .with(env_filter)
            .with(
                fmt::layer()
                    .json()
                    .with_current_span(true)
                    .with_span_list(false)
                    .with_target(false),
            )
            .try_init()
            .ok();
    } else {
        tracing_subscriber::registry()
            .with(env_filter)
            .with(fmt::layer().with_target(false))
            .try_init()
            .ok();
    }
}

/// Filter directives used when `RUST_LOG` is unset.
pub fn default_directives(level: Level) -> String {
    let mut directives = level.as_str().to_ascii_lowercase();
    for krate in QUIET_DEPENDENCIES {
        directives.push_str(&format!(",{krate}=warn"));
    }
    directives
}
