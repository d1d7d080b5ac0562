//! pokecache - fetch catalog resources through an expiring cache
//!
//! Reads one key per line from stdin (a path under the configured base URL,
//! or an absolute URL), serves it from the cache or the network, and reports
//! the outcome on stdout.

use anyhow::Context;
use tokio::io::{AsyncBufReadExt, BufReader};
use tokio::signal;
use tracing::{info, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use pokecache::{get_or_fetch, Config, ExpiringCache, HttpFetcher};

/// Main entry point.
///
/// # Startup Sequence
/// 1. Initialize tracing subscriber for logging (stderr)
/// 2. Load and validate configuration from environment variables
/// 3. Create the expiring cache, which starts its sweep task
/// 4. Serve keys from stdin until end of input or a shutdown signal
/// 5. Log final cache statistics and stop the sweep
#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Defaults to "info" level, can be overridden with RUST_LOG env var
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "pokecache=info".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let config = Config::from_env();
    config.validate().context("invalid configuration")?;
    info!(
        "Configuration loaded: cache_ttl={}s, http_timeout={}s, base_url={}",
        config.cache_ttl, config.http_timeout, config.base_url
    );

    let cache = ExpiringCache::new(config.ttl()).context("failed to create cache")?;
    let fetcher = HttpFetcher::from_config(&config).context("failed to build HTTP client")?;

    tokio::select! {
        result = serve_stdin(&cache, &fetcher) => result?,
        _ = shutdown_signal() => {}
    }

    let stats = cache.stats().await;
    info!(
        hit_rate = stats.hit_rate(),
        "Final cache stats: {}",
        serde_json::to_string(&stats).context("failed to encode stats")?
    );

    cache.shutdown();
    Ok(())
}

/// Answers each stdin line until end of input.
async fn serve_stdin(cache: &ExpiringCache, fetcher: &HttpFetcher) -> anyhow::Result<()> {
    let mut lines = BufReader::new(tokio::io::stdin()).lines();

    while let Some(line) = lines.next_line().await.context("failed to read stdin")? {
        let key = line.trim();
        if key.is_empty() {
            continue;
        }

        match get_or_fetch(cache, fetcher, key).await {
            Ok(fetched) => {
                println!("{} {} {} bytes", fetched.source.as_str(), key, fetched.body.len())
            }
            Err(err) => eprintln!("error {key}: {err}"),
        }
    }

    info!("End of input");
    Ok(())
}

/// Waits for shutdown signal (Ctrl+C or SIGTERM).
async fn shutdown_signal() {
    let ctrl_c = async {
        signal::ctrl_c()
            .await
            .expect("Failed to install Ctrl+C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        signal::unix::signal(signal::unix::SignalKind::terminate())
            .expect("Failed to install SIGTERM handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {
            warn!("Received Ctrl+C, initiating shutdown...");
        }
        _ = terminate => {
            warn!("Received SIGTERM, initiating shutdown...");
        }
    }
}
