//! This module handles the initial setup of the application.
use std::time::Duration;

use anyhow::{bail, Result};
use tracing_subscriber::EnvFilter;

use super::args::AppArgs;

/// Contains everything the console needs to run.
///
/// This struct is created by the `prepare` function and passed to the
/// console's `run` function.
pub struct PreparedApp {
    /// The normalized base URL of the catalog service.
    pub base_url: String,
    /// The keep-alive interval, or `None` when pinging is disabled.
    pub ping_interval: Option<Duration>,
}

/// Prepares the application for running.
///
/// This function performs the following steps:
/// 1. Configures diagnostic logging.
/// 2. Resolves and validates the service base URL.
/// 3. Prints a start banner.
///
/// # Errors
///
/// Returns an error if the base URL or ping interval is invalid.
pub fn prepare(args: AppArgs) -> Result<PreparedApp> {
    configure_logging(args.verbose);

    let base_url = resolve_base_url(&args)?;
    if !args.no_ping && args.ping_interval == 0 {
        bail!("Keep-alive interval must be at least one second (or pass --no-ping)");
    }
    let ping_interval = (!args.no_ping).then(|| Duration::from_secs(args.ping_interval));

    print_start_banner(&base_url, ping_interval);

    Ok(PreparedApp {
        base_url,
        ping_interval,
    })
}

/// Configures diagnostic logging on stderr.
///
/// Diagnostics stay out of the session transcript; `RUST_LOG` overrides the
/// default level.
fn configure_logging(verbose: bool) {
    let default_filter = if verbose { "debug" } else { "info" };
    let _ = tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_filter)),
        )
        .with_writer(std::io::stderr)
        .try_init();
}

/// Resolves the service base URL.
///
/// The URL can be provided via a command-line argument or the
/// `CATALOG_DEMO_URL` environment variable; trailing slashes are trimmed.
fn resolve_base_url(args: &AppArgs) -> Result<String> {
    let url = args
        .base_url
        .clone()
        .or_else(|| std::env::var("CATALOG_DEMO_URL").ok())
        .unwrap_or_else(|| "http://localhost:8080".to_string());

    let url = url.trim_end_matches('/').to_string();
    if !url.starts_with("http://") && !url.starts_with("https://") {
        bail!("Base URL '{}' must start with http:// or https://", url);
    }
    Ok(url)
}

/// Prints a banner with startup information.
fn print_start_banner(base_url: &str, ping_interval: Option<Duration>) {
    println!("🛒 Starting catalog demo console");
    println!("Service: {}", base_url);
    match ping_interval {
        Some(interval) => println!("Keep-alive: every {}s", interval.as_secs()),
        None => println!("Keep-alive: disabled"),
    }
    println!();
}
