use anyhow::{Context, Result};
use std::fs;
use std::sync::Mutex;
use time::macros::format_description;
use tracing_subscriber::fmt::time::LocalTime;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};
use url::Url;

use crate::log_file::RotatingFile;
use crate::settings::Settings;

/// Logs to stderr and to a size-rotated `logs/parser.log`. `RUST_LOG`
/// overrides the default level.
pub fn setup_logging(settings: &Settings, verbose: bool) -> Result<()> {
    fs::create_dir_all(settings.logs_dir())
        .with_context(|| format!("Failed to create log directory {:?}", settings.logs_dir()))?;
    let log_file = RotatingFile::open(
        settings.log_file(),
        settings.log_max_bytes,
        settings.log_backups,
    )?;

    let default_level = if verbose { "debug" } else { "info" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));
    let timer = LocalTime::new(format_description!(
        "[day].[month].[year] [hour]:[minute]:[second]"
    ));

    tracing_subscriber::registry()
        .with(filter)
        .with(
            tracing_subscriber::fmt::layer()
                .with_timer(timer.clone())
                .with_target(false)
                .with_writer(std::io::stderr),
        )
        .with(
            tracing_subscriber::fmt::layer()
                .with_timer(timer)
                .with_target(false)
                .with_ansi(false)
                .with_writer(Mutex::new(log_file)),
        )
        .try_init()
        .context("Failed to install log subscriber")?;
    Ok(())
}

/// Resolves `href` against `base` the way a browser follows a link.
pub fn resolve_url(base: &str, href: &str) -> Result<String> {
    let base = Url::parse(base).with_context(|| format!("Invalid base URL {base}"))?;
    let joined = base
        .join(href)
        .with_context(|| format!("Cannot resolve {href} against {base}"))?;
    Ok(joined.into())
}

/// Last path segment of `url`, used as a local file name.
pub fn file_name_from_url(url: &str) -> Result<String> {
    let parsed = Url::parse(url).with_context(|| format!("Invalid URL {url}"))?;
    match parsed.path_segments().and_then(|mut segments| segments.next_back()) {
        Some(name) if !name.is_empty() => Ok(name.to_string()),
        _ => anyhow::bail!("URL has no file name: {}", url),
    }
}

pub fn collapse_newlines(text: &str) -> String {
    text.replace('\n', " ")
}
