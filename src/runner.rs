use anyhow::{Context, Result};
use std::fs;
use std::time::Instant;
use tracing::info;

use crate::cache::ResponseCache;
use crate::fetch::{CachedSession, HttpTransport};
use crate::output::control_output;
use crate::progress::TerminalProgress;
use crate::settings::Settings;
use crate::Args;

/// One full scraper run: set up logging and the cache, run the selected
/// extractor, hand its table to the output step.
pub fn run(args: &Args) -> Result<()> {
    let settings = Settings::from_args(args);
    fs::create_dir_all(&settings.base_dir)
        .with_context(|| format!("Failed to create base directory {:?}", settings.base_dir))?;
    crate::utils::setup_logging(&settings, args.verbose)?;

    let total_start_time = Instant::now();
    info!(action = "start", component = "runner", args = ?args, "Parser started");

    let cache = ResponseCache::open(&settings.cache_path())?;
    let session = CachedSession::new(HttpTransport::new(&settings)?, cache);
    if args.clear_cache {
        session.clear_cache()?;
    }

    let mut progress = TerminalProgress::new();
    let results = args.mode.run(&session, &settings, &mut progress)?;
    if let Some(table) = &results {
        control_output(table, args, &settings)?;
    }
    session.close()?;

    info!(
        action = "complete",
        component = "runner",
        duration_ms = total_start_time.elapsed().as_millis(),
        "Parser finished"
    );
    Ok(())
}

pub fn validate_args(args: &Args) -> Result<()> {
    if let Some(dir) = &args.base_dir {
        if dir.exists() && !dir.is_dir() {
            anyhow::bail!("--base-dir {:?} is not a directory", dir);
        }
    }
    Ok(())
}
