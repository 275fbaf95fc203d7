use anyhow::Result;
use clap::Parser;
use tracing::error;

use pydoc_scraper::{run, validate_args, Args};

fn main() -> Result<()> {
    let args = Args::parse();
    validate_args(&args)?;

    if let Err(e) = run(&args) {
        error!(action = "abort", component = "runner", error = %format!("{:#}", e), "Parser failed");
        return Err(e);
    }
    Ok(())
}
