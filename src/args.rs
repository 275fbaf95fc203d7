use clap::{Parser, ValueEnum};
use std::fmt;
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(
    name = "pydoc-scraper",
    about = "Scrape tables of information from the Python documentation",
    version,
    long_about = None
)]
pub struct Args {
    /// Scraping mode
    #[arg(value_enum)]
    pub mode: Mode,

    /// Clear the HTTP response cache before running
    #[arg(short, long)]
    pub clear_cache: bool,

    /// Alternative ways to output results
    #[arg(short, long, value_enum)]
    pub output: Option<OutputFormat>,

    /// Directory holding the cache, logs, downloads and results
    #[arg(long)]
    pub base_dir: Option<PathBuf>,

    /// Enable verbose logging
    #[arg(short, long)]
    pub verbose: bool,
}

/// Which page extractor a run uses.
#[derive(ValueEnum, Clone, Copy, Debug, PartialEq, Eq)]
pub enum Mode {
    WhatsNew,
    LatestVersions,
    Download,
    Pep,
}

impl Mode {
    pub fn name(self) -> &'static str {
        match self {
            Mode::WhatsNew => "whats-new",
            Mode::LatestVersions => "latest-versions",
            Mode::Download => "download",
            Mode::Pep => "pep",
        }
    }
}

impl fmt::Display for Mode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

#[derive(ValueEnum, Clone, Copy, Debug, PartialEq, Eq)]
pub enum OutputFormat {
    /// Bordered table on stdout
    Pretty,
    /// CSV file in the results directory
    File,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_mode_and_flags() {
        let args = Args::parse_from(["pydoc-scraper", "latest-versions", "-c", "-o", "pretty"]);
        assert_eq!(args.mode, Mode::LatestVersions);
        assert!(args.clear_cache);
        assert_eq!(args.output, Some(OutputFormat::Pretty));
        assert!(args.base_dir.is_none());
    }

    #[test]
    fn mode_names_match_cli_values() {
        for mode in Mode::value_variants() {
            let parsed = Mode::from_str(mode.name(), false);
            assert_eq!(parsed, Ok(*mode));
        }
    }

    #[test]
    fn rejects_unknown_mode() {
        assert!(Args::try_parse_from(["pydoc-scraper", "crawl"]).is_err());
    }
}
