use std::path::PathBuf;
use std::time::Duration;

use crate::args::Args;

pub const MAIN_DOC_URL: &str = "https://docs.python.org/3/";
pub const PEP_DOC_URL: &str = "https://peps.python.org/";

/// Everything a run needs to know about where to read from and write to.
#[derive(Debug, Clone)]
pub struct Settings {
    pub main_doc_url: String,
    pub pep_doc_url: String,
    pub base_dir: PathBuf,
    pub log_max_bytes: u64,
    pub log_backups: usize,
    pub request_timeout: Duration,
    pub user_agent: String,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            main_doc_url: MAIN_DOC_URL.to_string(),
            pep_doc_url: PEP_DOC_URL.to_string(),
            base_dir: PathBuf::from("."),
            log_max_bytes: 1_000_000,
            log_backups: 5,
            request_timeout: Duration::from_secs(30),
            user_agent: format!("pydoc-scraper/{}", env!("CARGO_PKG_VERSION")),
        }
    }
}

impl Settings {
    pub fn from_args(args: &Args) -> Self {
        let mut settings = Self::default();
        if let Some(dir) = &args.base_dir {
            settings.base_dir = dir.clone();
        }
        settings
    }

    /// Settings rooted at `base_dir`, everything else default.
    pub fn with_base_dir(base_dir: impl Into<PathBuf>) -> Self {
        Self {
            base_dir: base_dir.into(),
            ..Self::default()
        }
    }

    pub fn cache_path(&self) -> PathBuf {
        self.base_dir.join("http_cache.sqlite")
    }

    pub fn logs_dir(&self) -> PathBuf {
        self.base_dir.join("logs")
    }

    pub fn log_file(&self) -> PathBuf {
        self.logs_dir().join("parser.log")
    }

    pub fn downloads_dir(&self) -> PathBuf {
        self.base_dir.join("downloads")
    }

    pub fn results_dir(&self) -> PathBuf {
        self.base_dir.join("results")
    }
}
