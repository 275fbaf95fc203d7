//! Page extractors and the mode dispatch table.
//!
//! Each extractor drives one or more fetch/locate cycles against the
//! Python documentation and either returns a [`ResultTable`] or, for
//! `download`, writes a file.

use anyhow::Result;
use scraper::Html;
use tracing::info;

use crate::args::Mode;
use crate::error::ScrapeError;
use crate::fetch::{CachedSession, Transport};
use crate::progress::Progress;
use crate::settings::Settings;
use crate::table::ResultTable;

mod download;
mod latest_versions;
mod pep;
mod whats_new;

pub use download::download;
pub use latest_versions::latest_versions;
pub use pep::pep;
pub use whats_new::whats_new;

impl Mode {
    /// Runs the extractor behind this mode. `download` produces no table.
    pub fn run<T: Transport>(
        self,
        session: &CachedSession<T>,
        settings: &Settings,
        progress: &mut dyn Progress,
    ) -> Result<Option<ResultTable>> {
        info!(action = "dispatch", component = "extractor", mode = %self, "Running extractor");
        match self {
            Mode::WhatsNew => whats_new(session, settings, progress).map(Some),
            Mode::LatestVersions => latest_versions(session, settings).map(Some),
            Mode::Download => download(session, settings).map(|_| None),
            Mode::Pep => pep(session, settings, progress).map(Some),
        }
    }
}

/// Fetches a page the rest of an extractor depends on; a skipped fetch
/// here aborts the run.
fn anchor_page<T: Transport>(session: &CachedSession<T>, url: &str) -> Result<Html> {
    match session.fetch_document(url)? {
        Some(doc) => Ok(doc),
        None => Err(ScrapeError::PageUnavailable {
            url: url.to_string(),
        }
        .into()),
    }
}
