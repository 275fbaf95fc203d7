use anyhow::{Context, Result};
use std::fs::{self, File};
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};
use std::time::Instant;
use tracing::info;

use super::anchor_page;
use crate::fetch::{CachedSession, Transport};
use crate::locate::{locate, require_attr, AttrMatch, TagQuery};
use crate::patterns::PDF_A4_ZIP;
use crate::settings::Settings;
use crate::utils::{file_name_from_url, resolve_url};

/// Saves the zipped A4 PDF documentation archive into the downloads
/// directory and returns where it landed.
pub fn download<T: Transport>(session: &CachedSession<T>, settings: &Settings) -> Result<PathBuf> {
    let start_time = Instant::now();
    let downloads_url = resolve_url(&settings.main_doc_url, "download.html")?;
    let page = anchor_page(session, &downloads_url)?;

    let main = locate(&page, &TagQuery::new("div").attr("role", AttrMatch::exact("main")))?;
    let table = locate(main, &TagQuery::new("table").attr("class", AttrMatch::exact("docutils")))?;
    let archive_link = locate(
        table,
        &TagQuery::new("a").attr("href", AttrMatch::pattern(&PDF_A4_ZIP)),
    )?;

    let archive_url = resolve_url(&downloads_url, require_attr(&archive_link, "href")?)?;
    let file_name = file_name_from_url(&archive_url)?;
    let downloads_dir = settings.downloads_dir();
    fs::create_dir_all(&downloads_dir)
        .with_context(|| format!("Failed to create downloads directory {:?}", downloads_dir))?;
    let archive_path = downloads_dir.join(&file_name);

    let partial_path = downloads_dir.join(format!("{file_name}.part"));
    let bytes = match stream_archive(session, &archive_url, &partial_path) {
        Ok(bytes) => bytes,
        Err(e) => {
            // ignore: the partial file may never have been created
            fs::remove_file(&partial_path).ok();
            return Err(e);
        }
    };
    fs::rename(&partial_path, &archive_path)
        .with_context(|| format!("Failed to move archive into {:?}", archive_path))?;

    info!(
        action = "complete",
        component = "download",
        url = %archive_url,
        path = ?archive_path,
        bytes,
        duration_ms = start_time.elapsed().as_millis(),
        "Archive downloaded and saved"
    );
    Ok(archive_path)
}

/// Streams the archive body into `path` without holding it in memory.
fn stream_archive<T: Transport>(session: &CachedSession<T>, url: &str, path: &Path) -> Result<u64> {
    let file = File::create(path).with_context(|| format!("Failed to create {:?}", path))?;
    let mut sink = BufWriter::new(file);
    let bytes = session.stream_uncached(url, &mut sink)?;
    sink.flush()
        .with_context(|| format!("Failed to save archive to {:?}", path))?;
    Ok(bytes)
}
