use anyhow::Result;
use std::time::Instant;
use tracing::{info, warn};

use super::anchor_page;
use crate::fetch::{CachedSession, Transport};
use crate::locate::{locate, locate_all, require_attr, text_of, AttrMatch, TagQuery};
use crate::progress::Progress;
use crate::settings::Settings;
use crate::table::ResultTable;
use crate::utils::{collapse_newlines, resolve_url};

/// One row per "What's New" article: link, heading, and the editor/author
/// block, in table-of-contents order.
pub fn whats_new<T: Transport>(
    session: &CachedSession<T>,
    settings: &Settings,
    progress: &mut dyn Progress,
) -> Result<ResultTable> {
    let start_time = Instant::now();
    let index_url = resolve_url(&settings.main_doc_url, "whatsnew/")?;
    let index = anchor_page(session, &index_url)?;

    let main_section = locate(
        &index,
        &TagQuery::new("section").attr("id", AttrMatch::exact("what-s-new-in-python")),
    )?;
    let toctree = locate(
        main_section,
        &TagQuery::new("div").attr("class", AttrMatch::exact("toctree-wrapper")),
    )?;
    let items = locate_all(
        toctree,
        &TagQuery::new("li").attr("class", AttrMatch::exact("toctree-l1")),
    );

    let mut table = ResultTable::new(["Link", "Title", "Editor/Author"]);
    progress.begin(items.len());
    let link_query = TagQuery::new("a");
    let heading_query = TagQuery::new("h1");
    let authors_query = TagQuery::new("dl");

    for item in items {
        let link = locate(item, &link_query)?;
        let version_url = resolve_url(&index_url, require_attr(&link, "href")?)?;

        let Some(page) = session.fetch_document(&version_url)? else {
            warn!(action = "skip", component = "whats_new", url = %version_url, "Skipping unavailable page");
            progress.item_done(&version_url);
            continue;
        };
        let heading = locate(&page, &heading_query)?;
        let authors = locate(&page, &authors_query)?;

        table.push([
            version_url.clone(),
            text_of(&heading),
            collapse_newlines(&text_of(&authors)),
        ])?;
        progress.item_done(&version_url);
    }
    progress.finish();

    info!(
        action = "complete",
        component = "whats_new",
        rows = table.len(),
        duration_ms = start_time.elapsed().as_millis(),
        "What's New digest collected"
    );
    Ok(table)
}
