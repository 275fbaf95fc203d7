use anyhow::Result;
use tracing::{error, info};

use super::anchor_page;
use crate::error::ScrapeError;
use crate::fetch::{CachedSession, Transport};
use crate::locate::{locate, locate_all, require_attr, text_of, trace, AttrMatch, TagQuery};
use crate::patterns::split_version_status;
use crate::settings::Settings;
use crate::table::ResultTable;

const VERSIONS_MARKER: &str = "All versions";

/// Documentation versions listed in the sidebar of the docs root page.
pub fn latest_versions<T: Transport>(
    session: &CachedSession<T>,
    settings: &Settings,
) -> Result<ResultTable> {
    let root = anchor_page(session, &settings.main_doc_url)?;
    let sidebar = locate(
        &root,
        &TagQuery::new("div").attr("class", AttrMatch::exact("sphinxsidebarwrapper")),
    )?;

    let versions_list = locate_all(sidebar, &TagQuery::new("ul"))
        .into_iter()
        .find(|ul| text_of(ul).contains(VERSIONS_MARKER));
    let Some(versions_list) = versions_list else {
        let container = trace(&sidebar);
        error!(action = "locate", component = "latest_versions", container = %container, "No versions list found");
        return Err(ScrapeError::NoVersionsListFound { container }.into());
    };

    let mut table = ResultTable::new(["Link", "Version", "Status"]);
    for link in locate_all(versions_list, &TagQuery::new("a")) {
        let (version, status) = split_version_status(&text_of(&link));
        table.push([require_attr(&link, "href")?.to_string(), version, status])?;
    }

    info!(action = "complete", component = "latest_versions", rows = table.len(), "Version list collected");
    Ok(table)
}
