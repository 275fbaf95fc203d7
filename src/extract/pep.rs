use anyhow::Result;
use std::collections::HashSet;
use std::time::Instant;
use tracing::{info, warn};

use super::anchor_page;
use crate::fetch::{CachedSession, Transport};
use crate::locate::{locate, locate_all, require_attr, text_of, try_locate, AttrMatch, TagQuery};
use crate::patterns::{expected_statuses, status_code};
use crate::progress::Progress;
use crate::settings::Settings;
use crate::stats::StatusTally;
use crate::table::ResultTable;
use crate::utils::resolve_url;

/// Tallies the full status of every PEP listed in the index, checking each
/// against the abbreviated status shown in the index row.
pub fn pep<T: Transport>(
    session: &CachedSession<T>,
    settings: &Settings,
    progress: &mut dyn Progress,
) -> Result<ResultTable> {
    let start_time = Instant::now();
    let index = anchor_page(session, &settings.pep_doc_url)?;
    let rows = locate_all(
        &index,
        &TagQuery::new("tr").attr("class", AttrMatch::one_of(["row-even", "row-odd"])),
    );

    let abbr_query = TagQuery::new("abbr");
    let link_query = TagQuery::new("a").attr("class", AttrMatch::exact("pep reference internal"));
    let mut visited: HashSet<String> = HashSet::new();
    let mut tally = StatusTally::new();
    let mut mismatches = 0usize;

    progress.begin(rows.len());
    for row in rows {
        let Some(preview) = try_locate(row, &abbr_query) else {
            progress.item_done("");
            continue;
        };
        let link = locate(row, &link_query)?;
        let pep_url = resolve_url(&settings.pep_doc_url, require_attr(&link, "href")?)?;
        progress.item_done(&pep_url);
        if !visited.insert(pep_url.clone()) {
            continue;
        }

        let Some(page) = session.fetch_document(&pep_url)? else {
            continue;
        };
        let Some(full_status) = try_locate(&page, &abbr_query) else {
            warn!(action = "skip", component = "pep", url = %pep_url, "PEP page has no status");
            continue;
        };
        let full_status = text_of(&full_status);
        tally.record(&full_status);

        let preview_text = text_of(&preview);
        let expected = expected_statuses(status_code(&preview_text));
        if !expected.contains(&full_status.as_str()) {
            mismatches += 1;
            info!(
                action = "compare",
                component = "pep",
                url = %pep_url,
                found = %full_status,
                expected = ?expected,
                "Mismatched statuses"
            );
        }
    }
    progress.finish();

    info!(
        action = "complete",
        component = "pep",
        peps = visited.len(),
        statuses = tally.distinct(),
        total = tally.total(),
        mismatches,
        duration_ms = start_time.elapsed().as_millis(),
        "PEP status summary collected"
    );
    tally.into_table()
}
