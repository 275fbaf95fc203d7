mod common;

use common::{session, settings, FakeTransport, DOCS_URL};
use pydoc_scraper::cache::ResponseCache;
use pydoc_scraper::progress::NullProgress;
use clap::Parser;
use pydoc_scraper::{validate_args, Args, CachedSession, Mode};
use tempfile::TempDir;

const ROOT: &str = r#"<html><body><div class="sphinxsidebarwrapper">
<ul><li><a href="https://docs.python.org/3.13/">Python 3.13 (stable)</a></li>
<li><a href="https://www.python.org/doc/versions/">All versions</a></li></ul>
</div></body></html>"#;

const DOWNLOADS: &str = r#"<html><body><div role="main"><table class="docutils">
<tr><td><a href="archives/docs-pdf-a4.zip">Download</a></td></tr>
</table></div></body></html>"#;

#[test]
fn test_table_modes_return_a_table() {
    let dir = TempDir::new().unwrap();
    let session = session(FakeTransport::new().page(DOCS_URL, ROOT));

    let table = Mode::LatestVersions
        .run(&session, &settings(dir.path()), &mut NullProgress)
        .unwrap()
        .expect("latest-versions yields a table");

    assert_eq!(table.header(), ["Link", "Version", "Status"]);
    assert_eq!(table.len(), 2);
}

#[test]
fn test_download_mode_returns_nothing() {
    let dir = TempDir::new().unwrap();
    let settings = settings(dir.path());
    let session = session(
        FakeTransport::new()
            .page("https://docs.example/3/download.html", DOWNLOADS)
            .respond("https://docs.example/3/archives/docs-pdf-a4.zip", 200, b"zip"),
    );

    let result = Mode::Download.run(&session, &settings, &mut NullProgress).unwrap();

    assert!(result.is_none());
    assert!(settings.downloads_dir().join("docs-pdf-a4.zip").exists());
}

#[test]
fn test_cache_survives_between_runs_until_cleared() {
    let dir = TempDir::new().unwrap();
    let settings = settings(dir.path());

    let first = CachedSession::new(
        FakeTransport::new().page(DOCS_URL, ROOT),
        ResponseCache::open(&settings.cache_path()).unwrap(),
    );
    Mode::LatestVersions.run(&first, &settings, &mut NullProgress).unwrap();
    first.close().unwrap();

    // second run has no network at all; the root page comes from disk
    let second = CachedSession::new(
        FakeTransport::new(),
        ResponseCache::open(&settings.cache_path()).unwrap(),
    );
    let table = Mode::LatestVersions.run(&second, &settings, &mut NullProgress).unwrap();
    assert_eq!(table.map(|t| t.len()), Some(2));
    assert_eq!(second.transport().requests().len(), 0);

    second.clear_cache().unwrap();
    assert!(Mode::LatestVersions.run(&second, &settings, &mut NullProgress).is_err());
    assert_eq!(second.transport().hits(DOCS_URL), 1);
}

#[test]
fn test_base_dir_that_is_a_file_is_rejected() {
    let dir = TempDir::new().unwrap();
    let file = dir.path().join("not-a-dir");
    std::fs::write(&file, b"").unwrap();

    let args = Args::try_parse_from(["pydoc-scraper", "pep", "--base-dir", file.to_str().unwrap()]).unwrap();
    let err = validate_args(&args).unwrap_err();
    assert!(err.to_string().contains("is not a directory"), "{err}");

    let fresh = dir.path().join("fresh");
    let args = Args::try_parse_from(["pydoc-scraper", "pep", "--base-dir", fresh.to_str().unwrap()]).unwrap();
    assert!(validate_args(&args).is_ok());
}
