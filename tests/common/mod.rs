#![allow(dead_code)]

use std::cell::RefCell;
use std::collections::HashMap;
use std::io::{self, Write};
use std::path::Path;
use std::sync::{Arc, Mutex};

use pydoc_scraper::cache::ResponseCache;
use pydoc_scraper::{CachedSession, RawResponse, Settings, Transport, TransportError};

pub const DOCS_URL: &str = "https://docs.example/3/";
pub const PEPS_URL: &str = "https://peps.example/";

/// Serves canned responses by URL and remembers every request it saw.
#[derive(Default)]
pub struct FakeTransport {
    pages: HashMap<String, (u16, Vec<u8>)>,
    requests: RefCell<Vec<String>>,
}

impl FakeTransport {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn page(self, url: &str, html: &str) -> Self {
        self.respond(url, 200, html.as_bytes())
    }

    pub fn respond(mut self, url: &str, status: u16, body: &[u8]) -> Self {
        self.pages.insert(url.to_string(), (status, body.to_vec()));
        self
    }

    pub fn hits(&self, url: &str) -> usize {
        self.requests.borrow().iter().filter(|u| *u == url).count()
    }

    pub fn requests(&self) -> Vec<String> {
        self.requests.borrow().clone()
    }
}

impl Transport for FakeTransport {
    fn get(&self, url: &str) -> Result<RawResponse, TransportError> {
        self.requests.borrow_mut().push(url.to_string());
        match self.pages.get(url) {
            Some((status, body)) => Ok(RawResponse {
                status: *status,
                body: body.clone(),
            }),
            None => Err(TransportError::Other(format!("connection refused: {url}"))),
        }
    }
}

pub fn session(transport: FakeTransport) -> CachedSession<FakeTransport> {
    CachedSession::new(transport, ResponseCache::open_in_memory().unwrap())
}

pub fn settings(base_dir: &Path) -> Settings {
    Settings {
        main_doc_url: DOCS_URL.to_string(),
        pep_doc_url: PEPS_URL.to_string(),
        ..Settings::with_base_dir(base_dir)
    }
}

/// Every row, header included, as owned string vectors.
pub fn all_rows(table: &pydoc_scraper::ResultTable) -> Vec<Vec<String>> {
    table.iter().map(|row| row.to_vec()).collect()
}

pub fn row(cells: &[&str]) -> Vec<String> {
    cells.iter().map(|c| c.to_string()).collect()
}

/// Appends formatted log lines to a shared buffer.
#[derive(Clone, Default)]
struct SharedWriter(Arc<Mutex<Vec<u8>>>);

impl Write for SharedWriter {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.0.lock().unwrap().extend_from_slice(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

/// Runs `f` under a thread-local subscriber and returns its result along
/// with everything that was logged.
pub fn capture_logs<R>(f: impl FnOnce() -> R) -> (R, String) {
    let writer = SharedWriter::default();
    let buffer = writer.0.clone();
    let subscriber = tracing_subscriber::fmt()
        .with_writer(move || writer.clone())
        .with_ansi(false)
        .with_max_level(tracing::Level::DEBUG)
        .finish();
    let result = tracing::subscriber::with_default(subscriber, f);
    let logs = String::from_utf8(buffer.lock().unwrap().clone()).unwrap();
    (result, logs)
}
