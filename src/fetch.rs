use anyhow::{Context, Result};
use scraper::Html;
use std::io::Write;
use std::time::Instant;
use tracing::{debug, error, info, warn};

use crate::cache::ResponseCache;
use crate::error::TransportError;
use crate::settings::Settings;

const GET: &str = "GET";

/// A response as handed back by a [`Transport`].
#[derive(Debug, Clone)]
pub struct RawResponse {
    pub status: u16,
    pub body: Vec<u8>,
}

impl RawResponse {
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }
}

/// Decoded body of a successful page fetch.
#[derive(Debug, Clone)]
pub struct FetchResult {
    pub url: String,
    pub text: String,
}

impl FetchResult {
    pub fn parse(&self) -> Html {
        Html::parse_document(&self.text)
    }
}

/// Issues blocking GET requests.
pub trait Transport {
    fn get(&self, url: &str) -> Result<RawResponse, TransportError>;

    /// GET `url` and copy a successful body into `sink`, returning the
    /// number of bytes written. Nothing is written for a non-success status.
    fn get_to(&self, url: &str, sink: &mut dyn Write) -> Result<u64, TransportError> {
        let response = self.get(url)?;
        if !response.is_success() {
            return Err(TransportError::Status {
                url: url.to_string(),
                status: response.status,
            });
        }
        sink.write_all(&response.body).map_err(|source| TransportError::Io {
            url: url.to_string(),
            source,
        })?;
        Ok(response.body.len() as u64)
    }
}

/// Production transport over `reqwest`'s blocking client.
pub struct HttpTransport {
    client: reqwest::blocking::Client,
}

impl HttpTransport {
    pub fn new(settings: &Settings) -> Result<Self> {
        let client = reqwest::blocking::Client::builder()
            .timeout(settings.request_timeout)
            .user_agent(settings.user_agent.as_str())
            .build()
            .context("Failed to create HTTP client")?;
        Ok(Self { client })
    }
}

impl Transport for HttpTransport {
    fn get(&self, url: &str) -> Result<RawResponse, TransportError> {
        let request_error = |source: reqwest::Error| TransportError::Request {
            url: url.to_string(),
            source,
        };
        let response = self.client.get(url).send().map_err(request_error)?;
        let status = response.status().as_u16();
        let body = response.bytes().map_err(request_error)?;
        Ok(RawResponse {
            status,
            body: body.to_vec(),
        })
    }

    fn get_to(&self, url: &str, sink: &mut dyn Write) -> Result<u64, TransportError> {
        let mut response = self.client.get(url).send().map_err(|source| TransportError::Request {
            url: url.to_string(),
            source,
        })?;
        let status = response.status().as_u16();
        if !response.status().is_success() {
            return Err(TransportError::Status {
                url: url.to_string(),
                status,
            });
        }
        response.copy_to(sink).map_err(|source| TransportError::Request {
            url: url.to_string(),
            source,
        })
    }
}

/// Long-lived fetch session: one transport, one response cache.
pub struct CachedSession<T: Transport = HttpTransport> {
    transport: T,
    cache: ResponseCache,
}

impl<T: Transport> CachedSession<T> {
    pub fn new(transport: T, cache: ResponseCache) -> Self {
        Self { transport, cache }
    }

    pub fn transport(&self) -> &T {
        &self.transport
    }

    pub fn cache(&self) -> &ResponseCache {
        &self.cache
    }

    /// GET `url` through the cache. Network failures and non-success
    /// statuses are logged and come back as `None` so callers can skip the
    /// page; only cache I/O errors propagate.
    pub fn fetch(&self, url: &str) -> Result<Option<FetchResult>> {
        if let Some(hit) = self.cache.get(GET, url)? {
            debug!(action = "fetch", component = "cached_fetcher", url, cached = true, "Served from cache");
            return Ok(Some(FetchResult {
                url: url.to_string(),
                text: String::from_utf8_lossy(&hit.body).into_owned(),
            }));
        }

        let start_time = Instant::now();
        let response = match self.transport.get(url) {
            Ok(response) => response,
            Err(e) => {
                error!(action = "fetch", component = "cached_fetcher", url, error = %e, "Failed to load page");
                return Ok(None);
            }
        };

        if !response.is_success() {
            warn!(action = "fetch", component = "cached_fetcher", url, status = response.status, "Page returned an error status");
            return Ok(None);
        }

        self.cache.put(GET, url, response.status, &response.body)?;
        debug!(
            action = "fetch",
            component = "cached_fetcher",
            url,
            cached = false,
            bytes = response.body.len(),
            duration_ms = start_time.elapsed().as_millis(),
            "Fetched from network"
        );

        Ok(Some(FetchResult {
            url: url.to_string(),
            text: String::from_utf8_lossy(&response.body).into_owned(),
        }))
    }

    /// Fetch and parse `url`; `None` when the fetch was skipped.
    pub fn fetch_document(&self, url: &str) -> Result<Option<Html>> {
        Ok(self.fetch(url)?.map(|page| page.parse()))
    }

    /// Direct GET that bypasses the cache and streams the body into
    /// `sink`. Every failure propagates.
    pub fn stream_uncached(&self, url: &str, sink: &mut dyn Write) -> Result<u64> {
        Ok(self.transport.get_to(url, sink)?)
    }

    pub fn clear_cache(&self) -> Result<()> {
        self.cache.clear()
    }

    pub fn close(self) -> Result<()> {
        info!(action = "close", component = "cached_fetcher", "Closing fetch session");
        self.cache.close()
    }
}
