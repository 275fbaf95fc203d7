use thiserror::Error;

/// Failure conditions raised while walking scraped pages.
#[derive(Debug, Error)]
pub enum ScrapeError {
    #[error("tag not found: {query} (searched under {trace})")]
    TagNotFound { query: String, trace: String },

    #[error("<{tag}> has no {attr} attribute (at {trace})")]
    MissingAttribute {
        tag: String,
        attr: String,
        trace: String,
    },

    #[error("no versions list found in {container}")]
    NoVersionsListFound { container: String },

    #[error("page could not be fetched: {url}")]
    PageUnavailable { url: String },

    #[error("row has {found} fields, header has {expected}")]
    RowArity { expected: usize, found: usize },
}

/// Network-level failure reported by a transport.
#[derive(Debug, Error)]
pub enum TransportError {
    #[error("request to {url} failed: {source}")]
    Request {
        url: String,
        #[source]
        source: reqwest::Error,
    },

    #[error("HTTP {status} for {url}")]
    Status { url: String, status: u16 },

    #[error("writing body of {url} failed: {source}")]
    Io {
        url: String,
        #[source]
        source: std::io::Error,
    },

    #[error("{0}")]
    Other(String),
}
