pub mod args;
pub mod cache;
pub mod error;
pub mod extract;
pub mod fetch;
pub mod locate;
pub mod log_file;
pub mod output;
pub mod patterns;
pub mod progress;
pub mod runner;
pub mod settings;
pub mod stats;
pub mod table;
pub mod utils;

pub use args::{Args, Mode, OutputFormat};
pub use error::{ScrapeError, TransportError};
pub use fetch::{CachedSession, FetchResult, HttpTransport, RawResponse, Transport};
pub use runner::{run, validate_args};
pub use settings::Settings;
pub use table::ResultTable;
