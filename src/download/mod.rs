//! Download-and-persist pipeline for remote media.
//!
//! A download runs four stages in order, stopping at the first failure:
//!
//! 1. **validate** - the locator must be a well-formed `http`/`https` URL
//! 2. **fetch** - GET with a 30s budget, at most 5 redirects, 2xx only
//! 3. **classify** - media gate on the declared type, suffix + artifact id
//! 4. **persist** - stream the body into `<artifact id><suffix>`
//!
//! # Example
//!
//! ```no_run
//! use media_downloader_core::download::{DownloadService, HttpClient, MediaPolicy};
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let service = DownloadService::new(HttpClient::new(), "./downloads", MediaPolicy::MediaOnly);
//! let outcome = service.download(Some("https://example.com/cat.jpg")).await?;
//! println!("Stored {} bytes at {}", outcome.bytes, outcome.path.display());
//! # Ok(())
//! # }
//! ```

mod classify;
mod client;
pub mod constants;
mod error;
pub mod filename;
mod persistence;
mod pipeline;
mod progress;
mod validate;

pub use client::{FetchedResponse, HttpClient};
pub use error::{DownloadError, ErrorKind};
pub use pipeline::{DownloadOutcome, DownloadService, MediaPolicy};
pub use progress::ProgressTracker;
pub use validate::validate_locator;
