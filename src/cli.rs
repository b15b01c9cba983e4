//! CLI argument definitions using clap derive macros.

use std::path::PathBuf;
use std::time::Duration;

use clap::Parser;

use media_downloader_core::config::{DEFAULT_HOST, DEFAULT_PORT, DEFAULT_STORAGE_DIR};
use media_downloader_core::download::constants::FETCH_TIMEOUT_SECS;
use media_downloader_core::{MediaPolicy, ServerConfig};

/// Fetch remote media by URL and store it under a generated name.
///
/// Serves `POST /api/download` with a JSON body `{"url": "..."}`; the file is
/// written to the storage directory and served back under `/downloads`.
#[derive(Parser, Debug)]
#[command(name = "media-downloader")]
#[command(author, version, about)]
pub struct Args {
    /// Increase output verbosity (-v for debug, -vv for trace)
    #[arg(short, long, action = clap::ArgAction::Count)]
    pub verbose: u8,

    /// Suppress non-error output
    #[arg(short, long)]
    pub quiet: bool,

    /// Address to bind
    #[arg(long, env = "MEDIA_DOWNLOADER_HOST", default_value = DEFAULT_HOST)]
    pub host: String,

    /// Port to listen on
    #[arg(short, long, env = "PORT", default_value_t = DEFAULT_PORT)]
    pub port: u16,

    /// Directory downloaded files are stored in (created if missing)
    #[arg(short = 'd', long, env = "DOWNLOADS_DIR", default_value = DEFAULT_STORAGE_DIR)]
    pub storage_dir: PathBuf,

    /// Whole-request timeout for each outbound fetch, in seconds (1-3600)
    #[arg(long, env = "DOWNLOAD_TIMEOUT_SECS", default_value_t = FETCH_TIMEOUT_SECS, value_parser = clap::value_parser!(u64).range(1..=3600))]
    pub timeout_secs: u64,

    /// Store any content type, not only image/video/audio/octet-stream
    #[arg(long, env = "ALLOW_ANY_CONTENT_TYPE")]
    pub allow_any_content_type: bool,
}

impl Args {
    /// Resolves the immutable service configuration.
    pub fn server_config(&self) -> ServerConfig {
        ServerConfig {
            host: self.host.clone(),
            port: self.port,
            storage_dir: self.storage_dir.clone(),
            fetch_timeout: Duration::from_secs(self.timeout_secs),
            media_policy: if self.allow_any_content_type {
                MediaPolicy::AnyContentType
            } else {
                MediaPolicy::MediaOnly
            },
        }
    }

    /// Default tracing filter when `RUST_LOG` is unset.
    pub fn default_log_level(&self) -> &'static str {
        if self.quiet {
            "error"
        } else {
            match self.verbose {
                0 => "info",
                1 => "debug",
                _ => "trace",
            }
        }
    }
}
