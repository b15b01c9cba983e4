//! Media Downloader Core Library
//!
//! This library provides the core functionality for the media downloader
//! service, which fetches a remote file by URL and stores it under a freshly
//! generated name, reporting metadata about the stored artifact.
//!
//! # Architecture
//!
//! The library is organized into the following modules:
//! - [`download`] - The validate → fetch → classify → persist pipeline
//! - [`api`] - HTTP surface (`POST /api/download` and companions)
//! - [`config`] - Immutable service configuration

// Clippy lints - strict for library code
#![deny(clippy::unwrap_used)]
#![deny(clippy::expect_used)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]

pub mod api;
pub mod config;
pub mod download;
#[cfg(test)]
pub mod test_support;
pub(crate) mod user_agent;

// Re-export commonly used types
pub use api::{AppState, router};
pub use config::{ServerConfig, ensure_storage_dir};
pub use download::{
    DownloadError, DownloadOutcome, DownloadService, ErrorKind, HttpClient, MediaPolicy,
};
