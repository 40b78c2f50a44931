//! Artwork downloading for a ROM library.
//!
//! Walks the per-platform core-tree asset, matches each ROM file against
//! the library store, and pulls cover art and screenshots from the
//! TheGamesDB CDN. Downloads for a single game run on a small bounded
//! pool; one bad match or failed request never aborts the run.

pub mod client;
pub mod cores;
pub mod download;
pub mod error;
pub mod log;
pub mod run;

pub use client::CdnClient;
pub use cores::{CoreSystem, load_cores};
pub use download::{DownloadJob, DownloadOptions, JobOutcome, download_game_artwork};
pub use error::ArtworkError;
pub use log::{RomEntry, RunLog, RunSummary};
pub use run::run_artwork;
