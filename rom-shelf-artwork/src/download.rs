//! Per-game artwork downloads on a bounded pool.

use std::path::{Path, PathBuf};

use futures::stream::{self, StreamExt};
use rom_shelf_db::ArtworkRow;
use tokio::time::Duration;

use crate::client::{CdnClient, GAMESDB_CDN};

/// Options for an artwork run.
#[derive(Debug, Clone)]
pub struct DownloadOptions {
    /// Maximum concurrent downloads for one game's artwork.
    pub workers: usize,
    /// Courtesy pause after each completed file.
    pub file_delay: Duration,
    /// Courtesy pause after each game.
    pub game_delay: Duration,
    /// CDN base URL; tests point this at a local server.
    pub base_url: String,
}

impl Default for DownloadOptions {
    fn default() -> Self {
        Self {
            workers: 4,
            file_delay: Duration::from_millis(500),
            game_delay: Duration::from_millis(100),
            base_url: GAMESDB_CDN.to_string(),
        }
    }
}

/// One planned download: a CDN-relative source and a local destination.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DownloadJob {
    pub filename: String,
    pub dest: PathBuf,
}

/// What happened to one job.
#[derive(Debug, Clone)]
pub enum JobOutcome {
    Downloaded(PathBuf),
    SkippedExisting(PathBuf),
    Failed { dest: PathBuf, message: String },
}

/// Build download jobs for one game from its artwork rows.
///
/// Rows arrive ordered by (type, id); only the first row of each type is
/// kept, so a game yields at most one cover and one screenshot job.
/// Output names reuse the ROM filename stem.
pub fn build_jobs(rows: &[ArtworkRow], stem: &str, system_dir: &Path) -> Vec<DownloadJob> {
    let mut jobs = Vec::new();
    let mut have_cover = false;
    let mut have_screenshot = false;

    for row in rows {
        let Some(filename) = row.filename.as_deref() else {
            continue;
        };
        let suffix = match row.kind.as_deref() {
            Some("boxart") if !have_cover => {
                have_cover = true;
                "cover"
            }
            Some("screenshot") if !have_screenshot => {
                have_screenshot = true;
                "screenshot"
            }
            _ => continue,
        };
        jobs.push(DownloadJob {
            filename: filename.to_string(),
            dest: system_dir.join(format!("{stem}-{suffix}.jpg")),
        });
    }

    jobs
}

/// Run one game's jobs on a pool of at most `options.workers` downloads.
///
/// Jobs whose destination already exists are resolved without touching
/// the network. Each worker holds its slot through the per-file courtesy
/// pause, matching a thread pool whose workers sleep after writing.
pub async fn download_game_artwork(
    client: &CdnClient,
    jobs: Vec<DownloadJob>,
    options: &DownloadOptions,
) -> Vec<JobOutcome> {
    stream::iter(jobs)
        .map(|job| async move {
            if job.dest.exists() {
                return JobOutcome::SkippedExisting(job.dest);
            }
            match fetch_one(client, &job).await {
                Ok(()) => {
                    tokio::time::sleep(options.file_delay).await;
                    JobOutcome::Downloaded(job.dest)
                }
                Err(e) => JobOutcome::Failed {
                    dest: job.dest,
                    message: e.to_string(),
                },
            }
        })
        .buffer_unordered(options.workers.max(1))
        .collect()
        .await
}

async fn fetch_one(client: &CdnClient, job: &DownloadJob) -> Result<(), crate::ArtworkError> {
    if let Some(parent) = job.dest.parent() {
        std::fs::create_dir_all(parent)?;
    }
    let bytes = client.download_image(&job.filename).await?;
    std::fs::write(&job.dest, &bytes)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn art(kind: &str, filename: &str) -> ArtworkRow {
        ArtworkRow {
            game_id: 1,
            kind: Some(kind.to_string()),
            side: None,
            filename: Some(filename.to_string()),
            resolution: None,
        }
    }

    #[test]
    fn first_row_per_type_wins() {
        // Store order is (type, id): three boxart rows, then a screenshot
        let rows = vec![
            art("boxart", "boxart/front/1-1.jpg"),
            art("boxart", "boxart/front/1-2.jpg"),
            art("boxart", "boxart/back/1-1.jpg"),
            art("screenshot", "screenshots/1-1.jpg"),
        ];
        let jobs = build_jobs(&rows, "Tetris", Path::new("ROMs/Nintendo - GameBoy"));

        assert_eq!(jobs.len(), 2);
        assert_eq!(jobs[0].filename, "boxart/front/1-1.jpg");
        assert_eq!(
            jobs[0].dest,
            Path::new("ROMs/Nintendo - GameBoy/Tetris-cover.jpg")
        );
        assert_eq!(
            jobs[1].dest,
            Path::new("ROMs/Nintendo - GameBoy/Tetris-screenshot.jpg")
        );
    }

    #[test]
    fn rows_without_filenames_are_dropped() {
        let rows = vec![ArtworkRow {
            game_id: 1,
            kind: Some("boxart".to_string()),
            side: None,
            filename: None,
            resolution: None,
        }];
        assert!(build_jobs(&rows, "Tetris", Path::new("ROMs/gb")).is_empty());
    }

    #[tokio::test]
    async fn existing_destinations_skip_the_network() {
        let dir = tempfile::tempdir().unwrap();
        let dest = dir.path().join("Tetris-cover.jpg");
        std::fs::write(&dest, b"already here").unwrap();

        // An unroutable base URL: any actual request would fail loudly
        let client = CdnClient::new("http://127.0.0.1:1").unwrap();
        let options = DownloadOptions {
            file_delay: Duration::ZERO,
            game_delay: Duration::ZERO,
            ..DownloadOptions::default()
        };
        let jobs = vec![DownloadJob {
            filename: "boxart/front/1-1.jpg".to_string(),
            dest: dest.clone(),
        }];

        let outcomes = download_game_artwork(&client, jobs, &options).await;
        assert_eq!(outcomes.len(), 1);
        assert!(matches!(&outcomes[0], JobOutcome::SkippedExisting(p) if *p == dest));
    }

    #[tokio::test]
    async fn failed_downloads_are_reported_per_job() {
        let dir = tempfile::tempdir().unwrap();
        let client = CdnClient::new("http://127.0.0.1:1").unwrap();
        let options = DownloadOptions {
            file_delay: Duration::ZERO,
            game_delay: Duration::ZERO,
            ..DownloadOptions::default()
        };
        let jobs = vec![DownloadJob {
            filename: "boxart/front/1-1.jpg".to_string(),
            dest: dir.path().join("Tetris-cover.jpg"),
        }];

        let outcomes = download_game_artwork(&client, jobs, &options).await;
        assert!(matches!(outcomes[0], JobOutcome::Failed { .. }));
    }
}
