//! HTTP client for the TheGamesDB image CDN.

use tokio::time::Duration;

use crate::error::ArtworkError;

/// Default CDN base; overridable through [`crate::DownloadOptions`].
pub const GAMESDB_CDN: &str = "https://cdn.thegamesdb.net/";

/// Thin wrapper over a configured `reqwest::Client`. Image downloads
/// are plain GETs against a fixed base URL; there is no authentication
/// and no retry.
pub struct CdnClient {
    http: reqwest::Client,
    base_url: String,
}

impl CdnClient {
    pub fn new(base_url: &str) -> Result<Self, ArtworkError> {
        let http = reqwest::Client::builder()
            .timeout(Duration::from_secs(30))
            .build()?;
        Ok(Self {
            http,
            base_url: base_url.trim_end_matches('/').to_string(),
        })
    }

    /// Fetch one artwork file by its dump-relative filename.
    pub async fn download_image(&self, filename: &str) -> Result<Vec<u8>, ArtworkError> {
        let url = format!("{}/images/original/{}", self.base_url, filename);
        let resp = self.http.get(&url).send().await?.error_for_status()?;
        let bytes = resp.bytes().await?;
        Ok(bytes.to_vec())
    }
}
