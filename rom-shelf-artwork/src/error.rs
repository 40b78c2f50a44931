use std::path::PathBuf;

/// Errors that can occur while downloading artwork.
#[derive(Debug, thiserror::Error)]
pub enum ArtworkError {
    #[error("Required asset file not found: {0}")]
    MissingAsset(PathBuf),

    #[error("Invalid asset JSON: {0}")]
    Json(#[from] serde_json::Error),

    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Database error: {0}")]
    Db(#[from] rom_shelf_db::OperationError),
}
