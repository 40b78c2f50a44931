use thiserror::Error;

/// Errors that reach `main` and terminate a command.
#[derive(Debug, Error)]
pub(crate) enum CliError {
    #[error("{0}")]
    Io(#[from] std::io::Error),

    #[error("{0}")]
    Dump(#[from] rom_shelf_gamesdb::DumpError),

    #[error("{0}")]
    Schema(#[from] rom_shelf_db::SchemaError),

    #[error("{0}")]
    Import(#[from] rom_shelf_gamesdb::ImportError),

    #[error("Database error: {0}")]
    Db(#[from] rom_shelf_db::OperationError),

    #[error("{0}")]
    Artwork(#[from] rom_shelf_artwork::ArtworkError),

    #[error("{0}")]
    Index(#[from] rom_shelf_index::IndexError),

    #[error("Runtime error: {0}")]
    Runtime(String),
}

impl CliError {
    pub(crate) fn runtime(msg: impl Into<String>) -> Self {
        Self::Runtime(msg.into())
    }
}
