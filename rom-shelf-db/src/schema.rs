//! SQLite schema creation.

use rusqlite::Connection;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum SchemaError {
    #[error("SQLite error: {0}")]
    Sqlite(#[from] rusqlite::Error),
    #[error("Schema version {found} is newer than supported version {supported}")]
    VersionTooNew { supported: i32, found: i32 },
}

/// Current schema version. Increment when adding migrations.
pub const CURRENT_VERSION: i32 = 1;

/// Create all tables and indexes if they don't exist.
///
/// This is idempotent — safe to call on an existing database.
pub fn create_schema(conn: &Connection) -> Result<(), SchemaError> {
    conn.execute_batch(SCHEMA_SQL)?;
    set_schema_version(conn, CURRENT_VERSION)?;
    Ok(())
}

/// Open or create a library database at the given path.
pub fn open_database(path: &std::path::Path) -> Result<Connection, SchemaError> {
    let conn = Connection::open(path)?;
    conn.execute_batch("PRAGMA journal_mode=WAL; PRAGMA foreign_keys=ON;")?;

    let version = get_schema_version(&conn)?;
    if version == 0 {
        create_schema(&conn)?;
    } else if version > CURRENT_VERSION {
        return Err(SchemaError::VersionTooNew {
            supported: CURRENT_VERSION,
            found: version,
        });
    }

    Ok(conn)
}

/// Open an in-memory database with the full schema. Useful for testing.
pub fn open_memory() -> Result<Connection, SchemaError> {
    let conn = Connection::open_in_memory()?;
    conn.execute_batch("PRAGMA foreign_keys=ON;")?;
    create_schema(&conn)?;
    Ok(conn)
}

/// Get the current schema version, or 0 if no schema exists.
fn get_schema_version(conn: &Connection) -> Result<i32, SchemaError> {
    let exists: bool = conn.query_row(
        "SELECT EXISTS(SELECT 1 FROM sqlite_master WHERE type='table' AND name='schema_version')",
        [],
        |row| row.get(0),
    )?;

    if !exists {
        return Ok(0);
    }

    let version: i32 = conn.query_row(
        "SELECT COALESCE(MAX(version), 0) FROM schema_version",
        [],
        |row| row.get(0),
    )?;
    Ok(version)
}

/// Record a schema version.
fn set_schema_version(conn: &Connection, version: i32) -> Result<(), SchemaError> {
    conn.execute(
        "INSERT INTO schema_version (version) VALUES (?1)",
        [version],
    )?;
    Ok(())
}

const SCHEMA_SQL: &str = r#"
-- Schema version tracking
CREATE TABLE IF NOT EXISTS schema_version (
    version INTEGER NOT NULL,
    applied_at TEXT NOT NULL DEFAULT (datetime('now'))
);

-- Gaming systems/platforms
CREATE TABLE IF NOT EXISTS systems (
    id INTEGER PRIMARY KEY,
    name TEXT NOT NULL,
    alias TEXT
);

-- Games, keyed by the dump's own ids
CREATE TABLE IF NOT EXISTS games (
    id INTEGER PRIMARY KEY,
    game_title TEXT NOT NULL,
    release_date TEXT,
    platform INTEGER REFERENCES systems(id),
    region_id INTEGER,
    country_id INTEGER,
    overview TEXT,
    youtube TEXT,
    players INTEGER,
    coop TEXT,
    rating TEXT
);

-- Many-to-many links; ids on the right side live in the dump only
CREATE TABLE IF NOT EXISTS game_developers (
    game_id INTEGER NOT NULL REFERENCES games(id),
    developer_id INTEGER NOT NULL,
    PRIMARY KEY (game_id, developer_id)
);

CREATE TABLE IF NOT EXISTS game_genres (
    game_id INTEGER NOT NULL REFERENCES games(id),
    genre_id INTEGER NOT NULL,
    PRIMARY KEY (game_id, genre_id)
);

CREATE TABLE IF NOT EXISTS game_publishers (
    game_id INTEGER NOT NULL REFERENCES games(id),
    publisher_id INTEGER NOT NULL,
    PRIMARY KEY (game_id, publisher_id)
);

CREATE TABLE IF NOT EXISTS game_alternates (
    game_id INTEGER NOT NULL REFERENCES games(id),
    alternate_title TEXT NOT NULL,
    PRIMARY KEY (game_id, alternate_title)
);

-- Box art, screenshots, etc.
CREATE TABLE IF NOT EXISTS game_artwork (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    game_id INTEGER NOT NULL REFERENCES games(id),
    type TEXT,
    side TEXT,
    filename TEXT,
    resolution TEXT
);
-- NULL side/filename must still collide on re-import, so coalesce them
CREATE UNIQUE INDEX IF NOT EXISTS idx_artwork_natural
    ON game_artwork(game_id, type, COALESCE(side, ''), COALESCE(filename, ''));

CREATE INDEX IF NOT EXISTS idx_games_title ON games(game_title);
CREATE INDEX IF NOT EXISTS idx_games_platform ON games(platform);
CREATE INDEX IF NOT EXISTS idx_systems_name ON systems(name);
"#;
