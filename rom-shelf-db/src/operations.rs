//! Insert and upsert operations for the library store.

use rusqlite::{Connection, params};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum OperationError {
    #[error("SQLite error: {0}")]
    Sqlite(#[from] rusqlite::Error),
}

/// A row of the `systems` table.
#[derive(Debug, Clone)]
pub struct SystemRow {
    pub id: i64,
    pub name: String,
    pub alias: Option<String>,
}

/// A row of the `games` table, keyed by the dump's own game id.
#[derive(Debug, Clone, Default)]
pub struct GameRow {
    pub id: i64,
    pub title: String,
    pub release_date: Option<String>,
    pub platform: Option<i64>,
    pub region_id: Option<i64>,
    pub country_id: Option<i64>,
    pub overview: Option<String>,
    pub youtube: Option<String>,
    pub players: Option<i64>,
    pub coop: Option<String>,
    pub rating: Option<String>,
}

/// A row of the `game_artwork` table (insert side; the store assigns the id).
#[derive(Debug, Clone)]
pub struct ArtworkRow {
    pub game_id: i64,
    pub kind: Option<String>,
    pub side: Option<String>,
    pub filename: Option<String>,
    pub resolution: Option<String>,
}

// ── System Operations ───────────────────────────────────────────────────────

/// Insert or replace a system row, keyed by the dump-supplied id.
pub fn upsert_system(conn: &Connection, system: &SystemRow) -> Result<(), OperationError> {
    conn.execute(
        "INSERT OR REPLACE INTO systems (id, name, alias) VALUES (?1, ?2, ?3)",
        params![system.id, system.name, system.alias],
    )?;
    Ok(())
}

// ── Game Operations ─────────────────────────────────────────────────────────

/// Insert or replace a game row, keyed by the dump-supplied id.
pub fn upsert_game(conn: &Connection, game: &GameRow) -> Result<(), OperationError> {
    conn.execute(
        "INSERT OR REPLACE INTO games
         (id, game_title, release_date, platform, region_id, country_id,
          overview, youtube, players, coop, rating)
         VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10, ?11)",
        params![
            game.id,
            game.title,
            game.release_date,
            game.platform,
            game.region_id,
            game.country_id,
            game.overview,
            game.youtube,
            game.players,
            game.coop,
            game.rating,
        ],
    )?;
    Ok(())
}

/// Link a game to a developer id. Returns false if the link already existed.
pub fn insert_developer(
    conn: &Connection,
    game_id: i64,
    developer_id: i64,
) -> Result<bool, OperationError> {
    let n = conn.execute(
        "INSERT OR IGNORE INTO game_developers (game_id, developer_id) VALUES (?1, ?2)",
        params![game_id, developer_id],
    )?;
    Ok(n > 0)
}

/// Link a game to a genre id. Returns false if the link already existed.
pub fn insert_genre(conn: &Connection, game_id: i64, genre_id: i64) -> Result<bool, OperationError> {
    let n = conn.execute(
        "INSERT OR IGNORE INTO game_genres (game_id, genre_id) VALUES (?1, ?2)",
        params![game_id, genre_id],
    )?;
    Ok(n > 0)
}

/// Link a game to a publisher id. Returns false if the link already existed.
pub fn insert_publisher(
    conn: &Connection,
    game_id: i64,
    publisher_id: i64,
) -> Result<bool, OperationError> {
    let n = conn.execute(
        "INSERT OR IGNORE INTO game_publishers (game_id, publisher_id) VALUES (?1, ?2)",
        params![game_id, publisher_id],
    )?;
    Ok(n > 0)
}

/// Record an alternate title for a game. Returns false for duplicates.
pub fn insert_alternate(
    conn: &Connection,
    game_id: i64,
    title: &str,
) -> Result<bool, OperationError> {
    let n = conn.execute(
        "INSERT OR IGNORE INTO game_alternates (game_id, alternate_title) VALUES (?1, ?2)",
        params![game_id, title],
    )?;
    Ok(n > 0)
}

// ── Artwork Operations ──────────────────────────────────────────────────────

/// Insert an artwork row. Returns false if an identical row already exists.
pub fn insert_artwork(conn: &Connection, art: &ArtworkRow) -> Result<bool, OperationError> {
    let n = conn.execute(
        "INSERT OR IGNORE INTO game_artwork (game_id, type, side, filename, resolution)
         VALUES (?1, ?2, ?3, ?4, ?5)",
        params![art.game_id, art.kind, art.side, art.filename, art.resolution],
    )?;
    Ok(n > 0)
}
